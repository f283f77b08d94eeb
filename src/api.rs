// api.rs
use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::editor::{Command, Display, Editor, EditorSnapshot, Event, ListKind, Span};
use crate::error::EditError;
use crate::lang::LanguageServices;

// Application state
#[derive(Debug)]
pub struct AppState {
    pub app_name: String,
    pub request_count: Mutex<usize>,
    pub editor: Mutex<Editor>,
    pub services: LanguageServices,
}

impl AppState {
    pub fn new(editor: Editor) -> Self {
        let services = editor.services().clone();
        Self {
            app_name: "QuillEdit".to_string(),
            request_count: Mutex::new(0),
            editor: Mutex::new(editor),
            services,
        }
    }

    async fn bump(&self) -> usize {
        let mut count = self.request_count.lock().await;
        *count += 1;
        *count
    }
}

#[derive(Serialize)]
struct InfoResponse {
    app_name: String,
    version: String,
    request_count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!("request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
pub struct DisplayUpdate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub cursor: Option<usize>,
    #[serde(default)]
    pub selection: Option<Span>,
    #[serde(default)]
    pub clear_selection: bool,
}

#[derive(Deserialize)]
pub struct ListSelection {
    pub index: usize,
}

#[derive(Serialize, Deserialize)]
pub struct EventResponse {
    pub command: Option<Command>,
    pub state: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ParaphraseRequest {
    pub text: String,
    // Pins the random source for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct LookupRequest {
    pub word: String,
}

#[derive(Serialize, Deserialize)]
pub struct LookupResponse {
    pub synonyms: BTreeSet<String>,
    pub spellings: BTreeSet<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/info", get(info))
        .route("/api/state", get(snapshot))
        .route("/api/displays/{display}", put(update_display))
        .route("/api/lists/{list}/selection", put(select_list_item))
        .route("/api/events", post(dispatch_event))
        .route("/api/clipboard", get(get_clipboard).put(set_clipboard))
        .route("/api/correct", post(correct))
        .route("/api/paraphrase", post(paraphrase))
        .route("/api/lookup", post(lookup))
        .with_state(state)
}

// Route handlers

async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let request_count = state.bump().await;

    Json(InfoResponse {
        app_name: state.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        request_count,
    })
}

async fn snapshot(State(state): State<Arc<AppState>>) -> Json<EditorSnapshot> {
    state.bump().await;
    let editor = state.editor.lock().await;
    Json(editor.snapshot())
}

async fn update_display(
    State(state): State<Arc<AppState>>,
    Path(display): Path<String>,
    Json(update): Json<DisplayUpdate>,
) -> Result<Json<EditorSnapshot>, EditError> {
    state.bump().await;
    let display: Display = display.parse()?;

    let mut editor = state.editor.lock().await;
    // Applied to a copy so a rejected update leaves the display untouched.
    let mut area = editor.display(display).clone();
    if let Some(text) = update.text {
        area.set_text(text);
    }
    if let Some(cursor) = update.cursor {
        area.set_cursor(cursor)?;
    }
    if update.clear_selection {
        area.clear_selection();
    }
    if let Some(span) = update.selection {
        area.select(span)?;
    }
    *editor.display_mut(display) = area;
    Ok(Json(editor.snapshot()))
}

async fn select_list_item(
    State(state): State<Arc<AppState>>,
    Path(list): Path<String>,
    Json(selection): Json<ListSelection>,
) -> Result<Json<EditorSnapshot>, EditError> {
    state.bump().await;
    let list: ListKind = list.parse()?;

    let mut editor = state.editor.lock().await;
    editor.list_mut(list).select(selection.index)?;
    Ok(Json(editor.snapshot()))
}

async fn dispatch_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<Event>,
) -> Result<Json<EventResponse>, EditError> {
    state.bump().await;

    let response = blocking(move || {
        let mut editor = state.editor.blocking_lock();
        let command = editor.dispatch(&event)?;
        if let Some(command) = &command {
            info!(?command, "command executed");
        }
        Ok::<_, EditError>(EventResponse {
            command,
            state: serde_json::to_value(editor.snapshot())?,
        })
    })
    .await??;
    Ok(Json(response))
}

async fn get_clipboard(State(state): State<Arc<AppState>>) -> Json<TextBody> {
    state.bump().await;
    let editor = state.editor.lock().await;
    Json(TextBody {
        text: editor.clipboard().to_string(),
    })
}

async fn set_clipboard(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TextBody>,
) -> StatusCode {
    state.bump().await;
    state.editor.lock().await.set_clipboard(body.text);
    StatusCode::NO_CONTENT
}

async fn correct(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TextBody>,
) -> Result<Json<TextBody>, EditError> {
    state.bump().await;
    let services = state.services.clone();
    let text = blocking(move || services.correct_text(&body.text)).await?;
    Ok(Json(TextBody { text }))
}

async fn paraphrase(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ParaphraseRequest>,
) -> Result<Json<TextBody>, EditError> {
    state.bump().await;
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let services = state.services.clone();
    let text = blocking(move || services.paraphrase(&request.text, &mut rng)).await?;
    Ok(Json(TextBody { text }))
}

async fn lookup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, EditError> {
    state.bump().await;
    let services = state.services.clone();
    let (synonyms, spellings) = blocking(move || services.lookup(request.word.trim())).await?;
    Ok(Json(LookupResponse {
        synonyms,
        spellings,
    }))
}

// Spelling search and tagging are CPU-bound; keep them off the async workers.
async fn blocking<F, T>(work: F) -> Result<T, EditError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}
