use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quilledit::{
    api::{self, AppState, EventResponse, LookupResponse, TextBody},
    lang::{
        FrequencySpeller, LanguageServices, Lexicon, PartOfSpeech, PosTag, PosTagger, Synset,
    },
    Editor,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use tower::ServiceExt;

struct AdjectiveList(HashSet<&'static str>);

impl PosTagger for AdjectiveList {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        tokens
            .iter()
            .map(|t| {
                if self.0.contains(t) {
                    PosTag::Adjective
                } else {
                    PosTag::Other
                }
            })
            .collect()
    }
}

fn app() -> Router {
    let speller = FrequencySpeller::from_counts([
        ("this", 500),
        ("is", 450),
        ("a", 400),
        ("test", 120),
        ("quick", 60),
        ("fox", 40),
    ]);
    let lexicon = Lexicon::new(vec![
        Synset {
            pos: PartOfSpeech::AdjectiveSatellite,
            lemmas: vec!["quick".into(), "speedy".into(), "rapid".into()],
        },
        Synset {
            pos: PartOfSpeech::Noun,
            lemmas: vec!["fox".into()],
        },
    ]);
    let services = LanguageServices::new(
        Arc::new(speller),
        Arc::new(lexicon),
        Arc::new(AdjectiveList(HashSet::from(["quick"]))),
    );
    let editor = Editor::new(services, StdRng::seed_from_u64(11));
    api::router(Arc::new(AppState::new(editor)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn info_counts_requests() {
    let app = app();
    let (_, first) = send(&app, "GET", "/api/info", None).await;
    let (status, second) = send(&app, "GET", "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["app_name"], "QuillEdit");
    assert_eq!(second["request_count"], 2);
}

#[tokio::test]
async fn correct_button_through_events() {
    let app = app();
    let (status, _) = send(
        &app,
        "PUT",
        "/api/displays/original",
        Some(json!({ "text": "Ths is a tst." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "correct_button", "kind": "press" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: EventResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.state["corrected"]["text"], "This is a test.");
}

#[tokio::test]
async fn paraphrase_selection_and_reset() {
    let app = app();
    send(
        &app,
        "PUT",
        "/api/displays/corrected",
        Some(json!({ "text": "a quick fox", "selection": { "start": 0, "end": 11 } })),
    )
    .await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "paraphrase_button", "kind": "press" })),
    )
    .await;
    let text = body["state"]["paraphrased"]["text"].as_str().unwrap().to_string();
    let words: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(words[0], "a");
    assert!(words[1] == "speedy" || words[1] == "rapid");
    assert_eq!(words[2], "fox");
    assert_eq!(body["state"]["paraphrased"]["highlights"][0]["kind"], "changed");

    let (_, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "reset_button", "kind": "press" })),
    )
    .await;
    for display in ["original", "corrected", "paraphrased"] {
        assert_eq!(body["state"][display]["text"], "");
    }
    assert_eq!(body["state"]["synonyms"]["items"], json!([]));
    assert_eq!(body["state"]["spellings"]["items"], json!([]));
}

#[tokio::test]
async fn lookup_then_replace() {
    let app = app();
    send(
        &app,
        "PUT",
        "/api/displays/corrected",
        Some(json!({ "text": "a quick fox" })),
    )
    .await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "corrected", "kind": "secondary_click", "position": 3 })),
    )
    .await;
    assert_eq!(
        body["state"]["synonyms"]["items"],
        json!(["quick", "rapid", "speedy"])
    );
    assert_eq!(body["state"]["spellings"]["items"], json!(["quick"]));

    let (_, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "synonym_list", "kind": "double_click", "position": 2 })),
    )
    .await;
    assert_eq!(body["command"]["replace"]["target"], "corrected");
    assert_eq!(body["state"]["corrected"]["text"], "a speedy fox");
}

#[tokio::test]
async fn clipboard_paste() {
    let app = app();
    let (status, _) = send(&app, "PUT", "/api/clipboard", Some(json!({ "text": "pasted" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "paste_button", "kind": "press" })),
    )
    .await;
    assert_eq!(body["state"]["original"]["text"], "pasted");

    let (_, body) = send(&app, "GET", "/api/clipboard", None).await;
    let clipboard: TextBody = serde_json::from_value(body).unwrap();
    assert_eq!(clipboard.text, "pasted");
}

#[tokio::test]
async fn rejects_unknown_widgets_and_bad_positions() {
    let app = app();
    let (status, body) = send(&app, "PUT", "/api/displays/sidebar", Some(json!({ "text": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sidebar"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "widget": "original", "kind": "press", "position": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/api/lists/spellings/selection", Some(json!({ "index": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_display_update_keeps_previous_state() {
    let app = app();
    send(
        &app,
        "PUT",
        "/api/displays/original",
        Some(json!({ "text": "keep me", "selection": { "start": 0, "end": 4 } })),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/displays/original",
        Some(json!({ "text": "new text", "cursor": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/displays/original",
        Some(json!({ "text": "ab", "selection": { "start": 1, "end": 5 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(state["original"]["text"], "keep me");
    assert_eq!(state["original"]["selection"], json!({ "start": 0, "end": 4 }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_events_and_helpers() {
    let app = app();
    send(
        &app,
        "PUT",
        "/api/displays/original",
        Some(json!({ "text": "Ths is a tst." })),
    )
    .await;

    let press = json!({ "widget": "correct_button", "kind": "press" });
    let (events, corrections, lookups) = tokio::join!(
        async {
            let mut statuses = Vec::new();
            for _ in 0..4 {
                statuses.push(send(&app, "POST", "/api/events", Some(press.clone())).await.0);
            }
            statuses
        },
        async {
            let mut texts = Vec::new();
            for _ in 0..4 {
                let (_, body) =
                    send(&app, "POST", "/api/correct", Some(json!({ "text": "tst" }))).await;
                texts.push(body["text"].clone());
            }
            texts
        },
        async {
            let mut statuses = Vec::new();
            for _ in 0..4 {
                statuses.push(
                    send(&app, "POST", "/api/lookup", Some(json!({ "word": "qick" }))).await.0,
                );
            }
            statuses
        },
    );

    assert!(events.iter().all(|s| *s == StatusCode::OK));
    assert!(lookups.iter().all(|s| *s == StatusCode::OK));
    assert!(corrections.iter().all(|t| t == "test"));

    let (_, state) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(state["corrected"]["text"], "This is a test.");
}

#[tokio::test]
async fn stateless_helpers() {
    let app = app();
    let (_, body) = send(&app, "POST", "/api/correct", Some(json!({ "text": "Tst, ths!" }))).await;
    assert_eq!(body["text"], "Test, this!");

    let (_, first) = send(
        &app,
        "POST",
        "/api/paraphrase",
        Some(json!({ "text": "the quick fox.", "seed": 5 })),
    )
    .await;
    let (_, second) = send(
        &app,
        "POST",
        "/api/paraphrase",
        Some(json!({ "text": "the quick fox.", "seed": 5 })),
    )
    .await;
    assert_eq!(first, second);
    assert!(first["text"].as_str().unwrap().ends_with("fox."));

    let (_, body) = send(&app, "POST", "/api/lookup", Some(json!({ "word": "fxo" }))).await;
    let lookup: LookupResponse = serde_json::from_value(body).unwrap();
    assert!(lookup.synonyms.is_empty());
    assert_eq!(lookup.spellings, BTreeSet::from(["fox".to_string()]));
}
