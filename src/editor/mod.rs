// editor/mod.rs
pub mod bindings;
pub mod widgets;

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::lang::LanguageServices;

pub use bindings::{Bindings, Command, Event, EventKind, Widget};
pub use widgets::{Display, Highlight, HighlightKind, ListBox, ListKind, Span, TextArea};

/// Everything the front end renders.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub original: TextArea,
    pub corrected: TextArea,
    pub paraphrased: TextArea,
    pub synonyms: ListBox,
    pub spellings: ListBox,
    pub clipboard: String,
}

/// Application state: the widgets, the clipboard, the language services and
/// the random source, created once at startup.
pub struct Editor {
    original: TextArea,
    corrected: TextArea,
    paraphrased: TextArea,
    synonyms: ListBox,
    spellings: ListBox,
    clipboard: String,
    services: LanguageServices,
    bindings: Bindings,
    rng: StdRng,
}

impl Editor {
    pub fn new(services: LanguageServices, rng: StdRng) -> Self {
        Self {
            original: TextArea::new(Display::Original),
            corrected: TextArea::new(Display::Corrected),
            paraphrased: TextArea::new(Display::Paraphrased),
            synonyms: ListBox::new(ListKind::Synonyms),
            spellings: ListBox::new(ListKind::Spellings),
            clipboard: String::new(),
            services,
            bindings: Bindings::standard(),
            rng,
        }
    }

    pub fn display(&self, display: Display) -> &TextArea {
        match display {
            Display::Original => &self.original,
            Display::Corrected => &self.corrected,
            Display::Paraphrased => &self.paraphrased,
        }
    }

    pub fn display_mut(&mut self, display: Display) -> &mut TextArea {
        match display {
            Display::Original => &mut self.original,
            Display::Corrected => &mut self.corrected,
            Display::Paraphrased => &mut self.paraphrased,
        }
    }

    pub fn list(&self, list: ListKind) -> &ListBox {
        match list {
            ListKind::Synonyms => &self.synonyms,
            ListKind::Spellings => &self.spellings,
        }
    }

    pub fn list_mut(&mut self, list: ListKind) -> &mut ListBox {
        match list {
            ListKind::Synonyms => &mut self.synonyms,
            ListKind::Spellings => &mut self.spellings,
        }
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    pub fn services(&self) -> &LanguageServices {
        &self.services
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            original: self.original.clone(),
            corrected: self.corrected.clone(),
            paraphrased: self.paraphrased.clone(),
            synonyms: self.synonyms.clone(),
            spellings: self.spellings.clone(),
            clipboard: self.clipboard.clone(),
        }
    }

    /// Route an event through the binding table.
    ///
    /// A position moves the cursor of a text display or selects a list entry
    /// before the bound command runs. Returns the command that ran, if any.
    pub fn dispatch(&mut self, event: &Event) -> Result<Option<Command>> {
        if let Some(position) = event.position {
            if let Some(display) = event.widget.display() {
                self.display_mut(display).set_cursor(position)?;
            } else if let Some(list) = event.widget.list() {
                self.list_mut(list).select(position)?;
            }
        }

        let Some(command) = self.bindings.resolve(event.widget, event.kind) else {
            debug!(?event, "no binding");
            return Ok(None);
        };
        debug!(?event, ?command, "dispatch");
        self.execute(command)?;
        Ok(Some(command))
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Correct => self.correct(),
            Command::Paraphrase => self.paraphrase_selection(),
            Command::Clear(display) => self.display_mut(display).clear(),
            Command::Reset => self.reset(),
            Command::Paste => self.paste()?,
            Command::SelectAll(display) => self.select_all(display),
            Command::CopyAll(display) => {
                self.clipboard = self.display(display).text().to_string();
            }
            Command::Lookup(display) => self.lookup(display),
            Command::Replace { list, target } => self.replace_with_choice(list, target)?,
        }
        Ok(())
    }

    /// Corrected display := spell-corrected original text.
    pub fn correct(&mut self) {
        let corrected = self.services.correct_text(self.original.text());
        self.corrected.set_text(corrected);
    }

    /// Paraphrase the selected span of the corrected display into the
    /// paraphrased display. No selection, no change.
    pub fn paraphrase_selection(&mut self) {
        let Some(span) = self.corrected.selection() else {
            debug!("paraphrase without selection");
            return;
        };

        let before = self.corrected.slice(Span::new(0, span.start)).to_string();
        let selected = self.corrected.slice(span).to_string();
        let after = self
            .corrected
            .slice(Span::new(span.end, self.corrected.len()))
            .to_string();

        let paraphrased = self.services.paraphrase(&selected, &mut self.rng);
        let corrected = self.services.correct_text(&selected);

        let (text, changed) = compose_paraphrase(&before, &paraphrased, &corrected, &after);
        self.paraphrased.set_text(text);
        for span in changed {
            self.paraphrased.highlight(span, HighlightKind::Changed);
        }
    }

    /// Fill the lists with synonyms and alternative spellings of the word
    /// under the cursor of `display`.
    pub fn lookup(&mut self, display: Display) {
        let area = self.display(display);
        let Some(span) = area.word_at_cursor() else {
            self.synonyms.clear();
            self.spellings.clear();
            return;
        };
        let word = area.slice(span).to_string();

        let (synonyms, spellings) = self.services.lookup(&word);
        debug!(
            word = %word,
            synonyms = synonyms.len(),
            spellings = spellings.len(),
            "lookup"
        );
        self.synonyms.set_items(synonyms);
        self.spellings.set_items(spellings);
    }

    /// Replace the word under the cursor of `target` with the selected entry
    /// of `list`.
    pub fn replace_with_choice(&mut self, list: ListKind, target: Display) -> Result<()> {
        let Some(choice) = self.list(list).selected_item().map(str::to_string) else {
            return Ok(());
        };
        let area = self.display_mut(target);
        let Some(span) = area.word_at_cursor() else {
            return Ok(());
        };
        area.replace(span, &choice)
    }

    /// Empty every display and both lists.
    pub fn reset(&mut self) {
        for display in Display::ALL {
            self.display_mut(display).clear();
        }
        self.synonyms.clear();
        self.spellings.clear();
    }

    /// Insert the clipboard at the start of the original display.
    pub fn paste(&mut self) -> Result<()> {
        let text = self.clipboard.clone();
        self.original.insert(0, &text)
    }

    pub fn select_all(&mut self, display: Display) {
        let area = self.display_mut(display);
        area.select_all();
        if let Some(span) = area.selection() {
            area.highlight(span, HighlightKind::Selected);
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("original", &self.original.len())
            .field("corrected", &self.corrected.len())
            .field("paraphrased", &self.paraphrased.len())
            .finish()
    }
}

/// Rebuild the paraphrased display from the text around the selection and
/// the paraphrased words, marking words that differ from the spell-corrected
/// selection.
///
/// Words are paired by position in the paraphrase. A paraphrased word with
/// no corrected counterpart counts as unchanged, and no paraphrased word is
/// dropped when the two word counts differ.
///
/// The paraphrase is separated from the surrounding text by one space on
/// each side, unless that side already has whitespace or meets punctuation
/// that attaches to the word.
pub fn compose_paraphrase(
    before: &str,
    paraphrased: &str,
    corrected: &str,
    after: &str,
) -> (String, Vec<Span>) {
    let corrected: Vec<&str> = corrected.split_whitespace().collect();

    let words: Vec<&str> = paraphrased.split_whitespace().collect();

    let mut text = before.to_string();
    let mut position = before.chars().count();
    let mut changed = Vec::new();

    if let Some(first) = words.first() {
        if needs_gap(before.chars().next_back(), first.chars().next()) {
            text.push(' ');
            position += 1;
        }
    }

    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            text.push(' ');
            position += 1;
        }
        let len = word.chars().count();
        if corrected.get(i).is_some_and(|c| c != word) {
            changed.push(Span::new(position, position + len));
        }
        text.push_str(word);
        position += len;
    }

    if let Some(last) = words.last() {
        if needs_gap(last.chars().next_back(), after.chars().next()) {
            text.push(' ');
        }
    }
    text.push_str(after);

    (text, changed)
}

// Closing punctuation attaches to the word before it, opening brackets to
// the word after.
const CLOSING_PUNCTUATION: &[char] = &['?', '.', '!', ',', ':', ';', '"', ')', ']'];
const OPENING_BRACKETS: &[char] = &['(', '['];

fn needs_gap(left: Option<char>, right: Option<char>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => {
            !left.is_whitespace()
                && !right.is_whitespace()
                && !OPENING_BRACKETS.contains(&left)
                && !CLOSING_PUNCTUATION.contains(&right)
        }
        _ => false,
    }
}
