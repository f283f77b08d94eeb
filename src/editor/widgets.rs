// editor/widgets.rs
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

/// The three text displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Original,
    Corrected,
    Paraphrased,
}

impl Display {
    pub const ALL: [Display; 3] = [Display::Original, Display::Corrected, Display::Paraphrased];

    pub fn name(self) -> &'static str {
        match self {
            Display::Original => "original",
            Display::Corrected => "corrected",
            Display::Paraphrased => "paraphrased",
        }
    }
}

impl FromStr for Display {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        Display::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| EditError::UnknownWidget(s.to_string()))
    }
}

/// The two selection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Synonyms,
    Spellings,
}

impl ListKind {
    pub fn name(self) -> &'static str {
        match self {
            ListKind::Synonyms => "synonyms",
            ListKind::Spellings => "spellings",
        }
    }
}

impl FromStr for ListKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "synonyms" => Ok(ListKind::Synonyms),
            "spellings" => Ok(ListKind::Spellings),
            other => Err(EditError::UnknownWidget(other.to_string())),
        }
    }
}

/// Half-open range of char indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    /// A word replaced by paraphrasing.
    Changed,
    /// Marked by "select all".
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub span: Span,
    pub kind: HighlightKind,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A multi-line text display. Positions are char indices.
#[derive(Debug, Clone, Serialize)]
pub struct TextArea {
    #[serde(skip)]
    display: Display,
    text: String,
    cursor: usize,
    selection: Option<Span>,
    highlights: Vec<Highlight>,
}

impl TextArea {
    pub fn new(display: Display) -> Self {
        Self {
            display,
            text: String::new(),
            cursor: 0,
            selection: None,
            highlights: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<Span> {
        self.selection
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Replace the whole contents. Cursor goes to the end; selection and
    /// highlights are dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
        self.selection = None;
        self.highlights.clear();
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn set_cursor(&mut self, position: usize) -> Result<()> {
        let len = self.len();
        if position > len {
            return Err(EditError::InvalidPosition {
                widget: self.display.name().to_string(),
                position,
                len,
            });
        }
        self.cursor = position;
        Ok(())
    }

    /// Select `span`; an empty span clears the selection.
    pub fn select(&mut self, span: Span) -> Result<()> {
        self.check_span(span)?;
        self.selection = (!span.is_empty()).then_some(span);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn select_all(&mut self) {
        let all = Span::new(0, self.len());
        self.selection = (!all.is_empty()).then_some(all);
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection.map(|span| self.slice(span))
    }

    pub fn highlight(&mut self, span: Span, kind: HighlightKind) {
        if !span.is_empty() {
            self.highlights.push(Highlight { span, kind });
        }
    }

    /// Text covered by `span`, clamped to the contents.
    pub fn slice(&self, span: Span) -> &str {
        let start = self.byte_offset(span.start);
        let end = self.byte_offset(span.end.max(span.start));
        &self.text[start..end]
    }

    /// Insert `text` at `position`.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<()> {
        self.replace(Span::new(position, position), text)
    }

    /// Replace `span` with `text`. A cursor inside or at the edges of `span`
    /// ends up after the new text.
    pub fn replace(&mut self, span: Span, text: &str) -> Result<()> {
        self.check_span(span)?;
        let start = self.byte_offset(span.start);
        let end = self.byte_offset(span.end);
        self.text.replace_range(start..end, text);

        let inserted = text.chars().count();
        if self.cursor > span.end {
            self.cursor = self.cursor - span.len() + inserted;
        } else if self.cursor >= span.start {
            self.cursor = span.start + inserted;
        }
        self.selection = None;

        // Highlights touching the replaced text go; later ones shift.
        self.highlights
            .retain(|h| h.span.end <= span.start || h.span.start >= span.end);
        for h in &mut self.highlights {
            if h.span.start >= span.end {
                h.span.start = h.span.start - span.len() + inserted;
                h.span.end = h.span.end - span.len() + inserted;
            }
        }
        Ok(())
    }

    /// The word containing `position` (alphanumerics and `_`), or the word
    /// ending right before it.
    pub fn word_at(&self, position: usize) -> Option<Span> {
        let chars: Vec<char> = self.text.chars().collect();
        let anchor = if chars.get(position).copied().is_some_and(is_word_char) {
            position
        } else if position > 0 && chars.get(position - 1).copied().is_some_and(is_word_char) {
            position - 1
        } else {
            return None;
        };

        let mut start = anchor;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
        let mut end = anchor + 1;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        Some(Span::new(start, end))
    }

    /// The word under the cursor.
    pub fn word_at_cursor(&self) -> Option<Span> {
        self.word_at(self.cursor)
    }

    fn check_span(&self, span: Span) -> Result<()> {
        let len = self.len();
        if span.start > span.end || span.end > len {
            return Err(EditError::InvalidRange {
                widget: self.display.name().to_string(),
                start: span.start,
                end: span.end,
                len,
            });
        }
        Ok(())
    }

    fn byte_offset(&self, position: usize) -> usize {
        self.text
            .char_indices()
            .nth(position)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

/// A selection list.
#[derive(Debug, Clone, Serialize)]
pub struct ListBox {
    #[serde(skip)]
    kind: ListKind,
    items: Vec<String>,
    selected: Option<usize>,
}

impl ListBox {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.items = items.into_iter().collect();
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(EditError::InvalidPosition {
                widget: self.kind.name().to_string(),
                position: index,
                len: self.items.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }
}
