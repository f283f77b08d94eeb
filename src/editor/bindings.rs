// editor/bindings.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::widgets::{Display, ListKind};

/// Every widget a front end can raise events on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Original,
    Corrected,
    Paraphrased,
    SynonymList,
    SpellingList,
    CorrectButton,
    ParaphraseButton,
    ClearOriginalButton,
    ClearCorrectedButton,
    ClearParaphrasedButton,
    PasteButton,
    SelectAllButton,
    CopyAllButton,
    ResetButton,
}

impl Widget {
    pub fn display(self) -> Option<Display> {
        match self {
            Widget::Original => Some(Display::Original),
            Widget::Corrected => Some(Display::Corrected),
            Widget::Paraphrased => Some(Display::Paraphrased),
            _ => None,
        }
    }

    pub fn list(self) -> Option<ListKind> {
        match self {
            Widget::SynonymList => Some(ListKind::Synonyms),
            Widget::SpellingList => Some(ListKind::Spellings),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Press,
    SecondaryClick,
    DoubleClick,
    SecondaryDoubleClick,
}

/// A user action on a widget. `position` is a char index for text displays
/// and an entry index for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub widget: Widget,
    pub kind: EventKind,
    #[serde(default)]
    pub position: Option<usize>,
}

impl Event {
    pub fn new(widget: Widget, kind: EventKind) -> Self {
        Self {
            widget,
            kind,
            position: None,
        }
    }

    pub fn at(widget: Widget, kind: EventKind, position: usize) -> Self {
        Self {
            widget,
            kind,
            position: Some(position),
        }
    }

    pub fn press(widget: Widget) -> Self {
        Self::new(widget, EventKind::Press)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Correct,
    Paraphrase,
    Clear(Display),
    Reset,
    Paste,
    SelectAll(Display),
    CopyAll(Display),
    Lookup(Display),
    Replace { list: ListKind, target: Display },
}

/// Command table keyed by (widget, event kind).
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    table: HashMap<(Widget, EventKind), Command>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The editor's stock layout.
    pub fn standard() -> Self {
        use EventKind::*;

        let mut bindings = Self::new();
        bindings
            .bind(Widget::CorrectButton, Press, Command::Correct)
            .bind(Widget::ParaphraseButton, Press, Command::Paraphrase)
            .bind(Widget::ClearOriginalButton, Press, Command::Clear(Display::Original))
            .bind(Widget::ClearCorrectedButton, Press, Command::Clear(Display::Corrected))
            .bind(
                Widget::ClearParaphrasedButton,
                Press,
                Command::Clear(Display::Paraphrased),
            )
            .bind(Widget::PasteButton, Press, Command::Paste)
            .bind(Widget::SelectAllButton, Press, Command::SelectAll(Display::Corrected))
            .bind(Widget::CopyAllButton, Press, Command::CopyAll(Display::Paraphrased))
            .bind(Widget::ResetButton, Press, Command::Reset)
            .bind(Widget::Corrected, SecondaryClick, Command::Lookup(Display::Corrected))
            .bind(
                Widget::Paraphrased,
                SecondaryClick,
                Command::Lookup(Display::Paraphrased),
            )
            .bind(
                Widget::SynonymList,
                DoubleClick,
                Command::Replace {
                    list: ListKind::Synonyms,
                    target: Display::Corrected,
                },
            )
            .bind(
                Widget::SpellingList,
                DoubleClick,
                Command::Replace {
                    list: ListKind::Spellings,
                    target: Display::Corrected,
                },
            )
            .bind(
                Widget::SynonymList,
                SecondaryDoubleClick,
                Command::Replace {
                    list: ListKind::Synonyms,
                    target: Display::Paraphrased,
                },
            )
            .bind(
                Widget::SpellingList,
                SecondaryDoubleClick,
                Command::Replace {
                    list: ListKind::Spellings,
                    target: Display::Paraphrased,
                },
            );
        bindings
    }

    pub fn bind(&mut self, widget: Widget, kind: EventKind, command: Command) -> &mut Self {
        self.table.insert((widget, kind), command);
        self
    }

    pub fn unbind(&mut self, widget: Widget, kind: EventKind) -> Option<Command> {
        self.table.remove(&(widget, kind))
    }

    pub fn resolve(&self, widget: Widget, kind: EventKind) -> Option<Command> {
        self.table.get(&(widget, kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
