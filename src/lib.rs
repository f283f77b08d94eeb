// lib.rs
pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod lang;

pub use editor::{Editor, Event, EventKind, Widget};
pub use error::{EditError, Result};
pub use lang::LanguageServices;
