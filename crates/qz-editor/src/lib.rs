//! qz-editor
//!
//! Editing core for quiz documents: per-variant drafts, the editor-mode
//! state machine, document CRUD, import/export and notifications.
//!
//! No filesystem IO here; callers hand in text and take text back.

pub mod draft;
mod editor;
pub mod io;
pub mod lint;
pub mod mode;
mod notify;
pub mod render;
mod settings;

pub use draft::{DraftEdit, DraftError, ExamBody, ExamDraft, ListDraft, QuestionDraft};
pub use editor::{Editor, EditorCommand, EditorError, ImportBuffer};
pub use io::{export_document, normalize_upload, parse_document, ImportError};
pub use lint::{lint_document, Finding, Severity};
pub use mode::{EditorMode, ModeEvent, ModeTransitionError, Panel, Tab};
pub use notify::{Notification, NotificationLevel};
pub use render::render_document;
pub use settings::{EditorSettings, SETTINGS_POINTERS};
