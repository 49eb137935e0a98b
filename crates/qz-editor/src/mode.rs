//! Editor mode state machine.
//!
//! # Design
//!
//! Which tab is shown and whether a form is open is one value, [`EditorMode`].
//! Every change goes through [`EditorMode::apply`]; illegal events return
//! [`ModeTransitionError`] and leave the mode untouched.
//!
//! ```text
//!            SelectTab (no draft open)
//!   Info ◄──────────────────────────► Questions(Listing) ◄──► Exam(Listing)
//!                                        │        ▲              │      ▲
//!                         BeginCreate /  │        │ Finish       │      │ Finish
//!                         BeginEdit{id}  ▼        │              ▼      │
//!                                  Questions(Creating |      Exam(Creating |
//!                                            Editing{id})         Editing{id})
//! ```

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tab / Panel / EditorMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Info,
    Questions,
    Exam,
}

/// Content of a list tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Listing,
    Creating,
    /// `id` is the id the question had when editing began.
    Editing { id: String },
}

impl Panel {
    pub fn has_open_draft(&self) -> bool {
        !matches!(self, Panel::Listing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Info,
    Questions(Panel),
    Exam(Panel),
}

impl EditorMode {
    pub fn tab(&self) -> Tab {
        match self {
            EditorMode::Info => Tab::Info,
            EditorMode::Questions(_) => Tab::Questions,
            EditorMode::Exam(_) => Tab::Exam,
        }
    }

    pub fn panel(&self) -> Option<&Panel> {
        match self {
            EditorMode::Info => None,
            EditorMode::Questions(p) | EditorMode::Exam(p) => Some(p),
        }
    }

    pub fn has_open_draft(&self) -> bool {
        self.panel().is_some_and(Panel::has_open_draft)
    }

    /// Id under edit, if any.
    pub fn editing_id(&self) -> Option<&str> {
        match self.panel() {
            Some(Panel::Editing { id }) => Some(id),
            _ => None,
        }
    }

    fn with_panel(tab: Tab, panel: Panel) -> Self {
        match tab {
            Tab::Info => EditorMode::Info,
            Tab::Questions => EditorMode::Questions(panel),
            Tab::Exam => EditorMode::Exam(panel),
        }
    }

    /// Apply an event. On `Err` the mode is unchanged.
    pub fn apply(&mut self, event: &ModeEvent) -> Result<(), ModeTransitionError> {
        let next = self.next(event)?;
        *self = next;
        Ok(())
    }

    fn next(&self, event: &ModeEvent) -> Result<EditorMode, ModeTransitionError> {
        let illegal = || ModeTransitionError {
            from: self.clone(),
            event: event.clone(),
        };

        match (self, event) {
            (m, ModeEvent::SelectTab(tab)) if !m.has_open_draft() => {
                Ok(EditorMode::with_panel(*tab, Panel::Listing))
            }

            (EditorMode::Questions(Panel::Listing) | EditorMode::Exam(Panel::Listing), ModeEvent::BeginCreate) => {
                Ok(EditorMode::with_panel(self.tab(), Panel::Creating))
            }
            (
                EditorMode::Questions(Panel::Listing) | EditorMode::Exam(Panel::Listing),
                ModeEvent::BeginEdit { id },
            ) => Ok(EditorMode::with_panel(
                self.tab(),
                Panel::Editing { id: id.clone() },
            )),

            (m, ModeEvent::Finish) if m.has_open_draft() => {
                Ok(EditorMode::with_panel(m.tab(), Panel::Listing))
            }

            _ => Err(illegal()),
        }
    }
}

// ---------------------------------------------------------------------------
// ModeEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeEvent {
    SelectTab(Tab),
    BeginCreate,
    BeginEdit { id: String },
    /// Draft committed or cancelled.
    Finish,
}

// ---------------------------------------------------------------------------
// ModeTransitionError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTransitionError {
    pub from: EditorMode,
    pub event: ModeEvent,
}

impl std::fmt::Display for ModeTransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "illegal editor transition: {:?} + {:?}",
            self.from, self.event
        )
    }
}

impl std::error::Error for ModeTransitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(events: &[ModeEvent]) -> EditorMode {
        let mut m = EditorMode::default();
        for e in events {
            m.apply(e).unwrap();
        }
        m
    }

    #[test]
    fn starts_on_info_tab() {
        assert_eq!(EditorMode::default(), EditorMode::Info);
        assert!(!EditorMode::default().has_open_draft());
    }

    #[test]
    fn create_then_finish_returns_to_listing() {
        let m = apply_all(&[
            ModeEvent::SelectTab(Tab::Exam),
            ModeEvent::BeginCreate,
            ModeEvent::Finish,
        ]);
        assert_eq!(m, EditorMode::Exam(Panel::Listing));
    }

    #[test]
    fn editing_remembers_original_id() {
        let m = apply_all(&[
            ModeEvent::SelectTab(Tab::Questions),
            ModeEvent::BeginEdit { id: "q2".into() },
        ]);
        assert_eq!(m.editing_id(), Some("q2"));
        assert_eq!(m.tab(), Tab::Questions);
    }

    #[test]
    fn tab_switch_refused_while_draft_open() {
        let mut m = apply_all(&[ModeEvent::SelectTab(Tab::Exam), ModeEvent::BeginCreate]);
        let before = m.clone();
        let err = m.apply(&ModeEvent::SelectTab(Tab::Info)).unwrap_err();
        assert_eq!(err.from, before);
        assert_eq!(m, before);
    }

    #[test]
    fn illegal_events_leave_mode_unchanged() {
        let mut m = EditorMode::Info;
        assert!(m.apply(&ModeEvent::BeginCreate).is_err());
        assert!(m.apply(&ModeEvent::Finish).is_err());
        assert_eq!(m, EditorMode::Info);

        let mut m = EditorMode::Exam(Panel::Creating);
        assert!(m.apply(&ModeEvent::BeginEdit { id: "e1".into() }).is_err());
        assert_eq!(m, EditorMode::Exam(Panel::Creating));
    }

    #[test]
    fn reselecting_current_tab_is_allowed() {
        let mut m = EditorMode::Questions(Panel::Listing);
        m.apply(&ModeEvent::SelectTab(Tab::Questions)).unwrap();
        assert_eq!(m, EditorMode::Questions(Panel::Listing));
    }
}
