//! The editor: one document, one mode, at most one open draft, and an
//! optional import overlay.
//!
//! # Invariants
//!
//! - A draft is open iff the mode has an open panel (`Creating` / `Editing`).
//! - The import overlay opens only when no draft is open; while it is open
//!   only import commands are accepted.
//! - Every `Err` from [`Editor::apply`] leaves document, mode, draft and
//!   overlay unchanged. Notifications are a side channel and may be queued
//!   alongside an `Err`.

use qz_ordering::EntryId;
use qz_schemas::{DiscussionQuestion, ExamKind, ExamQuestion, QuizDocument};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::draft::{DraftEdit, DraftError, ExamBody, ExamDraft, QuestionDraft};
use crate::io::{self, ImportError};
use crate::mode::{EditorMode, ModeEvent, ModeTransitionError, Panel, Tab};
use crate::notify::Notification;
use crate::settings::EditorSettings;

const MSG_IMPORT_OK: &str = "Import succeeded";
const MSG_IMPORT_INVALID: &str = "Invalid JSON: please check the syntax";
const MSG_FILE_UNREADABLE: &str = "Could not read the JSON file";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Everything a front end can ask of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    SelectTab { tab: Tab },
    SetLessonId { id: String },
    SetSummary { text: String },

    /// Open a blank draft in the current tab. `kind` applies to the exam tab
    /// and defaults to `multiple_choice`.
    BeginCreate {
        #[serde(default)]
        kind: Option<ExamKind>,
    },
    BeginEdit { id: String },
    /// Only while creating an exam question.
    ChangeKind { kind: ExamKind },
    Edit { edit: DraftEdit },
    /// Drag-and-drop over the ordering steps, by stable entry id.
    MoveStep { active: EntryId, over: EntryId },
    Commit,
    Cancel,
    Delete { id: String },

    OpenImport,
    SetImportText { text: String },
    /// Upload path: raw file contents.
    LoadImportFile { contents: String },
    ConfirmImport,
    CancelImport,
}

// ---------------------------------------------------------------------------
// EditorError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    Mode(ModeTransitionError),
    Draft(DraftError),
    NoDraftOpen,
    DraftOpen,
    WrongTab { expected: Tab, actual: Tab },
    KindLocked,
    /// New exam questions keep their auto-assigned id.
    ExamIdAssigned,
    DuplicateId { id: String },
    UnknownId { id: String },
    ImportDialogOpen,
    ImportDialogClosed,
    ImportBufferEmpty,
    Import(ImportError),
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::Mode(e) => write!(f, "{e}"),
            EditorError::Draft(e) => write!(f, "{e}"),
            EditorError::NoDraftOpen => write!(f, "no draft is open"),
            EditorError::DraftOpen => write!(f, "a draft is open; commit or cancel it first"),
            EditorError::WrongTab { expected, actual } => {
                write!(f, "command needs the {expected:?} tab, current tab is {actual:?}")
            }
            EditorError::KindLocked => {
                write!(f, "question type can only change while creating")
            }
            EditorError::ExamIdAssigned => {
                write!(f, "exam id is assigned automatically while creating")
            }
            EditorError::DuplicateId { id } => write!(f, "id '{id}' is already in use"),
            EditorError::UnknownId { id } => write!(f, "no question with id '{id}'"),
            EditorError::ImportDialogOpen => write!(f, "import dialog is open"),
            EditorError::ImportDialogClosed => write!(f, "import dialog is not open"),
            EditorError::ImportBufferEmpty => write!(f, "import text is empty"),
            EditorError::Import(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<ModeTransitionError> for EditorError {
    fn from(e: ModeTransitionError) -> Self {
        EditorError::Mode(e)
    }
}

impl From<DraftError> for EditorError {
    fn from(e: DraftError) -> Self {
        EditorError::Draft(e)
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Text buffer of the import overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBuffer {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
enum OpenDraft {
    Question(QuestionDraft),
    Exam(ExamDraft),
}

#[derive(Debug, Clone)]
pub struct Editor {
    document: QuizDocument,
    mode: EditorMode,
    draft: Option<OpenDraft>,
    import: Option<ImportBuffer>,
    notifications: Vec<Notification>,
    settings: EditorSettings,
}

impl Editor {
    pub fn new(document: QuizDocument, settings: EditorSettings) -> Self {
        Self {
            document,
            mode: EditorMode::default(),
            draft: None,
            import: None,
            notifications: Vec::new(),
            settings,
        }
    }

    pub fn document(&self) -> &QuizDocument {
        &self.document
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn import_buffer(&self) -> Option<&ImportBuffer> {
        self.import.as_ref()
    }

    pub fn exam_draft(&self) -> Option<&ExamDraft> {
        match &self.draft {
            Some(OpenDraft::Exam(d)) => Some(d),
            _ => None,
        }
    }

    pub fn question_draft(&self) -> Option<&QuestionDraft> {
        match &self.draft {
            Some(OpenDraft::Question(d)) => Some(d),
            _ => None,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Export text, pretty-printed with the configured indent.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        io::export_document(&self.document, self.settings.export_indent)
    }

    /// Next free auto-assigned exam id: `<prefix><count + 1>`, counting up
    /// past ids already taken.
    pub fn next_exam_id(&self) -> String {
        let prefix = &self.settings.exam_id_prefix;
        let mut n = self.document.exam.len() + 1;
        loop {
            let candidate = format!("{prefix}{n}");
            if self.document.exam_question(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    // -----------------------------------------------------------------------
    // apply
    // -----------------------------------------------------------------------

    pub fn apply(&mut self, cmd: EditorCommand) -> Result<(), EditorError> {
        let is_import_cmd = matches!(
            cmd,
            EditorCommand::OpenImport
                | EditorCommand::SetImportText { .. }
                | EditorCommand::LoadImportFile { .. }
                | EditorCommand::ConfirmImport
                | EditorCommand::CancelImport
        );
        if self.import.is_some() && !is_import_cmd {
            return Err(EditorError::ImportDialogOpen);
        }

        match cmd {
            EditorCommand::SelectTab { tab } => {
                self.mode.apply(&ModeEvent::SelectTab(tab))?;
                Ok(())
            }
            EditorCommand::SetLessonId { id } => {
                self.require_tab(Tab::Info)?;
                self.document.id = id;
                Ok(())
            }
            EditorCommand::SetSummary { text } => {
                self.require_tab(Tab::Info)?;
                self.document.summary = text;
                Ok(())
            }
            EditorCommand::BeginCreate { kind } => self.begin_create(kind),
            EditorCommand::BeginEdit { id } => self.begin_edit(id),
            EditorCommand::ChangeKind { kind } => self.change_kind(kind),
            EditorCommand::Edit { edit } => self.edit(edit),
            EditorCommand::MoveStep { active, over } => self.move_step(active, over),
            EditorCommand::Commit => self.commit(),
            EditorCommand::Cancel => self.cancel(),
            EditorCommand::Delete { id } => self.delete(id),

            EditorCommand::OpenImport => self.open_import(),
            EditorCommand::SetImportText { text } => {
                self.import_mut()?.text = text;
                Ok(())
            }
            EditorCommand::LoadImportFile { contents } => self.load_import_file(&contents),
            EditorCommand::ConfirmImport => self.confirm_import(),
            EditorCommand::CancelImport => {
                self.import_mut()?;
                self.import = None;
                Ok(())
            }
        }
    }

    fn require_tab(&self, expected: Tab) -> Result<(), EditorError> {
        let actual = self.mode.tab();
        if actual != expected {
            return Err(EditorError::WrongTab { expected, actual });
        }
        Ok(())
    }

    fn begin_create(&mut self, kind: Option<ExamKind>) -> Result<(), EditorError> {
        let draft = match self.mode.tab() {
            Tab::Exam => OpenDraft::Exam(ExamDraft::new(
                kind.unwrap_or(ExamKind::MultipleChoice),
                self.next_exam_id(),
            )),
            _ => OpenDraft::Question(QuestionDraft::default()),
        };
        self.mode.apply(&ModeEvent::BeginCreate)?;
        debug!(tab = ?self.mode.tab(), "draft opened for create");
        self.draft = Some(draft);
        Ok(())
    }

    fn begin_edit(&mut self, id: String) -> Result<(), EditorError> {
        let unknown = || EditorError::UnknownId { id: id.clone() };
        let draft = match self.mode.tab() {
            Tab::Questions => OpenDraft::Question(QuestionDraft::edit(
                self.document.question(&id).ok_or_else(unknown)?,
            )),
            Tab::Exam => OpenDraft::Exam(ExamDraft::edit(
                self.document.exam_question(&id).ok_or_else(unknown)?,
            )?),
            Tab::Info => {
                return Err(ModeTransitionError {
                    from: self.mode.clone(),
                    event: ModeEvent::BeginEdit { id: id.clone() },
                }
                .into())
            }
        };
        self.mode.apply(&ModeEvent::BeginEdit { id: id.clone() })?;
        debug!(%id, "draft opened for edit");
        self.draft = Some(draft);
        Ok(())
    }

    fn change_kind(&mut self, kind: ExamKind) -> Result<(), EditorError> {
        if !matches!(self.mode, EditorMode::Exam(Panel::Creating)) {
            return Err(EditorError::KindLocked);
        }
        match &mut self.draft {
            Some(OpenDraft::Exam(d)) => {
                d.change_kind(kind);
                Ok(())
            }
            _ => Err(EditorError::NoDraftOpen),
        }
    }

    fn edit(&mut self, edit: DraftEdit) -> Result<(), EditorError> {
        match &mut self.draft {
            Some(OpenDraft::Question(d)) => d.apply(edit)?,
            Some(OpenDraft::Exam(_))
                if matches!(edit, DraftEdit::SetId { .. })
                    && matches!(self.mode, EditorMode::Exam(Panel::Creating)) =>
            {
                return Err(EditorError::ExamIdAssigned)
            }
            Some(OpenDraft::Exam(d)) => d.apply(edit)?,
            None => return Err(EditorError::NoDraftOpen),
        }
        Ok(())
    }

    fn move_step(&mut self, active: EntryId, over: EntryId) -> Result<(), EditorError> {
        match &mut self.draft {
            Some(OpenDraft::Exam(ExamDraft {
                body: ExamBody::Ordering(d),
                ..
            })) => d.move_entry(active, over).map_err(|e| DraftError::Entry(e).into()),
            Some(OpenDraft::Exam(d)) => Err(DraftError::NotApplicable {
                edit: "move_step",
                kind: d.kind().as_str(),
            }
            .into()),
            Some(OpenDraft::Question(_)) => Err(DraftError::NotApplicable {
                edit: "move_step",
                kind: "discussion",
            }
            .into()),
            None => Err(EditorError::NoDraftOpen),
        }
    }

    fn commit(&mut self) -> Result<(), EditorError> {
        let editing = self.mode.editing_id().map(str::to_string);
        match &self.draft {
            Some(OpenDraft::Question(d)) => {
                let q = d.commit()?;
                let slot = slot_for(
                    &self.document.questions,
                    |x: &DiscussionQuestion| x.id.as_str(),
                    &q.id,
                    editing.as_deref(),
                )?;
                self.mode.apply(&ModeEvent::Finish)?;
                info!(id = %q.id, created = slot.is_none(), "discussion question committed");
                match slot {
                    Some(i) => self.document.questions[i] = q,
                    None => self.document.questions.push(q),
                }
            }
            Some(OpenDraft::Exam(d)) => {
                let q = d.commit()?;
                let slot = slot_for(
                    &self.document.exam,
                    |x: &ExamQuestion| x.id(),
                    q.id(),
                    editing.as_deref(),
                )?;
                self.mode.apply(&ModeEvent::Finish)?;
                info!(
                    id = %q.id(),
                    kind = %q.kind(),
                    created = slot.is_none(),
                    "exam question committed"
                );
                match slot {
                    Some(i) => self.document.exam[i] = q,
                    None => self.document.exam.push(q),
                }
            }
            None => return Err(EditorError::NoDraftOpen),
        }
        self.draft = None;
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), EditorError> {
        if self.draft.is_none() {
            return Err(EditorError::NoDraftOpen);
        }
        self.mode.apply(&ModeEvent::Finish)?;
        self.draft = None;
        Ok(())
    }

    fn delete(&mut self, id: String) -> Result<(), EditorError> {
        if self.mode.has_open_draft() {
            return Err(EditorError::DraftOpen);
        }
        let removed = match self.mode.tab() {
            Tab::Questions => remove_by_id(&mut self.document.questions, |q| q.id == id),
            Tab::Exam => remove_by_id(&mut self.document.exam, |q| q.id() == id),
            Tab::Info => {
                return Err(EditorError::WrongTab {
                    expected: Tab::Exam,
                    actual: Tab::Info,
                })
            }
        };
        if !removed {
            return Err(EditorError::UnknownId { id });
        }
        info!(%id, tab = ?self.mode.tab(), "question deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Import overlay
    // -----------------------------------------------------------------------

    fn import_mut(&mut self) -> Result<&mut ImportBuffer, EditorError> {
        self.import.as_mut().ok_or(EditorError::ImportDialogClosed)
    }

    fn open_import(&mut self) -> Result<(), EditorError> {
        if self.mode.has_open_draft() {
            return Err(EditorError::DraftOpen);
        }
        if self.import.is_some() {
            return Err(EditorError::ImportDialogOpen);
        }
        self.import = Some(ImportBuffer::default());
        Ok(())
    }

    fn load_import_file(&mut self, contents: &str) -> Result<(), EditorError> {
        self.import_mut()?;
        match io::normalize_upload(contents) {
            Ok(text) => {
                self.import_mut()?.text = text;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "import file unreadable");
                let ms = self.settings.file_error_ms;
                self.notify(Notification::error(MSG_FILE_UNREADABLE, ms));
                Err(EditorError::Import(e))
            }
        }
    }

    fn confirm_import(&mut self) -> Result<(), EditorError> {
        let text = &self
            .import
            .as_ref()
            .ok_or(EditorError::ImportDialogClosed)?
            .text;
        if text.trim().is_empty() {
            return Err(EditorError::ImportBufferEmpty);
        }
        match io::parse_document(text) {
            Ok(doc) => {
                info!(
                    id = %doc.id,
                    questions = doc.questions.len(),
                    exam = doc.exam.len(),
                    "document imported"
                );
                self.document = doc;
                self.import = None;
                let ms = self.settings.success_ms;
                self.notify(Notification::success(MSG_IMPORT_OK, ms));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "import rejected");
                let ms = self.settings.import_error_ms;
                self.notify(Notification::error(MSG_IMPORT_INVALID, ms));
                Err(EditorError::Import(e))
            }
        }
    }

    fn notify(&mut self, n: Notification) {
        debug!(notification = %n, "notification queued");
        self.notifications.push(n);
    }
}

/// Where a committed question goes: `Some(index)` replaces the question
/// held under `editing`, `None` appends. A new id that collides with any
/// other question is refused.
fn slot_for<T>(
    list: &[T],
    id_of: impl Fn(&T) -> &str,
    new_id: &str,
    editing: Option<&str>,
) -> Result<Option<usize>, EditorError> {
    let slot = match editing {
        Some(old) => Some(
            list.iter()
                .position(|x| id_of(x) == old)
                .ok_or_else(|| EditorError::UnknownId { id: old.to_string() })?,
        ),
        None => None,
    };
    let clash = list
        .iter()
        .enumerate()
        .any(|(i, x)| id_of(x) == new_id && Some(i) != slot);
    if clash {
        return Err(EditorError::DuplicateId {
            id: new_id.to_string(),
        });
    }
    Ok(slot)
}

fn remove_by_id<T>(list: &mut Vec<T>, is_target: impl Fn(&T) -> bool) -> bool {
    let before = list.len();
    list.retain(|x| !is_target(x));
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(QuizDocument::new("lesson", "summary"), EditorSettings::default())
    }

    #[test]
    fn info_edits_need_info_tab() {
        let mut ed = editor();
        ed.apply(EditorCommand::SetSummary { text: "new".into() }).unwrap();
        ed.apply(EditorCommand::SelectTab { tab: Tab::Exam }).unwrap();
        assert!(matches!(
            ed.apply(EditorCommand::SetLessonId { id: "x".into() }),
            Err(EditorError::WrongTab { .. })
        ));
        assert_eq!(ed.document().summary, "new");
        assert_eq!(ed.document().id, "lesson");
    }

    #[test]
    fn commit_without_draft_is_refused() {
        let mut ed = editor();
        assert_eq!(ed.apply(EditorCommand::Commit), Err(EditorError::NoDraftOpen));
        assert_eq!(ed.apply(EditorCommand::Cancel), Err(EditorError::NoDraftOpen));
    }

    #[test]
    fn import_overlay_blocks_other_commands() {
        let mut ed = editor();
        ed.apply(EditorCommand::OpenImport).unwrap();
        assert_eq!(
            ed.apply(EditorCommand::SelectTab { tab: Tab::Exam }),
            Err(EditorError::ImportDialogOpen)
        );
        ed.apply(EditorCommand::CancelImport).unwrap();
        assert!(ed.import_buffer().is_none());
        assert_eq!(
            ed.apply(EditorCommand::CancelImport),
            Err(EditorError::ImportDialogClosed)
        );
    }

    #[test]
    fn next_exam_id_skips_taken_ids() {
        let mut doc = QuizDocument::new("lesson", "summary");
        doc.exam.push(ExamQuestion::TrueFalse(qz_schemas::TrueFalseQuestion {
            id: "e2".into(),
            question: "Q".into(),
            answer: true,
        }));
        let ed = Editor::new(doc, EditorSettings::default());
        // One question stored, so count+1 = 2 is taken; next free is 3.
        assert_eq!(ed.next_exam_id(), "e3");
    }

    #[test]
    fn exam_id_is_read_only_while_creating() {
        let mut ed = editor();
        ed.apply(EditorCommand::SelectTab { tab: Tab::Exam }).unwrap();
        ed.apply(EditorCommand::BeginCreate {
            kind: Some(ExamKind::TrueFalse),
        })
        .unwrap();
        assert_eq!(
            ed.apply(EditorCommand::Edit {
                edit: DraftEdit::SetId { id: "custom".into() },
            }),
            Err(EditorError::ExamIdAssigned)
        );
        assert_eq!(ed.exam_draft().map(|d| d.id.as_str()), Some("e1"));
    }

    #[test]
    fn commands_deserialize_from_tagged_json() {
        let cmds: Vec<EditorCommand> = serde_json::from_str(
            r#"[
                {"command": "select_tab", "tab": "exam"},
                {"command": "begin_create", "kind": "ordering"},
                {"command": "begin_create"},
                {"command": "edit", "edit": {"op": "reorder_entry", "from": 1, "to": 0}},
                {"command": "move_step", "active": 2, "over": 0},
                {"command": "commit"}
            ]"#,
        )
        .unwrap();
        assert_eq!(cmds[1], EditorCommand::BeginCreate { kind: Some(ExamKind::Ordering) });
        assert_eq!(cmds[2], EditorCommand::BeginCreate { kind: None });
        assert_eq!(
            cmds[3],
            EditorCommand::Edit {
                edit: DraftEdit::ReorderEntry { from: 1, to: 0 }
            }
        );
    }
}
