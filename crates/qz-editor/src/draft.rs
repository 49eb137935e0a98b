//! Drafts: mutable, per-variant builders behind the authoring forms.
//!
//! Each exam variant has its own builder. List-bearing builders share the
//! [`ListDraft`] operations (append / update / remove / reorder) over an
//! [`EntryList`] with stable entry ids. `commit()` is the only way out of a
//! draft and produces an immutable [`ExamQuestion`] or [`DiscussionQuestion`].
//!
//! Commit checks required fields only (non-empty text). Cross-field rules,
//! e.g. a scenario answer inside its options, are not checked here; see
//! [`crate::lint`].

use qz_ordering::{EntryError, EntryId, EntryList, OrderingSession, PermutationError, Removal};
use qz_schemas::{
    CalculationQuestion, ChoiceQuestion, DiscussionQuestion, ExamChoice, ExamKind, ExamPair,
    ExamQuestion, MatchingQuestion, ScenarioQuestion, TrueFalseQuestion,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DraftError {
    /// A required field is blank. `field` is a path such as `choices[2].text`.
    MissingField { field: String },
    /// The edit does not apply to this kind of draft.
    NotApplicable { edit: &'static str, kind: &'static str },
    Entry(EntryError),
    Permutation(PermutationError),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::MissingField { field } => write!(f, "required field '{field}' is empty"),
            DraftError::NotApplicable { edit, kind } => {
                write!(f, "edit '{edit}' does not apply to a {kind} draft")
            }
            DraftError::Entry(e) => write!(f, "{e}"),
            DraftError::Permutation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DraftError {}

impl From<EntryError> for DraftError {
    fn from(e: EntryError) -> Self {
        DraftError::Entry(e)
    }
}

impl From<PermutationError> for DraftError {
    fn from(e: PermutationError) -> Self {
        DraftError::Permutation(e)
    }
}

fn require(value: &str, field: impl Into<String>) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::MissingField {
            field: field.into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ListDraft
// ---------------------------------------------------------------------------

/// The four list operations shared by every list-bearing builder.
pub trait ListDraft {
    type Entry: Default;

    fn entries(&self) -> &EntryList<Self::Entry>;
    fn entries_mut(&mut self) -> &mut EntryList<Self::Entry>;

    fn append(&mut self) -> EntryId {
        self.entries_mut().append_default()
    }

    fn update(&mut self, position: usize, value: Self::Entry) -> Result<(), EntryError> {
        self.entries_mut().update(position, value)
    }

    /// A no-op when only one entry remains.
    fn remove(&mut self, position: usize) -> Result<Removal<Self::Entry>, EntryError> {
        self.entries_mut().remove(position)
    }

    fn reorder(&mut self, from: usize, to: usize) -> Result<(), EntryError> {
        self.entries_mut().reorder(from, to)
    }
}

// ---------------------------------------------------------------------------
// Variant builders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceDraft {
    /// `true` for `multiple_answer_choise`.
    pub multiple: bool,
    choices: EntryList<ExamChoice>,
}

impl ChoiceDraft {
    pub fn new(multiple: bool) -> Self {
        Self {
            multiple,
            choices: EntryList::default(),
        }
    }

    pub fn set_text(&mut self, position: usize, text: String) -> Result<(), EntryError> {
        self.choices.update_with(position, |c| c.text = text)
    }

    pub fn set_correct(&mut self, position: usize, is_correct: bool) -> Result<(), EntryError> {
        self.choices.update_with(position, |c| c.is_correct = is_correct)
    }

    fn commit_choices(&self) -> Result<Vec<ExamChoice>, DraftError> {
        for (i, c) in self.choices.values().enumerate() {
            require(&c.text, format!("choices[{i}].text"))?;
        }
        Ok(self.choices.to_vec())
    }
}

impl ListDraft for ChoiceDraft {
    type Entry = ExamChoice;

    fn entries(&self) -> &EntryList<ExamChoice> {
        &self.choices
    }

    fn entries_mut(&mut self) -> &mut EntryList<ExamChoice> {
        &mut self.choices
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrueFalseDraft {
    pub answer: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioDraft {
    options: EntryList<String>,
    /// 0-based.
    pub correct_answer: usize,
}

impl ListDraft for ScenarioDraft {
    type Entry = String;

    fn entries(&self) -> &EntryList<String> {
        &self.options
    }

    fn entries_mut(&mut self) -> &mut EntryList<String> {
        &mut self.options
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationDraft {
    pub expression: String,
    pub correct_answer: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingDraft {
    pairs: EntryList<ExamPair>,
}

impl MatchingDraft {
    pub fn set_pair(
        &mut self,
        position: usize,
        left: Option<String>,
        right: Option<String>,
    ) -> Result<(), EntryError> {
        self.pairs.update_with(position, |p| {
            if let Some(l) = left {
                p.left = l;
            }
            if let Some(r) = right {
                p.right = r;
            }
        })
    }
}

impl ListDraft for MatchingDraft {
    type Entry = ExamPair;

    fn entries(&self) -> &EntryList<ExamPair> {
        &self.pairs
    }

    fn entries_mut(&mut self) -> &mut EntryList<ExamPair> {
        &mut self.pairs
    }
}

/// Ordering builder: a thin shell over the permutation engine's session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderingDraft {
    session: OrderingSession,
}

impl OrderingDraft {
    pub fn session(&self) -> &OrderingSession {
        &self.session
    }

    pub fn move_entry(&mut self, active: EntryId, over: EntryId) -> Result<(), EntryError> {
        self.session.move_entry(active, over)
    }
}

impl ListDraft for OrderingDraft {
    type Entry = String;

    fn entries(&self) -> &EntryList<String> {
        self.session.working()
    }

    fn entries_mut(&mut self) -> &mut EntryList<String> {
        self.session.working_mut()
    }
}

/// Variant body of an exam draft.
#[derive(Debug, Clone, PartialEq)]
pub enum ExamBody {
    Choice(ChoiceDraft),
    TrueFalse(TrueFalseDraft),
    Scenario(ScenarioDraft),
    Calculation(CalculationDraft),
    Matching(MatchingDraft),
    Ordering(OrderingDraft),
}

impl ExamBody {
    pub fn blank(kind: ExamKind) -> Self {
        match kind {
            ExamKind::MultipleChoice => ExamBody::Choice(ChoiceDraft::new(false)),
            ExamKind::MultipleAnswerChoice => ExamBody::Choice(ChoiceDraft::new(true)),
            ExamKind::TrueFalse => ExamBody::TrueFalse(TrueFalseDraft::default()),
            ExamKind::Scenario => ExamBody::Scenario(ScenarioDraft::default()),
            ExamKind::Calculation => ExamBody::Calculation(CalculationDraft::default()),
            ExamKind::Matching => ExamBody::Matching(MatchingDraft::default()),
            ExamKind::Ordering => ExamBody::Ordering(OrderingDraft::default()),
        }
    }

    pub fn kind(&self) -> ExamKind {
        match self {
            ExamBody::Choice(c) if c.multiple => ExamKind::MultipleAnswerChoice,
            ExamBody::Choice(_) => ExamKind::MultipleChoice,
            ExamBody::TrueFalse(_) => ExamKind::TrueFalse,
            ExamBody::Scenario(_) => ExamKind::Scenario,
            ExamBody::Calculation(_) => ExamKind::Calculation,
            ExamBody::Matching(_) => ExamKind::Matching,
            ExamBody::Ordering(_) => ExamKind::Ordering,
        }
    }

    fn list_append(&mut self) -> Option<EntryId> {
        match self {
            ExamBody::Choice(d) => Some(d.append()),
            ExamBody::Scenario(d) => Some(d.append()),
            ExamBody::Matching(d) => Some(d.append()),
            ExamBody::Ordering(d) => Some(d.append()),
            ExamBody::TrueFalse(_) | ExamBody::Calculation(_) => None,
        }
    }

    /// `Ok(None)` when the body has no list. Removing the last entry is a
    /// successful no-op.
    fn list_remove(&mut self, position: usize) -> Result<Option<()>, EntryError> {
        match self {
            ExamBody::Choice(d) => d.remove(position).map(|_| Some(())),
            ExamBody::Scenario(d) => d.remove(position).map(|_| Some(())),
            ExamBody::Matching(d) => d.remove(position).map(|_| Some(())),
            ExamBody::Ordering(d) => d.remove(position).map(|_| Some(())),
            ExamBody::TrueFalse(_) | ExamBody::Calculation(_) => Ok(None),
        }
    }

    fn list_reorder(&mut self, from: usize, to: usize) -> Result<Option<()>, EntryError> {
        match self {
            ExamBody::Choice(d) => d.reorder(from, to).map(Some),
            ExamBody::Scenario(d) => d.reorder(from, to).map(Some),
            ExamBody::Matching(d) => d.reorder(from, to).map(Some),
            ExamBody::Ordering(d) => d.reorder(from, to).map(Some),
            ExamBody::TrueFalse(_) | ExamBody::Calculation(_) => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// DraftEdit
// ---------------------------------------------------------------------------

/// One field-level edit against an open draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftEdit {
    SetId { id: String },
    SetQuestion { text: String },
    /// Discussion-question answer text.
    SetAnswer { text: String },
    AppendEntry,
    RemoveEntry { position: usize },
    ReorderEntry { from: usize, to: usize },
    /// Choice text, scenario option or ordering step.
    SetText { position: usize, text: String },
    SetCorrect { position: usize, is_correct: bool },
    SetPair {
        position: usize,
        #[serde(default)]
        left: Option<String>,
        #[serde(default)]
        right: Option<String>,
    },
    SetTrueFalse { answer: bool },
    /// 0-based scenario option index.
    SetCorrectOption { index: usize },
    SetExpression { expression: String },
    SetCalculationAnswer { value: f64 },
}

impl DraftEdit {
    pub fn name(&self) -> &'static str {
        match self {
            DraftEdit::SetId { .. } => "set_id",
            DraftEdit::SetQuestion { .. } => "set_question",
            DraftEdit::SetAnswer { .. } => "set_answer",
            DraftEdit::AppendEntry => "append_entry",
            DraftEdit::RemoveEntry { .. } => "remove_entry",
            DraftEdit::ReorderEntry { .. } => "reorder_entry",
            DraftEdit::SetText { .. } => "set_text",
            DraftEdit::SetCorrect { .. } => "set_correct",
            DraftEdit::SetPair { .. } => "set_pair",
            DraftEdit::SetTrueFalse { .. } => "set_true_false",
            DraftEdit::SetCorrectOption { .. } => "set_correct_option",
            DraftEdit::SetExpression { .. } => "set_expression",
            DraftEdit::SetCalculationAnswer { .. } => "set_calculation_answer",
        }
    }
}

// ---------------------------------------------------------------------------
// ExamDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExamDraft {
    pub id: String,
    pub question: String,
    pub body: ExamBody,
}

impl ExamDraft {
    pub fn new(kind: ExamKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: String::new(),
            body: ExamBody::blank(kind),
        }
    }

    /// Open a stored question for editing.
    ///
    /// Ordering questions re-sort their steps into correct order; a stored
    /// order that points outside `items` is refused.
    pub fn edit(q: &ExamQuestion) -> Result<Self, DraftError> {
        let body = match q {
            ExamQuestion::MultipleChoice(c) | ExamQuestion::MultipleAnswerChoice(c) => {
                ExamBody::Choice(ChoiceDraft {
                    multiple: matches!(q, ExamQuestion::MultipleAnswerChoice(_)),
                    choices: EntryList::from_values(c.choices.clone()),
                })
            }
            ExamQuestion::TrueFalse(t) => ExamBody::TrueFalse(TrueFalseDraft {
                answer: Some(t.answer),
            }),
            ExamQuestion::Scenario(s) => ExamBody::Scenario(ScenarioDraft {
                options: EntryList::from_values(s.options.clone()),
                correct_answer: s.correct_answer,
            }),
            ExamQuestion::Calculation(c) => ExamBody::Calculation(CalculationDraft {
                expression: c.expression.clone(),
                correct_answer: Some(c.correct_answer),
            }),
            ExamQuestion::Matching(m) => ExamBody::Matching(MatchingDraft {
                pairs: EntryList::from_values(m.pairs.clone()),
            }),
            ExamQuestion::Ordering(o) => ExamBody::Ordering(OrderingDraft {
                session: OrderingSession::from_question(o)?,
            }),
        };
        Ok(Self {
            id: q.id().to_string(),
            question: q.question().to_string(),
            body,
        })
    }

    pub fn kind(&self) -> ExamKind {
        self.body.kind()
    }

    /// Switch variant while creating. Id and question text are kept; the body
    /// starts blank.
    pub fn change_kind(&mut self, kind: ExamKind) {
        if self.kind() != kind {
            self.body = ExamBody::blank(kind);
        }
    }

    pub fn apply(&mut self, edit: DraftEdit) -> Result<(), DraftError> {
        let not_applicable = DraftError::NotApplicable {
            edit: edit.name(),
            kind: self.kind().as_str(),
        };

        match (&mut self.body, edit) {
            (_, DraftEdit::SetId { id }) => self.id = id,
            (_, DraftEdit::SetQuestion { text }) => self.question = text,

            (body, DraftEdit::AppendEntry) => {
                body.list_append().ok_or(not_applicable)?;
            }
            (body, DraftEdit::RemoveEntry { position }) => {
                body.list_remove(position)?.ok_or(not_applicable)?;
            }
            (body, DraftEdit::ReorderEntry { from, to }) => {
                body.list_reorder(from, to)?.ok_or(not_applicable)?;
            }

            (ExamBody::Choice(d), DraftEdit::SetText { position, text }) => {
                d.set_text(position, text)?
            }
            (ExamBody::Scenario(d), DraftEdit::SetText { position, text }) => {
                d.update(position, text)?
            }
            (ExamBody::Ordering(d), DraftEdit::SetText { position, text }) => {
                d.update(position, text)?
            }
            (ExamBody::Choice(d), DraftEdit::SetCorrect { position, is_correct }) => {
                d.set_correct(position, is_correct)?
            }
            (ExamBody::Matching(d), DraftEdit::SetPair { position, left, right }) => {
                d.set_pair(position, left, right)?
            }
            (ExamBody::TrueFalse(d), DraftEdit::SetTrueFalse { answer }) => d.answer = Some(answer),
            (ExamBody::Scenario(d), DraftEdit::SetCorrectOption { index }) => {
                d.correct_answer = index
            }
            (ExamBody::Calculation(d), DraftEdit::SetExpression { expression }) => {
                d.expression = expression
            }
            (ExamBody::Calculation(d), DraftEdit::SetCalculationAnswer { value }) => {
                d.correct_answer = Some(value)
            }

            _ => return Err(not_applicable),
        }
        Ok(())
    }

    pub fn commit(&self) -> Result<ExamQuestion, DraftError> {
        require(&self.id, "id")?;
        require(&self.question, "question")?;
        let id = self.id.trim().to_string();
        let question = self.question.clone();

        let q = match &self.body {
            ExamBody::Choice(d) => {
                let body = ChoiceQuestion {
                    id,
                    question,
                    choices: d.commit_choices()?,
                };
                if d.multiple {
                    ExamQuestion::MultipleAnswerChoice(body)
                } else {
                    ExamQuestion::MultipleChoice(body)
                }
            }
            // An untouched true/false answer commits as `true`.
            ExamBody::TrueFalse(d) => ExamQuestion::TrueFalse(TrueFalseQuestion {
                id,
                question,
                answer: d.answer.unwrap_or(true),
            }),
            ExamBody::Scenario(d) => {
                for (i, o) in d.options.values().enumerate() {
                    require(o, format!("options[{i}]"))?;
                }
                ExamQuestion::Scenario(ScenarioQuestion {
                    id,
                    question,
                    options: d.options.to_vec(),
                    correct_answer: d.correct_answer,
                })
            }
            ExamBody::Calculation(d) => {
                require(&d.expression, "expression")?;
                let correct_answer = d
                    .correct_answer
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DraftError::MissingField {
                        field: "correct_answer".into(),
                    })?;
                ExamQuestion::Calculation(CalculationQuestion {
                    id,
                    question,
                    expression: d.expression.clone(),
                    correct_answer,
                })
            }
            ExamBody::Matching(d) => {
                for (i, p) in d.pairs.values().enumerate() {
                    require(&p.left, format!("pairs[{i}].left"))?;
                    require(&p.right, format!("pairs[{i}].right"))?;
                }
                ExamQuestion::Matching(MatchingQuestion {
                    id,
                    question,
                    pairs: d.pairs.to_vec(),
                })
            }
            ExamBody::Ordering(d) => {
                for (i, step) in d.session.working_items().iter().enumerate() {
                    require(step, format!("items[{i}]"))?;
                }
                ExamQuestion::Ordering(d.session.commit()?.into_question(id, question))
            }
        };
        Ok(q)
    }
}

// ---------------------------------------------------------------------------
// QuestionDraft
// ---------------------------------------------------------------------------

/// Draft of a discussion question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl QuestionDraft {
    pub fn edit(q: &DiscussionQuestion) -> Self {
        Self {
            id: q.id.clone(),
            question: q.question.clone(),
            answer: q.answer.clone(),
        }
    }

    pub fn apply(&mut self, edit: DraftEdit) -> Result<(), DraftError> {
        match edit {
            DraftEdit::SetId { id } => self.id = id,
            DraftEdit::SetQuestion { text } => self.question = text,
            DraftEdit::SetAnswer { text } => self.answer = text,
            other => {
                return Err(DraftError::NotApplicable {
                    edit: other.name(),
                    kind: "discussion",
                })
            }
        }
        Ok(())
    }

    pub fn commit(&self) -> Result<DiscussionQuestion, DraftError> {
        require(&self.id, "id")?;
        require(&self.question, "question")?;
        require(&self.answer, "answer")?;
        Ok(DiscussionQuestion {
            id: self.id.trim().to_string(),
            question: self.question.clone(),
            answer: self.answer.clone(),
        })
    }
}
