//! qz-schemas
//!
//! Wire types of the quiz document. The JSON shape is the export/import
//! format; field names and the `type` tags are stable and must not be renamed.
//!
//! Note: `multiple_answer_choise` is the historic spelling of the tag and is
//! kept on the wire so previously exported files keep loading.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The full quiz document: lesson metadata, discussion questions and exam.
///
/// Document-level fields default when absent so a partial file still imports;
/// question-level fields are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub questions: Vec<DiscussionQuestion>,
    #[serde(default)]
    pub exam: Vec<ExamQuestion>,
}

impl QuizDocument {
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            questions: Vec::new(),
            exam: Vec::new(),
        }
    }

    pub fn question(&self, id: &str) -> Option<&DiscussionQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn exam_question(&self, id: &str) -> Option<&ExamQuestion> {
        self.exam.iter().find(|e| e.id() == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionQuestion {
    pub id: String,
    pub question: String,
    pub answer: String,
}

// ---------------------------------------------------------------------------
// Exam questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamChoice {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPair {
    pub left: String,
    pub right: String,
}

/// Body shared by `multiple_choice` and `multiple_answer_choise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub id: String,
    pub question: String,
    pub choices: Vec<ExamChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseQuestion {
    pub id: String,
    pub question: String,
    pub answer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// 0-based index into `options`. Not bounds-checked on commit.
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationQuestion {
    pub id: String,
    pub question: String,
    pub expression: String,
    pub correct_answer: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingQuestion {
    pub id: String,
    pub question: String,
    pub pairs: Vec<ExamPair>,
}

/// An ordering question.
///
/// `items` is the canonical storage order. `correct_order[k]` is the index
/// into `items` of the step shown at rank `k + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingQuestion {
    pub id: String,
    pub question: String,
    pub items: Vec<String>,
    pub correct_order: Vec<usize>,
}

/// Polymorphic exam question, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExamQuestion {
    #[serde(rename = "multiple_choice")]
    MultipleChoice(ChoiceQuestion),

    #[serde(rename = "multiple_answer_choise")]
    MultipleAnswerChoice(ChoiceQuestion),

    #[serde(rename = "true_false")]
    TrueFalse(TrueFalseQuestion),

    #[serde(rename = "scenario_question")]
    Scenario(ScenarioQuestion),

    #[serde(rename = "calculation")]
    Calculation(CalculationQuestion),

    #[serde(rename = "matching")]
    Matching(MatchingQuestion),

    #[serde(rename = "ordering")]
    Ordering(OrderingQuestion),
}

impl ExamQuestion {
    pub fn kind(&self) -> ExamKind {
        match self {
            ExamQuestion::MultipleChoice(_) => ExamKind::MultipleChoice,
            ExamQuestion::MultipleAnswerChoice(_) => ExamKind::MultipleAnswerChoice,
            ExamQuestion::TrueFalse(_) => ExamKind::TrueFalse,
            ExamQuestion::Scenario(_) => ExamKind::Scenario,
            ExamQuestion::Calculation(_) => ExamKind::Calculation,
            ExamQuestion::Matching(_) => ExamKind::Matching,
            ExamQuestion::Ordering(_) => ExamKind::Ordering,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ExamQuestion::MultipleChoice(q) | ExamQuestion::MultipleAnswerChoice(q) => &q.id,
            ExamQuestion::TrueFalse(q) => &q.id,
            ExamQuestion::Scenario(q) => &q.id,
            ExamQuestion::Calculation(q) => &q.id,
            ExamQuestion::Matching(q) => &q.id,
            ExamQuestion::Ordering(q) => &q.id,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            ExamQuestion::MultipleChoice(q) | ExamQuestion::MultipleAnswerChoice(q) => &q.question,
            ExamQuestion::TrueFalse(q) => &q.question,
            ExamQuestion::Scenario(q) => &q.question,
            ExamQuestion::Calculation(q) => &q.question,
            ExamQuestion::Matching(q) => &q.question,
            ExamQuestion::Ordering(q) => &q.question,
        }
    }
}

// ---------------------------------------------------------------------------
// ExamKind
// ---------------------------------------------------------------------------

/// The type tag of an exam question, without its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamKind {
    #[serde(rename = "multiple_choice")]
    MultipleChoice,
    #[serde(rename = "multiple_answer_choise")]
    MultipleAnswerChoice,
    #[serde(rename = "true_false")]
    TrueFalse,
    #[serde(rename = "scenario_question")]
    Scenario,
    #[serde(rename = "calculation")]
    Calculation,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "ordering")]
    Ordering,
}

impl ExamKind {
    pub const ALL: [ExamKind; 7] = [
        ExamKind::MultipleChoice,
        ExamKind::MultipleAnswerChoice,
        ExamKind::TrueFalse,
        ExamKind::Scenario,
        ExamKind::Calculation,
        ExamKind::Matching,
        ExamKind::Ordering,
    ];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamKind::MultipleChoice => "multiple_choice",
            ExamKind::MultipleAnswerChoice => "multiple_answer_choise",
            ExamKind::TrueFalse => "true_false",
            ExamKind::Scenario => "scenario_question",
            ExamKind::Calculation => "calculation",
            ExamKind::Matching => "matching",
            ExamKind::Ordering => "ordering",
        }
    }

    /// Human label used by review rendering.
    pub fn label(&self) -> &'static str {
        match self {
            ExamKind::MultipleChoice => "Multiple choice (single answer)",
            ExamKind::MultipleAnswerChoice => "Multiple choice (multiple answers)",
            ExamKind::TrueFalse => "True/False",
            ExamKind::Scenario => "Scenario question",
            ExamKind::Calculation => "Calculation",
            ExamKind::Matching => "Matching",
            ExamKind::Ordering => "Ordering",
        }
    }
}

impl std::fmt::Display for ExamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "lessons/PTKT/CH07-LS02.pdf",
        "summary": "Cooking basics",
        "questions": [{ "id": "q1", "question": "Why rinse rice?", "answer": "Starch" }],
        "exam": [
            { "id": "e1", "type": "multiple_answer_choise", "question": "Grains?",
              "choices": [{ "text": "Rice", "is_correct": true }, { "text": "Salt", "is_correct": false }] },
            { "id": "e2", "type": "true_false", "question": "Water boils at 100C", "answer": true },
            { "id": "e3", "type": "scenario_question", "question": "Pick", "options": ["a", "b"], "correct_answer": 1 },
            { "id": "e4", "type": "calculation", "question": "Cost", "expression": "30 * 1.05 = 31.5", "correct_answer": 31.5 },
            { "id": "e5", "type": "matching", "question": "Match", "pairs": [{ "left": "L", "right": "R" }] },
            { "id": "e6", "type": "ordering", "question": "Cook rice",
              "items": ["Boil water", "Add rice", "Simmer"], "correct_order": [1, 0, 2] }
        ]
    }"#;

    #[test]
    fn sample_document_parses_every_variant() {
        let doc: QuizDocument = serde_json::from_str(SAMPLE).unwrap();
        let kinds: Vec<ExamKind> = doc.exam.iter().map(ExamQuestion::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ExamKind::MultipleAnswerChoice,
                ExamKind::TrueFalse,
                ExamKind::Scenario,
                ExamKind::Calculation,
                ExamKind::Matching,
                ExamKind::Ordering,
            ]
        );
        assert_eq!(doc.exam_question("e6").map(|e| e.question()), Some("Cook rice"));
    }

    #[test]
    fn serialized_exam_question_carries_type_tag() {
        let q = ExamQuestion::TrueFalse(TrueFalseQuestion {
            id: "e1".into(),
            question: "Q".into(),
            answer: false,
        });
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["type"], "true_false");
        assert_eq!(v["answer"], false);
    }

    #[test]
    fn document_fields_default_when_absent() {
        let doc: QuizDocument = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(doc.id, "x");
        assert!(doc.summary.is_empty());
        assert!(doc.questions.is_empty());
        assert!(doc.exam.is_empty());
    }

    #[test]
    fn unknown_exam_tag_is_rejected() {
        let raw = r#"{"exam": [{"id": "e1", "type": "essay", "question": "Q"}]}"#;
        assert!(serde_json::from_str::<QuizDocument>(raw).is_err());
    }

    #[test]
    fn kind_as_str_matches_serde_tag() {
        for k in ExamKind::ALL {
            assert_eq!(serde_json::to_value(k).unwrap(), serde_json::json!(k.as_str()));
        }
    }
}
