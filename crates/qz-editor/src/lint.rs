//! Structural checks over a stored document.
//!
//! Commit only checks required fields, so a document can hold questions that
//! break cross-field rules (a repeated ordering index from duplicate step
//! text, a scenario answer past its options). `lint_document` reports them.

use std::collections::HashMap;

use qz_ordering::validate_permutation;
use qz_schemas::{ExamQuestion, QuizDocument};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// e.g. `exam/e3` or `questions/q1`.
    pub location: String,
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sev = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{sev} {} {}: {}", self.code, self.location, self.message)
    }
}

fn finding(severity: Severity, location: String, code: &'static str, message: String) -> Finding {
    Finding {
        severity,
        location,
        code,
        message,
    }
}

pub fn lint_document(doc: &QuizDocument) -> Vec<Finding> {
    let mut out = Vec::new();

    duplicate_ids(
        doc.questions.iter().map(|q| q.id.as_str()),
        "questions",
        &mut out,
    );
    duplicate_ids(doc.exam.iter().map(ExamQuestion::id), "exam", &mut out);

    for q in &doc.questions {
        if q.id.trim().is_empty() {
            out.push(finding(
                Severity::Error,
                "questions/?".into(),
                "EMPTY_ID",
                "discussion question has no id".into(),
            ));
        }
    }
    for q in &doc.exam {
        lint_exam_question(q, &mut out);
    }
    out
}

fn duplicate_ids<'a>(ids: impl Iterator<Item = &'a str>, list: &str, out: &mut Vec<Finding>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for id in ids {
        let c = counts.entry(id).or_insert(0);
        if *c == 0 {
            order.push(id);
        }
        *c += 1;
    }
    for id in order {
        let n = counts.get(id).copied().unwrap_or(0);
        if n > 1 {
            out.push(finding(
                Severity::Error,
                format!("{list}/{id}"),
                "DUPLICATE_ID",
                format!("id used by {n} questions"),
            ));
        }
    }
}

fn lint_exam_question(q: &ExamQuestion, out: &mut Vec<Finding>) {
    let at = format!("exam/{}", q.id());
    if q.id().trim().is_empty() {
        out.push(finding(Severity::Error, at.clone(), "EMPTY_ID", "exam question has no id".into()));
    }
    match q {
        ExamQuestion::MultipleChoice(c) | ExamQuestion::MultipleAnswerChoice(c) => {
            let correct = c.choices.iter().filter(|x| x.is_correct).count();
            if c.choices.is_empty() {
                out.push(finding(Severity::Error, at, "EMPTY_LIST", "no choices".into()));
            } else if correct == 0 {
                out.push(finding(
                    Severity::Warning,
                    at,
                    "NO_CORRECT_CHOICE",
                    "no choice is marked correct".into(),
                ));
            } else if correct > 1 && matches!(q, ExamQuestion::MultipleChoice(_)) {
                out.push(finding(
                    Severity::Warning,
                    at,
                    "MULTIPLE_CORRECT",
                    format!("single-answer question has {correct} correct choices"),
                ));
            }
        }
        ExamQuestion::TrueFalse(_) => {}
        ExamQuestion::Scenario(s) => {
            if s.options.is_empty() {
                out.push(finding(Severity::Error, at, "EMPTY_LIST", "no options".into()));
            } else if s.correct_answer >= s.options.len() {
                out.push(finding(
                    Severity::Error,
                    at,
                    "ANSWER_OUT_OF_RANGE",
                    format!(
                        "correct_answer {} is outside the {} option(s)",
                        s.correct_answer,
                        s.options.len()
                    ),
                ));
            }
        }
        ExamQuestion::Calculation(c) => {
            if !c.correct_answer.is_finite() {
                out.push(finding(
                    Severity::Error,
                    at,
                    "NON_FINITE_ANSWER",
                    "correct_answer is not a finite number".into(),
                ));
            }
        }
        ExamQuestion::Matching(m) => {
            if m.pairs.is_empty() {
                out.push(finding(Severity::Error, at, "EMPTY_LIST", "no pairs".into()));
            }
        }
        ExamQuestion::Ordering(o) => {
            if let Err(e) = validate_permutation(o.items.len(), &o.correct_order) {
                out.push(finding(Severity::Error, at.clone(), "BAD_PERMUTATION", e.to_string()));
            }
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for (i, item) in o.items.iter().enumerate() {
                if let Some(first) = seen.insert(item.as_str(), i) {
                    out.push(finding(
                        Severity::Warning,
                        at.clone(),
                        "DUPLICATE_STEP",
                        format!("steps {first} and {i} share the text {item:?}"),
                    ));
                }
            }
        }
    }
}
