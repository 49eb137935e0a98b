//! Review rendering: the document as plain text, one fact per line.

use qz_ordering::{display_order, ranked_items};
use qz_schemas::{ExamQuestion, QuizDocument};

pub fn render_document(doc: &QuizDocument) -> Vec<String> {
    let mut out = vec![format!("Lesson: {}", doc.id)];
    if !doc.summary.is_empty() {
        out.push(format!("Summary: {}", doc.summary));
    }

    out.push(String::new());
    out.push(format!("Discussion questions ({})", doc.questions.len()));
    for q in &doc.questions {
        out.push(format!("  [{}] {}", q.id, q.question));
        out.push(format!("      Answer: {}", q.answer));
    }

    out.push(String::new());
    out.push(format!("Exam ({})", doc.exam.len()));
    for q in &doc.exam {
        out.extend(render_exam_question(q));
    }
    out
}

pub fn render_exam_question(q: &ExamQuestion) -> Vec<String> {
    let mut out = vec![
        format!("  [{}] {}", q.id(), q.kind().label()),
        format!("      {}", q.question()),
    ];
    match q {
        ExamQuestion::MultipleChoice(c) | ExamQuestion::MultipleAnswerChoice(c) => {
            for (i, choice) in c.choices.iter().enumerate() {
                let mark = if choice.is_correct { "x" } else { " " };
                out.push(format!("      [{mark}] {}. {}", i + 1, choice.text));
            }
        }
        ExamQuestion::TrueFalse(t) => {
            out.push(format!("      Answer: {}", if t.answer { "True" } else { "False" }));
        }
        ExamQuestion::Scenario(s) => {
            for (i, option) in s.options.iter().enumerate() {
                let mark = if i == s.correct_answer { " ✓" } else { "" };
                out.push(format!("      {}. {option}{mark}", i + 1));
            }
            if s.correct_answer < s.options.len() {
                out.push(format!("      Answer: {}", s.correct_answer + 1));
            } else {
                out.push(format!(
                    "      Answer: <invalid: index {} out of range for {} options>",
                    s.correct_answer,
                    s.options.len()
                ));
            }
        }
        ExamQuestion::Calculation(c) => {
            out.push(format!("      Expression: {}", c.expression));
            out.push(format!("      Answer: {}", c.correct_answer));
        }
        ExamQuestion::Matching(m) => {
            for p in &m.pairs {
                out.push(format!("      {} ↔ {}", p.left, p.right));
            }
        }
        ExamQuestion::Ordering(o) => {
            match display_order(&o.items, &o.correct_order) {
                Ok(steps) => out.push(format!("      Correct order: {}", steps.join(" → "))),
                Err(e) => out.push(format!("      Correct order: <invalid: {e}>")),
            }
            for (rank, item) in ranked_items(&o.items, &o.correct_order) {
                let rank = rank.map_or_else(|| "?".to_string(), |r| r.to_string());
                out.push(format!("      ({rank}) {item}"));
            }
        }
    }
    out
}
