//! Ordering questions authored and re-edited through the editor.
//!
//! GREEN when:
//! - a new ordering question built from the placeholder commits a valid
//!   permutation;
//! - the cooking example dragged by entry id commits items unchanged and
//!   correct_order [1, 0, 2];
//! - re-opening and committing without change reproduces the stored order.

use qz_editor::{DraftEdit, Editor, EditorCommand, EditorSettings, ExamBody, Tab};
use qz_ordering::{validate_permutation, EntryId};
use qz_schemas::{ExamKind, ExamQuestion, OrderingQuestion, QuizDocument};

fn edit(e: DraftEdit) -> EditorCommand {
    EditorCommand::Edit { edit: e }
}

fn step_ids(ed: &Editor) -> Vec<EntryId> {
    match ed.exam_draft().map(|d| &d.body) {
        Some(ExamBody::Ordering(o)) => o.session().working().ids().to_vec(),
        other => panic!("no ordering draft: {other:?}"),
    }
}

fn working(ed: &Editor) -> Vec<String> {
    match ed.exam_draft().map(|d| &d.body) {
        Some(ExamBody::Ordering(o)) => o.session().working().to_vec(),
        other => panic!("no ordering draft: {other:?}"),
    }
}

fn stored(ed: &Editor, id: &str) -> OrderingQuestion {
    match ed.document().exam_question(id) {
        Some(ExamQuestion::Ordering(o)) => o.clone(),
        other => panic!("no ordering question {id}: {other:?}"),
    }
}

fn cooking() -> Editor {
    let mut doc = QuizDocument::new("lesson", "");
    doc.exam.push(ExamQuestion::Ordering(OrderingQuestion {
        id: "e1".into(),
        question: "Cook rice".into(),
        items: vec!["Boil water".into(), "Add rice".into(), "Simmer".into()],
        correct_order: vec![0, 1, 2],
    }));
    let mut ed = Editor::new(doc, EditorSettings::default());
    ed.apply(EditorCommand::SelectTab { tab: Tab::Exam }).unwrap();
    ed
}

#[test]
fn new_question_replaces_placeholder() {
    let mut ed = Editor::new(QuizDocument::default(), EditorSettings::default());
    for c in [
        EditorCommand::SelectTab { tab: Tab::Exam },
        EditorCommand::BeginCreate {
            kind: Some(ExamKind::Ordering),
        },
        edit(DraftEdit::SetQuestion { text: "Wash up".into() }),
        edit(DraftEdit::SetText {
            position: 0,
            text: "Rinse".into(),
        }),
        edit(DraftEdit::AppendEntry),
        edit(DraftEdit::SetText {
            position: 1,
            text: "Soap".into(),
        }),
        edit(DraftEdit::AppendEntry),
        edit(DraftEdit::SetText {
            position: 2,
            text: "Dry".into(),
        }),
        edit(DraftEdit::ReorderEntry { from: 1, to: 0 }),
        EditorCommand::Commit,
    ] {
        ed.apply(c).unwrap();
    }

    let q = stored(&ed, "e1");
    assert!(!q.items.iter().any(String::is_empty), "placeholder must not persist");
    validate_permutation(q.items.len(), &q.correct_order).unwrap();
    let shown: Vec<&str> = q.correct_order.iter().map(|&i| q.items[i].as_str()).collect();
    assert_eq!(shown, vec!["Soap", "Rinse", "Dry"]);
}

#[test]
fn drag_by_entry_id_commits_expected_order() {
    let mut ed = cooking();
    ed.apply(EditorCommand::BeginEdit { id: "e1".into() }).unwrap();

    let ids = step_ids(&ed);
    ed.apply(EditorCommand::MoveStep {
        active: ids[1],
        over: ids[0],
    })
    .unwrap();
    assert_eq!(working(&ed), vec!["Add rice", "Boil water", "Simmer"]);

    ed.apply(EditorCommand::Commit).unwrap();
    let q = stored(&ed, "e1");
    assert_eq!(q.items, vec!["Boil water", "Add rice", "Simmer"]);
    assert_eq!(q.correct_order, vec![1, 0, 2]);
}

#[test]
fn reopen_without_change_keeps_stored_order() {
    let mut ed = cooking();
    ed.apply(EditorCommand::BeginEdit { id: "e1".into() }).unwrap();
    ed.apply(edit(DraftEdit::ReorderEntry { from: 2, to: 0 }))
        .unwrap();
    ed.apply(EditorCommand::Commit).unwrap();
    let first = stored(&ed, "e1");

    ed.apply(EditorCommand::BeginEdit { id: "e1".into() }).unwrap();
    assert_eq!(working(&ed), vec!["Simmer", "Boil water", "Add rice"]);
    ed.apply(EditorCommand::Commit).unwrap();
    assert_eq!(stored(&ed, "e1"), first);
}

#[test]
fn last_step_cannot_be_removed() {
    let mut ed = Editor::new(QuizDocument::default(), EditorSettings::default());
    ed.apply(EditorCommand::SelectTab { tab: Tab::Exam }).unwrap();
    ed.apply(EditorCommand::BeginCreate {
        kind: Some(ExamKind::Ordering),
    })
    .unwrap();
    ed.apply(edit(DraftEdit::RemoveEntry { position: 0 }))
        .unwrap();
    assert_eq!(working(&ed).len(), 1);
}

#[test]
fn move_step_rejected_on_other_kinds() {
    let mut ed = cooking();
    ed.apply(EditorCommand::BeginCreate {
        kind: Some(ExamKind::Matching),
    })
    .unwrap();
    let before = ed.exam_draft().cloned();
    let stale = step_ids_of_cooking();
    assert!(ed
        .apply(EditorCommand::MoveStep {
            active: stale[0],
            over: stale[1],
        })
        .is_err());
    assert_eq!(ed.exam_draft().cloned(), before);
}

fn step_ids_of_cooking() -> Vec<EntryId> {
    let mut ed = cooking();
    ed.apply(EditorCommand::BeginEdit { id: "e1".into() }).unwrap();
    step_ids(&ed)
}
