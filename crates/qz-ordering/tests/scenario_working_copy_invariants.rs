use qz_ordering::{OrderingSession, Removal};

fn sorted(v: Vec<&str>) -> Vec<String> {
    let mut out: Vec<String> = v.into_iter().map(str::to_string).collect();
    out.sort();
    out
}

#[test]
fn scenario_remove_never_drops_below_one_step() {
    let mut sess = OrderingSession::new();
    sess.append();
    sess.update(1, "x").unwrap();

    assert!(matches!(sess.remove(0).unwrap(), Removal::Removed(_)));
    assert_eq!(sess.working_items(), vec!["x"]);

    assert_eq!(sess.remove(0).unwrap(), Removal::KeptLastEntry);
    assert_eq!(sess.working_items(), vec!["x"]);
}

#[test]
fn scenario_reorder_preserves_the_multiset_of_steps() {
    let items: Vec<String> = ["p", "q", "q", "r", "s"].iter().map(|x| x.to_string()).collect();
    let mut sess = OrderingSession::edit(&items, &[0, 1, 2, 3, 4]).unwrap();
    let before = sorted(sess.working_items());

    for (from, to) in [(0, 4), (3, 1), (2, 2), (4, 0), (1, 3)] {
        sess.reorder(from, to).unwrap();
        assert_eq!(sorted(sess.working_items()), before);
        assert_eq!(sess.working().len(), 5);
    }
}

#[test]
fn scenario_rejected_operations_leave_working_copy_untouched() {
    let items: Vec<String> = ["a", "b"].iter().map(|x| x.to_string()).collect();
    let mut sess = OrderingSession::edit(&items, &[1, 0]).unwrap();
    let before = sess.clone();

    assert!(sess.reorder(0, 2).is_err());
    assert!(sess.update(2, "z").is_err());
    assert!(sess.remove(5).is_err());
    assert_eq!(sess, before);
}
