use qz_ordering::{display_order, validate_permutation, OrderingSession};

fn s(v: &[&str]) -> Vec<String> {
    v.iter().map(|x| x.to_string()).collect()
}

/// Dragging "Add rice" above "Boil water" commits storage order unchanged and
/// the correct order as storage indices.
#[test]
fn scenario_rice_steps_commit_expected_order() {
    let stored = s(&["Boil water", "Add rice", "Simmer"]);
    let mut sess = OrderingSession::edit(&stored, &[0, 1, 2]).unwrap();

    sess.reorder(1, 0).unwrap();
    assert_eq!(sess.working_items(), vec!["Add rice", "Boil water", "Simmer"]);

    let c = sess.commit().unwrap();
    assert_eq!(c.items, stored);
    assert_eq!(c.correct_order, vec![1, 0, 2]);
}

/// Same scenario driven by the drag layer, which reports stable entry ids.
#[test]
fn scenario_drag_by_ids_matches_reorder_by_positions() {
    let stored = s(&["Boil water", "Add rice", "Simmer"]);
    let mut by_pos = OrderingSession::edit(&stored, &[0, 1, 2]).unwrap();
    let mut by_id = by_pos.clone();

    by_pos.reorder(2, 0).unwrap();

    let active = by_id.working().id_at(2).unwrap();
    let over = by_id.working().id_at(0).unwrap();
    by_id.move_entry(active, over).unwrap();

    assert_eq!(by_pos.working_items(), by_id.working_items());
    assert_eq!(by_pos.commit().unwrap(), by_id.commit().unwrap());
}

/// For distinct steps, every working permutation commits to an order that
/// reproduces that permutation through the stored items.
#[test]
fn scenario_every_permutation_of_distinct_steps_is_reproduced() {
    let stored = s(&["a", "b", "c", "d"]);
    let mut seen = 0;

    for perm in permutations(&[0, 1, 2, 3]) {
        let mut sess = OrderingSession::edit(&stored, &[0, 1, 2, 3]).unwrap();
        // Selection-sort the working copy into `perm` using reorder only.
        for (target, &want) in perm.iter().enumerate() {
            let from = sess
                .working_items()
                .iter()
                .position(|x| *x == stored[want])
                .unwrap();
            sess.reorder(from, target).unwrap();
        }
        let expected: Vec<&str> = perm.iter().map(|&i| stored[i].as_str()).collect();
        assert_eq!(sess.working_items(), expected);

        let c = sess.commit().unwrap();
        assert_eq!(c.items, stored);
        validate_permutation(c.items.len(), &c.correct_order).unwrap();
        assert_eq!(display_order(&c.items, &c.correct_order).unwrap(), expected);
        seen += 1;
    }

    assert_eq!(seen, 24);
}

fn permutations(xs: &[usize]) -> Vec<Vec<usize>> {
    if xs.len() <= 1 {
        return vec![xs.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..xs.len() {
        let mut rest = xs.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}
