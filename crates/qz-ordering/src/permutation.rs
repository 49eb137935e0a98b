//! Mapping between storage order and correct (display) order.
//!
//! `correct_order[k]` is the storage index of the step at rank `k + 1`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    Empty,
    LengthMismatch { items: usize, order: usize },
    OutOfRange { rank: usize, index: usize, len: usize },
    DuplicateIndex { index: usize, first_rank: usize, rank: usize },
    UnmatchedStep { rank: usize, text: String },
}

impl std::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermutationError::Empty => write!(f, "ordering has no steps"),
            PermutationError::LengthMismatch { items, order } => write!(
                f,
                "correct_order has {order} entries but there are {items} items"
            ),
            PermutationError::OutOfRange { rank, index, len } => write!(
                f,
                "rank {rank} points at item {index}, outside 0..{len}"
            ),
            PermutationError::DuplicateIndex {
                index,
                first_rank,
                rank,
            } => write!(
                f,
                "item {index} appears at rank {first_rank} and again at rank {rank}"
            ),
            PermutationError::UnmatchedStep { rank, text } => {
                write!(f, "step {text:?} at rank {rank} matches no stored item")
            }
        }
    }
}

impl std::error::Error for PermutationError {}

/// Map each working step to the first stored item with equal text.
///
/// Duplicate texts all resolve to the first match, so the result can repeat
/// an index. That is the documented behavior, not corrected here.
pub fn derive_correct_order<S: AsRef<str>>(
    items: &[String],
    working: &[S],
) -> Result<Vec<usize>, PermutationError> {
    working
        .iter()
        .enumerate()
        .map(|(k, step)| {
            let step = step.as_ref();
            items
                .iter()
                .position(|item| item == step)
                .ok_or_else(|| PermutationError::UnmatchedStep {
                    rank: k + 1,
                    text: step.to_string(),
                })
        })
        .collect()
}

/// Steps in correct order: `items[correct_order[k]]` for each rank.
pub fn display_order<'a>(
    items: &'a [String],
    correct_order: &[usize],
) -> Result<Vec<&'a str>, PermutationError> {
    correct_order
        .iter()
        .enumerate()
        .map(|(k, &idx)| {
            items
                .get(idx)
                .map(String::as_str)
                .ok_or(PermutationError::OutOfRange {
                    rank: k + 1,
                    index: idx,
                    len: items.len(),
                })
        })
        .collect()
}

/// 1-based rank of the item stored at `index`, if it appears in the order.
pub fn rank_of(correct_order: &[usize], index: usize) -> Option<usize> {
    correct_order.iter().position(|&i| i == index).map(|p| p + 1)
}

/// Stored items paired with their rank in the correct order.
pub fn ranked_items<'a>(
    items: &'a [String],
    correct_order: &[usize],
) -> Vec<(Option<usize>, &'a str)> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (rank_of(correct_order, i), item.as_str()))
        .collect()
}

/// Check that `correct_order` is a permutation of `0..len`.
pub fn validate_permutation(len: usize, correct_order: &[usize]) -> Result<(), PermutationError> {
    if len == 0 {
        return Err(PermutationError::Empty);
    }
    if correct_order.len() != len {
        return Err(PermutationError::LengthMismatch {
            items: len,
            order: correct_order.len(),
        });
    }
    let mut seen_at: Vec<Option<usize>> = vec![None; len];
    for (k, &idx) in correct_order.iter().enumerate() {
        let rank = k + 1;
        let slot = seen_at
            .get_mut(idx)
            .ok_or(PermutationError::OutOfRange { rank, index: idx, len })?;
        if let Some(first_rank) = *slot {
            return Err(PermutationError::DuplicateIndex {
                index: idx,
                first_rank,
                rank,
            });
        }
        *slot = Some(rank);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn display_order_follows_correct_order() {
        let items = s(&["Boil water", "Add rice", "Simmer"]);
        assert_eq!(
            display_order(&items, &[1, 0, 2]).unwrap(),
            vec!["Add rice", "Boil water", "Simmer"]
        );
    }

    #[test]
    fn rank_is_one_based_position_in_order() {
        let order = [2, 0, 1];
        assert_eq!(rank_of(&order, 2), Some(1));
        assert_eq!(rank_of(&order, 0), Some(2));
        assert_eq!(rank_of(&order, 7), None);
    }

    #[test]
    fn ranked_items_keep_storage_order() {
        let items = s(&["a", "b", "c"]);
        assert_eq!(
            ranked_items(&items, &[2, 0, 1]),
            vec![(Some(2), "a"), (Some(3), "b"), (Some(1), "c")]
        );
    }

    #[test]
    fn validate_detects_each_violation() {
        assert_eq!(validate_permutation(0, &[]), Err(PermutationError::Empty));
        assert!(matches!(
            validate_permutation(3, &[0, 1]),
            Err(PermutationError::LengthMismatch { items: 3, order: 2 })
        ));
        assert!(matches!(
            validate_permutation(2, &[0, 5]),
            Err(PermutationError::OutOfRange { rank: 2, index: 5, .. })
        ));
        assert_eq!(
            validate_permutation(3, &[0, 0, 2]),
            Err(PermutationError::DuplicateIndex {
                index: 0,
                first_rank: 1,
                rank: 2
            })
        );
        assert!(validate_permutation(3, &[2, 0, 1]).is_ok());
    }

    #[test]
    fn derive_reports_unmatched_step() {
        let items = s(&["a"]);
        let err = derive_correct_order(&items, &["a", "zz"]).unwrap_err();
        assert_eq!(
            err,
            PermutationError::UnmatchedStep {
                rank: 2,
                text: "zz".into()
            }
        );
    }
}
