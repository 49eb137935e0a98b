//! qz-ordering
//!
//! Ordering-question permutation engine.
//!
//! - `EntryList`: reorderable list whose entries keep a stable `EntryId`
//!   across reorder and removal (arena + index).
//! - `OrderingSession`: the author's working copy of steps, kept in intended
//!   order, mapped back onto the frozen storage order on commit.
//! - `permutation`: read-side helpers (display order, rank) and checks.
//!
//! Pure deterministic logic. No IO.

mod entries;
mod permutation;
mod session;

pub use entries::{EntryError, EntryId, EntryList, Removal};
pub use permutation::{
    derive_correct_order, display_order, rank_of, ranked_items, validate_permutation,
    PermutationError,
};
pub use session::{CommittedOrder, OrderingSession};
