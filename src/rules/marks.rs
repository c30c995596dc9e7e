use crate::card::Card;
use crate::geometry::{CELL_COUNT, FREE_INDEX};
use std::collections::HashSet;

/// Which cells of a card are currently hit, aligned with `Card::cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marks([bool; CELL_COUNT]);

impl Marks {
    /// Only the free centre marked.
    pub fn free_only() -> Self {
        let mut marks = [false; CELL_COUNT];
        marks[FREE_INDEX] = true;
        Self(marks)
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }

    pub fn as_array(&self) -> &[bool; CELL_COUNT] {
        &self.0
    }

    /// Every cell marked in `other` is also marked here.
    pub fn is_superset_of(&self, other: &Marks) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(&a, &b)| a || !b)
    }
}

/// The free centre is marked whatever the array says.
impl From<[bool; CELL_COUNT]> for Marks {
    fn from(mut marks: [bool; CELL_COUNT]) -> Self {
        marks[FREE_INDEX] = true;
        Self(marks)
    }
}

/// Derive marks from a card and the numbers called so far.
///
/// Order and duplicates in `called` do not matter. A cell is marked when it is
/// free or its assigned number was called; an unassigned cell never is.
///
/// ```
/// use bingo_tracker::card::Card;
/// use bingo_tracker::rules::compute_marks;
///
/// let mut card = Card::empty("c", "C");
/// card.set_number(0, Some(9)).unwrap();
/// let marks = compute_marks(&card, [9, 9, 70]);
/// assert!(marks.is_marked(0));
/// assert!(marks.is_marked(12));
/// assert_eq!(marks.count(), 2);
/// ```
pub fn compute_marks(card: &Card, called: impl IntoIterator<Item = u8>) -> Marks {
    let called: HashSet<u8> = called.into_iter().collect();
    compute_marks_with(card, &called)
}

/// Same as [`compute_marks`] for callers that already hold a set.
pub fn compute_marks_with(card: &Card, called: &HashSet<u8>) -> Marks {
    Marks(card.cells().map(|cell| {
        cell.is_free() || cell.number().is_some_and(|n| called.contains(&n))
    }))
}
