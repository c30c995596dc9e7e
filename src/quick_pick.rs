use crate::card::{column_range, Card, CardId};
use crate::geometry::{index_of, GRID_SIZE};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A complete random card, reproducible from `seed`.
///
/// ```
/// use bingo_tracker::quick_pick::quick_pick_seeded;
///
/// let a = quick_pick_seeded("a", "Lucky", 42);
/// let b = quick_pick_seeded("b", "Lucky", 42);
/// assert!(a.is_complete());
/// assert_eq!(a.numbers(), b.numbers());
/// ```
pub fn quick_pick_seeded(id: impl Into<CardId>, name: impl Into<String>, seed: u64) -> Card {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut card = Card::empty(id, name);
    fill_with(&mut card, &mut rng);
    card
}

/// Fill every unset cell with a random number that keeps the card valid.
/// Numbers already on the card are left alone.
pub fn fill_with<R: Rng + ?Sized>(card: &mut Card, rng: &mut R) {
    for col in 0..GRID_SIZE {
        let Some((lo, hi)) = column_range(col) else {
            continue;
        };
        let used: Vec<u8> = card.column_numbers(col).collect();
        let mut pool: Vec<u8> = (lo..=hi).filter(|n| !used.contains(n)).collect();
        pool.shuffle(rng);
        let mut pool = pool.into_iter();
        for row in 0..GRID_SIZE {
            let index = index_of(row, col);
            let open = card.cell(index).is_some_and(|c| !c.is_free() && c.number().is_none());
            if !open {
                continue;
            }
            // pool holds 15 minus at most 4 used numbers, enough for the open cells
            if let Some(n) = pool.next() {
                if let Err(err) = card.set_number(index, Some(n)) {
                    log::warn!("quick pick skipped cell {index}: {err}");
                }
            }
        }
    }
}
