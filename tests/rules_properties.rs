use bingo_tracker::card::Card;
use bingo_tracker::geometry::{LineId, FREE_INDEX};
use bingo_tracker::quick_pick::quick_pick_seeded;
use bingo_tracker::rules::{
    completed_line_count, completed_lines, compute_marks, detect_wins, is_blackout, RuleMode,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn any_card() -> impl Strategy<Value = Card> {
    any::<u64>().prop_map(|seed| quick_pick_seeded("p", "Prop", seed))
}

/// A quick-pick card with some cells cleared again.
fn any_partial_card() -> impl Strategy<Value = Card> {
    (any::<u64>(), prop::array::uniform25(any::<bool>())).prop_map(|(seed, clear)| {
        let mut card = quick_pick_seeded("p", "Prop", seed);
        for (i, &c) in clear.iter().enumerate() {
            if c && i != FREE_INDEX {
                card.set_number(i, None).expect("clearing is always allowed");
            }
        }
        card
    })
}

fn any_calls() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=80u8, 0..60)
}

proptest! {
    #[test]
    fn centre_is_always_marked(card in any_partial_card(), called in any_calls()) {
        let marks = compute_marks(&card, called);
        prop_assert!(marks.is_marked(FREE_INDEX));
    }

    #[test]
    fn marked_iff_number_called(card in any_partial_card(), called in any_calls()) {
        let set: HashSet<u8> = called.iter().copied().collect();
        let marks = compute_marks(&card, called);
        for cell in card.cells().iter().filter(|c| !c.is_free()) {
            let expected = cell.number().is_some_and(|n| set.contains(&n));
            prop_assert_eq!(marks.is_marked(cell.index()), expected);
        }
    }

    #[test]
    fn call_order_and_repeats_do_not_matter(card in any_card(), called in any_calls()) {
        let mut shuffled = called.clone();
        shuffled.reverse();
        shuffled.extend(called.iter().copied());
        prop_assert_eq!(compute_marks(&card, called), compute_marks(&card, shuffled));
    }

    #[test]
    fn completed_lines_follow_fixed_order(card in any_card(), called in any_calls()) {
        let marks = compute_marks(&card, called);
        let lines = completed_lines(&marks);
        prop_assert!(lines.windows(2).all(|w| w[0].ordinal() < w[1].ordinal()));
        prop_assert!(lines.iter().all(|l| LineId::ALL.contains(l)));
        prop_assert_eq!(lines.len(), completed_line_count(&marks));
        prop_assert_eq!(completed_lines(&marks), lines);
    }

    #[test]
    fn more_calls_never_lose_lines(card in any_card(), a in any_calls(), b in any_calls()) {
        let before = completed_lines(&compute_marks(&card, a.iter().copied()));
        let after_marks = compute_marks(&card, a.iter().chain(b.iter()).copied());
        let after = completed_lines(&after_marks);
        prop_assert!(before.iter().all(|l| after.contains(l)));
        prop_assert!(after_marks.is_superset_of(&compute_marks(&card, a)));
    }

    #[test]
    fn verdicts_agree_with_line_counts(card in any_card(), called in any_calls()) {
        let marks = compute_marks(&card, called);
        let lines = completed_line_count(&marks);
        prop_assert_eq!(detect_wins(&card, &marks, RuleMode::Standard).is_win(), lines >= 1);
        prop_assert_eq!(detect_wins(&card, &marks, RuleMode::Double).is_win(), lines >= 2);
        prop_assert!(!detect_wins(&card, &marks, RuleMode::None).is_win());
        if is_blackout(&marks) {
            for mode in RuleMode::ALL.into_iter().filter(|&m| m != RuleMode::None) {
                prop_assert!(detect_wins(&card, &marks, mode).is_win());
            }
        }
    }
}
