use bingo_tracker::card::{
    column_for_number, is_valid_number_for_column, parse_grid, Card,
};
use bingo_tracker::geometry::{LineId, PERIMETER};
use bingo_tracker::rules::{
    compute_marks, detect_wins, is_blackout, is_box_complete, is_x_complete, RuleMode, WinResult,
};

// B  I  N  G  O
// 1 16 31 46 61
// 2 17 32 47 62
// 3 18  * 48 63
// 4 19 34 49 64
// 5 20 35 50 65
fn sample_card() -> Card {
    let grid = parse_grid(
        "1 16 31 46 61  2 17 32 47 62  3 18 * 48 63  4 19 34 49 64  5 20 35 50 65",
    )
    .expect("valid grid");
    Card::from_numbers("sample", "Sample", grid).expect("valid card")
}

fn numbers_at(card: &Card, indices: &[usize]) -> Vec<u8> {
    indices.iter().filter_map(|&i| card.cells()[i].number()).collect()
}

fn all_numbers(card: &Card) -> Vec<u8> {
    card.numbers().into_iter().flatten().collect()
}

#[test]
fn standard_row_zero() {
    let card = sample_card();
    let marks = compute_marks(&card, [1, 16, 31, 46, 61]);
    let result = detect_wins(&card, &marks, RuleMode::Standard);
    assert!(result.is_win());
    assert_eq!(result.win_type(), Some("Standard Bingo"));
    assert_eq!(result.winning_lines(), Some(&[LineId::Row(0)][..]));
}

#[test]
fn blackout_needs_every_number() {
    let card = sample_card();
    let all = all_numbers(&card);
    assert_eq!(all.len(), 24);
    assert!(is_blackout(&compute_marks(&card, all.iter().copied())));

    let missing_one = all.iter().copied().filter(|&n| n != 34);
    let marks = compute_marks(&card, missing_one);
    assert!(!is_blackout(&marks));
    assert!(!detect_wins(&card, &marks, RuleMode::Blackout).is_win());
}

#[test]
fn x_needs_both_diagonals() {
    let card = sample_card();
    let both = numbers_at(&card, &[0, 6, 12, 18, 24, 4, 8, 16, 20]);
    assert_eq!(both.len(), 8);
    let marks = compute_marks(&card, both);
    assert!(is_x_complete(&marks));
    let result = detect_wins(&card, &marks, RuleMode::X);
    assert_eq!(result.win_type(), Some("X Pattern"));
    assert_eq!(result.winning_lines(), Some(&[LineId::DiagMain, LineId::DiagAnti][..]));

    let main_only = numbers_at(&card, &[0, 6, 18, 24]);
    let marks = compute_marks(&card, main_only);
    assert!(!is_x_complete(&marks));
    assert_eq!(
        detect_wins(&card, &marks, RuleMode::X),
        WinResult::NotWon { completed_line_count: Some(1) }
    );
}

#[test]
fn box_without_interior() {
    let card = sample_card();
    let marks = compute_marks(&card, numbers_at(&card, &PERIMETER));
    assert!(is_box_complete(&marks));
    assert!(!is_blackout(&marks));
    let result = detect_wins(&card, &marks, RuleMode::Box);
    assert!(result.is_win());
    assert_eq!(result.winning_lines(), None);
}

#[test]
fn double_needs_a_second_line() {
    let card = sample_card();
    let mut called = vec![1, 16, 31, 46, 61];
    let one = detect_wins(&card, &compute_marks(&card, called.clone()), RuleMode::Double);
    assert_eq!(one, WinResult::NotWon { completed_line_count: Some(1) });

    called.extend([2, 3, 4, 5]);
    let two = detect_wins(&card, &compute_marks(&card, called), RuleMode::Double);
    assert!(two.is_win());
    assert_eq!(two.win_type(), Some("Double Bingo"));
    assert_eq!(two.winning_lines(), Some(&[LineId::Row(0), LineId::Col(0)][..]));
    assert_eq!(two.completed_line_count(), Some(2));
}

#[test]
fn fresh_card_never_wins() {
    let card = Card::empty("new", "New");
    let marks = compute_marks(&card, []);
    for mode in RuleMode::ALL {
        assert!(!detect_wins(&card, &marks, mode).is_win(), "{mode}");
    }
    // calling every ball still cannot win on a card with no numbers
    let marks = compute_marks(&card, 1..=75);
    for mode in RuleMode::ALL {
        assert!(!detect_wins(&card, &marks, mode).is_win(), "{mode}");
    }
}

#[test]
fn column_lookups() {
    assert!(is_valid_number_for_column(15, 0));
    assert!(!is_valid_number_for_column(16, 0));
    assert_eq!(column_for_number(61), Some(4));
    assert_eq!(column_for_number(76), None);
}

#[test]
fn none_mode_is_silent_even_on_blackout() {
    let card = sample_card();
    let marks = compute_marks(&card, all_numbers(&card));
    let result = detect_wins(&card, &marks, RuleMode::None);
    assert_eq!(result, WinResult::NotWon { completed_line_count: None });
}
