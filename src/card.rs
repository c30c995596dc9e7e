use crate::geometry::{col_of, row_of, CELL_COUNT, FREE_INDEX, GRID_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest ball number in 75-ball bingo.
pub const MAX_NUMBER: u8 = 75;
/// Numbers available to each column.
pub const NUMBERS_PER_COLUMN: u8 = 15;
/// Column headers, left to right.
pub const COLUMN_LETTERS: [char; GRID_SIZE] = ['B', 'I', 'N', 'G', 'O'];

/// Inclusive number range permitted in column `col`: `[15c+1, 15c+15]`.
/// `None` past the last column.
pub const fn column_range(col: usize) -> Option<(u8, u8)> {
    if col >= GRID_SIZE {
        return None;
    }
    let lo = col as u8 * NUMBERS_PER_COLUMN + 1;
    Some((lo, lo + NUMBERS_PER_COLUMN - 1))
}

/// Whether `num` belongs to column `col`.
///
/// ```
/// use bingo_tracker::card::is_valid_number_for_column;
///
/// assert!(is_valid_number_for_column(15, 0));
/// assert!(!is_valid_number_for_column(16, 0));
/// ```
pub fn is_valid_number_for_column(num: u8, col: usize) -> bool {
    column_range(col).is_some_and(|(lo, hi)| (lo..=hi).contains(&num))
}

/// Column a number belongs to, or `None` outside `1..=75`.
///
/// ```
/// use bingo_tracker::card::column_for_number;
///
/// assert_eq!(column_for_number(61), Some(4));
/// assert_eq!(column_for_number(76), None);
/// ```
pub fn column_for_number(num: u8) -> Option<usize> {
    if (1..=MAX_NUMBER).contains(&num) {
        Some(((num - 1) / NUMBERS_PER_COLUMN) as usize)
    } else {
        None
    }
}

/// Caller-facing label for a ball, e.g. `B7` or `O75`.
pub fn ball_label(num: u8) -> Option<String> {
    column_for_number(num).map(|col| format!("{}{}", COLUMN_LETTERS[col], num))
}

fn column_label(col: &usize) -> String {
    match (COLUMN_LETTERS.get(*col), column_range(*col)) {
        (Some(letter), Some((lo, hi))) => format!("{letter} ({lo}-{hi})"),
        _ => col.to_string(),
    }
}

/// One of the 25 positions on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    index: usize,
    row: usize,
    col: usize,
    number: Option<u8>,
    is_free: bool,
}

impl Cell {
    pub const fn index(self) -> usize {
        self.index
    }
    pub const fn row(self) -> usize {
        self.row
    }
    pub const fn col(self) -> usize {
        self.col
    }
    pub const fn number(self) -> Option<u8> {
        self.number
    }
    pub const fn is_free(self) -> bool {
        self.is_free
    }
}

/// Build the cell at `index`. The centre cell is free and never keeps a number.
pub fn create_cell(index: usize, number: Option<u8>) -> Cell {
    let is_free = index == FREE_INDEX;
    Cell {
        index,
        row: row_of(index),
        col: col_of(index),
        number: if is_free { None } else { number },
        is_free,
    }
}

/// Identifier assigned by whoever stores the card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("cell index {0} is outside the card")]
    IndexOutOfRange(usize),
    #[error("the free centre cell cannot hold a number")]
    FreeCell,
    #[error("{number} is not allowed in column {}", column_label(.col))]
    OutOfColumnRange { number: u8, col: usize },
    #[error("{number} is already used in column {}", column_label(.col))]
    DuplicateInColumn { number: u8, col: usize },
    #[error("card has no free centre cell")]
    NoFreeCenter,
    #[error("cell {0} does not match its position on the card")]
    MisplacedCell(usize),
    #[error("card is incomplete: {0} cells have no number")]
    Incomplete(usize),
    #[error("expected 25 grid entries, got {0}")]
    GridCount(usize),
    #[error("invalid grid entry: '{0}'")]
    GridToken(String),
}

/// A 5x5 bingo card with a free centre.
///
/// ```
/// use bingo_tracker::card::Card;
///
/// let mut card = Card::empty("c1", "Lucky");
/// card.set_number(0, Some(7)).unwrap();
/// assert!(card.set_number(1, Some(7)).is_err()); // 7 belongs to column B
/// assert!(!card.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    cells: [Cell; CELL_COUNT],
    has_free_center: bool,
    created_at: DateTime<Utc>,
}

impl Card {
    /// A card with no numbers assigned, stamped with the current time.
    pub fn empty(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self::empty_at(id, name, Utc::now())
    }

    pub fn empty_at(
        id: impl Into<CardId>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cells: std::array::from_fn(|i| create_cell(i, None)),
            has_free_center: true,
            created_at,
        }
    }

    /// Build a card from a row-major grid of numbers, rejecting any that break
    /// the column rules. The centre entry is ignored.
    pub fn from_numbers(
        id: impl Into<CardId>,
        name: impl Into<String>,
        numbers: [Option<u8>; CELL_COUNT],
    ) -> Result<Self, CardError> {
        let mut card = Self::empty(id, name);
        for (i, n) in numbers.into_iter().enumerate() {
            if i == FREE_INDEX || n.is_none() {
                continue;
            }
            card.set_number(i, n)?;
        }
        Ok(card)
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }
    pub fn has_free_center(&self) -> bool {
        self.has_free_center
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Row-major numbers, `None` for the free cell and unset cells.
    pub fn numbers(&self) -> [Option<u8>; CELL_COUNT] {
        self.cells.map(|c| c.number)
    }

    /// Numbers currently assigned in column `col`, top to bottom.
    pub fn column_numbers(&self, col: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().filter(move |c| c.col == col).filter_map(|c| c.number)
    }

    /// Assign or clear the number of one cell.
    ///
    /// Rejects the free cell, numbers outside the column's range, and numbers
    /// already present elsewhere in the same column.
    pub fn set_number(&mut self, index: usize, number: Option<u8>) -> Result<(), CardError> {
        let cell = self.cell(index).ok_or(CardError::IndexOutOfRange(index))?;
        if cell.is_free {
            return Err(CardError::FreeCell);
        }
        if let Some(n) = number {
            if !is_valid_number_for_column(n, cell.col) {
                return Err(CardError::OutOfColumnRange { number: n, col: cell.col });
            }
            let taken = self.cells.iter().any(|other| {
                other.col == cell.col && other.index != index && other.number == Some(n)
            });
            if taken {
                return Err(CardError::DuplicateInColumn { number: n, col: cell.col });
            }
        }
        self.cells[index] = create_cell(index, number);
        Ok(())
    }

    /// Cells still waiting for a number (the free cell never counts).
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_free && c.number.is_none()).count()
    }

    /// Playable once every non-free cell has a number.
    pub fn is_complete(&self) -> bool {
        self.missing_count() == 0
    }

    pub fn ensure_complete(&self) -> Result<(), CardError> {
        match self.missing_count() {
            0 => Ok(()),
            n => Err(CardError::Incomplete(n)),
        }
    }

    /// Re-check every structural invariant. Used on cards that did not come
    /// through [`Card::set_number`], e.g. after deserialising.
    pub fn validate(&self) -> Result<(), CardError> {
        if !self.has_free_center {
            return Err(CardError::NoFreeCenter);
        }
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.index != i || cell.row != row_of(i) || cell.col != col_of(i) {
                return Err(CardError::MisplacedCell(i));
            }
            if cell.is_free != (i == FREE_INDEX) {
                return Err(CardError::MisplacedCell(i));
            }
            let Some(n) = cell.number else { continue };
            if cell.is_free {
                return Err(CardError::FreeCell);
            }
            if !is_valid_number_for_column(n, cell.col) {
                return Err(CardError::OutOfColumnRange { number: n, col: cell.col });
            }
            if self.cells[..i].iter().any(|c| c.col == cell.col && c.number == Some(n)) {
                return Err(CardError::DuplicateInColumn { number: n, col: cell.col });
            }
        }
        Ok(())
    }
}

/// Parse 25 row-major grid entries separated by whitespace or commas.
/// `*` or `FREE` marks the centre, `-` an unset cell.
///
/// ```
/// use bingo_tracker::card::parse_grid;
///
/// let grid = parse_grid(
///     "1 16 31 46 61  2 17 32 47 62  3 18 * 48 63  4 19 34 49 64  5 20 35 50 -",
/// ).unwrap();
/// assert_eq!(grid[0], Some(1));
/// assert_eq!(grid[12], None);
/// assert_eq!(grid[24], None);
/// ```
pub fn parse_grid(input: &str) -> Result<[Option<u8>; CELL_COUNT], CardError> {
    let tokens: Vec<&str> =
        input.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty()).collect();
    if tokens.len() != CELL_COUNT {
        return Err(CardError::GridCount(tokens.len()));
    }
    let mut grid = [None; CELL_COUNT];
    for (slot, tok) in grid.iter_mut().zip(tokens) {
        *slot = match tok {
            "-" | "*" => None,
            t if t.eq_ignore_ascii_case("free") => None,
            t => Some(t.parse::<u8>().map_err(|_| CardError::GridToken(t.to_string()))?),
        };
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_cell_drops_number() {
        let c = create_cell(FREE_INDEX, Some(40));
        assert!(c.is_free());
        assert_eq!(c.number(), None);
        let c = create_cell(7, Some(20));
        assert!(!c.is_free());
        assert_eq!((c.row(), c.col(), c.number()), (1, 2, Some(20)));
    }

    #[test]
    fn empty_card_shape() {
        let card = Card::empty("a", "Card A");
        assert_eq!(card.cells().len(), CELL_COUNT);
        assert_eq!(card.cells().iter().filter(|c| c.is_free()).count(), 1);
        assert!(card.cells()[FREE_INDEX].is_free());
        assert!(card.cells().iter().all(|c| c.number().is_none()));
        assert!(card.has_free_center());
        assert_eq!(card.missing_count(), 24);
        assert!(card.validate().is_ok());
    }

    #[test]
    fn column_ranges() {
        assert_eq!(column_range(0), Some((1, 15)));
        assert_eq!(column_range(2), Some((31, 45)));
        assert_eq!(column_range(4), Some((61, 75)));
        assert_eq!(column_range(5), None);
        assert_eq!(column_range(300), None);
        assert!(!is_valid_number_for_column(20, 300));
        assert!(!is_valid_number_for_column(0, 0));
        assert!(!is_valid_number_for_column(5, 7));
        assert_eq!(column_for_number(1), Some(0));
        assert_eq!(column_for_number(45), Some(2));
        assert_eq!(column_for_number(0), None);
    }

    #[test]
    fn set_number_rejections() {
        let mut card = Card::empty("a", "A");
        assert_eq!(card.set_number(FREE_INDEX, Some(40)), Err(CardError::FreeCell));
        assert_eq!(card.set_number(25, Some(1)), Err(CardError::IndexOutOfRange(25)));
        assert_eq!(
            card.set_number(0, Some(16)),
            Err(CardError::OutOfColumnRange { number: 16, col: 0 })
        );
        card.set_number(0, Some(3)).unwrap();
        assert_eq!(
            card.set_number(5, Some(3)),
            Err(CardError::DuplicateInColumn { number: 3, col: 0 })
        );
        // re-assigning the same cell its own number is fine
        card.set_number(0, Some(3)).unwrap();
        card.set_number(0, None).unwrap();
        card.set_number(5, Some(3)).unwrap();
    }

    #[test]
    fn column_edge_number_stays_in_its_column() {
        let mut card = Card::empty("a", "A");
        card.set_number(0, Some(15)).unwrap();
        assert!(card.set_number(1, Some(15)).is_err());
    }

    #[test]
    fn validate_catches_tampered_cards() {
        let mut card = Card::empty("a", "A");
        card.cells[1] = create_cell(1, Some(2));
        assert_eq!(card.validate(), Err(CardError::OutOfColumnRange { number: 2, col: 1 }));
        card.cells[1] = create_cell(1, Some(20));
        card.cells[6] = create_cell(6, Some(20));
        assert_eq!(card.validate(), Err(CardError::DuplicateInColumn { number: 20, col: 1 }));
        card.cells[6] = create_cell(7, None);
        assert_eq!(card.validate(), Err(CardError::MisplacedCell(6)));
        card.cells[6] = create_cell(6, None);
        assert!(card.validate().is_ok());
        card.has_free_center = false;
        assert_eq!(card.validate(), Err(CardError::NoFreeCenter));
    }

    #[test]
    fn grid_parsing_errors() {
        assert_eq!(parse_grid("1 2 3"), Err(CardError::GridCount(3)));
        let bad = "x 16 31 46 61 2 17 32 47 62 3 18 * 48 63 4 19 34 49 64 5 20 35 50 65";
        assert_eq!(parse_grid(bad), Err(CardError::GridToken("x".into())));
    }

    #[test]
    fn from_numbers_builds_complete_card() {
        let grid = parse_grid(
            "1,16,31,46,61, 2,17,32,47,62, 3,18,FREE,48,63, 4,19,34,49,64, 5,20,35,50,65",
        )
        .unwrap();
        let card = Card::from_numbers("x", "X", grid).unwrap();
        assert!(card.is_complete());
        assert!(card.ensure_complete().is_ok());
        assert_eq!(card.column_numbers(2).collect::<Vec<_>>(), vec![31, 32, 34, 35]);
    }

    #[test]
    fn ball_labels() {
        assert_eq!(ball_label(7).as_deref(), Some("B7"));
        assert_eq!(ball_label(75).as_deref(), Some("O75"));
        assert_eq!(ball_label(0), None);
    }
}
