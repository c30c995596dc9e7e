use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height of a card.
pub const GRID_SIZE: usize = 5;
/// Total cells on a card.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Row-major index of the free centre cell.
pub const FREE_INDEX: usize = 12;

/// Outer ring of the grid: rows 0 and 4 in full, columns 0 and 4 for rows 1..=3.
pub const PERIMETER: [usize; 16] = [0, 1, 2, 3, 4, 5, 9, 10, 14, 15, 19, 20, 21, 22, 23, 24];

/// Row of a row-major cell index.
pub const fn row_of(index: usize) -> usize {
    index / GRID_SIZE
}

/// Column of a row-major cell index.
pub const fn col_of(index: usize) -> usize {
    index % GRID_SIZE
}

/// Row-major index for a (row, col) pair.
pub const fn index_of(row: usize, col: usize) -> usize {
    row * GRID_SIZE + col
}

/// One of the 12 scoring lines on a card.
///
/// Declaration order is the fixed evaluation order used everywhere lines are
/// listed: rows top to bottom, columns left to right, then the two diagonals.
///
/// ```
/// use bingo_tracker::geometry::LineId;
///
/// assert_eq!(LineId::DiagAnti.cells(), [4, 8, 12, 16, 20]);
/// assert_eq!(LineId::Col(2).to_string(), "col2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LineId {
    Row(u8),
    Col(u8),
    DiagMain,
    DiagAnti,
}

impl LineId {
    pub const ALL: [LineId; 12] = [
        LineId::Row(0),
        LineId::Row(1),
        LineId::Row(2),
        LineId::Row(3),
        LineId::Row(4),
        LineId::Col(0),
        LineId::Col(1),
        LineId::Col(2),
        LineId::Col(3),
        LineId::Col(4),
        LineId::DiagMain,
        LineId::DiagAnti,
    ];

    /// The five cell indices of this line, in row-major order.
    pub const fn cells(self) -> [usize; GRID_SIZE] {
        match self {
            LineId::Row(r) => {
                let base = r as usize * GRID_SIZE;
                [base, base + 1, base + 2, base + 3, base + 4]
            }
            LineId::Col(c) => {
                let c = c as usize;
                [c, c + GRID_SIZE, c + 2 * GRID_SIZE, c + 3 * GRID_SIZE, c + 4 * GRID_SIZE]
            }
            LineId::DiagMain => [0, 6, 12, 18, 24],
            LineId::DiagAnti => [4, 8, 12, 16, 20],
        }
    }

    /// Position of this line in [`LineId::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            LineId::Row(r) => r as usize,
            LineId::Col(c) => GRID_SIZE + c as usize,
            LineId::DiagMain => 2 * GRID_SIZE,
            LineId::DiagAnti => 2 * GRID_SIZE + 1,
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::Row(r) => write!(f, "row{r}"),
            LineId::Col(c) => write!(f, "col{c}"),
            LineId::DiagMain => f.write_str("diagMain"),
            LineId::DiagAnti => f.write_str("diagAnti"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LineParseError {
    #[error("invalid line id: '{0}'")]
    Invalid(String),
}

impl FromStr for LineId {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        LineId::ALL
            .into_iter()
            .find(|line| line.to_string().eq_ignore_ascii_case(t))
            .ok_or_else(|| LineParseError::Invalid(s.to_string()))
    }
}

impl From<LineId> for String {
    fn from(line: LineId) -> Self {
        line.to_string()
    }
}

impl TryFrom<String> for LineId {
    type Error = LineParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        LineId::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_has_five_in_bounds_cells() {
        for line in LineId::ALL {
            let cells = line.cells();
            assert!(cells.iter().all(|&i| i < CELL_COUNT), "{line} out of bounds");
            let mut sorted = cells;
            sorted.sort_unstable();
            assert_eq!(sorted, cells, "{line} not row-major");
        }
    }

    #[test]
    fn rows_and_columns_follow_layout() {
        assert_eq!(LineId::Row(0).cells(), [0, 1, 2, 3, 4]);
        assert_eq!(LineId::Row(4).cells(), [20, 21, 22, 23, 24]);
        assert_eq!(LineId::Col(0).cells(), [0, 5, 10, 15, 20]);
        assert_eq!(LineId::Col(4).cells(), [4, 9, 14, 19, 24]);
        assert_eq!(LineId::DiagMain.cells(), [0, 6, 12, 18, 24]);
    }

    #[test]
    fn perimeter_is_outer_ring() {
        for i in 0..CELL_COUNT {
            let (r, c) = (row_of(i), col_of(i));
            let outer = r == 0 || r == 4 || c == 0 || c == 4;
            assert_eq!(PERIMETER.contains(&i), outer, "cell {i}");
        }
    }

    #[test]
    fn ordinal_matches_all_order() {
        for (i, line) in LineId::ALL.iter().enumerate() {
            assert_eq!(line.ordinal(), i);
        }
    }

    #[test]
    fn line_display_and_from_str() {
        for line in LineId::ALL {
            assert_eq!(LineId::from_str(&line.to_string()).unwrap(), line);
        }
        assert_eq!(LineId::from_str("DIAGMAIN").unwrap(), LineId::DiagMain);
        assert!(LineId::from_str("row5").is_err());
    }

    #[test]
    fn index_helpers_agree() {
        assert_eq!(index_of(row_of(FREE_INDEX), col_of(FREE_INDEX)), FREE_INDEX);
        assert_eq!((row_of(17), col_of(17)), (3, 2));
    }
}
