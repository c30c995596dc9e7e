pub(crate) mod detector;
pub(crate) mod lines;
pub(crate) mod marks;

pub use lines::{
    completed_line_count, completed_lines, is_blackout, is_box_complete, is_line_complete,
    is_x_complete,
};
pub use marks::{compute_marks, compute_marks_with, Marks};

use crate::card::Card;
use crate::geometry::{LineId, CELL_COUNT, PERIMETER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Win condition selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleMode {
    /// Win detection disabled.
    None,
    /// Any one line.
    #[default]
    Standard,
    /// Any two lines.
    Double,
    /// Perimeter complete.
    Box,
    /// Both diagonals complete.
    X,
    /// All 25 cells marked.
    Blackout,
}

impl RuleMode {
    pub const ALL: [RuleMode; 6] = [
        RuleMode::None,
        RuleMode::Standard,
        RuleMode::Double,
        RuleMode::Box,
        RuleMode::X,
        RuleMode::Blackout,
    ];

    /// Label shown when this mode produces a win.
    pub const fn win_type(self) -> &'static str {
        match self {
            RuleMode::None => "None",
            RuleMode::Standard => "Standard Bingo",
            RuleMode::Double => "Double Bingo",
            RuleMode::Box => "Box",
            RuleMode::X => "X Pattern",
            RuleMode::Blackout => "Blackout",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            RuleMode::None => "none",
            RuleMode::Standard => "standard",
            RuleMode::Double => "double",
            RuleMode::Box => "box",
            RuleMode::X => "x",
            RuleMode::Blackout => "blackout",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a stored or user-supplied mode; anything unrecognised disables
    /// win detection instead of failing.
    pub fn from_str_or_disabled(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            log::warn!("{err}; win detection disabled");
            RuleMode::None
        })
    }
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleModeParseError {
    #[error("unknown rule mode: '{0}'")]
    Unknown(String),
}

impl FromStr for RuleMode {
    type Err = RuleModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        let mode = match t.as_str() {
            "none" | "off" => RuleMode::None,
            "standard" | "line" => RuleMode::Standard,
            "double" => RuleMode::Double,
            "box" | "frame" => RuleMode::Box,
            "x" => RuleMode::X,
            "blackout" | "full" => RuleMode::Blackout,
            _ => return Err(RuleModeParseError::Unknown(s.to_string())),
        };
        Ok(mode)
    }
}

/// A winning verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Win {
    pub mode: RuleMode,
    /// Lines to highlight; only for line-based modes.
    pub winning_lines: Option<Vec<LineId>>,
    /// Present for `Standard` and `Double` wins.
    pub completed_line_count: Option<usize>,
}

impl Win {
    pub const fn win_type(&self) -> &'static str {
        self.mode.win_type()
    }

    pub fn lines(&self) -> &[LineId] {
        self.winning_lines.as_deref().unwrap_or(&[])
    }
}

/// Outcome of evaluating marks under a rule mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinResult {
    /// `completed_line_count` is `None` only when detection is disabled.
    NotWon { completed_line_count: Option<usize> },
    Won(Win),
}

impl WinResult {
    pub const DISABLED: WinResult = WinResult::NotWon { completed_line_count: None };

    pub fn is_win(&self) -> bool {
        matches!(self, WinResult::Won(_))
    }

    pub fn win(&self) -> Option<&Win> {
        match self {
            WinResult::Won(w) => Some(w),
            WinResult::NotWon { .. } => None,
        }
    }

    pub fn win_type(&self) -> Option<&'static str> {
        self.win().map(Win::win_type)
    }

    pub fn winning_lines(&self) -> Option<&[LineId]> {
        self.win().and_then(|w| w.winning_lines.as_deref())
    }

    pub fn completed_line_count(&self) -> Option<usize> {
        match self {
            WinResult::NotWon { completed_line_count } => *completed_line_count,
            WinResult::Won(w) => w.completed_line_count,
        }
    }
}

/// Decide whether `marks` win under `mode`.
///
/// The line scan always runs, so a losing result still carries the number of
/// completed lines for progress display. `RuleMode::None` never wins and
/// reports nothing.
///
/// ```
/// use bingo_tracker::card::{parse_grid, Card};
/// use bingo_tracker::geometry::LineId;
/// use bingo_tracker::rules::{compute_marks, detect_wins, RuleMode};
///
/// let grid = parse_grid(
///     "1 16 31 46 61  2 17 32 47 62  3 18 * 48 63  4 19 34 49 64  5 20 35 50 65",
/// ).unwrap();
/// let card = Card::from_numbers("c", "C", grid).unwrap();
/// let marks = compute_marks(&card, [1, 16, 31, 46, 61]);
/// let result = detect_wins(&card, &marks, RuleMode::Standard);
/// assert!(result.is_win());
/// assert_eq!(result.win_type(), Some("Standard Bingo"));
/// assert_eq!(result.winning_lines(), Some(&[LineId::Row(0)][..]));
/// ```
pub fn detect_wins(card: &Card, marks: &Marks, mode: RuleMode) -> WinResult {
    let Some(detector) = detector::detector_for(mode) else {
        return WinResult::DISABLED;
    };
    let analysis = detector::MarkAnalysis::new(marks);
    let result = detector.evaluate(&analysis);
    log::trace!(
        "card {} under {mode}: win={} lines={}",
        card.id(),
        result.is_win(),
        analysis.completed.len()
    );
    result
}

/// Marks and verdict for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
    pub marks: Marks,
    pub result: WinResult,
}

impl Evaluation {
    /// Cells a renderer should highlight as part of the win.
    pub fn winning_cells(&self) -> [bool; CELL_COUNT] {
        winning_cells(&self.result)
    }
}

/// Compute marks and the verdict in one call.
pub fn evaluate(card: &Card, called: &HashSet<u8>, mode: RuleMode) -> Evaluation {
    let marks = compute_marks_with(card, called);
    let result = detect_wins(card, &marks, mode);
    Evaluation { marks, result }
}

/// Cells covered by a win: the union of winning lines, the perimeter for a
/// box, every cell for a blackout. All `false` for a loss.
pub fn winning_cells(result: &WinResult) -> [bool; CELL_COUNT] {
    let mut cells = [false; CELL_COUNT];
    let Some(win) = result.win() else {
        return cells;
    };
    match win.mode {
        RuleMode::Box => PERIMETER.iter().for_each(|&i| cells[i] = true),
        RuleMode::Blackout => cells = [true; CELL_COUNT],
        _ => {
            for line in win.lines() {
                line.cells().iter().for_each(|&i| cells[i] = true);
            }
        }
    }
    cells
}
