//! bingo-tracker: 75-ball bingo card tracking and win detection
//!
//! Goals:
//! - Pure, deterministic rules engine: marks from called numbers, wins per rule mode
//! - Small, well-documented public API
//! - No panics for invalid input; editing and session calls return `Result`
//!
//! ## Quick start: check a card for a line
//! ```
//! use bingo_tracker::card::{parse_grid, Card};
//! use bingo_tracker::rules::{compute_marks, detect_wins, RuleMode};
//!
//! let grid = parse_grid(
//!     "1 16 31 46 61  2 17 32 47 62  3 18 * 48 63  4 19 34 49 64  5 20 35 50 65",
//! ).unwrap();
//! let card = Card::from_numbers("c1", "Lucky", grid).unwrap();
//!
//! let marks = compute_marks(&card, [3, 18, 48, 63]);
//! let result = detect_wins(&card, &marks, RuleMode::Standard);
//! assert_eq!(result.win_type(), Some("Standard Bingo"));
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin bingo-tracker
//! ```

pub mod card;
pub mod geometry;
pub mod quick_pick;
pub mod rules;
pub mod session;
pub mod store;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
