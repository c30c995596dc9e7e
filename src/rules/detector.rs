use super::lines::{completed_lines, is_blackout, is_box_complete, is_x_complete};
use super::marks::Marks;
use crate::geometry::LineId;
use crate::rules::{RuleMode, Win, WinResult};

/// What every rule mode sees: the marks plus one full line scan.
pub struct MarkAnalysis<'a> {
    pub marks: &'a Marks,
    pub completed: Vec<LineId>,
}

impl<'a> MarkAnalysis<'a> {
    pub fn new(marks: &'a Marks) -> Self {
        Self { marks, completed: completed_lines(marks) }
    }

    fn lost(&self) -> WinResult {
        WinResult::NotWon { completed_line_count: Some(self.completed.len()) }
    }
}

/// Strategy pattern: each rule mode knows when it is satisfied and how to
/// report the win.
pub trait WinDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool;
    fn build_win(&self, analysis: &MarkAnalysis<'_>) -> Win;

    fn evaluate(&self, analysis: &MarkAnalysis<'_>) -> WinResult {
        if self.detect(analysis) {
            WinResult::Won(self.build_win(analysis))
        } else {
            analysis.lost()
        }
    }
}

/// Any single line.
pub struct StandardDetector;

impl WinDetector for StandardDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool {
        !analysis.completed.is_empty()
    }

    fn build_win(&self, analysis: &MarkAnalysis<'_>) -> Win {
        Win {
            mode: RuleMode::Standard,
            winning_lines: Some(analysis.completed.clone()),
            completed_line_count: Some(analysis.completed.len()),
        }
    }
}

/// Any two lines. Every completed line is reported, not just the first two.
pub struct DoubleDetector;

impl WinDetector for DoubleDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool {
        analysis.completed.len() >= 2
    }

    fn build_win(&self, analysis: &MarkAnalysis<'_>) -> Win {
        Win {
            mode: RuleMode::Double,
            winning_lines: Some(analysis.completed.clone()),
            completed_line_count: Some(analysis.completed.len()),
        }
    }
}

/// The 16-cell outer ring.
pub struct BoxDetector;

impl WinDetector for BoxDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool {
        is_box_complete(analysis.marks)
    }

    fn build_win(&self, _analysis: &MarkAnalysis<'_>) -> Win {
        Win { mode: RuleMode::Box, winning_lines: None, completed_line_count: None }
    }
}

/// Both diagonals through the free centre.
pub struct XDetector;

impl WinDetector for XDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool {
        is_x_complete(analysis.marks)
    }

    fn build_win(&self, _analysis: &MarkAnalysis<'_>) -> Win {
        Win {
            mode: RuleMode::X,
            winning_lines: Some(vec![LineId::DiagMain, LineId::DiagAnti]),
            completed_line_count: None,
        }
    }
}

/// Every cell.
pub struct BlackoutDetector;

impl WinDetector for BlackoutDetector {
    fn detect(&self, analysis: &MarkAnalysis<'_>) -> bool {
        is_blackout(analysis.marks)
    }

    fn build_win(&self, _analysis: &MarkAnalysis<'_>) -> Win {
        Win { mode: RuleMode::Blackout, winning_lines: None, completed_line_count: None }
    }
}

/// Detector for an active mode; `None` for [`RuleMode::None`].
pub fn detector_for(mode: RuleMode) -> Option<&'static dyn WinDetector> {
    match mode {
        RuleMode::None => None,
        RuleMode::Standard => Some(&StandardDetector),
        RuleMode::Double => Some(&DoubleDetector),
        RuleMode::Box => Some(&BoxDetector),
        RuleMode::X => Some(&XDetector),
        RuleMode::Blackout => Some(&BlackoutDetector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_active_mode_has_a_detector() {
        for mode in RuleMode::ALL {
            assert_eq!(detector_for(mode).is_some(), mode != RuleMode::None, "{mode}");
        }
    }

    #[test]
    fn free_only_loses_everywhere() {
        let marks = Marks::free_only();
        let analysis = MarkAnalysis::new(&marks);
        for mode in RuleMode::ALL {
            if let Some(d) = detector_for(mode) {
                assert!(!d.detect(&analysis), "{mode}");
            }
        }
    }
}
