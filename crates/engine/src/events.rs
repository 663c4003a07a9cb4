//! Events queued by the session for the presentation layer.

use serde::Serialize;

use tui_crush_core::PassReport;

use crate::types::Pos;

/// Tiles cleared in one pass above which feedback turns heavy
const HEAVY_PASS_TILES: usize = 5;

/// Strength of the feedback a presenter should give (haptics, flashes, sound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Light,
    Medium,
    Heavy,
}

impl Feedback {
    /// Feedback for a pass that cleared `cleared` tiles
    pub fn for_pass(cleared: usize) -> Self {
        if cleared > HEAVY_PASS_TILES {
            Feedback::Heavy
        } else {
            Feedback::Medium
        }
    }
}

/// Final numbers of a finished game, for whatever stores player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
    pub moves_used: u32,
    /// Deepest cascade reached during the game
    pub max_combo: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Selected { pos: Pos, feedback: Feedback },
    Deselected { pos: Pos },
    /// The clicked cell does not swap into a match; it becomes the selection
    SwapRejected { from: Pos, to: Pos, feedback: Feedback },
    SwapAccepted { from: Pos, to: Pos },
    Matched { pass: PassReport, feedback: Feedback },
    /// The in-flight cascade settled
    Settled { score: u32, max_combo: u32 },
    GameOver { summary: GameSummary, feedback: Feedback },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_feedback_threshold() {
        assert_eq!(Feedback::for_pass(3), Feedback::Medium);
        assert_eq!(Feedback::for_pass(5), Feedback::Medium);
        assert_eq!(Feedback::for_pass(6), Feedback::Heavy);
    }
}
