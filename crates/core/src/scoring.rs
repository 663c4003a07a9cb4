//! Scoring module - per-pass cascade scoring and level progression
//!
//! A pass that clears `n` tiles at combo depth `d` scores
//! `base = n * points_per_match` plus `floor(base * (multiplier^d - 1))`.
//! Depth 0 is the pass triggered directly by the swap, so it earns no bonus.

use crate::config::EngineConfig;

/// Score calculation result for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// `match_count * points_per_match`
    pub base: u32,
    /// Combo bonus added on top of `base`.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Calculate the score for one pass with explicit parameters.
pub fn score_pass(
    match_count: usize,
    combo_depth: u32,
    points_per_match: u32,
    multiplier: f64,
) -> ScoreResult {
    let base = (match_count as u32).saturating_mul(points_per_match);
    let factor = multiplier.powi(combo_depth as i32) - 1.0;
    // `as` saturates, so a runaway multiplier pins at u32::MAX
    let combo_bonus = (base as f64 * factor).floor().max(0.0) as u32;

    ScoreResult {
        base,
        combo_bonus,
        total: base.saturating_add(combo_bonus),
    }
}

/// Calculate the score for one pass using the engine configuration.
pub fn calculate_score(match_count: usize, combo_depth: u32, config: &EngineConfig) -> u32 {
    score_pass(
        match_count,
        combo_depth,
        config.points_per_match,
        config.combo_multiplier,
    )
    .total
}

/// Level management
/// Levels start at 1 and advance every `threshold` points
pub fn calculate_level(score: u32, threshold: u32) -> u32 {
    score / threshold.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pass_has_no_bonus() {
        let result = score_pass(3, 0, 100, 1.5);
        assert_eq!(result.base, 300);
        assert_eq!(result.combo_bonus, 0);
        assert_eq!(result.total, 300);

        assert_eq!(calculate_score(4, 0, &EngineConfig::default()), 400);
    }

    #[test]
    fn test_combo_bonus_floors() {
        // 300 * (1.5 - 1) = 150
        assert_eq!(score_pass(3, 1, 100, 1.5).total, 450);
        // 300 * (2.25 - 1) = 375
        assert_eq!(score_pass(3, 2, 100, 1.5).total, 675);
        // 300 * (3.375 - 1) = 712.5 -> 712
        let result = score_pass(3, 3, 100, 1.5);
        assert_eq!(result.combo_bonus, 712);
        assert_eq!(result.total, 1012);
        // 7 * 10 * (1.5 - 1) = 35
        assert_eq!(score_pass(7, 1, 10, 1.5).combo_bonus, 35);
    }

    #[test]
    fn test_score_monotonic_in_depth() {
        for count in 3..=10 {
            let mut last = 0;
            for depth in 0..12 {
                let total = score_pass(count, depth, 100, 1.5).total;
                assert!(total >= last, "count {} depth {}", count, depth);
                last = total;
            }
        }
    }

    #[test]
    fn test_unit_multiplier_never_adds_bonus() {
        assert_eq!(score_pass(5, 9, 100, 1.0).total, 500);
    }

    #[test]
    fn test_huge_depth_saturates() {
        assert_eq!(score_pass(64, 200, 100, 1.5).total, u32::MAX);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0, 10_000), 1);
        assert_eq!(calculate_level(9_999, 10_000), 1);
        assert_eq!(calculate_level(10_000, 10_000), 2);
        assert_eq!(calculate_level(35_500, 10_000), 4);
        assert_eq!(calculate_level(5, 0), 6);
    }
}
