//! Cascade orchestration
//!
//! One player swap can set off a chain of passes: detect runs, flag and score
//! them, collapse and refill, then look again. [`CascadeStepper`] exposes each
//! half of a pass separately so a presenter can pause between them;
//! [`resolve`] drives a stepper straight to the settled board.

use tracing::{trace, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{CoreError, Result};
use crate::gravity::apply_gravity_in_place;
use crate::matcher::find_matches;
use crate::rng::TileSource;
use crate::scoring::calculate_score;
use crate::types::Pos;

/// What one pass of a cascade cleared and earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Zero-based pass index within the cascade
    pub depth: u32,
    pub cells: Vec<Pos>,
    pub score: u32,
}

/// Final result of a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Settled board with all flags cleared
    pub board: Board,
    pub total_score: u32,
    /// Depth of the last pass that cleared anything (0 when nothing matched)
    pub max_combo: u32,
    pub passes: Vec<PassReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Detect,
    Collapse,
    Settled,
}

/// Step-by-step cascade driver.
///
/// Call [`mark`](Self::mark) and [`collapse`](Self::collapse) alternately
/// until `mark` returns `None`.
#[derive(Debug, Clone)]
pub struct CascadeStepper {
    board: Board,
    depth: u32,
    total: u32,
    passes: Vec<PassReport>,
    phase: Phase,
}

impl CascadeStepper {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            depth: 0,
            total: 0,
            passes: Vec::new(),
            phase: Phase::Detect,
        }
    }

    /// Board as of the last step, flags included
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn total_score(&self) -> u32 {
        self.total
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    /// True between a successful `mark` and the following `collapse`
    pub fn awaiting_collapse(&self) -> bool {
        self.phase == Phase::Collapse
    }

    /// Detect runs, flag them as matched, and score the pass.
    ///
    /// Returns `None` once the board is settled. Calling this while a collapse
    /// is pending returns the pending pass again without rescoring it.
    pub fn mark(&mut self, config: &EngineConfig) -> Result<Option<PassReport>> {
        match self.phase {
            Phase::Settled => return Ok(None),
            Phase::Collapse => return Ok(self.passes.last().cloned()),
            Phase::Detect => {}
        }

        let matches = find_matches(&self.board);
        if matches.is_empty() {
            self.phase = Phase::Settled;
            return Ok(None);
        }
        if self.depth >= config.max_cascade_passes {
            warn!(passes = self.depth, "cascade did not settle");
            return Err(CoreError::CascadeNotConverged { passes: self.depth });
        }

        self.board.mark_matched(matches.iter());
        let score = calculate_score(matches.len(), self.depth, config);
        self.total = self.total.saturating_add(score);
        trace!(depth = self.depth, cleared = matches.len(), score, "cascade pass");

        let report = PassReport {
            depth: self.depth,
            cells: matches.into_cells(),
            score,
        };
        self.passes.push(report.clone());
        self.phase = Phase::Collapse;
        Ok(Some(report))
    }

    /// Collapse the flagged cells and refill. A no-op unless a pass is pending.
    ///
    /// `config` must already pass [`EngineConfig::validate`].
    pub fn collapse(&mut self, config: &EngineConfig, rng: &mut impl TileSource) {
        if self.phase != Phase::Collapse {
            return;
        }
        apply_gravity_in_place(&mut self.board, config, rng);
        self.depth += 1;
        self.phase = Phase::Detect;
    }

    /// Consume the stepper. Flags are cleared on the returned board.
    pub fn finish(self) -> CascadeOutcome {
        let mut board = self.board;
        board.clear_flags();
        CascadeOutcome {
            board,
            total_score: self.total,
            max_combo: self.passes.last().map_or(0, |pass| pass.depth),
            passes: self.passes,
        }
    }
}

/// Run every pass of a cascade and return the settled board.
pub fn resolve(
    board: Board,
    config: &EngineConfig,
    rng: &mut impl TileSource,
) -> Result<CascadeOutcome> {
    config.validate()?;
    let mut stepper = CascadeStepper::new(board);
    while stepper.mark(config)?.is_some() {
        stepper.collapse(config, rng);
    }
    Ok(stepper.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_match;
    use crate::rng::{ScriptedTiles, SimpleRng};
    use crate::types::TileKind::{self, *};

    fn from(rows: &[&[TileKind]]) -> Board {
        let rows: Vec<Vec<Option<TileKind>>> = rows
            .iter()
            .map(|r| r.iter().map(|&k| Some(k)).collect())
            .collect();
        Board::from_kinds(&rows).unwrap()
    }

    fn settled() -> Board {
        from(&[
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
        ])
    }

    #[test]
    fn test_settled_board_is_returned_unchanged() {
        let config = EngineConfig::default();
        let outcome = resolve(settled(), &config, &mut SimpleRng::new(1)).unwrap();
        assert_eq!(outcome.board, settled());
        assert_eq!(outcome.total_score, 0);
        assert_eq!(outcome.max_combo, 0);
        assert!(outcome.passes.is_empty());
    }

    #[test]
    fn test_single_pass() {
        // Bottom row Ton Ton Ton clears; the refilled top row reads Usdt Ton Usdt
        let board = from(&[
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
            &[Btc, Eth, Doge, Sol],
            &[Ton, Ton, Ton, Eth],
        ]);
        let config = EngineConfig::default().with_size(4);
        let mut tiles = ScriptedTiles::new(vec![4, 5, 4]);
        let outcome = resolve(board, &config, &mut tiles).unwrap();

        assert_eq!(outcome.total_score, 300);
        assert_eq!(outcome.max_combo, 0);
        assert_eq!(outcome.passes.len(), 1);
        assert_eq!(
            outcome.passes[0].cells,
            vec![Pos::new(3, 0), Pos::new(3, 1), Pos::new(3, 2)]
        );
        // Columns 0..3 shifted down by one
        assert_eq!(outcome.board.kind(Pos::new(0, 0)), Some(Usdt));
        assert_eq!(outcome.board.kind(Pos::new(3, 0)), Some(Btc));
        assert_eq!(outcome.board.kind(Pos::new(3, 3)), Some(Eth));
        assert!(!has_match(&outcome.board));
        assert!(outcome.board.cells().iter().all(|c| !c.matched && !c.animating));
    }

    #[test]
    fn test_chain_reaction_scores_with_combo() {
        // Column 0 holds Eth over a Ton run. Once the Tons clear, Eth falls to
        // (3, 0) and lines up with the Eths at (3, 1) and (3, 2).
        let board = from(&[
            &[Eth, Btc, Doge, Sol],
            &[Ton, Sol, Btc, Doge],
            &[Ton, Btc, Doge, Sol],
            &[Ton, Eth, Eth, Doge],
        ]);
        let config = EngineConfig::default().with_size(4);
        // Refills alternate Usdt/Btc so they never line up with each other
        let mut tiles = ScriptedTiles::new(vec![4, 0, 1, 3]);
        let outcome = resolve(board, &config, &mut tiles).unwrap();

        assert!(outcome.passes.len() >= 2);
        assert_eq!(outcome.passes[0].score, 300);
        assert_eq!(outcome.passes[0].depth, 0);
        assert_eq!(outcome.passes[1].depth, 1);
        assert_eq!(outcome.passes[1].score, 450);
        assert_eq!(
            outcome.total_score,
            outcome.passes.iter().map(|p| p.score).sum::<u32>()
        );
        assert_eq!(outcome.max_combo, outcome.passes.len() as u32 - 1);
        assert!(!has_match(&outcome.board));
    }

    #[test]
    fn test_stepper_exposes_marked_cells() {
        let board = from(&[
            &[Btc, Eth, Doge, Sol],
            &[Doge, Sol, Btc, Eth],
            &[Btc, Eth, Doge, Sol],
            &[Ton, Ton, Ton, Eth],
        ]);
        let config = EngineConfig::default().with_size(4);
        let mut stepper = CascadeStepper::new(board);

        let pass = stepper.mark(&config).unwrap().unwrap();
        assert!(stepper.awaiting_collapse());
        assert_eq!(stepper.board().matched_positions(), pass.cells);

        // Marking again before collapsing does not double count
        assert_eq!(stepper.mark(&config).unwrap(), Some(pass));
        assert_eq!(stepper.total_score(), 300);

        stepper.collapse(&config, &mut ScriptedTiles::new(vec![4, 5, 4]));
        assert_eq!(stepper.depth(), 1);
        assert!(stepper.board().matched_positions().is_empty());
        assert!(stepper.mark(&config).unwrap().is_none());
        assert!(stepper.is_settled());
    }

    #[test]
    fn test_resolve_rejects_empty_palette() {
        let board = from(&[&[Btc, Btc, Btc], &[Eth, Doge, Sol], &[Doge, Sol, Eth]]);
        let config = EngineConfig::default()
            .with_size(3)
            .with_palette(crate::config::Palette::from_kinds(&[]));
        let err = resolve(board, &config, &mut SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_runaway_cascade_is_reported() {
        // A one-kind refill re-creates the same full board on every pass
        let board = from(&[&[Btc, Btc, Btc], &[Btc, Btc, Btc], &[Btc, Btc, Btc]]);
        let mut config = EngineConfig::default().with_size(3);
        config.max_cascade_passes = 7;
        let err = resolve(board, &config, &mut ScriptedTiles::new(vec![0])).unwrap_err();
        assert_eq!(err, CoreError::CascadeNotConverged { passes: 7 });
    }
}
