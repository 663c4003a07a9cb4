//! Board factory - empty boards, constrained fill, and the settled initializer

use tracing::{debug, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{CoreError, Result};
use crate::gravity;
use crate::matcher::find_matches;
use crate::rng::TileSource;
use crate::types::{Pos, TileKind, MIN_RUN};

/// Board of `size` x `size` cells with no tiles.
pub fn create_empty(size: usize) -> Board {
    Board::new(size)
}

/// Whether placing `kind` at `pos` would complete a run with the tiles
/// already on the board. Empty cells count as run breakers.
pub fn would_create_match(board: &Board, pos: Pos, kind: TileKind) -> bool {
    let same = |row: usize, col: usize| board.kind(Pos::new(row, col)) == Some(kind);
    let size = board.size();

    let left = (0..pos.col).rev().take_while(|&c| same(pos.row, c)).count();
    let right = (pos.col + 1..size).take_while(|&c| same(pos.row, c)).count();
    if 1 + left + right >= MIN_RUN {
        return true;
    }

    let up = (0..pos.row).rev().take_while(|&r| same(r, pos.col)).count();
    let down = (pos.row + 1..size).take_while(|&r| same(r, pos.col)).count();
    1 + up + down >= MIN_RUN
}

/// Fill every empty cell, row-major, avoiding tiles that complete a run.
///
/// Each cell gets up to `config.fill_retries` draws; if all of them would
/// complete a run the last draw is kept anyway. `config` must already pass
/// [`EngineConfig::validate`]: an empty palette has nothing to draw.
pub fn fill_in_place(board: &mut Board, config: &EngineConfig, rng: &mut impl TileSource) {
    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            if board.kind(pos).is_some() {
                continue;
            }

            let mut kind = rng.pick(&config.palette);
            let mut attempts = 1;
            while attempts < config.fill_retries && would_create_match(board, pos, kind) {
                kind = rng.pick(&config.palette);
                attempts += 1;
            }
            board.set_kind(pos, Some(kind));
        }
    }
}

/// Value-returning form of [`fill_in_place`] that validates `config` first.
pub fn fill(board: &Board, config: &EngineConfig, rng: &mut impl TileSource) -> Result<Board> {
    config.validate()?;
    let mut next = board.clone();
    fill_in_place(&mut next, config, rng);
    Ok(next)
}

/// Build a full board with no runs.
///
/// Fills, then clears any accidental runs and refills (always with the
/// avoidance heuristic) until the board settles or `max_init_rounds` is hit.
pub fn initial_board(config: &EngineConfig, rng: &mut impl TileSource) -> Result<Board> {
    config.validate()?;

    let mut board = create_empty(config.size);
    fill_in_place(&mut board, config, rng);

    let mut rounds = 0;
    loop {
        let matches = find_matches(&board);
        if matches.is_empty() {
            break;
        }
        if rounds >= config.max_init_rounds {
            warn!(rounds, "initial board did not settle");
            return Err(CoreError::InitNotConverged { rounds });
        }
        rounds += 1;

        board.mark_matched(matches.iter());
        gravity::collapse(&mut board);
        fill_in_place(&mut board, config, rng);
    }

    board.clear_flags();
    debug!(size = config.size, rounds, "initial board settled");
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use crate::rng::{ScriptedTiles, SimpleRng};
    use crate::types::TileKind::*;

    #[test]
    fn test_create_empty() {
        let board = create_empty(6);
        assert_eq!(board.size(), 6);
        assert!(board.cells().iter().all(|c| c.kind.is_none()));
    }

    #[test]
    fn test_would_create_match_looks_both_ways() {
        let board = Board::from_kinds(&[
            vec![Some(Eth), None, Some(Eth), None],
            vec![None, None, None, None],
            vec![None, None, None, Some(Sol)],
            vec![None, None, None, Some(Sol)],
        ])
        .unwrap();

        assert!(would_create_match(&board, Pos::new(0, 1), Eth));
        assert!(!would_create_match(&board, Pos::new(0, 1), Sol));
        assert!(would_create_match(&board, Pos::new(1, 3), Sol));
        assert!(!would_create_match(&board, Pos::new(0, 3), Sol));
    }

    #[test]
    fn test_fill_keeps_existing_tiles() {
        let mut board = create_empty(4);
        board.set_kind(Pos::new(2, 2), Some(Ton));
        let config = EngineConfig::default().with_size(4);
        let next = fill(&board, &config, &mut SimpleRng::new(3)).unwrap();

        assert!(next.is_full());
        assert_eq!(next.kind(Pos::new(2, 2)), Some(Ton));
        assert!(!board.is_full(), "input board must not change");
    }

    #[test]
    fn test_fill_accepts_last_draw_when_retries_run_out() {
        // A single-kind script can never avoid runs
        let mut config = EngineConfig::default().with_size(3);
        config.fill_retries = 4;
        let mut tiles = ScriptedTiles::new(vec![0]);
        let board = fill(&create_empty(3), &config, &mut tiles).unwrap();

        assert!(board.cells().iter().all(|c| c.kind == Some(Btc)));
        // 4 cells take their first draw, 5 exhaust all 4 retries
        assert_eq!(tiles.draws(), 4 + 5 * 4);
    }

    #[test]
    fn test_fill_rejects_empty_palette() {
        let config = EngineConfig::default()
            .with_size(4)
            .with_palette(Palette::from_kinds(&[]));
        let result = fill(&create_empty(4), &config, &mut SimpleRng::new(1));
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_initial_board_is_settled() {
        for seed in 1..20 {
            let config = EngineConfig::default();
            let board = initial_board(&config, &mut SimpleRng::new(seed)).unwrap();
            assert!(board.is_full());
            assert!(find_matches(&board).is_empty(), "seed {} left a match", seed);
            assert!(board.matched_positions().is_empty());
        }
    }

    #[test]
    fn test_initial_board_with_small_palette() {
        let config = EngineConfig::default().with_palette(Palette::first(3));
        let board = initial_board(&config, &mut SimpleRng::new(42)).unwrap();
        assert!(find_matches(&board).is_empty());
        assert!(board
            .cells()
            .iter()
            .all(|c| c.kind.map_or(false, |k| config.palette.contains(k))));
    }

    #[test]
    fn test_initial_board_reports_non_convergence() {
        let mut config = EngineConfig::default().with_size(3);
        config.max_init_rounds = 5;
        let err = initial_board(&config, &mut ScriptedTiles::new(vec![0])).unwrap_err();
        assert_eq!(err, CoreError::InitNotConverged { rounds: 5 });
    }

    #[test]
    fn test_initial_board_rejects_invalid_config() {
        let config = EngineConfig::default().with_size(1);
        assert!(matches!(
            initial_board(&config, &mut SimpleRng::new(1)),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
