//! Gravity and refill
//!
//! After a pass is marked, every column is compacted independently: tiles not
//! flagged as matched slide to the bottom keeping their top-to-bottom order,
//! and the vacated cells at the top receive fresh tiles.

use crate::board::Board;
use crate::config::{EngineConfig, Palette, RefillPolicy};
use crate::error::Result;
use crate::factory;
use crate::rng::TileSource;
use crate::types::{Pos, TileKind};

/// Compact surviving tiles toward the bottom of each column.
///
/// Vacated cells are left empty and flagged `animating`, as are tiles that
/// moved. All `matched` flags are cleared. Returns the number of vacated cells.
pub fn collapse(board: &mut Board) -> usize {
    let size = board.size();
    let mut survivors: Vec<(TileKind, usize)> = Vec::with_capacity(size);
    let mut vacated = 0;

    for col in 0..size {
        survivors.clear();
        for row in (0..size).rev() {
            let cell = board.get(Pos::new(row, col)).copied().unwrap_or_default();
            if let (Some(kind), false) = (cell.kind, cell.matched) {
                survivors.push((kind, row));
            }
        }

        // Bottom row first
        for (i, &(kind, src_row)) in survivors.iter().enumerate() {
            let dst_row = size - 1 - i;
            if let Some(cell) = board.get_mut(Pos::new(dst_row, col)) {
                cell.kind = Some(kind);
                cell.matched = false;
                cell.animating = dst_row != src_row;
            }
        }
        for row in 0..size - survivors.len() {
            if let Some(cell) = board.get_mut(Pos::new(row, col)) {
                cell.kind = None;
                cell.matched = false;
                cell.animating = true;
            }
        }
        vacated += size - survivors.len();
    }

    vacated
}

/// Give every empty cell a uniform random tile, row-major.
///
/// The palette must not be empty.
pub fn refill_random(board: &mut Board, palette: &Palette, rng: &mut impl TileSource) {
    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            if let Some(cell) = board.get_mut(Pos::new(row, col)) {
                if cell.kind.is_none() {
                    cell.kind = Some(rng.pick(palette));
                }
            }
        }
    }
}

/// Collapse, then refill according to `config.refill`.
///
/// `config` must already pass [`EngineConfig::validate`].
pub fn apply_gravity_in_place(
    board: &mut Board,
    config: &EngineConfig,
    rng: &mut impl TileSource,
) {
    collapse(board);
    match config.refill {
        RefillPolicy::Random => refill_random(board, &config.palette, rng),
        RefillPolicy::AvoidMatches => factory::fill_in_place(board, config, rng),
    }
}

/// Value-returning form of [`apply_gravity_in_place`] that validates
/// `config` first.
pub fn apply_gravity(
    board: &Board,
    config: &EngineConfig,
    rng: &mut impl TileSource,
) -> Result<Board> {
    config.validate()?;
    let mut next = board.clone();
    apply_gravity_in_place(&mut next, config, rng);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedTiles;
    use crate::types::TileKind::*;

    fn column_board() -> Board {
        // Column 0 top to bottom: Btc, Eth, Doge, Sol
        Board::from_kinds(&[
            vec![Some(Btc), Some(Ton), Some(Ton)],
            vec![Some(Eth), Some(Usdt), Some(Usdt)],
            vec![Some(Doge), Some(Ton), Some(Ton)],
        ])
        .unwrap()
    }

    #[test]
    fn test_collapse_preserves_order() {
        let mut board = column_board();
        board.mark_matched([Pos::new(1, 0)]);

        let vacated = collapse(&mut board);
        assert_eq!(vacated, 1);
        assert_eq!(board.kind(Pos::new(0, 0)), None);
        assert_eq!(board.kind(Pos::new(1, 0)), Some(Btc));
        assert_eq!(board.kind(Pos::new(2, 0)), Some(Doge));

        // Untouched columns do not animate
        assert!(!board.get(Pos::new(0, 1)).unwrap().animating);
        assert!(board.get(Pos::new(1, 0)).unwrap().animating);
        assert!(!board.get(Pos::new(2, 0)).unwrap().animating);
        assert!(board.matched_positions().is_empty());
    }

    #[test]
    fn test_apply_gravity_refills_from_source() {
        let board = {
            let mut b = column_board();
            b.mark_matched([Pos::new(0, 0), Pos::new(2, 0)]);
            b
        };
        let config = EngineConfig::default();
        let mut tiles = ScriptedTiles::new(vec![3, 4]);

        let next = apply_gravity(&board, &config, &mut tiles).unwrap();

        // Input untouched
        assert_eq!(board.kind(Pos::new(0, 0)), Some(Btc));
        assert!(next.is_full());
        assert_eq!(next.kind(Pos::new(2, 0)), Some(Eth));
        // Row-major refill: (0,0) then (1,0)
        assert_eq!(next.kind(Pos::new(0, 0)), Some(Sol));
        assert_eq!(next.kind(Pos::new(1, 0)), Some(Usdt));
        assert_eq!(tiles.draws(), 2);
    }

    #[test]
    fn test_apply_gravity_rejects_empty_palette() {
        let mut board = column_board();
        board.mark_matched([Pos::new(0, 0)]);
        let config = EngineConfig::default().with_palette(Palette::from_kinds(&[]));

        let result = apply_gravity(&board, &config, &mut ScriptedTiles::new(vec![0]));
        assert!(matches!(result, Err(crate::error::CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_avoid_policy_does_not_complete_runs() {
        // Bottom row reads Eth Eth _ after the collapse; an Eth refill at (2, 2)
        // would complete a run.
        let mut board = Board::from_kinds(&[
            vec![Some(Sol), Some(Btc), Some(Doge)],
            vec![Some(Btc), Some(Sol), Some(Doge)],
            vec![Some(Eth), Some(Eth), Some(Doge)],
        ])
        .unwrap();
        board.mark_matched([Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2)]);

        let config = EngineConfig::default().with_refill(RefillPolicy::AvoidMatches);
        // Scripted: Eth first everywhere, then Ton
        let mut tiles = ScriptedTiles::new(vec![1, 5]);
        apply_gravity_in_place(&mut board, &config, &mut tiles);

        assert!(board.is_full());
        assert_ne!(board.kind(Pos::new(2, 2)), Some(Eth));
    }
}
