//! Swap validation
//!
//! A swap is legal when the two cells are orthogonal neighbours and exchanging
//! their tiles leaves at least one run on the board.

use crate::board::Board;
use crate::error::Result;
use crate::matcher::has_match;
use crate::types::Pos;

/// Check whether swapping `a` and `b` produces a match.
///
/// Out-of-range positions are an error. Positions that are in range but not
/// exactly one step apart (including `a == b`) are simply not a valid swap.
/// The caller's board is never modified.
pub fn is_valid_swap(board: &Board, a: Pos, b: Pos) -> Result<bool> {
    board.check(a)?;
    board.check(b)?;
    if !a.is_adjacent(b) {
        return Ok(false);
    }

    let mut trial = board.clone();
    trial.swap_kinds(a, b)?;
    Ok(has_match(&trial))
}

/// Apply a swap to the board (tile kinds only).
pub fn swap_tiles(board: &mut Board, a: Pos, b: Pos) -> Result<()> {
    board.swap_kinds(a, b)
}
