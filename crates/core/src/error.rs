//! Error types for the engine.

use thiserror::Error;

use crate::types::Pos;

/// Errors surfaced by engine operations.
///
/// `OutOfBounds`, `Unsettled` and `InvalidConfig` are caller mistakes.
/// The two `NotConverged` variants mean a defensive iteration cap was hit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A position lies outside the board.
    #[error("position ({}, {}) is outside a {size}x{size} board", .pos.row, .pos.col)]
    OutOfBounds { pos: Pos, size: usize },

    /// The board still has live matches or empty cells.
    #[error("board is not settled")]
    Unsettled,

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The initializer kept producing matches.
    #[error("initial board did not settle after {rounds} rounds")]
    InitNotConverged { rounds: u32 },

    /// A cascade kept producing matches.
    #[error("cascade did not settle after {passes} passes")]
    CascadeNotConverged { passes: u32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
