//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the board, match, and cascade rules of the puzzle.
//! It has **zero dependencies** on UI, timing, or I/O, making it:
//!
//! - **Deterministic**: tile draws come from an injected [`TileSource`]
//! - **Testable**: every operation is a plain function over a [`Board`]
//! - **Portable**: the session and terminal crates sit on top of it
//!
//! # Module Structure
//!
//! - [`board`]: N x N grid with flat row-major storage
//! - [`factory`]: empty boards, run-avoiding fill, and the settled initializer
//! - [`matcher`]: run detection over rows and columns
//! - [`swap`]: adjacency check and simulated-swap validation
//! - [`gravity`]: per-column collapse and refill
//! - [`scoring`]: per-pass combo scoring and levels
//! - [`cascade`]: match → score → collapse loop until the board settles
//! - [`moves`]: exhaustive search for a legal swap (deadlock detection)
//! - [`rng`]: seedable and scripted tile sources
//!
//! # Game Rules
//!
//! - A **run** is three or more equal tiles in a row or column
//! - A swap is legal only between orthogonal neighbours and only if it makes a run
//! - Each cascade pass at depth `d` scores `n * 100 * 1.5^d` (floored bonus)
//! - Refills after a collapse are plain random draws, so chains may continue
//!   on their own
//!
//! # Example
//!
//! ```
//! use tui_crush_core::{cascade, factory, moves, swap, EngineConfig, SimpleRng};
//!
//! let config = EngineConfig::default();
//! let mut rng = SimpleRng::new(12345);
//! let mut board = factory::initial_board(&config, &mut rng).unwrap();
//!
//! if let Some((a, b)) = moves::find_valid_move(&board).unwrap() {
//!     assert!(swap::is_valid_swap(&board, a, b).unwrap());
//!     swap::swap_tiles(&mut board, a, b).unwrap();
//!
//!     let outcome = cascade::resolve(board, &config, &mut rng).unwrap();
//!     assert!(outcome.total_score >= 300);
//! }
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod error;
pub mod factory;
pub mod gravity;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod swap;

pub use tui_crush_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use cascade::{resolve, CascadeOutcome, CascadeStepper, PassReport};
pub use config::{EngineConfig, Palette, RefillPolicy};
pub use error::{CoreError, Result};
pub use factory::{create_empty, fill, initial_board};
pub use gravity::apply_gravity;
pub use matcher::{find_matches, MatchSet};
pub use moves::{find_valid_move, has_valid_moves};
pub use rng::{ScriptedTiles, SimpleRng, TileSource};
pub use scoring::{calculate_level, calculate_score, ScoreResult};
pub use swap::{is_valid_swap, swap_tiles};
