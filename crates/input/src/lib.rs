//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Cursor
//! movement is one step per key press; terminal auto-repeat provides held-key
//! movement.

pub mod map;

pub use tui_crush_types as types;

pub use map::{handle_key_event, should_quit};
