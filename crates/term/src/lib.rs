//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the session snapshot is drawn into
//! a framebuffer which is then diffed and flushed to the terminal.
//!
//! - `core` and `engine` stay deterministic and testable
//! - The view controls aspect ratio (3 chars wide per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_crush_engine as engine;
pub use tui_crush_types as types;

pub use fb::{BoxGlyphs, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
