//! TUI Crush (workspace facade crate).
//!
//! Re-exports `tui_crush::{core,engine,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_crush_core as core;
pub use tui_crush_engine as engine;
pub use tui_crush_input as input;
pub use tui_crush_term as term;
pub use tui_crush_types as types;
