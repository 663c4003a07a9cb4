//! Session layer on top of the pure engine.
//!
//! [`GameSession`] owns one game: the board, the player's selection, the move
//! budget, score and level, and the cascade currently resolving. It performs
//! no I/O; a front-end feeds it clicks or [`types::GameAction`]s plus elapsed
//! time, reads a [`SessionSnapshot`], and drains [`SessionEvent`]s.
//!
//! ```
//! use tui_crush_engine::{GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default().instant()).unwrap();
//! assert_eq!(session.moves(), 30);
//! assert_eq!(session.level(), 1);
//! assert!(session.take_events().is_empty());
//! ```

pub mod config;
pub mod events;
pub mod session;
pub mod snapshot;

pub use tui_crush_core as core;
pub use tui_crush_types as types;

pub use config::GameConfig;
pub use events::{Feedback, GameSummary, SessionEvent};
pub use session::{ClickOutcome, GameSession};
pub use snapshot::SessionSnapshot;
