//! Space Adventure: a small side-scrolling space shooter.
//!
//! The library holds the whole game and never touches the terminal:
//!
//! - `entities` / `sprites`: entity records, their update rules, and the
//!   ordered collections they live in
//! - `compute`: spawn cadence, per-collection ticks, player controller
//! - `collision`: overlap tests and the alien / coin interaction passes
//! - `game`: the Start / Playing / Pause / Save / Load / End state machine
//! - `save`: CSV save slots
//! - `render`: the per-frame draw list
//! - `input`, `config`, `error`: plumbing

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod save;
pub mod sprites;

pub use config::GameConfig;
pub use error::{ConfigError, SaveError};
pub use game::{Game, GameStatus, SaveStep};
pub use input::{FrameInput, Key};
pub use save::{SaveSlot, SaveTable};
