/// Tunable game configuration.
///
/// Screen geometry and spawn cadences are injected through `GameConfig`
/// rather than read from literals, so the same logic runs on any play-field
/// size (tests use small, hand-picked fields).

use std::path::PathBuf;

use crate::entities::{Alien, Player};
use crate::error::ConfigError;
use crate::sprites::Sprite;

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_WIDTH: i32 = 120;
pub const DEFAULT_HEIGHT: i32 = 90;
pub const DEFAULT_FPS: u32 = 30;

/// Live bullets allowed on screen at once.
pub const MAX_BULLETS: usize = 5;
pub const STAR_INTERVAL: u64 = 3;
/// The alien clock advances by the current level each tick; a spawn happens
/// every time it crosses a multiple of this value.
pub const ALIEN_INTERVAL: u64 = 17;
pub const COIN_INTERVAL: u64 = 40;

pub const MAX_SAVE_SLOTS: usize = 5;
pub const MAX_NAME_LEN: usize = 10;

const SAVE_FILE_NAME: &str = ".space_adventure_saves.csv";

/// `$HOME/.space_adventure_saves.csv`, or the working directory when `HOME`
/// is unset.
pub fn default_save_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(SAVE_FILE_NAME)
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub max_bullets: usize,
    pub star_interval: u64,
    pub alien_interval: u64,
    pub coin_interval: u64,
    pub max_save_slots: usize,
    pub max_name_len: usize,
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            max_bullets: MAX_BULLETS,
            star_interval: STAR_INTERVAL,
            alien_interval: ALIEN_INTERVAL,
            coin_interval: COIN_INTERVAL,
            max_save_slots: MAX_SAVE_SLOTS,
            max_name_len: MAX_NAME_LEN,
            save_path: default_save_path(),
        }
    }
}

impl GameConfig {
    /// Default configuration with a different play field.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check that the play field can hold the largest sprite and that every
    /// cadence is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_w = 2 * Player::WIDTH;
        let min_h = Player::HEIGHT.max(Alien::HEIGHT);
        if self.width < min_w || self.height < min_h {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
                min_w,
                min_h,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.star_interval == 0 || self.alien_interval == 0 || self.coin_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        // Slots are picked with a single digit key.
        if self.max_save_slots == 0 || self.max_save_slots > 9 {
            return Err(ConfigError::SlotCount(self.max_save_slots));
        }
        Ok(())
    }
}
