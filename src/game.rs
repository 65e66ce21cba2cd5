/// Top-level game state machine.
///
/// `Game` owns the world, the score and the save table, and decides each
/// frame which collections are simulated:
///
/// * `Start`: nothing moves; Space starts a new game, L opens the load menu.
/// * `Playing`: everything ticks; M pauses.
/// * `Pause`: only the star field drifts; M resumes, S saves.
/// * `SaveMenu` / `LoadMenu`: slot and name prompts, nothing moves.
/// * `End`: stars and explosions only; M returns to the title screen.

use log::{debug, error, info};
use rand::Rng;

use crate::compute::{init_world, level_for_score, tick_explosions, tick_stars, tick_world};
use crate::config::GameConfig;
use crate::entities::World;
use crate::error::ConfigError;
use crate::input::{FrameInput, Key};
use crate::save::{SaveSlot, SaveTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStep {
    SelectSlot,
    EnterName { slot: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Start,
    Playing,
    Pause,
    SaveMenu(SaveStep),
    LoadMenu,
    End,
}

/// Short message shown over the play field for a few frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: &'static str,
    pub frames_left: u32,
}

pub const NOTICE_SAVED: &str = "Saved!";
pub const NOTICE_SAVE_FAILED: &str = "Save failed";

#[derive(Clone, Debug)]
pub struct Game {
    pub config: GameConfig,
    pub world: World,
    pub status: GameStatus,
    pub score: u32,
    /// Shown to the player and fed to the alien cadence; never decreases
    /// within a session.
    pub level: u32,
    pub saves: SaveTable,
    /// Name typed so far in the save prompt.
    pub name: String,
    /// Slot the current session was loaded from. Saving a loaded session
    /// writes straight back to it without prompting.
    pub loaded_slot: Option<usize>,
    pub notice: Option<Notice>,
    /// Frames updated since the program started.
    pub frame: u64,
}

impl Game {
    /// Fresh game on the title screen. Fails when `config` cannot host a
    /// session (field smaller than a sprite, zero cadence, slot count).
    pub fn new(config: GameConfig, saves: SaveTable) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = init_world(&config);
        Ok(Self {
            config,
            world,
            status: GameStatus::Start,
            score: 0,
            level: 1,
            saves,
            name: String::new(),
            loaded_slot: None,
            notice: None,
            frame: 0,
        })
    }

    /// Advance one frame: react to this frame's input, then simulate
    /// whatever the (possibly new) status allows.
    pub fn update(&mut self, input: &FrameInput, rng: &mut impl Rng) {
        self.frame += 1;
        if let Some(notice) = &mut self.notice {
            notice.frames_left = notice.frames_left.saturating_sub(1);
            if notice.frames_left == 0 {
                self.notice = None;
            }
        }

        self.handle_input(input);
        self.simulate(input, rng);
    }

    /// Slot numbers (1-based) the save prompt currently accepts.
    pub fn selectable_save_slots(&self) -> usize {
        (self.saves.len() + 1).min(self.config.max_save_slots)
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn set_status(&mut self, next: GameStatus) {
        if self.status != next {
            info!("state {:?} -> {:?}", self.status, next);
            self.status = next;
        }
    }

    fn handle_input(&mut self, input: &FrameInput) {
        match self.status {
            GameStatus::Start => {
                if input.just_pressed(Key::Fire) {
                    self.start_new_game();
                } else if input.just_pressed(Key::Load) && !self.saves.is_empty() {
                    self.set_status(GameStatus::LoadMenu);
                }
            }
            GameStatus::Playing => {
                if input.just_pressed(Key::Menu) {
                    self.set_status(GameStatus::Pause);
                }
            }
            GameStatus::Pause => {
                if input.just_pressed(Key::Menu) {
                    self.set_status(GameStatus::Playing);
                } else if input.just_pressed(Key::Save) {
                    self.set_status(GameStatus::SaveMenu(SaveStep::SelectSlot));
                }
            }
            GameStatus::SaveMenu(step) => self.handle_save_menu(step, input),
            GameStatus::LoadMenu => self.handle_load_menu(input),
            GameStatus::End => {
                if input.just_pressed(Key::Menu) {
                    self.set_status(GameStatus::Start);
                }
            }
        }
    }

    fn handle_save_menu(&mut self, step: SaveStep, input: &FrameInput) {
        if let Some(slot) = self.loaded_slot {
            // A loaded session goes straight back to the slot it came from.
            let name = self
                .saves
                .get(slot)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            self.commit_save(slot, name);
            self.set_status(GameStatus::Playing);
            return;
        }

        match step {
            SaveStep::SelectSlot => {
                if input.just_pressed(Key::Menu) {
                    self.set_status(GameStatus::Pause);
                    return;
                }
                let max = self.selectable_save_slots() as u32;
                if let Some(d) = input.typed_digit().filter(|d| (1..=max).contains(d)) {
                    let slot = (d - 1) as usize;
                    debug!("save slot {} selected", slot);
                    self.name.clear();
                    self.set_status(GameStatus::SaveMenu(SaveStep::EnterName { slot }));
                }
            }
            SaveStep::EnterName { slot } => {
                if input.just_pressed(Key::Confirm) {
                    let name = std::mem::take(&mut self.name);
                    self.commit_save(slot, name);
                    self.set_status(GameStatus::Playing);
                    return;
                }
                if input.just_pressed(Key::Backspace) {
                    self.name.pop();
                }
                for &c in input.typed() {
                    if c.is_control() || self.name.chars().count() >= self.config.max_name_len {
                        continue;
                    }
                    self.name.push(c);
                }
            }
        }
    }

    fn handle_load_menu(&mut self, input: &FrameInput) {
        if input.just_pressed(Key::Menu) {
            self.set_status(GameStatus::Start);
            return;
        }
        let count = self.saves.len() as u32;
        let Some(d) = input.typed_digit().filter(|d| (1..=count).contains(d)) else {
            return;
        };
        let slot = (d - 1) as usize;
        let Some(entry) = self.saves.get(slot).cloned() else {
            return;
        };

        self.reset_session();
        self.score = entry.score;
        self.level = level_for_score(entry.score);
        self.loaded_slot = Some(slot);
        info!("loaded slot {} ({}, score {})", slot, entry.name, entry.score);
        self.set_status(GameStatus::Playing);
    }

    fn start_new_game(&mut self) {
        self.reset_session();
        info!("new game");
        self.set_status(GameStatus::Playing);
    }

    fn reset_session(&mut self) {
        self.world = init_world(&self.config);
        self.score = 0;
        self.level = 1;
        self.name.clear();
        self.loaded_slot = None;
        self.notice = None;
    }

    /// Write `(name, score)` into `slot` and rewrite the save file. A failed
    /// write keeps the in-memory entry and the game carries on.
    fn commit_save(&mut self, slot: usize, name: String) {
        let entry = SaveSlot::new(name, self.score);
        let result = self
            .saves
            .set(slot, entry)
            .and_then(|()| self.saves.save(&self.config.save_path));
        let text = match result {
            Ok(()) => {
                info!("saved score {} to slot {}", self.score, slot);
                NOTICE_SAVED
            }
            Err(e) => {
                error!("save to slot {} failed: {}", slot, e);
                NOTICE_SAVE_FAILED
            }
        };
        self.notice = Some(Notice {
            text,
            frames_left: self.config.fps,
        });
    }

    fn end_game(&mut self) {
        info!("game over, final score {}", self.score);
        self.set_status(GameStatus::End);
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    fn simulate(&mut self, input: &FrameInput, rng: &mut impl Rng) {
        match self.status {
            GameStatus::Playing => {
                let outcome = tick_world(&mut self.world, input, self.level, &self.config, rng);
                let (aliens, coins) = (&outcome.aliens, &outcome.coins);
                if aliens.shot_down + aliens.escaped + coins.collected + coins.shot > 0 {
                    debug!(
                        "frame {}: {} alien(s) shot down, {} escaped, {} coin(s) collected, {} shot",
                        self.frame, aliens.shot_down, aliens.escaped, coins.collected, coins.shot
                    );
                }
                if outcome.aliens.player_hit {
                    // The ship's explosion was spawned by the collision pass.
                    self.end_game();
                    return;
                }
                self.score += outcome.coins.collected;
                let level = level_for_score(self.score);
                if level > self.level {
                    info!("level up: {} -> {}", self.level, level);
                    self.level = level;
                }
            }
            GameStatus::Pause => {
                tick_stars(&mut self.world, self.config.star_interval, rng);
            }
            GameStatus::End => {
                tick_stars(&mut self.world, self.config.star_interval, rng);
                tick_explosions(&mut self.world);
            }
            GameStatus::Start | GameStatus::SaveMenu(_) | GameStatus::LoadMenu => {}
        }
    }
}
