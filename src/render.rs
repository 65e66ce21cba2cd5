/// Draw-list builder.
///
/// `compose` turns the current `Game` into sprite-sheet blits and text items
/// in back-to-front order. No pixels are produced here; the frontend decides
/// how a blit looks. Layout positions are authored for the default 120×90
/// field and scaled to the configured size.

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::entities::World;
use crate::game::{Game, GameStatus, SaveStep};
use crate::sprites::{Region, Sprite};

/// Width of one character in the 4×6 bitmap font text is laid out for.
pub const FONT_WIDTH: i32 = 4;

// 16-colour palette indices.
pub const COLOR_WHITE: u8 = 7;
pub const COLOR_ORANGE: u8 = 9;
pub const COLOR_YELLOW: u8 = 10;
pub const COLOR_LIME: u8 = 11;
pub const COLOR_CYAN: u8 = 12;
pub const COLOR_GRAY: u8 = 13;
pub const COLOR_PINK: u8 = 14;
pub const COLOR_PEACH: u8 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Star,
    Bullet,
    Alien,
    Explosion,
    Coin,
    Player,
    TitleSpace,
    TitleAdventure,
    LevelUp,
    GameOver,
}

// Artwork that is not an entity.
pub const TITLE_SPACE: Region = Region { bank: 0, u: 0, v: 66, w: 67, h: 16, colkey: Some(0) };
pub const TITLE_ADVENTURE: Region = Region { bank: 0, u: 0, v: 86, w: 62, h: 8, colkey: Some(0) };
pub const LEVEL_UP: Region = Region { bank: 0, u: 0, v: 96, w: 72, h: 16, colkey: Some(0) };
pub const GAME_OVER: Region = Region { bank: 1, u: 16, v: 48, w: 79, h: 79, colkey: Some(0) };

/// Copy `region` of the sprite sheet to `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blit {
    pub kind: SpriteKind,
    pub region: Region,
    pub x: i32,
    pub y: i32,
}

impl Blit {
    /// Animation frame encoded in the region's vertical offset.
    pub fn animation_frame(&self) -> u32 {
        match self.kind {
            SpriteKind::Star
            | SpriteKind::Bullet
            | SpriteKind::Alien
            | SpriteKind::Explosion
            | SpriteKind::Coin
            | SpriteKind::Player => u32::from(self.region.v / self.region.h.max(1)),
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: u8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub blits: Vec<Blit>,
    pub texts: Vec<Text>,
}

impl Frame {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn sprite<S: Sprite>(&mut self, kind: SpriteKind, sprite: &S) {
        let (x, y) = sprite.position();
        self.blits.push(Blit {
            kind,
            region: sprite.region(),
            x: x as i32,
            y: y as i32,
        });
    }

    fn art(&mut self, kind: SpriteKind, region: Region, x: i32, y: i32) {
        self.blits.push(Blit { kind, region, x, y });
    }

    /// Art centered horizontally; `y` is in default-field units.
    fn art_centered(&mut self, kind: SpriteKind, region: Region, y: i32) {
        let x = (self.width - i32::from(region.w)) / 2;
        let y = self.row(y);
        self.art(kind, region, x, y);
    }

    fn text(&mut self, x: i32, y: i32, text: impl Into<String>, color: u8) {
        self.texts.push(Text {
            x,
            y,
            text: text.into(),
            color,
        });
    }

    fn text_centered(&mut self, y: i32, text: impl Into<String>, color: u8) {
        let text = text.into();
        let x = (self.width - FONT_WIDTH * text.chars().count() as i32) / 2;
        let y = self.row(y);
        self.text(x.max(0), y, text, color);
    }

    fn row(&self, y: i32) -> i32 {
        y * self.height / DEFAULT_HEIGHT
    }

    fn col(&self, x: i32) -> i32 {
        x * self.width / DEFAULT_WIDTH
    }
}

/// Build the draw list for the current frame.
pub fn compose(game: &Game) -> Frame {
    let world = &game.world;
    let mut frame = Frame::new(world.width, world.height);

    match game.status {
        GameStatus::Start => {
            draw_title(&mut frame);
            frame.text_centered(60, "Press [Space] key to start.", COLOR_PEACH);
            if !game.saves.is_empty() {
                frame.text_centered(70, "Press [L] key to load.", COLOR_PEACH);
            }
        }
        GameStatus::Playing => {
            draw_world(&mut frame, world);
            let h = frame.height;
            frame.text(1, h - 14, "[M] Menu", COLOR_GRAY);
            frame.text(1, h - 7, format!("Score: {}", game.score), COLOR_CYAN);

            if game.score != 0 && game.score % 10 == 0 {
                frame.art_centered(SpriteKind::LevelUp, LEVEL_UP, 30);
                frame.text_centered(50, format!("Level {}", game.level), COLOR_PINK);
            } else if let Some(notice) = &game.notice {
                frame.text_centered(50, notice.text, COLOR_YELLOW);
            }
        }
        GameStatus::Pause => {
            draw_stars(&mut frame, world);
            draw_title(&mut frame);
            frame.text_centered(50, "[S] save game", COLOR_LIME);
            frame.text_centered(60, "[M] go back", COLOR_LIME);
        }
        GameStatus::SaveMenu(SaveStep::SelectSlot) => {
            frame.text_centered(20, "Select Save Slot", COLOR_LIME);
            let next = draw_slot_list(&mut frame, game);
            if next <= game.selectable_save_slots() {
                let y = frame.row(30 + 10 * (next as i32 - 1));
                frame.text(frame.col(30), y, format!("[{}]", next), COLOR_WHITE);
            }
            frame.text_centered(80, "[M] back", COLOR_GRAY);
        }
        GameStatus::SaveMenu(SaveStep::EnterName { .. }) => {
            frame.text_centered(20, "Insert Name", COLOR_LIME);
            frame.text_centered(30, format!("{}_", game.name), COLOR_ORANGE);
            frame.text_centered(60, "[Enter] to save", COLOR_LIME);
        }
        GameStatus::LoadMenu => {
            frame.text_centered(20, "Select Load File", COLOR_LIME);
            draw_slot_list(&mut frame, game);
            frame.text_centered(80, "[M] back", COLOR_GRAY);
        }
        GameStatus::End => {
            draw_stars(&mut frame, world);
            for blast in &world.explosions {
                frame.sprite(SpriteKind::Explosion, blast);
            }
            let h = frame.height;
            frame.text(1, h - 7, format!("Final Score: {}", game.score), COLOR_CYAN);
            frame.art_centered(SpriteKind::GameOver, GAME_OVER, 25);
            frame.text_centered(60, "Press [M] to restart", COLOR_ORANGE);
        }
    }

    frame
}

fn draw_title(frame: &mut Frame) {
    frame.art_centered(SpriteKind::TitleSpace, TITLE_SPACE, 15);
    frame.art_centered(SpriteKind::TitleAdventure, TITLE_ADVENTURE, 30);
}

fn draw_stars(frame: &mut Frame, world: &World) {
    for star in &world.stars {
        frame.sprite(SpriteKind::Star, star);
    }
}

/// Every collection back to front, then the player on top.
fn draw_world(frame: &mut Frame, world: &World) {
    draw_stars(frame, world);
    for bullet in &world.bullets {
        frame.sprite(SpriteKind::Bullet, bullet);
    }
    for alien in &world.aliens {
        frame.sprite(SpriteKind::Alien, alien);
    }
    for blast in &world.explosions {
        frame.sprite(SpriteKind::Explosion, blast);
    }
    for coin in &world.coins {
        frame.sprite(SpriteKind::Coin, coin);
    }
    frame.sprite(SpriteKind::Player, &world.player);
}

/// List saved slots as `[n] name score`. Returns the next free slot number.
fn draw_slot_list(frame: &mut Frame, game: &Game) -> usize {
    let mut order = 1;
    for (_, slot) in game.saves.iter() {
        let y = frame.row(30 + 10 * (order as i32 - 1));
        let (c1, c2, c3) = (frame.col(30), frame.col(50), frame.col(80));
        frame.text(c1, y, format!("[{}]", order), COLOR_WHITE);
        frame.text(c2, y, slot.name.clone(), COLOR_PINK);
        frame.text(c3, y, slot.score.to_string(), COLOR_CYAN);
        order += 1;
    }
    order
}
