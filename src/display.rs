/// Terminal rasteriser for the library's draw list.
///
/// The game hands over a `Frame` (sprite-sheet blits and text in play-field
/// pixels). This module maps every 2×4 pixel block to one terminal cell,
/// picks glyph art per sprite kind and animation frame, and queues crossterm
/// commands. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_adventure::render::{Blit, Frame, SpriteKind, Text, FONT_WIDTH};

/// Play-field pixels per terminal cell.
const CELL_W: i32 = 2;
const CELL_H: i32 = 4;

/// The field is drawn inside a one-cell border.
const ORIGIN_X: i32 = 1;
const ORIGIN_Y: i32 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;
const C_STAR: Color = Color::DarkGrey;
const C_BULLET: Color = Color::Cyan;
const C_ALIEN: Color = Color::Green;
const C_COIN: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_TITLE: Color = Color::Cyan;
const C_LEVEL_UP: Color = Color::Magenta;
const C_GAME_OVER: Color = Color::Red;

/// 16-colour palette index → terminal colour.
fn palette(index: u8) -> Color {
    match index {
        0 => Color::Black,
        1 => Color::DarkBlue,
        2 => Color::DarkMagenta,
        3 => Color::DarkGreen,
        4 => Color::DarkRed,
        5 => Color::Blue,
        6 => Color::DarkCyan,
        7 => Color::White,
        8 => Color::Red,
        9 => Color::DarkYellow,
        10 => Color::Yellow,
        11 => Color::Green,
        12 => Color::Cyan,
        13 => Color::Grey,
        14 => Color::Magenta,
        _ => Color::Rgb { r: 255, g: 204, b: 170 },
    }
}

// ── Glyph art ─────────────────────────────────────────────────────────────────
//
// One string per terminal row; spaces are transparent.

const STAR_ART: [&[&str]; 3] = [&["", " ."], &["", " +"], &["", " *"]];

const BULLET_ART: &[&str] = &["", "-=>"];

const ALIEN_ART: [&[&str]; 2] = [
    &[" .-^^-. ", "( o  o )", " `-vv-' ", "  /  \\  "],
    &[" .-^^-. ", "( o  o )", " `-vv-' ", "  \\  /  "],
];

const EXPLOSION_ART: [&[&str]; 3] = [
    &["", "   **   ", "   **   "],
    &["  * *   ", " * ** * ", " * ** * ", "  * *   "],
    &[" .  .  .", ".  '  . ", " .  ,  .", ".  .  . "],
];

const COIN_ART: [&[&str]; 4] = [&[" (O)"], &[" (0)"], &["  | "], &[" (0)"]];

const PLAYER_ART: [&[&str]; 2] = [
    &["  /\\    ", " [##]==>", " [##]==>", "  \\/    "],
    &[" ~/\\    ", "~[##]==>", "~[##]==>", " ~\\/    "],
];

const TITLE_SPACE_ART: &[&str] = &["", "S  P  A  C  E"];
const TITLE_ADVENTURE_ART: &[&str] = &["A D V E N T U R E"];
const LEVEL_UP_ART: &[&str] = &["", "** LEVEL UP **"];
const GAME_OVER_ART: &[&str] = &[
    "",
    "",
    "",
    "",
    "",
    "╔═══════════════╗",
    "║   GAME OVER   ║",
    "╚═══════════════╝",
];

fn pick<'a>(frames: &[&'a [&'a str]], anim: u32) -> &'a [&'a str] {
    frames[anim as usize % frames.len()]
}

/// Art and colour for one blit. Centered art is aligned on the blit's box
/// instead of its top-left corner.
fn glyphs(blit: &Blit) -> (&'static [&'static str], Color, bool) {
    let anim = blit.animation_frame();
    match blit.kind {
        SpriteKind::Star => (pick(&STAR_ART, anim), C_STAR, false),
        SpriteKind::Bullet => (BULLET_ART, C_BULLET, false),
        SpriteKind::Alien => (pick(&ALIEN_ART, anim), C_ALIEN, false),
        SpriteKind::Explosion => {
            let color = match anim {
                0 => Color::Yellow,
                1 => Color::Red,
                _ => Color::DarkGrey,
            };
            (pick(&EXPLOSION_ART, anim), color, false)
        }
        SpriteKind::Coin => (pick(&COIN_ART, anim), C_COIN, false),
        SpriteKind::Player => (pick(&PLAYER_ART, anim), C_PLAYER, false),
        SpriteKind::TitleSpace => (TITLE_SPACE_ART, C_TITLE, true),
        SpriteKind::TitleAdventure => (TITLE_ADVENTURE_ART, C_TITLE, true),
        SpriteKind::LevelUp => (LEVEL_UP_ART, C_LEVEL_UP, true),
        SpriteKind::GameOver => (GAME_OVER_ART, C_GAME_OVER, true),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Terminal size needed to show a whole frame (border and hint included).
pub fn required_size(frame: &Frame) -> (u16, u16) {
    let cols = field_cols(frame) + 2;
    let rows = field_rows(frame) + 3;
    (cols as u16, rows as u16)
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (need_w, need_h) = required_size(frame);
    let (have_w, have_h) = terminal::size()?;
    if have_w < need_w || have_h < need_h {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(format!(
            "Terminal too small: {}x{} needed, {}x{} available",
            need_w, need_h, have_w, have_h
        )))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        return Ok(());
    }

    draw_border(out, frame)?;
    for blit in &frame.blits {
        draw_blit(out, frame, blit)?;
    }
    for text in &frame.texts {
        draw_text(out, frame, text)?;
    }
    draw_controls_hint(out, frame)?;

    // park the cursor below the hint line
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (field_rows(frame) + 2) as u16))?;
    out.flush()?;
    Ok(())
}

// ── Geometry ──────────────────────────────────────────────────────────────────

fn field_cols(frame: &Frame) -> i32 {
    (frame.width + CELL_W - 1) / CELL_W
}

fn field_rows(frame: &Frame) -> i32 {
    (frame.height + CELL_H - 1) / CELL_H
}

/// Print `s` at field cell `(col, row)`, clipped to the field. Spaces are
/// skipped so art never erases what is behind it.
fn put<W: Write>(out: &mut W, frame: &Frame, col: i32, row: i32, s: &str) -> std::io::Result<()> {
    if row < 0 || row >= field_rows(frame) {
        return Ok(());
    }
    let max_col = field_cols(frame);
    for (i, ch) in s.chars().enumerate() {
        let c = col + i as i32;
        if ch == ' ' || c < 0 || c >= max_col {
            continue;
        }
        out.queue(cursor::MoveTo((ORIGIN_X + c) as u16, (ORIGIN_Y + row) as u16))?;
        out.queue(Print(ch))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let w = field_cols(frame) as usize;
    let h = field_rows(frame) as u16;
    let right = (field_cols(frame) + 1) as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, h + 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in 1..=h {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Blits & text ──────────────────────────────────────────────────────────────

fn draw_blit<W: Write>(out: &mut W, frame: &Frame, blit: &Blit) -> std::io::Result<()> {
    let (art, color, centered) = glyphs(blit);
    out.queue(style::SetForegroundColor(color))?;

    let row0 = blit.y.div_euclid(CELL_H);
    for (i, line) in art.iter().enumerate() {
        let col = if centered {
            let box_center = (blit.x + i32::from(blit.region.w) / 2).div_euclid(CELL_W);
            box_center - line.chars().count() as i32 / 2
        } else {
            blit.x.div_euclid(CELL_W)
        };
        put(out, frame, col, row0 + i as i32, line)?;
    }
    Ok(())
}

/// Text is laid out for a 4-pixel font but printed one character per cell,
/// so it is re-centered on the same midpoint.
fn draw_text<W: Write>(out: &mut W, frame: &Frame, text: &Text) -> std::io::Result<()> {
    let len = text.text.chars().count() as i32;
    let mid = text.x + FONT_WIDTH * len / 2;
    let col = (mid.div_euclid(CELL_W) - len / 2).max(0);
    let row = text.y.div_euclid(CELL_H);
    out.queue(style::SetForegroundColor(palette(text.color)))?;
    put(out, frame, col, row, &text.text)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, (field_rows(frame) + 2) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → : Move   SPACE : Shoot   M : Menu   ESC : Quit"))?;
    Ok(())
}
