mod display;
mod keyboard;

use std::fs::{self, File, OpenOptions};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_adventure::config::{DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use space_adventure::render::compose;
use space_adventure::{Game, GameConfig, SaveTable};

use keyboard::Keyboard;

#[derive(Parser, Debug)]
#[command(name = "space_adventure")]
#[command(about = "Side-scrolling space shooter for the terminal")]
struct Args {
    /// Play-field width in pixels (two pixels per terminal column)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,

    /// Play-field height in pixels (four pixels per terminal row)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Save slots file [default: ~/.space_adventure_saves.csv]
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Log file; set RUST_LOG to change the level [default: next to the save file]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::with_size(self.width, self.height);
        config.fps = self.fps;
        if let Some(path) = &self.save_file {
            config.save_path = path.clone();
        }
        config
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to a
/// file instead of stderr.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Opens `path` for appending, creating any missing parent directories.
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Fixed-timestep loop. Each frame drains pending events, updates once,
/// draws once and sleeps off what is left of the budget. Returns on quit.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let frame_budget = Duration::from_secs(1) / game.config.fps;
    let mut keyboard = Keyboard::new();

    loop {
        let started = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            if keyboard.handle(&ev) {
                info!("quit at frame {}", game.frame);
                return Ok(());
            }
        }

        let input = keyboard.frame_input();
        game.update(&input, rng);
        display::render(out, &compose(game)).context("drawing frame")?;

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();
    config.validate().context("invalid configuration")?;

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| config.save_path.with_file_name(".space_adventure.log"));
    init_logging(&log_path)?;

    let saves = SaveTable::load_or_default(&config.save_path);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "starting {}x{} @ {} fps, {} save slot(s) in {}",
        config.width,
        config.height,
        config.fps,
        saves.len(),
        config.save_path.display()
    );
    let mut game = Game::new(config, saves).context("invalid configuration")?;

    let mut term = TerminalGuard::enter().context("setting up the terminal")?;
    let rx = spawn_input_reader();
    game_loop(&mut term.out, &mut game, &mut rng, &rx)
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode and the alternate screen for as long as the guard lives. Dropping
/// it puts the terminal back, including on an early `?` return.
struct TerminalGuard {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        // Built first so a failure halfway through still restores what was set.
        let mut guard = Self {
            out: BufWriter::new(stdout()),
            keyboard_enhanced: false,
        };
        terminal::enable_raw_mode()?;
        guard.out.execute(terminal::EnterAlternateScreen)?;
        guard.out.execute(cursor::Hide)?;

        // Key release events let held keys stop the moment they are let go.
        // Terminals without the kitty protocol reject this and fall back to
        // the hold window in `keyboard`.
        guard.keyboard_enhanced = guard
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocking `event::read` on its own thread; the loop drains the channel
/// without waiting.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}
