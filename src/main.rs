mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chicken_invaders::compute::{new_game, tick};
use chicken_invaders::config::GameConfig;
use chicken_invaders::entities::GameState;
use chicken_invaders::input::{InputEvent, Key};
use chicken_invaders::render::render;
use display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "chicken_invaders", about = "Single-screen arcade shooter in the terminal")]
struct Args {
    /// JSON game configuration; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from the single-wave preset (victory screen, respawning apple)
    #[arg(long, conflicts_with = "config")]
    single_wave: bool,
    /// Seed for the game's random source
    #[arg(long)]
    seed: Option<u64>,
    /// Override the configured frame rate
    #[arg(long)]
    fps: Option<u32>,
    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match (&args.config, args.single_wave) {
        (Some(path), _) => GameConfig::load(path)?,
        (None, true) => GameConfig::single_wave(),
        (None, false) => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
    }
    Ok(config)
}

// ── Input translation ─────────────────────────────────────────────────────────

fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

/// Turns raw terminal events into engine events, synthesising key releases
/// on terminals that never report them.
struct InputMapper {
    release_events: bool,
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<Key, u64>,
}

impl InputMapper {
    fn translate(&mut self, ev: Event, view: &mut Viewport, frame: u64, out: &mut Vec<InputEvent>) {
        match ev {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                let quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                if quit && kind != KeyEventKind::Release {
                    out.push(InputEvent::Quit);
                    return;
                }
                let Some(key) = game_key(code) else {
                    return;
                };
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        self.key_frame.insert(key, frame);
                        out.push(InputEvent::KeyDown(key));
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&key);
                        out.push(InputEvent::KeyUp(key));
                    }
                }
            }
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), column, row, .. }) => {
                out.push(InputEvent::PointerDown(view.to_field(column, row)));
            }
            Event::Resize(cols, rows) => {
                *view = Viewport::new(cols, rows, view.field_width, view.field_height);
            }
            _ => {}
        }
    }

    /// Release keys whose repeats have gone quiet.
    fn expire(&mut self, frame: u64, out: &mut Vec<InputEvent>) {
        if self.release_events {
            return;
        }
        self.key_frame.retain(|key, last| {
            let live = frame.saturating_sub(*last) <= HOLD_WINDOW;
            if !live {
                out.push(InputEvent::KeyUp(*key));
            }
            live
        });
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Poll input, advance, draw; once per frame until quit is requested.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    release_events: bool,
) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / state.config.frame_rate as f64);
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, state.config.width, state.config.height);
    let mut mapper = InputMapper {
        release_events,
        key_frame: HashMap::new(),
    };
    let mut events = Vec::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        events.clear();
        while let Ok(ev) = rx.try_recv() {
            mapper.translate(ev, &mut view, frame, &mut events);
        }
        mapper.expire(frame, &mut events);

        state = tick(&state, &events, rng);
        if state.quit_requested {
            log::info!("Quit requested at score {}", state.score);
            return Ok(());
        }

        display::render(out, &view, &render(&state))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = load_config(&args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = new_game(config, &mut rng).context("invalid game configuration")?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, state, &mut rng, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
