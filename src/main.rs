mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, terminal, ExecutableCommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use space_shooter::audio::{self, AudioEvent, AudioSink};
use space_shooter::constants::TICKS_PER_SECOND;
use space_shooter::{ControlState, GameConfig, GameSession};

const FRAME: Duration = Duration::from_micros(1_000_000 / TICKS_PER_SECOND as u64);

const CONFIG_ENV_VAR: &str = "SPACE_SHOOTER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "space_shooter.toml";
const LOG_FILE: &str = "space_shooter.log";

/// Frames a key stays "down" after its last press or repeat. Many terminals
/// never report releases, and OS auto-repeat (15 Hz or faster) refreshes a
/// held key well inside 8 frames.
const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];
const RESTART_KEYS: [KeyCode; 2] = [KeyCode::Char('r'), KeyCode::Char('R')];

// ── Input ─────────────────────────────────────────────────────────────────────

/// Last frame each key was seen pressed.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    fn any(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.last_seen
                .get(key)
                .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
        })
    }

    fn controls(&self, frame: u64) -> ControlState {
        ControlState {
            move_left: self.any(&LEFT_KEYS, frame),
            move_right: self.any(&RIGHT_KEYS, frame),
            fire: self.any(&FIRE_KEYS, frame),
            restart: self.any(&RESTART_KEYS, frame),
        }
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Blocking reads happen on their own thread so a frame never waits on the
/// terminal.
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

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal has one sound: the bell. Only hits and game over ring it.
struct TerminalBell<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> AudioSink for TerminalBell<'_, W> {
    fn play(&mut self, event: AudioEvent) {
        if matches!(event, AudioEvent::Hit | AudioEvent::GameOver) {
            let _ = self.out.write_all(b"\x07");
        }
    }
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // Release events need the kitty keyboard protocol; without it the
        // hold window covers for them.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    events: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let mut held = HeldKeys::default();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let started = Instant::now();
        frame += 1;

        for ev in events.try_iter() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press if is_quit(code, modifiers) => return Ok(()),
                KeyEventKind::Press | KeyEventKind::Repeat => held.press(code, frame),
                KeyEventKind::Release => held.release(code),
            }
        }

        let now = Instant::now();
        let snapshot = session.tick(held.controls(frame), now - last_tick);
        last_tick = now;

        audio::dispatch(&mut TerminalBell { out: &mut *out }, &snapshot.events);
        let (cols, rows) = terminal::size()?;
        display::render(out, &snapshot, cols, rows)?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Stdout belongs to the game screen, so logs go to a file.
    match File::create(LOG_FILE) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn main() -> io::Result<()> {
    init_tracing();
    let config = GameConfig::load_or_default(&config_path());
    info!(high_score_path = %config.high_score_path.display(), "starting");
    let mut session = GameSession::from_config(config);

    let mut out = BufWriter::new(stdout());
    let result = {
        let _guard = TerminalGuard::enter(&mut out)?;
        let events = spawn_input_reader();
        run(&mut out, &mut session, &events)
    };

    if let Err(error) = &result {
        warn!(error = %error, "game_loop_failed");
    }
    info!(
        score = session.score(),
        high_score = session.high_score(),
        "exiting"
    );
    result
}
