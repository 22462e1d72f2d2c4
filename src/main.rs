use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use storm_arena::config::{GameConfig, GameOverAction, Preset};
use storm_arena::display::{self, canvas_size, SpriteSet};
use storm_arena::input::InputSampler;
use storm_arena::session::Session;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser)]
#[command(name = "storm_arena")]
#[command(about = "Top-down arena shooter for the terminal")]
struct Cli {
    /// Rule set to play; shows a menu when neither this nor --config is given
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// JSON config file (missing fields come from its `preset`, storm if unset)
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,
    /// Text-art sprite for the player
    #[arg(long)]
    player_sprite: Option<PathBuf>,
    /// Text-art sprite for enemies
    #[arg(long)]
    enemy_sprite: Option<PathBuf>,
    /// Write logs here (stdout is the game screen); filter with RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Seed for a reproducible spawn sequence
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<Preset>> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "☢  STORM  ARENA  ☢";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select rules:"))?;

    let colors = [Color::Red, Color::Green, Color::Yellow];
    for (i, (preset, color)) in Preset::ALL.iter().zip(colors).enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<8}", preset.as_str())))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" {}", preset.description())))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("W A S D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char('1') => return Ok(Some(Preset::Storm)),
                KeyCode::Char('2') => return Ok(Some(Preset::Arena)),
                KeyCode::Char('3') => return Ok(Some(Preset::Classic)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(None),
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(None),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Runs until the player quits.
///
/// While the session is live every frame samples held keys, advances the
/// session and redraws.  After game over the last frame stays on screen;
/// with `GameOverAction::Reload` a fresh key press starts a new session.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    sprites: &SpriteSet,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut sampler = InputSampler::new();
    let mut frame: u64 = 0;
    let started = Instant::now();
    let mut last_ms: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut resized = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                        return Ok(());
                    }
                    if session.is_over() {
                        if sampler.acknowledges(code, kind, frame)
                            && session.state().config.on_game_over == GameOverAction::Reload
                        {
                            session.restart();
                            sampler.clear();
                        }
                        continue;
                    }
                    sampler.handle_key(code, kind, frame);
                }
                Event::Resize(cols, rows) => {
                    let (w, h) = canvas_size(cols, rows);
                    session.resize(w, h);
                    resized = true;
                }
                _ => {}
            }
        }

        let now_ms = started.elapsed().as_millis() as u64;
        let dt_ms = now_ms - last_ms;
        last_ms = now_ms;

        let input = sampler.sample(frame);
        if session.advance(&input, dt_ms, rng).needs_redraw(resized) {
            display::render(out, session.state(), sprites)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    log::info!("Storm Arena starting...");

    let config = match (&cli.config, cli.preset) {
        (Some(path), _) => Some(GameConfig::load(path)?),
        (None, Some(preset)) => Some(preset.config()),
        (None, None) => None,
    };
    let sprites = SpriteSet::load(cli.player_sprite.as_deref(), cli.enemy_sprite.as_deref());
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, config, &sprites, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    config: Option<GameConfig>,
    sprites: &SpriteSet,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let config = match config {
        Some(config) => config,
        None => match show_menu(out, rx)? {
            Some(preset) => preset.config(),
            None => return Ok(()),
        },
    };
    log::info!("Playing preset {}", config.preset.as_str());

    let (cols, rows) = terminal::size()?;
    let (width, height) = canvas_size(cols, rows);
    let mut session = Session::new(&config, width, height);
    game_loop(out, &mut session, sprites, rx, rng)
}
