use std::io::{stdout, Result as IoResult};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::Hide;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocabulary::{Accent, Vocabulary, VocabularyEntry, VocabularyError};

mod engine;
mod player;
mod theme;
mod ui;

use engine::{AdvanceTimer, CardEngine, AUTO_ADVANCE_PERIOD};
use player::Player;
use theme::{ThemeMode, ThemeService};

#[derive(Parser, Debug)]
#[command(name = "oxford-flashcards")]
#[command(about = "Terminal flashcard viewer for the Oxford 5000 word list")]
#[command(version)]
struct Args {
    /// Word list location, a URL or a local JSON file
    #[arg(long, default_value = "data/oxford-5000.json", env = "FLASHCARDS_DATA")]
    data: String,

    /// Accent selected at startup
    #[arg(long, value_enum, default_value = "us")]
    accent: AccentArg,

    /// Seconds between auto-advance steps
    #[arg(long, default_value_t = AUTO_ADVANCE_PERIOD.as_secs(), env = "FLASHCARDS_ADVANCE_SECS")]
    advance_secs: u64,

    /// Theme preference; persisted for future runs
    #[arg(long, value_enum)]
    theme: Option<ThemeModeArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum AccentArg {
    Us,
    Uk,
}

impl From<AccentArg> for Accent {
    fn from(arg: AccentArg) -> Self {
        match arg {
            AccentArg::Us => Accent::Us,
            AccentArg::Uk => Accent::Uk,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ThemeModeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeModeArg> for ThemeMode {
    fn from(arg: ThemeModeArg) -> Self {
        match arg {
            ThemeModeArg::Light => ThemeMode::Light,
            ThemeModeArg::Dark => ThemeMode::Dark,
            ThemeModeArg::System => ThemeMode::System,
        }
    }
}

/// Everything the event loop reacts to arrives over one channel, whether
/// from the input stream, the auto-advance timer or the one-time loader.
pub enum AppEvent {
    Input(KeyEvent),
    Tick,
    Loaded(Result<Vec<VocabularyEntry>, VocabularyError>),
}

pub enum App {
    Loading,
    Failed(String),
    Ready(Session),
}

pub struct Session {
    engine: CardEngine,
    timer: AdvanceTimer,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let themes = ThemeService::new();
    if let Some(mode) = args.theme {
        themes.set(mode.into());
    }

    let mut terminal = setup_terminal().context("failed to initialize the terminal")?;
    let result = run_app(&mut terminal, &args, &themes).await;
    restore_terminal(&mut terminal).context("failed to restore the terminal")?;
    result
}

fn init_tracing() {
    let Some(dirs) = directories::ProjectDirs::from("", "", "oxford-flashcards") else {
        return;
    };
    let log_dir = dirs.data_dir();
    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("oxford-flashcards.log")) else {
        return;
    };
    // The terminal is owned by the card view; logs go to a file instead.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oxford_flashcards=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
}

fn setup_terminal() -> IoResult<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<impl Backend>) -> IoResult<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<impl Backend>,
    args: &Args,
    themes: &ThemeService,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);
    let period = Duration::from_secs(args.advance_secs.max(1));
    let accent: Accent = args.accent.into();

    spawn_input_task(tx.clone());
    spawn_load_task(tx.clone(), args.data.clone());

    let player = Player::new();
    let mut theme_changes = themes.subscribe();
    let mut app = App::Loading;

    loop {
        let palette = ui::Palette::for_variant(themes.variant());
        terminal.draw(|frame| ui::draw(frame, &app, &palette))?;

        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    AppEvent::Loaded(Ok(entries)) => {
                        info!("loaded {} vocabulary entries", entries.len());
                        let mut session = Session {
                            engine: CardEngine::new(entries, accent),
                            timer: AdvanceTimer::stopped(),
                        };
                        session.timer.start(tx.clone(), period);
                        app = App::Ready(session);
                    }
                    AppEvent::Loaded(Err(error)) => {
                        warn!("vocabulary load failed: {error}");
                        app = App::Failed(error.to_string());
                    }
                    AppEvent::Tick => {
                        if let App::Ready(session) = &mut app {
                            // A tick can race a toggle-off; the flag decides.
                            if session.engine.is_auto_advancing() {
                                session.engine.advance_next();
                                debug!("auto-advance -> {}", session.engine.current_index());
                            }
                        }
                    }
                    AppEvent::Input(key) => {
                        if handle_key(key, &mut app, &tx, &player, themes, period, &args.data) {
                            break;
                        }
                    }
                }
            }
            changed = theme_changes.changed() => {
                // Redraw with the new palette on the next loop turn.
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn spawn_input_task(tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Input(key)).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

fn spawn_load_task(tx: mpsc::Sender<AppEvent>, location: String) {
    tokio::spawn(async move {
        let vocabulary = Vocabulary::new();
        let result = vocabulary.load(&location).await;
        // A result arriving after teardown finds no receiver and is dropped.
        let _ = tx.send(AppEvent::Loaded(result)).await;
    });
}

/// Returns true when the app should quit.
fn handle_key(
    key: KeyEvent,
    app: &mut App,
    tx: &mpsc::Sender<AppEvent>,
    player: &Player,
    themes: &ThemeService,
    period: Duration,
    data: &str,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('t') => themes.toggle(),
        code => match app {
            App::Ready(session) => handle_card_key(code, session, tx, player, period),
            App::Failed(_) => {
                if code == KeyCode::Char('r') {
                    *app = App::Loading;
                    spawn_load_task(tx.clone(), data.to_string());
                }
            }
            App::Loading => {}
        },
    }
    false
}

fn handle_card_key(
    code: KeyCode,
    session: &mut Session,
    tx: &mpsc::Sender<AppEvent>,
    player: &Player,
    period: Duration,
) {
    match code {
        KeyCode::Right | KeyCode::Char('n') => session.engine.advance_next(),
        KeyCode::Left | KeyCode::Char('p') => session.engine.advance_previous(),
        KeyCode::Home => session.engine.jump_to(0),
        KeyCode::Char(' ') => {
            if session.engine.toggle_auto_advance() {
                session.timer.start(tx.clone(), period);
            } else {
                session.timer.stop();
            }
            debug_assert_eq!(session.timer.is_running(), session.engine.is_auto_advancing());
        }
        KeyCode::Char('a') => {
            let next = session.engine.accent().other();
            session.engine.set_accent(next);
        }
        KeyCode::Char('s') => {
            if let Some(entry) = session.engine.current_entry() {
                player.speak(entry, session.engine.accent());
            }
        }
        _ => {}
    }
}
