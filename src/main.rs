use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use chrono::{Local, NaiveDate};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use fitpro::{
    app::App,
    app_dirs::AppDirs,
    runtime::{CrosstermEventSource, EventSource, FitEvent, FrameTicker, Runner, Ticker},
    storage::{DataDir, PROGRESS_FILE},
    ui::{self, RenderContext},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// terminal fitness trainer with countdown sessions, streaks and animated feedback
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// directory holding settings.json, workout_programs.json and progress.json
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// log filter written to the log file (RUST_LOG takes precedence)
    #[clap(long, default_value = "info")]
    log_level: String,

    /// milliseconds between animation frames
    #[clap(long, default_value_t = 50)]
    frame_ms: u64,

    /// restore progress.json to its empty default before starting
    #[clap(long)]
    reset_progress: bool,
}

impl Cli {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(AppDirs::data_dir)
    }
}

/// Route tracing output to a file; the terminal belongs to the UI.
/// The returned guard flushes pending lines when dropped.
fn init_logging(level: &str) -> Result<WorkerGuard, Box<dyn Error>> {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _guard = init_logging(&cli.log_level)?;

    let data = DataDir::new(cli.data_dir());
    data.seed_defaults()?;
    if cli.reset_progress {
        data.restore_default(PROGRESS_FILE)?;
        warn!("progress reset to defaults");
    }

    let mut app = App::load(data);
    let runner = Runner::new(CrosstermEventSource::new(), FrameTicker::from_millis(cli.frame_ms));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(completed = app.timer_completions, "exiting");
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    while !app.should_quit {
        let ctx = RenderContext {
            now: Instant::now(),
            today: today(),
        };
        terminal.draw(|f| ui::draw(app, &ctx, f))?;

        match runner.step() {
            FitEvent::Key(key) => app.handle_key(key, Instant::now(), today()),
            FitEvent::Resize => {
                let size = terminal.size()?;
                app.set_viewport(size.width, size.height);
            }
            FitEvent::Frame => app.on_frame(Instant::now(), today()),
        }
    }

    Ok(())
}
