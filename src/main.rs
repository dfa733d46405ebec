mod app;
mod board;
mod domain;
mod input;
mod persistence;
mod report;
mod sync;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use board::{DailyList, WorkTimer};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_day, Change, Clock, SystemClock};
use persistence::{
    config_file, ensure_data_dir, init_local_data_dir, load_config, log_file, save_config,
    AppConfig, FileStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "DAYSTOCK_LOG";

#[derive(Parser)]
#[command(name = "daystock")]
#[command(about = "A terminal dashboard for today's todos, a stock backlog and a work timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .daystock directory in the current directory
    Init,
    /// Add a task to today's list
    Add {
        /// Task label
        #[arg(required = true)]
        label: Vec<String>,
    },
    /// Print the completion log
    Log {
        /// Date to print (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Also write the log to this file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Drive the work timer
    Timer {
        #[arg(value_enum)]
        action: TimerAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimerAction {
    Start,
    Stop,
    Reset,
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_data_dir()?;
        prepare_data_dir(&dir)?;
        println!("Initialized daystock directory: {}", dir.display());
        println!();
        println!("daystock will now use this local directory for its lists and timer.");
        println!("Run 'daystock' to open the dashboard.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    init_tracing(&data_dir)?;
    let config = load_app_config(&data_dir);
    let mut store = FileStore::new(&data_dir);
    let clock = SystemClock;

    match cli.command {
        Some(Commands::Add { label }) => {
            let text = label.join(" ");
            let mut daily = DailyList::init(&store, &config.keys);
            let change = daily.add(&mut store, &clock, &text)?;
            match change {
                Change::Unchanged => println!("Nothing to add"),
                _ => println!("Added to today: {}", text.trim()),
            }
            Ok(())
        }
        Some(Commands::Log { date, output }) => {
            let day = match date {
                Some(date_str) => chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map(format_day)
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
                None => clock.today(),
            };
            let log = report::generate_report(&store, &config.keys, &day);
            print!("{}", log);
            if let Some(path) = output.map(PathBuf::from) {
                report::write_report(&path, &log)?;
                eprintln!("Log written: {}", path.display());
            }
            Ok(())
        }
        Some(Commands::Timer { action }) => {
            let mut timer = WorkTimer::init(&store, &config.keys.timer, config.refresh_interval());
            match action {
                TimerAction::Start => {
                    timer.start(&mut store, &clock)?;
                }
                TimerAction::Stop => {
                    timer.stop(&mut store, &clock)?;
                }
                TimerAction::Reset => {
                    timer.reset(&mut store)?;
                }
                TimerAction::Show => {}
            }
            let state = if timer.is_running() { "running" } else { "stopped" };
            println!("{} ({})", timer.display(&clock), state);
            Ok(())
        }
        Some(Commands::Init) => Ok(()),
        None => run_tui(store, config),
    }
}

/// Start logging into a freshly created data directory and write its
/// default config
fn prepare_data_dir(dir: &Path) -> Result<()> {
    init_tracing(dir)?;
    save_config(config_file(dir), &AppConfig::default())?;
    info!(dir = %dir.display(), "initialized data directory");
    Ok(())
}

/// Route tracing output to the log file in the data directory; the terminal
/// belongs to the dashboard.
fn init_tracing(data_dir: &Path) -> Result<()> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Load config.json, falling back to defaults when it can't be used
fn load_app_config(data_dir: &Path) -> AppConfig {
    match load_config(config_file(data_dir)) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "using default config");
            AppConfig::default()
        }
    }
}

fn run_tui(store: FileStore, config: AppConfig) -> Result<()> {
    info!(dir = %store.dir().display(), "starting dashboard");
    eprintln!("Using daystock directory: {}", store.dir().display());

    let mut app = AppState::new(Box::new(store), Box::new(SystemClock), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(broadcasts = app.sync.broadcasts(), "dashboard closed");

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input until the next timer refresh is due
        let timeout = app.timer.schedule().poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
