//! ==============================================================================
//! main.rs - vitals-dash entry point
//! ==============================================================================
//!
//! purpose:
//!     terminal dashboard for a wearable health feed. polls the readings
//!     endpoint every 2 seconds and shows heart rate / hrv over time, stress
//!     and temperature rings, and a table of the recent readings.
//!
//! responsibilities:
//!     - parse cli flags, load dashboard.toml, start file logging
//!     - pick the reading source (http endpoint or --demo simulator)
//!     - spawn the poller on a tokio runtime
//!     - own the terminal: raw mode, alternate screen, restore on exit/panic
//!     - run the frame loop: drain outcomes, draw, read keys
//!
//! architecture:
//!
//!     ┌──────────────────────── tokio runtime ────────────────────────┐
//!     │  ┌─────────────┐   GET /api/data   ┌───────────────────────┐  │
//!     │  │  poller     │ ────────────────> │ health endpoint (ext) │  │
//!     │  │  (2s cycle) │ <──────────────── │  or simulated source  │  │
//!     │  └──────┬──────┘                   └───────────────────────┘  │
//!     └─────────┼──────────────────────────────────▲──────────────────┘
//!               │ PollOutcome { seq, result }      │ PollCommand
//!               ▼                                  │ (refresh/shutdown)
//!     ┌──────────────────── main thread ───────────┴──────────────────┐
//!     │  frame loop -> Dashboard::apply -> ui::draw -> events         │
//!     └───────────────────────────────────────────────────────────────┘
//!
//! ==============================================================================

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError};

use vitals_dash::config::DashConfig;
use vitals_dash::events::{apply_event, poll_event, InputEvent};
use vitals_dash::report::build_report;
use vitals_dash::{
    telemetry, ui, Dashboard, HttpSource, PollCommand, PollOutcome, Poller, ReadingSource,
    SimulatedSource,
};

/// redraw cadence; also the key polling timeout
const FRAME_RATE: Duration = Duration::from_millis(50);

const OUTCOME_BUFFER: usize = 8;
const COMMAND_BUFFER: usize = 4;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser)]
#[command(name = "vitals-dash")]
#[command(about = "Terminal dashboard for a wearable health endpoint", long_about = None)]
struct Cli {
    /// config file (default: config/dashboard.toml, ../config/dashboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// override endpoint.base_url
    #[arg(long)]
    url: Option<String>,

    /// use the built-in simulated wearable instead of http
    #[arg(long)]
    demo: bool,

    /// fetch one batch, print it, and exit
    #[arg(long)]
    once: bool,

    /// more log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ==============================================================================
// main entry point
// ==============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // step 1: load configuration
    let (config, notes) = match &cli.config {
        Some(path) => (
            DashConfig::load(path)?,
            vec![format!("loaded config from {}", path.display())],
        ),
        None => DashConfig::load_or_default(),
    };
    let config = config.with_base_url(cli.url.clone())?;

    // step 2: logging (to file, the terminal is ours)
    telemetry::init(&config.logging, cli.verbose)?;
    for note in &notes {
        tracing::info!("{}", note);
    }
    config.log_summary();

    // step 3: runtime and reading source
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let source: Box<dyn ReadingSource> = if cli.demo {
        Box::new(SimulatedSource::starting_now())
    } else {
        Box::new(HttpSource::new(&config.endpoint)?)
    };

    if cli.once {
        return run_once(&runtime, source.as_ref());
    }

    // step 4: start the poller in background
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<PollOutcome>(OUTCOME_BUFFER);
    let (command_tx, command_rx) = mpsc::channel::<PollCommand>(COMMAND_BUFFER);
    let mut dash = Dashboard::new(source.describe());
    let poll_task = runtime.spawn(Poller::new(source, outcome_tx, command_rx).run());

    // step 5: take over the terminal and run the frame loop
    install_panic_hook();
    let mut terminal = setup_terminal().context("failed to initialise terminal")?;
    let result = run_frames(&mut terminal, &mut dash, &mut outcome_rx, &command_tx);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;

    // step 6: stop polling, cancelling any request still in flight
    poll_task.abort();
    runtime.shutdown_timeout(Duration::from_millis(500));
    tracing::info!("dashboard closed");

    result
}

fn run_once(runtime: &Runtime, source: &dyn ReadingSource) -> Result<()> {
    let batch = runtime
        .block_on(source.fetch())
        .with_context(|| format!("fetch from {} failed", source.describe()))?;
    print!("{}", build_report(&source.describe(), &batch));
    Ok(())
}

// ==============================================================================
// frame loop
// ==============================================================================

fn run_frames(
    terminal: &mut Term,
    dash: &mut Dashboard,
    outcomes: &mut mpsc::Receiver<PollOutcome>,
    commands: &mpsc::Sender<PollCommand>,
) -> Result<()> {
    loop {
        loop {
            match outcomes.try_recv() {
                Ok(outcome) => {
                    let seq = outcome.seq;
                    let applied = dash.apply(outcome, Instant::now());
                    tracing::trace!(seq, ?applied, "outcome applied");
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("poller stopped unexpectedly"),
            }
        }

        terminal.draw(|f| ui::draw(f, dash, Instant::now()))?;

        let event = poll_event(FRAME_RATE);
        if event == InputEvent::Refresh && commands.try_send(PollCommand::Refresh).is_err() {
            tracing::debug!("refresh already pending");
        }
        apply_event(dash, event);

        if dash.should_quit {
            return Ok(());
        }
    }
}

// ==============================================================================
// terminal lifecycle
// ==============================================================================

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// put the terminal back before the panic message prints
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
