use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use promdash::data::export;
use promdash::{events, ui, App, Dashboard, Poller, PrometheusClient, QueryKind, Settings, Theme};

/// How often the main loop wakes up to poll input and redraw.
const UI_TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "promdash")]
#[command(about = "Terminal dashboard for CPU, memory and disk metrics from a Prometheus endpoint")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Query endpoint URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Refresh interval in seconds (overrides config)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path (overrides config)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run a single refresh, write it to this JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = Some(timeout);
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    settings.validate()?;

    init_logging(&settings)?;
    tracing::info!(endpoint = %settings.endpoint, refresh_secs = settings.refresh_secs, "starting");

    let mut builder = PrometheusClient::builder().endpoint(settings.endpoint.clone());
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }
    if settings.no_proxy {
        builder = builder.no_proxy();
    }
    let dashboard =
        Dashboard::new(Arc::new(builder.build()?)).with_deadline(settings.refresh_interval());

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_once(&rt, &dashboard, &export_path);
    }

    // The poller runs on the runtime while the TUI owns the main thread
    let _guard = rt.enter();
    let (poller, source) = Poller::spawn(dashboard, settings.refresh_interval());
    let app = App::new(
        Box::new(source),
        Theme::from_choice(settings.theme),
        settings.refresh_interval(),
    );

    let result = run_tui(app);

    // Detach: no fetches after the dashboard is gone
    poller.stop();
    tracing::info!("stopped");

    result
}

/// Send logs to a file; the terminal is taken by the TUI.
fn init_logging(settings: &Settings) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(std::sync::Mutex::new(file)))
        .init();

    Ok(())
}

/// Run one tick and write the result as JSON.
fn export_once(rt: &tokio::runtime::Runtime, dashboard: &Dashboard, path: &Path) -> Result<()> {
    let update = rt.block_on(dashboard.refresh());
    let failed: Vec<&str> = update.failed.iter().map(QueryKind::label).collect();

    export::write_to_file(path, &update.snapshot, &update.chart, &failed)?;

    println!("Exported dashboard state to: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits.
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Pick up the newest finished tick, if any
        app.reload_data()?;

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(UI_TICK)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
