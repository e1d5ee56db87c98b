//! thinkchat Entry Point
//!
//! Launches the terminal chat client, or runs headless over stdin.
//!
//! Usage:
//!   thinkchat [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>     Configuration file
//!   -e, --endpoint <URL>    Chat endpoint
//!   -l, --locale <CODE>     UI language (ja, en)
//!       --timeout <SECS>    Request timeout, 0 for none
//!       --log-file <PATH>   Log file for interactive sessions
//!       --headless          Read one message per stdin line, print HTML

use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thinkchat_core::{
    default_config_path, default_log_path, load_config_from_path, ChatConfig, ConfigOverrides,
    HttpTransport, Locale, MarkupSurface, TurnCoordinator,
};
use thinkchat_tui::coordinator_client::CoordinatorClient;
use thinkchat_tui::headless::run_headless;
use thinkchat_tui::App;

/// thinkchat - chat client with a live thinking trace
#[derive(Parser, Debug)]
#[command(name = "thinkchat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "THINKCHAT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chat endpoint URL
    #[arg(short = 'e', long, value_name = "URL")]
    endpoint: Option<String>,

    /// UI language (ja, en)
    #[arg(short = 'l', long, value_name = "CODE")]
    locale: Option<Locale>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log file for interactive sessions
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Read one message per stdin line and print the final chat as HTML
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = load_settings(&args).context("Failed to load configuration")?;
    let transport = HttpTransport::new(&config.endpoint, config.request_timeout())
        .context("Failed to build HTTP client")?;

    tracing::info!(
        endpoint = transport.endpoint(),
        locale = %config.locale,
        source = %config.source(),
        "Starting thinkchat"
    );

    if args.headless {
        return headless(transport, &config).await;
    }

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: thinkchat requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        eprintln!();
        eprintln!("To script a session instead: thinkchat --headless < messages.txt");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let client = CoordinatorClient::spawn(transport, &config);
    let mut app = App::new(client, config.locale.strings());
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Defaults, config file, environment, then command-line flags
fn load_settings(args: &Args) -> anyhow::Result<ChatConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path.as_deref())?;

    let mut overrides = ConfigOverrides::new();
    if let Some(endpoint) = &args.endpoint {
        overrides = overrides.with_endpoint(endpoint.clone());
    }
    if let Some(locale) = args.locale {
        overrides = overrides.with_locale(locale);
    }
    if let Some(secs) = args.timeout {
        overrides = overrides.with_request_timeout_secs(secs);
    }
    overrides.apply(&mut config)?;

    Ok(config)
}

async fn headless(transport: HttpTransport, config: &ChatConfig) -> anyhow::Result<()> {
    let surface = MarkupSurface::new(config.locale.strings());
    let mut coordinator = TurnCoordinator::new(transport, surface, config);

    let outcomes = run_headless(&mut coordinator, BufReader::new(tokio::io::stdin()))
        .await
        .context("Failed to read messages from stdin")?;
    tracing::info!(turns = outcomes.len(), "Headless session finished");

    print!("{}", coordinator.surface().to_html());
    Ok(())
}

/// Headless logs go to stderr; interactive logs go to a file so they never
/// draw over the UI
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if args.headless {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .with(filter)
            .init();
        return;
    }

    let file = args
        .log_file
        .clone()
        .or_else(default_log_path)
        .and_then(|path| open_log_file(&path).ok());
    let layer = file.map(|file| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Arc::new(file))
    });

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
