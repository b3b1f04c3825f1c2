use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io,
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;

/// Terminal browser for keys behind a Redis HTTP proxy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/keytui-debug.log (filter with KEYTUI_LOG)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Base URL of the key API (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Bearer token for the key API (overrides config)
    #[arg(long)]
    token: Option<String>,

    /// Pattern used when listing keys from the server (overrides config)
    #[arg(short, long)]
    pattern: Option<String>,
}

mod app;
mod config;
mod handlers;
mod services;
mod ui;
mod utils;

use config::Config;
use keytui::api::{self, KeyApiClient};
use keytui::model::{self, CountdownEvent, FilterSpec, KeyListState, TtlCountdown};
use services::api::{ApiRequest, ApiResponse};

pub struct App {
    pub model: model::Model,

    countdown: TtlCountdown<UnboundedSender<CountdownEvent>>,
    countdown_rx: UnboundedReceiver<CountdownEvent>,
    api_tx: UnboundedSender<ApiRequest>,
    api_rx: UnboundedReceiver<ApiResponse>,

    scan_pattern: String,
    scan_limit: usize,

    /// Key the detail panel and countdown follow
    focused: Option<String>,
    /// Whether a key list fetch is outstanding
    loading: bool,

    ping_interval: Duration,
    last_ping: Instant,
    last_countdown_tick: Instant,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let mut client = KeyApiClient::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        if let Some(token) = &config.token {
            client.set_auth(token.clone(), config.connection_id.clone());
        }

        let filter = FilterSpec {
            ttl_class: config.ttl_class(),
            ..FilterSpec::default()
        };
        let keys = KeyListState::with_settings(filter, config.sort_spec(), config.page_size());
        let model = model::Model::new(keys, client.base_url(), config.vim_mode);

        let (api_tx, api_rx) = services::api::spawn_api_service(client);
        let (countdown_tx, countdown_rx) = mpsc::unbounded_channel();

        Ok(Self {
            model,
            countdown: TtlCountdown::new(countdown_tx),
            countdown_rx,
            api_tx,
            api_rx,
            scan_pattern: config.scan_pattern,
            scan_limit: config.scan_limit,
            focused: None,
            loading: false,
            ping_interval: Duration::from_secs(config.ping_interval_secs.max(1)),
            last_ping: Instant::now(),
            last_countdown_tick: Instant::now(),
        })
    }

    fn send(&self, request: ApiRequest) {
        if self.api_tx.send(request).is_err() {
            tracing::warn!("API service is gone, request dropped");
        }
    }

    fn handle_api_response(&mut self, response: ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    fn handle_countdown_event(&mut self, event: CountdownEvent) {
        handlers::handle_countdown_event(self, event);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        handlers::handle_key(self, key);
    }

    /// Advance the countdown once per wall-clock second
    fn tick_countdown(&mut self) {
        if self.countdown.is_running() && self.last_countdown_tick.elapsed() >= Duration::from_secs(1) {
            self.countdown.tick(api::now_ms());
            self.last_countdown_tick = Instant::now();
        }
    }

    fn ping_if_due(&mut self) {
        if self.last_ping.elapsed() >= self.ping_interval {
            self.send(ApiRequest::Ping);
            self.last_ping = Instant::now();
        }
    }
}

/// Determine the config file path with fallback logic.
/// `Ok(None)` means no config file anywhere, so defaults apply.
fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, it must exist
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/keytui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("keytui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

/// Route tracing output to the debug log file. Without `--debug` no
/// subscriber is installed and every event is discarded.
fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let path = utils::get_debug_log_path();
    let file = File::create(&path).with_context(|| format!("Failed to create debug log at {:?}", path))?;
    let filter = EnvFilter::try_from_env("KEYTUI_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "debug logging enabled");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug)?;

    let mut config = match get_config_path(args.config)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path)?
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(token) = args.token {
        config.token = Some(token);
    }
    if let Some(pattern) = args.pattern {
        config.scan_pattern = pattern;
    }

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    app.reload_keys();
    app.send(ApiRequest::Ping);

    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            app.countdown.stop_all();
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        app.tick_countdown();
        while let Ok(event) = app.countdown_rx.try_recv() {
            app.handle_countdown_event(event);
        }

        app.ping_if_due();

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }

    Ok(())
}
