mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::PredictionClient;
use error::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::components::ResultDialog;
use ui::screens::PredictionFormScreen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(cli.verbose, false);
            Config::setup_interactive().context("Setup failed")?;
            return Ok(());
        }
        Some(Commands::Check) => {
            init_logging(cli.verbose, false);
            let config = load_config(&cli)?;
            return run_check(config).await;
        }
        None => init_logging(cli.verbose, true),
    }

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `cropyield init` to create a configuration file");
            std::process::exit(1);
        }
    };

    let client = Arc::new(
        PredictionClient::new(config.prediction.clone())
            .context("Failed to create prediction client")?,
    );

    let mut app = App::new(&config);
    app.set_status(&format!("Prediction service: {}", client.endpoint()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Any prediction still in flight is discarded along with the app
    drop(app);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr for one-shot commands. While the TUI owns the terminal
/// they go to a file in the data directory instead.
fn init_logging(verbose: u8, to_file: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = if to_file {
        Config::log_path()
            .ok()
            .and_then(|path| {
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .ok()
            })
    } else {
        None
    };

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None if to_file => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.clone())?;
    if let Some(endpoint) = &cli.endpoint {
        config.prediction.endpoint = endpoint.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run_check(config: Config) -> anyhow::Result<()> {
    println!("Configuration OK");
    println!("  Endpoint: {}", config.prediction.endpoint);
    println!("  Timeout:  {}s", config.prediction.timeout_secs);
    println!(
        "  Defaults: {} / {}",
        config.form.initial_crop(),
        config.form.initial_month()
    );

    let client = PredictionClient::new(config.prediction)?;
    match client.test_connection().await {
        Ok(true) => {
            println!("Prediction service: OK");
            Ok(())
        }
        Ok(false) => anyhow::bail!("Prediction service: responded with an error status"),
        Err(e) => anyhow::bail!("Prediction service: OFFLINE ({})", e),
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &Arc<PredictionClient>,
) -> Result<()> {
    loop {
        app.poll_outcomes();

        terminal.draw(|f| {
            let area = f.area();

            let screen = PredictionFormScreen::new(app.form.state())
                .with_focus(app.focused_field)
                .with_status(app.status_message.as_deref());
            f.render_widget(screen, area);

            if app.show_result {
                if let Some((headline, body)) = app.result_text() {
                    let dialog = ResultDialog::new("Crop Yield Prediction Result", headline, body);
                    f.render_widget(dialog, area);
                }
            }
        })?;

        // Poll with a timeout so outcomes are picked up while idle
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_input(app, client, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_input(
    app: &mut App,
    client: &Arc<PredictionClient>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.show_result {
        match code {
            KeyCode::Esc | KeyCode::Enter => app.close_result(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Up | KeyCode::BackTab => app.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.next_field(),
        KeyCode::Left => app.cycle_select(false),
        KeyCode::Right => app.cycle_select(true),
        KeyCode::Enter => app.submit(client),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => {
            app.input_char(c);
        }
        _ => {}
    }
}
