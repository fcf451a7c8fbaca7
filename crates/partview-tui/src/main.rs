//! partview: a terminal browser for a remote customer file directory.
//!
//! This binary initialises logging and the terminal, runs the main event
//! loop, and restores the terminal on exit or panic.

mod app;
mod background;
mod icons;
mod input;
mod render;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use partview_core::config::keymap::Keymap;
use partview_core::config::settings::{Config, LogConfig};
use partview_core::config::theme::Theme;
use partview_core::event::{Command, Event};
use partview_core::remote::http::{FileService, HttpFileService};
use partview_core::CoreError;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::{config_dir, App, AppMode};
use crate::background::Runner;
use crate::input::{handle_key, InputAction, InputState};
use crate::render::render;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Initialises tracing. Logs go to a file to avoid terminal interference.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .with_context(|| format!("failed to open log file {}", log.file.display()))?;
    let filter = EnvFilter::try_new(&log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Config files are optional; a missing file silently means defaults.
fn load_or_default<T: Default>(name: &str, result: Result<T, CoreError>) -> T {
    match result {
        Ok(value) => value,
        Err(CoreError::NotFound(_)) => T::default(),
        Err(e) => {
            tracing::warn!("ignoring {name}: {e}");
            T::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg_dir = config_dir();
    let config_result = Config::load(&cfg_dir.join("default.toml"));
    let log_config = config_result
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log_config)?;

    let mut config = load_or_default("default.toml", config_result);
    let keymap = load_or_default("keymap.toml", Keymap::load(&cfg_dir.join("keymap.toml")));
    let theme = load_or_default("theme.toml", Theme::load(&cfg_dir.join("theme.toml")));

    // An optional first argument overrides the backend URL
    if let Some(base_url) = std::env::args().nth(1) {
        config.backend.base_url = base_url;
    }
    let service: Arc<dyn FileService> = Arc::new(
        HttpFileService::new(&config.backend.base_url)
            .with_context(|| format!("cannot use backend {}", config.backend.base_url))?,
    );
    tracing::info!(backend = %config.backend.base_url, "starting partview");

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, App::new(config, keymap, theme), service).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    service: Arc<dyn FileService>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut runner = Runner::new(service, tx, app.config().download.directory.clone());
    let mut app = app;
    let mut input_state = InputState::new();

    runner.run(Command::FetchDirectory);

    loop {
        // 1. Drain background results
        while let Ok(event) = rx.try_recv() {
            app = app.handle_event(event);
        }

        // 2. Render
        terminal.draw(|f| render(f, &app, &input_state))?;

        if app.should_quit() {
            break;
        }

        // 3. Poll for crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let (action, new_input_state) =
                    handle_key(key, app.mode(), &input_state, app.keymap());
                input_state = new_input_state;

                app = match action {
                    InputAction::Action(action) => {
                        let (next, command) = app.with_clear_status().dispatch(action);
                        if let Some(command) = command {
                            runner.run(command);
                        }
                        next
                    }
                    InputAction::Dismiss => app.with_mode(AppMode::Normal),
                    InputAction::None => app,
                };
            }
        }
    }

    runner.abort_preview();

    Ok(())
}
