mod app;
mod comparison;
mod config;
mod engine;
mod error;
mod fetcher;
mod format;
mod refresh;
mod selection;
mod types;
mod ui;
mod view;

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::TableState, Terminal};
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{App, Command};
use crate::config::{Config, CHANNEL_CAPACITY};
use crate::error::Result;
use crate::refresh::{FetchParams, RefreshEvent, RefreshNow, Refresher};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // The TUI owns stdout, so logs go to a file.
    let log_file = std::fs::File::create(&cfg.log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut app = App::new();

    // --- Channels ---
    let (params_tx, params_rx) = watch::channel(FetchParams {
        currency: app.view.currency,
        page: app.view.page,
    });
    let (trigger_tx, trigger_rx) = mpsc::channel::<RefreshNow>(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel::<RefreshEvent>(CHANNEL_CAPACITY);

    // --- Refresher task (periodic 120s + on-demand, bootstrap fetch included) ---
    let client = fetcher::build_client()?;
    let refresher = Refresher::new(cfg.api_url.clone(), client, params_rx, trigger_rx, event_tx);
    let refresher_handle = tokio::spawn(refresher.run());
    info!(api_url = %cfg.api_url, "refresher started");

    // --- Terminal setup ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &params_tx, &trigger_tx, event_rx).await;

    // Restore terminal regardless of result.
    refresher_handle.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    params_tx: &watch::Sender<FetchParams>,
    trigger_tx: &mpsc::Sender<RefreshNow>,
    mut event_rx: mpsc::Receiver<RefreshEvent>,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(100);
    let mut table_state = TableState::default();

    loop {
        // Apply any fetch outcomes that arrived since the last frame, in
        // arrival order — the last response wins.
        while let Ok(refresh_event) = event_rx.try_recv() {
            app.apply_refresh(refresh_event);
        }

        terminal.draw(|f| ui::render(f, app, &mut table_state))?;

        if !event::poll(poll_timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::PublishParams) => {
                let params = FetchParams {
                    currency: app.view.currency,
                    page: app.view.page,
                };
                // Fails only if the refresher is gone; the next draw still works.
                let _ = params_tx.send(params);
            }
            Some(Command::RefreshNow) => {
                let _ = trigger_tx.try_send(RefreshNow);
            }
            None => {}
        }
    }
}
