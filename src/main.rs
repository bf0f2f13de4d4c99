//! Roadmap TUI - scroll-driven product roadmap for the terminal
//!
//! Scrolling through the roadmap section advances a vertical phase
//! timeline and swaps the summary and detail cards for the active phase.

mod app;
mod cards;
mod catalog;
mod config;
mod controller;
mod motion;
mod theme;
mod timeline;
mod ui;
mod viewport;

use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Cli, Config};

/// How long the input worker blocks waiting for an event
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    let config = Config::try_from(Cli::parse())?;
    init_tracing(&config)?;

    run_tui(config).await
}

/// Send tracing output to the log file, if one was requested.
///
/// Writing to stdout would corrupt the alternate screen.
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install tracing subscriber")
}

/// Run the TUI application
async fn run_tui(config: Config) -> Result<()> {
    // Size first so nothing fails between entering and leaving raw mode
    let (width, height) = terminal::size().context("Failed to read terminal size")?;
    let mut terminal = setup_terminal()?;

    // Input events arrive from a blocking worker
    let (input_tx, mut input_rx) = mpsc::channel::<Event>(64);
    let input_task = tokio::task::spawn_blocking(move || run_input_worker(input_tx));

    let mut app = App::new(&config, ui::document_viewport_height(Rect::new(0, 0, width, height)));
    tracing::info!(
        width,
        height,
        policy = config.controller.bucket_policy.name(),
        "roadmap started"
    );

    // Main event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut input_rx, config.tick_rate).await;

    // Cleanup
    app.unmount();
    drop(input_rx);
    let restored = restore_terminal(&mut terminal);

    // The worker notices the closed channel on its next poll
    let result = merge_worker_result(result, input_task.await);
    tracing::info!("roadmap stopped");

    result.and(restored)
}

/// Enter raw mode and the alternate screen, undoing both if a later step fails
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        leave_terminal(&mut stdout).ok();
        return Err(e).context("Failed to enter alternate screen");
    }

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            leave_terminal(io::stdout()).ok();
            Err(e).context("Failed to create terminal")
        }
    }
}

/// Leave raw mode, the alternate screen and mouse capture
fn leave_terminal<W: io::Write>(mut out: W) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    leave_terminal(terminal.backend_mut())?;
    terminal.show_cursor().context("Failed to show cursor")
}

/// Combine the event loop outcome with the input worker's.
///
/// A loop that ended because the worker stopped reports the worker's error.
fn merge_worker_result(session: Result<()>, worker: Result<Result<()>, JoinError>) -> Result<()> {
    let worker = worker.context("Input worker panicked").and_then(|r| r);
    match (session, worker) {
        (Err(e), Err(worker_err)) => {
            tracing::warn!(error = %worker_err, "input worker failed");
            Err(e)
        }
        (session, worker) => session.and(worker),
    }
}

/// Poll crossterm for events and forward them until the receiver is gone
fn run_input_worker(tx: mpsc::Sender<Event>) -> Result<()> {
    while !tx.is_closed() {
        if event::poll(INPUT_POLL).context("Failed to poll input")? {
            let event = event::read().context("Failed to read input")?;
            if tx.blocking_send(event).is_err() {
                break;
            }
        }
    }
    Ok(())
}

/// Run the main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    input_rx: &mut mpsc::Receiver<Event>,
    tick_rate: Duration,
) -> Result<()> {
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                app.tick();
                terminal.draw(|frame| ui::render(frame, app))?;
            }
            event = input_rx.recv() => {
                match event {
                    // Only handle key press events (not release)
                    Some(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
                    Some(Event::Resize(width, height)) => {
                        app.handle_resize(ui::document_viewport_height(Rect::new(0, 0, width, height)));
                    }
                    Some(_) => {}
                    None => {
                        tracing::warn!("input worker stopped");
                        break;
                    }
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_error_surfaces_after_clean_loop_exit() {
        let result = merge_worker_result(Ok(()), Ok(Err(anyhow!("poll failed"))));
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("poll failed"));
    }

    #[test]
    fn test_loop_error_takes_precedence() {
        let result = merge_worker_result(Err(anyhow!("draw failed")), Ok(Err(anyhow!("poll failed"))));
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_clean_shutdown_is_ok() {
        assert!(merge_worker_result(Ok(()), Ok(Ok(()))).is_ok());
    }

    #[tokio::test]
    async fn test_worker_panic_surfaces() {
        let joined = tokio::task::spawn_blocking(|| -> Result<()> { panic!("worker exploded") }).await;
        let err = merge_worker_result(Ok(()), joined).unwrap_err();
        assert!(err.to_string().contains("Input worker panicked"));
    }

    #[test]
    fn test_leave_terminal_emits_restore_sequences() {
        let mut out = Vec::new();
        leave_terminal(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?1000l"));
    }

    #[test]
    fn test_tracing_disabled_without_log_file() {
        assert!(init_tracing(&Config::default()).is_ok());
    }

    #[test]
    fn test_tracing_reports_unwritable_log_file() {
        let config = Config {
            log_file: Some(std::env::temp_dir().join("roadmap-tui-missing-dir").join("roadmap.log")),
            ..Config::default()
        };
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
