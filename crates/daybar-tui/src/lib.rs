//! daybar-tui: Terminal front-end for the daybar day editor
//!
//! This crate provides the interactive layer over `daybar-engine`, including:
//! - The day bar with draggable marker handles
//! - The rows table with inline editing
//! - Row-number clicks (single toggles lunch, double toggles the flag)
//! - Clipboard export

mod app;
mod clipboard;
mod event;
pub mod layout;
pub mod text;
pub mod theme;
mod ui;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use app::{App, Focus, MessageLevel, StatusMessage};
pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard};
pub use daybar_engine;
pub use event::{key_to_action, Action};
pub use layout::{AppLayout, BarGeometry};

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{self as term_event, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use daybar_engine::{Config, TimelineError};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

/// Upper bound on how long one poll waits for input (~60fps).
const FRAME: Duration = Duration::from_millis(16);

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Errors that end the TUI.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Terminal setup, drawing, or input failed.
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    /// The configured model could not be built.
    #[error("invalid timeline: {0}")]
    Model(#[from] TimelineError),
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit (including on error).
pub fn run_tui(config: &Config) -> Result<(), TuiError> {
    let mut app = App::from_config(config)?;

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(markers = app.model.len(), "Starting TUI");
    run_loop(&mut terminal, &mut app)?;

    terminal.show_cursor()?;
    info!("TUI exited");
    Ok(())
}

/// Draw and dispatch events until the app asks to quit.
pub fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    if let Ok(size) = terminal.size() {
        app.handle_resize(size.width, size.height);
    }

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            ui::render(app, area, frame.buffer_mut());
        })?;

        // Wake up in time for a pending single click.
        let timeout = app
            .next_deadline(Instant::now())
            .map_or(FRAME, |remaining| remaining.min(FRAME));

        if term_event::poll(timeout)? {
            match term_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                Event::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_app};
    use ratatui::backend::TestBackend;

    #[test]
    fn test_reexports_engine() {
        assert!(!daybar_engine::engine_version().is_empty());
    }

    #[test]
    fn test_draw_with_test_backend() {
        let (app, _) = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ui::render(&app, area, frame.buffer_mut());
            })
            .unwrap();
        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("Rows (2)"));
    }

    #[test]
    fn test_from_config_rejects_bad_seed() {
        let config = Config {
            seed_positions: vec![10.0],
            ..Config::default()
        };
        assert!(matches!(
            App::from_config(&config),
            Err(TimelineError::InvalidSeedCount(1))
        ));
    }
}
