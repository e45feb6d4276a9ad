//! Interactive terminal UI for the activity board
//!
//! Shows the activity cards next to a signup form, with a feedback banner
//! underneath. All requests are awaited inline: the loop reads one key,
//! runs whatever it triggers to completion, then redraws.

pub mod app;
pub mod events;
pub mod form;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::EventHandler;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use crate::api::HttpActivityApi;
use crate::board::Board;
use crate::config::Config;
use crate::error::{BoardError, Result};

/// Run the interactive UI application
pub async fn run_interactive(config: &Config) -> Result<()> {
    let api = HttpActivityApi::new(config.base_url.clone())?;
    let base_url = api.base_url().to_string();
    let mut app = App::new(Board::new(Arc::new(api)), base_url);

    enable_raw_mode().map_err(|e| terminal_error("enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| terminal_error("enter alternate screen", e))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| terminal_error("create terminal", e))?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode().map_err(|e| terminal_error("disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| terminal_error("leave alternate screen", e))?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "interactive session ended with an error");
    }
    res
}

fn terminal_error(action: &str, err: io::Error) -> BoardError {
    BoardError::Terminal(format!("Failed to {}: {}", action, err))
}

/// Main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let event_handler = EventHandler::new();

    // Show the loading state, then fetch
    terminal.draw(|f| ui::draw(f, app))?;
    app.refresh().await;

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(event) = event_handler.next()? {
            if !app.handle_event(event).await {
                break;
            }
        }
    }

    Ok(())
}
