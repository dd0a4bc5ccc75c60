//! Visual TUI test harness for traktouch.
//!
//! Runs a real engine against mock cursor and host window backends.
//! The keyboard plays finger, mouse, pan gesture and redraw clock; the screen
//! shows where the finger is, where the host believes the pointer is, the
//! engine state and a live event log.

mod app;
mod input_handler;
mod ui;

use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use traktouch_engine::setup;

use app::AppState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = setup::load_config(config_path.as_deref())?;
    let mut app = AppState::new(config);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    app.log("TUI harness started. Space puts the finger down.".to_string());
    app.log("Arrow keys drag; r makes the host warp the cursor.".to_string());
    app.log("p paints once, a toggles automatic painting.".to_string());

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(AppState::tick_rate())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && input_handler::handle_key(key, &mut app) {
                    break;
                }
            }
        } else {
            app.on_tick();
        }

        if app.quit {
            break;
        }
    }

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
