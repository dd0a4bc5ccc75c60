//! Maps terminal keyboard events to simulated touch, mouse and pan input.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::AppState;

/// Pointer movement step size in pixels per arrow key press.
const MOVE_STEP: i16 = 20;

/// Pan movement step size in pixels per key press.
const PAN_STEP: i16 = 4;

/// Handle a terminal key event.
///
/// Returns `true` if the app should quit.
pub fn handle_key(key: KeyEvent, app: &mut AppState) -> bool {
    // Quit on 'q'
    if key.code == KeyCode::Char('q') && key.modifiers.is_empty() {
        return true;
    }

    match key.code {
        KeyCode::Left => app.move_by(-MOVE_STEP, 0),
        KeyCode::Right => app.move_by(MOVE_STEP, 0),
        KeyCode::Up => app.move_by(0, -MOVE_STEP),
        KeyCode::Down => app.move_by(0, MOVE_STEP),

        KeyCode::Char(' ') => app.toggle_finger(),
        KeyCode::Char('c') => app.mouse_click(),
        KeyCode::Char('r') => app.host_reposition(),

        KeyCode::Char('p') => app.paint(),
        KeyCode::Char('a') => {
            app.auto_tick = !app.auto_tick;
            app.log(format!("auto paint {}", if app.auto_tick { "on" } else { "off" }));
        }

        KeyCode::Char('g') => app.pan_begin(),
        KeyCode::Char('j') => app.pan_by(PAN_STEP),
        KeyCode::Char('k') => app.pan_by(-PAN_STEP),
        KeyCode::Char('e') => app.pan_end(),

        KeyCode::Char('x') => app.teardown(),

        _ => {}
    }

    false
}
