use crate::app::App;
use crate::state::activity::ActivityFocus;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle activity-status settings input. Without a desktop integration
/// the whole block is inert: every key is swallowed.
pub fn handle_settings_input(key: KeyEvent, app: &mut App) {
    if app.desktop.is_none() {
        return;
    }

    match app.activity.focus {
        ActivityFocus::Detected => handle_detected_input(key, app),
        ActivityFocus::Tracked => handle_tracked_input(key, app),
    }
}

fn handle_detected_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down => {
            if !app.activity.detected.is_empty() {
                let current = app.activity.detected_list_state.selected().unwrap_or(0);
                let next = (current + 1) % app.activity.detected.len();
                app.activity.detected_list_state.select(Some(next));
            }
        }
        KeyCode::Up => {
            if !app.activity.detected.is_empty() {
                let current = app.activity.detected_list_state.selected().unwrap_or(0);
                let next =
                    (current + app.activity.detected.len() - 1) % app.activity.detected.len();
                app.activity.detected_list_state.select(Some(next));
            }
        }
        KeyCode::Enter => {
            let program = app
                .activity
                .detected_list_state
                .selected()
                .and_then(|idx| app.activity.detected.get(idx).cloned());
            if let Some(program) = program {
                app.add_tracked_program(program);
            }
        }
        KeyCode::Tab => {
            app.activity.focus = ActivityFocus::Tracked;
            if app.activity.tracked_list_state.selected().is_none() && !app.activity.tracked.is_empty()
            {
                app.activity.tracked_list_state.select(Some(0));
            }
        }
        _ => {}
    }
}

fn handle_tracked_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down => {
            if !app.activity.tracked.is_empty() {
                let current = app.activity.tracked_list_state.selected().unwrap_or(0);
                let next = (current + 1) % app.activity.tracked.len();
                app.activity.tracked_list_state.select(Some(next));
            }
        }
        KeyCode::Up => {
            if !app.activity.tracked.is_empty() {
                let current = app.activity.tracked_list_state.selected().unwrap_or(0);
                let next = (current + app.activity.tracked.len() - 1) % app.activity.tracked.len();
                app.activity.tracked_list_state.select(Some(next));
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            if let Some(idx) = app.activity.tracked_list_state.selected() {
                app.remove_tracked_program(idx);
            }
        }
        KeyCode::Tab => {
            app.activity.focus = ActivityFocus::Detected;
        }
        _ => {}
    }
}
