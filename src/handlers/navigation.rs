use crate::app::App;
use crate::services::FeedSource;
use crate::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screen switching with mount/unmount side effects: the activity settings
/// poller stops when the screen goes away, feeds refetch on entry.
pub fn switch_mode(app: &mut App, target: AppMode) {
    if app.ui.mode == target {
        return;
    }
    if app.ui.mode == AppMode::ActivitySettings {
        app.leave_activity_settings(target.clone());
    }
    match target {
        AppMode::Feed => app.open_feed(FeedSource::Feed),
        AppMode::PostNotifications => app.open_post_notifications(),
        AppMode::ActivitySettings => app.enter_activity_settings(),
        other => app.ui.set_mode(other),
    }
}

/// Global shortcuts that apply on every screen. Returns true when the key
/// was consumed.
pub fn handle_global_shortcuts(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ui.quit();
            true
        }
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_ticket_modal();
            true
        }
        KeyCode::Char('1') if key.modifiers.contains(KeyModifiers::ALT) => {
            switch_mode(app, AppMode::Chat);
            true
        }
        KeyCode::Char('2') if key.modifiers.contains(KeyModifiers::ALT) => {
            switch_mode(app, AppMode::Feed);
            true
        }
        KeyCode::Char('3') if key.modifiers.contains(KeyModifiers::ALT) => {
            switch_mode(app, AppMode::PostNotifications);
            true
        }
        KeyCode::Char('4') if key.modifiers.contains(KeyModifiers::ALT) => {
            switch_mode(app, AppMode::ActivitySettings);
            true
        }
        _ => false,
    }
}

/// Input prompt for new posts and replies
pub fn handle_input_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_input_mode();
        }
        KeyCode::Enter => {
            app.submit_input();
        }
        KeyCode::Backspace => {
            app.ui.current_input.pop();
        }
        KeyCode::Char(c) => {
            app.ui.current_input.push(c);
        }
        _ => {}
    }
}

pub fn handle_ticket_view_input(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Esc {
        switch_mode(app, AppMode::Feed);
    }
}
