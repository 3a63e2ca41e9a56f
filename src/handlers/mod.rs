pub mod chat;
pub mod navigation;
pub mod post;
pub mod settings;
pub mod ticket;

use crate::app::App;
use crate::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main input handler dispatcher
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // Handle connection error popup first (highest priority)
    if app.ui.show_server_error {
        handle_server_error_input(key, app);
        return;
    }

    // The ticket modal overlays whatever screen is active
    if app.ticket.show_modal {
        ticket::handle_ticket_input(key, app);
        return;
    }

    if navigation::handle_global_shortcuts(key, app) {
        return;
    }

    // An active toast swallows the key press that dismisses it
    if app.notifications.current_notification.is_some() {
        app.notifications.clear_notification();
        return;
    }

    match app.ui.mode {
        AppMode::Chat => chat::handle_chat_input(key, app),
        AppMode::Feed | AppMode::PostView | AppMode::PostNotifications => {
            post::handle_post_input(key, app)
        }
        AppMode::ActivitySettings => settings::handle_settings_input(key, app),
        AppMode::TicketView => navigation::handle_ticket_view_input(key, app),
        AppMode::Input => navigation::handle_input_mode(key, app),
    }
}

/// Handle connection error popup input
fn handle_server_error_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.ui.hide_server_error();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ui.quit();
        }
        _ => {}
    }
}
