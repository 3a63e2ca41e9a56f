use crate::app::App;
use crate::state::chat::ChatFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle message pane input
pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match app.chat.chat_focus {
        ChatFocus::Sidebar => handle_sidebar_input(key, app),
        ChatFocus::Input => handle_compose_input(key, app),
    }
}

fn handle_sidebar_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down => {
            if !app.chat.channels.is_empty() {
                let current = app.chat.channel_list_state.selected().unwrap_or(0);
                let next = (current + 1) % app.chat.channels.len();
                app.chat.channel_list_state.select(Some(next));
            }
        }
        KeyCode::Up => {
            if !app.chat.channels.is_empty() {
                let current = app.chat.channel_list_state.selected().unwrap_or(0);
                let next = (current + app.chat.channels.len() - 1) % app.chat.channels.len();
                app.chat.channel_list_state.select(Some(next));
            }
        }
        KeyCode::Enter => {
            if let Some(idx) = app.chat.channel_list_state.selected() {
                if let Some(channel) = app.chat.channels.get(idx) {
                    let channel_id = channel.id;
                    app.select_channel(channel_id);
                    app.chat.chat_focus = ChatFocus::Input;
                }
            }
        }
        KeyCode::Tab => {
            app.chat.chat_focus = ChatFocus::Input;
        }
        _ => {}
    }
}

fn handle_compose_input(key: KeyEvent, app: &mut App) {
    match key.code {
        // Enter without modifier sends; Shift+Enter inserts a newline
        KeyCode::Enter if key.modifiers.is_empty() => {
            app.send_current_message();
        }
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
            let mut draft = app.chat.current_draft().to_string();
            draft.push('\n');
            app.chat.set_current_draft(draft);
        }
        KeyCode::Backspace => {
            let mut draft = app.chat.current_draft().to_string();
            draft.pop();
            app.chat.set_current_draft(draft);
        }
        KeyCode::Tab => {
            app.chat.chat_focus = ChatFocus::Sidebar;
        }
        KeyCode::PageUp => {
            let offset = app.chat.scroll_offset + 10;
            app.chat.update_scroll_offset(offset, 10);
        }
        KeyCode::PageDown => {
            app.chat.scroll_offset = app.chat.scroll_offset.saturating_sub(10);
        }
        KeyCode::Char(c) => {
            let mut draft = app.chat.current_draft().to_string();
            draft.push(c);
            app.chat.set_current_draft(draft);
        }
        _ => {}
    }
}
