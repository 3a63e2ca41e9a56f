use crate::app::App;
use crate::state::ticket::TicketFocus;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle create-ticket modal input
pub fn handle_ticket_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.ticket.close_modal();
        }
        KeyCode::Tab => {
            app.ticket.focus_next();
        }
        KeyCode::Left if app.ticket.focus == TicketFocus::Category => {
            app.ticket.category = app.ticket.category.prev();
        }
        KeyCode::Right if app.ticket.focus == TicketFocus::Category => {
            app.ticket.category = app.ticket.category.next();
        }
        KeyCode::Enter => {
            if app.ticket.focus == TicketFocus::Submit {
                if !app.ticket.submitting {
                    app.submit_ticket();
                }
            } else if app.ticket.focus == TicketFocus::Body {
                // The body is the only multi-line field
                app.ticket.body.push('\n');
            } else {
                app.ticket.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = app.ticket.focused_field_mut() {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = app.ticket.focused_field_mut() {
                field.push(c);
            }
        }
        _ => {}
    }
}
