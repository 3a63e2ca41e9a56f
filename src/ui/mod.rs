//! Screen dispatcher and shared chrome (tab bar, toasts, popups).

pub mod chat;
pub mod posts;
pub mod settings;
pub mod ticket;

use crate::app::App;
use crate::state::{AppMode, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(f.area());

    draw_tab_bar(f, app, chunks[0]);

    match app.ui.mode {
        AppMode::Chat => chat::draw_chat(f, app, chunks[1]),
        AppMode::Feed => posts::draw_feed(f, app, chunks[1]),
        AppMode::PostView => posts::draw_post_view(f, app, chunks[1]),
        AppMode::PostNotifications => posts::draw_notifications(f, app, chunks[1]),
        AppMode::ActivitySettings => settings::draw_activity_settings(f, app, chunks[1]),
        AppMode::TicketView => ticket::draw_ticket_view(f, app, chunks[1]),
        AppMode::Input => draw_input_prompt(f, app, chunks[1]),
    }

    if app.ticket.show_modal {
        ticket::draw_ticket_modal(f, app);
    }

    if app.ui.show_server_error {
        draw_server_error(f, app);
    }

    draw_toast(f, app);
}

fn draw_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " meridian ",
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];
    for tab in &app.tabs.tabs {
        let active = app.tabs.active_path.as_deref() == Some(tab.path.as_str());
        let mut style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if tab.is_preview {
            style = style.add_modifier(Modifier::ITALIC);
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", tab.title), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input_prompt(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.ui.input_mode {
        Some(InputMode::NewPost) => "Write your post...",
        Some(InputMode::NewReply { .. }) => "Write your reply...",
        None => "Input",
    };
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let text = Paragraph::new(app.ui.current_input.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(text, popup);
}

fn draw_server_error(f: &mut Frame, app: &App) {
    let popup = centered_rect(50, 20, f.area());
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Connection Error")
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    let text = Paragraph::new(vec![
        Line::from(app.ui.server_error_message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to dismiss, Ctrl+C to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(text, popup);
}

fn draw_toast(f: &mut Frame, app: &App) {
    let Some((message, _, minimal)) = &app.notifications.current_notification else {
        return;
    };
    let area = f.area();
    if area.width < 10 || area.height < 5 {
        return;
    }
    let width = (message.len() as u16 + 4).min(area.width.saturating_sub(2));
    let rect = Rect::new(area.width.saturating_sub(width + 1), 1, width, 3);
    f.render_widget(Clear, rect);
    let color = if message.to_lowercase().contains("error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let block = if *minimal {
        Block::default().borders(Borders::NONE)
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
    };
    f.render_widget(
        Paragraph::new(message.as_str()).block(block).wrap(Wrap { trim: true }),
        rect,
    );
}

/// Rect centered in `area`, sized by percentage.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
