//! Message pane: channel sidebar, message log, compose box.

use crate::app::App;
use crate::state::chat::ChatFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(area);
    draw_sidebar(f, app, chunks[0]);
    draw_main(f, app, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.chat.chat_focus == ChatFocus::Sidebar;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = app
        .chat
        .channels
        .iter()
        .map(|channel| {
            let unread = app.chat.unread_channels.contains(&channel.id);
            let marker = if unread { "● " } else { "  " };
            let icon = if channel.is_dm() { "@" } else { "#" };
            let mut style = Style::default();
            if unread {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            if app.chat.current_channel_id == Some(channel.id) {
                style = style.fg(Color::Cyan);
            }
            ListItem::new(Line::from(Span::styled(
                format!("{}{}{}", marker, icon, channel.name),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Channels")
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.chat.channel_list_state);
}

fn draw_main(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    draw_message_log(f, app, chunks[0]);
    draw_compose(f, app, chunks[1]);
}

fn draw_message_log(f: &mut Frame, app: &App, area: Rect) {
    let title = app
        .chat
        .current_channel()
        .map(|c| format!("#{}", c.name))
        .unwrap_or_else(|| "No channel".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let messages = app.chat.current_messages();
    let rows = inner.height as usize;
    // Pinned to the bottom: walk back from the latest, honoring the offset.
    let end = messages.len().saturating_sub(app.chat.scroll_offset);
    let start = end.saturating_sub(rows);
    let mut lines: Vec<Line> = Vec::new();
    for message in &messages[start..end] {
        let animate = app.chat.should_animate(message);
        let author_style = if animate {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", message.created_at.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("<{}> ", message.author.username), author_style),
            Span::raw(message.content.as_str()),
        ]));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_compose(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.chat.chat_focus == ChatFocus::Input;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let draft = app.chat.current_draft();
    let text = if draft.is_empty() && !focused {
        Span::styled("Message", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(draft)
    };
    let paragraph = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}
