//! Activity status settings screen.

use crate::app::App;
use crate::state::activity::ActivityFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_activity_settings(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = if app.desktop.is_some() {
        Line::from(vec![
            Span::styled(
                "Activity Status  ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Share what you're up to with everyone.",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "To modify these settings, you must use the Meridian desktop build.",
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_detected(f, app, lists[0]);
    draw_tracked(f, app, lists[1]);
}

fn draw_detected(f: &mut Frame, app: &mut App, area: Rect) {
    // Inert without an integration: dimmed, no focus cue
    let inert = app.desktop.is_none();
    let focused = !inert && app.activity.focus == ActivityFocus::Detected;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if inert {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = app
        .activity
        .detected
        .iter()
        .map(|program| {
            let mut style = Style::default();
            if inert {
                style = style.add_modifier(Modifier::DIM);
            }
            ListItem::new(vec![
                Line::from(Span::styled(program.name.clone(), style)),
                Line::from(Span::styled(
                    program.filename.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Running programs // Enter: track")
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.activity.detected_list_state);
}

fn draw_tracked(f: &mut Frame, app: &mut App, area: Rect) {
    let inert = app.desktop.is_none();
    let focused = !inert && app.activity.focus == ActivityFocus::Tracked;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if inert {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = app
        .activity
        .tracked
        .iter()
        .map(|program| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        program.action.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {}", program.name)),
                ]),
                Line::from(Span::styled(
                    program.filename.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Activity status // d: remove")
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.activity.tracked_list_state);
}
