//! Create-ticket modal and the ticket detail view.

use crate::app::App;
use crate::state::ticket::TicketFocus;
use crate::ui::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::raw(format!("{}{}", value, cursor)),
    ])
}

pub fn draw_ticket_modal(f: &mut Frame, app: &App) {
    let ticket = &app.ticket;
    let popup = centered_rect(70, 70, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Create Ticket // Tab: next field, Esc: close")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Creating multiple false tickets may affect your account.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
    ];

    let category_focused = ticket.focus == TicketFocus::Category;
    let category_style = if category_focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::styled("Category: ", category_style),
        Span::raw(format!("< {} >", ticket.category.label())),
    ]));
    lines.push(Line::from(""));

    for focus in ticket.focus_cycle() {
        let focused = ticket.focus == focus;
        match focus {
            TicketFocus::UserIds => lines.push(field_line(
                "User ID(s) to report (separated by comma)",
                &ticket.user_ids,
                focused,
            )),
            TicketFocus::MessageIds => lines.push(field_line(
                "Message ID(s) to report (separated by comma)",
                &ticket.message_ids,
                focused,
            )),
            TicketFocus::Title => lines.push(field_line(
                "In one short sentence, what is the problem?",
                &ticket.title,
                focused,
            )),
            TicketFocus::Body => lines.push(field_line(
                "Describe the problem",
                &ticket.body,
                focused,
            )),
            TicketFocus::InviteUrl => lines.push(field_line(
                "Existing Server Invite URL",
                &ticket.invite_url,
                focused,
            )),
            TicketFocus::Submit => {
                lines.push(Line::from(""));
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let label = if ticket.submitting {
                    " Creating... "
                } else {
                    " Create Ticket "
                };
                lines.push(Line::from(Span::styled(label, style)));
            }
            TicketFocus::Category => {}
        }
    }

    if let Some(error) = &ticket.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "You will be able to send attachments after the ticket is created.",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

pub fn draw_ticket_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ticket // Esc: back");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = match &app.ticket.created {
        Some(ticket) => vec![
            Line::from(Span::styled(
                ticket.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Ticket id: {}", ticket.id)),
            Line::from(""),
            Line::from(Span::styled(
                "Our team will get back to you here.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("No ticket selected.")],
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
