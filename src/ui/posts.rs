//! Post feed, single post view and post notifications.

use crate::app::App;
use crate::proto::{Post, PostNotificationKind};
use chrono_humanize::HumanTime;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn post_lines(app: &App, post: &Post) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(parent_id) = post.comment_to_id {
        if let Some(parent) = app.posts.cached(parent_id) {
            lines.push(Line::from(vec![
                Span::styled("Replying to ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    parent.created_by.username.clone(),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }

    lines.push(Line::from(vec![
        Span::styled(
            post.created_by.username.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", HumanTime::from(post.created_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(Span::raw(post.content.clone())));

    let liked_icon = if post.liked_by_me { "♥" } else { "♡" };
    let mut like_style = Style::default().fg(Color::DarkGray);
    if post.liked_by_me {
        like_style = Style::default().fg(Color::Red);
    }
    if app.posts.like_request_outstanding(post.id) {
        like_style = like_style.add_modifier(Modifier::DIM);
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{} {}", liked_icon, post.like_count), like_style),
        Span::styled(
            format!("   {} comment(s)", post.comment_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));
    lines
}

pub fn draw_feed(f: &mut Frame, app: &mut App, area: Rect) {
    let posts = app.feed_source.cached_posts(&app.posts);
    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| ListItem::new(post_lines(app, post.as_ref())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Feed // n: new post, l: like, Enter: open"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.posts.feed_list_state);
}

pub fn draw_post_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Post // r: reply, l: like, Esc: back");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    // Ancestors first, root to leaf, with the focused post last.
    for post in app.posts.view_chain() {
        lines.extend(post_lines(app, post.as_ref()));
    }

    if let Some(view) = &app.posts.viewing {
        lines.push(Line::from(Span::styled(
            "Replies",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        if let Some(comment_ids) = app.posts.comments.get(&view.focus) {
            for comment_id in comment_ids {
                if let Some(comment) = app.posts.cached(*comment_id) {
                    lines.extend(post_lines(app, comment.as_ref()));
                }
            }
        } else if view.is_complete() {
            lines.push(Line::from(Span::styled(
                "Loading replies...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn draw_notifications(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .posts
        .notifications
        .iter()
        .map(|notification| {
            let (icon, phrase) = match notification.kind {
                PostNotificationKind::Liked => ("♥", "liked your post!"),
                PostNotificationKind::Followed => ("+", "followed you!"),
                PostNotificationKind::Replied => ("↩", "replied to your Post!"),
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(Color::Cyan)),
                Span::styled(
                    notification.by.username.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", phrase)),
                Span::styled(
                    format!("  {}", HumanTime::from(notification.created_at)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])];
            if let Some(post) = &notification.post {
                let content = app
                    .posts
                    .cached(post.id)
                    .map(|p| p.content.clone())
                    .unwrap_or_else(|| post.content.clone());
                lines.push(Line::from(Span::styled(
                    content,
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notifications // Enter: open post, Esc: back"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut app.posts.notifications_list_state);
}
