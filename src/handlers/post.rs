use crate::app::App;
use crate::state::{AppMode, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Handle post feed, post view and post notification input
pub fn handle_post_input(key: KeyEvent, app: &mut App) {
    match app.ui.mode {
        AppMode::Feed => handle_feed_input(key, app),
        AppMode::PostView => handle_post_view_input(key, app),
        AppMode::PostNotifications => handle_notifications_input(key, app),
        _ => {}
    }
}

fn handle_feed_input(key: KeyEvent, app: &mut App) {
    let ids = app.feed_source.cached_ids(&app.posts);
    match key.code {
        KeyCode::Down => {
            if !ids.is_empty() {
                let current = app.posts.feed_list_state.selected().unwrap_or(0);
                let next = (current + 1) % ids.len();
                app.posts.feed_list_state.select(Some(next));
            }
        }
        KeyCode::Up => {
            if !ids.is_empty() {
                let current = app.posts.feed_list_state.selected().unwrap_or(0);
                let next = (current + ids.len() - 1) % ids.len();
                app.posts.feed_list_state.select(Some(next));
            }
        }
        KeyCode::Enter => {
            if let Some(post_id) = selected_id(app, &ids) {
                app.open_post(post_id);
            }
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            if let Some(post_id) = selected_id(app, &ids) {
                app.toggle_like(post_id);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.enter_input_mode(InputMode::NewPost);
        }
        _ => {}
    }
}

fn selected_id(app: &App, ids: &[uuid::Uuid]) -> Option<uuid::Uuid> {
    app.posts
        .feed_list_state
        .selected()
        .and_then(|idx| ids.get(idx).copied())
}

fn handle_post_view_input(key: KeyEvent, app: &mut App) {
    let focus = app.posts.viewing.as_ref().map(|v| v.focus);
    match key.code {
        KeyCode::Char('l') | KeyCode::Char('L') => {
            if let Some(post_id) = focus {
                app.toggle_like(post_id);
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if let Some(post_id) = focus {
                app.enter_input_mode(InputMode::NewReply { post_id });
            }
        }
        KeyCode::Esc => {
            app.close_post_view();
        }
        _ => {}
    }
}

fn handle_notifications_input(key: KeyEvent, app: &mut App) {
    let count = app.posts.notifications.len();
    match key.code {
        KeyCode::Down => {
            if count > 0 {
                let current = app.posts.notifications_list_state.selected().unwrap_or(0);
                app.posts
                    .notifications_list_state
                    .select(Some((current + 1) % count));
            }
        }
        KeyCode::Up => {
            if count > 0 {
                let current = app.posts.notifications_list_state.selected().unwrap_or(0);
                app.posts
                    .notifications_list_state
                    .select(Some((current + count - 1) % count));
            }
        }
        KeyCode::Enter => {
            // Liked/Replied notifications open their referenced post
            let post_id = app
                .posts
                .notifications_list_state
                .selected()
                .and_then(|idx| app.posts.notifications.get(idx))
                .and_then(|n| n.post.as_ref().map(|p| p.id));
            if let Some(post_id) = post_id {
                app.open_post(post_id);
            }
        }
        KeyCode::Esc => {
            app.ui.set_mode(AppMode::Feed);
        }
        _ => {}
    }
}
