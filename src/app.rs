use crate::desktop::{self, DesktopIntegration};
use crate::desktop_notifications::DesktopNotificationService;
use crate::locales::LocaleRegistry;
use crate::proto::{Channel, ClientMessage, Program, ServerMessage};
use crate::services::{FeedSource, MessageService, TicketService};
use crate::state::{
    ActivityState, AppConfig, AppError, AppMode, ChatState, InputMode, NotificationState,
    PostState, ReplyChain, Tab, TabsState, TicketState, UiState,
};
use crate::storage::{LocalStorage, KEY_DESKTOP_NOTIFICATIONS, KEY_PROGRAM_ACTIVITY_STATUS};
use chrono::Utc;
use crossterm::event::Event as CEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// Application events
pub enum AppEvent {
    Terminal(CEvent),
    Server(ServerMessage),
    Programs(Vec<Program>),
    Tick,
}

pub struct App {
    pub ui: UiState,
    pub tabs: TabsState,
    pub chat: ChatState,
    pub posts: PostState,
    pub ticket: TicketState,
    pub activity: ActivityState,
    pub notifications: NotificationState,
    pub feed_source: FeedSource,
    pub storage: LocalStorage,
    pub locales: LocaleRegistry,
    pub desktop: Option<Arc<dyn DesktopIntegration>>,
    pub config: AppConfig,
    to_server: mpsc::UnboundedSender<ClientMessage>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    activity_poll: Option<CancellationToken>,
}

impl App {
    pub fn new(
        to_server: mpsc::UnboundedSender<ClientMessage>,
        events_tx: mpsc::UnboundedSender<AppEvent>,
        storage: LocalStorage,
        locales: LocaleRegistry,
        desktop: Option<Arc<dyn DesktopIntegration>>,
    ) -> App {
        let tracked = storage
            .get_object(KEY_PROGRAM_ACTIVITY_STATUS)
            .unwrap_or_default();

        App {
            ui: UiState::default(),
            tabs: TabsState::default(),
            chat: ChatState::default(),
            posts: PostState::default(),
            ticket: TicketState::default(),
            activity: ActivityState::new(tracked),
            notifications: NotificationState::default(),
            feed_source: FeedSource::Feed,
            storage,
            locales,
            desktop,
            config: AppConfig::default(),
            to_server,
            events_tx,
            activity_poll: None,
        }
    }

    pub fn send_to_server(&mut self, msg: ClientMessage) {
        if let Err(e) = self.to_server.send(msg) {
            let err = AppError::Network(e.to_string());
            self.set_notification(err.to_string(), None, true);
        }
    }

    pub fn set_notification(&mut self, message: impl Into<String>, ms: Option<u64>, minimal: bool) {
        self.notifications
            .set_notification(message, ms, minimal, self.ui.tick_count);
    }

    /// Initial requests once the connection is up.
    pub fn bootstrap(&mut self) {
        self.send_to_server(ClientMessage::GetChannels);
        self.send_to_server(ClientMessage::GetFeed);
    }

    pub fn on_tick(&mut self) {
        self.ui.tick();
        if self.notifications.should_close_notification(self.ui.tick_count) {
            self.notifications.clear_notification();
        }
    }

    // --- Message pane ---

    fn channel_path(channel: &Channel) -> String {
        match channel.server_id {
            Some(server_id) => format!("/servers/{}/{}", server_id, channel.id),
            None => format!("/inbox/{}", channel.id),
        }
    }

    /// Switch the message pane to a channel: register its tab, reset the
    /// opened timestamp, then request history. Unread dismissal waits for
    /// the history to arrive.
    pub fn select_channel(&mut self, channel_id: Uuid) {
        let Some(channel) = self.chat.channels.iter().find(|c| c.id == channel_id) else {
            return;
        };
        let tab = Tab {
            title: channel.name.clone(),
            server_id: channel.server_id,
            user_id: channel.recipient.as_ref().map(|u| u.id),
            icon: if channel.is_dm() { "inbox" } else { "dns" },
            path: Self::channel_path(channel),
            is_preview: true,
        };
        self.tabs.open_tab(tab);
        self.chat.select_channel(channel_id);
        self.send_to_server(ClientMessage::GetChannelMessages { channel_id });
    }

    /// Compose-box submit: trim, clear, no-op when empty, promote the tab
    /// out of preview, send.
    pub fn send_current_message(&mut self) {
        let Some(channel_id) = self.chat.current_channel_id else {
            return;
        };
        let draft = self.chat.current_draft().to_string();
        self.chat.clear_current_draft();
        let Ok(content) = MessageService::validate_message(&draft, self.config.max_message_length)
        else {
            return;
        };
        if let Some(path) = self.tabs.active_tab().map(|t| t.path.clone()) {
            self.tabs.update_tab(&path, false);
        }
        self.send_to_server(ClientMessage::SendMessage { channel_id, content });
    }

    /// Window focus regained: the open channel is no longer unread.
    pub fn handle_focus_gained(&mut self) {
        if let Some(channel_id) = self.chat.current_channel_id {
            self.chat.dismiss_unread(channel_id);
        }
    }

    // --- Posts ---

    pub fn open_feed(&mut self, source: FeedSource) {
        self.feed_source = source;
        self.ui.set_mode(AppMode::Feed);
        self.send_to_server(source.initial_request());
    }

    /// Open the post view and start resolving its reply ancestry.
    pub fn open_post(&mut self, post_id: Uuid) {
        self.posts.viewing = Some(ReplyChain::new(post_id));
        self.ui.set_mode(AppMode::PostView);
        self.send_to_server(ClientMessage::GetPost { post_id });
    }

    pub fn close_post_view(&mut self) {
        self.posts.viewing = None;
        self.ui.set_mode(AppMode::Feed);
    }

    pub fn toggle_like(&mut self, post_id: Uuid) {
        if let Some(request) = self.posts.toggle_like(post_id) {
            self.send_to_server(request);
        }
    }

    pub fn open_post_notifications(&mut self) {
        self.ui.set_mode(AppMode::PostNotifications);
        self.send_to_server(ClientMessage::GetPostNotifications);
    }

    pub fn enter_input_mode(&mut self, mode: InputMode) {
        self.ui.previous_mode = self.ui.mode.clone();
        self.ui.input_mode = Some(mode);
        self.ui.mode = AppMode::Input;
        self.ui.current_input.clear();
        self.notifications.clear_notification();
    }

    pub fn cancel_input_mode(&mut self) {
        self.ui.input_mode = None;
        self.ui.mode = self.ui.previous_mode.clone();
        self.ui.current_input.clear();
    }

    /// Submit the Input prompt (new post or reply). Empty-after-trim input
    /// is a no-op; the prompt closes either way.
    pub fn submit_input(&mut self) {
        let content = self.ui.current_input.trim().to_string();
        let mode = self.ui.input_mode.take();
        self.ui.mode = self.ui.previous_mode.clone();
        self.ui.current_input.clear();
        if content.is_empty() {
            return;
        }
        if content.len() > self.config.max_post_length {
            let limit = self.config.max_post_length;
            let timeout = self.config.toast_timeout_ms;
            self.set_notification(
                format!("Post too long (max {} characters)", limit),
                Some(timeout),
                false,
            );
            return;
        }
        match mode {
            Some(InputMode::NewPost) => {
                self.send_to_server(ClientMessage::CreatePost { content });
            }
            Some(InputMode::NewReply { post_id }) => {
                self.send_to_server(ClientMessage::CreateReply { post_id, content });
            }
            None => {}
        }
    }

    // --- Ticket modal ---

    pub fn open_ticket_modal(&mut self) {
        self.ticket.open_modal();
    }

    /// Validate, compose and submit the ticket form. A validation failure
    /// surfaces exactly one error and nothing leaves the client.
    pub fn submit_ticket(&mut self) {
        self.ticket.error = None;
        match TicketService::build_request(&self.ticket) {
            Err(message) => {
                self.ticket.error = Some(message);
            }
            Ok(request) => {
                self.ticket.submitting = true;
                self.send_to_server(ClientMessage::CreateTicket {
                    category: request.category,
                    title: request.title,
                    body: request.body,
                });
            }
        }
    }

    // --- Activity status settings ---

    /// Mount the settings screen. With an integration available this
    /// starts the 3-second program poller; the token cancels it on leave.
    pub fn enter_activity_settings(&mut self) {
        self.ui.set_mode(AppMode::ActivitySettings);
        if let Some(integration) = self.desktop.clone() {
            let token = desktop::spawn_program_poller(
                integration,
                self.activity.watch_tracked(),
                self.events_tx.clone(),
                self.config.activity_poll_interval_ms,
            );
            if let Some(previous) = self.activity_poll.replace(token) {
                previous.cancel();
            }
        }
    }

    pub fn leave_activity_settings(&mut self, next_mode: AppMode) {
        if let Some(token) = self.activity_poll.take() {
            token.cancel();
        }
        self.ui.set_mode(next_mode);
    }

    pub fn add_tracked_program(&mut self, program: Program) {
        self.activity.add_program(program);
        self.persist_tracked();
        self.restart_activity_status();
    }

    pub fn remove_tracked_program(&mut self, index: usize) {
        if self.activity.remove_program(index).is_some() {
            self.persist_tracked();
            self.restart_activity_status();
        }
    }

    fn persist_tracked(&mut self) {
        let tracked = self.activity.tracked.clone();
        self.storage.set_object(KEY_PROGRAM_ACTIVITY_STATUS, &tracked);
    }

    fn restart_activity_status(&mut self) {
        if let Some(integration) = &self.desktop {
            integration.restart_activity_status(&self.activity.tracked);
        }
    }

    /// Poller results only apply while the settings screen is mounted; a
    /// stale batch arriving after leave is dropped.
    pub fn handle_programs(&mut self, programs: Vec<Program>) {
        if self.ui.mode == AppMode::ActivitySettings {
            self.activity.set_detected(programs);
        }
    }

    // --- Server events ---

    pub fn handle_server_event(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::Channels(channels) => {
                let first = channels.first().map(|c| c.id);
                self.chat.channels = channels;
                if self.chat.current_channel_id.is_none() {
                    if let Some(channel_id) = first {
                        self.chat.channel_list_state.select(Some(0));
                        self.select_channel(channel_id);
                    }
                }
            }
            ServerMessage::ChannelMessages { channel_id, messages } => {
                self.chat.set_messages(channel_id, messages);
                // Only the still-current channel gets opened/dismissed; a
                // stale response after a channel switch changes nothing.
                if self.chat.current_channel_id == Some(channel_id) {
                    self.chat.mark_opened(Utc::now());
                    self.chat.dismiss_unread(channel_id);
                    self.chat.scroll_offset = 0;
                } else {
                    debug!("dropping stale history for channel {}", channel_id);
                }
            }
            ServerMessage::MessageCreated { message } => {
                let is_current = self.chat.current_channel_id == Some(message.channel_id);
                if is_current {
                    self.chat.dismiss_unread(message.channel_id);
                    self.chat.push_message(message);
                } else {
                    self.chat.mark_unread(message.channel_id);
                    let channel_name = self
                        .chat
                        .channels
                        .iter()
                        .find(|c| c.id == message.channel_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    let enabled = self.storage.get_bool(KEY_DESKTOP_NOTIFICATIONS, true);
                    DesktopNotificationService::show_unread_notification(
                        &channel_name,
                        &message.author.username,
                        &message.content,
                        enabled,
                    );
                    self.chat.push_message(message);
                }
            }
            ServerMessage::TicketCreated { ticket } => {
                self.ticket.submitting = false;
                self.tabs.open_tab(Tab {
                    title: format!("Ticket: {}", ticket.title),
                    server_id: None,
                    user_id: None,
                    icon: "help",
                    path: format!("/settings/tickets/{}", ticket.id),
                    is_preview: false,
                });
                self.ticket.created = Some(ticket);
                self.ui.set_mode(AppMode::TicketView);
                self.ticket.close_modal();
            }
            ServerMessage::TicketCreateFailed { message } => {
                self.ticket.submitting = false;
                self.ticket.error = Some(message);
            }
            ServerMessage::Feed { posts } => {
                self.posts.set_feed(posts);
            }
            ServerMessage::UserPosts { user_id, posts } => {
                self.posts.set_user_posts(user_id, posts);
            }
            ServerMessage::Comments { post_id, posts } => {
                self.posts.set_comments(post_id, posts);
            }
            ServerMessage::PostFetched { post } => {
                let mut follow_up = None;
                if let Some(view) = self.posts.viewing.as_mut() {
                    if let Some(next) = view.on_fetched(&post) {
                        follow_up = Some(ClientMessage::GetPost { post_id: next });
                    } else if view.is_complete() && !view.comments_requested {
                        view.comments_requested = true;
                        follow_up = Some(ClientMessage::GetComments { post_id: view.focus });
                    }
                }
                self.posts.upsert(post);
                if let Some(request) = follow_up {
                    self.send_to_server(request);
                }
            }
            ServerMessage::PostNotFound { post_id } => {
                let mut follow_up = None;
                if let Some(view) = self.posts.viewing.as_mut() {
                    if view.pending() == Some(post_id) {
                        warn!("reply ancestor {} missing, truncating chain", post_id);
                        view.abort_pending();
                        if !view.chain.is_empty() && !view.comments_requested {
                            view.comments_requested = true;
                            follow_up = Some(ClientMessage::GetComments { post_id: view.focus });
                        }
                    }
                }
                if let Some(request) = follow_up {
                    self.send_to_server(request);
                }
            }
            ServerMessage::PostCreated { post } => {
                self.posts.push_created(post);
            }
            ServerMessage::PostLiked { post_id, like_count, liked_by_me } => {
                self.posts.apply_like(post_id, like_count, liked_by_me);
            }
            ServerMessage::LikeFailed { post_id, reason } => {
                // Deliberately silent toward the user; the guard resets and
                // the snapshot keeps the last confirmed state.
                warn!("like request for {} failed: {}", post_id, reason);
                self.posts.like_failed(post_id);
            }
            ServerMessage::PostNotifications { notifications } => {
                for notification in &notifications {
                    if let Some(post) = &notification.post {
                        self.posts.upsert(post.clone());
                    }
                }
                self.posts.notifications = notifications;
            }
            ServerMessage::Notice { text, is_error } => {
                let prefix = if is_error { "Error: " } else { "Info: " };
                let timeout = self.config.toast_timeout_ms;
                self.set_notification(format!("{}{}", prefix, text), Some(timeout), false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Message, Post, Ticket, TicketCategory, User};
    use crate::state::CategoryChoice;

    struct Harness {
        app: App,
        from_app: mpsc::UnboundedReceiver<ClientMessage>,
    }

    fn harness(name: &str) -> Harness {
        let (to_server, from_app) = mpsc::unbounded_channel();
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let path = std::env::temp_dir().join(format!("meridian_app_test_{}.json", name));
        let _ = std::fs::remove_file(&path);
        let mut storage = LocalStorage::load(path);
        storage.set_bool(KEY_DESKTOP_NOTIFICATIONS, false);
        let locales = LocaleRegistry::new(std::env::temp_dir());
        let app = App::new(to_server, events_tx, storage, locales, None);
        Harness { app, from_app }
    }

    fn channel(name: &str) -> Channel {
        Channel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            server_id: Some(Uuid::new_v4()),
            recipient: None,
        }
    }

    fn message_in(channel_id: Uuid) -> Message {
        Message {
            id: Uuid::new_v4(),
            channel_id,
            author: User {
                id: Uuid::new_v4(),
                username: "rin".to_string(),
            },
            content: "ping".to_string(),
            created_at: Utc::now(),
        }
    }

    fn post() -> Post {
        Post {
            id: Uuid::new_v4(),
            content: "hello".to_string(),
            created_by: User {
                id: Uuid::new_v4(),
                username: "rin".to_string(),
            },
            created_at: Utc::now(),
            like_count: 0,
            liked_by_me: false,
            comment_count: 0,
            comment_to_id: None,
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ClientMessage>) -> Vec<ClientMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[test]
    fn history_arrival_opens_channel_and_dismisses_unread() {
        let mut h = harness("history_opens");
        let a = channel("general");
        let a_id = a.id;
        h.app.chat.channels = vec![a];
        h.app.chat.mark_unread(a_id);
        h.app.select_channel(a_id);
        assert!(h.app.chat.opened_at.is_none());

        h.app.handle_server_event(ServerMessage::ChannelMessages {
            channel_id: a_id,
            messages: vec![message_in(a_id)],
        });
        assert!(h.app.chat.opened_at.is_some());
        assert!(!h.app.chat.unread_channels.contains(&a_id));
    }

    #[test]
    fn stale_history_after_channel_switch_changes_nothing() {
        let mut h = harness("stale_history");
        let a = channel("general");
        let b = channel("random");
        let (a_id, b_id) = (a.id, b.id);
        h.app.chat.channels = vec![a, b];
        h.app.select_channel(a_id);
        h.app.select_channel(b_id);

        h.app.handle_server_event(ServerMessage::ChannelMessages {
            channel_id: a_id,
            messages: vec![],
        });
        // The response for A arrived after the switch to B.
        assert!(h.app.chat.opened_at.is_none());
    }

    #[test]
    fn message_created_for_other_channel_dismisses_nothing() {
        let mut h = harness("other_channel_push");
        let a = channel("general");
        let b = channel("random");
        let (a_id, b_id) = (a.id, b.id);
        h.app.chat.channels = vec![a, b];
        h.app.select_channel(a_id);
        h.app.handle_server_event(ServerMessage::ChannelMessages {
            channel_id: a_id,
            messages: vec![],
        });

        h.app.handle_server_event(ServerMessage::MessageCreated {
            message: message_in(b_id),
        });
        assert!(h.app.chat.unread_channels.contains(&b_id));

        h.app.handle_server_event(ServerMessage::MessageCreated {
            message: message_in(a_id),
        });
        assert!(!h.app.chat.unread_channels.contains(&a_id));
        assert!(h.app.chat.unread_channels.contains(&b_id));
    }

    #[test]
    fn focus_regained_dismisses_current_channel_only() {
        let mut h = harness("focus_gained");
        let a = channel("general");
        let b = channel("random");
        let (a_id, b_id) = (a.id, b.id);
        h.app.chat.channels = vec![a, b];
        h.app.select_channel(a_id);
        h.app.chat.mark_unread(a_id);
        h.app.chat.mark_unread(b_id);

        h.app.handle_focus_gained();
        assert!(!h.app.chat.unread_channels.contains(&a_id));
        assert!(h.app.chat.unread_channels.contains(&b_id));
    }

    #[test]
    fn empty_after_trim_compose_sends_nothing_but_clears() {
        let mut h = harness("empty_compose");
        let a = channel("general");
        let a_id = a.id;
        h.app.chat.channels = vec![a];
        h.app.select_channel(a_id);
        drain(&mut h.from_app);

        h.app.chat.set_current_draft("   ".to_string());
        h.app.send_current_message();
        assert!(drain(&mut h.from_app).is_empty());
        assert_eq!(h.app.chat.current_draft(), "");
    }

    #[test]
    fn compose_trims_promotes_tab_and_sends() {
        let mut h = harness("compose_sends");
        let a = channel("general");
        let a_id = a.id;
        h.app.chat.channels = vec![a];
        h.app.select_channel(a_id);
        drain(&mut h.from_app);

        h.app.chat.set_current_draft("  hello world  ".to_string());
        h.app.send_current_message();

        let sent = drain(&mut h.from_app);
        assert_eq!(sent.len(), 1);
        assert!(matches!(
            &sent[0],
            ClientMessage::SendMessage { channel_id, content }
                if *channel_id == a_id && content == "hello world"
        ));
        assert!(!h.app.tabs.active_tab().unwrap().is_preview);
        assert_eq!(h.app.chat.current_draft(), "");
    }

    #[test]
    fn double_like_toggle_sends_one_request() {
        let mut h = harness("like_debounce");
        let p = post();
        let id = p.id;
        h.app.posts.upsert(p);

        h.app.toggle_like(id);
        h.app.toggle_like(id);
        let sent = drain(&mut h.from_app);
        assert_eq!(sent.len(), 1);
        assert!(matches!(sent[0], ClientMessage::LikePost { post_id } if post_id == id));

        // Failure resets the guard without user-facing error.
        h.app.handle_server_event(ServerMessage::LikeFailed {
            post_id: id,
            reason: "boom".to_string(),
        });
        assert!(h.app.notifications.current_notification.is_none());
        h.app.toggle_like(id);
        assert_eq!(drain(&mut h.from_app).len(), 1);
    }

    #[test]
    fn ticket_failure_keeps_modal_open_with_error() {
        let mut h = harness("ticket_failure");
        h.app.open_ticket_modal();
        h.app.ticket.category = CategoryChoice::Question;
        h.app.ticket.body = "halp".to_string();
        h.app.submit_ticket();
        assert_eq!(drain(&mut h.from_app).len(), 1);

        h.app.handle_server_event(ServerMessage::TicketCreateFailed {
            message: "rate limited".to_string(),
        });
        assert!(h.app.ticket.show_modal);
        assert_eq!(h.app.ticket.error.as_deref(), Some("rate limited"));
        assert_ne!(h.app.ui.mode, AppMode::TicketView);
    }

    #[test]
    fn ticket_success_navigates_and_closes_modal() {
        let mut h = harness("ticket_success");
        h.app.open_ticket_modal();
        h.app.ticket.category = CategoryChoice::Question;
        h.app.ticket.body = "halp".to_string();
        h.app.submit_ticket();
        drain(&mut h.from_app);

        let ticket = Ticket {
            id: Uuid::new_v4(),
            category: TicketCategory::Question,
            title: "halp".to_string(),
        };
        let ticket_id = ticket.id;
        h.app.handle_server_event(ServerMessage::TicketCreated { ticket });
        assert!(!h.app.ticket.show_modal);
        assert_eq!(h.app.ui.mode, AppMode::TicketView);
        assert_eq!(
            h.app.tabs.active_path.as_deref(),
            Some(format!("/settings/tickets/{}", ticket_id).as_str())
        );
    }

    #[test]
    fn validation_error_sends_nothing() {
        let mut h = harness("ticket_validation");
        h.app.open_ticket_modal();
        h.app.ticket.category = CategoryChoice::Question;
        h.app.submit_ticket();
        assert!(drain(&mut h.from_app).is_empty());
        assert_eq!(h.app.ticket.error.as_deref(), Some("Please enter a body"));
    }

    #[test]
    fn post_view_walks_ancestry_then_loads_comments() {
        let mut h = harness("post_view_chain");
        let root = post();
        let mut leaf = post();
        leaf.comment_to_id = Some(root.id);
        let (root_id, leaf_id) = (root.id, leaf.id);

        h.app.open_post(leaf_id);
        let sent = drain(&mut h.from_app);
        assert!(matches!(sent[0], ClientMessage::GetPost { post_id } if post_id == leaf_id));

        h.app.handle_server_event(ServerMessage::PostFetched { post: leaf });
        let sent = drain(&mut h.from_app);
        assert!(matches!(sent[0], ClientMessage::GetPost { post_id } if post_id == root_id));

        h.app.handle_server_event(ServerMessage::PostFetched { post: root });
        let sent = drain(&mut h.from_app);
        assert!(matches!(sent[0], ClientMessage::GetComments { post_id } if post_id == leaf_id));

        let chain = h.app.posts.view_chain();
        let ids: Vec<_> = chain.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![root_id, leaf_id]);
    }

    #[test]
    fn programs_are_dropped_after_leaving_settings() {
        let mut h = harness("stale_programs");
        h.app.ui.set_mode(AppMode::ActivitySettings);
        h.app.handle_programs(vec![Program {
            filename: "osu".to_string(),
            name: "osu".to_string(),
        }]);
        assert_eq!(h.app.activity.detected.len(), 1);

        h.app.leave_activity_settings(AppMode::Chat);
        h.app.handle_programs(vec![]);
        // The stale empty batch did not clobber the list; it was dropped.
        assert_eq!(h.app.activity.detected.len(), 1);
    }
}
