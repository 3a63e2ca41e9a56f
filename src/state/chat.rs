use crate::proto::{Channel, Message};
use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFocus {
    Sidebar,
    Input,
}

/// State management for the message pane
pub struct ChatState {
    pub channels: Vec<Channel>,
    pub current_channel_id: Option<Uuid>,

    // Message history per channel
    pub messages: HashMap<Uuid, Vec<Message>>,

    /// Set when the current channel's history finished loading. Messages
    /// created after this instant animate on arrival.
    pub opened_at: Option<DateTime<Utc>>,

    pub unread_channels: HashSet<Uuid>,

    // Scrolling: lines up from the latest message, 0 = pinned to bottom
    pub scroll_offset: usize,

    // Compose drafts per channel
    pub drafts: HashMap<Uuid, String>,

    pub chat_focus: ChatFocus,
    pub channel_list_state: ListState,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            current_channel_id: None,
            messages: HashMap::new(),
            opened_at: None,
            unread_channels: HashSet::new(),
            scroll_offset: 0,
            drafts: HashMap::new(),
            chat_focus: ChatFocus::Sidebar,
            channel_list_state: ListState::default(),
        }
    }
}

impl ChatState {
    pub fn current_channel(&self) -> Option<&Channel> {
        self.current_channel_id
            .and_then(|id| self.channels.iter().find(|c| c.id == id))
    }

    /// Switch to a channel. The opened timestamp resets before history is
    /// requested; `mark_opened` runs once the history actually arrives.
    pub fn select_channel(&mut self, channel_id: Uuid) {
        self.current_channel_id = Some(channel_id);
        self.opened_at = None;
        self.scroll_offset = 0;
    }

    pub fn mark_opened(&mut self, now: DateTime<Utc>) {
        self.opened_at = Some(now);
    }

    /// Whether a displayed message should animate: strictly newer than the
    /// instant the channel was opened.
    pub fn should_animate(&self, message: &Message) -> bool {
        match self.opened_at {
            Some(opened) => message.created_at > opened,
            None => false,
        }
    }

    pub fn set_messages(&mut self, channel_id: Uuid, messages: Vec<Message>) {
        self.messages.insert(channel_id, messages);
    }

    pub fn current_messages(&self) -> &[Message] {
        self.current_channel_id
            .and_then(|id| self.messages.get(&id))
            .map(|m| m.as_slice())
            .unwrap_or(&[])
    }

    /// Append a pushed message and keep the log pinned to the bottom.
    pub fn push_message(&mut self, message: Message) {
        let entry = self.messages.entry(message.channel_id).or_default();
        entry.push(message);
        self.scroll_offset = 0;
    }

    pub fn mark_unread(&mut self, channel_id: Uuid) {
        self.unread_channels.insert(channel_id);
    }

    pub fn dismiss_unread(&mut self, channel_id: Uuid) {
        self.unread_channels.remove(&channel_id);
    }

    pub fn current_draft(&self) -> &str {
        self.current_channel_id
            .and_then(|id| self.drafts.get(&id))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn set_current_draft(&mut self, value: String) {
        if let Some(id) = self.current_channel_id {
            self.drafts.insert(id, value);
        }
    }

    pub fn clear_current_draft(&mut self) {
        if let Some(id) = self.current_channel_id {
            self.drafts.insert(id, String::new());
        }
    }

    pub fn update_scroll_offset(&mut self, offset: usize, max_rows: usize) {
        let total = self.current_messages().len();
        let max_scroll = total.saturating_sub(max_rows);
        self.scroll_offset = offset.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::User;
    use chrono::Duration;

    fn message_at(channel_id: Uuid, created_at: DateTime<Utc>) -> Message {
        Message {
            id: Uuid::new_v4(),
            channel_id,
            author: User {
                id: Uuid::new_v4(),
                username: "ari".to_string(),
            },
            content: "hey".to_string(),
            created_at,
        }
    }

    #[test]
    fn message_newer_than_opened_at_animates() {
        let mut chat = ChatState::default();
        let channel_id = Uuid::new_v4();
        chat.select_channel(channel_id);
        let opened = Utc::now();
        chat.mark_opened(opened);

        let newer = message_at(channel_id, opened + Duration::seconds(1));
        assert!(chat.should_animate(&newer));
    }

    #[test]
    fn message_older_or_equal_does_not_animate() {
        let mut chat = ChatState::default();
        let channel_id = Uuid::new_v4();
        chat.select_channel(channel_id);
        let opened = Utc::now();
        chat.mark_opened(opened);

        let equal = message_at(channel_id, opened);
        let older = message_at(channel_id, opened - Duration::seconds(5));
        assert!(!chat.should_animate(&equal));
        assert!(!chat.should_animate(&older));
    }

    #[test]
    fn nothing_animates_while_history_is_loading() {
        let mut chat = ChatState::default();
        let channel_id = Uuid::new_v4();
        chat.select_channel(channel_id);

        let msg = message_at(channel_id, Utc::now());
        assert!(chat.opened_at.is_none());
        assert!(!chat.should_animate(&msg));
    }

    #[test]
    fn channel_switch_resets_opened_timestamp_and_scroll() {
        let mut chat = ChatState::default();
        let first = Uuid::new_v4();
        chat.select_channel(first);
        chat.mark_opened(Utc::now());
        chat.scroll_offset = 12;

        chat.select_channel(Uuid::new_v4());
        assert!(chat.opened_at.is_none());
        assert_eq!(chat.scroll_offset, 0);
    }

    #[test]
    fn pushed_message_pins_scroll_to_bottom() {
        let mut chat = ChatState::default();
        let channel_id = Uuid::new_v4();
        chat.select_channel(channel_id);
        chat.set_messages(channel_id, vec![message_at(channel_id, Utc::now())]);
        chat.scroll_offset = 3;

        chat.push_message(message_at(channel_id, Utc::now()));
        assert_eq!(chat.scroll_offset, 0);
        assert_eq!(chat.current_messages().len(), 2);
    }
}
