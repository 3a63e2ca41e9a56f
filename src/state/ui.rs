use ratatui::widgets::ListState;
use uuid::Uuid;

#[derive(PartialEq, Debug, Clone)]
pub enum AppMode {
    Chat,
    Feed,
    PostView,
    PostNotifications,
    ActivitySettings,
    TicketView,
    Input,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    NewPost,
    NewReply { post_id: Uuid },
}

/// State management for UI-specific state
pub struct UiState {
    pub mode: AppMode,
    pub input_mode: Option<InputMode>,
    /// Mode to return to when an Input prompt closes.
    pub previous_mode: AppMode,
    pub current_input: String,
    pub should_quit: bool,
    pub tick_count: u64,

    pub menu_list_state: ListState,

    // Connection error popup
    pub show_server_error: bool,
    pub server_error_message: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: AppMode::Chat,
            input_mode: None,
            previous_mode: AppMode::Chat,
            current_input: String::new(),
            should_quit: false,
            tick_count: 0,
            menu_list_state: ListState::default(),
            show_server_error: false,
            server_error_message: String::new(),
        }
    }
}

impl UiState {
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn show_server_error(&mut self, message: String) {
        self.show_server_error = true;
        self.server_error_message = message;
    }

    pub fn hide_server_error(&mut self) {
        self.show_server_error = false;
        self.server_error_message.clear();
    }
}
