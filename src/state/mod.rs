pub mod activity;
pub mod chat;
pub mod notification;
pub mod post;
pub mod tabs;
pub mod ticket;
pub mod ui;

pub use activity::ActivityState;
pub use chat::ChatState;
pub use notification::NotificationState;
pub use post::{PostState, ReplyChain};
pub use tabs::{Tab, TabsState};
pub use ticket::{CategoryChoice, TicketState};
pub use ui::{AppMode, InputMode, UiState};

/// Configuration constants for the application
pub struct AppConfig {
    pub max_message_length: usize,
    pub max_post_length: usize,
    pub toast_timeout_ms: u64,
    pub activity_poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
            max_post_length: 500,
            toast_timeout_ms: 4000,
            activity_poll_interval_ms: 3000,
        }
    }
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    Network(String),
    IO(std::io::Error),
    Storage(String),
    Desktop(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::IO(err) => write!(f, "IO error: {}", err),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Desktop(msg) => write!(f, "Desktop error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
