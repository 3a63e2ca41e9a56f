// Wire protocol shared with the Meridian server: bincode-serialized enums
// framed by a length-delimited codec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A message destination: a server room when `server_id` is set, a direct
/// inbox when `recipient` is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub server_id: Option<Uuid>,
    pub recipient: Option<User>,
}

impl Channel {
    pub fn is_dm(&self) -> bool {
        self.server_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub author: User,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub created_by: User,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub liked_by_me: bool,
    pub comment_count: u32,
    /// Parent post when this post is a reply. Self-referential; forms the
    /// reply tree.
    pub comment_to_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostNotificationKind {
    Liked,
    Followed,
    Replied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostNotification {
    pub id: Uuid,
    pub kind: PostNotificationKind,
    pub by: User,
    pub created_at: DateTime<Utc>,
    /// Present for Liked and Replied notifications.
    pub post: Option<Post>,
}

/// Backend ticket categories. The form side has an extra "select" sentinel
/// that never reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketCategory {
    Abuse,
    Account,
    Question,
    ServerVerification,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub category: TicketCategory,
    pub title: String,
}

/// A running program reported by the desktop integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub filename: String,
    pub name: String,
}

/// A program the user opted to surface in their activity status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedProgram {
    pub filename: String,
    pub name: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    GetChannels,
    GetChannelMessages { channel_id: Uuid },
    SendMessage { channel_id: Uuid, content: String },
    CreateTicket { category: TicketCategory, title: String, body: String },
    GetFeed,
    GetUserPosts { user_id: Uuid, include_replies: bool },
    GetUserLikedPosts { user_id: Uuid },
    GetPost { post_id: Uuid },
    GetComments { post_id: Uuid },
    CreatePost { content: String },
    CreateReply { post_id: Uuid, content: String },
    LikePost { post_id: Uuid },
    UnlikePost { post_id: Uuid },
    GetPostNotifications,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    Channels(Vec<Channel>),
    ChannelMessages { channel_id: Uuid, messages: Vec<Message> },
    MessageCreated { message: Message },
    TicketCreated { ticket: Ticket },
    TicketCreateFailed { message: String },
    Feed { posts: Vec<Post> },
    UserPosts { user_id: Uuid, posts: Vec<Post> },
    Comments { post_id: Uuid, posts: Vec<Post> },
    PostFetched { post: Post },
    PostNotFound { post_id: Uuid },
    PostCreated { post: Post },
    PostLiked { post_id: Uuid, like_count: u32, liked_by_me: bool },
    LikeFailed { post_id: Uuid, reason: String },
    PostNotifications { notifications: Vec<PostNotification> },
    Notice { text: String, is_error: bool },
}
