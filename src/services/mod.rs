pub mod message;
pub mod post;
pub mod ticket;

pub use message::MessageService;
pub use post::FeedSource;
pub use ticket::{TicketRequest, TicketService};
