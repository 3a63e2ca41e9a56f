use crate::proto::ClientMessage;
use crate::state::PostState;
use std::sync::Arc;
use uuid::Uuid;

/// Where a posts view draws from. Exactly one source applies per mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    /// The global feed.
    Feed,
    /// A user's posts, optionally the ones they liked or including replies.
    User {
        user_id: Uuid,
        liked: bool,
        include_replies: bool,
    },
    /// A post's comment thread.
    Comments { post_id: Uuid },
}

impl FeedSource {
    /// The request a view issues when it mounts with this source.
    pub fn initial_request(&self) -> ClientMessage {
        match *self {
            FeedSource::Feed => ClientMessage::GetFeed,
            FeedSource::User {
                user_id,
                liked: true,
                ..
            } => ClientMessage::GetUserLikedPosts { user_id },
            FeedSource::User {
                user_id,
                include_replies,
                ..
            } => ClientMessage::GetUserPosts {
                user_id,
                include_replies,
            },
            FeedSource::Comments { post_id } => ClientMessage::GetComments { post_id },
        }
    }

    /// Cached post ids for this source, in display order.
    pub fn cached_ids(&self, posts: &PostState) -> Vec<Uuid> {
        match *self {
            FeedSource::Feed => posts.feed.clone(),
            FeedSource::User { user_id, .. } => {
                posts.user_posts.get(&user_id).cloned().unwrap_or_default()
            }
            FeedSource::Comments { post_id } => {
                posts.comments.get(&post_id).cloned().unwrap_or_default()
            }
        }
    }

    pub fn cached_posts(&self, posts: &PostState) -> Vec<Arc<crate::proto::Post>> {
        self.cached_ids(posts)
            .into_iter()
            .filter_map(|id| posts.cached(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_source_maps_to_its_fetch() {
        let user_id = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        assert!(matches!(
            FeedSource::Feed.initial_request(),
            ClientMessage::GetFeed
        ));
        assert!(matches!(
            FeedSource::User { user_id, liked: true, include_replies: false }.initial_request(),
            ClientMessage::GetUserLikedPosts { user_id: u } if u == user_id
        ));
        assert!(matches!(
            FeedSource::User { user_id, liked: false, include_replies: true }.initial_request(),
            ClientMessage::GetUserPosts { user_id: u, include_replies: true } if u == user_id
        ));
        assert!(matches!(
            FeedSource::Comments { post_id }.initial_request(),
            ClientMessage::GetComments { post_id: p } if p == post_id
        ));
    }
}
