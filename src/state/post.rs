use crate::proto::{ClientMessage, Post, PostNotification};
use ratatui::widgets::ListState;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Resolves a post's reply ancestry with an explicit loop and a visited
/// set: starting from the focused post, each fetched post is prepended to
/// the chain and its `comment_to_id` followed only if not seen before, so
/// malformed or cyclic chains terminate and no post id is fetched twice.
/// The finished chain reads root-to-leaf with the focused post last.
#[derive(Debug)]
pub struct ReplyChain {
    pub focus: Uuid,
    pub chain: Vec<Uuid>,
    visited: HashSet<Uuid>,
    pending: Option<Uuid>,
    pub comments_requested: bool,
}

impl ReplyChain {
    pub fn new(focus: Uuid) -> Self {
        let mut visited = HashSet::new();
        visited.insert(focus);
        Self {
            focus,
            chain: Vec::new(),
            visited,
            pending: Some(focus),
            comments_requested: false,
        }
    }

    /// The id the resolver is waiting on, starting with the focused post.
    pub fn pending(&self) -> Option<Uuid> {
        self.pending
    }

    /// Feed the resolver a fetched post. Returns the next id to fetch, or
    /// `None` when the chain is complete. Posts that were not asked for are
    /// ignored.
    pub fn on_fetched(&mut self, post: &Post) -> Option<Uuid> {
        if self.pending != Some(post.id) {
            return None;
        }
        self.pending = None;
        self.chain.insert(0, post.id);
        if let Some(parent) = post.comment_to_id {
            if self.visited.insert(parent) {
                self.pending = Some(parent);
                return Some(parent);
            }
        }
        None
    }

    /// Stop waiting, keeping whatever ancestry was collected.
    pub fn abort_pending(&mut self) {
        self.pending = None;
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_none()
    }
}

/// Client-side post store. Posts are immutable snapshots; every change
/// replaces the snapshot and bumps `revision`, which is the store-level
/// change signal views key off. `like_count` and `liked_by_me` are written
/// only by `apply_like` - the like/unlike round trip is the single path
/// that mutates them.
pub struct PostState {
    posts: HashMap<Uuid, Arc<Post>>,
    pub feed: Vec<Uuid>,
    pub user_posts: HashMap<Uuid, Vec<Uuid>>,
    pub comments: HashMap<Uuid, Vec<Uuid>>,
    pub notifications: Vec<PostNotification>,
    like_in_flight: HashSet<Uuid>,
    revision: u64,

    /// Open post view, when any.
    pub viewing: Option<ReplyChain>,

    // Compose draft for new posts / replies
    pub compose: String,

    pub feed_list_state: ListState,
    pub notifications_list_state: ListState,
}

impl Default for PostState {
    fn default() -> Self {
        Self {
            posts: HashMap::new(),
            feed: Vec::new(),
            user_posts: HashMap::new(),
            comments: HashMap::new(),
            notifications: Vec::new(),
            like_in_flight: HashSet::new(),
            revision: 0,
            viewing: None,
            compose: String::new(),
            feed_list_state: ListState::default(),
            notifications_list_state: ListState::default(),
        }
    }
}

impl PostState {
    pub fn cached(&self, post_id: Uuid) -> Option<Arc<Post>> {
        self.posts.get(&post_id).cloned()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn upsert(&mut self, post: Post) {
        self.posts.insert(post.id, Arc::new(post));
        self.revision += 1;
    }

    pub fn set_feed(&mut self, posts: Vec<Post>) {
        self.feed = posts.iter().map(|p| p.id).collect();
        for post in posts {
            self.posts.insert(post.id, Arc::new(post));
        }
        self.revision += 1;
    }

    pub fn set_user_posts(&mut self, user_id: Uuid, posts: Vec<Post>) {
        let ids = posts.iter().map(|p| p.id).collect();
        for post in posts {
            self.posts.insert(post.id, Arc::new(post));
        }
        self.user_posts.insert(user_id, ids);
        self.revision += 1;
    }

    pub fn set_comments(&mut self, post_id: Uuid, posts: Vec<Post>) {
        let ids = posts.iter().map(|p| p.id).collect();
        for post in posts {
            self.posts.insert(post.id, Arc::new(post));
        }
        self.comments.insert(post_id, ids);
        self.revision += 1;
    }

    /// A newly created post lands at the top of its list.
    pub fn push_created(&mut self, post: Post) {
        match post.comment_to_id {
            Some(parent) => {
                self.comments.entry(parent).or_default().insert(0, post.id);
            }
            None => {
                self.feed.insert(0, post.id);
            }
        }
        self.posts.insert(post.id, Arc::new(post));
        self.revision += 1;
    }

    /// Begin a like/unlike round trip for a post. Returns the outbound
    /// request, or `None` while a previous request for the same post is
    /// still outstanding - a second toggle before resolution is ignored.
    pub fn toggle_like(&mut self, post_id: Uuid) -> Option<ClientMessage> {
        if self.like_in_flight.contains(&post_id) {
            return None;
        }
        let post = self.posts.get(&post_id)?;
        let request = if post.liked_by_me {
            ClientMessage::UnlikePost { post_id }
        } else {
            ClientMessage::LikePost { post_id }
        };
        self.like_in_flight.insert(post_id);
        Some(request)
    }

    /// Apply the confirmed result of a like/unlike round trip. This is the
    /// only writer of `like_count` and `liked_by_me`.
    pub fn apply_like(&mut self, post_id: Uuid, like_count: u32, liked_by_me: bool) {
        self.like_in_flight.remove(&post_id);
        if let Some(current) = self.posts.get(&post_id) {
            let mut next = Post::clone(current);
            next.like_count = like_count;
            next.liked_by_me = liked_by_me;
            self.posts.insert(post_id, Arc::new(next));
            self.revision += 1;
        }
    }

    /// A failed round trip only releases the guard; the snapshot stays as
    /// the server last confirmed it.
    pub fn like_failed(&mut self, post_id: Uuid) {
        self.like_in_flight.remove(&post_id);
    }

    pub fn like_request_outstanding(&self, post_id: Uuid) -> bool {
        self.like_in_flight.contains(&post_id)
    }

    /// Resolved ancestor chain of the open post view, root to leaf.
    pub fn view_chain(&self) -> Vec<Arc<Post>> {
        let Some(view) = &self.viewing else {
            return Vec::new();
        };
        view.chain
            .iter()
            .filter_map(|id| self.posts.get(id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::User;
    use chrono::Utc;

    fn post(comment_to_id: Option<Uuid>) -> Post {
        Post {
            id: Uuid::new_v4(),
            content: "hello".to_string(),
            created_by: User {
                id: Uuid::new_v4(),
                username: "mika".to_string(),
            },
            created_at: Utc::now(),
            like_count: 0,
            liked_by_me: false,
            comment_count: 0,
            comment_to_id,
        }
    }

    #[test]
    fn rapid_double_toggle_sends_exactly_one_request() {
        let mut posts = PostState::default();
        let p = post(None);
        let id = p.id;
        posts.upsert(p);

        let first = posts.toggle_like(id);
        let second = posts.toggle_like(id);
        assert!(matches!(first, Some(ClientMessage::LikePost { post_id }) if post_id == id));
        assert!(second.is_none());

        // The guard resets when the round trip resolves, either way.
        posts.apply_like(id, 1, true);
        let third = posts.toggle_like(id);
        assert!(matches!(third, Some(ClientMessage::UnlikePost { post_id }) if post_id == id));
    }

    #[test]
    fn like_failure_releases_guard_without_touching_snapshot() {
        let mut posts = PostState::default();
        let p = post(None);
        let id = p.id;
        posts.upsert(p);

        posts.toggle_like(id);
        posts.like_failed(id);

        let snapshot = posts.cached(id).unwrap();
        assert_eq!(snapshot.like_count, 0);
        assert!(!snapshot.liked_by_me);
        assert!(!posts.like_request_outstanding(id));
    }

    #[test]
    fn apply_like_replaces_snapshot_and_bumps_revision() {
        let mut posts = PostState::default();
        let p = post(None);
        let id = p.id;
        posts.upsert(p);
        let before = posts.revision();

        posts.toggle_like(id);
        posts.apply_like(id, 5, true);

        let snapshot = posts.cached(id).unwrap();
        assert_eq!(snapshot.like_count, 5);
        assert!(snapshot.liked_by_me);
        assert!(posts.revision() > before);
    }

    #[test]
    fn reply_chain_resolves_root_to_leaf_without_duplicate_fetches() {
        let root = post(None);
        let mid = post(Some(root.id));
        let leaf = post(Some(mid.id));

        let mut chain = ReplyChain::new(leaf.id);
        let mut fetched = vec![chain.pending().unwrap()];

        let next = chain.on_fetched(&leaf).unwrap();
        assert_eq!(next, mid.id);
        fetched.push(next);
        let next = chain.on_fetched(&mid).unwrap();
        assert_eq!(next, root.id);
        fetched.push(next);
        assert!(chain.on_fetched(&root).is_none());

        assert!(chain.is_complete());
        assert_eq!(chain.chain, vec![root.id, mid.id, leaf.id]);
        let unique: HashSet<_> = fetched.iter().collect();
        assert_eq!(unique.len(), fetched.len());
    }

    #[test]
    fn cyclic_reply_chain_terminates() {
        let mut a = post(None);
        let b = post(Some(a.id));
        let c = post(Some(b.id));
        // Malformed data: the root points back at the leaf.
        a.comment_to_id = Some(c.id);

        let mut chain = ReplyChain::new(c.id);
        assert_eq!(chain.on_fetched(&c), Some(b.id));
        assert_eq!(chain.on_fetched(&b), Some(a.id));
        // a's parent is c, already visited: the walk stops here.
        assert_eq!(chain.on_fetched(&a), None);
        assert!(chain.is_complete());
        assert_eq!(chain.chain, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn unsolicited_posts_do_not_advance_the_chain() {
        let target = post(None);
        let stray = post(None);

        let mut chain = ReplyChain::new(target.id);
        assert_eq!(chain.on_fetched(&stray), None);
        assert_eq!(chain.pending(), Some(target.id));
    }

    #[test]
    fn created_reply_lands_in_parent_comments() {
        let mut posts = PostState::default();
        let parent = post(None);
        let parent_id = parent.id;
        posts.upsert(parent);

        let reply = post(Some(parent_id));
        let reply_id = reply.id;
        posts.push_created(reply);

        assert_eq!(posts.comments.get(&parent_id).unwrap(), &vec![reply_id]);
        assert!(posts.feed.is_empty());
    }
}
