//! Post directory: the set of posts the feed is ranked over
//!
//! Each registered post owns a slot lock. Every write to a post's engagement
//! state (ledger, comment tree, aggregator) runs under that lock through
//! [`PostDirectory::with_post`], and [`PostDirectory::remove_with`] tears the
//! post down under the same lock before marking the slot dead. A writer that
//! looked the post up before the removal finds the slot dead and fails with
//! `PostNotFound` instead of recreating state for a post that is gone.

use std::sync::Arc;

use dashmap::DashMap;
use feed_core::{DomainError, DomainResult, PostRef, Snowflake};
use parking_lot::Mutex;

#[derive(Debug)]
struct PostSlot {
    post: PostRef,
    /// `false` once the post has been removed
    live: Mutex<bool>,
}

#[derive(Debug, Default)]
pub struct PostDirectory {
    posts: DashMap<Snowflake, Arc<PostSlot>>,
}

impl PostDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, post: PostRef) -> DomainResult<()> {
        use dashmap::mapref::entry::Entry;

        match self.posts.entry(post.id) {
            Entry::Occupied(_) => Err(DomainError::PostAlreadyExists(post.id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(PostSlot {
                    post,
                    live: Mutex::new(true),
                }));
                Ok(())
            }
        }
    }

    pub fn get(&self, post_id: Snowflake) -> DomainResult<PostRef> {
        self.slot(post_id).map(|slot| slot.post)
    }

    pub fn contains(&self, post_id: Snowflake) -> bool {
        self.posts.contains_key(&post_id)
    }

    /// Run `f` while holding the post's slot lock
    ///
    /// Fails with `PostNotFound` when the post is not registered, or was
    /// removed while this call waited for the lock.
    pub fn with_post<R>(
        &self,
        post_id: Snowflake,
        f: impl FnOnce(&PostRef) -> R,
    ) -> DomainResult<R> {
        let slot = self.slot(post_id)?;
        let live = slot.live.lock();
        if !*live {
            return Err(DomainError::PostNotFound(post_id));
        }
        Ok(f(&slot.post))
    }

    /// Unregister a post, running `teardown` under its slot lock first
    ///
    /// The slot stays in the map until `teardown` returns, so the id cannot
    /// be registered again while its old state is still being dropped.
    pub fn remove_with(
        &self,
        post_id: Snowflake,
        teardown: impl FnOnce(&PostRef),
    ) -> DomainResult<PostRef> {
        let slot = self.slot(post_id)?;
        let mut live = slot.live.lock();
        if !*live {
            return Err(DomainError::PostNotFound(post_id));
        }

        teardown(&slot.post);
        *live = false;
        self.posts
            .remove_if(&post_id, |_, current| Arc::ptr_eq(current, &slot));

        Ok(slot.post)
    }

    pub fn remove(&self, post_id: Snowflake) -> Option<PostRef> {
        self.remove_with(post_id, |_| ()).ok()
    }

    /// Copy of all registered posts, in no particular order
    pub fn list(&self) -> Vec<PostRef> {
        self.posts.iter().map(|slot| slot.post).collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    // The map guard is dropped before the caller takes the slot lock
    fn slot(&self, post_id: Snowflake) -> DomainResult<Arc<PostSlot>> {
        self.posts
            .get(&post_id)
            .map(|slot| Arc::clone(slot.value()))
            .ok_or(DomainError::PostNotFound(post_id))
    }
}
