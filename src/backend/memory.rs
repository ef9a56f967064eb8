//! Non-durable backend keeping documents in process memory.
//!
//! Useful for previews and tests; everything is lost on exit.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{LoadReport, PostBackend};
use crate::data::{Post, StoreError, check_id};

/// Map of post id to the last saved version.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    posts: RwLock<BTreeMap<String, Post>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with already-identified posts.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let posts = posts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }

    /// Stored version of a post.
    pub fn get(&self, id: &str) -> Option<Post> {
        self.posts.read().get(id).cloned()
    }
}

impl PostBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_all(&self) -> Result<LoadReport, StoreError> {
        Ok(LoadReport {
            posts: self.posts.read().values().cloned().collect(),
            skipped: Vec::new(),
        })
    }

    fn save(&self, post: &Post) -> Result<(), StoreError> {
        check_id(&post.id)?;
        self.posts.write().insert(post.id.clone(), post.clone());
        Ok(())
    }

    fn delete(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().remove(&post.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        let mut post = Post::new(id);
        post.id = id.into();
        post
    }

    #[test]
    fn test_save_load_delete() {
        let backend = MemoryBackend::new();
        backend.save(&post("a")).unwrap();
        backend.save(&post("b")).unwrap();
        assert_eq!(backend.len(), 2);

        backend.delete(&post("a")).unwrap();
        backend.delete(&post("a")).unwrap();
        let report = backend.load_all().unwrap();
        assert_eq!(report.posts.len(), 1);
        assert_eq!(report.posts[0].id, "b");
    }

    #[test]
    fn test_with_posts() {
        let backend = MemoryBackend::with_posts([post("x"), post("y")]);
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.get("x").unwrap().title, "x");
        assert!(backend.get("z").is_none());
    }

    #[test]
    fn test_save_requires_id() {
        let backend = MemoryBackend::new();
        assert!(matches!(backend.save(&Post::new("t")), Err(StoreError::MissingId)));
        assert!(backend.is_empty());
    }
}
