//! The content store as one object, built once at startup.

use std::sync::Arc;

use chrono::Utc;

use crate::assets::AssetStore;
use crate::backend;
use crate::config::BlogConfig;
use crate::data::{Caller, DocumentCache, Post, StoreError};

/// Posts and assets of one blog, wired from its configuration.
///
/// Pass it by reference to whatever serves requests; there is no global
/// instance.
#[derive(Debug)]
pub struct Blog {
    config: BlogConfig,
    posts: DocumentCache,
    assets: AssetStore,
}

impl Blog {
    /// Build the configured backend, load every post and prepare the asset
    /// store.
    pub fn open(config: &BlogConfig) -> Result<Self, StoreError> {
        let posts = DocumentCache::open(backend::open(config), config.slug.max_length)?;
        Ok(Self {
            config: config.clone(),
            posts,
            assets: AssetStore::from_config(config),
        })
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn posts(&self) -> &DocumentCache {
        &self.posts
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// One listing page (0-based) of `[blog].posts_per_page` posts.
    pub fn page(&self, page: usize, caller: Caller) -> Vec<Arc<Post>> {
        let per_page = self.config.blog.posts_per_page;
        self.posts
            .get_posts(per_page, page.saturating_mul(per_page), caller)
    }

    /// Whether `post` still accepts comments under `[blog].comments_close_after_days`.
    pub fn are_comments_open(&self, post: &Post) -> bool {
        post.are_comments_open(self.config.blog.comments_close_after_days, Utc::now())
    }
}
