//! Blog entities.
//!
//! A [`Post`] owns its [`Comment`]s; comments have no lifecycle of their own
//! and are persisted together with the post.

use std::path::{Component, Path};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::visibility::PostState;
use crate::utils::date::next_id;

/// A blog post.
///
/// Becomes durable only when passed to
/// [`DocumentCache::save_post`](super::DocumentCache::save_post), which assigns
/// the id on first save and stamps `last_modified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable opaque id. Empty until the first save. Stored as the file stem,
    /// never inside the document.
    #[serde(skip)]
    pub id: String,

    pub title: String,

    /// Lower-case URL slug, unique across the store.
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub content: String,

    pub pub_date: DateTime<Utc>,

    pub last_modified: DateTime<Utc>,

    #[serde(default = "published_by_default")]
    pub is_published: bool,

    /// Categories in author order; case preserved.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tags in author order; case preserved.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// A new, unsaved, published post dated now.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: title.into(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            pub_date: now,
            last_modified: now,
            is_published: true,
            categories: Vec::new(),
            tags: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Relative URL of the post page.
    pub fn link(&self) -> String {
        format!("/blog/{}/", self.slug)
    }

    /// Lifecycle state at `now`, derived from the publish flag and date.
    pub fn state(&self, now: DateTime<Utc>) -> PostState {
        PostState::of(self, now)
    }

    /// Case-insensitive category membership.
    pub fn has_category(&self, category: &str) -> bool {
        contains_folded(&self.categories, category)
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        contains_folded(&self.tags, tag)
    }

    /// Whether new comments are accepted at `now`.
    ///
    /// Comments close `close_after_days` days after the publish date;
    /// `0` keeps them open forever.
    pub fn are_comments_open(&self, close_after_days: u32, now: DateTime<Utc>) -> bool {
        close_after_days == 0
            || self
                .pub_date
                .checked_add_signed(Duration::days(i64::from(close_after_days)))
                .is_none_or(|close| close >= now)
    }

    /// Append a comment. Persisted on the next save.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Remove a comment by id, returning it if present.
    pub fn remove_comment(&mut self, id: &str) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        Some(self.comments.remove(index))
    }
}

/// Check that `id` can name a document file.
///
/// The id becomes the file stem, so it must be a single plain path
/// component: no separators, no `.`/`..`, no surrounding whitespace.
pub fn check_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() {
        return Err(StoreError::MissingId);
    }
    let mut components = Path::new(id).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == id
    );
    if !single || id.trim() != id || id.contains(['/', '\\']) || id.contains("..") {
        return Err(StoreError::InvalidId(id.to_owned()));
    }
    Ok(())
}

/// A reader comment, owned by its post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub email: String,
    pub content: String,
    pub pub_date: DateTime<Utc>,
    /// Written by the blog owner.
    #[serde(default)]
    pub is_admin: bool,
}

impl Comment {
    /// A new comment with a generated id, dated now.
    pub fn new(
        author: impl Into<String>,
        email: impl Into<String>,
        content: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id: next_id(),
            author: author.into(),
            email: email.into(),
            content: content.into(),
            pub_date: Utc::now(),
            is_admin,
        }
    }
}

const fn published_by_default() -> bool {
    true
}

fn contains_folded(values: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    values.iter().any(|v| v.to_lowercase() == needle)
}
