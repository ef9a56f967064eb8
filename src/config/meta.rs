//! `[blog]` section configuration.
//!
//! Blog metadata and reader-facing defaults.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[blog]` section in quire.toml.
///
/// # Example
/// ```toml
/// [blog]
/// title = "My Blog"
/// author = "Alice"
/// posts_per_page = 4
/// comments_close_after_days = 10
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MetaConfig {
    #[serde(default = "defaults::blog::title")]
    #[educe(Default = defaults::blog::title())]
    pub title: String,

    #[serde(default = "defaults::blog::author")]
    #[educe(Default = defaults::blog::author())]
    pub author: String,

    /// Page size for listings.
    #[serde(default = "defaults::blog::posts_per_page")]
    #[educe(Default = defaults::blog::posts_per_page())]
    pub posts_per_page: usize,

    /// Days after the publish date during which comments are accepted.
    /// `0` keeps comments open forever.
    #[serde(default = "defaults::blog::comments_close_after_days")]
    #[educe(Default = defaults::blog::comments_close_after_days())]
    pub comments_close_after_days: u32,
}
