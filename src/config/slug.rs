//! `[slug]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[slug]` section in quire.toml.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SlugConfig {
    /// Maximum slug length in characters, before any `-N` suffix.
    #[serde(default = "defaults::slug::max_length")]
    #[educe(Default = defaults::slug::max_length())]
    pub max_length: usize,
}
