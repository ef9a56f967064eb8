//! `[store]` section configuration.
//!
//! Where posts live and which backend persists them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Post storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// One `{id}.xml` file per post.
    #[default]
    Xml,
    /// One `{id}.json` file per post.
    Json,
    /// Nothing written to disk.
    Memory,
}

/// `[store]` section in quire.toml.
///
/// # Example
/// ```toml
/// [store]
/// public = "wwwroot"
/// posts = "posts"     # relative to `public`
/// format = "xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Public root directory. Relative paths resolve against the project root.
    #[serde(default = "defaults::store::public")]
    #[educe(Default = defaults::store::public())]
    pub public: PathBuf,

    /// Posts directory, relative to `public`.
    #[serde(default = "defaults::store::posts")]
    #[educe(Default = defaults::store::posts())]
    pub posts: PathBuf,

    #[serde(default)]
    pub format: StorageFormat,
}

#[cfg(test)]
mod tests {
    use super::super::BlogConfig;
    use super::*;

    #[test]
    fn test_store_section() {
        let config = r#"
            [store]
            public = "site"
            posts = "data/posts"
            format = "json"
        "#;
        let config = BlogConfig::from_str(config).unwrap();

        assert_eq!(config.store.public, PathBuf::from("site"));
        assert_eq!(config.store.posts, PathBuf::from("data/posts"));
        assert_eq!(config.store.format, StorageFormat::Json);
    }

    #[test]
    fn test_store_section_defaults() {
        let config = BlogConfig::from_str("").unwrap();

        assert_eq!(config.store.public, PathBuf::from("wwwroot"));
        assert_eq!(config.store.posts, PathBuf::from("posts"));
        assert_eq!(config.store.format, StorageFormat::Xml);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(BlogConfig::from_str("[store]\nformat = \"sqlite\"").is_err());
    }
}
