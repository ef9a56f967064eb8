//! `[assets]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when an upload's target name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// Fail with `AlreadyExists`; the caller picks another suffix.
    #[default]
    Reject,
    /// Append `_1`, `_2`, ... until a free name is found.
    Probe,
}

/// `[assets]` section in quire.toml.
///
/// # Example
/// ```toml
/// [assets]
/// dir = "posts/files"  # relative to [store].public, also the URL prefix
/// naming = "probe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Upload directory relative to the public root.
    #[serde(default = "defaults::assets::dir")]
    #[educe(Default = defaults::assets::dir())]
    pub dir: PathBuf,

    #[serde(default)]
    pub naming: NamingPolicy,
}
