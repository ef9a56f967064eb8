//! JSON post documents.
//!
//! Same fields as the XML format in camelCase, dates as RFC 3339.

use anyhow::{Context, Result};

use super::PostCodec;
use crate::data::Post;

/// Codec for `{id}.json` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PostCodec for JsonCodec {
    const EXTENSION: &'static str = "json";

    fn encode(post: &Post) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(post)?)
    }

    fn decode(bytes: &[u8]) -> Result<Post> {
        serde_json::from_slice(bytes).context("invalid post document")
    }
}
