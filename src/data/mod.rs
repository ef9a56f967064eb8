//! Content store: posts, indexes and visibility.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            DocumentCache                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Reads                                                                  │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────────────────┐    │
//! │  │ get_post*   │ ──► │ Snapshot    │ ──► │ is_visible(post, caller)│    │
//! │  │ get_tags... │     │ (+ tries)   │     │ sorted, windowed        │    │
//! │  └─────────────┘     └─────────────┘     └─────────────────────────┘    │
//! │                                                                         │
//! │  Writes (one at a time)                                                 │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────────────────┐    │
//! │  │ save_post   │ ──► │ create_slug │ ──► │ PostBackend::save       │    │
//! │  │ delete_post │     │ (new only)  │     │ then swap Snapshot      │    │
//! │  └─────────────┘     └─────────────┘     └─────────────────────────┘    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Post state (draft, scheduled, live) is never stored. It is derived from
//! `is_published` and `pub_date` on every read, so scheduled posts go live
//! without a write.

mod cache;
mod error;
mod trie;
mod types;
mod visibility;

pub use cache::DocumentCache;
pub use error::StoreError;
pub use trie::{Trie, WILDCARD};
pub use types::{Comment, Post, check_id};
pub use visibility::{Caller, PostState, is_visible, is_visible_at};
