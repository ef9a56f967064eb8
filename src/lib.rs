//! Quire - the content store of a blog engine.
//!
//! Holds the authoritative set of posts in memory, keeps it in sync with
//! one document per post on disk, filters reads by caller visibility,
//! indexes slugs and tags in prefix tries and stores uploaded assets
//! without ever overwriting them.

pub mod assets;
pub mod backend;
pub mod blog;
pub mod cli;
pub mod config;
pub mod data;
pub mod logger;
pub mod utils;

pub use blog::Blog;
