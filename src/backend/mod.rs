//! Durability backends for posts.
//!
//! Every backend implements [`PostBackend`]; the document cache only talks to
//! the trait, so the storage format is a configuration choice.
//!
//! | Backend | Format | Durable |
//! |---------|--------|---------|
//! | `FileBackend<XmlCodec>` | one `{id}.xml` per post | yes |
//! | `FileBackend<JsonCodec>` | one `{id}.json` per post | yes |
//! | `MemoryBackend` | in-process map | no |

mod file;
mod json;
mod memory;
mod xml;

pub use file::{FileBackend, PostCodec};
pub use json::JsonCodec;
pub use memory::MemoryBackend;
pub use xml::XmlCodec;

use crate::config::{BlogConfig, StorageFormat};
use crate::data::{Post, StoreError};

/// Result of enumerating a backend at startup.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully parsed posts, in storage order.
    pub posts: Vec<Post>,
    /// Per-document failures. These never abort the load.
    pub skipped: Vec<StoreError>,
}

/// Persistence strategy for posts.
///
/// Implementations need not be internally serialized: the document cache
/// guarantees at most one `save`/`delete` runs at a time.
pub trait PostBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Enumerate and parse every stored post.
    ///
    /// Only failures that make the whole store unreadable are errors;
    /// a single bad document lands in [`LoadReport::skipped`].
    fn load_all(&self) -> Result<LoadReport, StoreError>;

    /// Write the full post, replacing any previous version.
    fn save(&self, post: &Post) -> Result<(), StoreError>;

    /// Remove the post. Removing a post that is not stored is not an error.
    fn delete(&self, post: &Post) -> Result<(), StoreError>;
}

/// Build the backend selected by `[store].format`.
pub fn open(config: &BlogConfig) -> Box<dyn PostBackend> {
    let dir = config.posts_dir();
    match config.store.format {
        StorageFormat::Xml => Box::new(FileBackend::<XmlCodec>::new(dir)),
        StorageFormat::Json => Box::new(FileBackend::<JsonCodec>::new(dir)),
        StorageFormat::Memory => Box::new(MemoryBackend::new()),
    }
}
