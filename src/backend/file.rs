//! One-file-per-post storage, generic over the document codec.
//!
//! # Layout
//!
//! ```text
//! posts/
//! ├── 1705307400000000000.xml   ← {id}.{ext}
//! ├── 1705393800000000000.xml
//! └── files/                    ← assets, not scanned (depth 1)
//! ```
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so a crash never leaves a truncated document behind.

use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use super::{LoadReport, PostBackend};
use crate::data::{Post, StoreError, check_id};

/// Serialization format of a single post document.
pub trait PostCodec: Send + Sync + 'static {
    /// File extension, without the dot.
    const EXTENSION: &'static str;

    /// Serialize the full post. The id is not part of the document.
    fn encode(post: &Post) -> anyhow::Result<Vec<u8>>;

    /// Parse a document. The returned post has an empty id.
    fn decode(bytes: &[u8]) -> anyhow::Result<Post>;
}

/// Directory of `{id}.{ext}` documents.
#[derive(Debug)]
pub struct FileBackend<C> {
    dir: PathBuf,
    codec: PhantomData<fn() -> C>,
}

impl<C: PostCodec> FileBackend<C> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            codec: PhantomData,
        }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document path for a post id. Ids that would leave the directory are
    /// rejected.
    pub fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        check_id(id)?;
        Ok(self.dir.join(format!("{id}.{}", C::EXTENSION)))
    }

    /// Document files directly under the directory, sorted by name.
    fn document_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| StoreError::io(&self.dir, io::Error::from(err)))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == C::EXTENSION)
            {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    fn read_document(path: &Path) -> Result<Post, StoreError> {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StoreError::Malformed {
                path: path.to_path_buf(),
                reason: "file name is not a valid post id".into(),
            })?
            .to_owned();

        let bytes = fs::read(path).map_err(|err| StoreError::io(path, err))?;
        let mut post = C::decode(&bytes).map_err(|err| StoreError::Malformed {
            path: path.to_path_buf(),
            reason: format!("{err:#}"),
        })?;
        post.id = id;
        Ok(post)
    }
}

impl<C: PostCodec> PostBackend for FileBackend<C> {
    fn name(&self) -> &'static str {
        C::EXTENSION
    }

    fn load_all(&self) -> Result<LoadReport, StoreError> {
        let files = self.document_files()?;
        let results: Vec<_> = files
            .par_iter()
            .map(|path| Self::read_document(path))
            .collect();

        let mut report = LoadReport::default();
        for result in results {
            match result {
                Ok(post) => report.posts.push(post),
                Err(err) => report.skipped.push(err),
            }
        }
        Ok(report)
    }

    fn save(&self, post: &Post) -> Result<(), StoreError> {
        let path = self.path_for(&post.id)?;
        let bytes = C::encode(post).map_err(|err| StoreError::Encode {
            id: post.id.clone(),
            reason: format!("{err:#}"),
        })?;

        fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;
        tmp.write_all(&bytes).map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.persist(&path)
            .map_err(|err| StoreError::io(&path, err.error))?;
        Ok(())
    }

    fn delete(&self, post: &Post) -> Result<(), StoreError> {
        if post.id.is_empty() {
            return Ok(());
        }

        let path = self.path_for(&post.id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }
}
