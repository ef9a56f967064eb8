//! Uploaded asset storage.
//!
//! Files land in the configured assets directory as
//! `{basename}_{suffix}{ext}` and are addressed by a URL path relative to the
//! public root:
//!
//! ```text
//! save_file(bytes, "My Photo.png", None)
//!   → wwwroot/posts/files/My_Photo_1705307400000000000.png
//!   → "/posts/files/My_Photo_1705307400000000000.png"
//! ```
//!
//! Uploads never overwrite. What happens on a name collision is the
//! [`NamingPolicy`]: `Reject` surfaces [`AssetError::AlreadyExists`], `Probe`
//! appends `_1`, `_2`, ... until a free name is found.

mod fs;

pub use fs::{FileSystem, LocalFs, MemoryFs};

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::config::{BlogConfig, NamingPolicy};
use crate::log;
use crate::utils::{date::next_stamp, slug::sanitize_text};

/// Upper bound on names tried by [`NamingPolicy::Probe`].
const MAX_PROBES: usize = 10_000;

/// Errors raised while saving an upload.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset `{0}` already exists")]
    AlreadyExists(String),

    #[error("invalid asset file name `{0}`")]
    InvalidName(String),

    #[error("no free name left for asset `{0}`")]
    Exhausted(String),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// Writes uploads into one directory.
#[derive(Debug)]
pub struct AssetStore<F = LocalFs> {
    fs: F,
    dir: PathBuf,
    url_prefix: String,
    policy: NamingPolicy,
}

impl AssetStore<LocalFs> {
    /// Store on the local disk, as configured by `[assets]`.
    pub fn from_config(config: &BlogConfig) -> Self {
        Self::with_fs(
            LocalFs,
            config.assets_dir(),
            &url_prefix(&config.assets.dir),
            config.assets.naming,
        )
    }
}

impl<F: FileSystem> AssetStore<F> {
    /// `url_prefix` is the public URL path of `dir`, e.g. `/posts/files`.
    pub fn with_fs(fs: F, dir: impl Into<PathBuf>, url_prefix: &str, policy: NamingPolicy) -> Self {
        Self {
            fs,
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_owned(),
            policy,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub const fn policy(&self) -> NamingPolicy {
        self.policy
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Save `bytes` under a name derived from `file_name` and return its
    /// public path.
    ///
    /// `suffix` defaults to a high-resolution timestamp. Only the last path
    /// component of `file_name` is used.
    pub fn save_file(
        &self,
        bytes: &[u8],
        file_name: &str,
        suffix: Option<&str>,
    ) -> Result<String, AssetError> {
        let (base, ext) = split_name(file_name)?;
        let suffix = match suffix {
            Some(s) => sanitize_text(s),
            None => next_stamp().to_string(),
        };
        let stem = if suffix.is_empty() {
            base
        } else {
            format!("{base}_{suffix}")
        };

        self.fs
            .create_dir_all(&self.dir)
            .map_err(|err| AssetError::Io(self.dir.clone(), err))?;

        let name = match self.policy {
            NamingPolicy::Reject => {
                let name = format!("{stem}{ext}");
                self.write(&name, bytes)?;
                name
            }
            NamingPolicy::Probe => self.write_probing(&stem, &ext, bytes)?,
        };

        let url = format!("{}/{}", self.url_prefix, urlencoding::encode(&name));
        log!("assets"; "{url}");
        Ok(url)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), AssetError> {
        let path = self.dir.join(name);
        self.fs.write_new(&path, bytes).map_err(|err| {
            if err.kind() == io::ErrorKind::AlreadyExists {
                AssetError::AlreadyExists(name.to_owned())
            } else {
                AssetError::Io(path, err)
            }
        })
    }

    /// Try `{stem}{ext}`, then `{stem}_1{ext}`, `{stem}_2{ext}`, ...
    fn write_probing(&self, stem: &str, ext: &str, bytes: &[u8]) -> Result<String, AssetError> {
        for n in 0..MAX_PROBES {
            let name = match n {
                0 => format!("{stem}{ext}"),
                n => format!("{stem}_{n}{ext}"),
            };
            if self.fs.exists(&self.dir.join(&name)) {
                continue;
            }
            match self.write(&name, bytes) {
                Ok(()) => return Ok(name),
                // Lost a race with a concurrent upload
                Err(AssetError::AlreadyExists(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(AssetError::Exhausted(format!("{stem}{ext}")))
    }
}

/// Split an uploaded name into a sanitized base name and `.ext` (possibly empty).
fn split_name(file_name: &str) -> Result<(String, String), AssetError> {
    let last = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let path = Path::new(last);

    let base = path
        .file_stem()
        .map(|s| sanitize_text(&s.to_string_lossy()))
        .unwrap_or_default();
    if base.is_empty() || base.chars().all(|c| c == '.') {
        return Err(AssetError::InvalidName(file_name.to_owned()));
    }

    let ext = path
        .extension()
        .map(|e| sanitize_text(&e.to_string_lossy()))
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    Ok((base, ext))
}

/// `/a/b` for the relative directory `a/b`.
fn url_prefix(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(format!("/{}", part.to_string_lossy())),
            _ => None,
        })
        .collect()
}
