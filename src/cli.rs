//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quire blog content store CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: ./)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to the root (default: quire.toml)
    #[arg(short = 'C', long, global = true, default_value = "quire.toml")]
    pub config: PathBuf,

    /// Act as the blog owner: drafts and scheduled posts become visible
    #[arg(long, global = true)]
    pub admin: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the `new` command
#[derive(clap::Args, Debug, Clone)]
pub struct NewPostArgs {
    /// Post title
    pub title: String,

    /// Explicit slug (default: derived from the title)
    #[arg(long)]
    pub slug: Option<String>,

    /// Short summary shown in listings
    #[arg(long)]
    pub excerpt: Option<String>,

    /// File to read the post body from
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Save as a draft instead of publishing
    #[arg(long)]
    pub draft: bool,

    /// Publish date in RFC 3339 (default: now). A future date schedules the post
    #[arg(long)]
    pub pub_date: Option<String>,

    /// Category, repeatable
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Tag, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List visible posts, newest first
    List {
        /// Number of posts (default: [blog].posts_per_page)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Number of posts to skip
        #[arg(short, long, default_value_t = 0)]
        skip: usize,

        /// Only posts in this category
        #[arg(long, conflicts_with = "tag")]
        category: Option<String>,

        /// Only posts with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show one post by slug or id
    Show {
        /// Slug, or post id
        slug: String,
    },

    /// List categories of visible posts
    Categories,

    /// List tags of visible posts
    Tags {
        /// Only tags starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Create and save a new post
    New {
        #[command(flatten)]
        args: NewPostArgs,
    },

    /// Delete a post by id
    Delete {
        /// Post id
        id: String,
    },

    /// Copy a file into the assets directory
    Upload {
        /// File to upload
        path: PathBuf,

        /// Name suffix (default: a timestamp)
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Load every post and report unreadable files
    Check,
}

impl Cli {
    pub const fn caller(&self) -> crate::data::Caller {
        crate::data::Caller::from_admin(self.admin)
    }
}
