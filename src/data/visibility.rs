//! Read-side visibility policy.
//!
//! Visibility is always derived from `is_published`, `pub_date` and the
//! caller at query time. Nothing is cached, so a scheduled post goes live on
//! its own once the clock passes its publish date.

use chrono::{DateTime, Utc};

use super::types::Post;

/// Identity of the caller, passed explicitly into every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    /// Any visitor. Sees live posts only.
    #[default]
    Anonymous,
    /// The authenticated blog owner. Sees drafts and scheduled posts too.
    Admin,
}

impl Caller {
    pub const fn from_admin(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Anonymous }
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Lifecycle state of a post at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostState {
    /// Not published.
    Draft,
    /// Published with a publish date in the future.
    Scheduled,
    /// Published and due.
    Live,
}

impl PostState {
    pub fn of(post: &Post, now: DateTime<Utc>) -> Self {
        match (post.is_published, post.pub_date <= now) {
            (false, _) => Self::Draft,
            (true, false) => Self::Scheduled,
            (true, true) => Self::Live,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
        }
    }
}

/// Whether `post` is visible to `caller` right now.
#[inline]
pub fn is_visible(post: &Post, caller: Caller) -> bool {
    is_visible_at(post, caller, Utc::now())
}

/// Whether `post` is visible to `caller` at `now`.
///
/// Admins see every state; everyone else sees [`PostState::Live`] only.
pub fn is_visible_at(post: &Post, caller: Caller, now: DateTime<Utc>) -> bool {
    caller.is_admin() || PostState::of(post, now) == PostState::Live
}
