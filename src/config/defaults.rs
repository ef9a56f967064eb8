//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [blog] Section Defaults
// ============================================================================

pub mod blog {
    pub fn title() -> String {
        "My Blog".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn posts_per_page() -> usize {
        4
    }

    pub fn comments_close_after_days() -> u32 {
        10
    }
}

// ============================================================================
// [store] Section Defaults
// ============================================================================

pub mod store {
    use std::path::PathBuf;

    pub fn public() -> PathBuf {
        "wwwroot".into()
    }

    pub fn posts() -> PathBuf {
        "posts".into()
    }
}

// ============================================================================
// [assets] Section Defaults
// ============================================================================

pub mod assets {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "posts/files".into()
    }
}

// ============================================================================
// [slug] Section Defaults
// ============================================================================

pub mod slug {
    pub fn max_length() -> usize {
        crate::utils::slug::DEFAULT_SLUG_LENGTH
    }
}
