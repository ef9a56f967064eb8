//! URL slug allocation and file-name sanitizing.
//!
//! Converts post titles to URL-safe slugs and uploaded file names to
//! path-safe names.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Default maximum slug length, in characters.
pub const DEFAULT_SLUG_LENGTH: usize = 50;

/// Characters forbidden in file paths and fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '"', '(', ')', '[', ']', '\t', '\r', '\n',
];

/// URL-reserved and punctuation characters stripped from slugs
const SLUG_RESERVED_CHARS: &[char] = &[
    '!', '#', '$', '&', '\'', '(', ')', '*', ',', '/', ':', ';', '=', '?', '@', '[', ']', '"',
    '%', '.', '<', '>', '\\', '^', '_', '{', '}', '|', '~', '`', '+',
];

// ============================================================================
// Slug Allocation
// ============================================================================

/// Convert a post title into a URL slug.
///
/// Lower-cases, turns spaces into dashes, strips diacritics (canonical
/// decomposition, combining marks dropped, recomposed), drops reserved
/// punctuation and keeps at most `max_length` characters. Never fails; an
/// empty title yields an empty slug.
///
/// Uniqueness is not checked here, the document cache owns that.
///
/// # Examples
///
/// | Title | Slug |
/// |-------|------|
/// | `Héllo, World!` | `hello-world` |
/// | `C# & .NET` | `c--net` |
/// | `你好 世界` | `你好-世界` |
/// | `Ёлка` | `елка` |
pub fn create_slug(title: &str, max_length: usize) -> String {
    strip_diacritics(&title.to_lowercase())
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| !SLUG_RESERVED_CHARS.contains(c))
        .take(max_length)
        .collect()
}

/// NFD, drop every combining mark, NFC.
///
/// Letters without a canonical decomposition (`ø`, `ß`) are kept as is.
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

// ============================================================================
// File Names
// ============================================================================

/// Remove forbidden characters and replace whitespace with underscores
pub fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
