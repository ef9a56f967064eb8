//! Prefix index over string keys.
//!
//! A character tree used to accelerate slug and tag lookups.
//!
//! # Structure
//!
//! ```text
//! insert("car"), insert("cat"), insert("carton")
//!
//! root
//! └── 'c'
//!     └── 'a'
//!         ├── 't' [end]
//!         └── 'r' [end]
//!             └── 't' ── 'o' ── 'n' [end]
//! ```
//!
//! `[end]` marks a node where an inserted key terminates. A node without the
//! marker is only a prefix of longer keys, so `search("ca")` is false while
//! `search("ca*")` is true.
//!
//! Children are kept in an `FxHashMap`, giving O(|key|) descent with O(1)
//! expected lookup per level.

use rustc_hash::FxHashMap;

/// Suffix that turns a search into a prefix query.
pub const WILDCARD: char = '*';

#[derive(Debug, Clone, Default)]
struct Node {
    children: FxHashMap<char, Node>,
    /// An inserted key ends at this node.
    terminal: bool,
}

impl Node {
    #[inline]
    fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.terminal
    }
}

/// Set of string keys supporting exact and prefix membership queries.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: Node,
    len: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys stored.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key. Inserting an existing key is a no-op.
    pub fn insert(&mut self, key: &str) {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    /// Membership query.
    ///
    /// A trailing `*` makes it a prefix query: true iff some inserted key
    /// starts with the rest. Otherwise true iff `key` was inserted as a whole
    /// key, not merely as the prefix of a longer one.
    pub fn search(&self, key: &str) -> bool {
        match key.strip_suffix(WILDCARD) {
            Some(prefix) => self.has_prefix(prefix),
            None => self.contains(key),
        }
    }

    /// Exact-key membership, without wildcard handling.
    pub fn contains(&self, key: &str) -> bool {
        let (node, depth) = self.prefix(key);
        depth == key.chars().count() && node.terminal
    }

    /// True iff some inserted key starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.is_empty();
        }
        let (_, depth) = self.prefix(prefix);
        depth == prefix.chars().count()
    }

    /// Length, in characters, of the longest prefix of `s` present in the tree.
    pub fn longest_prefix_len(&self, s: &str) -> usize {
        self.prefix(s).1
    }

    /// Remove a key.
    ///
    /// Ancestors left without children are pruned, so keys sharing a prefix
    /// with the removed one are unaffected. Returns whether the key existed.
    pub fn delete(&mut self, key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        let chars: Vec<char> = key.chars().collect();
        Self::remove(&mut self.root, &chars);
        self.len -= 1;
        true
    }

    /// All keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let (node, depth) = self.prefix(prefix);
        if depth != prefix.chars().count() {
            return Vec::new();
        }

        let mut keys = Vec::new();
        let mut buf = prefix.to_owned();
        Self::collect(node, &mut buf, &mut keys);
        keys.sort();
        keys
    }

    /// Deepest node reachable by following `s` from the root, and its depth.
    fn prefix(&self, s: &str) -> (&Node, usize) {
        let mut node = &self.root;
        let mut depth = 0;
        for c in s.chars() {
            match node.children.get(&c) {
                Some(child) => {
                    node = child;
                    depth += 1;
                }
                None => break,
            }
        }
        (node, depth)
    }

    /// Clear the terminal marker at the end of `chars`, pruning on the way up.
    ///
    /// Returns true when `node` itself became empty and should be unlinked.
    fn remove(node: &mut Node, chars: &[char]) -> bool {
        match chars.split_first() {
            None => node.terminal = false,
            Some((c, rest)) => {
                let prune = node
                    .children
                    .get_mut(c)
                    .is_some_and(|child| Self::remove(child, rest));
                if prune {
                    node.children.remove(c);
                }
            }
        }
        node.is_leaf()
    }

    fn collect(node: &Node, buf: &mut String, keys: &mut Vec<String>) {
        if node.terminal {
            keys.push(buf.clone());
        }
        for (c, child) in &node.children {
            buf.push(*c);
            Self::collect(child, buf, keys);
            buf.pop();
        }
    }
}

impl<'a> FromIterator<&'a str> for Trie {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Self::new();
        for key in iter {
            trie.insert(key);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trie {
        ["cat", "car", "carton"].into_iter().collect()
    }

    #[test]
    fn test_search_inserted_keys() {
        let trie = sample();
        assert!(trie.search("cat"));
        assert!(trie.search("car"));
        assert!(trie.search("carton"));
        assert!(!trie.search("dog"));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_search_prefix_is_not_a_key() {
        let trie = sample();
        assert!(!trie.search("ca"));
        assert!(!trie.search("cart"));
        assert!(!trie.search("cartons"));
    }

    #[test]
    fn test_search_wildcard() {
        let trie = sample();
        assert!(trie.search("ca*"));
        assert!(trie.search("cart*"));
        assert!(trie.search("carton*"));
        assert!(!trie.search("cab*"));
        assert!(!trie.search("cartons*"));
    }

    #[test]
    fn test_wildcard_on_empty_prefix() {
        assert!(sample().search("*"));
        assert!(!Trie::new().search("*"));
    }

    #[test]
    fn test_delete_keeps_siblings() {
        let mut trie = sample();
        assert!(trie.delete("cat"));
        assert!(!trie.search("cat"));
        assert!(trie.search("car"));
        assert!(trie.search("carton"));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_delete_prefix_key_keeps_longer_key() {
        let mut trie = sample();
        assert!(trie.delete("car"));
        assert!(!trie.search("car"));
        assert!(trie.search("carton"));
        assert!(trie.search("car*"));
    }

    #[test]
    fn test_delete_longer_key_prunes_branch() {
        let mut trie = sample();
        assert!(trie.delete("carton"));
        assert!(trie.search("car"));
        assert!(!trie.search("cart*"));
        // Only "c-a-r" remains of the pruned branch
        assert_eq!(trie.longest_prefix_len("carton"), 3);
    }

    #[test]
    fn test_delete_missing_key() {
        let mut trie = sample();
        assert!(!trie.delete("ca"));
        assert!(!trie.delete("dog"));
        assert_eq!(trie.len(), 3);
        assert!(trie.search("car*"));
    }

    #[test]
    fn test_delete_all_empties_tree() {
        let mut trie = sample();
        for key in ["cat", "car", "carton"] {
            assert!(trie.delete(key));
        }
        assert!(trie.is_empty());
        assert_eq!(trie.longest_prefix_len("carton"), 0);
        assert!(!trie.search("c*"));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut trie = sample();
        trie.insert("car");
        assert_eq!(trie.len(), 3);
        assert!(trie.delete("car"));
        assert!(!trie.search("car"));
    }

    #[test]
    fn test_longest_prefix_len() {
        let trie = sample();
        assert_eq!(trie.longest_prefix_len("cartoon"), 4);
        assert_eq!(trie.longest_prefix_len("dog"), 0);
        assert_eq!(trie.longest_prefix_len(""), 0);
    }

    #[test]
    fn test_unicode_keys() {
        let mut trie = Trie::new();
        trie.insert("你好");
        trie.insert("你们");
        assert!(trie.search("你*"));
        assert!(trie.delete("你好"));
        assert!(trie.search("你们"));
        assert!(!trie.search("你好"));
    }

    #[test]
    fn test_keys_with_prefix() {
        let trie = sample();
        assert_eq!(trie.keys_with_prefix("car"), vec!["car", "carton"]);
        assert_eq!(trie.keys_with_prefix(""), vec!["car", "carton", "cat"]);
        assert!(trie.keys_with_prefix("dog").is_empty());
    }

    #[test]
    fn test_literal_star_key_via_contains() {
        let mut trie = Trie::new();
        trie.insert("a*");
        assert!(trie.contains("a*"));
        // As a search pattern the star is a wildcard
        assert!(trie.search("a*"));
        assert!(!trie.contains("a"));
    }
}
