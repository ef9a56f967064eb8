//! In-memory working set of posts.
//!
//! # Concurrency
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 DocumentCache (ArcSwap<Snapshot>)           │
//! │                                                             │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────┐    │
//! │  │  Reader 1   │     │  Reader 2   │     │   Writer    │    │
//! │  └──────┬──────┘     └──────┬──────┘     └──────┬──────┘    │
//! │         │                   │                   │           │
//! │         ▼                   ▼                   ▼           │
//! │    get_posts()        get_post_by_slug()   save_post()      │
//! │    (lock-free)          (lock-free)     (writer mutex,      │
//! │                                          copy-on-write)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers load the current [`Snapshot`] and never block. Writers are
//! serialized by a single mutex held across the backend write and the
//! snapshot swap, so the durable file and the cache change together.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;
use parking_lot::Mutex;

use super::error::StoreError;
use super::trie::Trie;
use super::types::{Post, check_id};
use super::visibility::{Caller, is_visible_at};
use crate::backend::PostBackend;
use crate::log;
use crate::utils::{date::next_id, slug::create_slug};

/// Immutable view of the cache, replaced wholesale on every write.
///
/// The tries are shared between snapshots and only copied by a write that
/// actually changes their keys.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    /// Sorted by `pub_date`, newest first.
    posts: Vec<Arc<Post>>,
    /// Lower-cased slugs of all cached posts.
    slugs: Arc<Trie>,
    /// Lower-cased tags of all cached posts.
    tags: Arc<Trie>,
}

impl Snapshot {
    fn new(posts: Vec<Post>) -> Self {
        let mut snapshot = Self {
            posts: posts.into_iter().map(Arc::new).collect(),
            ..Self::default()
        };
        snapshot.sort();
        for post in snapshot.posts.clone() {
            snapshot.index(&post);
        }
        snapshot
    }

    /// Stable, so equal dates keep their relative order.
    fn sort(&mut self) {
        self.posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    /// Whether a post other than `id` owns `slug`.
    fn slug_taken(&self, slug: &str, id: &str) -> bool {
        self.slugs.contains(slug)
            && self
                .posts
                .iter()
                .any(|p| p.id != id && p.slug.to_lowercase() == slug)
    }

    /// Add the keys of `post` that are not indexed yet.
    fn index(&mut self, post: &Post) {
        let slug = post.slug.to_lowercase();
        if !slug.is_empty() && !self.slugs.contains(&slug) {
            Arc::make_mut(&mut self.slugs).insert(&slug);
        }
        for tag in post.tags.iter().filter(|t| !t.is_empty()) {
            let tag = tag.to_lowercase();
            if !self.tags.contains(&tag) {
                Arc::make_mut(&mut self.tags).insert(&tag);
            }
        }
    }

    /// Drop the keys of `post` that no remaining post still carries.
    fn unindex(&mut self, post: &Post) {
        let slug = post.slug.to_lowercase();
        if self.slugs.contains(&slug) && !self.posts.iter().any(|p| p.slug.to_lowercase() == slug) {
            Arc::make_mut(&mut self.slugs).delete(&slug);
        }
        for tag in &post.tags {
            let tag = tag.to_lowercase();
            if self.tags.contains(&tag) && !self.posts.iter().any(|p| p.has_tag(&tag)) {
                Arc::make_mut(&mut self.tags).delete(&tag);
            }
        }
    }
}

/// The authoritative set of posts, kept in sync with a [`PostBackend`].
pub struct DocumentCache {
    backend: Box<dyn PostBackend>,
    snapshot: ArcSwap<Snapshot>,
    writer: Mutex<()>,
    slug_max_length: usize,
    skipped: Vec<StoreError>,
}

impl DocumentCache {
    /// Load every post from `backend`.
    ///
    /// Documents that fail to parse are logged and skipped; only a failure to
    /// enumerate the store itself is an error.
    pub fn open(backend: Box<dyn PostBackend>, slug_max_length: usize) -> Result<Self, StoreError> {
        let report = backend.load_all()?;
        for err in &report.skipped {
            log!("error"; "skipped {err}");
        }
        log!(
            "store";
            "loaded {} posts ({}), skipped {}",
            report.posts.len(),
            backend.name(),
            report.skipped.len()
        );

        Ok(Self {
            backend,
            snapshot: ArcSwap::from_pointee(Snapshot::new(report.posts)),
            writer: Mutex::new(()),
            slug_max_length,
            skipped: report.skipped,
        })
    }

    /// Documents that could not be loaded at startup.
    pub fn skipped(&self) -> &[StoreError] {
        &self.skipped
    }

    /// Number of cached posts, visible or not.
    pub fn len(&self) -> usize {
        self.snapshot.load().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backend name, e.g. `xml`.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Visible posts, newest first, windowed by `skip` and `count`.
    pub fn get_posts(&self, count: usize, skip: usize, caller: Caller) -> Vec<Arc<Post>> {
        self.visible_where(caller, |_| true)
            .into_iter()
            .skip(skip)
            .take(count)
            .collect()
    }

    /// Visible posts in `category` (case-insensitive), newest first.
    pub fn get_posts_by_category(&self, category: &str, caller: Caller) -> Vec<Arc<Post>> {
        self.visible_where(caller, |p| p.has_category(category))
    }

    /// Visible posts tagged `tag` (case-insensitive), newest first.
    pub fn get_posts_by_tag(&self, tag: &str, caller: Caller) -> Vec<Arc<Post>> {
        let tag = tag.to_lowercase();
        if !self.snapshot.load().tags.contains(&tag) {
            return Vec::new();
        }
        self.visible_where(caller, |p| p.has_tag(&tag))
    }

    /// Case-insensitive slug lookup. Invisible posts are not found.
    pub fn get_post_by_slug(&self, slug: &str, caller: Caller) -> Option<Arc<Post>> {
        let slug = slug.to_lowercase();
        let snapshot = self.snapshot.load();
        if !snapshot.slugs.contains(&slug) {
            return None;
        }
        let now = Utc::now();
        snapshot
            .posts
            .iter()
            .find(|p| p.slug.to_lowercase() == slug && is_visible_at(p, caller, now))
            .cloned()
    }

    /// Case-insensitive id lookup. Invisible posts are not found.
    pub fn get_post_by_id(&self, id: &str, caller: Caller) -> Option<Arc<Post>> {
        let id = id.to_lowercase();
        let now = Utc::now();
        self.snapshot
            .load()
            .posts
            .iter()
            .find(|p| p.id.to_lowercase() == id && is_visible_at(p, caller, now))
            .cloned()
    }

    /// Distinct lower-cased categories of visible posts, sorted.
    pub fn get_categories(&self, caller: Caller) -> Vec<String> {
        self.collect_folded(caller, |p| &p.categories)
    }

    /// Distinct lower-cased tags of visible posts, sorted.
    pub fn get_tags(&self, caller: Caller) -> Vec<String> {
        self.collect_folded(caller, |p| &p.tags)
    }

    /// Tags of visible posts starting with `prefix`, sorted.
    pub fn suggest_tags(&self, prefix: &str, caller: Caller) -> Vec<String> {
        let snapshot = self.snapshot.load();
        let now = Utc::now();
        snapshot
            .tags
            .keys_with_prefix(&prefix.to_lowercase())
            .into_iter()
            .filter(|tag| {
                snapshot
                    .posts
                    .iter()
                    .any(|p| p.has_tag(tag) && is_visible_at(p, caller, now))
            })
            .collect()
    }

    fn visible_where(&self, caller: Caller, filter: impl Fn(&Post) -> bool) -> Vec<Arc<Post>> {
        let now = Utc::now();
        self.snapshot
            .load()
            .posts
            .iter()
            .filter(|p| is_visible_at(p, caller, now) && filter(p))
            .cloned()
            .collect()
    }

    fn collect_folded(&self, caller: Caller, field: impl Fn(&Post) -> &Vec<String>) -> Vec<String> {
        let now = Utc::now();
        self.snapshot
            .load()
            .posts
            .iter()
            .filter(|p| is_visible_at(p, caller, now))
            .flat_map(|p| field(p).iter().map(|v| v.to_lowercase()))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persist `post` and make it part of the cache.
    ///
    /// Assigns an id on first save, resolves a unique slug and stamps
    /// `last_modified`. A supplied id must be a plain file stem
    /// ([`check_id`]). The cache is left untouched if the backend write fails.
    pub fn save_post(&self, mut post: Post) -> Result<Arc<Post>, StoreError> {
        if post.id.is_empty() {
            post.id = next_id();
        } else {
            check_id(&post.id)?;
        }

        let _guard = self.writer.lock();
        let current = self.snapshot.load_full();

        post.slug = self.allocate_slug(&current, &post);
        post.last_modified = Utc::now();

        self.backend.save(&post)?;

        let post = Arc::new(post);
        let mut next = Snapshot::clone(&current);
        match next.position(&post.id) {
            Some(i) => {
                let old = std::mem::replace(&mut next.posts[i], Arc::clone(&post));
                next.unindex(&old);
            }
            None => next.posts.push(Arc::clone(&post)),
        }
        next.index(&post);
        next.sort();
        self.snapshot.store(Arc::new(next));

        log!("store"; "saved {} ({})", post.slug, post.id);
        Ok(post)
    }

    /// Remove `post` from the backend and the cache.
    ///
    /// Deleting a post that is already gone is not an error.
    pub fn delete_post(&self, post: &Post) -> Result<(), StoreError> {
        let _guard = self.writer.lock();
        self.backend.delete(post)?;

        let current = self.snapshot.load_full();
        if let Some(i) = current.position(&post.id) {
            let mut next = Snapshot::clone(&current);
            let removed = next.posts.remove(i);
            next.unindex(&removed);
            self.snapshot.store(Arc::new(next));
            log!("store"; "deleted {} ({})", removed.slug, removed.id);
        }
        Ok(())
    }

    /// Slug for `post`: the requested one or one derived from the title,
    /// both normalized by [`create_slug`], suffixed with `-2`, `-3`, ...
    /// while another post owns it.
    fn allocate_slug(&self, snapshot: &Snapshot, post: &Post) -> String {
        let mut base = create_slug(post.slug.trim(), self.slug_max_length);
        if base.is_empty() {
            base = create_slug(&post.title, self.slug_max_length);
        }
        if base.is_empty() {
            base = post.id.to_lowercase();
        }

        if !snapshot.slug_taken(&base, &post.id) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if !snapshot.slug_taken(&candidate, &post.id) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("backend", &self.backend.name())
            .field("posts", &self.len())
            .field("skipped", &self.skipped.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend, XmlCodec};
    use chrono::{DateTime, Duration, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn cache() -> DocumentCache {
        DocumentCache::open(Box::new(MemoryBackend::new()), 50).unwrap()
    }

    fn post_at(title: &str, pub_date: DateTime<Utc>) -> Post {
        let mut post = Post::new(title);
        post.pub_date = pub_date;
        post
    }

    fn titles(posts: &[Arc<Post>]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_save_assigns_id_slug_and_stamp() {
        let cache = cache();
        let mut post = Post::new("Héllo, World!");
        let before = Utc::now() - Duration::days(1);
        post.last_modified = before;

        let saved = cache.save_post(post).unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(saved.slug, "hello-world");
        assert!(saved.last_modified >= before);

        let found = cache.get_post_by_id(&saved.id, Caller::Anonymous).unwrap();
        assert_eq!(found.id, saved.id);
        assert!(found.last_modified >= before);
    }

    #[test]
    fn test_resave_keeps_id_and_single_entry() {
        let cache = cache();
        let saved = cache.save_post(Post::new("First")).unwrap();
        let id = saved.id.clone();

        let mut edit = Post::clone(&saved);
        edit.title = "Edited".into();
        let resaved = cache.save_post(edit).unwrap();

        assert_eq!(resaved.id, id);
        assert_eq!(resaved.slug, "first");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_post_by_id(&id, Caller::Admin).unwrap().title, "Edited");
    }

    #[test]
    fn test_posts_sorted_and_paginated() {
        let cache = cache();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for day in [3, 7, 1, 5, 2, 6, 4] {
            cache
                .save_post(post_at(&format!("day {day}"), base + Duration::days(day)))
                .unwrap();
        }

        let all = cache.get_posts(usize::MAX, 0, Caller::Anonymous);
        assert_eq!(all.len(), 7);
        assert!(all.windows(2).all(|w| w[0].pub_date > w[1].pub_date));

        let mut paged = Vec::new();
        for page in 0..4 {
            paged.extend(cache.get_posts(2, page * 2, Caller::Anonymous));
        }
        assert_eq!(titles(&paged), titles(&all));
    }

    #[test]
    fn test_equal_dates_keep_relative_order() {
        let cache = cache();
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = cache.save_post(post_at("a", date)).unwrap();
        cache.save_post(post_at("b", date)).unwrap();
        cache.save_post(post_at("c", date)).unwrap();

        let before = titles(&cache.get_posts(10, 0, Caller::Anonymous))
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        cache.save_post(Post::clone(&a)).unwrap();
        let after = cache.get_posts(10, 0, Caller::Anonymous);
        assert_eq!(titles(&after), before);
    }

    #[test]
    fn test_drafts_hidden_from_anonymous() {
        let cache = cache();
        let mut draft = post_at("Draft", Utc::now() - Duration::days(1));
        draft.is_published = false;
        draft.categories = vec!["Secret".into()];
        draft.tags = vec!["Hidden".into()];
        let draft = cache.save_post(draft).unwrap();

        let anon = Caller::Anonymous;
        assert!(cache.get_posts(10, 0, anon).is_empty());
        assert!(cache.get_post_by_id(&draft.id, anon).is_none());
        assert!(cache.get_post_by_slug("draft", anon).is_none());
        assert!(cache.get_posts_by_category("secret", anon).is_empty());
        assert!(cache.get_posts_by_tag("hidden", anon).is_empty());
        assert!(cache.get_categories(anon).is_empty());
        assert!(cache.get_tags(anon).is_empty());

        let admin = Caller::Admin;
        assert_eq!(cache.get_posts(10, 0, admin).len(), 1);
        assert!(cache.get_post_by_id(&draft.id, admin).is_some());
        assert!(cache.get_post_by_slug("DRAFT", admin).is_some());
        assert_eq!(cache.get_categories(admin), vec!["secret"]);
        assert_eq!(cache.get_tags(admin), vec!["hidden"]);
    }

    #[test]
    fn test_scheduled_post_scenario() {
        let cache = cache();
        let now = Utc::now();

        cache.save_post(post_at("A", now - Duration::days(1))).unwrap();
        assert_eq!(titles(&cache.get_posts(10, 0, Caller::Anonymous)), vec!["A"]);

        cache.save_post(post_at("B", now + Duration::days(1))).unwrap();
        assert_eq!(titles(&cache.get_posts(10, 0, Caller::Anonymous)), vec!["A"]);
        assert_eq!(titles(&cache.get_posts(10, 0, Caller::Admin)), vec!["B", "A"]);
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let cache = cache();
        let mut post = Post::new("Rust Tips");
        post.categories = vec!["Programming".into()];
        post.tags = vec!["Rust".into(), "Tips".into()];
        let saved = cache.save_post(post).unwrap();

        let anon = Caller::Anonymous;
        assert!(cache.get_post_by_slug("RUST-TIPS", anon).is_some());
        assert!(cache.get_post_by_id(&saved.id.to_uppercase(), anon).is_some());
        assert_eq!(cache.get_posts_by_category("programming", anon).len(), 1);
        assert_eq!(cache.get_posts_by_tag("RUST", anon).len(), 1);
        assert!(cache.get_post_by_slug("rust", anon).is_none());
    }

    #[test]
    fn test_categories_and_tags_are_folded() {
        let cache = cache();
        let mut a = Post::new("a");
        a.categories = vec!["Web".into(), "Rust".into()];
        a.tags = vec!["Async".into()];
        let mut b = Post::new("b");
        b.categories = vec!["web".into()];
        b.tags = vec!["ASYNC".into(), "tokio".into()];
        cache.save_post(a).unwrap();
        cache.save_post(b).unwrap();

        assert_eq!(cache.get_categories(Caller::Anonymous), vec!["rust", "web"]);
        assert_eq!(cache.get_tags(Caller::Anonymous), vec!["async", "tokio"]);
    }

    #[test]
    fn test_slug_collision_gets_suffix() {
        let cache = cache();
        let first = cache.save_post(Post::new("Same Title")).unwrap();
        let second = cache.save_post(Post::new("Same Title")).unwrap();
        let mut explicit = Post::new("Other");
        explicit.slug = "Same-Title".into();
        let third = cache.save_post(explicit).unwrap();

        assert_eq!(first.slug, "same-title");
        assert_eq!(second.slug, "same-title-2");
        assert_eq!(third.slug, "same-title-3");
    }

    #[test]
    fn test_requested_slug_is_normalized() {
        let cache = cache();
        let mut post = Post::new("Title");
        post.slug = " A b/c?  ".into();
        assert_eq!(cache.save_post(post).unwrap().slug, "a-bc");

        let mut post = Post::new("Fallback Title");
        post.slug = "?!".into();
        assert_eq!(cache.save_post(post).unwrap().slug, "fallback-title");
    }

    #[test]
    fn test_supplied_id_must_be_file_stem() {
        let cache = cache();
        let mut post = Post::new("Escape");
        post.id = "../../escaped".into();

        assert!(matches!(cache.save_post(post), Err(StoreError::InvalidId(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unchanged_trie_is_shared() {
        let cache = cache();
        let mut a = Post::new("a");
        a.tags = vec!["rust".into()];
        cache.save_post(a).unwrap();
        let before = cache.snapshot.load_full();

        let mut b = Post::new("b");
        b.tags = vec!["Rust".into()];
        cache.save_post(b).unwrap();
        let after = cache.snapshot.load_full();

        assert!(Arc::ptr_eq(&before.tags, &after.tags));
        assert!(!Arc::ptr_eq(&before.slugs, &after.slugs));
        assert!(before.slugs.contains("a") && !before.slugs.contains("b"));
        assert!(after.slugs.contains("b"));
    }

    #[test]
    fn test_untitled_post_uses_id_as_slug() {
        let cache = cache();
        let saved = cache.save_post(Post::new("!!!")).unwrap();
        assert_eq!(saved.slug, saved.id);
    }

    #[test]
    fn test_delete_removes_everywhere() {
        let cache = cache();
        let mut post = Post::new("Gone");
        post.tags = vec!["once".into()];
        let saved = cache.save_post(post).unwrap();

        cache.delete_post(&saved).unwrap();
        assert!(cache.is_empty());
        assert!(cache.get_post_by_id(&saved.id, Caller::Admin).is_none());
        assert!(cache.get_post_by_slug("gone", Caller::Admin).is_none());
        assert!(cache.suggest_tags("on", Caller::Admin).is_empty());

        // Idempotent
        cache.delete_post(&saved).unwrap();
    }

    #[test]
    fn test_shared_tag_survives_delete() {
        let cache = cache();
        let mut a = Post::new("a");
        a.tags = vec!["rust".into(), "only-a".into()];
        let mut b = Post::new("b");
        b.tags = vec!["Rust".into()];
        let a = cache.save_post(a).unwrap();
        cache.save_post(b).unwrap();

        cache.delete_post(&a).unwrap();
        assert_eq!(cache.suggest_tags("", Caller::Anonymous), vec!["rust"]);
        assert_eq!(cache.get_posts_by_tag("rust", Caller::Anonymous).len(), 1);
    }

    #[test]
    fn test_retitled_slug_frees_old_one() {
        let cache = cache();
        let saved = cache.save_post(Post::new("Old Name")).unwrap();
        let mut edit = Post::clone(&saved);
        edit.slug = "new-name".into();
        cache.save_post(edit).unwrap();

        assert!(cache.get_post_by_slug("old-name", Caller::Admin).is_none());
        assert!(cache.get_post_by_slug("new-name", Caller::Admin).is_some());
        let reuse = cache.save_post(Post::new("Old Name")).unwrap();
        assert_eq!(reuse.slug, "old-name");
    }

    #[test]
    fn test_suggest_tags_respects_visibility() {
        let cache = cache();
        let mut live = Post::new("live");
        live.tags = vec!["Rust".into(), "Rayon".into()];
        let mut draft = Post::new("draft");
        draft.is_published = false;
        draft.tags = vec!["Raft".into()];
        cache.save_post(live).unwrap();
        cache.save_post(draft).unwrap();

        assert_eq!(cache.suggest_tags("R", Caller::Anonymous), vec!["rayon", "rust"]);
        assert_eq!(
            cache.suggest_tags("ra", Caller::Admin),
            vec!["raft", "rayon"]
        );
        assert!(cache.suggest_tags("go", Caller::Admin).is_empty());
    }

    #[test]
    fn test_failed_save_leaves_cache_untouched() {
        let dir = TempDir::new().unwrap();
        // A file where the posts directory should be makes every write fail
        let blocked = dir.path().join("posts");
        fs::write(&blocked, "").unwrap();
        let cache = DocumentCache::open(Box::new(FileBackend::<XmlCodec>::new(&blocked)), 50).unwrap();

        assert!(cache.save_post(Post::new("x")).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_file_backed_reload() {
        let dir = TempDir::new().unwrap();
        let open = || DocumentCache::open(Box::new(FileBackend::<XmlCodec>::new(dir.path())), 50).unwrap();

        let cache = open();
        let mut post = Post::new("Persisted");
        post.categories = vec!["Notes".into()];
        post.tags = vec!["disk".into()];
        let saved = cache.save_post(post).unwrap();
        let gone = cache.save_post(Post::new("Temporary")).unwrap();
        cache.delete_post(&gone).unwrap();
        fs::write(dir.path().join("999.xml"), "<post><title>broken").unwrap();

        let reloaded = open();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.skipped().len(), 1);
        let found = reloaded.get_post_by_slug("persisted", Caller::Anonymous).unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.categories, vec!["Notes"]);
        assert_eq!(reloaded.get_tags(Caller::Anonymous), vec!["disk"]);
        assert!(reloaded.get_post_by_id(&gone.id, Caller::Admin).is_none());
    }

    #[test]
    fn test_concurrent_saves() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for j in 0..10 {
                        cache.save_post(Post::new(format!("post {i} {j}"))).unwrap();
                        let _ = cache.get_posts(5, 0, Caller::Anonymous);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 80);
    }
}
