//! Process-wide cache-tag registry.
//!
//! Read handlers cache their serialized responses under a key plus a set of
//! tags; mutations invalidate tags. A tag is a version counter: invalidation
//! bumps the counter and every entry that captured the old version is stale.
//! An entity-level tag (e.g. `"donors"`) covers every cached page/variant
//! for that entity; an id-scoped tag (e.g. `"donor:42"`) covers only that
//! record's lookups.
//!
//! Entries live for the process lifetime and are removed only by tag
//! invalidation, never by size or time eviction.

use std::collections::HashMap;
use std::sync::RwLock;

struct Entry {
    /// Tag versions captured when the entry was stored.
    tags: Vec<(String, u64)>,
    value: serde_json::Value,
}

#[derive(Default)]
struct Inner {
    versions: HashMap<String, u64>,
    entries: HashMap<String, Entry>,
}

/// Tag-versioned response cache shared through `AppState`.
#[derive(Default)]
pub struct TagCache {
    inner: RwLock<Inner>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version of a tag. Tags that were never invalidated are at 0.
    pub fn version(&self, tag: &str) -> u64 {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.versions.get(tag).copied().unwrap_or(0)
    }

    /// Look up a cached value; returns `None` if absent or any of its tags
    /// moved past the captured version.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let entry = inner.entries.get(key)?;
        let fresh = entry
            .tags
            .iter()
            .all(|(tag, v)| inner.versions.get(tag).copied().unwrap_or(0) == *v);
        if fresh {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a value under `key`, capturing the current version of each tag.
    pub fn put(&self, key: &str, tags: &[&str], value: serde_json::Value) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let captured = tags
            .iter()
            .map(|tag| {
                let v = inner.versions.get(*tag).copied().unwrap_or(0);
                ((*tag).to_string(), v)
            })
            .collect();
        inner.entries.insert(
            key.to_string(),
            Entry {
                tags: captured,
                value,
            },
        );
    }

    /// Bump a tag's version and drop every entry that depends on it.
    pub fn invalidate(&self, tag: &str) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner.versions.entry(tag.to_string()).or_insert(0) += 1;
        inner
            .entries
            .retain(|_, entry| !entry.tags.iter().any(|(t, _)| t == tag));
    }

    /// Invalidate several tags at once (entity-level plus id-scoped).
    pub fn invalidate_all<'a>(&self, tags: impl IntoIterator<Item = &'a str>) {
        for tag in tags {
            self.invalidate(tag);
        }
    }

    /// Number of live entries, for diagnostics.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn miss_on_empty_cache() {
        let cache = TagCache::new();
        assert!(cache.get("donors:p1").is_none());
    }

    #[test]
    fn hit_after_put() {
        let cache = TagCache::new();
        cache.put("donors:p1", &["donors"], json!({"total": 3}));
        assert_eq!(cache.get("donors:p1"), Some(json!({"total": 3})));
    }

    #[test]
    fn entity_tag_invalidation_drops_every_variant() {
        let cache = TagCache::new();
        cache.put("donors:p1", &["donors"], json!(1));
        cache.put("donors:p2", &["donors"], json!(2));
        cache.put("donors:p1:search=x", &["donors"], json!(3));

        cache.invalidate("donors");

        assert!(cache.get("donors:p1").is_none());
        assert!(cache.get("donors:p2").is_none());
        assert!(cache.get("donors:p1:search=x").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn id_scoped_invalidation_leaves_other_records() {
        let cache = TagCache::new();
        cache.put("donor:1", &["donors", "donor:1"], json!("a"));
        cache.put("donor:2", &["donors", "donor:2"], json!("b"));

        cache.invalidate("donor:1");

        assert!(cache.get("donor:1").is_none());
        assert_eq!(cache.get("donor:2"), Some(json!("b")));
    }

    #[test]
    fn entity_tag_also_covers_single_record_lookups() {
        let cache = TagCache::new();
        cache.put("donor:1", &["donors", "donor:1"], json!("a"));

        cache.invalidate("donors");

        assert!(cache.get("donor:1").is_none());
    }

    #[test]
    fn put_after_invalidation_is_fresh() {
        let cache = TagCache::new();
        cache.put("sliders:p1", &["sliders"], json!(1));
        cache.invalidate("sliders");
        cache.put("sliders:p1", &["sliders"], json!(2));

        assert_eq!(cache.get("sliders:p1"), Some(json!(2)));
        assert_eq!(cache.version("sliders"), 1);
    }

    #[test]
    fn invalidate_all_bumps_each_tag() {
        let cache = TagCache::new();
        cache.put("donor:1", &["donors", "donor:1"], json!("a"));
        cache.invalidate_all(["donors", "donor:1"]);

        assert_eq!(cache.version("donors"), 1);
        assert_eq!(cache.version("donor:1"), 1);
        assert!(cache.is_empty());
    }
}
