//! Route handlers.
//!
//! Read handlers participate in the cache-tag registry: the serialized
//! response is stored under a key derived from the query, tagged with the
//! entity-level tag (and an id-scoped tag for single-record lookups).
//! Mutation handlers invalidate those tags before returning.

pub mod activities;
pub mod admins;
pub mod auth;
pub mod complaints;
pub mod donors;
pub mod enquiries;
pub mod event_bookings;
pub mod health;
pub mod members;
pub mod membership_plans;
pub mod payment_details;
pub mod sliders;
pub mod team_members;
pub mod web_settings;

use axum::Json;
use serde::Serialize;
use shared::cache::TagCache;

use crate::error::ApiError;

/// Cache key for a list read: prefix plus every present optional filter.
///
/// Filter values are user input, so the `:` and `=` separators are escaped
/// in them; two distinct filter sets never collapse onto one key.
pub(crate) fn cache_key(prefix: String, parts: &[(&str, Option<String>)]) -> String {
    let mut key = prefix;
    for (name, value) in parts {
        if let Some(v) = value {
            key.push(':');
            key.push_str(name);
            key.push('=');
            for c in v.chars() {
                if matches!(c, ':' | '=' | '\\') {
                    key.push('\\');
                }
                key.push(c);
            }
        }
    }
    key
}

/// Serialize a response, store it under the given tags, and return it.
pub(crate) fn store_and_respond<T: Serialize>(
    cache: &TagCache,
    key: &str,
    tags: &[&str],
    response: &T,
) -> Result<Json<serde_json::Value>, ApiError> {
    let value = serde_json::to_value(response)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {e}")))?;
    cache.put(key, tags, value.clone());
    Ok(Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_skips_absent_filters() {
        let key = cache_key(
            "donors:list:p1:l10".to_string(),
            &[
                ("search", Some("meera".to_string())),
                ("from", None),
                ("to", None),
            ],
        );
        assert_eq!(key, "donors:list:p1:l10:search=meera");
    }

    #[test]
    fn cache_key_with_no_filters_is_the_prefix() {
        let key = cache_key("sliders:list:p2:l10".to_string(), &[("active", None)]);
        assert_eq!(key, "sliders:list:p2:l10");
    }

    #[test]
    fn cache_key_escapes_separators_in_filter_values() {
        let smuggled = cache_key(
            "donors:list:p1:l10".to_string(),
            &[("search", Some("meera:from=2024".to_string()))],
        );
        let split = cache_key(
            "donors:list:p1:l10".to_string(),
            &[
                ("search", Some("meera".to_string())),
                ("from", Some("2024".to_string())),
            ],
        );
        assert_ne!(smuggled, split);
        assert_eq!(smuggled, "donors:list:p1:l10:search=meera\\:from\\=2024");
    }

    #[test]
    fn store_and_respond_populates_the_cache() {
        let cache = TagCache::new();
        let response = serde_json::json!({"total": 2});
        let result = store_and_respond(&cache, "donors:list:p1:l10", &["donors"], &response);
        assert!(result.is_ok());
        assert_eq!(cache.get("donors:list:p1:l10"), Some(response));
    }
}
