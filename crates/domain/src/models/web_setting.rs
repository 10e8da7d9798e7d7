//! Web setting domain model.
//!
//! Key-unique string-to-string pairs driving the public site (theme colors,
//! contact details, social links). The public read path reduces the whole
//! relation into one key→value map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct WebSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Reduce settings rows to a plain key→value map for the public site.
pub fn settings_map(settings: Vec<WebSetting>) -> BTreeMap<String, String> {
    settings.into_iter().map(|s| (s.key, s.value)).collect()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertWebSettingRequest {
    #[validate(length(max = 5000, message = "Value must be at most 5000 characters"))]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListWebSettingsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListWebSettingsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListWebSettingsResponse {
    pub settings: Vec<WebSetting>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_reduce_to_map() {
        let rows = vec![
            WebSetting {
                key: "theme_color".to_string(),
                value: "#aa3344".to_string(),
                updated_at: Utc::now(),
            },
            WebSetting {
                key: "contact_email".to_string(),
                value: "hello@example.org".to_string(),
                updated_at: Utc::now(),
            },
        ];
        let map = settings_map(rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["theme_color"], "#aa3344");
        assert_eq!(map["contact_email"], "hello@example.org");
    }

    #[test]
    fn empty_value_is_allowed() {
        let request = UpsertWebSettingRequest {
            value: String::new(),
        };
        assert!(request.validate().is_ok());
    }
}
