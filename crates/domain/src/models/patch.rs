//! Tri-state partial-update field.
//!
//! JSON update bodies must distinguish "field omitted" (leave the stored
//! value unchanged) from "field explicitly null" (clear it). `Option<T>`
//! collapses both into `None`, so nullable fields on update requests use
//! `Patch<T>` instead: a missing field deserializes to `Keep` (via
//! `#[serde(default)]`), an explicit `null` to `Clear`, a value to `Set`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field absent from the request: keep the stored value.
    #[default]
    Keep,
    /// Field explicitly null: clear the stored value.
    Clear,
    /// Field present: replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(v),
        }
    }

    /// Merge onto the currently stored value.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(v) => Some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the field is present; absence is handled by
        // #[serde(default)] on the containing struct.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        category: Patch<String>,
    }

    #[test]
    fn missing_field_keeps() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.category, Patch::Keep);
    }

    #[test]
    fn explicit_null_clears() {
        let body: Body = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert_eq!(body.category, Patch::Clear);
    }

    #[test]
    fn value_sets() {
        let body: Body = serde_json::from_str(r#"{"category": "events"}"#).unwrap();
        assert_eq!(body.category, Patch::Set("events".to_string()));
    }

    #[test]
    fn empty_string_is_set_not_clear() {
        let body: Body = serde_json::from_str(r#"{"category": ""}"#).unwrap();
        assert_eq!(body.category, Patch::Set(String::new()));
    }

    #[test]
    fn resolve_merges_onto_current() {
        let current = Some("old".to_string());
        assert_eq!(Patch::Keep.resolve(current.clone()), current);
        assert_eq!(Patch::<String>::Clear.resolve(current.clone()), None);
        assert_eq!(
            Patch::Set("new".to_string()).resolve(current),
            Some("new".to_string())
        );
    }
}
