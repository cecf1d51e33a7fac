//! Backing-store updates.
//!
//! An update is a set of `path = value` assignments. Assignments to
//! different paths commute, so updates built in any order over disjoint
//! fields produce the same document.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use wellstore_schema::EntityDescriptor;

use crate::document::set_path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    sets: BTreeMap<String, Value>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.sets.insert(path.to_string(), value.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.sets.get(path)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Combine two updates; on a shared path `other` wins.
    pub fn merge(mut self, other: Update) -> Self {
        self.sets.extend(other.sets);
        self
    }

    pub fn apply(&self, doc: &mut Value) {
        for (path, value) in &self.sets {
            set_path(doc, path, value.clone());
        }
    }

    pub fn to_document(&self) -> Value {
        let sets: Map<String, Value> = self
            .sets
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        json!({ "$set": sets })
    }
}

/// Add one assignment to `existing`, or start a new update.
pub fn build_field_update(existing: Option<Update>, path: &str, value: impl Into<Value>) -> Update {
    existing.unwrap_or_default().set(path, value)
}

/// Round-trip UTC timestamp: seven fractional digits (100 ns ticks) and a
/// `Z` suffix, so string order is time order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    // Leap-second nanos run past 10^9; keep the field seven digits wide.
    let ticks = (at.timestamp_subsec_nanos() / 100).min(9_999_999);
    format!("{}.{ticks:07}Z", at.format("%Y-%m-%dT%H:%M:%S"))
}

/// Last-modified stamp for an object of this type, as of now.
pub fn update_timestamp_fields(descriptor: &EntityDescriptor) -> Update {
    update_timestamp_fields_at(descriptor, Utc::now())
}

pub fn update_timestamp_fields_at(descriptor: &EntityDescriptor, at: DateTime<Utc>) -> Update {
    match descriptor.last_change_field() {
        Some(field) => Update::new().set(field, format_timestamp(at)),
        None => Update::new(),
    }
}

/// Fields never diffed on update: the type's creation/last-change fields
/// followed by `extra`, without duplicates.
pub fn ignored_update_fields(descriptor: &EntityDescriptor, extra: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |field: &str| {
        if !out.iter().any(|f| f == field) {
            out.push(field.to_string());
        }
    };
    for field in descriptor.ignored_update_fields() {
        push(*field);
    }
    for field in extra {
        push(*field);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wellstore_model::objects::{v141, v200, CommonData};
    use wellstore_schema::describe;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::microseconds(123_456)
    }

    #[test]
    fn timestamp_is_fixed_width_utc() {
        assert_eq!(format_timestamp(at()), "2024-01-02T03:04:05.1234560Z");
        let whole = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(whole), "2024-01-02T03:04:05.0000000Z");
    }

    #[test]
    fn timestamp_keeps_100ns_ticks_and_parses_back() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::nanoseconds(123_456_789);
        let text = format_timestamp(at);
        assert_eq!(text, "2024-01-02T03:04:05.1234567Z");

        let parsed = DateTime::parse_from_rfc3339(&text).unwrap();
        assert_eq!(parsed.timestamp_subsec_nanos(), 123_456_700);

        let later = at + chrono::Duration::nanoseconds(100);
        assert!(format_timestamp(later) > text);
    }

    #[test]
    fn stamp_field_follows_family() {
        let u = update_timestamp_fields_at(&describe::<v141::Log>(), at());
        assert_eq!(
            u.get("CommonData.DateTimeLastChange"),
            Some(&json!("2024-01-02T03:04:05.1234560Z"))
        );

        let u = update_timestamp_fields_at(&describe::<v200::Log>(), at());
        assert!(u.get("Citation.LastUpdate").is_some());
        assert_eq!(u.len(), 1);

        assert!(update_timestamp_fields(&describe::<CommonData>()).is_empty());
    }

    #[test]
    fn ignored_fields_union_without_duplicates() {
        let d = describe::<v141::Log>();
        assert_eq!(ignored_update_fields(&d, &[]), vec!["dTimCreation", "dTimLastChange"]);
        assert_eq!(
            ignored_update_fields(&d, &["name", "dTimLastChange", "name"]),
            vec!["dTimCreation", "dTimLastChange", "name"]
        );

        let d = describe::<v200::Log>();
        assert_eq!(ignored_update_fields(&d, &["Creation"]), vec!["Creation", "LastUpdate"]);
    }

    #[test]
    fn disjoint_updates_commute() {
        let a = build_field_update(None, "Name", "Main");
        let b = build_field_update(None, "CommonData.Comments", "checked");
        let base = json!({"Uid": "L1", "Name": "old"});

        let mut left = base.clone();
        a.clone().merge(b.clone()).apply(&mut left);
        let mut right = base;
        b.merge(a).apply(&mut right);

        assert_eq!(left, right);
        assert_eq!(left["CommonData"]["Comments"], "checked");
        assert_eq!(left["Name"], "Main");
    }

    #[test]
    fn build_composes_onto_existing() {
        let u = build_field_update(None, "Name", "a");
        let u = build_field_update(Some(u), "ObjectGrowing", false);
        assert_eq!(u.len(), 2);
        assert_eq!(
            u.to_document(),
            json!({"$set": {"Name": "a", "ObjectGrowing": false}})
        );
    }
}
