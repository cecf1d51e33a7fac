//! Typed object graph.
//!
//! These types are what the (external) XML layer hands us after validation.
//! Their serde form is the backing-store document: PascalCase field names,
//! absent optionals omitted.

pub mod enums;
pub mod v131;
pub mod v141;
pub mod v200;

use serde::{Deserialize, Serialize};

use crate::family::SchemaFamily;

/// Where an object sits in the well/wellbore containment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment<'a> {
    /// Top-level object (a well, or any 2.0 object).
    None,
    Well {
        uid_well: &'a str,
    },
    Wellbore {
        uid_well: &'a str,
        uid_wellbore: &'a str,
    },
}

/// A top-level, independently stored object.
pub trait DataObject {
    /// Canonical object type name (see `object_types`).
    fn object_type(&self) -> &'static str;

    /// XML namespace the object's schema declares.
    fn namespace(&self) -> &'static str;

    fn uid(&self) -> &str;

    fn containment(&self) -> Containment<'_> {
        Containment::None
    }

    fn family(&self) -> SchemaFamily {
        SchemaFamily::from_namespace(self.namespace())
    }
}

/// Shared 1.x audit block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_creation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_last_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Shared 2.0 audit block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Citation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A measure whose unit is free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenericMeasure {
    pub uom: String,
    pub value: f64,
}

/// A length measure with an enumerated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LengthMeasure {
    pub uom: enums::LengthUom,
    pub value: f64,
}

/// 2.0 index values are declared by their abstract base type; the concrete
/// kind is pinned by a type hint on the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Kind", rename_all_fields = "PascalCase")]
pub enum IndexValue {
    DepthIndexValue { depth: f64 },
    TimeIndexValue { time: String },
    PassIndexedDepth { pass: i32, depth: f64 },
}

/// Find an entry by mnemonic, case-insensitively.
pub fn find_by_mnemonic<'a, T>(
    items: &'a [T],
    mnemonic: &str,
    mnemonic_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    items
        .iter()
        .find(|item| mnemonic_of(item).eq_ignore_ascii_case(mnemonic))
}

/// Move the first entry whose mnemonic matches to the front, keeping the
/// relative order of the others.
pub fn move_to_first<T>(items: &mut [T], mnemonic: &str, mnemonic_of: impl Fn(&T) -> &str) {
    if let Some(pos) = items
        .iter()
        .position(|item| mnemonic_of(item).eq_ignore_ascii_case(mnemonic))
    {
        items[..=pos].rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_first_keeps_remaining_order() {
        let mut items = vec!["GR", "DEPT", "ROP", "DEPT2"];
        move_to_first(&mut items, "dept", |s| *s);
        assert_eq!(items, vec!["DEPT", "GR", "ROP", "DEPT2"]);

        move_to_first(&mut items, "missing", |s| *s);
        assert_eq!(items, vec!["DEPT", "GR", "ROP", "DEPT2"]);
    }

    #[test]
    fn index_value_document_is_tagged() {
        let value = IndexValue::PassIndexedDepth { pass: 2, depth: 10.5 };
        let doc = serde_json::to_value(&value).unwrap();
        assert_eq!(doc["Kind"], "PassIndexedDepth");
    }
}
