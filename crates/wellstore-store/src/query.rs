//! Backing-store filters.
//!
//! A filter is a conjunction of equality clauses over dotted document paths.
//! String values compare case-insensitively (ids and mnemonics are
//! conventionally case-insensitive); everything else compares exactly.
//!
//! ```text
//! eml://witsml1411/well(W1)/wellbore(B1)/log(L1)
//!   └─► Uid ~= "L1"  AND  UidWell ~= "W1"  AND  UidWellbore ~= "B1"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use wellstore_model::{object_types, Address, AddressError, Containment, DataObject};

use crate::document::{lookup, values_equal};
use crate::error::Result;

pub const UID_WELL_FIELD: &str = "UidWell";
pub const UID_WELLBORE_FIELD: &str = "UidWellbore";

/// Document fields that hold the containing well / wellbore ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeFields {
    pub well: String,
    pub wellbore: String,
}

impl Default for ScopeFields {
    fn default() -> Self {
        Self {
            well: UID_WELL_FIELD.to_string(),
            wellbore: UID_WELLBORE_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { path: String, value: Value },
    EqIgnoreCase { path: String, value: String },
    And(Vec<Filter>),
}

impl Filter {
    /// Conjunction, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Filter {
        let mut clauses = self.into_clauses();
        clauses.extend(other.into_clauses());
        Filter::And(clauses)
    }

    fn into_clauses(self) -> Vec<Filter> {
        match self {
            Filter::And(inner) => inner.into_iter().flat_map(Filter::into_clauses).collect(),
            leaf => vec![leaf],
        }
    }

    /// Leaf clauses in order.
    pub fn clauses(&self) -> Vec<&Filter> {
        match self {
            Filter::And(inner) => inner.iter().flat_map(Filter::clauses).collect(),
            leaf => vec![leaf],
        }
    }

    /// The clause constraining `path`, if any.
    pub fn clause_for(&self, path: &str) -> Option<&Filter> {
        self.clauses().into_iter().find(|c| match c {
            Filter::Eq { path: p, .. } | Filter::EqIgnoreCase { path: p, .. } => p == path,
            Filter::And(_) => false,
        })
    }

    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::Eq { path, value } => lookup(doc, path).is_some_and(|v| values_equal(v, value)),
            Filter::EqIgnoreCase { path, value } => lookup(doc, path)
                .and_then(Value::as_str)
                .is_some_and(|v| v.to_lowercase() == value.to_lowercase()),
            Filter::And(inner) => inner.iter().all(|f| f.matches(doc)),
        }
    }

    /// Mongo-style query document. Case-insensitive equality becomes an
    /// anchored, escaped regex with the `i` option.
    pub fn to_document(&self) -> Value {
        match self {
            Filter::Eq { path, value } => {
                let mut doc = Map::new();
                doc.insert(path.clone(), value.clone());
                Value::Object(doc)
            }
            Filter::EqIgnoreCase { path, value } => {
                let mut doc = Map::new();
                doc.insert(
                    path.clone(),
                    json!({
                        "$regex": format!("^{}$", regex::escape(value)),
                        "$options": "i",
                    }),
                );
                Value::Object(doc)
            }
            Filter::And(inner) => match inner.as_slice() {
                [] => json!({}),
                [only] => only.to_document(),
                many => json!({ "$and": many.iter().map(Filter::to_document).collect::<Vec<_>>() }),
            },
        }
    }
}

/// Equality on one field; strings compare case-insensitively.
pub fn build_field_filter(path: &str, value: impl Into<Value>) -> Filter {
    match value.into() {
        Value::String(value) => Filter::EqIgnoreCase {
            path: path.to_string(),
            value,
        },
        value => Filter::Eq {
            path: path.to_string(),
            value,
        },
    }
}

/// Filter selecting the addressed object within its well/wellbore.
pub fn entity_filter(address: &Address, id_field: &str) -> Result<Filter> {
    entity_filter_in(address, id_field, &ScopeFields::default())
}

pub fn entity_filter_in(address: &Address, id_field: &str, scope: &ScopeFields) -> Result<Filter> {
    let (Some(object_type), Some(object_id)) = (address.object_type(), address.object_id()) else {
        return Err(AddressError::MalformedAddress {
            address: address.to_string(),
            reason: "address does not name an object".to_string(),
        }
        .into());
    };

    let mut clauses = vec![build_field_filter(id_field, object_id)];
    if object_type != object_types::WELL {
        if let Some(uid_well) = address.object_id_of(object_types::WELL) {
            clauses.push(build_field_filter(&scope.well, uid_well));
        }
    }
    if object_type != object_types::WELLBORE {
        if let Some(uid_wellbore) = address.object_id_of(object_types::WELLBORE) {
            clauses.push(build_field_filter(&scope.wellbore, uid_wellbore));
        }
    }
    Ok(Filter::And(clauses))
}

/// Dotted document path for a property, first letter upper-cased to match
/// the stored field names.
pub fn property_path(parent: Option<&str>, name: &str) -> String {
    let mut chars = name.chars();
    let field: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}.{field}"),
        _ => field,
    }
}

/// Identity-only document: the id plus containment ids, nothing else.
pub fn document_id<T: DataObject + ?Sized>(entity: &T, id_field: &str, scope: &ScopeFields) -> Value {
    let mut doc = Map::new();
    doc.insert(id_field.to_string(), Value::from(entity.uid()));
    match entity.containment() {
        Containment::None => {}
        Containment::Well { uid_well } => {
            doc.insert(scope.well.clone(), Value::from(uid_well));
        }
        Containment::Wellbore {
            uid_well,
            uid_wellbore,
        } => {
            doc.insert(scope.well.clone(), Value::from(uid_well));
            doc.insert(scope.wellbore.clone(), Value::from(uid_wellbore));
        }
    }
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellstore_model::objects::v141;

    fn log_address() -> Address {
        Address::parse("eml://witsml1411/well(W1)/wellbore(B1)/log(L1)").unwrap()
    }

    #[test]
    fn log_filter_scopes_to_well_and_wellbore() {
        let filter = entity_filter(&log_address(), "Uid").unwrap();
        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::EqIgnoreCase { path: "Uid".into(), value: "L1".into() },
                Filter::EqIgnoreCase { path: "UidWell".into(), value: "W1".into() },
                Filter::EqIgnoreCase { path: "UidWellbore".into(), value: "B1".into() },
            ])
        );
    }

    #[test]
    fn well_and_wellbore_do_not_scope_to_themselves() {
        let well = Address::parse("eml://witsml1411/well(W1)").unwrap();
        assert_eq!(entity_filter(&well, "Uid").unwrap().clauses().len(), 1);

        let wellbore = Address::parse("eml://witsml1411/well(W1)/wellbore(B1)").unwrap();
        let filter = entity_filter(&wellbore, "Uid").unwrap();
        assert_eq!(filter.clauses().len(), 2);
        assert!(filter.clause_for("UidWellbore").is_none());
        assert!(filter.clause_for("UidWell").is_some());
    }

    #[test]
    fn root_address_has_no_filter() {
        let root = Address::root(wellstore_model::SchemaFamily::Witsml200);
        assert!(entity_filter(&root, "Uuid").is_err());
    }

    #[test]
    fn strings_ignore_case_other_values_do_not() {
        let doc = json!({"Mnemonic": "GR", "ObjectGrowing": false, "Depth": 1500});
        assert!(build_field_filter("Mnemonic", "gr").matches(&doc));
        assert!(build_field_filter("ObjectGrowing", false).matches(&doc));
        assert!(!build_field_filter("ObjectGrowing", true).matches(&doc));
        assert!(build_field_filter("Depth", 1500.0).matches(&doc));
        assert!(!build_field_filter("Missing", "x").matches(&doc));
    }

    #[test]
    fn regex_document_is_anchored_and_escaped() {
        let doc = build_field_filter("Uid", "a.b(1)").to_document();
        assert_eq!(doc["Uid"]["$regex"], r"^a\.b\(1\)$");
        assert_eq!(doc["Uid"]["$options"], "i");

        let and = entity_filter(&log_address(), "Uid").unwrap().to_document();
        assert_eq!(and["$and"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn and_flattens() {
        let f = build_field_filter("A", 1)
            .and(build_field_filter("B", 2).and(build_field_filter("C", 3)));
        assert_eq!(f.clauses().len(), 3);
        assert!(matches!(f, Filter::And(ref inner) if inner.len() == 3));
    }

    #[test]
    fn property_paths_are_capitalized_and_dotted() {
        assert_eq!(property_path(None, "uid"), "Uid");
        assert_eq!(property_path(Some("CommonData"), "dateTimeLastChange"), "CommonData.DateTimeLastChange");
        assert_eq!(property_path(Some(""), "name"), "Name");
    }

    #[test]
    fn document_id_carries_only_identity() {
        let wellbore = v141::Wellbore {
            uid: "B1".into(),
            uid_well: "W1".into(),
            name: "Main".into(),
            ..Default::default()
        };
        let doc = document_id(&wellbore, "Uid", &ScopeFields::default());
        assert_eq!(doc, json!({"Uid": "B1", "UidWell": "W1"}));
    }
}
