//! Concrete types behind abstract schema declarations.
//!
//! An element declared with an abstract type carries an `xsi:type` hint
//! (`prefix:TypeName`, with the prefix bound by an `xmlns:prefix`
//! declaration). The known concrete subtypes are registered once, keyed by
//! family and schema type name; lookups never scan.

use std::sync::OnceLock;

use ahash::AHashMap;
use wellstore_model::family::NAMESPACE_200;
use wellstore_model::SchemaFamily;

use crate::error::SchemaError;

/// Abstract base type as declared on a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbstractType {
    pub family: SchemaFamily,
    pub name: &'static str,
}

pub const ABSTRACT_INDEX_VALUE: AbstractType = AbstractType {
    family: SchemaFamily::Witsml200,
    name: "AbstractIndexValue",
};

/// Every concrete type reachable through a type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    DepthIndexValue,
    TimeIndexValue,
    PassIndexedDepth,
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    family: SchemaFamily,
    namespace: &'static str,
    type_name: &'static str,
    concrete: ConcreteType,
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        family: SchemaFamily::Witsml200,
        namespace: NAMESPACE_200,
        type_name: "DepthIndexValue",
        concrete: ConcreteType::DepthIndexValue,
    },
    Registration {
        family: SchemaFamily::Witsml200,
        namespace: NAMESPACE_200,
        type_name: "TimeIndexValue",
        concrete: ConcreteType::TimeIndexValue,
    },
    Registration {
        family: SchemaFamily::Witsml200,
        namespace: NAMESPACE_200,
        type_name: "PassIndexedDepth",
        concrete: ConcreteType::PassIndexedDepth,
    },
];

type Registry = AHashMap<SchemaFamily, AHashMap<&'static str, Vec<Registration>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: Registry = AHashMap::new();
        for r in REGISTRATIONS {
            map.entry(r.family)
                .or_default()
                .entry(r.type_name)
                .or_default()
                .push(*r);
        }
        map
    })
}

/// A parsed `xsi:type` hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    pub namespace: Option<String>,
    pub type_name: String,
}

impl TypeHint {
    pub fn new(namespace: Option<&str>, type_name: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            type_name: type_name.to_string(),
        }
    }

    /// Split `prefix:TypeName` and resolve the prefix through the element's
    /// namespace declarations. An unprefixed or unbound hint has no namespace.
    pub fn from_xsi_type<'a>(value: &str, lookup_prefix: impl Fn(&str) -> Option<&'a str>) -> Self {
        match value.split_once(':') {
            Some((prefix, type_name)) => Self::new(lookup_prefix(prefix), type_name),
            None => Self::new(None, value),
        }
    }
}

/// Find the concrete type a hint pins, searching only the declared base
/// type's family. A blank hint namespace matches any namespace.
pub fn resolve_concrete_type(declared: AbstractType, hint: &TypeHint) -> Option<ConcreteType> {
    let candidates = registry()
        .get(&declared.family)?
        .get(hint.type_name.as_str())?;
    let namespace = hint
        .namespace
        .as_deref()
        .map(str::trim)
        .filter(|ns| !ns.is_empty());

    candidates
        .iter()
        .find(|r| namespace.map_or(true, |ns| r.namespace == ns))
        .map(|r| r.concrete)
}

/// Like `resolve_concrete_type`, but a miss is a data error.
pub fn require_concrete_type(declared: AbstractType, hint: &TypeHint) -> Result<ConcreteType, SchemaError> {
    resolve_concrete_type(declared, hint).ok_or_else(|| {
        tracing::warn!(
            base = declared.name,
            type_name = %hint.type_name,
            "type hint does not name a known concrete type"
        );
        SchemaError::UnresolvedConcreteType {
            base: declared.name,
            namespace: hint.namespace.clone(),
            type_name: hint.type_name.clone(),
        }
    })
}
