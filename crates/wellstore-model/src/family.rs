//! Schema families.
//!
//! Three versions of the object model are served simultaneously. Each one has
//! an address scheme token (the root of every `eml://` address) and an XML
//! namespace that typed objects declare.

use serde::{Deserialize, Serialize};

/// Namespace declared by 1.3.1.1 objects.
pub const NAMESPACE_131: &str = "http://www.witsml.org/schemas/131";
/// Namespace declared by 1.4.1.1 objects.
pub const NAMESPACE_141: &str = "http://www.witsml.org/schemas/1series";
/// Namespace declared by 2.0 objects.
pub const NAMESPACE_200: &str = "http://www.energistics.org/energyml/data/witsmlv2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaFamily {
    Witsml131,
    Witsml141,
    Witsml200,
}

impl SchemaFamily {
    pub const ALL: [SchemaFamily; 3] = [
        SchemaFamily::Witsml131,
        SchemaFamily::Witsml141,
        SchemaFamily::Witsml200,
    ];

    /// Scheme token used as the root of an address, e.g. `eml://witsml1411`.
    pub const fn scheme(self) -> &'static str {
        match self {
            SchemaFamily::Witsml131 => "eml://witsml1311",
            SchemaFamily::Witsml141 => "eml://witsml1411",
            SchemaFamily::Witsml200 => "eml://witsml20",
        }
    }

    pub const fn namespace(self) -> &'static str {
        match self {
            SchemaFamily::Witsml131 => NAMESPACE_131,
            SchemaFamily::Witsml141 => NAMESPACE_141,
            SchemaFamily::Witsml200 => NAMESPACE_200,
        }
    }

    /// 1.x objects share the `uid`/`uidWell`/`commonData` conventions.
    pub const fn is_1x(self) -> bool {
        matches!(self, SchemaFamily::Witsml131 | SchemaFamily::Witsml141)
    }

    /// Exact lookup by scheme token (case-insensitive).
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.scheme().eq_ignore_ascii_case(scheme))
    }

    /// Pick the family from a declared namespace by looking for version markers.
    ///
    /// Markers are whole tokens of the namespace (split on anything that is
    /// not ASCII alphanumeric), so `.../2000/...` is not a 2.0 marker.
    /// Anything without a recognized marker (including an empty namespace)
    /// falls back to 1.4.1, the most widely deployed version.
    pub fn from_namespace(namespace: &str) -> Self {
        let ns = namespace.to_ascii_lowercase();
        let has_marker = |markers: &[&str]| {
            ns.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|token| markers.contains(&token))
        };

        if has_marker(&["131", "witsml131"]) {
            SchemaFamily::Witsml131
        } else if has_marker(&["200", "witsml200", "witsmlv2"]) {
            SchemaFamily::Witsml200
        } else {
            if !has_marker(&["141", "witsml141", "1series"]) {
                tracing::debug!(namespace, "no schema version marker, defaulting to 1.4.1");
            }
            SchemaFamily::Witsml141
        }
    }
}

impl std::fmt::Display for SchemaFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.scheme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_namespaces_map_back_to_their_family() {
        for family in SchemaFamily::ALL {
            assert_eq!(SchemaFamily::from_namespace(family.namespace()), family);
        }
    }

    #[test]
    fn unknown_or_missing_marker_falls_back_to_141() {
        assert_eq!(SchemaFamily::from_namespace(""), SchemaFamily::Witsml141);
        assert_eq!(
            SchemaFamily::from_namespace("urn:example:custom"),
            SchemaFamily::Witsml141
        );
    }

    #[test]
    fn markers_match_whole_tokens_only() {
        for unrelated in [
            "http://www.w3.org/2000/09/xmldsig#",
            "http://www.w3.org/2001/XMLSchema",
            "urn:vendor:1200",
            "urn:vendor:1310",
        ] {
            assert_eq!(SchemaFamily::from_namespace(unrelated), SchemaFamily::Witsml141, "{unrelated}");
        }
        assert_eq!(
            SchemaFamily::from_namespace("Energistics.DataAccess.WITSML200"),
            SchemaFamily::Witsml200
        );
        assert_eq!(
            SchemaFamily::from_namespace("Energistics.DataAccess.WITSML131"),
            SchemaFamily::Witsml131
        );
        assert_eq!(
            SchemaFamily::from_namespace("http://www.energistics.org/schemas/200"),
            SchemaFamily::Witsml200
        );
    }

    #[test]
    fn scheme_lookup_is_case_insensitive() {
        assert_eq!(
            SchemaFamily::from_scheme("EML://WITSML20"),
            Some(SchemaFamily::Witsml200)
        );
        assert_eq!(SchemaFamily::from_scheme("eml://witsml9"), None);
    }
}
