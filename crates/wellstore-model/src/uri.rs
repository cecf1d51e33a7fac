//! Hierarchical object addresses.
//!
//! An address is a schema family root followed by `type(id)` segments:
//!
//! ```text
//! eml://witsml1411/well(W1)/wellbore(B1)/log(L1)
//! └──── family ──┘└──────────── segments ────────┘
//! ```
//!
//! Construction validates every segment against the family's object types
//! and rejects ids that could not be parsed back, so `Display` followed by
//! `Address::parse` always reproduces the same address.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::family::SchemaFamily;
use crate::object_types;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("malformed address `{address}`: {reason}")]
    MalformedAddress { address: String, reason: String },

    #[error("object type `{object_type}` is not defined for {family}")]
    UnknownObjectType {
        family: SchemaFamily,
        object_type: String,
    },

    #[error("invalid id `{id}` for {object_type}: {reason}")]
    InvalidObjectId {
        object_type: String,
        id: String,
        reason: &'static str,
    },
}

/// One `type(id)` step of an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    object_type: &'static str,
    object_id: String,
}

impl Segment {
    pub fn object_type(&self) -> &'static str {
        self.object_type
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.object_type, self.object_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    family: SchemaFamily,
    segments: Vec<Segment>,
}

impl Address {
    /// The root address of a family (no segments).
    pub fn root(family: SchemaFamily) -> Self {
        Self {
            family,
            segments: Vec::new(),
        }
    }

    /// Return a new address with one more segment.
    pub fn append(&self, object_type: &str, object_id: &str) -> Result<Self, AddressError> {
        let mut next = self.clone();
        next.push(object_type, object_id)?;
        Ok(next)
    }

    fn push(&mut self, object_type: &str, object_id: &str) -> Result<(), AddressError> {
        let canonical = object_types::canonical(self.family, object_type).ok_or_else(|| {
            AddressError::UnknownObjectType {
                family: self.family,
                object_type: object_type.to_string(),
            }
        })?;

        let invalid = |reason| AddressError::InvalidObjectId {
            object_type: canonical.to_string(),
            id: object_id.to_string(),
            reason,
        };
        if object_id.trim().is_empty() {
            return Err(invalid("id is blank"));
        }
        if object_id.contains('/') {
            return Err(invalid("id contains `/`"));
        }

        self.segments.push(Segment {
            object_type: canonical,
            object_id: object_id.to_string(),
        });
        Ok(())
    }

    pub fn family(&self) -> SchemaFamily {
        self.family
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Object type of the addressed object (the last segment).
    pub fn object_type(&self) -> Option<&'static str> {
        self.segments.last().map(|s| s.object_type)
    }

    /// Id of the addressed object (the last segment).
    pub fn object_id(&self) -> Option<&str> {
        self.segments.last().map(|s| s.object_id.as_str())
    }

    /// `(object type, id)` for every segment, outermost first.
    pub fn object_ids(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.segments
            .iter()
            .map(|s| (s.object_type, s.object_id.as_str()))
    }

    /// Id of the first segment with the given object type.
    pub fn object_id_of(&self, object_type: &str) -> Option<&str> {
        self.object_ids()
            .find(|(t, _)| t.eq_ignore_ascii_case(object_type))
            .map(|(_, id)| id)
    }

    /// The address one level up, or `None` at the family root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }

    /// Parse the string form produced by `Display`.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let malformed = |reason: String| AddressError::MalformedAddress {
            address: address.to_string(),
            reason,
        };

        let rest = address
            .strip_prefix("eml://")
            .ok_or_else(|| malformed("expected `eml://` scheme".to_string()))?;

        let mut parts = rest.split('/');
        let family_token = parts.next().unwrap_or_default();
        let family = SchemaFamily::from_scheme(&format!("eml://{family_token}"))
            .ok_or_else(|| malformed(format!("unknown schema family `{family_token}`")))?;

        let mut out = Self::root(family);
        for part in parts {
            let (object_type, object_id) = split_segment(part)
                .ok_or_else(|| malformed(format!("segment `{part}` is not `type(id)`")))?;
            out.push(object_type, object_id)
                .map_err(|err| malformed(err.to_string()))?;
        }
        Ok(out)
    }
}

fn split_segment(part: &str) -> Option<(&str, &str)> {
    let open = part.find('(')?;
    let inner = part.strip_suffix(')')?;
    let object_type = &part[..open];
    if object_type.is_empty() || open + 1 > inner.len() {
        return None;
    }
    Some((object_type, &inner[open + 1..]))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family.scheme())?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}
