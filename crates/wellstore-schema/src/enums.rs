//! Enum value tables.
//!
//! A schema enum member has an identifier name and, often, a different wire
//! spelling (`"measured depth"` for `MeasuredDepth`, `"ft[US]"` for `FtUs`).
//! Raw tokens are resolved against both.

use wellstore_model::objects::enums::{ChannelIndexType, LengthUom, LogIndexDirection, LogIndexType};

use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMember {
    pub name: &'static str,
    pub xml_name: Option<&'static str>,
}

impl EnumMember {
    pub const fn new(name: &'static str, xml_name: &'static str) -> Self {
        Self {
            name,
            xml_name: Some(xml_name),
        }
    }

    /// Spelling used on the wire.
    pub fn wire_name(&self) -> &'static str {
        self.xml_name.unwrap_or(self.name)
    }
}

#[derive(Debug)]
pub struct EnumTable {
    pub type_name: &'static str,
    pub members: &'static [EnumMember],
}

/// Typed access to an enum's table. `VALUES[i]` corresponds to `TABLE.members[i]`.
pub trait SchemaEnum: Copy + 'static {
    const TABLE: &'static EnumTable;
    const VALUES: &'static [Self];

    fn member(self) -> &'static EnumMember;
}

fn resolve_index(table: &EnumTable, raw: &str) -> Result<usize, SchemaError> {
    if let Some(idx) = table.members.iter().position(|m| m.name == raw) {
        return Ok(idx);
    }

    table
        .members
        .iter()
        .position(|m| {
            m.name.eq_ignore_ascii_case(raw)
                || m.xml_name.is_some_and(|x| x.eq_ignore_ascii_case(raw))
        })
        .ok_or_else(|| SchemaError::InvalidUnitOfMeasure {
            enum_type: table.type_name,
            value: raw.to_string(),
        })
}

/// Exact identifier first, then case-insensitive identifier or wire name.
pub fn resolve_enum_value(table: &'static EnumTable, raw: &str) -> Result<&'static EnumMember, SchemaError> {
    resolve_index(table, raw).map(|idx| &table.members[idx])
}

pub fn parse_enum<E: SchemaEnum>(raw: &str) -> Result<E, SchemaError> {
    resolve_index(E::TABLE, raw).map(|idx| E::VALUES[idx])
}

macro_rules! schema_enum {
    ($ty:ident, $type_name:literal, [$($variant:ident => $xml:literal),+ $(,)?]) => {
        impl SchemaEnum for $ty {
            const TABLE: &'static EnumTable = &EnumTable {
                type_name: $type_name,
                members: &[$(EnumMember::new(stringify!($variant), $xml)),+],
            };
            const VALUES: &'static [Self] = &[$($ty::$variant),+];

            fn member(self) -> &'static EnumMember {
                let idx = Self::VALUES
                    .iter()
                    .position(|v| *v == self)
                    .unwrap_or_default();
                &Self::TABLE.members[idx]
            }
        }
    };
}

schema_enum!(LogIndexDirection, "LogIndexDirection", [
    Increasing => "increasing",
    Decreasing => "decreasing",
]);

schema_enum!(LogIndexType, "LogIndexType", [
    DateTime => "date time",
    ElapsedTime => "elapsed time",
    Length => "length",
    MeasuredDepth => "measured depth",
    VerticalDepth => "vertical depth",
    Other => "other",
]);

schema_enum!(LengthUom, "LengthUom", [
    M => "m",
    Ft => "ft",
    FtUs => "ft[US]",
    In => "in",
    Cm => "cm",
]);

schema_enum!(ChannelIndexType, "ChannelIndexType", [
    MeasuredDepth => "measured depth",
    TrueVerticalDepth => "true vertical depth",
    DateTime => "date time",
    ElapsedTime => "elapsed time",
    PassIndexedDepth => "pass indexed depth",
]);
