//! Enumerations whose wire spelling differs from their Rust identifier.
//!
//! The serde renames are the schema's textual representation; the schema
//! crate resolves raw tokens against both spellings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogIndexDirection {
    #[default]
    #[serde(rename = "increasing")]
    Increasing,
    #[serde(rename = "decreasing")]
    Decreasing,
}

impl LogIndexDirection {
    pub fn is_increasing(self) -> bool {
        self == LogIndexDirection::Increasing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogIndexType {
    #[serde(rename = "date time")]
    DateTime,
    #[serde(rename = "elapsed time")]
    ElapsedTime,
    #[serde(rename = "length")]
    Length,
    #[serde(rename = "measured depth")]
    MeasuredDepth,
    #[serde(rename = "vertical depth")]
    VerticalDepth,
    #[serde(rename = "other")]
    Other,
}

impl LogIndexType {
    /// Time-indexed logs are chunked on epoch seconds.
    pub fn is_time(self) -> bool {
        matches!(self, LogIndexType::DateTime | LogIndexType::ElapsedTime)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUom {
    #[serde(rename = "m")]
    M,
    #[serde(rename = "ft")]
    Ft,
    #[serde(rename = "ft[US]")]
    FtUs,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "cm")]
    Cm,
}

/// 2.0 channel index kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelIndexType {
    #[serde(rename = "measured depth")]
    MeasuredDepth,
    #[serde(rename = "true vertical depth")]
    TrueVerticalDepth,
    #[serde(rename = "date time")]
    DateTime,
    #[serde(rename = "elapsed time")]
    ElapsedTime,
    #[serde(rename = "pass indexed depth")]
    PassIndexedDepth,
}
