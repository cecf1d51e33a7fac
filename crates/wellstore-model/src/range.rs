//! Index ranges over depth- or time-indexed series.
//!
//! A range is just two bounds; whether it runs up or down is supplied by the
//! caller (`increasing`) because the log's index direction lives elsewhere.
//! Time bounds are normalized to Unix epoch seconds so both kinds share the
//! same arithmetic.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

impl<T> Range<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("chunk size must be a positive integer, got {0}")]
    NonPositiveChunkSize(i64),
}

/// Width of one storage chunk. Cannot be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ChunkSize(NonZeroU32);

impl ChunkSize {
    pub fn new(size: i64) -> Result<Self, RangeError> {
        u32::try_from(size)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(RangeError::NonPositiveChunkSize(size))
    }

    /// For constants; a zero size fails at compile time.
    pub const fn from_const(size: u32) -> Self {
        match NonZeroU32::new(size) {
            Some(size) => Self(size),
            None => panic!("chunk size must be positive"),
        }
    }

    pub fn get(self) -> i64 {
        i64::from(self.0.get())
    }
}

impl TryFrom<i64> for ChunkSize {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChunkSize> for i64 {
    fn from(value: ChunkSize) -> Self {
        value.get()
    }
}

/// Parse raw range bounds. A bound that is missing or unparseable is left
/// open rather than rejected.
pub fn parse(start: Option<&str>, end: Option<&str>, is_time: bool) -> Range<Option<f64>> {
    let bound = |raw: Option<&str>| {
        let raw = raw?.trim();
        if is_time {
            parse_epoch_seconds(raw)
        } else {
            raw.parse::<f64>().ok().filter(|v| v.is_finite())
        }
    };
    Range::new(bound(start), bound(end))
}

/// Whole Unix seconds for an RFC 3339 timestamp, a zone-less date-time
/// (read as UTC) or a bare date.
pub fn parse_epoch_seconds(raw: &str) -> Option<f64> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.timestamp() as f64);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc().timestamp() as f64);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().timestamp() as f64)
}

impl Range<Option<f64>> {
    /// `true` if the range starts after `value` in the given direction.
    pub fn starts_after(&self, value: f64, increasing: bool) -> bool {
        match self.start {
            None => false,
            Some(start) if increasing => value < start,
            Some(start) => value > start,
        }
    }

    /// `true` if the range ends before `value` in the given direction.
    pub fn ends_before(&self, value: f64, increasing: bool) -> bool {
        match self.end {
            None => false,
            Some(end) if increasing => value > end,
            Some(end) => value < end,
        }
    }

    /// Inclusive containment; an open range contains nothing.
    pub fn contains(&self, value: f64, increasing: bool) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };
        if increasing {
            value >= start && value <= end
        } else {
            value <= start && value >= end
        }
    }

    /// Close any open side with the caller's default.
    pub fn bounded_or(&self, default_start: f64, default_end: f64) -> Range<f64> {
        Range::new(
            self.start.unwrap_or(default_start),
            self.end.unwrap_or(default_end),
        )
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// The chunk containing `index`: aligned to a multiple of `size`, spanning
/// `size` units forward (increasing) or backward (decreasing).
///
/// `None` when either chunk bound falls outside `i64`.
pub fn compute_chunk_range(index: f64, size: ChunkSize, increasing: bool) -> Option<Range<i64>> {
    let size = size.get();
    let scaled = index / size as f64;
    let aligned = if increasing { scaled.floor() } else { scaled.ceil() };
    // `as` saturates, so bounds-check before converting.
    if !(aligned >= i64::MIN as f64 && aligned < i64::MAX as f64) {
        return None;
    }
    let boundary = (aligned as i64).checked_mul(size)?;
    let far = if increasing {
        boundary.checked_add(size)?
    } else {
        boundary.checked_sub(size)?
    };
    Some(Range::new(boundary, far))
}
