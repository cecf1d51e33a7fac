//! Chunked storage of depth/time series.
//!
//! Series rows are stored in fixed-width chunk documents aligned to
//! multiples of the chunk size. A range query touches exactly the chunks
//! `chunks_overlapping` yields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wellstore_model::range::compute_chunk_range;
use wellstore_model::{ChunkSize, Range};

/// Chunks covering a bounded range, nearest bound first.
///
/// The range must already be bounded (see `Range::bounded_or`). A range
/// with a non-finite bound, or whose first chunk does not fit in `i64`,
/// yields nothing.
pub fn chunks_overlapping(range: &Range<f64>, size: ChunkSize, increasing: bool) -> ChunkIter {
    let next = compute_chunk_range(range.start, size, increasing)
        .filter(|_| range.end.is_finite())
        .map(|first| first.start);
    ChunkIter {
        next,
        far: range.end,
        size,
        increasing,
    }
}

/// The chunk a single index falls in; `None` for a non-finite index or one
/// whose chunk does not fit in `i64`.
pub fn assign(index: f64, size: ChunkSize, increasing: bool) -> Option<Range<i64>> {
    compute_chunk_range(index, size, increasing)
}

#[derive(Debug, Clone)]
pub struct ChunkIter {
    next: Option<i64>,
    far: f64,
    size: ChunkSize,
    increasing: bool,
}

impl Iterator for ChunkIter {
    type Item = Range<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let past_far = if self.increasing {
            start as f64 > self.far
        } else {
            (start as f64) < self.far
        };
        if past_far {
            self.next = None;
            return None;
        }

        let size = self.size.get();
        let end = if self.increasing {
            start.checked_add(size)
        } else {
            start.checked_sub(size)
        };
        let Some(end) = end else {
            self.next = None;
            return None;
        };
        self.next = Some(end);
        tracing::trace!(start, end, "chunk");
        Some(Range::new(start, end))
    }
}

/// One series row: the index value and the channel values at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeriesRow {
    pub index: f64,
    pub values: Vec<Value>,
}

impl SeriesRow {
    pub fn new(index: f64, values: Vec<Value>) -> Self {
        Self { index, values }
    }
}

/// A stored chunk of series data for one owning object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelDataChunk {
    pub uid: String,
    pub indices: Range<i64>,
    pub record_count: usize,
    pub rows: Vec<SeriesRow>,
}

/// Group rows into chunk documents. Chunks and the rows inside them are
/// ordered by direction. Rows whose index has no chunk (non-finite or out
/// of `i64` range) are dropped.
pub fn partition(
    uid: &str,
    rows: impl IntoIterator<Item = SeriesRow>,
    size: ChunkSize,
    increasing: bool,
) -> Vec<ChannelDataChunk> {
    let mut groups: BTreeMap<i64, (Range<i64>, Vec<SeriesRow>)> = BTreeMap::new();
    for row in rows {
        let Some(chunk) = assign(row.index, size, increasing) else {
            tracing::warn!(uid, index = row.index, "dropping row with unchunkable index");
            continue;
        };
        groups
            .entry(chunk.start)
            .or_insert_with(|| (chunk, Vec::new()))
            .1
            .push(row);
    }

    let mut chunks: Vec<ChannelDataChunk> = groups
        .into_values()
        .map(|(indices, mut rows)| {
            rows.sort_by(|a, b| {
                let ord = a.index.total_cmp(&b.index);
                if increasing {
                    ord
                } else {
                    ord.reverse()
                }
            });
            ChannelDataChunk {
                uid: uid.to_string(),
                indices,
                record_count: rows.len(),
                rows,
            }
        })
        .collect();
    if !increasing {
        chunks.reverse();
    }
    chunks
}
