//! Wellstore store layer
//!
//! Turns typed objects and their addresses into backing-store operations:
//!
//! ```text
//! ┌──────────────┐   resolve    ┌─────────┐  entity_filter  ┌──────────┐
//! │ typed object │─────────────►│ Address │────────────────►│  Filter  │──┐
//! └──────────────┘              └─────────┘                 └──────────┘  │
//!        │  describe::<T>()                                                ▼
//!        └──────────────► EntityDescriptor ── stamps / ignore-list ──► Update ──► DocumentCollection
//!
//! Range<Option<f64>> ── bounded_or ──► chunks_overlapping ──► chunk ranges ──► ChannelDataChunk
//! ```
//!
//! - `query` / `update`: filter and update expressions over JSON documents,
//! - `chunks`: chunk enumeration and partitioning of series rows,
//! - `defaults`: per-type defaulting strategies,
//! - `collection` / `sink`: the persistence and notification boundaries,
//! - `provider`: add / get / update / delete composed from the above,
//! - `config`: `StoreConfig`.

pub mod chunks;
pub mod collection;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod provider;
pub mod query;
pub mod sink;
pub mod update;

pub use chunks::{assign, chunks_overlapping, partition, ChannelDataChunk, SeriesRow};
pub use collection::{DocumentCollection, MemoryCollection};
pub use config::StoreConfig;
pub use defaults::{DefaultsStrategy, LogDefaults, NoDefaults};
pub use error::StoreError;
pub use provider::ObjectProvider;
pub use query::{build_field_filter, document_id, entity_filter, entity_filter_in, property_path, Filter, ScopeFields};
pub use sink::{ChangeEvent, ChangeKind, ChangeSink, NullSink, RecordingSink, TracingSink};
pub use update::{build_field_update, ignored_update_fields, update_timestamp_fields, Update};
