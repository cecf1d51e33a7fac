//! Wellstore object model
//!
//! This crate holds the leaf pieces every other wellstore crate builds on:
//!
//! - `family`: the versioned schema families served side by side
//!   (1.3.1.1, 1.4.1.1, 2.0) and how an object's declared namespace maps to one,
//! - `object_types`: the canonical object type names per family,
//! - `uri`: the hierarchical `eml://` address of an object,
//! - `resolve`: deriving that address from a typed object and its ancestors,
//! - `range`: depth/time index ranges and chunk boundary arithmetic,
//! - `objects`: the typed object graph (already validated upstream; XML is
//!   not parsed here).

pub mod family;
pub mod object_types;
pub mod objects;
pub mod range;
pub mod resolve;
pub mod uri;

pub use family::SchemaFamily;
pub use objects::{Containment, DataObject};
pub use range::{ChunkSize, Range, RangeError};
pub use resolve::resolve;
pub use uri::{Address, AddressError, Segment};
