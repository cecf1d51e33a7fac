//! Wellstore schema descriptors
//!
//! Object types declare their schema shape once, as a static table of
//! `PropertyDecl`s (`SchemaType`). From that table we build an
//! `EntityDescriptor` the first time a type is seen and keep it for the life
//! of the process:
//!
//! ```text
//! SchemaType::PROPERTIES ──build once──► EntityDescriptor ──► DescriptorCache (by TypeId)
//!                                          ├─ serializable properties
//!                                          ├─ element / array / attribute lookup
//!                                          ├─ identifier field
//!                                          └─ update ignore-list
//! ```
//!
//! The rest of the crate answers the questions the store layer asks while
//! walking an incoming object: which property does this element name map to,
//! which enum member does this token mean, which concrete type does this type
//! hint pin, and is this measure's unit present.

pub mod cache;
pub mod concrete;
pub mod decls;
pub mod descriptor;
pub mod enums;
pub mod error;
pub mod measure;

pub use cache::{describe, DescriptorCache};
pub use decls::describe_object_type;
pub use concrete::{require_concrete_type, resolve_concrete_type, AbstractType, ConcreteType, TypeHint};
pub use descriptor::{
    resolve_element_property, EntityDescriptor, EntityKind, PropertyDecl, PropertyKind, SchemaType,
};
pub use enums::{parse_enum, resolve_enum_value, EnumMember, EnumTable, SchemaEnum};
pub use error::SchemaError;
pub use measure::validate_measure_uom;
