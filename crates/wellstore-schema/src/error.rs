use thiserror::Error;

/// Data errors raised while interpreting an object against its schema.
///
/// All of these are deterministic in their input, so none are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("`{value}` is not a valid {enum_type} value")]
    InvalidUnitOfMeasure {
        enum_type: &'static str,
        value: String,
    },

    #[error("measure value `{value}` has no unit of measure")]
    MissingUnitForMeasureData { value: String },

    #[error("no concrete type `{type_name}` (namespace {namespace:?}) for abstract type {base}")]
    UnresolvedConcreteType {
        base: &'static str,
        namespace: Option<String>,
        type_name: String,
    },
}
