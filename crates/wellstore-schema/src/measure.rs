//! Unit-of-measure presence checks for measure values.

use crate::descriptor::PropertyDecl;
use crate::error::SchemaError;

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Validate the unit attribute accompanying a measure value.
///
/// `uom_property` is the measure type's unit property; if it is not declared
/// as an attribute there is nothing to check and `Ok(None)` is returned.
/// Otherwise the attribute is looked up by local name on the element. A
/// non-blank value with a blank or missing unit is rejected.
pub fn validate_measure_uom<'a>(
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    uom_property: &PropertyDecl,
    measure_value: &str,
) -> Result<Option<String>, SchemaError> {
    let Some(uom_attribute) = uom_property.attribute else {
        return Ok(None);
    };

    let uom = attributes
        .into_iter()
        .find(|(name, _)| local_name(name) == uom_attribute)
        .map(|(_, value)| value);

    let uom_blank = uom.map_or(true, |u| u.trim().is_empty());
    if !measure_value.trim().is_empty() && uom_blank {
        return Err(SchemaError::MissingUnitForMeasureData {
            value: measure_value.to_string(),
        });
    }

    Ok(uom.map(str::to_string))
}
