//! Canonical object type names used in address segments.
//!
//! Keeping these in one place avoids drift between the resolver, the parser
//! and the filter builder, which all compare them case-insensitively.

use crate::family::SchemaFamily;

pub const WELL: &str = "well";
pub const WELLBORE: &str = "wellbore";
pub const LOG: &str = "log";
pub const LOG_CURVE_INFO: &str = "logCurveInfo";
pub const TRAJECTORY: &str = "trajectory";
pub const MUD_LOG: &str = "mudLog";
pub const RIG: &str = "rig";
pub const MESSAGE: &str = "message";
pub const WB_GEOMETRY: &str = "wbGeometry";
pub const ATTACHMENT: &str = "attachment";

// 2.0 only
pub const CHANNEL_SET: &str = "channelSet";
pub const CHANNEL: &str = "channel";
pub const CHANNEL_INDEX: &str = "channelIndex";
pub const WELLBORE_GEOMETRY: &str = "wellboreGeometry";

const TYPES_131: &[&str] = &[
    WELL,
    WELLBORE,
    LOG,
    LOG_CURVE_INFO,
    TRAJECTORY,
    MUD_LOG,
    RIG,
    MESSAGE,
    WB_GEOMETRY,
];

const TYPES_141: &[&str] = &[
    WELL,
    WELLBORE,
    LOG,
    LOG_CURVE_INFO,
    TRAJECTORY,
    MUD_LOG,
    RIG,
    MESSAGE,
    WB_GEOMETRY,
    ATTACHMENT,
];

const TYPES_200: &[&str] = &[
    WELL,
    WELLBORE,
    LOG,
    CHANNEL_SET,
    CHANNEL,
    CHANNEL_INDEX,
    TRAJECTORY,
    RIG,
    WELLBORE_GEOMETRY,
    ATTACHMENT,
];

/// All object types addressable within a family.
pub fn object_types(family: SchemaFamily) -> &'static [&'static str] {
    match family {
        SchemaFamily::Witsml131 => TYPES_131,
        SchemaFamily::Witsml141 => TYPES_141,
        SchemaFamily::Witsml200 => TYPES_200,
    }
}

/// Case-insensitive lookup returning the canonical spelling.
pub fn canonical(family: SchemaFamily, object_type: &str) -> Option<&'static str> {
    object_types(family)
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(object_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spelling_is_recovered() {
        assert_eq!(
            canonical(SchemaFamily::Witsml141, "LOGCURVEINFO"),
            Some(LOG_CURVE_INFO)
        );
        assert_eq!(canonical(SchemaFamily::Witsml200, "ChannelSet"), Some(CHANNEL_SET));
    }

    #[test]
    fn channel_types_only_exist_in_200() {
        assert_eq!(canonical(SchemaFamily::Witsml141, CHANNEL), None);
        assert_eq!(canonical(SchemaFamily::Witsml200, LOG_CURVE_INFO), None);
    }
}
