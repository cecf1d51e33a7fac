//! Schema declarations for the model types.

use wellstore_model::objects::enums::{ChannelIndexType, LengthUom, LogIndexDirection, LogIndexType};
use wellstore_model::objects::{v131, v141, v200, CommonData, Citation, GenericMeasure, LengthMeasure};
use std::sync::Arc;

use wellstore_model::{object_types, SchemaFamily};

use crate::cache::describe;
use crate::concrete::ABSTRACT_INDEX_VALUE;
use crate::descriptor::{EntityDescriptor, EntityKind, PropertyDecl as P, PropertyKind as K, SchemaType};
use crate::enums::SchemaEnum;

/// Descriptor for an object type named at runtime (e.g. from an address).
/// `None` when the family has no typed model for it.
pub fn describe_object_type(family: SchemaFamily, object_type: &str) -> Option<Arc<EntityDescriptor>> {
    use SchemaFamily::*;

    let object_type = object_types::canonical(family, object_type)?;
    let descriptor = match (family, object_type) {
        (Witsml131, object_types::LOG) => describe::<v131::Log>(),
        (Witsml131, object_types::LOG_CURVE_INFO) => describe::<v131::LogCurveInfo>(),
        (Witsml141, object_types::WELL) => describe::<v141::Well>(),
        (Witsml141, object_types::WELLBORE) => describe::<v141::Wellbore>(),
        (Witsml141, object_types::LOG) => describe::<v141::Log>(),
        (Witsml141, object_types::LOG_CURVE_INFO) => describe::<v141::LogCurveInfo>(),
        (Witsml200, object_types::WELL) => describe::<v200::Well>(),
        (Witsml200, object_types::LOG) => describe::<v200::Log>(),
        (Witsml200, object_types::CHANNEL_SET) => describe::<v200::ChannelSet>(),
        (Witsml200, object_types::CHANNEL) => describe::<v200::Channel>(),
        (Witsml200, object_types::CHANNEL_INDEX) => describe::<v200::ChannelIndex>(),
        _ => return None,
    };
    Some(descriptor)
}

// -----------------------------------------------------------------------------
// Shared components
// -----------------------------------------------------------------------------

impl SchemaType for CommonData {
    const TYPE_NAME: &'static str = "cs_commonData";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::element("SourceName", "sourceName"),
        P::element("DateTimeCreation", "dTimCreation"),
        P::element("DateTimeLastChange", "dTimLastChange"),
        P::element("Comments", "comments"),
    ];
}

impl SchemaType for Citation {
    const TYPE_NAME: &'static str = "Citation";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::element("Title", "Title"),
        P::element("Originator", "Originator"),
        P::element("Creation", "Creation"),
        P::element("LastUpdate", "LastUpdate"),
        P::element("Format", "Format"),
    ];
}

impl SchemaType for GenericMeasure {
    const TYPE_NAME: &'static str = "genericMeasure";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uom", "uom"),
        P::element("Value", "value").of(K::Number),
    ];
}

impl SchemaType for LengthMeasure {
    const TYPE_NAME: &'static str = "lengthMeasure";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uom", "uom").of(K::Enum(LengthUom::TABLE)),
        P::element("Value", "value").of(K::Number),
    ];
}

// -----------------------------------------------------------------------------
// 1.4.1.1
// -----------------------------------------------------------------------------

impl SchemaType for v141::Well {
    const TYPE_NAME: &'static str = "obj_well";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::element("Name", "name"),
        P::element("TimeZone", "timeZone"),
        P::element("CommonData", "commonData").of(K::Complex("cs_commonData")),
    ];
}

impl SchemaType for v141::Wellbore {
    const TYPE_NAME: &'static str = "obj_wellbore";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::attribute("UidWell", "uidWell"),
        P::element("Name", "name"),
        P::element("NameWell", "nameWell"),
        P::element("MdCurrent", "mdCurrent").of(K::Complex("lengthMeasure")),
        P::element("CommonData", "commonData").of(K::Complex("cs_commonData")),
    ];
}

impl SchemaType for v141::LogCurveInfo {
    const TYPE_NAME: &'static str = "cs_logCurveInfo";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::element("Mnemonic", "mnemonic"),
        P::element("Unit", "unit"),
        P::element("CurveDescription", "curveDescription"),
        P::element("MinIndex", "minIndex").of(K::Complex("genericMeasure")),
        P::element("MaxIndex", "maxIndex").of(K::Complex("genericMeasure")),
    ];
}

impl SchemaType for v141::Log {
    const TYPE_NAME: &'static str = "obj_log";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml141;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::attribute("UidWell", "uidWell"),
        P::attribute("UidWellbore", "uidWellbore"),
        P::element("Name", "name"),
        P::element("IndexType", "indexType").of(K::Enum(LogIndexType::TABLE)),
        P::element("Direction", "direction").of(K::Enum(LogIndexDirection::TABLE)),
        P::element("IndexCurve", "indexCurve"),
        P::element("ObjectGrowing", "objectGrowing").of(K::Boolean),
        P::element("LogCurveInfo", "logCurveInfo").of(K::Complex("cs_logCurveInfo")),
        P::element("CommonData", "commonData").of(K::Complex("cs_commonData")),
    ];
}

// -----------------------------------------------------------------------------
// 1.3.1.1
// -----------------------------------------------------------------------------

impl SchemaType for v131::LogCurveInfo {
    const TYPE_NAME: &'static str = "cs_logCurveInfo";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml131;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::element("Mnemonic", "mnemonic"),
        P::element("Unit", "unit"),
        P::element("MinIndex", "minIndex").of(K::Complex("genericMeasure")),
        P::element("MaxIndex", "maxIndex").of(K::Complex("genericMeasure")),
    ];
}

impl SchemaType for v131::Log {
    const TYPE_NAME: &'static str = "obj_log";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml131;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uid", "uid"),
        P::attribute("UidWell", "uidWell"),
        P::attribute("UidWellbore", "uidWellbore"),
        P::element("Name", "name"),
        P::element("IndexType", "indexType").of(K::Enum(LogIndexType::TABLE)),
        P::element("Direction", "direction").of(K::Enum(LogIndexDirection::TABLE)),
        P::element("IndexCurve", "indexCurve"),
        P::element("ObjectGrowing", "objectGrowing").of(K::Boolean),
        P::element("LogCurveInfo", "logCurveInfo").of(K::Complex("cs_logCurveInfo")),
        P::element("CommonData", "commonData").of(K::Complex("cs_commonData")),
    ];
}

// -----------------------------------------------------------------------------
// 2.0
// -----------------------------------------------------------------------------

impl SchemaType for v200::Well {
    const TYPE_NAME: &'static str = "Well";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uuid", "uuid").id(),
        P::element("Citation", "Citation").of(K::Complex("Citation")),
    ];
}

impl SchemaType for v200::ChannelIndex {
    const TYPE_NAME: &'static str = "ChannelIndex";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::element("Mnemonic", "Mnemonic"),
        P::element("IndexType", "IndexType").of(K::Enum(ChannelIndexType::TABLE)),
        P::element("Direction", "Direction").of(K::Enum(LogIndexDirection::TABLE)),
        P::element("Uom", "Uom"),
    ];
}

impl SchemaType for v200::Channel {
    const TYPE_NAME: &'static str = "Channel";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::Component;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uuid", "uuid").id(),
        P::element("Mnemonic", "Mnemonic"),
        P::element("Uom", "Uom"),
        P::element("Citation", "Citation").of(K::Complex("Citation")),
    ];
}

impl SchemaType for v200::ChannelSet {
    const TYPE_NAME: &'static str = "ChannelSet";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uuid", "uuid").id(),
        P::element("Citation", "Citation").of(K::Complex("Citation")),
        P::element("Index", "Index").of(K::Complex("ChannelIndex")),
        P::element("Channel", "Channel").of(K::Complex("Channel")),
        P::element("StartIndex", "StartIndex").of(K::Abstract(ABSTRACT_INDEX_VALUE)),
        P::element("EndIndex", "EndIndex").of(K::Abstract(ABSTRACT_INDEX_VALUE)),
    ];
}

impl SchemaType for v200::Log {
    const TYPE_NAME: &'static str = "Log";
    const FAMILY: SchemaFamily = SchemaFamily::Witsml200;
    const KIND: EntityKind = EntityKind::DataObject;
    const PROPERTIES: &'static [P] = &[
        P::attribute("Uuid", "uuid").id(),
        P::element("Citation", "Citation").of(K::Complex("Citation")),
        P::element("ChannelSet", "ChannelSet").of(K::Complex("ChannelSet")),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::resolve_element_property;
    use wellstore_model::objects::IndexValue;

    #[test]
    fn log_141_descriptor() {
        let d = describe::<v141::Log>();
        assert_eq!(d.id_field(), "Uid");
        assert_eq!(d.family(), SchemaFamily::Witsml141);
        assert_eq!(
            resolve_element_property(&d, "uidWellbore").unwrap().name,
            "UidWellbore"
        );
        assert!(matches!(
            resolve_element_property(&d, "indexType").unwrap().kind,
            K::Enum(table) if table.type_name == "LogIndexType"
        ));
    }

    #[test]
    fn v200_objects_are_keyed_by_uuid() {
        assert_eq!(describe::<v200::Log>().id_field(), "Uuid");
        assert_eq!(describe::<v200::ChannelSet>().id_field(), "Uuid");
        assert_eq!(
            describe::<v200::Log>().last_change_field(),
            Some("Citation.LastUpdate")
        );
    }

    #[test]
    fn runtime_lookup_uses_canonical_type_names() {
        let d = describe_object_type(SchemaFamily::Witsml141, "LOG").unwrap();
        assert_eq!(d.type_name(), "obj_log");
        assert!(std::ptr::eq(&*d, &*describe::<v141::Log>()));

        let d = describe_object_type(SchemaFamily::Witsml200, "channelset").unwrap();
        assert_eq!(d.id_field(), "Uuid");

        assert!(describe_object_type(SchemaFamily::Witsml131, "well").is_none());
        assert!(describe_object_type(SchemaFamily::Witsml141, "pump").is_none());
    }

    fn common_data() -> CommonData {
        CommonData {
            source_name: Some("rig".into()),
            date_time_creation: Some("2024-01-01T00:00:00.0000000Z".into()),
            date_time_last_change: Some("2024-01-02T00:00:00.0000000Z".into()),
            comments: Some("note".into()),
        }
    }

    fn citation() -> Citation {
        Citation {
            title: "Run".into(),
            originator: Some("ops".into()),
            creation: Some("2024-01-01T00:00:00.0000000Z".into()),
            last_update: Some("2024-01-02T00:00:00.0000000Z".into()),
            format: Some("app".into()),
        }
    }

    fn measure() -> GenericMeasure {
        GenericMeasure {
            uom: "m".into(),
            value: 1.5,
        }
    }

    fn curve_141() -> v141::LogCurveInfo {
        v141::LogCurveInfo {
            uid: "GR".into(),
            mnemonic: "GR".into(),
            unit: Some("gAPI".into()),
            curve_description: Some("gamma".into()),
            min_index: Some(measure()),
            max_index: Some(measure()),
        }
    }

    fn curve_131() -> v131::LogCurveInfo {
        v131::LogCurveInfo {
            uid: "GR".into(),
            mnemonic: "GR".into(),
            unit: Some("gAPI".into()),
            min_index: Some(measure()),
            max_index: Some(measure()),
        }
    }

    fn log_141() -> v141::Log {
        v141::Log {
            uid: "L1".into(),
            uid_well: "W1".into(),
            uid_wellbore: "B1".into(),
            name: "Log".into(),
            index_type: LogIndexType::MeasuredDepth,
            direction: Some(LogIndexDirection::Increasing),
            index_curve: "DEPT".into(),
            object_growing: Some(false),
            log_curve_info: vec![curve_141()],
            common_data: Some(common_data()),
        }
    }

    fn log_131() -> v131::Log {
        v131::Log {
            uid: "L1".into(),
            uid_well: "W1".into(),
            uid_wellbore: "B1".into(),
            name: "Log".into(),
            index_type: LogIndexType::DateTime,
            direction: Some(LogIndexDirection::Decreasing),
            index_curve: "TIME".into(),
            object_growing: Some(true),
            log_curve_info: vec![curve_131()],
            common_data: Some(common_data()),
        }
    }

    fn channel_index() -> v200::ChannelIndex {
        v200::ChannelIndex {
            mnemonic: "MD".into(),
            index_type: ChannelIndexType::MeasuredDepth,
            direction: LogIndexDirection::Increasing,
            uom: "m".into(),
        }
    }

    fn channel() -> v200::Channel {
        v200::Channel {
            uuid: "ch-1".into(),
            mnemonic: "GR".into(),
            uom: Some("gAPI".into()),
            citation: citation(),
        }
    }

    fn channel_set() -> v200::ChannelSet {
        v200::ChannelSet {
            uuid: "cs-1".into(),
            citation: citation(),
            index: vec![channel_index()],
            channel: vec![channel()],
            start_index: Some(IndexValue::DepthIndexValue { depth: 0.0 }),
            end_index: Some(IndexValue::DepthIndexValue { depth: 100.0 }),
        }
    }

    /// Every declared property is a key of the serialized document, and
    /// every key is declared.
    fn assert_declarations_match<T: SchemaType + serde::Serialize>(value: &T) {
        let doc = serde_json::to_value(value).unwrap();
        let keys = doc.as_object().unwrap();
        let descriptor = EntityDescriptor::of::<T>();

        for p in descriptor.properties() {
            assert!(keys.contains_key(p.name), "{} declares {} but serializes {doc}", T::TYPE_NAME, p.name);
        }
        for key in keys.keys() {
            assert!(descriptor.property(key).is_some(), "{} serializes undeclared {key}", T::TYPE_NAME);
        }
    }

    fn assert_path_present<T: serde::Serialize>(value: &T, path: &str) {
        let doc = serde_json::to_value(value).unwrap();
        let found = path.split('.').try_fold(&doc, |node, key| node.get(key));
        assert!(found.is_some(), "{path} missing from {doc}");
    }

    #[test]
    fn declarations_match_serialized_documents() {
        assert_declarations_match(&common_data());
        assert_declarations_match(&citation());
        assert_declarations_match(&measure());
        assert_declarations_match(&LengthMeasure {
            uom: LengthUom::Ft,
            value: 10.0,
        });

        assert_declarations_match(&v141::Well {
            uid: "W1".into(),
            name: "Well".into(),
            time_zone: Some("Z".into()),
            common_data: Some(common_data()),
        });
        assert_declarations_match(&v141::Wellbore {
            uid: "B1".into(),
            uid_well: "W1".into(),
            name: "Bore".into(),
            name_well: "Well".into(),
            md_current: Some(LengthMeasure {
                uom: LengthUom::M,
                value: 12.0,
            }),
            common_data: Some(common_data()),
        });
        assert_declarations_match(&curve_141());
        assert_declarations_match(&log_141());

        assert_declarations_match(&curve_131());
        assert_declarations_match(&log_131());

        assert_declarations_match(&v200::Well {
            uuid: "w-1".into(),
            citation: citation(),
        });
        assert_declarations_match(&channel_index());
        assert_declarations_match(&channel());
        assert_declarations_match(&channel_set());
        assert_declarations_match(&v200::Log {
            uuid: "log-1".into(),
            citation: citation(),
            channel_set: vec![channel_set()],
        });
    }

    #[test]
    fn id_and_stamp_paths_exist_in_documents() {
        let log = log_141();
        let d = describe::<v141::Log>();
        assert_path_present(&log, d.id_field());
        assert_path_present(&log, d.last_change_field().unwrap());
        assert_path_present(&log_131(), describe::<v131::Log>().last_change_field().unwrap());

        let log = v200::Log {
            uuid: "log-1".into(),
            citation: citation(),
            channel_set: vec![],
        };
        let d = describe::<v200::Log>();
        assert_path_present(&log, d.id_field());
        assert_path_present(&log, d.last_change_field().unwrap());
    }

    #[test]
    fn abstract_index_properties_carry_their_base() {
        let d = describe::<v200::ChannelSet>();
        let p = resolve_element_property(&d, "startindex").unwrap();
        assert!(matches!(p.kind, K::Abstract(base) if base == ABSTRACT_INDEX_VALUE));
    }
}
