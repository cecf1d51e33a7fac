//! 1.3.1.1 objects.

use serde::{Deserialize, Serialize};

use super::enums::{LogIndexDirection, LogIndexType};
use super::{CommonData, Containment, DataObject, GenericMeasure};
use crate::family::NAMESPACE_131;
use crate::object_types;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogCurveInfo {
    pub uid: String,
    pub mnemonic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_index: Option<GenericMeasure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_index: Option<GenericMeasure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Log {
    pub uid: String,
    pub uid_well: String,
    pub uid_wellbore: String,
    pub name: String,
    pub index_type: LogIndexType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<LogIndexDirection>,
    pub index_curve: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_growing: Option<bool>,
    #[serde(default)]
    pub log_curve_info: Vec<LogCurveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_data: Option<CommonData>,
}

impl DataObject for Log {
    fn object_type(&self) -> &'static str {
        object_types::LOG
    }

    fn namespace(&self) -> &'static str {
        NAMESPACE_131
    }

    fn uid(&self) -> &str {
        &self.uid
    }

    fn containment(&self) -> Containment<'_> {
        Containment::Wellbore {
            uid_well: &self.uid_well,
            uid_wellbore: &self.uid_wellbore,
        }
    }
}
