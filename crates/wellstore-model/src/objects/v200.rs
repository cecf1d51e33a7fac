//! 2.0 objects.
//!
//! Every 2.0 data object is rooted directly under the family (no well or
//! wellbore segments) and identified by `Uuid`. Channel sets, channels and
//! channel indexes are components addressed through their owners.

use serde::{Deserialize, Serialize};

use super::enums::{ChannelIndexType, LogIndexDirection};
use super::{Citation, DataObject, IndexValue};
use crate::family::NAMESPACE_200;
use crate::object_types;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Well {
    pub uuid: String,
    pub citation: Citation,
}

impl DataObject for Well {
    fn object_type(&self) -> &'static str {
        object_types::WELL
    }

    fn namespace(&self) -> &'static str {
        NAMESPACE_200
    }

    fn uid(&self) -> &str {
        &self.uuid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelIndex {
    pub mnemonic: String,
    pub index_type: ChannelIndexType,
    pub direction: LogIndexDirection,
    pub uom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    pub uuid: String,
    pub mnemonic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    pub citation: Citation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelSet {
    pub uuid: String,
    pub citation: Citation,
    #[serde(default)]
    pub index: Vec<ChannelIndex>,
    #[serde(default)]
    pub channel: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<IndexValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<IndexValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Log {
    pub uuid: String,
    pub citation: Citation,
    #[serde(default)]
    pub channel_set: Vec<ChannelSet>,
}

impl DataObject for Log {
    fn object_type(&self) -> &'static str {
        object_types::LOG
    }

    fn namespace(&self) -> &'static str {
        NAMESPACE_200
    }

    fn uid(&self) -> &str {
        &self.uuid
    }
}

impl DataObject for ChannelSet {
    fn object_type(&self) -> &'static str {
        object_types::CHANNEL_SET
    }

    fn namespace(&self) -> &'static str {
        NAMESPACE_200
    }

    fn uid(&self) -> &str {
        &self.uuid
    }
}
