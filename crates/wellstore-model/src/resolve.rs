//! Deriving an object's address from its identity and ancestors.
//!
//! Top-level objects resolve from their own containment; components
//! (curves, channel sets, channels, channel indexes) resolve their owner
//! first and append one segment, so nesting composes to any depth.

use crate::object_types;
use crate::objects::{v131, v141, v200, Containment, DataObject};
use crate::uri::{Address, AddressError};

/// Address of a top-level object, rooted at the family its namespace
/// declares, with well/wellbore segments inserted from its containment.
pub fn resolve<T: DataObject + ?Sized>(entity: &T) -> Result<Address, AddressError> {
    let root = Address::root(entity.family());
    let scoped = match entity.containment() {
        Containment::None => root,
        Containment::Well { uid_well } => root.append(object_types::WELL, uid_well)?,
        Containment::Wellbore {
            uid_well,
            uid_wellbore,
        } => root
            .append(object_types::WELL, uid_well)?
            .append(object_types::WELLBORE, uid_wellbore)?,
    };
    scoped.append(entity.object_type(), entity.uid())
}

/// Address of a component one level below `parent`.
pub fn resolve_child(
    parent: &Address,
    object_type: &str,
    object_id: &str,
) -> Result<Address, AddressError> {
    parent.append(object_type, object_id)
}

/// 1.4.1 curves are keyed by mnemonic, not uid.
pub fn log_curve_info_141(
    curve: &v141::LogCurveInfo,
    log: &v141::Log,
) -> Result<Address, AddressError> {
    resolve_child(&resolve(log)?, object_types::LOG_CURVE_INFO, &curve.mnemonic)
}

pub fn log_curve_info_131(
    curve: &v131::LogCurveInfo,
    log: &v131::Log,
) -> Result<Address, AddressError> {
    resolve_child(&resolve(log)?, object_types::LOG_CURVE_INFO, &curve.mnemonic)
}

/// A channel set's address, either standalone or within its log.
pub fn channel_set(
    set: &v200::ChannelSet,
    log: Option<&v200::Log>,
) -> Result<Address, AddressError> {
    match log {
        Some(log) => resolve_child(&resolve(log)?, object_types::CHANNEL_SET, &set.uuid),
        None => resolve(set),
    }
}

pub fn channel(
    channel: &v200::Channel,
    set: &v200::ChannelSet,
    log: Option<&v200::Log>,
) -> Result<Address, AddressError> {
    resolve_child(&channel_set(set, log)?, object_types::CHANNEL, &channel.mnemonic)
}

pub fn channel_index(
    index: &v200::ChannelIndex,
    set: &v200::ChannelSet,
    log: Option<&v200::Log>,
) -> Result<Address, AddressError> {
    resolve_child(
        &channel_set(set, log)?,
        object_types::CHANNEL_INDEX,
        &index.mnemonic,
    )
}
