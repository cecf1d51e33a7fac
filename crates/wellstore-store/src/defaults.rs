//! Per-type defaulting hooks run by the provider before an object is
//! written.

use wellstore_model::objects::enums::LogIndexDirection;
use wellstore_model::objects::{find_by_mnemonic, move_to_first, v131, v141};

pub trait DefaultsStrategy<T>: Send + Sync {
    /// Fill defaults on a new object.
    fn on_add(&self, _entity: &mut T) {}

    /// Fill defaults on an incoming update, given the stored object.
    fn on_update(&self, _entity: &mut T, _existing: &T) {}
}

/// No hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl<T> DefaultsStrategy<T> for NoDefaults {}

/// Log policy shared by 1.3.1.1 and 1.4.1.1:
///
/// - on add: not growing, increasing unless stated, blank curve uids take the
///   mnemonic, index curve first;
/// - on update: a blank curve uid takes the stored uid of the curve with the
///   same mnemonic, falling back to the mnemonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDefaults;

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

macro_rules! log_defaults {
    ($log:ty, $curve:ty) => {
        impl DefaultsStrategy<$log> for LogDefaults {
            fn on_add(&self, log: &mut $log) {
                log.object_growing = Some(false);
                log.direction = Some(log.direction.unwrap_or_default());

                for curve in &mut log.log_curve_info {
                    if is_blank(&curve.uid) {
                        curve.uid = curve.mnemonic.clone();
                    }
                }

                let index_curve = log.index_curve.clone();
                move_to_first(&mut log.log_curve_info, &index_curve, |c: &$curve| c.mnemonic.as_str());
            }

            fn on_update(&self, log: &mut $log, existing: &$log) {
                for curve in &mut log.log_curve_info {
                    if !is_blank(&curve.uid) {
                        continue;
                    }
                    curve.uid = find_by_mnemonic(
                        &existing.log_curve_info,
                        &curve.mnemonic,
                        |c: &$curve| c.mnemonic.as_str(),
                    )
                    .map(|c| c.uid.clone())
                    .filter(|uid| !is_blank(uid))
                    .unwrap_or_else(|| curve.mnemonic.clone());
                }
            }
        }
    };
}

log_defaults!(v131::Log, v131::LogCurveInfo);
log_defaults!(v141::Log, v141::LogCurveInfo);
