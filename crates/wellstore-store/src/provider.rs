//! Typed object access over a document collection.
//!
//! ```text
//! add(T) ──► defaults.on_add ──► resolve ──► entity_filter ──► insert if absent (+ stamp) ──► sink
//! update(T) ──► find stored ──► defaults.on_update ──► diff ─┬─► update_one ──► sink
//!                                                  stamp ────┘
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use wellstore_model::objects::{Citation, CommonData};
use wellstore_model::{resolve, Address, DataObject};
use wellstore_schema::{describe, resolve_element_property, EntityDescriptor, SchemaType};

use crate::collection::DocumentCollection;
use crate::defaults::{DefaultsStrategy, NoDefaults};
use crate::error::{Result, StoreError};
use crate::query::{entity_filter_in, Filter, ScopeFields};
use crate::sink::{ChangeEvent, ChangeKind, ChangeSink};
use crate::update::{ignored_update_fields, update_timestamp_fields, Update};

pub struct ObjectProvider<T> {
    descriptor: Arc<EntityDescriptor>,
    collection: Arc<dyn DocumentCollection>,
    defaults: Box<dyn DefaultsStrategy<T>>,
    sink: Arc<dyn ChangeSink>,
    scope: ScopeFields,
    ignored: Vec<String>,
}

impl<T> ObjectProvider<T>
where
    T: DataObject + SchemaType + Serialize + DeserializeOwned,
{
    pub fn new(collection: Arc<dyn DocumentCollection>, sink: Arc<dyn ChangeSink>) -> Self {
        let descriptor = describe::<T>();
        let ignored = stored_field_names(&ignored_update_fields(&descriptor, &[]));
        Self {
            descriptor,
            collection,
            defaults: Box::new(NoDefaults),
            sink,
            scope: ScopeFields::default(),
            ignored,
        }
    }

    pub fn with_defaults(mut self, defaults: impl DefaultsStrategy<T> + 'static) -> Self {
        self.defaults = Box::new(defaults);
        self
    }

    pub fn with_scope(mut self, scope: ScopeFields) -> Self {
        self.scope = scope;
        self
    }

    /// Also skip these element names when diffing updates.
    pub fn ignoring(mut self, extra: &[&str]) -> Self {
        let names = ignored_update_fields(&self.descriptor, extra);
        self.ignored = stored_field_names(&names);
        self
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn filter_for(&self, address: &Address) -> Result<Filter> {
        entity_filter_in(address, self.descriptor.id_field(), &self.scope)
    }

    pub fn add(&self, mut entity: T) -> Result<Address> {
        self.defaults.on_add(&mut entity);
        let address = resolve(&entity)?;
        let filter = self.filter_for(&address)?;

        let mut doc = serde_json::to_value(&entity)?;
        update_timestamp_fields(&self.descriptor).apply(&mut doc);
        if !self.collection.insert_if_absent(&filter, doc)? {
            tracing::warn!(%address, "add rejected, object exists");
            return Err(StoreError::AlreadyExists {
                address: address.to_string(),
            });
        }

        tracing::info!(%address, collection = self.collection.name(), "added");
        self.sink
            .publish(ChangeEvent::new(ChangeKind::Add, address.clone()));
        Ok(address)
    }

    pub fn get(&self, address: &Address) -> Result<T> {
        let filter = self.filter_for(address)?;
        let doc = self
            .collection
            .find_one(&filter)?
            .ok_or_else(|| StoreError::NotFound {
                address: address.to_string(),
            })?;
        Ok(serde_json::from_value(doc)?)
    }

    pub fn exists(&self, address: &Address) -> Result<bool> {
        Ok(self.collection.find_one(&self.filter_for(address)?)?.is_some())
    }

    /// Merge the fields present on `entity` into the stored object.
    pub fn update(&self, mut entity: T) -> Result<Address> {
        let address = resolve(&entity)?;
        let filter = self.filter_for(&address)?;
        let stored_doc = self
            .collection
            .find_one(&filter)?
            .ok_or_else(|| StoreError::NotFound {
                address: address.to_string(),
            })?;
        let stored: T = serde_json::from_value(stored_doc.clone())?;

        self.defaults.on_update(&mut entity, &stored);
        let incoming = serde_json::to_value(&entity)?;

        let mut changes = Update::new();
        diff_into(&mut changes, None, &incoming, &stored_doc, &self.ignored);
        let changed = changes.len();
        let update = changes.merge(update_timestamp_fields(&self.descriptor));

        if !self.collection.update_one(&filter, &update)? {
            tracing::warn!(%address, "update matched nothing");
            return Err(StoreError::NotFound {
                address: address.to_string(),
            });
        }
        tracing::info!(%address, changed, "updated");
        self.sink
            .publish(ChangeEvent::new(ChangeKind::Update, address.clone()));
        Ok(address)
    }

    pub fn delete(&self, address: &Address) -> Result<()> {
        let filter = self.filter_for(address)?;
        if !self.collection.delete_one(&filter)? {
            return Err(StoreError::NotFound {
                address: address.to_string(),
            });
        }
        tracing::info!(%address, "deleted");
        self.sink
            .publish(ChangeEvent::new(ChangeKind::Delete, address.clone()));
        Ok(())
    }
}

/// Map ignored element names (`dTimLastChange`) to stored field names
/// (`DateTimeLastChange`) through the audit block descriptors.
fn stored_field_names(elements: &[String]) -> Vec<String> {
    let audit = [describe::<CommonData>(), describe::<Citation>()];
    elements
        .iter()
        .map(|element| {
            audit
                .iter()
                .find_map(|d| resolve_element_property(d, element))
                .map_or_else(|| element.clone(), |p| p.name.to_string())
        })
        .collect()
}

/// Record every leaf of `incoming` that differs from `stored`. Objects are
/// walked; arrays and scalars are compared whole.
fn diff_into(out: &mut Update, parent: Option<&str>, incoming: &Value, stored: &Value, ignored: &[String]) {
    let Value::Object(fields) = incoming else {
        return;
    };
    let empty = Map::new();
    let stored_fields = stored.as_object().unwrap_or(&empty);

    for (key, value) in fields {
        if ignored.iter().any(|i| i.eq_ignore_ascii_case(key)) {
            continue;
        }
        let path = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        match (value, stored_fields.get(key)) {
            (Value::Object(_), Some(stored @ Value::Object(_))) => {
                diff_into(out, Some(&path), value, stored, ignored);
            }
            (_, Some(stored)) if stored == value => {}
            _ => {
                let current = std::mem::take(out);
                *out = current.set(&path, value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::MemoryCollection;
    use crate::defaults::LogDefaults;
    use crate::sink::RecordingSink;
    use serde_json::json;
    use wellstore_model::objects::enums::LogIndexType;
    use wellstore_model::objects::{v141, v200};

    fn log() -> v141::Log {
        v141::Log {
            uid: "L1".into(),
            uid_well: "W1".into(),
            uid_wellbore: "B1".into(),
            name: "Run 1".into(),
            index_type: LogIndexType::MeasuredDepth,
            direction: None,
            index_curve: "DEPT".into(),
            object_growing: None,
            log_curve_info: vec![
                v141::LogCurveInfo {
                    mnemonic: "GR".into(),
                    ..Default::default()
                },
                v141::LogCurveInfo {
                    mnemonic: "DEPT".into(),
                    ..Default::default()
                },
            ],
            common_data: None,
        }
    }

    fn provider() -> (ObjectProvider<v141::Log>, Arc<MemoryCollection>, Arc<RecordingSink>) {
        let collection = Arc::new(MemoryCollection::new("log"));
        let sink = Arc::new(RecordingSink::new());
        let provider = ObjectProvider::new(collection.clone(), sink.clone()).with_defaults(LogDefaults);
        (provider, collection, sink)
    }

    #[test]
    fn ignored_elements_map_to_stored_names() {
        let names = stored_field_names(&[
            "dTimLastChange".to_string(),
            "LastUpdate".to_string(),
            "name".to_string(),
        ]);
        assert_eq!(names, vec!["DateTimeLastChange", "LastUpdate", "name"]);
    }

    #[test]
    fn add_applies_defaults_and_stamps() {
        let (provider, collection, sink) = provider();
        let address = provider.add(log()).unwrap();
        assert_eq!(address.to_string(), "eml://witsml1411/well(W1)/wellbore(B1)/log(L1)");

        let stored = provider.get(&address).unwrap();
        assert_eq!(stored.log_curve_info[0].mnemonic, "DEPT");
        assert_eq!(stored.log_curve_info[0].uid, "DEPT");
        assert_eq!(stored.object_growing, Some(false));
        assert!(stored
            .common_data
            .and_then(|c| c.date_time_last_change)
            .is_some_and(|t| t.ends_with('Z')));

        assert_eq!(collection.len(), 1);
        assert_eq!(sink.kinds(), vec![ChangeKind::Add]);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let (provider, _, _) = provider();
        provider.add(log()).unwrap();
        let mut again = log();
        again.uid = "l1".into();
        assert!(matches!(provider.add(again), Err(StoreError::AlreadyExists { .. })));
    }

    #[test]
    fn update_merges_changed_fields() {
        let (provider, collection, sink) = provider();
        let address = provider.add(log()).unwrap();

        let mut incoming = log();
        incoming.name = "Run 2".into();
        incoming.log_curve_info = vec![v141::LogCurveInfo {
            mnemonic: "gr".into(),
            unit: Some("gAPI".into()),
            ..Default::default()
        }];
        provider.update(incoming).unwrap();

        let stored = provider.get(&address).unwrap();
        assert_eq!(stored.name, "Run 2");
        assert_eq!(stored.log_curve_info.len(), 1);
        assert_eq!(stored.log_curve_info[0].uid, "GR");
        assert_eq!(stored.index_curve, "DEPT");
        assert_eq!(collection.snapshot()[0]["Name"], json!("Run 2"));
        assert_eq!(sink.kinds(), vec![ChangeKind::Add, ChangeKind::Update]);
    }

    #[test]
    fn update_and_delete_of_missing_object_fail() {
        let (provider, _, _) = provider();
        assert!(matches!(provider.update(log()), Err(StoreError::NotFound { .. })));

        let address = Address::parse("eml://witsml1411/well(W1)/wellbore(B1)/log(nope)").unwrap();
        assert!(matches!(provider.delete(&address), Err(StoreError::NotFound { .. })));
        assert!(!provider.exists(&address).unwrap());
    }

    /// Drops the document while applying the update, as a concurrent
    /// delete between read and write would.
    struct VanishingCollection(MemoryCollection);

    impl DocumentCollection for VanishingCollection {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn insert(&self, doc: Value) -> Result<()> {
            self.0.insert(doc)
        }

        fn insert_if_absent(&self, filter: &Filter, doc: Value) -> Result<bool> {
            self.0.insert_if_absent(filter, doc)
        }

        fn find_one(&self, filter: &Filter) -> Result<Option<Value>> {
            self.0.find_one(filter)
        }

        fn find(&self, filter: &Filter) -> Result<Vec<Value>> {
            self.0.find(filter)
        }

        fn update_one(&self, filter: &Filter, _update: &Update) -> Result<bool> {
            self.0.delete_one(filter)?;
            Ok(false)
        }

        fn delete_one(&self, filter: &Filter) -> Result<bool> {
            self.0.delete_one(filter)
        }
    }

    #[test]
    fn update_of_concurrently_deleted_object_is_not_found() {
        let collection = Arc::new(VanishingCollection(MemoryCollection::new("log")));
        let sink = Arc::new(RecordingSink::new());
        let provider: ObjectProvider<v141::Log> = ObjectProvider::new(collection.clone(), sink.clone());

        provider.add(log()).unwrap();
        let mut renamed = log();
        renamed.name = "Run 2".into();

        assert!(matches!(provider.update(renamed), Err(StoreError::NotFound { .. })));
        assert_eq!(sink.kinds(), vec![ChangeKind::Add]);
        assert!(collection.0.is_empty());
    }

    #[test]
    fn concurrent_adds_of_one_object_insert_once() {
        let (provider, collection, sink) = provider();
        let barrier = std::sync::Barrier::new(8);
        let (provider, barrier) = (&provider, &barrier);

        let added = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(move || {
                        barrier.wait();
                        provider.add(log()).is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(added, 1);
        assert_eq!(collection.len(), 1);
        assert_eq!(sink.kinds(), vec![ChangeKind::Add]);
    }

    #[test]
    fn delete_removes_and_notifies() {
        let (provider, collection, sink) = provider();
        let address = provider.add(log()).unwrap();
        provider.delete(&address).unwrap();
        assert!(collection.is_empty());
        assert_eq!(sink.kinds(), vec![ChangeKind::Add, ChangeKind::Delete]);
    }

    #[test]
    fn v200_objects_key_on_uuid_and_stamp_citation() {
        let collection = Arc::new(MemoryCollection::new("log"));
        let provider: ObjectProvider<v200::Log> =
            ObjectProvider::new(collection.clone(), Arc::new(crate::sink::NullSink));
        let address = provider
            .add(v200::Log {
                uuid: "5f0c".into(),
                citation: Citation {
                    title: "Run".into(),
                    ..Default::default()
                },
                channel_set: vec![],
            })
            .unwrap();

        assert_eq!(address.to_string(), "eml://witsml20/log(5f0c)");
        let doc = &collection.snapshot()[0];
        assert_eq!(doc["Uuid"], "5f0c");
        assert!(doc["Citation"]["LastUpdate"].is_string());
    }

    #[test]
    fn diff_skips_ignored_and_unchanged_leaves() {
        let stored = json!({"Name": "a", "CommonData": {"DateTimeLastChange": "t0", "Comments": "x"}});
        let incoming = json!({"Name": "a", "CommonData": {"DateTimeLastChange": "t1", "Comments": "y"}});
        let mut out = Update::new();
        diff_into(&mut out, None, &incoming, &stored, &["DateTimeLastChange".to_string()]);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("CommonData.Comments"), Some(&json!("y")));
    }
}
