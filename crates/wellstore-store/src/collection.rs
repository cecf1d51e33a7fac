//! The persistence boundary.

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Result;
use crate::query::Filter;
use crate::update::Update;

/// A named collection of JSON documents. Real backends (a document
/// database) implement this; `MemoryCollection` backs tests and the CLI.
pub trait DocumentCollection: Send + Sync {
    fn name(&self) -> &str;

    fn insert(&self, doc: Value) -> Result<()>;

    /// Insert `doc` unless a document already matches `filter`, as one
    /// atomic step. Returns whether it was inserted.
    fn insert_if_absent(&self, filter: &Filter, doc: Value) -> Result<bool>;

    fn find_one(&self, filter: &Filter) -> Result<Option<Value>>;

    fn find(&self, filter: &Filter) -> Result<Vec<Value>>;

    /// Apply `update` to the first matching document. Returns whether one
    /// matched.
    fn update_one(&self, filter: &Filter, update: &Update) -> Result<bool>;

    /// Delete the first matching document. Returns whether one matched.
    fn delete_one(&self, filter: &Filter) -> Result<bool>;
}

#[derive(Debug, Default)]
pub struct MemoryCollection {
    name: String,
    docs: RwLock<Vec<Value>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Copy of every stored document, in insertion order.
    pub fn snapshot(&self) -> Vec<Value> {
        self.docs.read().clone()
    }
}

impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, doc: Value) -> Result<()> {
        self.docs.write().push(doc);
        Ok(())
    }

    fn insert_if_absent(&self, filter: &Filter, doc: Value) -> Result<bool> {
        let mut docs = self.docs.write();
        if docs.iter().any(|d| filter.matches(d)) {
            return Ok(false);
        }
        docs.push(doc);
        Ok(true)
    }

    fn find_one(&self, filter: &Filter) -> Result<Option<Value>> {
        Ok(self.docs.read().iter().find(|d| filter.matches(d)).cloned())
    }

    fn find(&self, filter: &Filter) -> Result<Vec<Value>> {
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    fn update_one(&self, filter: &Filter, update: &Update) -> Result<bool> {
        let mut docs = self.docs.write();
        match docs.iter_mut().find(|d| filter.matches(d)) {
            Some(doc) => {
                update.apply(doc);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_one(&self, filter: &Filter) -> Result<bool> {
        let mut docs = self.docs.write();
        match docs.iter().position(|d| filter.matches(d)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_field_filter;
    use serde_json::json;

    #[test]
    fn crud_over_filters() {
        let c = MemoryCollection::new("well");
        c.insert(json!({"Uid": "W1", "Name": "One"})).unwrap();
        c.insert(json!({"Uid": "W2", "Name": "Two"})).unwrap();

        let w1 = build_field_filter("Uid", "w1");
        assert_eq!(c.find_one(&w1).unwrap().unwrap()["Name"], "One");

        let renamed = Update::new().set("Name", "Renamed");
        assert!(c.update_one(&w1, &renamed).unwrap());
        assert_eq!(c.find(&w1).unwrap()[0]["Name"], "Renamed");

        assert!(c.delete_one(&w1).unwrap());
        assert!(!c.delete_one(&w1).unwrap());
        assert_eq!(c.len(), 1);
        assert_eq!(c.name(), "well");
    }

    #[test]
    fn insert_if_absent_only_inserts_once() {
        let c = MemoryCollection::new("well");
        let w1 = build_field_filter("Uid", "W1");
        assert!(c.insert_if_absent(&w1, json!({"Uid": "W1"})).unwrap());
        assert!(!c.insert_if_absent(&w1, json!({"Uid": "w1"})).unwrap());
        assert_eq!(c.len(), 1);
    }
}
