//! Process-wide descriptor cache.
//!
//! Each type gets one `OnceLock` cell. The cell is inserted under the map's
//! shard lock, but the descriptor itself is built outside it, inside
//! `OnceLock::get_or_init`. Concurrent first callers for the same type block
//! on that cell, so exactly one build runs and every caller gets the same
//! `Arc`. After that, reads are a shard read-lock and an atomic load.

use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::descriptor::{EntityDescriptor, SchemaType};

type Cell = Arc<OnceLock<Arc<EntityDescriptor>>>;

#[derive(Default)]
pub struct DescriptorCache {
    cells: DashMap<TypeId, Cell>,
    builds: AtomicUsize,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn describe<T: SchemaType>(&self) -> Arc<EntityDescriptor> {
        let key = TypeId::of::<T>();

        if let Some(cell) = self.cells.get(&key) {
            if let Some(descriptor) = cell.get() {
                return Arc::clone(descriptor);
            }
        }

        let cell: Cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Arc::new(OnceLock::new()))
            .value()
            .clone();

        Arc::clone(cell.get_or_init(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            let descriptor = EntityDescriptor::of::<T>();
            tracing::debug!(
                type_name = T::TYPE_NAME,
                family = %T::FAMILY,
                properties = descriptor.properties().len(),
                id_field = descriptor.id_field(),
                "built schema descriptor"
            );
            Arc::new(descriptor)
        }))
    }

    /// Number of descriptors built so far (one per distinct type).
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Describe `T` through the process-wide cache.
pub fn describe<T: SchemaType>() -> Arc<EntityDescriptor> {
    static GLOBAL: OnceLock<DescriptorCache> = OnceLock::new();
    GLOBAL.get_or_init(DescriptorCache::new).describe::<T>()
}
