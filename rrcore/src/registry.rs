//! Registries deduplicating vertices and relations by label.
//!
//! Both registries are safe to share between threads. Lookups take a read lock; insertions
//! use an upgradable read so that concurrent readers are only blocked while a new entry is
//! actually written. Writes are expected to be rare compared to lookups.
use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::RwLock;

use crate::integral::{Vertex, VertexKey};
use crate::rr::RecurrenceRelation;

/// Interning table for vertices: structurally identical vertices of the same type share a
/// single allocation.
#[derive(Debug, Default)]
pub struct VertexRegistry {
    vertices: RwLock<BTreeMap<VertexKey, Arc<dyn Vertex>>>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registered vertex equal to `vertex`, inserting it first when absent.
    pub fn search_or_insert<V: Vertex>(&self, vertex: V) -> Arc<V> {
        let key = (TypeId::of::<V>(), vertex.label().to_string());

        let mut lock = self.vertices.upgradable_read();
        if let Some(existing) = lock
            .get(&key)
            .and_then(|v| v.clone().downcast_arc::<V>().ok())
        {
            return existing;
        }

        lock.with_upgraded(|vertices| {
            trace!("New vertex encountered {}", key.1);
            let vertex = Arc::new(vertex);
            vertices.insert(key, vertex.clone());
            vertex
        })
    }

    /// Look up the vertex of type `V` labelled `label`.
    pub fn find<V: Vertex>(&self, label: &str) -> Option<Arc<V>> {
        let key = (TypeId::of::<V>(), label.to_string());
        self.vertices.read().get(&key)?.clone().downcast_arc::<V>().ok()
    }

    /// Vertices of any type labelled `label`, ordered by type.
    pub fn find_all(&self, label: &str) -> Vec<Arc<dyn Vertex>> {
        self.vertices
            .read()
            .iter()
            .filter(|((_, l), _)| l == label)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.read().is_empty()
    }
}

/// Label-keyed store of derived relations.
///
/// Only relations worth sharing are registered, at most one per label.
#[derive(Debug, Default)]
pub struct RelationRegistry {
    relations: RwLock<BTreeMap<String, Arc<dyn RecurrenceRelation>>>,
}

impl RelationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `relation` unless a relation with the same label already exists.
    ///
    /// Returns the registered instance: `relation` itself when it was inserted, otherwise the
    /// earlier entry. Registering twice is therefore harmless.
    pub fn register(&self, relation: Arc<dyn RecurrenceRelation>) -> Arc<dyn RecurrenceRelation> {
        let mut lock = self.relations.upgradable_read();
        if let Some(existing) = lock.get(relation.label()) {
            trace!("Relation {} already registered", relation.label());
            return existing.clone();
        }

        lock.with_upgraded(|relations| {
            debug!(
                "Registered relation {} ({} children, {} flops)",
                relation.label(),
                relation.num_children(),
                relation.nflops()
            );
            relations.insert(relation.label().to_string(), relation.clone());
            relation
        })
    }

    pub fn find(&self, label: &str) -> Option<Arc<dyn RecurrenceRelation>> {
        self.relations.read().get(label).cloned()
    }

    /// Look up a relation and recover its concrete type. `None` when absent or of another type.
    pub fn find_as<R: RecurrenceRelation>(&self, label: &str) -> Option<Arc<R>> {
        self.find(label)?.downcast_arc::<R>().ok()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.relations.read().contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.relations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.read().is_empty()
    }

    /// Registered labels in lexicographic order.
    pub fn labels(&self) -> Vec<String> {
        self.relations.read().keys().cloned().collect()
    }

    /// Registered relations, ordered by label.
    pub fn relations(&self) -> Vec<Arc<dyn RecurrenceRelation>> {
        self.relations.read().values().cloned().collect()
    }
}
