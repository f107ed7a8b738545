use std::collections::HashMap;
use std::hash::BuildHasher;

use joinkit_types::indexmap::IndexMap;
use joinkit_types::relation::Relation;

/// Provides the named relations a join refers to.
pub trait RelationSource {
    fn relation(&self, name: &str) -> Option<&Relation>;
}

/// In-memory relations, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    relations: IndexMap<String, Relation>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the relation previously registered under `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, relation: Relation) -> Option<Relation> {
        self.relations.insert(name.into(), relation)
    }

    pub fn with_relation(mut self, name: impl Into<String>, relation: Relation) -> Self {
        self.insert(name, relation);
        self
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl RelationSource for MemorySource {
    fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }
}

impl<S: BuildHasher> RelationSource for HashMap<String, Relation, S> {
    fn relation(&self, name: &str) -> Option<&Relation> {
        self.get(name)
    }
}
