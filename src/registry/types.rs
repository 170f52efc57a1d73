//! Type entries and the short-id allocator (C3), grounded on
//! `util/type.py`'s `TypeHandler`/`TypesHandler`.

use std::collections::{HashMap, HashSet};

/// One RDF class or (property, datatype) pair, with its accumulated
/// instances or literal values.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub iri: String,
    pub id: String,
    /// Subject IRIs asserted to be of this type (empty for datatypes).
    pub instances: HashSet<String>,
    pub is_datatype: bool,
    /// Literal lexical values observed for this (property, datatype) pair.
    pub values: Vec<String>,
}

impl TypeEntry {
    fn new(iri: impl Into<String>, id: impl Into<String>) -> Self {
        TypeEntry { iri: iri.into(), id: id.into(), instances: HashSet::new(), is_datatype: false, values: Vec::new() }
    }
}

/// Owns every `TypeEntry`, the short-id allocator, and the subclass
/// closure maps. A method on the registry, never a process-wide global,
/// per spec.md §9's "Global column-name allocation" design note.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    pub types: HashMap<String, TypeEntry>,
    /// datatype id -> TypeEntry, keyed by the owning property's short id
    /// rather than its IRI (a datatype is scoped to one property).
    pub datatypes: HashMap<String, TypeEntry>,

    iri_to_type_id: HashMap<String, String>,
    type_id_to_iri: HashMap<String, String>,

    pub class_iris: HashSet<String>,
    pub subclasses_of: HashMap<String, HashSet<String>>,
    pub superclasses_of: HashMap<String, HashSet<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps an IRI to a stable short id: the local part (text after the
    /// final `/` or `#`) with numeric suffix disambiguation against prior
    /// ids (`name`, `name1`, `name2`, ...).
    pub fn short_id(&mut self, iri: &str) -> String {
        if let Some(id) = self.iri_to_type_id.get(iri) {
            return id.clone();
        }
        let local = local_part(iri);
        let mut candidate = local.to_string();
        let mut counter = 0u64;
        while self.type_id_to_iri.contains_key(&candidate) {
            counter += 1;
            candidate = format!("{local}{counter}");
        }
        self.iri_to_type_id.insert(iri.to_string(), candidate.clone());
        self.type_id_to_iri.insert(candidate.clone(), iri.to_string());
        candidate
    }

    pub fn add_type(&mut self, iri: &str) -> String {
        if let Some(entry) = self.types.get(iri) {
            return entry.id.clone();
        }
        self.class_iris.insert(iri.to_string());
        let id = self.short_id(iri);
        self.types.insert(iri.to_string(), TypeEntry::new(iri, id.clone()));
        id
    }

    pub fn get_or_add_type(&mut self, iri: &str) -> &mut TypeEntry {
        if !self.types.contains_key(iri) {
            self.add_type(iri);
        }
        self.types.get_mut(iri).expect("just inserted")
    }

    /// Moves a Type that was previously treated as a class into the
    /// datatype registry, reusing the owning property's short id as the
    /// new id — matches `TypesHandler.add_datatype`.
    pub fn add_datatype(&mut self, property_id: &str, datatype_iri: &str) -> &mut TypeEntry {
        if !self.datatypes.contains_key(property_id) {
            let mut entry = if self.class_iris.remove(datatype_iri) {
                let mut e = self.types.remove(datatype_iri).expect("class_iris/types in sync");
                e.id = property_id.to_string();
                e
            } else {
                TypeEntry::new(datatype_iri, property_id)
            };
            entry.is_datatype = true;
            self.datatypes.insert(property_id.to_string(), entry);
        }
        self.datatypes.get_mut(property_id).expect("just inserted")
    }

    pub fn get_or_add_datatype(&mut self, property_id: &str, datatype_iri: &str) -> &mut TypeEntry {
        self.add_datatype(property_id, datatype_iri)
    }

    pub fn add_instance_of_type(&mut self, instance: &str, type_iri: &str) {
        self.get_or_add_type(type_iri).instances.insert(instance.to_string());
    }

    /// The type an instance has been asserted to belong to, if any. As in
    /// the source, at most one type is assumed (see `get_type_for_instance`).
    pub fn type_for_instance(&self, instance: &str) -> Option<&TypeEntry> {
        self.types.values().find(|t| t.instances.contains(instance))
    }

    pub fn type_iri_for_instance(&self, instance: &str) -> Option<String> {
        self.type_for_instance(instance).map(|t| t.iri.clone())
    }

    /// Subclass transitivity, maintained incrementally on every edge
    /// insertion rather than recomputed at finalization — mirrors
    /// `TypesHandler.add_subclass` exactly, including the invariant that
    /// both sides' closure is already complete before this call.
    pub fn add_subclass(&mut self, superclass_iri: &str, subclass_iri: &str) {
        tracing::debug!(superclass = superclass_iri, subclass = subclass_iri, "recording subclass edge");
        if !self.class_iris.contains(superclass_iri) {
            self.add_type(superclass_iri);
        }
        if !self.class_iris.contains(subclass_iri) {
            self.add_type(subclass_iri);
        }

        self.superclasses_of.entry(superclass_iri.to_string()).or_default();
        self.subclasses_of.entry(superclass_iri.to_string()).or_default();
        self.subclasses_of.get_mut(superclass_iri).unwrap().insert(subclass_iri.to_string());

        self.subclasses_of.entry(subclass_iri.to_string()).or_default();
        self.superclasses_of.entry(subclass_iri.to_string()).or_default();
        self.superclasses_of.get_mut(subclass_iri).unwrap().insert(superclass_iri.to_string());

        let ancestors: Vec<String> = self.superclasses_of[superclass_iri].iter().cloned().collect();
        for ancestor in ancestors {
            self.subclasses_of.get_mut(&ancestor).unwrap().insert(subclass_iri.to_string());
            self.superclasses_of.get_mut(subclass_iri).unwrap().insert(ancestor);
        }

        let descendants: Vec<String> = self.subclasses_of[subclass_iri].iter().cloned().collect();
        for descendant in descendants {
            self.superclasses_of.get_mut(&descendant).unwrap().insert(superclass_iri.to_string());
            self.subclasses_of.get_mut(superclass_iri).unwrap().insert(descendant);
        }
    }

    pub fn subclasses_of(&self, iri: &str) -> HashSet<String> {
        self.subclasses_of.get(iri).cloned().unwrap_or_default()
    }

    pub fn superclasses_of(&self, iri: &str) -> HashSet<String> {
        self.superclasses_of.get(iri).cloned().unwrap_or_default()
    }

    /// True if `ancestor_iri` is a recorded superclass of `iri` (including
    /// `iri` itself having no recorded ancestors, in which case `false`).
    pub fn is_superclass_of(&self, ancestor_iri: &str, iri: &str) -> bool {
        self.superclasses_of.get(iri).map(|s| s.contains(ancestor_iri)).unwrap_or(false)
    }

    /// True if `id` was handed out by [`Self::short_id`] (i.e. names a
    /// column already projected for some class), as opposed to a raw
    /// resource IRI that has not been typed yet.
    pub fn id_exists(&self, id: &str) -> bool {
        self.type_id_to_iri.contains_key(id)
    }

    /// The entry whose short id is `id`, checked across both the class and
    /// datatype keyspaces.
    pub fn entry_by_id(&self, id: &str) -> Option<&TypeEntry> {
        self.type_id_to_iri.get(id).and_then(|iri| self.types.get(iri)).or_else(|| self.datatypes.get(id))
    }
}

fn local_part(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_disambiguates_collisions() {
        let mut r = TypeRegistry::new();
        let a = r.short_id("http://example.org/ns1#Name");
        let b = r.short_id("http://example.org/ns2#Name");
        assert_eq!(a, "Name");
        assert_eq!(b, "Name1");
    }

    #[test]
    fn short_id_is_stable() {
        let mut r = TypeRegistry::new();
        let a = r.short_id("http://example.org/ns#Foo");
        let a_again = r.short_id("http://example.org/ns#Foo");
        assert_eq!(a, a_again);
    }

    #[test]
    fn subclass_transitivity_across_arrival_order() {
        let mut r = TypeRegistry::new();
        r.add_subclass("B", "A");
        r.add_subclass("C", "B");
        assert!(r.subclasses_of("C").contains("A"));
        assert!(r.superclasses_of("A").contains("C"));
    }

    #[test]
    fn subclass_transitivity_reverse_arrival_order() {
        let mut r = TypeRegistry::new();
        r.add_subclass("C", "B");
        r.add_subclass("B", "A");
        assert!(r.subclasses_of("C").contains("A"));
    }
}
