//! Type/Property Registry (C3) — the stateful core the router mutates one
//! triple at a time, grounded on the `TypeInferencer`/`KnowledgeSource`
//! pairing in `original_source/util/knowledgesource.py`, which plays the
//! same coordinating role over its two handler objects.

pub mod closure;
pub mod pending;
pub mod property;
pub mod router;
pub mod types;

use std::collections::{HashMap, HashSet};

use crate::column::{Column, ColumnRef, LengthStats, LinkName};
use crate::datatype::project_datatype_column;

use pending::PendingBuffers;
use property::PropertyRegistry;
use types::TypeRegistry as ClassRegistry;

#[derive(Debug, Default, Clone)]
struct LengthAccumulator {
    count: usize,
    min_len: usize,
    max_len: usize,
    sum_len: usize,
}

impl LengthAccumulator {
    fn observe(&mut self, value: &str) {
        let len = value.chars().count();
        if self.count == 0 {
            self.min_len = len;
            self.max_len = len;
        } else {
            self.min_len = self.min_len.min(len);
            self.max_len = self.max_len.max(len);
        }
        self.sum_len += len;
        self.count += 1;
    }

    fn into_stats(self) -> Option<LengthStats> {
        if self.count == 0 {
            None
        } else {
            Some(LengthStats {
                min_len: self.min_len,
                avg_len: self.sum_len as f64 / self.count as f64,
                max_len: self.max_len,
            })
        }
    }
}

/// The ontology registry: classes/datatypes, properties, and the pending
/// side-tables that defer decisions until a referenced resource is typed.
/// Link edges are kept as a `column_id -> link_name -> {column_id}` map
/// rather than mutated directly onto `Column`s (design note 9: "resolved
/// through the registry"), so link installation never depends on the
/// order in which `Column`s are eventually materialized.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    pub classes: ClassRegistry,
    pub properties: PropertyRegistry,
    pub pending: PendingBuffers,
    links: HashMap<String, HashMap<LinkName, HashSet<ColumnRef>>>,
    name_column: LengthAccumulator,
    comment_column: LengthAccumulator,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_label(&mut self, value: &str) {
        self.name_column.observe(value);
    }

    pub fn observe_comment(&mut self, value: &str) {
        self.comment_column.observe(value);
    }

    pub fn lookup_type(&self, resource_iri: &str) -> Option<String> {
        self.classes.type_iri_for_instance(resource_iri)
    }

    fn install_link(&mut self, source_column_id: &str, link_name: &str, target_column_id: &str) {
        self.links
            .entry(source_column_id.to_string())
            .or_default()
            .entry(link_name.to_string())
            .or_default()
            .insert(target_column_id.to_string());
    }

    /// Routes an object-valued (IRI) data statement per spec.md §4.4's four
    /// link-installation cases, keyed on whether each side is already
    /// typed.
    pub fn route_link(&mut self, subject: &str, property_iri: &str, object: &str) {
        let link_name = self.properties.short_id(property_iri);
        let s_type = self.lookup_type(subject);
        let o_type = self.lookup_type(object);

        match (s_type, o_type) {
            (Some(st), Some(ot)) => {
                let s_id = self.classes.types[&st].id.clone();
                let o_id = self.classes.types[&ot].id.clone();
                self.install_link(&s_id, &link_name, &o_id);
            }
            (Some(st), None) => {
                let s_id = self.classes.types[&st].id.clone();
                self.pending.add_pending_link_target(object, &link_name, &s_id);
            }
            (None, Some(ot)) => {
                let o_id = self.classes.types[&ot].id.clone();
                self.pending.add_pending_link_source(subject, &link_name, &o_id);
            }
            (None, None) => {
                self.pending.add_pending_link_source(subject, &link_name, object);
                self.pending.add_pending_link_target(object, &link_name, subject);
            }
        }
    }

    /// Records that `subject`'s type, once known, should count as a member
    /// of `domains(property_iri)` (subject to the redundancy check).
    pub fn route_domain_instance(&mut self, property_iri: &str, subject: &str) {
        match self.lookup_type(subject) {
            Some(type_iri) => self.add_domain_if_not_redundant(property_iri, &type_iri),
            None => self.pending.add_pending_domain(property_iri, subject),
        }
    }

    /// Symmetric counterpart for an object property's range, driven by
    /// usage rather than an explicit `rdfs:range` assertion.
    pub fn route_range_instance(&mut self, property_iri: &str, object: &str) {
        match self.lookup_type(object) {
            Some(type_iri) => self.add_range_if_not_redundant(property_iri, &type_iri),
            None => self.pending.add_pending_range(property_iri, object),
        }
    }

    fn add_domain_if_not_redundant(&mut self, property_iri: &str, type_iri: &str) {
        let existing = self.properties.get(property_iri).map(|e| e.domains.clone()).unwrap_or_default();
        let redundant = existing.iter().any(|existing_iri| self.classes.is_superclass_of(type_iri, existing_iri));
        if !redundant {
            self.properties.add_domain(property_iri, type_iri, &mut self.classes);
        }
    }

    fn add_range_if_not_redundant(&mut self, property_iri: &str, type_iri: &str) {
        let existing = self.properties.get(property_iri).map(|e| e.ranges.clone()).unwrap_or_default();
        let redundant = existing.iter().any(|existing_iri| self.classes.is_superclass_of(type_iri, existing_iri));
        if !redundant {
            self.properties.add_range(property_iri, type_iri, &mut self.classes);
        }
    }

    /// `register_type_assertion` (§4.4): moves `subject` into `type_iri`'s
    /// instance set, then flushes every pending entry keyed by `subject`,
    /// in the fixed order design note 9 prescribes: domain, range,
    /// link-target, link-source.
    pub fn register_type_assertion(&mut self, subject: &str, type_iri: &str) {
        self.classes.add_instance_of_type(subject, type_iri);
        self.pending.untyped_resources.remove(subject);

        let domain_properties: Vec<String> = self
            .pending
            .pending_domain_instances
            .iter()
            .filter(|(_, members)| members.contains(subject))
            .map(|(p, _)| p.clone())
            .collect();
        for property_id in domain_properties {
            if let Some(members) = self.pending.pending_domain_instances.get_mut(&property_id) {
                members.remove(subject);
                if members.is_empty() {
                    self.pending.pending_domain_instances.remove(&property_id);
                }
            }
            self.add_domain_if_not_redundant(&property_id, type_iri);
        }

        let range_properties: Vec<String> = self
            .pending
            .pending_range_instances
            .iter()
            .filter(|(_, members)| members.contains(subject))
            .map(|(p, _)| p.clone())
            .collect();
        for property_id in range_properties {
            if let Some(members) = self.pending.pending_range_instances.get_mut(&property_id) {
                members.remove(subject);
                if members.is_empty() {
                    self.pending.pending_range_instances.remove(&property_id);
                }
            }
            self.add_range_if_not_redundant(&property_id, type_iri);
        }

        let type_id = self.classes.types[type_iri].id.clone();

        if let Some(entries) = self.pending.pending_link_target.remove(subject) {
            for entry in entries {
                let resolved_source_id = self.resolve_to_column_id(&entry.source_column);
                match resolved_source_id {
                    Some(source_id) => self.install_link(&source_id, &entry.link_name, &type_id),
                    None => self.pending.add_pending_link_source(&entry.source_column, &entry.link_name, &type_id),
                }
            }
        }

        if let Some(entries) = self.pending.pending_link_source.remove(subject) {
            for entry in entries {
                let resolved_target_id = self.resolve_to_column_id(&entry.target);
                match resolved_target_id {
                    Some(target_id) => self.install_link(&type_id, &entry.link_name, &target_id),
                    None => self.pending.add_pending_link_target(&entry.target, &entry.link_name, &type_id),
                }
            }
        }
    }

    /// Resolves a name that may already be a short column id (from a side
    /// that was known at push time) or a raw resource IRI whose type has
    /// since been asserted.
    fn resolve_to_column_id(&self, name: &str) -> Option<String> {
        if self.classes.id_exists(name) {
            return Some(name.to_string());
        }
        self.classes.type_iri_for_instance(name).map(|type_iri| self.classes.types[&type_iri].id.clone())
    }

    /// Runs the finalization closure passes (§4.3 rules 2 and 3); subclass
    /// transitivity is already maintained incrementally.
    pub fn finalize(&mut self) {
        closure::propagate_subproperties(&mut self.properties);
        closure::propagate_inverse_properties(&mut self.properties);
    }

    /// Projects every class and datatype into a `Column`, attaching the
    /// link maps accumulated during routing, plus the shared `name`/
    /// `comment` text columns when any label/comment triple was observed.
    pub fn into_columns(&self) -> Vec<(String, Column)> {
        let mut columns = Vec::new();

        for entry in self.classes.types.values() {
            let lengths: Vec<usize> = entry.instances.iter().map(|i| i.chars().count()).collect();
            let stats = crate::column::inferencer::length_stats(&lengths);
            let mut column = Column::TypedId {
                column_name: entry.id.clone(),
                stats,
                ids: entry.instances.clone(),
                links: HashMap::new(),
            };
            if let Some(links) = self.links.get(&entry.id) {
                *column.links_mut() = links.clone();
            }
            columns.push((entry.id.clone(), column));
        }

        for entry in self.classes.datatypes.values() {
            match project_datatype_column(&entry.id, &entry.iri, &entry.values) {
                Ok(mut column) => {
                    if let Some(links) = self.links.get(&entry.id) {
                        *column.links_mut() = links.clone();
                    }
                    columns.push((entry.id.clone(), column));
                }
                Err(_) => continue,
            }
        }

        if let Some(stats) = self.name_column.clone().into_stats() {
            columns.push(("name".to_string(), Column::Text { column_name: "name".to_string(), stats, links: HashMap::new() }));
        }
        if let Some(stats) = self.comment_column.clone().into_stats() {
            columns.push(("comment".to_string(), Column::Text { column_name: "comment".to_string(), stats, links: HashMap::new() }));
        }

        columns
    }

    pub fn object_property_iris(&self) -> HashSet<String> {
        self.properties.object_property_iris()
    }

    pub fn datatype_property_iris(&self) -> HashSet<String> {
        self.properties.datatype_property_iris()
    }

    pub fn functional_object_property_iris(&self) -> HashSet<String> {
        self.properties.functional_object_property_iris()
    }

    pub fn inverse_functional_object_property_iris(&self) -> HashSet<String> {
        self.properties.inverse_functional_object_property_iris()
    }

    pub fn subclasses_of(&self, class_iri: &str) -> HashSet<String> {
        self.classes.subclasses_of(class_iri)
    }

    pub fn superclasses_of(&self, class_iri: &str) -> HashSet<String> {
        self.classes.superclasses_of(class_iri)
    }

    pub fn subproperties_of(&self, property_iri: &str) -> HashSet<String> {
        self.properties.subproperties.get(property_iri).cloned().unwrap_or_default()
    }

    pub fn property_domains(&self, property_iri: &str) -> HashSet<String> {
        self.properties.get(property_iri).map(|p| p.domains.clone()).unwrap_or_default()
    }

    pub fn property_ranges(&self, property_iri: &str) -> HashSet<String> {
        self.properties.get(property_iri).map(|p| p.ranges.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subject_domain_registers_immediately() {
        let mut reg = TypeRegistry::new();
        reg.register_type_assertion("s1", "http://ex.org#Person");
        reg.route_domain_instance("http://ex.org#hasName", "s1");
        assert!(reg.property_domains("http://ex.org#hasName").contains("http://ex.org#Person"));
    }

    #[test]
    fn unknown_subject_domain_resolves_after_typing() {
        let mut reg = TypeRegistry::new();
        reg.route_domain_instance("http://ex.org#hasName", "s1");
        reg.register_type_assertion("s1", "http://ex.org#Person");
        assert!(reg.property_domains("http://ex.org#hasName").contains("http://ex.org#Person"));
    }

    #[test]
    fn both_sides_unknown_link_resolves_once_both_typed() {
        let mut reg = TypeRegistry::new();
        reg.route_link("s1", "knows", "o1");
        reg.register_type_assertion("s1", "http://ex.org#Person");
        reg.register_type_assertion("o1", "http://ex.org#Person");
        let person_id = reg.classes.types["http://ex.org#Person"].id.clone();
        assert!(reg.links.get(&person_id).and_then(|m| m.get("knows")).is_some());
    }
}
