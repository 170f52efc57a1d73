//! The three-tier pending registry (C4), grounded on
//! `util/statement.py`'s `NotFullyTypedStatementsHandler` for the
//! domain/range buffers, and on spec.md §4.4's fuller description for the
//! per-instance link-target/link-source buffers (the Python revision this
//! repository follows does not model those explicitly; spec.md is the
//! authority where it goes further than the source).

use std::collections::{HashMap, HashSet};

/// An edge `(link_name, target)` recorded against an as-yet-untyped
/// subject; `target` may itself still be untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTargetEdge {
    pub link_name: String,
    pub target: String,
}

/// An edge `(link_name, source_column)` recorded against an as-yet-untyped
/// object, where the subject side is already resolved to a column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSourceEdge {
    pub link_name: String,
    pub source_column: String,
}

/// A partially built `owl:Restriction`, keyed by the blank (now
/// skolemized) node naming it. Recorded but never closed over, per
/// spec.md §9's Open Question resolution.
#[derive(Debug, Clone, Default)]
pub struct OwlRestriction {
    pub on_property: Option<String>,
    pub some_values_from: Option<String>,
    pub has_self: bool,
}

#[derive(Debug, Default)]
pub struct PendingBuffers {
    pub untyped_resources: HashSet<String>,
    pub pending_domain_instances: HashMap<String, HashSet<String>>,
    pub pending_range_instances: HashMap<String, HashSet<String>>,
    pub pending_link_source: HashMap<String, Vec<PendingTargetEdge>>,
    pub pending_link_target: HashMap<String, Vec<PendingSourceEdge>>,
    pub restrictions: HashMap<String, OwlRestriction>,
}

impl PendingBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_untyped(&mut self, resource: &str) {
        self.untyped_resources.insert(resource.to_string());
    }

    pub fn add_pending_domain(&mut self, property_iri: &str, resource: &str) {
        self.mark_untyped(resource);
        self.pending_domain_instances.entry(property_iri.to_string()).or_default().insert(resource.to_string());
    }

    pub fn add_pending_range(&mut self, property_iri: &str, resource: &str) {
        self.mark_untyped(resource);
        self.pending_range_instances.entry(property_iri.to_string()).or_default().insert(resource.to_string());
    }

    pub fn add_pending_link_source(&mut self, subject: &str, link_name: &str, target: &str) {
        self.mark_untyped(subject);
        self.pending_link_source
            .entry(subject.to_string())
            .or_default()
            .push(PendingTargetEdge { link_name: link_name.to_string(), target: target.to_string() });
    }

    pub fn add_pending_link_target(&mut self, object: &str, link_name: &str, source_column: &str) {
        self.mark_untyped(object);
        self.pending_link_target
            .entry(object.to_string())
            .or_default()
            .push(PendingSourceEdge { link_name: link_name.to_string(), source_column: source_column.to_string() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_link_source_accumulates_per_subject() {
        let mut p = PendingBuffers::new();
        p.add_pending_link_source("s1", "hasFriend", "o1");
        p.add_pending_link_source("s1", "hasFriend", "o2");
        assert_eq!(p.pending_link_source["s1"].len(), 2);
        assert!(p.untyped_resources.contains("s1"));
    }
}
