//! Property entries and the object/datatype kind state machine (C3),
//! grounded on `util/property.py`'s `PropertyHandler`/`PropertiesHandler`.

use std::collections::{HashMap, HashSet};

use super::types::TypeRegistry;

#[derive(Debug, Clone, Default)]
pub struct PropertyEntry {
    pub iri: String,
    pub id: String,
    pub domains: HashSet<String>,
    pub ranges: HashSet<String>,
    pub is_object: bool,
    pub is_datatype: bool,
    pub is_functional: bool,
    pub is_inverse_functional: bool,
}

#[derive(Debug, Default)]
pub struct PropertyRegistry {
    pub properties: HashMap<String, PropertyEntry>,
    iri_to_id: HashMap<String, String>,
    id_to_iri: HashMap<String, String>,
    pub subproperties: HashMap<String, HashSet<String>>,
    pub inverse_properties: HashSet<(String, String)>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short_id(&mut self, iri: &str) -> String {
        if let Some(id) = self.iri_to_id.get(iri) {
            return id.clone();
        }
        let local = local_part(iri);
        let mut candidate = local.to_string();
        let mut counter = 0u64;
        while self.id_to_iri.contains_key(&candidate) {
            counter += 1;
            candidate = format!("{local}{counter}");
        }
        self.iri_to_id.insert(iri.to_string(), candidate.clone());
        self.id_to_iri.insert(candidate.clone(), iri.to_string());
        candidate
    }

    pub fn get_or_add(&mut self, iri: &str) -> &mut PropertyEntry {
        if !self.properties.contains_key(iri) {
            let id = self.short_id(iri);
            self.properties.insert(iri.to_string(), PropertyEntry { iri: iri.to_string(), id, ..Default::default() });
        }
        self.properties.get_mut(iri).expect("just inserted")
    }

    pub fn get(&self, iri: &str) -> Option<&PropertyEntry> {
        self.properties.get(iri)
    }

    /// A literal was observed for `property_iri`. If it was previously
    /// declared an object property, downgrades to generic to stay
    /// consistent with the earlier (tentative) classification; otherwise
    /// pins it datatype. Matches `add_datatype_property`.
    pub fn declare_datatype(&mut self, property_iri: &str) {
        let entry = self.get_or_add(property_iri);
        if entry.is_object {
            entry.is_object = false;
        } else {
            entry.is_datatype = true;
        }
    }

    /// An IRI object was observed for `property_iri`. Matches
    /// `add_object_property`'s routing-time counterpart in `statement.py`:
    /// downgrades a previously-datatype property to generic rather than
    /// asserting, since evidence (not a declaration) is driving this call.
    pub fn declare_object(&mut self, property_iri: &str) {
        let entry = self.get_or_add(property_iri);
        if entry.is_datatype {
            entry.is_datatype = false;
        } else {
            entry.is_object = true;
        }
    }

    /// `owl:ObjectProperty` assertion: a declaration, not evidence — must
    /// not already be a datatype property.
    pub fn assert_object_property(&mut self, property_iri: &str) {
        let entry = self.get_or_add(property_iri);
        debug_assert!(!entry.is_datatype, "property cannot be both object and datatype");
        entry.is_object = true;
    }

    /// `owl:DatatypeProperty` assertion: a declaration, not evidence.
    pub fn assert_datatype_property(&mut self, property_iri: &str) {
        let entry = self.get_or_add(property_iri);
        if entry.is_object {
            entry.is_object = false;
        } else {
            entry.is_datatype = true;
        }
    }

    pub fn assert_functional(&mut self, property_iri: &str) {
        self.get_or_add(property_iri).is_functional = true;
    }

    pub fn assert_inverse_functional(&mut self, property_iri: &str) {
        let entry = self.get_or_add(property_iri);
        entry.is_inverse_functional = true;
        entry.is_object = true;
    }

    pub fn add_domain(&mut self, property_iri: &str, domain_type_iri: &str, types: &mut TypeRegistry) {
        types.add_type(domain_type_iri);
        self.get_or_add(property_iri).domains.insert(domain_type_iri.to_string());
    }

    /// Range resolution differs by property kind: a datatype property's
    /// range is a (property, datatype) pair scoped to that property; an
    /// object property's range is a plain class. Matches
    /// `add_property_range`.
    pub fn add_range(&mut self, property_iri: &str, range_iri: &str, types: &mut TypeRegistry) {
        let property_id = self.get_or_add(property_iri).id.clone();
        let is_datatype = self.get_or_add(property_iri).is_datatype;
        // A datatype range is keyed by the owning property's id (into
        // `types.datatypes`), since the literal-value buffer is scoped to
        // this property; an object-property range is keyed by the class
        // IRI (into `types.types`), shared across every property with
        // that range class.
        let type_key = if is_datatype {
            types.get_or_add_datatype(&property_id, range_iri);
            property_id
        } else {
            types.add_type(range_iri);
            range_iri.to_string()
        };
        self.get_or_add(property_iri).ranges.insert(type_key);
    }

    pub fn add_subproperty(&mut self, superproperty: &str, subproperty: &str) {
        self.subproperties.entry(superproperty.to_string()).or_default().insert(subproperty.to_string());
    }

    pub fn add_inverse(&mut self, p1: &str, p2: &str) {
        self.inverse_properties.insert((p1.to_string(), p2.to_string()));
    }

    pub fn object_property_iris(&self) -> HashSet<String> {
        self.properties.values().filter(|p| p.is_object).map(|p| p.iri.clone()).collect()
    }

    pub fn datatype_property_iris(&self) -> HashSet<String> {
        self.properties.values().filter(|p| p.is_datatype).map(|p| p.iri.clone()).collect()
    }

    pub fn functional_object_property_iris(&self) -> HashSet<String> {
        self.properties.values().filter(|p| p.is_object && p.is_functional).map(|p| p.iri.clone()).collect()
    }

    pub fn inverse_functional_object_property_iris(&self) -> HashSet<String> {
        self.properties.values().filter(|p| p.is_object && p.is_inverse_functional).map(|p| p.iri.clone()).collect()
    }
}

fn local_part(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_evidence_downgrades_prior_object_declaration() {
        let mut props = PropertyRegistry::new();
        props.assert_object_property("http://ex.org#p");
        props.declare_datatype("http://ex.org#p");
        let entry = props.get("http://ex.org#p").unwrap();
        assert!(!entry.is_object);
        assert!(!entry.is_datatype);
    }

    #[test]
    fn literal_evidence_pins_datatype_when_not_object() {
        let mut props = PropertyRegistry::new();
        props.declare_datatype("http://ex.org#p");
        assert!(props.get("http://ex.org#p").unwrap().is_datatype);
    }
}
