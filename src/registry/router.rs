//! Statement Router (C4) — the predicate dispatch table of spec.md §4.4,
//! grounded on `KnowledgeSource`'s main streaming loop and
//! `_process_type_information`'s `rdf:type`-object sub-dispatch in
//! `original_source/util/knowledgesource.py`.

use crate::datatype::infer_literal_datatype;
use crate::rdf::vocab;
use crate::rdf::{Term, Triple};

use super::TypeRegistry;

/// Routes one triple, mutating `registry` and returning nothing — every
/// effect is either an immediate registry update or a pending-buffer
/// entry resolved later by [`TypeRegistry::register_type_assertion`].
/// `sample_portion` gates only *data* statements (the catch-all row of
/// spec.md §4.4's table); every ontology predicate is always routed.
pub fn route_statement(triple: &Triple, registry: &mut TypeRegistry, admit_data_statement: bool) {
    match triple.predicate.as_str() {
        p if p == vocab::RDF_TYPE => route_type_assertion(triple, registry),
        p if p == vocab::RDFS_LABEL => {
            if let Term::Literal(lit) = &triple.object {
                registry.observe_label(&lit.value);
            }
        }
        p if p == vocab::RDFS_COMMENT => {
            if let Term::Literal(lit) = &triple.object {
                registry.observe_comment(&lit.value);
            }
        }
        p if p == vocab::RDFS_SUBCLASS_OF => {
            if let Term::Resource(superclass) = &triple.object {
                registry.classes.add_subclass(superclass, &triple.subject);
            }
        }
        p if p == vocab::RDFS_SUBPROPERTY_OF => {
            if let Term::Resource(superproperty) = &triple.object {
                registry.properties.add_subproperty(superproperty, &triple.subject);
            }
        }
        p if p == vocab::RDFS_DOMAIN => {
            if let Term::Resource(domain_class) = &triple.object {
                registry.properties.add_domain(&triple.subject, domain_class, &mut registry.classes);
            }
        }
        p if p == vocab::RDFS_RANGE => {
            if let Term::Resource(range_class) = &triple.object {
                registry.properties.add_range(&triple.subject, range_class, &mut registry.classes);
            }
        }
        p if p == vocab::OWL_INVERSE_OF => {
            if let Term::Resource(p2) = &triple.object {
                registry.properties.add_inverse(&triple.subject, p2);
            }
        }
        p if p == vocab::OWL_EQUIVALENT_CLASS => {
            if let Term::Resource(equivalent) = &triple.object {
                registry.classes.add_subclass(&triple.subject, equivalent);
                registry.classes.add_subclass(equivalent, &triple.subject);
            }
        }
        p if p == vocab::OWL_DATATYPE_PROPERTY => registry.properties.assert_datatype_property(&triple.subject),
        p if p == vocab::OWL_OBJECT_PROPERTY => registry.properties.assert_object_property(&triple.subject),
        p if p == vocab::OWL_FUNCTIONAL_PROPERTY => registry.properties.assert_functional(&triple.subject),
        p if p == vocab::OWL_INVERSE_FUNCTIONAL_PROPERTY => registry.properties.assert_inverse_functional(&triple.subject),
        p if p == vocab::OWL_ON_PROPERTY => {
            if let Term::Resource(property) = &triple.object {
                let restriction = registry.pending.restrictions.entry(triple.subject.clone()).or_default();
                restriction.on_property = Some(property.clone());
            }
        }
        p if p == vocab::OWL_SOME_VALUES_FROM => {
            if let Term::Resource(filler) = &triple.object {
                let restriction = registry.pending.restrictions.entry(triple.subject.clone()).or_default();
                restriction.some_values_from = Some(filler.clone());
            }
        }
        p if p == vocab::OWL_HAS_SELF => {
            let restriction = registry.pending.restrictions.entry(triple.subject.clone()).or_default();
            restriction.has_self = true;
        }
        p if vocab::is_always_noop_predicate(p) => {}
        _ => {
            if admit_data_statement {
                route_data_statement(triple, registry);
            }
        }
    }
}

/// `rdf:type`'s object decides whether `s` is being declared a class, a
/// property (of some kind), or a plain instance of a domain class. Mirrors
/// `_process_type_information`'s dispatch exactly.
fn route_type_assertion(triple: &Triple, registry: &mut TypeRegistry) {
    let Term::Resource(object_iri) = &triple.object else { return };

    if vocab::is_class_marker(object_iri) {
        registry.classes.add_type(&triple.subject);
    } else if object_iri == vocab::OWL_DATATYPE_PROPERTY {
        registry.properties.assert_datatype_property(&triple.subject);
    } else if object_iri == vocab::OWL_OBJECT_PROPERTY {
        registry.properties.assert_object_property(&triple.subject);
    } else if object_iri == vocab::OWL_FUNCTIONAL_PROPERTY {
        registry.properties.assert_functional(&triple.subject);
    } else if object_iri == vocab::OWL_INVERSE_FUNCTIONAL_PROPERTY {
        registry.properties.assert_inverse_functional(&triple.subject);
    } else if vocab::is_metadata_type(object_iri) {
        // annotation property / ontology / plain rdfs:Datatype declaration
    } else {
        registry.register_type_assertion(&triple.subject, object_iri);
    }
}

/// Core routing of a non-ontology statement `(s, p, o)`, per spec.md
/// §4.4's literal/IRI object cases.
fn route_data_statement(triple: &Triple, registry: &mut TypeRegistry) {
    match &triple.object {
        Term::Literal(lit) => {
            registry.properties.declare_datatype(&triple.predicate);
            let datatype_iri = lit.datatype.clone().unwrap_or_else(|| infer_literal_datatype(&lit.value).to_string());

            let property_id = registry.properties.short_id(&triple.predicate);
            registry.classes.get_or_add_datatype(&property_id, &datatype_iri).values.push(lit.value.clone());

            registry.route_domain_instance(&triple.predicate, &triple.subject);
        }
        Term::Resource(object_iri) => {
            registry.properties.declare_object(&triple.predicate);
            registry.route_domain_instance(&triple.predicate, &triple.subject);
            registry.route_range_instance(&triple.predicate, object_iri);
            registry.route_link(&triple.subject, &triple.predicate, object_iri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn resource(iri: &str) -> Term {
        Term::Resource(iri.to_string())
    }

    #[test]
    fn subclass_triple_records_edge() {
        let mut reg = TypeRegistry::new();
        let t = Triple {
            subject: "http://ex.org#Dog".into(),
            predicate: vocab::RDFS_SUBCLASS_OF.into(),
            object: resource("http://ex.org#Animal"),
        };
        route_statement(&t, &mut reg, true);
        assert!(reg.subclasses_of("http://ex.org#Animal").contains("http://ex.org#Dog"));
    }

    #[test]
    fn object_property_declaration_is_asserted() {
        let mut reg = TypeRegistry::new();
        let t = Triple {
            subject: "http://ex.org#knows".into(),
            predicate: vocab::RDF_TYPE.into(),
            object: resource(vocab::OWL_OBJECT_PROPERTY),
        };
        route_statement(&t, &mut reg, true);
        assert!(reg.object_property_iris().contains("http://ex.org#knows"));
    }

    #[test]
    fn typed_instance_assertion_registers_type() {
        let mut reg = TypeRegistry::new();
        let t = Triple {
            subject: "http://ex.org#alice".into(),
            predicate: vocab::RDF_TYPE.into(),
            object: resource("http://ex.org#Person"),
        };
        route_statement(&t, &mut reg, true);
        assert_eq!(reg.lookup_type("http://ex.org#alice").as_deref(), Some("http://ex.org#Person"));
    }

    #[test]
    fn literal_data_statement_buffers_value_and_domain() {
        let mut reg = TypeRegistry::new();
        let type_triple = Triple {
            subject: "http://ex.org#alice".into(),
            predicate: vocab::RDF_TYPE.into(),
            object: resource("http://ex.org#Person"),
        };
        route_statement(&type_triple, &mut reg, true);

        let age_triple = Triple {
            subject: "http://ex.org#alice".into(),
            predicate: "http://ex.org#age".into(),
            object: Term::Literal(Literal { value: "42".into(), datatype: None, language: None }),
        };
        route_statement(&age_triple, &mut reg, true);

        assert!(reg.datatype_property_iris().contains("http://ex.org#age"));
        assert!(reg.property_domains("http://ex.org#age").contains("http://ex.org#Person"));
    }

    #[test]
    fn sample_portion_gate_drops_data_statements_only() {
        let mut reg = TypeRegistry::new();
        let age_triple = Triple {
            subject: "http://ex.org#alice".into(),
            predicate: "http://ex.org#age".into(),
            object: Term::Literal(Literal { value: "42".into(), datatype: None, language: None }),
        };
        route_statement(&age_triple, &mut reg, false);
        assert!(reg.datatype_property_iris().is_empty());
    }
}
