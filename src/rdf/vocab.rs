//! Well-known RDF/RDFS/OWL predicate IRIs the statement router dispatches
//! on, per spec.md §4.4's predicate table.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

pub const OWL_INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";
pub const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
pub const OWL_HAS_SELF: &str = "http://www.w3.org/2002/07/owl#hasSelf";
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
pub const OWL_PRIOR_VERSION: &str = "http://www.w3.org/2002/07/owl#priorVersion";
pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
pub const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
pub const OWL_DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";

pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
pub const OWL_INVERSE_FUNCTIONAL_PROPERTY: &str =
    "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
pub const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";

/// `rdf:type` objects that name ontology/annotation/datatype metadata
/// rather than a domain class — a no-op in the router per spec.md §4.4.
pub fn is_metadata_type(object_iri: &str) -> bool {
    matches!(
        object_iri,
        OWL_ANNOTATION_PROPERTY | OWL_ONTOLOGY | RDFS_DATATYPE
    )
}

/// `rdf:type` objects that mark the subject as a class rather than an
/// instance of one — `owl:Restriction` is recorded as a class marker too,
/// since restrictions are captured via `onProperty`/`someValuesFrom` and
/// never treated as a domain-typed instance.
pub fn is_class_marker(object_iri: &str) -> bool {
    matches!(object_iri, OWL_CLASS | RDFS_CLASS | OWL_RESTRICTION)
}

/// Predicates that are always a no-op regardless of their object, per
/// spec.md §4.4's "vocab namespace-prefix predicates" row. `vann:` (the
/// vocabulary-annotation namespace) is matched by prefix since it names a
/// small open-ended family of annotation predicates, not a fixed set.
pub fn is_always_noop_predicate(predicate_iri: &str) -> bool {
    predicate_iri.starts_with("http://purl.org/vocab/vann/")
        || matches!(predicate_iri, OWL_PRIOR_VERSION | OWL_VERSION_INFO | OWL_IMPORTS | OWL_DEPRECATED)
}
