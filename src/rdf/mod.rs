//! RDF term model and triple source (C4's upstream collaborator)
//!
//! spec.md §1 treats RDF parsing itself as a lower-level external
//! collaborator: the registry only needs a stream of `(subject, predicate,
//! object)` triples with every blank node already skolemized into an IRI.
//! This module owns that boundary. Term types are a small local model
//! (named node / blank node / literal), in the spirit of a from-scratch
//! RDF data model; actual document parsing is delegated to `oxttl`, whose
//! richer term types are converted to ours at the parser boundary so nothing
//! downstream (`registry`, `router`) depends on an external crate's term API.

pub mod vocab;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use oxrdf::{Subject as OxSubject, Term as OxTerm};
use oxttl::{NTriplesParser, TurtleParser};

use crate::error::IngestError;

/// An RDF literal: a lexical form plus an optional datatype IRI and
/// language tag (mutually exclusive per RDF 1.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

/// An RDF object term: either a resource (always an IRI after
/// skolemization) or a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Resource(String),
    Literal(Literal),
}

/// A single triple with every blank node already replaced by a fresh IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// Gives every blank node a stable, process-unique IRI identity the first
/// time it is seen, and reuses that identity for subsequent mentions of
/// the same blank node within one document.
#[derive(Debug, Default)]
pub struct Skolemizer {
    seen: HashMap<String, String>,
    counter: u64,
}

impl Skolemizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, blank_node_id: &str) -> String {
        if let Some(iri) = self.seen.get(blank_node_id) {
            return iri.clone();
        }
        self.counter += 1;
        let iri = format!("urn:skolem:{}", self.counter);
        self.seen.insert(blank_node_id.to_string(), iri.clone());
        iri
    }
}

fn subject_to_iri(subject: &OxSubject, skolemizer: &mut Skolemizer) -> String {
    match subject {
        OxSubject::NamedNode(n) => n.as_str().to_string(),
        OxSubject::BlankNode(b) => skolemizer.resolve(b.as_str()),
    }
}

fn term_to_object(term: &OxTerm, skolemizer: &mut Skolemizer) -> Term {
    match term {
        OxTerm::NamedNode(n) => Term::Resource(n.as_str().to_string()),
        OxTerm::BlankNode(b) => Term::Resource(skolemizer.resolve(b.as_str())),
        OxTerm::Literal(lit) => Term::Literal(Literal {
            value: lit.value().to_string(),
            datatype: if lit.is_plain() { None } else { Some(lit.datatype().as_str().to_string()) },
            language: lit.language().map(str::to_string),
        }),
    }
}

/// Parses an RDF document into a fully skolemized triple vector. The
/// format is chosen from the file extension: `.ttl`/`.turtle` use the
/// Turtle grammar, everything else is treated as N-Triples.
pub fn parse_file(path: &Path) -> Result<Vec<Triple>, IngestError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut skolemizer = Skolemizer::new();
    let mut triples = Vec::new();

    let is_turtle = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("ttl") || e.eq_ignore_ascii_case("turtle"))
        .unwrap_or(false);

    if is_turtle {
        for result in TurtleParser::new().for_reader(reader) {
            let t = result.map_err(|e| IngestError::Rdf(e.to_string()))?;
            triples.push(Triple {
                subject: subject_to_iri(&t.subject, &mut skolemizer),
                predicate: t.predicate.as_str().to_string(),
                object: term_to_object(&t.object, &mut skolemizer),
            });
        }
    } else {
        for result in NTriplesParser::new().for_reader(reader) {
            let t = result.map_err(|e| IngestError::Rdf(e.to_string()))?;
            triples.push(Triple {
                subject: subject_to_iri(&t.subject, &mut skolemizer),
                predicate: t.predicate.as_str().to_string(),
                object: term_to_object(&t.object, &mut skolemizer),
            });
        }
    }

    Ok(triples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skolemizer_is_stable_and_unique() {
        let mut s = Skolemizer::new();
        let a = s.resolve("b0");
        let b = s.resolve("b1");
        let a_again = s.resolve("b0");
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert!(a.starts_with("urn:skolem:"));
    }
}
