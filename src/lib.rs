//! # Semantic Schema Inference Engine
//!
//! Given a CSV sample or an RDF/OWL document, infers a labeled graph of
//! typed columns (via the column type inferencer) and named links between
//! them (via the RDF knowledge-source ingester and its type registry).
//!
//! ## Pipeline
//!
//! ```text
//! CSV file ──────► csv_ingest::infer_from_csv ──┐
//!                                                 ├──► Vec<(String, Column)> ──► graph::build
//! RDF/OWL file ───► rdf_ingest::KnowledgeSource ──┘
//! ```
//!
//! CSV ingestion samples rows and runs every column through the C2 decision
//! tree in [`column::inferencer`]. RDF ingestion streams triples through a
//! statement router into a [`registry::TypeRegistry`], which resolves
//! pending domain/range/link buffers as resources get typed and finally
//! projects typed-id and datatype columns. Either path's output can be
//! handed to [`graph::build`] to produce a labeled column graph.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use semlabel::{config::Config, csv_ingest, graph};
//!
//! let config = Config::load()?;
//! let columns = csv_ingest::infer_from_csv(path, true, &config)?;
//! let names: Vec<_> = columns.iter().map(|(_, c)| c.clone()).collect();
//! let g = graph::build(&names);
//! ```
//!
//! ```rust,ignore
//! use semlabel::{config::Config, rdf_ingest::KnowledgeSource};
//!
//! let config = Config::load()?;
//! let source = KnowledgeSource::from_path(path, &config.rdf)?;
//! let columns = source.into_columns();
//! ```
//!
//! ## Module organization
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `column` | Column sum type, the C2 type decision tree, column distance |
//! | `datatype` | Literal lexical-form datatype inference (xsd types) |
//! | `registry` | Ontology bookkeeping: classes, properties, pending buffers, closure |
//! | `rdf` | Triple/term model, vocabulary constants, document parsing |
//! | `rdf_ingest` | `KnowledgeSource`: streams a document through the registry |
//! | `csv_ingest` | CSV sampling and column inference |
//! | `graph` | Column-graph projection and the `GraphSink` backend interface |
//! | `config` | Layered configuration (defaults, file, env) |
//! | `error` | Crate-wide error enums |

pub mod column;
pub mod config;
pub mod csv_ingest;
pub mod datatype;
pub mod error;
pub mod graph;
pub mod rdf;
pub mod rdf_ingest;
pub mod registry;

pub use column::Column;
pub use column::distance::DistanceError;
pub use config::Config;
pub use error::IngestError;
pub use rdf_ingest::KnowledgeSource;
