//! Top-level error stack shared by both ingestion paths, modeled on the
//! teacher's `schema::catalog::SchemaError` / `storage::error::StorageError`
//! pattern: one enum per boundary, `thiserror`-derived, no hand-rolled
//! `std::error::Error` impls.

use thiserror::Error;

use crate::datatype::DatatypeError;

/// Per spec.md §7: "There is exactly one consequential failure class the
/// user sees: parser failure." Every other kind of failure is recovered
/// locally inside the core and never reaches this enum. No partial
/// `TypeRegistry`/column set is ever returned alongside an `Err` here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("RDF parse error: {0}")]
    Rdf(String),

    #[error("datatype error: {0}")]
    Datatype(#[from] DatatypeError),
}
