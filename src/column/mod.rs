//! Column Model (C1)
//!
//! A [`Column`] is the sum type every inference path ultimately produces:
//! the CSV path builds one per header, the RDF path builds one per `Type`
//! or datatype projection at finalization. Every variant carries its own
//! name and a `links` table; the registry owns the columns themselves, a
//! `Column` only ever borrows other columns by name.

pub mod distance;
pub mod inferencer;

use std::collections::{HashMap, HashSet};

/// The name of a link, e.g. a property id or a CSV header name.
pub type LinkName = String;

/// Non-owning handle to another column: its unique name within the
/// registry/graph that owns it. Never a clone of the target column.
pub type ColumnRef = String;

/// Length statistics shared by the string-like variants (`Id`, `TypedId`,
/// `String`, `Text`).
#[derive(Debug, Clone, PartialEq)]
pub struct LengthStats {
    pub min_len: usize,
    pub avg_len: f64,
    pub max_len: usize,
}

/// Numeric statistics shared by `Integer`/`Float`/`Latitude`/`Longitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub stddev: f64,
}

/// A labeled column: the result of running C2 over a raw cell sequence, or
/// of projecting a `Type`/datatype at C3 finalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Untyped string identifier.
    Id {
        column_name: String,
        stats: LengthStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Identifier whose containing RDF type is known; carries the member
    /// set so later triples can be tested for inclusion.
    TypedId {
        column_name: String,
        stats: LengthStats,
        ids: HashSet<String>,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Short atomic string.
    String {
        column_name: String,
        stats: LengthStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Long string containing internal whitespace.
    Text {
        column_name: String,
        stats: LengthStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Small closed set of values, insertion order preserved.
    Categories {
        column_name: String,
        categories: indexmap::IndexSet<String>,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    Boolean {
        column_name: String,
        portion_true: f64,
        portion_false: f64,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    Integer {
        column_name: String,
        stats: NumericStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    Float {
        column_name: String,
        stats: NumericStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// `Float` refined to WGS84 latitude (`-90 <= min, max <= 90`).
    Latitude {
        column_name: String,
        stats: NumericStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// `Float` refined to WGS84 longitude (`-180 <= min, max <= 180`).
    Longitude {
        column_name: String,
        stats: NumericStats,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Three POSIX-second timestamps, `min <= mean <= max`.
    DateTime {
        column_name: String,
        min: f64,
        mean: f64,
        max: f64,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
    /// Transient bag used while a type/datatype has not been resolved yet.
    Unknown {
        column_name: String,
        values: Vec<String>,
        links: HashMap<LinkName, HashSet<ColumnRef>>,
    },
}

impl Column {
    pub fn column_name(&self) -> &str {
        match self {
            Column::Id { column_name, .. }
            | Column::TypedId { column_name, .. }
            | Column::String { column_name, .. }
            | Column::Text { column_name, .. }
            | Column::Categories { column_name, .. }
            | Column::Boolean { column_name, .. }
            | Column::Integer { column_name, .. }
            | Column::Float { column_name, .. }
            | Column::Latitude { column_name, .. }
            | Column::Longitude { column_name, .. }
            | Column::DateTime { column_name, .. }
            | Column::Unknown { column_name, .. } => column_name,
        }
    }

    pub fn links(&self) -> &HashMap<LinkName, HashSet<ColumnRef>> {
        match self {
            Column::Id { links, .. }
            | Column::TypedId { links, .. }
            | Column::String { links, .. }
            | Column::Text { links, .. }
            | Column::Categories { links, .. }
            | Column::Boolean { links, .. }
            | Column::Integer { links, .. }
            | Column::Float { links, .. }
            | Column::Latitude { links, .. }
            | Column::Longitude { links, .. }
            | Column::DateTime { links, .. }
            | Column::Unknown { links, .. } => links,
        }
    }

    pub fn links_mut(&mut self) -> &mut HashMap<LinkName, HashSet<ColumnRef>> {
        match self {
            Column::Id { links, .. }
            | Column::TypedId { links, .. }
            | Column::String { links, .. }
            | Column::Text { links, .. }
            | Column::Categories { links, .. }
            | Column::Boolean { links, .. }
            | Column::Integer { links, .. }
            | Column::Float { links, .. }
            | Column::Latitude { links, .. }
            | Column::Longitude { links, .. }
            | Column::DateTime { links, .. }
            | Column::Unknown { links, .. } => links,
        }
    }

    /// Adds `target` as a link target under `link_name`, e.g. the first
    /// CSV column linking to every other inferred column, or a property's
    /// id linking a domain column to a range column.
    pub fn add_link(&mut self, link_name: impl Into<LinkName>, target: impl Into<ColumnRef>) {
        self.links_mut()
            .entry(link_name.into())
            .or_default()
            .insert(target.into());
    }

    /// A short discriminant name, used in diagnostics and tests.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Column::Id { .. } => "Id",
            Column::TypedId { .. } => "TypedId",
            Column::String { .. } => "String",
            Column::Text { .. } => "Text",
            Column::Categories { .. } => "Categories",
            Column::Boolean { .. } => "Boolean",
            Column::Integer { .. } => "Integer",
            Column::Float { .. } => "Float",
            Column::Latitude { .. } => "Latitude",
            Column::Longitude { .. } => "Longitude",
            Column::DateTime { .. } => "DateTime",
            Column::Unknown { .. } => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_name_matches_constructor() {
        let c = Column::Integer {
            column_name: "age".into(),
            stats: NumericStats { min: 1.0, avg: 2.0, max: 3.0, stddev: 0.5 },
            links: HashMap::new(),
        };
        assert_eq!(c.variant_name(), "Integer");
        assert_eq!(c.column_name(), "age");
    }

    #[test]
    fn add_link_creates_and_reuses_entry() {
        let mut c = Column::Id {
            column_name: "id".into(),
            stats: LengthStats { min_len: 1, avg_len: 1.0, max_len: 1 },
            links: HashMap::new(),
        };
        c.add_link("hasName", "name");
        c.add_link("hasName", "name2");
        assert_eq!(c.links()["hasName"].len(), 2);
    }
}
