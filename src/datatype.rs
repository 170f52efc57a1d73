//! XSD datatype IRI → column-variant projection (used at C3 finalization)
//!
//! Grounded on `util/datatypeinferencer.py`'s `get_column`/`get_literal_type`
//! in the original implementation, restated as the table in spec.md §6.

use std::collections::HashMap;

use thiserror::Error;

use crate::column::inferencer::{length_stats, numeric_stats, parse_datetime_lenient};
use crate::column::Column;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatatypeError {
    #[error("unknown datatype IRI: {0}")]
    UnknownDatatype(String),
}

/// Which column shape an XSD IRI projects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatatypeProjection {
    Integer,
    Float,
    DateTime,
    Boolean,
    /// String, refined to Text when any observed literal contains whitespace.
    StringOrText,
    TypedId,
    /// Projected as Integer statistics, per spec.md §6.
    Byte,
    /// DateTime with the date component zeroed.
    Time,
}

/// Maps an XSD datatype IRI to the shape of column it projects to. Mirrors
/// the table in spec.md §6 exactly; local parts are matched regardless of
/// which of the two common XSD namespace IRIs prefixes them.
pub fn xsd_to_variant_kind(iri: &str) -> Result<DatatypeProjection, DatatypeError> {
    let local = local_part(iri);
    match local {
        "int" | "integer" | "long" | "short" | "positiveInteger" | "nonNegativeInteger"
        | "nonPositiveInteger" | "negativeInteger" | "unsignedByte" | "unsignedInt"
        | "unsignedLong" | "unsignedShort" | "year" | "month" | "day" | "hour" | "minute"
        | "second" | "timezoneOffset" => Ok(DatatypeProjection::Integer),

        "decimal" | "float" | "double" => Ok(DatatypeProjection::Float),

        "date" | "dateTime" | "dateTimeStamp" => Ok(DatatypeProjection::DateTime),

        "boolean" => Ok(DatatypeProjection::Boolean),

        "string" | "normalizedString" | "token" | "IDREFS" | "NMTOKENS" | "NOTATION" => {
            Ok(DatatypeProjection::StringOrText)
        }

        "anyURI" | "ID" | "IDREF" | "NCName" | "NMTOKEN" | "Name" | "QName" | "language"
        | "hexBinary" => Ok(DatatypeProjection::TypedId),

        "byte" => Ok(DatatypeProjection::Byte),

        "time" => Ok(DatatypeProjection::Time),

        _ => Err(DatatypeError::UnknownDatatype(iri.to_string())),
    }
}

fn local_part(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

/// Infers a datatype IRI for a literal's lexical form when the literal
/// itself carries none, per spec.md §4.4 step 2: integer, then float, then
/// mixed-format date/date-time (date if the time component is midnight),
/// then string.
pub fn infer_literal_datatype(value: &str) -> &'static str {
    if value.trim().parse::<i64>().is_ok() {
        return "http://www.w3.org/2001/XMLSchema#int";
    }
    if value.trim().parse::<f64>().is_ok() {
        return "http://www.w3.org/2001/XMLSchema#float";
    }
    if let Some(ts) = parse_datetime_lenient(value) {
        if (ts % 86_400.0).abs() < f64::EPSILON {
            return "http://www.w3.org/2001/XMLSchema#date";
        }
        return "http://www.w3.org/2001/XMLSchema#dateTime";
    }
    "http://www.w3.org/2001/XMLSchema#string"
}

/// Projects a per-(property, datatype) value buffer directly into a
/// [`Column`], bypassing the general C2 cascade since the datatype is
/// already known. Falls back to `Column::Unknown` when `values` is empty,
/// matching the source's zero-valued-column behavior without resorting to
/// a wall-clock default.
pub fn project_datatype_column(
    column_name: &str,
    iri: &str,
    values: &[String],
) -> Result<Column, DatatypeError> {
    let kind = xsd_to_variant_kind(iri)?;
    let links = HashMap::new();

    Ok(match kind {
        DatatypeProjection::Integer | DatatypeProjection::Byte => {
            let parsed: Vec<f64> = values.iter().filter_map(|v| v.trim().parse::<i64>().ok()).map(|v| v as f64).collect();
            Column::Integer { column_name: column_name.to_string(), stats: numeric_stats_or_zero(&parsed), links }
        }
        DatatypeProjection::Float => {
            let parsed: Vec<f64> = values.iter().filter_map(|v| v.trim().parse::<f64>().ok()).collect();
            Column::Float { column_name: column_name.to_string(), stats: numeric_stats_or_zero(&parsed), links }
        }
        DatatypeProjection::DateTime | DatatypeProjection::Time => {
            let parsed: Vec<f64> = values.iter().filter_map(|v| parse_datetime_lenient(v)).collect();
            if parsed.is_empty() {
                Column::DateTime { column_name: column_name.to_string(), min: 0.0, mean: 0.0, max: 0.0, links }
            } else {
                let min = parsed.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = parsed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let mean = parsed.iter().sum::<f64>() / parsed.len() as f64;
                Column::DateTime { column_name: column_name.to_string(), min, mean, max, links }
            }
        }
        DatatypeProjection::Boolean => {
            let num_all = values.len();
            let num_pos = values.iter().filter(|v| parse_bool_lenient(v) == Some(true)).count();
            let num_neg = values.iter().filter(|v| parse_bool_lenient(v) == Some(false)).count();
            let (portion_true, portion_false) = if num_all > 0 {
                (num_pos as f64 / num_all as f64, num_neg as f64 / num_all as f64)
            } else {
                (0.0, 0.0)
            };
            Column::Boolean { column_name: column_name.to_string(), portion_true, portion_false, links }
        }
        DatatypeProjection::StringOrText => {
            if values.is_empty() {
                Column::String { column_name: column_name.to_string(), stats: length_stats(&[]), links }
            } else {
                let has_space = values.iter().any(|v| v.trim().contains(' '));
                let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();
                if has_space {
                    Column::Text { column_name: column_name.to_string(), stats: length_stats(&lengths), links }
                } else {
                    Column::String { column_name: column_name.to_string(), stats: length_stats(&lengths), links }
                }
            }
        }
        DatatypeProjection::TypedId => {
            let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();
            Column::TypedId {
                column_name: column_name.to_string(),
                stats: length_stats(&lengths),
                ids: values.iter().cloned().collect(),
                links,
            }
        }
    })
}

fn numeric_stats_or_zero(values: &[f64]) -> crate::column::NumericStats {
    if values.is_empty() {
        crate::column::NumericStats { min: 0.0, avg: 0.0, max: 0.0, stddev: 0.0 }
    } else {
        numeric_stats(values)
    }
}

fn parse_bool_lenient(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else if let Ok(i) = s.trim().parse::<i64>() {
        Some(i != 0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_family_projects_to_integer() {
        assert_eq!(
            xsd_to_variant_kind("http://www.w3.org/2001/XMLSchema#positiveInteger").unwrap(),
            DatatypeProjection::Integer
        );
    }

    #[test]
    fn unknown_iri_is_an_error() {
        assert!(xsd_to_variant_kind("http://example.org/not-xsd#weird").is_err());
    }

    #[test]
    fn project_integer_column_from_literal_buffer() {
        let values = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let col = project_datatype_column("age", "http://www.w3.org/2001/XMLSchema#int", &values).unwrap();
        match col {
            Column::Integer { stats, .. } => {
                assert_eq!(stats.min, 1.0);
                assert_eq!(stats.max, 3.0);
            }
            other => panic!("expected Integer, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn string_with_space_becomes_text() {
        let values = vec!["hello world".to_string(), "a b".to_string()];
        let col = project_datatype_column("desc", "http://www.w3.org/2001/XMLSchema#string", &values).unwrap();
        assert_eq!(col.variant_name(), "Text");
    }
}
