//! Column Type Inferencer (C2)
//!
//! Implements the decision tree: a raw sequence of cell values becomes one
//! labeled [`Column`] variant plus its summary statistics. Every threshold
//! is read from [`InferenceConfig`]; nothing here is a bare literal.
//!
//! Unlike the pandas-backed source this is grounded on, there is no native
//! "storage dtype" to branch on first: every raw cell, whether it comes
//! from a CSV field or an RDF literal's lexical form, arrives as text. The
//! four-branch decision tree of the source (bool storage / int storage /
//! float storage / string-or-untyped) therefore collapses into one ordered
//! cascade over text cells, preserving the same tie-break order (date
//! before numeric-string) and the same thresholds.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexSet;

use super::{Column, LengthStats, NumericStats};
use crate::config::InferenceConfig;

/// Infers a [`Column`] from a raw cell sequence. Never fails: if every
/// branch is inconclusive the terminal fallback is `Column::Unknown`,
/// carrying the raw values for later re-inference.
pub fn infer(values: &[Option<String>], column_name: &str, config: &InferenceConfig) -> Column {
    let empty_links = || HashMap::new();

    if values.is_empty() {
        return Column::Unknown {
            column_name: column_name.to_string(),
            values: Vec::new(),
            links: empty_links(),
        };
    }

    let non_null: Vec<&str> = values.iter().filter_map(|v| v.as_deref()).collect();

    if non_null.is_empty() {
        return Column::Boolean {
            column_name: column_name.to_string(),
            portion_true: 0.0,
            portion_false: 0.0,
            links: empty_links(),
        };
    }

    // Branch 1: every non-null cell is a bool literal.
    if let Some(col) = try_boolean(values, column_name, config) {
        tracing::debug!(column = column_name, variant = col.variant_name(), "C2 branch: boolean");
        return col;
    }

    // Branch 4(a): lenient date-time parse, tried before any numeric
    // interpretation — load-bearing per the source ("2024" parses as a
    // single-field date under lenient parsing before it parses as an int).
    if let Some(col) = try_datetime(&non_null, column_name) {
        tracing::debug!(column = column_name, variant = col.variant_name(), "C2 branch: datetime");
        return col;
    }

    // Branches 2 / 4(b): every non-null cell parses as an integer.
    if let Some(col) = try_integer(&non_null, column_name, config) {
        tracing::debug!(column = column_name, variant = col.variant_name(), "C2 branch: integer");
        return col;
    }

    // Branches 3 / 4(c): every non-null cell parses as a float.
    if let Some(col) = try_float(&non_null, column_name, config) {
        tracing::debug!(column = column_name, variant = col.variant_name(), "C2 branch: float");
        return col;
    }

    // Branch 4(d): string fallback chain.
    let col = string_branch(&non_null, column_name, config);
    tracing::debug!(column = column_name, variant = col.variant_name(), "C2 branch: string fallback");
    col
}

fn try_boolean(values: &[Option<String>], column_name: &str, _config: &InferenceConfig) -> Option<Column> {
    let non_null: Vec<&str> = values.iter().filter_map(|v| v.as_deref()).collect();
    if non_null.is_empty() {
        return None;
    }
    let all_bool = non_null
        .iter()
        .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"));
    if !all_bool {
        return None;
    }
    let num_all = values.len();
    let num_pos = non_null.iter().filter(|v| v.eq_ignore_ascii_case("true")).count();
    let num_neg = non_null.iter().filter(|v| v.eq_ignore_ascii_case("false")).count();
    Some(Column::Boolean {
        column_name: column_name.to_string(),
        portion_true: num_pos as f64 / num_all as f64,
        portion_false: num_neg as f64 / num_all as f64,
        links: HashMap::new(),
    })
}

fn try_datetime(non_null: &[&str], column_name: &str) -> Option<Column> {
    let mut timestamps = Vec::with_capacity(non_null.len());
    for v in non_null {
        timestamps.push(parse_datetime_lenient(v)?);
    }
    if timestamps.is_empty() {
        return None;
    }
    let min = timestamps.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = timestamps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = timestamps.iter().sum::<f64>() / timestamps.len() as f64;
    Some(Column::DateTime {
        column_name: column_name.to_string(),
        min,
        mean,
        max,
        links: HashMap::new(),
    })
}

/// Lenient mixed-format date-time parse, returning a POSIX-second timestamp.
/// Tries a handful of common layouts plus bare "YYYY" year strings, which is
/// the specific case the tie-break rule exists for.
pub(crate) fn parse_datetime_lenient(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().timestamp() as f64);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(nd) = NaiveDate::parse_from_str(s, fmt) {
            return Some(nd.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64);
        }
    }

    // Bare four-digit year, e.g. "2024" - a single-field date under lenient
    // mixed-format parsing.
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        let nd = NaiveDate::from_ymd_opt(year, 1, 1)?;
        return Some(nd.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64);
    }

    None
}

fn try_integer(non_null: &[&str], column_name: &str, config: &InferenceConfig) -> Option<Column> {
    let mut parsed = Vec::with_capacity(non_null.len());
    for v in non_null {
        parsed.push(v.trim().parse::<i64>().ok()?);
    }
    Some(build_integer_or_id(&parsed, column_name, config))
}

fn build_integer_or_id(values: &[i64], column_name: &str, config: &InferenceConfig) -> Column {
    let min = *values.iter().min().unwrap();
    let max = *values.iter().max().unwrap();
    let density = integer_density(values, min, max);
    let unique = values.iter().collect::<std::collections::HashSet<_>>().len();

    if density > config.integer_density_threshold && unique as u64 > config.integer_density_min_unique {
        let lengths: Vec<usize> = values.iter().map(|v| v.to_string().len()).collect();
        Column::Id {
            column_name: column_name.to_string(),
            stats: length_stats(&lengths),
            links: HashMap::new(),
        }
    } else {
        let floats: Vec<f64> = values.iter().map(|v| *v as f64).collect();
        Column::Integer {
            column_name: column_name.to_string(),
            stats: numeric_stats(&floats),
            links: HashMap::new(),
        }
    }
}

fn integer_density(values: &[i64], min: i64, max: i64) -> f64 {
    let range = max - min;
    if range == 0 {
        return 0.0;
    }
    let unique = values.iter().collect::<std::collections::HashSet<_>>().len();
    unique as f64 / range as f64
}

fn try_float(non_null: &[&str], column_name: &str, config: &InferenceConfig) -> Option<Column> {
    let mut parsed = Vec::with_capacity(non_null.len());
    for v in non_null {
        parsed.push(v.trim().parse::<f64>().ok()?);
    }
    Some(build_float_with_refinement(&parsed, column_name, config))
}

fn build_float_with_refinement(values: &[f64], column_name: &str, config: &InferenceConfig) -> Column {
    let stats = numeric_stats(values);

    let looks_like_lat = stats.min > -config.latitude_bound
        && stats.max < config.latitude_bound
        && stats.stddev > config.coordinate_stddev_threshold
        && !column_name.to_lowercase().contains("lon");
    if looks_like_lat {
        return Column::Latitude {
            column_name: column_name.to_string(),
            stats,
            links: HashMap::new(),
        };
    }

    let looks_like_lon = stats.min > -config.longitude_bound
        && stats.max < config.longitude_bound
        && stats.stddev > config.coordinate_stddev_threshold;
    if looks_like_lon {
        return Column::Longitude {
            column_name: column_name.to_string(),
            stats,
            links: HashMap::new(),
        };
    }

    Column::Float {
        column_name: column_name.to_string(),
        stats,
        links: HashMap::new(),
    }
}

fn string_branch(non_null: &[&str], column_name: &str, config: &InferenceConfig) -> Column {
    let unique: IndexSet<&str> = non_null.iter().copied().collect();

    if unique.len() as f64 / non_null.len() as f64 < config.category_ratio_threshold {
        return Column::Categories {
            column_name: column_name.to_string(),
            categories: unique.into_iter().map(str::to_string).collect(),
            links: HashMap::new(),
        };
    }

    let has_internal_space = non_null.iter().any(|v| v.trim().contains(' '));
    let lengths: Vec<usize> = non_null.iter().map(|v| v.chars().count()).collect();

    if has_internal_space {
        return Column::Text {
            column_name: column_name.to_string(),
            stats: length_stats(&lengths),
            links: HashMap::new(),
        };
    }

    let len_stats = length_stats(&lengths);
    let len_floats: Vec<f64> = lengths.iter().map(|l| *l as f64).collect();
    let stddev = population_stddev(&len_floats, mean(&len_floats));

    if stddev < config.id_length_stddev_threshold {
        Column::Id {
            column_name: column_name.to_string(),
            stats: len_stats,
            links: HashMap::new(),
        }
    } else {
        Column::String {
            column_name: column_name.to_string(),
            stats: len_stats,
            links: HashMap::new(),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor N, not N-1), per spec.
pub(crate) fn population_stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub(crate) fn numeric_stats(values: &[f64]) -> NumericStats {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = mean(values);
    let stddev = population_stddev(values, avg);
    NumericStats { min, avg, max, stddev }
}

pub(crate) fn length_stats(lengths: &[usize]) -> LengthStats {
    let min_len = *lengths.iter().min().unwrap_or(&0);
    let max_len = *lengths.iter().max().unwrap_or(&0);
    let avg_len = lengths.iter().map(|l| *l as f64).sum::<f64>() / lengths.len().max(1) as f64;
    LengthStats { min_len, avg_len, max_len }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> InferenceConfig {
        InferenceConfig::default()
    }

    fn vals(strs: &[&str]) -> Vec<Option<String>> {
        strs.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn dense_consecutive_integers_become_id() {
        let nums: Vec<String> = (999..=1040).map(|n: i64| n.to_string()).collect();
        let values: Vec<Option<String>> = nums.into_iter().map(Some).collect();
        let col = infer(&values, "code", &cfg());
        match col {
            Column::Id { stats, .. } => {
                assert_eq!(stats.min_len, 3);
                assert_eq!(stats.max_len, 4);
                assert!((stats.avg_len - 3.975).abs() < 0.01);
            }
            other => panic!("expected Id, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn sparse_integers_stay_integer() {
        let values = vals(&["23", "42", "1", "2", "3", "4", "5", "8", "9", "13"]);
        let col = infer(&values, "n", &cfg());
        match col {
            Column::Integer { stats, .. } => {
                assert_eq!(stats.min, 1.0);
                assert_eq!(stats.max, 42.0);
                assert!((stats.avg - 11.0).abs() < 1e-9);
                assert!((stats.stddev - 12.05).abs() < 0.05);
            }
            other => panic!("expected Integer, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn word_list_becomes_string() {
        let words: Vec<&str> = vec![
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
            "eighteen", "nineteen",
        ];
        let values = vals(&words);
        let col = infer(&values, "word", &cfg());
        match col {
            Column::String { stats, .. } => {
                assert_eq!(stats.min_len, 3);
                assert_eq!(stats.max_len, 9);
                assert!((stats.avg_len - 5.47).abs() < 0.05);
            }
            other => panic!("expected String, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn low_cardinality_strings_become_categories() {
        let mut animals = Vec::new();
        for _ in 0..11 {
            animals.push("mammal");
        }
        for _ in 0..10 {
            animals.push("fish");
        }
        for _ in 0..10 {
            animals.push("bird");
        }
        let values = vals(&animals);
        let col = infer(&values, "animal", &cfg());
        match col {
            Column::Categories { categories, .. } => {
                let mut sorted: Vec<&str> = categories.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                assert_eq!(sorted, vec!["bird", "fish", "mammal"]);
            }
            other => panic!("expected Categories, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn float_series_stays_float_when_not_coordinate_like() {
        let samples = [
            0.136, 0.246, 0.307, 0.993, 0.006, 0.4, 0.5, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8,
            0.15, 0.25, 0.35, 0.45, 0.55,
        ];
        let strs: Vec<String> = samples.iter().map(|f| f.to_string()).collect();
        let values: Vec<Option<String>> = strs.into_iter().map(Some).collect();
        let col = infer(&values, "score", &cfg());
        match col {
            Column::Float { stats, .. } => {
                assert!((stats.min - 0.006).abs() < 1e-9);
                assert!((stats.max - 0.993).abs() < 1e-9);
            }
            other => panic!("expected Float, got {:?}", other.variant_name()),
        }
    }

    #[test]
    fn latitude_like_series_is_refined() {
        // Spread wide enough to exceed the stddev threshold, bounded in [-90, 90].
        let samples = [-34.6, 55.76, -20.0, 40.0, 0.0, 10.0, -60.0, 30.0, -10.0, 50.0];
        let strs: Vec<String> = samples.iter().map(|f| f.to_string()).collect();
        let values: Vec<Option<String>> = strs.into_iter().map(Some).collect();
        let col = infer(&values, "latitude", &cfg());
        assert_eq!(col.variant_name(), "Latitude");
    }

    #[test]
    fn empty_input_is_unknown() {
        let col = infer(&[], "x", &cfg());
        assert_eq!(col.variant_name(), "Unknown");
    }
}
