//! Column Distance (companion to C2)
//!
//! A pure, symmetric function over two columns' summary statistics. Most
//! variant pairs are simply incomparable — the source expresses this via
//! an exception raised from `__sub__`; here it is `Result::Err`, never
//! panics, and the caller decides whether to substitute `f64::INFINITY`.

use thiserror::Error;

use super::Column;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistanceError {
    #[error("columns are not comparable: {left} vs {right}")]
    Incomparable { left: &'static str, right: &'static str },
}

/// Computes the distance between two columns, or `Err` if the pair is not
/// one of the enumerated comparable kinds in the metric table.
pub fn distance(a: &Column, b: &Column) -> Result<f64, DistanceError> {
    use Column::*;

    match (a, b) {
        (Id { stats: s1, .. }, Id { stats: s2, .. })
        | (Id { stats: s1, .. }, TypedId { stats: s2, .. })
        | (TypedId { stats: s1, .. }, Id { stats: s2, .. })
        | (TypedId { stats: s1, .. }, TypedId { stats: s2, .. }) => Ok(length_distance(s1, s2)),

        (Text { stats: s1, .. }, Text { stats: s2, .. })
        | (String { stats: s1, .. }, String { stats: s2, .. })
        | (String { stats: s1, .. }, Text { stats: s2, .. })
        | (Text { stats: s1, .. }, String { stats: s2, .. }) => Ok(length_distance(s1, s2)),

        (Integer { stats: s1, .. }, Integer { stats: s2, .. })
        | (Integer { stats: s1, .. }, Float { stats: s2, .. })
        | (Float { stats: s1, .. }, Integer { stats: s2, .. })
        | (Float { stats: s1, .. }, Float { stats: s2, .. })
        | (Latitude { stats: s1, .. }, Latitude { stats: s2, .. })
        | (Latitude { stats: s1, .. }, Longitude { stats: s2, .. })
        | (Longitude { stats: s1, .. }, Latitude { stats: s2, .. })
        | (Longitude { stats: s1, .. }, Longitude { stats: s2, .. })
        | (Latitude { stats: s1, .. }, Float { stats: s2, .. })
        | (Float { stats: s1, .. }, Latitude { stats: s2, .. })
        | (Latitude { stats: s1, .. }, Integer { stats: s2, .. })
        | (Integer { stats: s1, .. }, Latitude { stats: s2, .. })
        | (Longitude { stats: s1, .. }, Float { stats: s2, .. })
        | (Float { stats: s1, .. }, Longitude { stats: s2, .. })
        | (Longitude { stats: s1, .. }, Integer { stats: s2, .. })
        | (Integer { stats: s1, .. }, Longitude { stats: s2, .. }) => Ok(numeric_distance(s1, s2)),

        (
            Boolean { portion_true: t1, portion_false: f1, .. },
            Boolean { portion_true: t2, portion_false: f2, .. },
        ) => Ok((t1 - t2).abs() + (f1 - f2).abs()),

        (DateTime { min: min1, mean: mean1, max: max1, .. }, DateTime { min: min2, mean: mean2, max: max2, .. }) => {
            Ok(datetime_distance(*min1, *mean1, *max1, *min2, *mean2, *max2))
        }

        (Categories { categories: c1, .. }, Categories { categories: c2, .. }) => Ok(jaccard_distance(c1, c2)),

        _ => Err(DistanceError::Incomparable { left: a.variant_name(), right: b.variant_name() }),
    }
}

fn length_distance(a: &super::LengthStats, b: &super::LengthStats) -> f64 {
    (a.min_len as f64 - b.min_len as f64).abs()
        + (a.avg_len - b.avg_len).abs()
        + (a.max_len as f64 - b.max_len as f64).abs()
}

fn numeric_distance(a: &super::NumericStats, b: &super::NumericStats) -> f64 {
    (a.min - b.min).abs() + (a.avg - b.avg).abs() + (a.max - b.max).abs() + (a.stddev - b.stddev).abs()
}

/// Falls back to the largest representable finite real on overflow, per
/// the source's `(AttributeError, ValueError)` catch around POSIX-second
/// subtraction.
fn datetime_distance(min1: f64, mean1: f64, max1: f64, min2: f64, mean2: f64, max2: f64) -> f64 {
    let sum = (min1 - min2).abs() + (mean1 - mean2).abs() + (max1 - max2).abs();
    if sum.is_finite() {
        sum
    } else {
        f64::MAX
    }
}

fn jaccard_distance(a: &indexmap::IndexSet<String>, b: &indexmap::IndexSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    1.0 - (intersection as f64 / union as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{LengthStats, NumericStats};
    use std::collections::HashMap;

    fn id_col(name: &str, min: usize, avg: f64, max: usize) -> Column {
        Column::Id {
            column_name: name.to_string(),
            stats: LengthStats { min_len: min, avg_len: avg, max_len: max },
            links: HashMap::new(),
        }
    }

    fn bool_col(name: &str) -> Column {
        Column::Boolean { column_name: name.to_string(), portion_true: 0.5, portion_false: 0.5, links: HashMap::new() }
    }

    fn categories(name: &str, members: &[&str]) -> Column {
        Column::Categories {
            column_name: name.to_string(),
            categories: members.iter().map(|s| s.to_string()).collect(),
            links: HashMap::new(),
        }
    }

    fn float_col(name: &str, min: f64, avg: f64, max: f64, stddev: f64) -> Column {
        Column::Float { column_name: name.to_string(), stats: NumericStats { min, avg, max, stddev }, links: HashMap::new() }
    }

    #[test]
    fn identity_distance_is_zero() {
        let a = id_col("a", 1, 2.0, 3);
        assert_eq!(distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = float_col("a", 0.0, 1.0, 2.0, 0.5);
        let b = float_col("b", 1.0, 2.0, 3.0, 0.7);
        assert_eq!(distance(&a, &b).unwrap(), distance(&b, &a).unwrap());
    }

    #[test]
    fn categories_identical_sets_are_zero_distance() {
        let a = categories("a", &["c1", "c2", "c3"]);
        let b = categories("b", &["c1", "c2", "c3"]);
        assert_eq!(distance(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn categories_jaccard_distance() {
        let a = categories("a", &["c1", "c2", "c3"]);
        let b = categories("b", &["c3", "c4", "c5"]);
        let d = distance(&a, &b).unwrap();
        assert!((d - 0.8).abs() < 1e-9);
    }

    #[test]
    fn datetime_distance_matches_worked_example() {
        let a = Column::DateTime { column_name: "a".into(), min: 0.0, mean: 0.0, max: 0.0, links: HashMap::new() };
        let day = 86_400.0;
        let hm = 2.0 * 3600.0 + 4.0 * 60.0;
        let b = Column::DateTime {
            column_name: "b".into(),
            min: day,
            mean: hm,
            max: 63_158_400.0,
            links: HashMap::new(),
        };
        let d = distance(&a, &b).unwrap();
        assert!((d - 63_252_240.0).abs() < 1e-6);
    }

    #[test]
    fn id_vs_boolean_is_incomparable() {
        let a = id_col("a", 1, 1.0, 1);
        let b = bool_col("b");
        assert!(matches!(distance(&a, &b), Err(DistanceError::Incomparable { .. })));
    }
}
