//! CSV ingestion entry point (§6): reservoir-samples rows over `max_rows`,
//! treats the first column unconditionally as an Id column, and links
//! every other inferred column onto it under its header name. Grounded on
//! `util/columninferencer.py`'s pandas-frame-to-columns driver, restated
//! over the `csv` crate's row iterator instead of a loaded dataframe.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;

use crate::column::inferencer::infer;
use crate::column::Column;
use crate::config::Config;
use crate::error::IngestError;

/// Reads `path` and infers one `Column` per header. `has_header` controls
/// whether the first row is consumed as column names (synthesized as
/// `column_0`, `column_1`, ... otherwise). The first column is always an
/// Id column and links to every other column under that column's header.
/// `config.csv.max_rows` bounds the row sample; `config.inference` supplies
/// the C2 decision-tree thresholds for every column but the first.
pub fn infer_from_csv(path: &Path, has_header: bool, config: &Config) -> Result<Vec<(String, Column)>, IngestError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(has_header).from_path(path)?;

    let headers: Vec<String> = if has_header {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut columns: Vec<Vec<Option<String>>> = Vec::new();
    let mut total_rows: usize = 0;
    let mut rng = rand::thread_rng();

    for result in reader.records() {
        let record = result?;
        total_rows += 1;

        if columns.is_empty() {
            columns = vec![Vec::new(); record.len()];
        }

        if total_rows > config.csv.max_rows {
            let keep_probability = config.csv.max_rows as f64 / total_rows as f64;
            if !rng.gen_bool(keep_probability.clamp(0.0, 1.0)) {
                continue;
            }
        }

        for (i, cell) in record.iter().enumerate() {
            if let Some(col) = columns.get_mut(i) {
                col.push(if cell.is_empty() { None } else { Some(cell.to_string()) });
            }
        }
    }

    let header_for = |i: usize| -> String {
        headers.get(i).cloned().unwrap_or_else(|| format!("column_{i}"))
    };

    let mut result = Vec::with_capacity(columns.len());
    for (i, values) in columns.iter().enumerate() {
        let name = header_for(i);
        let column = if i == 0 { id_column(&name, values) } else { infer(values, &name, &config.inference) };
        result.push((name, column));
    }

    let other_names: Vec<String> = result.iter().skip(1).map(|(name, _)| name.clone()).collect();
    if let Some((_, first)) = result.first_mut() {
        for name in other_names {
            first.add_link(name.clone(), name);
        }
    }

    Ok(result)
}

/// The first CSV column is unconditionally an Id column regardless of
/// what C2 would otherwise infer, per spec.md §6.
fn id_column(name: &str, values: &[Option<String>]) -> Column {
    let lengths: Vec<usize> = values.iter().flatten().map(|v| v.chars().count()).collect();
    Column::Id {
        column_name: name.to_string(),
        stats: crate::column::inferencer::length_stats(&lengths),
        links: HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn first_column_is_always_id_and_links_to_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,age").unwrap();
        for i in 0..5 {
            writeln!(file, "{},{}", 1000 + i, 20 + i).unwrap();
        }
        let mut config = Config::default();
        config.csv.max_rows = 100;
        let columns = infer_from_csv(file.path(), true, &config).unwrap();
        assert_eq!(columns[0].1.variant_name(), "Id");
        assert!(columns[0].1.links().get("age").map(|s| s.contains("age")).unwrap_or(false));
    }
}
