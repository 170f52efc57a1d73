//! Graph output (§6's "Graph output contract"): the external Steiner-tree
//! collaborator interface, plus an in-repo reference implementation used
//! by tests and the CLI. Grounded on `util/graphbuilder.py`'s column-to-node,
//! link-to-edge translation.

use std::collections::{HashMap, HashSet};

use crate::column::Column;

/// What a graph backend needs to accept: one node per column, one edge per
/// `(source, target, link_name)` triple with weight 1 (§6).
pub trait GraphSink {
    fn add_node(&mut self, id: &str);
    fn add_edge(&mut self, source: &str, target: &str, key: &str, weight: u32);
}

/// A minimal adjacency-list graph, used when no richer backend is wired in.
#[derive(Debug, Default)]
pub struct SimpleGraph {
    pub nodes: HashSet<String>,
    pub edges: Vec<(String, String, String, u32)>,
}

impl GraphSink for SimpleGraph {
    fn add_node(&mut self, id: &str) {
        self.nodes.insert(id.to_string());
    }

    fn add_edge(&mut self, source: &str, target: &str, key: &str, weight: u32) {
        self.edges.push((source.to_string(), target.to_string(), key.to_string(), weight));
    }
}

impl SimpleGraph {
    pub fn edges_from(&self, source: &str) -> Vec<&(String, String, String, u32)> {
        self.edges.iter().filter(|(s, ..)| s == source).collect()
    }
}

/// Builds a graph from a column set: one node per column, one edge per
/// link target recorded on any column.
pub fn build(columns: &[Column]) -> SimpleGraph {
    let mut graph = SimpleGraph::default();
    for column in columns {
        graph.add_node(column.column_name());
    }
    for column in columns {
        for (link_name, targets) in column.links() {
            for target in targets {
                graph.add_edge(column.column_name(), target, link_name, 1);
            }
        }
    }
    graph
}

/// Builds a graph directly from a name-keyed column map, for call sites
/// that already hold that shape (e.g. `KnowledgeSource::into_columns`'s
/// `Vec<(String, Column)>`).
pub fn build_from_named(columns: &HashMap<String, Column>) -> SimpleGraph {
    let values: Vec<Column> = columns.values().cloned().collect();
    build(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::LengthStats;

    fn id_col(name: &str, links: Vec<(&str, &str)>) -> Column {
        let mut c = Column::Id {
            column_name: name.to_string(),
            stats: LengthStats { min_len: 1, avg_len: 1.0, max_len: 1 },
            links: HashMap::new(),
        };
        for (link_name, target) in links {
            c.add_link(link_name, target);
        }
        c
    }

    #[test]
    fn one_node_per_column_one_edge_per_link() {
        let columns = vec![id_col("person", vec![("hasName", "name")]), id_col("name", vec![])];
        let graph = build(&columns);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0], ("person".to_string(), "name".to_string(), "hasName".to_string(), 1));
    }
}
