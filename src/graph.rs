//! Variant graph builder.
//!
//! Unions adapter edges into one undirected simple graph over forms.
//! Self-loops are rejected and multi-edges collapse under set semantics.
//! Nodes and neighbors iterate in insertion order so that satellite
//! discovery order is deterministic from run to run.

use std::collections::{HashMap, HashSet};

use crate::models::Edge;

#[derive(Debug, Default)]
pub struct VariantGraph {
    nodes: Vec<String>,
    adjacency: HashMap<String, Vec<String>>,
    seen: HashSet<String>,
}

impl VariantGraph {
    pub fn new() -> Self {
        VariantGraph::default()
    }

    /// Build a graph from one adapter's edge batch.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut graph = VariantGraph::new();
        for edge in edges {
            graph.add_edge(&edge.a, &edge.b);
        }
        graph
    }

    /// Insert an undirected edge. Self-loops and repeated edges are no-ops.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.add_node(a);
        self.add_node(b);
        Self::link(&mut self.adjacency, a, b);
        Self::link(&mut self.adjacency, b, a);
    }

    fn add_node(&mut self, form: &str) {
        if self.seen.insert(form.to_string()) {
            self.nodes.push(form.to_string());
        }
    }

    fn link(adjacency: &mut HashMap<String, Vec<String>>, from: &str, to: &str) {
        let neighbors = adjacency.entry(from.to_string()).or_default();
        if !neighbors.iter().any(|n| n == to) {
            neighbors.push(to.to_string());
        }
    }

    /// All nodes, in first-insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Neighbors of a form, in first-insertion order.
    pub fn neighbors(&self, form: &str) -> &[String] {
        self.adjacency.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, form: &str) -> bool {
        self.seen.contains(form)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
