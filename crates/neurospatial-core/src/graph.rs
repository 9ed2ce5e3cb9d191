//! Region adjacency graph
//!
//! Undirected "touches" relation over the label ids of one label map.
//! Self-loops and the background id are never stored.

use std::collections::BTreeSet;

/// Undirected adjacency between labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionAdjacencyGraph {
    /// `adjacency[id]` holds the neighbors of `id`; index 0 stays empty
    adjacency: Vec<BTreeSet<u32>>,
}

impl RegionAdjacencyGraph {
    /// Create a graph with nodes `0..=max_label` and no edges.
    pub fn new(max_label: u32) -> Self {
        RegionAdjacencyGraph {
            adjacency: vec![BTreeSet::new(); max_label as usize + 1],
        }
    }

    /// Add the undirected edge `(p, q)`.
    ///
    /// Self-loops and edges touching background are ignored. Returns `true`
    /// if the edge was not present before.
    pub fn add_edge(&mut self, p: u32, q: u32) -> bool {
        if p == q || p == 0 || q == 0 {
            return false;
        }
        let needed = p.max(q) as usize + 1;
        if needed > self.adjacency.len() {
            self.adjacency.resize(needed, BTreeSet::new());
        }
        let inserted = self.adjacency[p as usize].insert(q);
        self.adjacency[q as usize].insert(p);
        inserted
    }

    /// Check whether `p` and `q` touch. Symmetric in its arguments.
    pub fn contains(&self, p: u32, q: u32) -> bool {
        self.adjacency
            .get(p as usize)
            .is_some_and(|n| n.contains(&q))
    }

    /// Neighbors of `id` in ascending order.
    pub fn neighbors(&self, id: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(id as usize)
            .into_iter()
            .flat_map(|n| n.iter().copied())
    }

    /// Number of distinct neighbors of `id`.
    pub fn degree(&self, id: u32) -> u32 {
        self.adjacency
            .get(id as usize)
            .map_or(0, |n| n.len() as u32)
    }

    /// Degrees of all nodes, indexed by label id (index 0 is 0).
    pub fn degrees(&self) -> Vec<u32> {
        self.adjacency.iter().map(|n| n.len() as u32).collect()
    }

    /// Largest label id covered by the graph.
    pub fn max_label(&self) -> u32 {
        self.adjacency.len().saturating_sub(1) as u32
    }

    /// Iterate over each edge once as `(p, q)` with `p < q`.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(p, n)| {
            let p = p as u32;
            n.iter().copied().filter(move |&q| q > p).map(move |q| (p, q))
        })
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }
}
