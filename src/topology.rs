//! AS-level adjacency graph observed in a snapshot's paths.
//!
//! Every pair of consecutive, distinct AS identifiers in a path becomes a
//! directed edge `(closer to the collector) -> (closer to the origin)`. Edge
//! weights count traversals of the adjacency over all paths.

use std::collections::{HashMap, HashSet};

use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::snapshot::Snapshot;

pub struct Topology {
    pub graph: DiGraph<String, usize>,
    asn2index: HashMap<String, NodeIndex>,
    link2index: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}

impl Topology {
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Vec<String>>) -> Self {
        let mut topo = Topology {
            graph: DiGraph::new(),
            asn2index: HashMap::new(),
            link2index: HashMap::new(),
        };

        for path in paths {
            let mut prev: Option<NodeIndex> = None;
            for asn in path {
                let node = topo.get_or_create(asn);
                if let Some(prev) = prev {
                    // prepending repeats the same AS, not an adjacency
                    if prev != node {
                        topo.add_traversal(prev, node);
                    }
                }
                prev = Some(node);
            }
        }

        topo
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Topology::from_paths(snapshot.paths())
    }

    fn get_or_create(&mut self, asn: &str) -> NodeIndex {
        if let Some(&index) = self.asn2index.get(asn) {
            return index;
        }
        let index = self.graph.add_node(asn.to_string());
        self.asn2index.insert(asn.to_string(), index);
        index
    }

    fn add_traversal(&mut self, from: NodeIndex, to: NodeIndex) {
        // find_edge scans the whole out-list, which is huge for transit hubs
        match self.link2index.get(&(from, to)) {
            Some(&edge) => self.graph[edge] += 1,
            None => {
                let edge = self.graph.add_edge(from, to, 1);
                self.link2index.insert((from, to), edge);
            }
        }
    }

    pub fn asn_of(&self, index: NodeIndex) -> &str {
        &self.graph[index]
    }

    pub fn index_of(&self, asn: &str) -> Option<NodeIndex> {
        self.asn2index.get(asn).copied()
    }

    pub fn asn_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// ASes adjacent to `asn` in either direction.
    pub fn neighbors_of(&self, asn: &str) -> Option<HashSet<&str>> {
        let index = self.index_of(asn)?;

        let outgoing = self
            .graph
            .edges_directed(index, petgraph::Direction::Outgoing)
            .map(|edge| edge.target());

        let incoming = self
            .graph
            .edges_directed(index, petgraph::Direction::Incoming)
            .map(|edge| edge.source());

        Some(
            outgoing
                .chain(incoming)
                .map(|index| self.asn_of(index))
                .collect(),
        )
    }

    /// Number of times paths traverse the adjacency `from -> to`.
    pub fn link_weight(&self, from: &str, to: &str) -> Option<usize> {
        let edge = self
            .link2index
            .get(&(self.index_of(from)?, self.index_of(to)?))?;
        self.graph.edge_weight(*edge).copied()
    }
}
