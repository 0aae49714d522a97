//! Genomic interval graph as seen by candidate discovery
//!
//! The graph is built upstream; this module only holds the node intervals and
//! directed edge counts needed to evaluate one edge at a time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::genome_interval::{GenomeInterval, PosRange};

pub type LocusIndex = usize;
pub type NodeIndex = usize;

/// A directed pair of nodes within one locus, possibly a self-edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeInfo {
    pub locus_index: LocusIndex,
    pub node_index1: NodeIndex,
    pub node_index2: NodeIndex,
}

impl EdgeInfo {
    pub fn new(locus_index: LocusIndex, node_index1: NodeIndex, node_index2: NodeIndex) -> Self {
        EdgeInfo {
            locus_index,
            node_index1,
            node_index2,
        }
    }

    pub fn is_self_edge(&self) -> bool {
        self.node_index1 == self.node_index2
    }
}

impl fmt::Display for EdgeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "locus: {} node1: {} node2: {}",
            self.locus_index, self.node_index1, self.node_index2
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvLocusNode {
    /// Breakend interval
    pub interval: GenomeInterval,
    /// Extent of the evidence that built this node, on the same chromosome
    pub evidence_range: PosRange,
    edges: BTreeMap<NodeIndex, u32>,
}

impl SvLocusNode {
    pub fn new(interval: GenomeInterval, evidence_range: PosRange) -> Self {
        SvLocusNode {
            interval,
            evidence_range,
            edges: BTreeMap::new(),
        }
    }

    pub fn with_edge(mut self, to: NodeIndex, count: u32) -> Self {
        self.set_edge_count(to, count);
        self
    }

    pub fn set_edge_count(&mut self, to: NodeIndex, count: u32) {
        self.edges.insert(to, count);
    }

    /// Evidence count on the edge from this node to `to`, zero when absent
    pub fn edge_count(&self, to: NodeIndex) -> u32 {
        self.edges.get(&to).copied().unwrap_or(0)
    }

    /// Breakend interval merged with the evidence range
    pub fn search_interval(&self) -> GenomeInterval {
        let mut search = self.interval;
        search.range.merge_range(&self.evidence_range);
        search
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvLocus {
    nodes: Vec<SvLocusNode>,
}

impl SvLocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: SvLocusNode) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, index: NodeIndex) -> Option<&SvLocusNode> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut SvLocusNode> {
        self.nodes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self, from: NodeIndex, to: NodeIndex) -> u32 {
        self.node(from).map_or(0, |node| node.edge_count(to))
    }
}

/// Full set of loci plus the noise threshold used when the graph was merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvLocusSet {
    loci: Vec<SvLocus>,
    min_merge_edge_count: u32,
}

impl SvLocusSet {
    pub fn new(min_merge_edge_count: u32) -> Self {
        SvLocusSet {
            loci: Vec::new(),
            min_merge_edge_count,
        }
    }

    pub fn add_locus(&mut self, locus: SvLocus) -> LocusIndex {
        self.loci.push(locus);
        self.loci.len() - 1
    }

    pub fn locus(&self, index: LocusIndex) -> Option<&SvLocus> {
        self.loci.get(index)
    }

    pub fn loci(&self) -> &[SvLocus] {
        &self.loci
    }

    pub fn min_merge_edge_count(&self) -> u32 {
        self.min_merge_edge_count
    }

    /// Every node pair joined by an edge in either direction, listed once with the
    /// lower node index first; self-edges included
    pub fn edges(&self) -> Vec<EdgeInfo> {
        let mut edges = Vec::new();
        for (locus_index, locus) in self.loci.iter().enumerate() {
            let mut pairs = BTreeSet::new();
            for (from, node) in locus.nodes.iter().enumerate() {
                for &to in node.edges.keys() {
                    pairs.insert((from.min(to), from.max(to)));
                }
            }
            edges.extend(
                pairs
                    .into_iter()
                    .map(|(node_index1, node_index2)| EdgeInfo::new(locus_index, node_index1, node_index2)),
            );
        }
        edges
    }
}

/// One side of a locus derived from a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocusSide {
    pub interval: GenomeInterval,
    /// The read contributes its outgoing count from this side
    pub is_out_count: bool,
}

impl LocusSide {
    pub fn new(interval: GenomeInterval, is_out_count: bool) -> Self {
        LocusSide {
            interval,
            is_out_count,
        }
    }
}

/// Locus derived from one read: a local signal or a local/remote pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLocus {
    Single(LocusSide),
    Pair(LocusSide, LocusSide),
}

impl fmt::Display for ReadLocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |f: &mut fmt::Formatter<'_>, s: &LocusSide| {
            write!(f, "{} out_count: {}", s.interval, s.is_out_count)
        };
        match self {
            ReadLocus::Single(a) => {
                write!(f, "node0: ")?;
                side(f, a)
            }
            ReadLocus::Pair(a, b) => {
                write!(f, "node0: ")?;
                side(f, a)?;
                write!(f, " node1: ")?;
                side(f, b)
            }
        }
    }
}
