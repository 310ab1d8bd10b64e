//! Graph container APIs used by `stratum`.
//!
//! This module contains the core `Graph` container plus a small set of helper algorithms
//! re-exported as `stratum_graph::alg`.

use crate::error::{Error, Result};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub mod alg;
mod edge_key;
mod entries;

pub use edge_key::EdgeKey;
use entries::{EdgeEntry, NodeEntry};

pub type NodeId = usize;
pub type EdgeIndex = usize;

/// A directed multigraph with integer node ids.
///
/// Nodes and edges keep their insertion order. Every node entry owns the indices of its
/// incoming and outgoing edges, so neighbour queries never scan the edge list.
#[derive(Debug, Clone)]
pub struct Graph<N, E, G = ()> {
    graph_label: G,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<NodeId, usize>,

    edges: Vec<EdgeEntry<E>>,
}

impl<N, E, G> Default for Graph<N, E, G>
where
    G: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn new() -> Self
    where
        G: Default,
    {
        Self {
            graph_label: G::default(),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
        }
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Inserts a node, or replaces the label of an existing one.
    pub fn set_node(&mut self, id: NodeId, label: N) -> &mut Self {
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id,
            label,
            out: Vec::new(),
            in_: Vec::new(),
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: NodeId) -> &mut Self
    where
        N: Default,
    {
        if self.has_node(id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        let idx = *self.node_index.get(&id)?;
        Some(&mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().collect()
    }

    pub fn max_node_id(&self) -> Option<NodeId> {
        self.nodes().max()
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeId, &mut N),
    {
        for n in &mut self.nodes {
            f(n.id, &mut n.label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.iter().map(|e| e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges().collect()
    }

    pub fn edge_key(&self, index: EdgeIndex) -> Option<EdgeKey> {
        self.edges.get(index).map(|e| e.key)
    }

    pub fn edge(&self, index: EdgeIndex) -> Option<&E> {
        self.edges.get(index).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, index: EdgeIndex) -> Option<&mut E> {
        self.edges.get_mut(index).map(|e| &mut e.label)
    }

    fn push_edge(&mut self, v_ix: usize, w_ix: usize, label: E) -> EdgeKey {
        let index = self.edges.len();
        let key = EdgeKey {
            v: self.nodes[v_ix].id,
            w: self.nodes[w_ix].id,
            index,
        };
        self.edges.push(EdgeEntry {
            key,
            v_ix,
            w_ix,
            label,
        });
        self.nodes[v_ix].out.push(index);
        self.nodes[w_ix].in_.push(index);
        key
    }

    /// Appends an edge `v -> w`. Both endpoints must already be in the graph.
    pub fn add_edge(&mut self, v: NodeId, w: NodeId, label: E) -> Result<EdgeKey> {
        let (Some(&v_ix), Some(&w_ix)) = (self.node_index.get(&v), self.node_index.get(&w)) else {
            return Err(Error::MissingEndpoint { v, w });
        };
        Ok(self.push_edge(v_ix, w_ix, label))
    }

    pub fn set_edge(&mut self, v: NodeId, w: NodeId) -> Result<EdgeKey>
    where
        E: Default,
    {
        self.add_edge(v, w, E::default())
    }

    /// Adds the chain `path[0] -> path[1] -> ...`, creating missing nodes with default labels.
    pub fn set_path(&mut self, path: &[NodeId]) -> &mut Self
    where
        N: Default,
        E: Default,
    {
        for &v in path {
            self.ensure_node(v);
        }
        for pair in path.windows(2) {
            let (Some(&v_ix), Some(&w_ix)) =
                (self.node_index.get(&pair[0]), self.node_index.get(&pair[1]))
            else {
                continue;
            };
            self.push_edge(v_ix, w_ix, E::default());
        }
        self
    }

    /// First edge `v -> w` in insertion order.
    pub fn find_edge(&self, v: NodeId, w: NodeId) -> Option<EdgeKey> {
        let &v_ix = self.node_index.get(&v)?;
        self.nodes[v_ix]
            .out
            .iter()
            .map(|&e| self.edges[e].key)
            .find(|k| k.w == w)
    }

    pub fn has_edge(&self, v: NodeId, w: NodeId) -> bool {
        self.find_edge(v, w).is_some()
    }

    /// Flips an edge in place. The edge keeps its index and label; only its orientation and
    /// the adjacency registration of its endpoints change.
    pub fn reverse_edge(&mut self, index: EdgeIndex) -> Result<EdgeKey> {
        let Some(entry) = self.edges.get_mut(index) else {
            return Err(Error::MissingEdge { index });
        };
        let (v_ix, w_ix) = (entry.v_ix, entry.w_ix);
        entry.key = entry.key.reversed();
        entry.v_ix = w_ix;
        entry.w_ix = v_ix;
        let key = entry.key;

        self.nodes[v_ix].out.retain(|&e| e != index);
        self.nodes[w_ix].in_.retain(|&e| e != index);
        self.nodes[w_ix].out.push(index);
        self.nodes[v_ix].in_.push(index);
        Ok(key)
    }

    /// Distinct successors of `v`, in edge insertion order.
    pub fn successors(&self, v: NodeId) -> Vec<NodeId> {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = Vec::with_capacity(self.nodes[v_ix].out.len());
        for &e in &self.nodes[v_ix].out {
            let w = self.edges[e].key.w;
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    /// Distinct predecessors of `v`, in edge insertion order.
    pub fn predecessors(&self, v: NodeId) -> Vec<NodeId> {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = Vec::with_capacity(self.nodes[v_ix].in_.len());
        for &e in &self.nodes[v_ix].in_ {
            let u = self.edges[e].key.v;
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Calls `f` once per outgoing edge, so parallel edges repeat their target.
    pub fn for_each_successor<F>(&self, v: NodeId, mut f: F)
    where
        F: FnMut(NodeId),
    {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return;
        };
        for &e in &self.nodes[v_ix].out {
            f(self.edges[e].key.w);
        }
    }

    /// Calls `f` once per incoming edge, so parallel edges repeat their source.
    pub fn for_each_predecessor<F>(&self, v: NodeId, mut f: F)
    where
        F: FnMut(NodeId),
    {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return;
        };
        for &e in &self.nodes[v_ix].in_ {
            f(self.edges[e].key.v);
        }
    }

    pub fn out_edges(&self, v: NodeId) -> Vec<EdgeKey> {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return Vec::new();
        };
        self.nodes[v_ix]
            .out
            .iter()
            .map(|&e| self.edges[e].key)
            .collect()
    }

    pub fn in_edges(&self, v: NodeId) -> Vec<EdgeKey> {
        let Some(&v_ix) = self.node_index.get(&v) else {
            return Vec::new();
        };
        self.nodes[v_ix]
            .in_
            .iter()
            .map(|&e| self.edges[e].key)
            .collect()
    }

    pub fn out_degree(&self, v: NodeId) -> usize {
        self.node_index
            .get(&v)
            .map(|&ix| self.nodes[ix].out.len())
            .unwrap_or(0)
    }

    pub fn in_degree(&self, v: NodeId) -> usize {
        self.node_index
            .get(&v)
            .map(|&ix| self.nodes[ix].in_.len())
            .unwrap_or(0)
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.in_.is_empty())
            .map(|n| n.id)
            .collect()
    }
}
