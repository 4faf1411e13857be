//! Augmented prefix tree acceptor (APTA) construction.
//!
//! The APTA is a trie over every trace of the sample. Each terminal node is
//! marked accepting (the trace came from the positive bucket) or rejecting
//! (negative bucket). The tree is built once per sample, is read-only
//! afterwards, and is shared by reference across all candidate state counts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::error::{Error, Result};
use crate::types::NodeId;

/// The root of every prefix tree.
pub const ROOT: NodeId = 0;

/// Marker trait for trace symbols.
///
/// Symbols are opaque tokens: the pipeline only ever compares, hashes, and
/// orders them. Any `Clone + Eq + Hash + Ord + Debug` type qualifies, so the
/// trait is blanket-implemented.
pub trait Symbol: Clone + Eq + Hash + Ord + Debug {}

impl<T> Symbol for T where T: Clone + Eq + Hash + Ord + Debug {}

/// A labeled sample: the traces the synthesized automaton must accept and
/// the traces it must reject.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Sample<S> {
    /// Traces the automaton must accept.
    pub positive: Vec<Vec<S>>,
    /// Traces the automaton must reject.
    pub negative: Vec<Vec<S>>,
}

impl<S> Sample<S> {
    pub fn new(positive: Vec<Vec<S>>, negative: Vec<Vec<S>>) -> Self {
        Self { positive, negative }
    }

    /// Total number of traces across both buckets.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Node<S> {
    children: BTreeMap<S, NodeId>,
    /// Parent id and incoming symbol, recorded at edge-creation time.
    /// `None` only for the root.
    parent: Option<(NodeId, S)>,
}

impl<S> Node<S> {
    fn new(parent: Option<(NodeId, S)>) -> Self {
        Self {
            children: BTreeMap::new(),
            parent,
        }
    }
}

/// An augmented prefix tree acceptor.
///
/// Nodes are dense indices into an arena; the root is [`ROOT`]. Every
/// non-root node has exactly one incoming edge, so the structure is a tree.
/// The accepting and rejecting sets are disjoint: a sample that would label
/// one node both ways is rejected during construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Apta<S> {
    nodes: Vec<Node<S>>,
    alphabet: Vec<S>,
    accepting: BTreeSet<NodeId>,
    rejecting: BTreeSet<NodeId>,
}

impl<S: Symbol> Apta<S> {
    /// Builds the prefix tree for a labeled sample.
    ///
    /// Walks every trace from the root, creating edges on demand, and marks
    /// each terminal node with its bucket. Fails with
    /// [`Error::InconsistentSample`] if some node would end up both
    /// accepting and rejecting.
    pub fn build(sample: &Sample<S>) -> Result<Self> {
        let alphabet: BTreeSet<S> = sample
            .positive
            .iter()
            .chain(sample.negative.iter())
            .flatten()
            .cloned()
            .collect();

        let mut nodes = vec![Node::new(None)];
        let mut accepting = BTreeSet::new();
        let mut rejecting = BTreeSet::new();

        for (traces, positive) in [(&sample.positive, true), (&sample.negative, false)] {
            for trace in traces {
                let mut current = ROOT;
                for symbol in trace {
                    let existing = nodes[current as usize].children.get(symbol).copied();
                    current = match existing {
                        Some(next) => next,
                        None => {
                            let next = nodes.len() as NodeId;
                            nodes.push(Node::new(Some((current, symbol.clone()))));
                            nodes[current as usize].children.insert(symbol.clone(), next);
                            next
                        }
                    };
                }
                if positive {
                    if rejecting.contains(&current) {
                        return Err(Error::InconsistentSample { node: current });
                    }
                    accepting.insert(current);
                } else {
                    if accepting.contains(&current) {
                        return Err(Error::InconsistentSample { node: current });
                    }
                    rejecting.insert(current);
                }
            }
        }

        debug!(
            "apta: {} nodes, {} accepting, {} rejecting, alphabet of {}",
            nodes.len(),
            accepting.len(),
            rejecting.len(),
            alphabet.len()
        );

        Ok(Self {
            nodes,
            alphabet: alphabet.into_iter().collect(),
            accepting,
            rejecting,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The sorted, deduplicated set of symbols seen anywhere in the sample.
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    pub fn accepting(&self) -> &BTreeSet<NodeId> {
        &self.accepting
    }

    pub fn rejecting(&self) -> &BTreeSet<NodeId> {
        &self.rejecting
    }

    pub fn is_accepting(&self, node: NodeId) -> bool {
        self.accepting.contains(&node)
    }

    pub fn is_rejecting(&self, node: NodeId) -> bool {
        self.rejecting.contains(&node)
    }

    /// The node reached from `node` over `symbol`, if that edge exists.
    pub fn child(&self, node: NodeId, symbol: &S) -> Option<NodeId> {
        self.nodes[node as usize].children.get(symbol).copied()
    }

    /// The parent of `node` together with the incoming symbol.
    /// `None` only for the root.
    pub fn parent_label(&self, node: NodeId) -> Option<(NodeId, &S)> {
        self.nodes[node as usize]
            .parent
            .as_ref()
            .map(|(parent, symbol)| (*parent, symbol))
    }

    /// The parent of `node`, or `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_label(node).map(|(parent, _)| parent)
    }

    /// The symbol on the edge into `node`, or `None` for the root.
    pub fn label(&self, node: NodeId) -> Option<&S> {
        self.parent_label(node).map(|(_, symbol)| symbol)
    }
}

/// Test fixture: the sample from Heule & Verwer (2013).
#[cfg(test)]
pub(crate) fn reference_sample() -> Sample<char> {
    Sample::new(
        vec![vec!['a'], vec!['a', 'b', 'a', 'a'], vec!['b', 'b']],
        vec![vec!['a', 'b', 'b'], vec!['b']],
    )
}
