// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prefix trie compiled from the rule table.
//!
//! Every registered pattern is a path of byte-labelled edges from the root.
//! The node at the end of a path carries the pattern's replacement. Nodes live
//! in one table indexed by [`StateId`]; the root is always id 0.
//!
//! # Invariants
//! - The structure is a tree: each non-root node has exactly one parent and no
//!   node has two children on the same byte.
//! - `depth(child) == depth(parent) + 1`, so [`Trie::max_depth`] is the length
//!   of the longest registered pattern.
//! - A replacement is attached only when its node is created. Registering a
//!   path that already exists leaves the existing node alone: first write wins.
//! - Registration only ever adds nodes and edges.

use std::fmt;

/// Index of a node in the trie's node table.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// The root node, where every match attempt starts.
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A trie node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Edge that created this node; `None` for the root.
    incoming: Option<(StateId, u8)>,
    depth: usize,
    replacement: Option<Box<[u8]>>,
    /// Outgoing edges, sorted by byte.
    children: Vec<(u8, StateId)>,
}

impl Node {
    fn root() -> Self {
        Self {
            incoming: None,
            depth: 0,
            replacement: None,
            children: Vec::new(),
        }
    }

    /// Parent id and edge byte, or `None` for the root.
    pub fn incoming(&self) -> Option<(StateId, u8)> {
        self.incoming
    }

    /// Number of edges from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Replacement bytes if this node terminates a pattern.
    pub fn replacement(&self) -> Option<&[u8]> {
        self.replacement.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.replacement.is_some()
    }

    fn child(&self, byte: u8) -> Option<StateId> {
        self.children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| self.children[i].1)
    }
}

/// Outcome of [`Trie::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new terminal node was created for the pattern.
    Added(StateId),
    /// The pattern's path already existed; its node was not changed.
    ///
    /// Either the same pattern was registered before, or the pattern is a
    /// prefix of a longer, earlier pattern.
    Existing(StateId),
    /// Empty pattern; nothing to register.
    Empty,
}

/// Byte trie recognizing every registered pattern.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create a trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            max_depth: 0,
        }
    }

    /// Register `pattern` so that a full match emits `replacement`.
    pub fn register(&mut self, pattern: &[u8], replacement: &[u8]) -> Registration {
        let Some((&last, prefix)) = pattern.split_last() else {
            return Registration::Empty;
        };

        let mut state = StateId::ROOT;
        for &byte in prefix {
            state = self.ensure_child(state, byte, None).0;
        }

        match self.ensure_child(state, last, Some(replacement)) {
            (id, true) => Registration::Added(id),
            (id, false) => Registration::Existing(id),
        }
    }

    /// Follow the edge labelled `byte` out of `from`.
    #[inline]
    pub fn step(&self, from: StateId, byte: u8) -> Option<StateId> {
        self.nodes.get(from.as_usize())?.child(byte)
    }

    /// Look up a node by id.
    ///
    /// Ids returned by this trie are always valid, so `None` only results from
    /// ids belonging to another trie.
    pub fn node(&self, id: StateId) -> Option<&Node> {
        self.nodes.get(id.as_usize())
    }

    /// Replacement attached to `id`, if it terminates a pattern.
    #[inline]
    pub fn replacement(&self, id: StateId) -> Option<&[u8]> {
        self.node(id).and_then(Node::replacement)
    }

    /// Length of the longest registered pattern.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no pattern has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of terminal nodes, i.e. effective rules.
    pub fn pattern_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_terminal()).count()
    }

    /// Rebuild the byte path from the root to `id`.
    pub fn path(&self, id: StateId) -> Vec<u8> {
        let mut path = Vec::new();
        let mut current = self.node(id);
        while let Some((parent, byte)) = current.and_then(Node::incoming) {
            path.push(byte);
            current = self.node(parent);
        }
        path.reverse();
        path
    }

    /// Return the child of `from` on `byte`, creating it if absent.
    ///
    /// A newly created child receives `replacement`. Returns the child id and
    /// whether it was created.
    fn ensure_child(
        &mut self,
        from: StateId,
        byte: u8,
        replacement: Option<&[u8]>,
    ) -> (StateId, bool) {
        let parent = &self.nodes[from.as_usize()];
        let slot = match parent.children.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(i) => return (parent.children[i].1, false),
            Err(slot) => slot,
        };

        let depth = parent.depth + 1;
        let id = StateId(self.nodes.len());
        self.nodes.push(Node {
            incoming: Some((from, byte)),
            depth,
            replacement: replacement.map(Box::from),
            children: Vec::new(),
        });
        self.nodes[from.as_usize()].children.insert(slot, (byte, id));
        self.max_depth = self.max_depth.max(depth);

        (id, true)
    }
}

#[cfg(test)]
#[path = "trie_tests.rs"]
mod tests;
