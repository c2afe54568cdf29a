// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Lookup of tree nodes by sequence id, built once per derivation.  If two nodes share an
// id, the first one wins.

use olmsted_core::defs::Node;
use std::collections::HashMap;

pub struct NodeIndex<'a> {
    nodes: &'a [Node],
    by_id: HashMap<&'a str, usize>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        let mut by_id = HashMap::<&'a str, usize>::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            by_id.entry(n.sequence_id.as_str()).or_insert(i);
        }
        NodeIndex { nodes, by_id }
    }

    pub fn get(&self, sequence_id: &str) -> Option<&'a Node> {
        self.by_id.get(sequence_id).map(|&i| &self.nodes[i])
    }

    pub fn parent(&self, n: &Node) -> Option<&'a Node> {
        n.parent.as_deref().and_then(|p| self.get(p))
    }

    pub fn naive(&self) -> Option<&'a Node> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
