// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Find a small set of nodes whose nucleotide sequences include every distinct sequence in a
// tree, for download.  The naive sequence and all leaves are always kept.  An internal node
// is kept only if its sequence is not that of naive or a leaf, and is not shared with another
// kept internal node.
//
// Nodes arrive in postorder, so scanning internal nodes in reverse favors the duplicate that
// is closest to naive.  Output order is naive, kept internal nodes, leaves.

use olmsted_core::defs::{Chain, Node, NodeType};
use std::collections::HashSet;

pub fn dedupe(nodes: &[Node], chain: Chain) -> Vec<&Node> {
    let naive = nodes.iter().find(|n| n.is_root());
    let leaves = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Leaf)
        .collect::<Vec<_>>();
    let mut taken = HashSet::<&str>::new();
    if let Some(naive) = naive {
        taken.insert(naive.nt(chain));
    }
    for leaf in leaves.iter() {
        taken.insert(leaf.nt(chain));
    }
    let mut seen = HashSet::<&str>::new();
    let mut kept = Vec::<&Node>::new();
    for n in nodes.iter().rev() {
        if n.node_type != NodeType::Internal {
            continue;
        }
        let nt = n.nt(chain);
        if seen.insert(nt) && !taken.contains(nt) {
            kept.push(n);
        }
    }
    let mut seqs = Vec::<&Node>::with_capacity(1 + kept.len() + leaves.len());
    seqs.extend(naive);
    seqs.append(&mut kept);
    seqs.extend(leaves);
    seqs
}
