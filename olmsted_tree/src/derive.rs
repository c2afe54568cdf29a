// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Views of a selected tree, as consumed by the tree and lineage displays.
//
// 1. The family alignment: mutations of naive and the leaves, plus the set of sequences
//    offered for download.
// 2. The lineage alignment of one selected sequence.
//
// Both return None if there is nothing to show: no tree, no nodes, no naive sequence, or
// (for the lineage) no selected sequence.

use crate::align::build_alignment;
use crate::dedup::dedupe;
use crate::index::NodeIndex;
use crate::lineage::extract_lineage;
use log::{debug, warn};
use olmsted_core::defs::{Chain, MutationRecord, Node, NodeType, Tree};
use olmsted_core::memo::Memo;
use serde_derive::Serialize;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeriveOpt {
    pub chain: Chain,
    pub include_all_nodes: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FamilyAlignment {
    pub leaves_count_incl_naive: usize,
    pub mutation_track: Vec<MutationRecord>,
    pub downloadable_sequences: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineageAlignment {
    pub lineage_seq_counter: usize,
    pub lineage_mutation_track: Vec<MutationRecord>,
    pub downloadable_lineage_sequences: Vec<Node>,
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Upstream lbr values are garbage for naive and for the nodes directly below it, so they are
// dropped.  This is a data correction, not part of the derivation proper.

pub fn clear_naive_adjacent_lbr(nodes: &[Node], naive_id: &str) -> Vec<Node> {
    let mut nodes = nodes.to_vec();
    let mut cleared = 0;
    for n in nodes.iter_mut() {
        if n.sequence_id == naive_id || n.parent.as_deref() == Some(naive_id) {
            if n.lbr.take().is_some() {
                cleared += 1;
            }
        }
    }
    if cleared > 0 {
        debug!("cleared lbr on {} nodes adjacent to {}", cleared, naive_id);
    }
    nodes
}

fn usable_tree(tree: Option<&Tree>) -> Option<&Tree> {
    let tree = tree?;
    if tree.nodes.is_empty() {
        return None;
    }
    if tree.naive().is_none() {
        warn!("tree {} has no naive sequence", tree.ident);
        return None;
    }
    Some(tree)
}

pub fn compute_family_alignment(tree: Option<&Tree>, chain: Chain) -> Option<FamilyAlignment> {
    let tree = usable_tree(tree)?;
    let naive_id = &tree.naive()?.sequence_id;
    let nodes = clear_naive_adjacent_lbr(&tree.nodes, naive_id);
    let naive = nodes.iter().find(|n| n.is_root())?;
    let tips = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Root || n.node_type == NodeType::Leaf)
        .collect::<Vec<&Node>>();
    let mutation_track = build_alignment(naive.aa(chain), &tips, chain);
    let downloadable_sequences = dedupe(&nodes, chain).into_iter().cloned().collect();
    Some(FamilyAlignment {
        leaves_count_incl_naive: tips.len(),
        mutation_track,
        downloadable_sequences,
    })
}

pub fn compute_lineage_alignment(
    tree: Option<&Tree>,
    target: Option<&str>,
    opt: &DeriveOpt,
) -> Option<LineageAlignment> {
    let tree = usable_tree(tree)?;
    let target = target.filter(|t| !t.is_empty())?;
    let index = NodeIndex::new(&tree.nodes);
    let naive = index.naive()?;
    let target = match index.get(target) {
        Some(t) => t,
        None => {
            warn!("sequence {} is not in tree {}", target, tree.ident);
            return None;
        }
    };
    let lineage = extract_lineage(&index, naive, target, opt.chain, opt.include_all_nodes);
    let distinct = lineage
        .iter()
        .map(|n| n.aa(opt.chain))
        .collect::<HashSet<&str>>();
    let lineage_mutation_track = build_alignment(naive.aa(opt.chain), &lineage, opt.chain);
    Some(LineageAlignment {
        lineage_seq_counter: distinct.len(),
        lineage_mutation_track,
        downloadable_lineage_sequences: lineage.into_iter().cloned().collect(),
    })
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// The two views, each remembered for the last tree and options asked for.  A tree that is
// equal in content to the last one is a cache hit, wherever it came from.

#[derive(Default)]
pub struct TreeDeriver {
    family: Memo<(Option<Tree>, Chain), Option<FamilyAlignment>>,
    lineage: Memo<(Option<Tree>, Option<String>, DeriveOpt), Option<LineageAlignment>>,
}

impl TreeDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family_alignment(&mut self, tree: Option<&Tree>, chain: Chain) -> Rc<Option<FamilyAlignment>> {
        if let Some(x) = self.family.find(|(t, c)| t.as_ref() == tree && *c == chain) {
            return x;
        }
        debug!("computing family alignment for {:?}", tree.map(|t| &t.ident));
        let x = compute_family_alignment(tree, chain);
        self.family.store((tree.cloned(), chain), x)
    }

    pub fn lineage_alignment(
        &mut self,
        tree: Option<&Tree>,
        target: Option<&str>,
        opt: &DeriveOpt,
    ) -> Rc<Option<LineageAlignment>> {
        let hit = self
            .lineage
            .find(|(t, s, o)| t.as_ref() == tree && s.as_deref() == target && o == opt);
        if let Some(x) = hit {
            return x;
        }
        debug!("computing lineage alignment for {:?}", target);
        let x = compute_lineage_alignment(tree, target, opt);
        self.lineage
            .store((tree.cloned(), target.map(|s| s.to_string()), *opt), x)
    }

    pub fn clear(&mut self) {
        self.family.clear();
        self.lineage.clear();
    }

    // (family, lineage) recomputation counts
    pub fn recomputations(&self) -> (usize, usize) {
        (self.family.recomputations(), self.lineage.recomputations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_tree, node};
    use olmsted_core::defs::MutationKind;
    use pretty_trace::PrettyTrace;

    #[test]
    fn test_family_alignment() {
        PrettyTrace::new().on();
        let tree = mock_tree();
        let x = compute_family_alignment(Some(&tree), Chain::Heavy).unwrap();
        assert_eq!(x.leaves_count_incl_naive, 3);
        let naive = x
            .mutation_track
            .iter()
            .filter(|m| m.kind == MutationKind::Naive)
            .count();
        assert_eq!(naive, 4);
        let m = x
            .mutation_track
            .iter()
            .find(|m| m.seq_id == "leaf-1" && m.position == 3)
            .unwrap();
        assert_eq!(m.mut_from, Some('L'));
        assert_eq!(m.mut_to, 'I');

        // internal-1 has the naive sequence, so it is not offered.

        let ids = x
            .downloadable_sequences
            .iter()
            .map(|n| n.sequence_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["inferred_naive", "leaf-1", "leaf-2"]);
    }

    #[test]
    fn test_lbr_cleared_next_to_naive() {
        PrettyTrace::new().on();
        let mut tree = mock_tree();
        tree.nodes[0].lbr = Some(9.0);
        let nodes = clear_naive_adjacent_lbr(&tree.nodes, "inferred_naive");
        assert_eq!(nodes[0].lbr, None);
        assert_eq!(nodes[1].lbr, None);
        assert_eq!(nodes[2].lbr, Some(0.3));
        let x = compute_family_alignment(Some(&tree), Chain::Heavy).unwrap();
        assert!(x.downloadable_sequences.iter().all(|n| n.sequence_id != "internal-1"));
        assert_eq!(x.downloadable_sequences[0].lbr, None);
        assert_eq!(x.downloadable_sequences[1].lbr, Some(0.3));
    }

    #[test]
    fn test_nothing_to_show() {
        PrettyTrace::new().on();
        let empty = Tree {
            ident: "t".to_string(),
            ..Default::default()
        };
        assert!(compute_family_alignment(None, Chain::Heavy).is_none());
        assert!(compute_family_alignment(Some(&empty), Chain::Heavy).is_none());
        let rootless = Tree {
            ident: "t".to_string(),
            nodes: vec![node("leaf", Some("x"), NodeType::Leaf, "M", "A")],
            ..Default::default()
        };
        assert!(compute_family_alignment(Some(&rootless), Chain::Heavy).is_none());
        let tree = mock_tree();
        let opt = DeriveOpt::default();
        assert!(compute_lineage_alignment(None, Some("leaf-1"), &opt).is_none());
        assert!(compute_lineage_alignment(Some(&tree), None, &opt).is_none());
        assert!(compute_lineage_alignment(Some(&tree), Some(""), &opt).is_none());
        assert!(compute_lineage_alignment(Some(&tree), Some("nope"), &opt).is_none());
    }

    #[test]
    fn test_lineage_alignment() {
        PrettyTrace::new().on();
        let tree = mock_tree();
        let opt = DeriveOpt::default();
        let x = compute_lineage_alignment(Some(&tree), Some("leaf-1"), &opt).unwrap();
        let ids = x
            .downloadable_lineage_sequences
            .iter()
            .map(|n| n.sequence_id.as_str())
            .collect::<Vec<_>>();

        // internal-1 has the same nucleotides as naive, its parent.

        assert_eq!(ids, vec!["inferred_naive", "leaf-1"]);
        assert_eq!(x.lineage_seq_counter, 2);
        let real = x
            .lineage_mutation_track
            .iter()
            .filter(|m| m.kind != MutationKind::Naive)
            .count();
        assert_eq!(real, 1);

        let opt = DeriveOpt {
            include_all_nodes: true,
            ..Default::default()
        };
        let x = compute_lineage_alignment(Some(&tree), Some("leaf-1"), &opt).unwrap();
        assert_eq!(x.downloadable_lineage_sequences.len(), 3);

        // internal-1 and naive share an amino acid sequence.

        assert_eq!(x.lineage_seq_counter, 2);
    }

    #[test]
    fn test_deriver_memo() {
        PrettyTrace::new().on();
        let mut d = TreeDeriver::new();
        let tree = mock_tree();
        let a = d.family_alignment(Some(&tree), Chain::Heavy);
        let copy = tree.clone();
        let b = d.family_alignment(Some(&copy), Chain::Heavy);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(d.recomputations(), (1, 0));

        let opt = DeriveOpt::default();
        let l1 = d.lineage_alignment(Some(&tree), Some("leaf-1"), &opt);
        let l2 = d.lineage_alignment(Some(&copy), Some("leaf-1"), &opt);
        assert!(Rc::ptr_eq(&l1, &l2));
        d.lineage_alignment(Some(&tree), Some("leaf-2"), &opt);
        assert_eq!(d.recomputations(), (1, 2));

        // Clearing changes nothing but the work done.

        d.clear();
        let c = d.family_alignment(Some(&tree), Chain::Heavy);
        assert_eq!(*a, *c);
        assert_eq!(d.recomputations(), (2, 2));
    }
}
