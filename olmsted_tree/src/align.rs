// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Find the amino acid mutations of tree nodes relative to the naive sequence.
//
// For each node, and each position of its own amino acid alignment, emit a record if the
// amino acid differs from naive at that position.  The root node additionally gets a record
// for every naive position (mut_from == mut_to), which serves as the reference track.
//
// A node alignment that is longer than naive has its excess positions reported as
// mutations from None.  Records are in node order, then position order.

use olmsted_core::defs::{Chain, MutationKind, MutationRecord, Node};

pub fn build_alignment(naive_aa: &str, nodes: &[&Node], chain: Chain) -> Vec<MutationRecord> {
    let naive = naive_aa.as_bytes();
    let mut muts = Vec::<MutationRecord>::new();
    if naive.is_empty() {
        return muts;
    }
    for n in nodes.iter() {
        let seq = n.aa(chain).as_bytes();
        for i in 0..seq.len() {
            let from = naive.get(i).copied();
            if from != Some(seq[i]) {
                muts.push(MutationRecord {
                    kind: MutationKind::from(n.node_type),
                    parent: n.parent.clone(),
                    seq_id: n.sequence_id.clone(),
                    position: i,
                    mut_from: from.map(|c| c as char),
                    mut_to: seq[i] as char,
                });
            }
        }
        if n.is_root() {
            for i in 0..naive.len() {
                muts.push(MutationRecord {
                    kind: MutationKind::Naive,
                    parent: n.parent.clone(),
                    seq_id: n.sequence_id.clone(),
                    position: i,
                    mut_from: Some(naive[i] as char),
                    mut_to: naive[i] as char,
                });
            }
        }
    }
    muts
}
