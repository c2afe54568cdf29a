// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Extract the lineage of a node: the path of ancestors from naive down to it.
//
// Walking up from the target, an ancestor is kept if its nucleotide sequence differs from
// that of its own parent.  An ancestor that repeats an earlier, non-adjacent sequence is kept,
// since that is a back mutation.  With include_all_nodes, every ancestor is kept.
//
// The walk stops at naive, or at a node whose parent cannot be found, which is treated as
// if it were the root.  The result always starts with naive and ends with the target.

use crate::index::NodeIndex;
use log::warn;
use olmsted_core::defs::{Chain, Node};

pub fn extract_lineage<'a>(
    index: &NodeIndex<'a>,
    naive: &'a Node,
    target: &'a Node,
    chain: Chain,
    include_all_nodes: bool,
) -> Vec<&'a Node> {
    if target.sequence_id == naive.sequence_id {
        return vec![naive];
    }
    let mut intermediates = Vec::<&Node>::new();
    let mut current = target;
    let mut steps = 0;
    while current.sequence_id != naive.sequence_id {
        let parent = match index.parent(current) {
            Some(p) => p,
            None => {
                if let Some(p) = &current.parent {
                    warn!("parent {} of {} is not in the tree", p, current.sequence_id);
                }
                break;
            }
        };
        if current.sequence_id != target.sequence_id
            && (include_all_nodes || parent.nt(chain) != current.nt(chain))
        {
            intermediates.push(current);
        }
        current = parent;

        // Guard against cycles in malformed parent links.

        steps += 1;
        if steps > index.len() {
            warn!("cycle in the ancestors of {}", target.sequence_id);
            break;
        }
    }
    let mut lineage = Vec::<&Node>::with_capacity(intermediates.len() + 2);
    lineage.push(naive);
    lineage.extend(intermediates.into_iter().rev());
    lineage.push(target);
    lineage
}
