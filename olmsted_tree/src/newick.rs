// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Convert a tree into Newick format, see https://en.wikipedia.org/wiki/Newick_format.
//
// Vertex names are sequence ids and branch lengths are node distances.  The root is naive.
// Nodes not reachable from naive (dangling parents) are left out.  Names that contain Newick
// punctuation or whitespace are single quoted, with embedded quotes doubled.

use itertools::Itertools;
use olmsted_core::defs::Tree;
use std::collections::HashMap;

fn quote_label(id: &str) -> String {
    if id.chars().any(|c| c.is_whitespace() || ":,();'[]".contains(c)) {
        format!("'{}'", id.replace('\'', "''"))
    } else {
        id.to_string()
    }
}

pub fn newick(tree: &Tree) -> Option<String> {
    let nodes = &tree.nodes;
    let r = nodes.iter().position(|n| n.is_root())?;

    // Index the children of each node.

    let mut id_to_index = HashMap::<&str, usize>::new();
    for (i, n) in nodes.iter().enumerate() {
        id_to_index.entry(n.sequence_id.as_str()).or_insert(i);
    }
    let mut children = vec![Vec::<usize>::new(); nodes.len()];
    for (i, n) in nodes.iter().enumerate() {
        if i == r {
            continue;
        }
        if let Some(&p) = n.parent.as_deref().and_then(|p| id_to_index.get(p)) {
            children[p].push(i);
        }
    }

    // Visit in postorder, rolling up the labels of the children as we go.  Each vertex is
    // visited at most once, so malformed parent links cannot cause a loop.

    let mut labels = vec![String::new(); nodes.len()];
    let mut seen = vec![false; nodes.len()];
    let mut stack = vec![(r, false)];
    seen[r] = true;
    while let Some((v, expanded)) = stack.pop() {
        if !expanded {
            stack.push((v, true));
            for &w in children[v].iter().rev() {
                if !seen[w] {
                    seen[w] = true;
                    stack.push((w, false));
                }
            }
            continue;
        }
        let n = &nodes[v];
        let mut label = String::new();
        let kids = children[v].iter().filter(|&&w| !labels[w].is_empty()).collect::<Vec<_>>();
        if !kids.is_empty() {
            label = format!("({})", kids.iter().map(|&&w| &labels[w]).format(","));
        }
        label += &quote_label(&n.sequence_id);
        if v != r {
            label += &format!(":{}", n.distance);
        }
        labels[v] = label;
    }
    Some(format!("{};", labels[r]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_tree, node};
    use olmsted_core::defs::NodeType;
    use pretty_trace::PrettyTrace;

    #[test]
    fn test_newick() {
        PrettyTrace::new().on();
        let mut tree = mock_tree();
        tree.nodes[1].distance = 0.5;
        tree.nodes[2].distance = 0.25;
        tree.nodes[3].distance = 1.0;
        assert_eq!(
            newick(&tree).unwrap(),
            "((leaf-1:0.25,leaf-2:1)internal-1:0.5)inferred_naive;"
        );
    }

    #[test]
    fn test_newick_quoting() {
        PrettyTrace::new().on();
        let mut tree = mock_tree();
        tree.nodes[2].sequence_id = "leaf 1".to_string();
        tree.nodes[3].sequence_id = "it's:2".to_string();
        for n in tree.nodes.iter_mut() {
            n.distance = 1.0;
        }
        assert_eq!(
            newick(&tree).unwrap(),
            "(('leaf 1':1,'it''s:2':1)internal-1:1)inferred_naive;"
        );
        assert_eq!(quote_label("a(b)"), "'a(b)'");
        assert_eq!(quote_label("x;y,z"), "'x;y,z'");
        assert_eq!(quote_label("seed_1"), "seed_1");
    }

    #[test]
    fn test_newick_odd_trees() {
        PrettyTrace::new().on();
        let mut tree = mock_tree();
        tree.nodes.push(node("stray", Some("nowhere"), NodeType::Leaf, "M", "A"));
        assert!(!newick(&tree).unwrap().contains("stray"));
        tree.nodes.retain(|n| !n.is_root());
        assert!(newick(&tree).is_none());
        let lonely = Tree {
            nodes: vec![node("naive", None, NodeType::Root, "M", "A")],
            ..Default::default()
        };
        assert_eq!(newick(&lonely).unwrap(), "naive;");
    }
}
