// Copyright (c) 2021 10x Genomics, Inc. All rights reserved.

pub mod align;
pub mod dedup;
pub mod derive;
pub mod index;
pub mod lineage;
pub mod newick;
pub mod select;

#[cfg(test)]
pub(crate) mod testing {
    use olmsted_core::defs::{Node, NodeType, Tree};

    pub fn node(id: &str, parent: Option<&str>, t: NodeType, aa: &str, nt: &str) -> Node {
        Node {
            sequence_id: id.to_string(),
            parent: parent.map(|p| p.to_string()),
            node_type: t,
            sequence_alignment_aa: aa.to_string(),
            sequence_alignment: nt.to_string(),
            sequence_alignment_light_aa: None,
            sequence_alignment_light: None,
            distance: 0.0,
            multiplicity: None,
            timepoint_multiplicities: None,
            lbi: None,
            lbr: None,
        }
    }

    // naive, one internal node with the naive sequence, and two leaves under it

    pub fn mock_tree() -> Tree {
        let mut internal = node(
            "internal-1",
            Some("inferred_naive"),
            NodeType::Internal,
            "MKVL",
            "ATCGATCG",
        );
        internal.lbr = Some(0.5);
        let mut leaf1 = node("leaf-1", Some("internal-1"), NodeType::Leaf, "MKVI", "ATCGATCC");
        leaf1.lbr = Some(0.3);
        leaf1.multiplicity = Some(2);
        let mut leaf2 = node("leaf-2", Some("internal-1"), NodeType::Leaf, "MKVV", "ATCAATCG");
        leaf2.lbr = Some(0.7);
        leaf2.multiplicity = Some(1);
        Tree {
            ident: "tree-1".to_string(),
            nodes: vec![
                node("inferred_naive", None, NodeType::Root, "MKVL", "ATCGATCG"),
                internal,
                leaf1,
                leaf2,
            ],
            ..Default::default()
        }
    }
}
