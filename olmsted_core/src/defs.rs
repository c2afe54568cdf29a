// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Data structures for clonal families, their trees and the records derived from them.
//
// Node, Tree, ClonalFamily and Dataset are read-only inputs, created upstream and loaded
// from json.  The json keys are those written by the upstream pipeline, hence the snake case
// names and the occasional rename.

use serde::de::{Deserializer, Error};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Antibody chain.  Heavy chains come from IGH, light chains from IGK or IGL.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Heavy,
    Light,
}

impl Chain {
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Heavy => "heavy",
            Chain::Light => "light",
        }
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Tree nodes.  Older trees label internal nodes "node".

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    #[serde(alias = "node")]
    Internal,
    Leaf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimepointMultiplicity {
    #[serde(default)]
    pub timepoint_id: Option<String>,
    #[serde(default)]
    pub multiplicity: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub sequence_id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub sequence_alignment_aa: String,
    #[serde(default)]
    pub sequence_alignment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_alignment_light_aa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_alignment_light: Option<String>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timepoint_multiplicities: Option<Vec<TimepointMultiplicity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lbi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lbr: Option<f64>,
}

impl Node {
    // Amino acid alignment for a chain.  Light falls back to heavy if the node has no
    // light chain sequence.

    pub fn aa(&self, chain: Chain) -> &str {
        match (chain, &self.sequence_alignment_light_aa) {
            (Chain::Light, Some(s)) => s,
            _ => &self.sequence_alignment_aa,
        }
    }

    // Nucleotide alignment for a chain, same fallback as aa().

    pub fn nt(&self, chain: Chain) -> &str {
        match (chain, &self.sequence_alignment_light) {
            (Chain::Light, Some(s)) => s,
            _ => &self.sequence_alignment,
        }
    }

    pub fn is_root(&self) -> bool {
        self.node_type == NodeType::Root
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// How upstream chose the sequences retained in a tree.

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownsamplingStrategy {
    SeedLineage,
    MinAdcl,
    #[serde(other)]
    Other,
}

impl Default for DownsamplingStrategy {
    fn default() -> Self {
        DownsamplingStrategy::Other
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub ident: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub downsampling_strategy: DownsamplingStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newick: Option<String>,
}

impl Tree {
    // The naive sequence.  There should be exactly one.

    pub fn naive(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn node(&self, sequence_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.sequence_id == sequence_id)
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Clonal families.

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSummary {
    pub ident: String,
    #[serde(default)]
    pub downsampling_strategy: DownsamplingStrategy,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClonalFamily {
    pub ident: String,
    #[serde(default)]
    pub dataset_id: String,
    #[serde(default)]
    pub clone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Sample>,
    #[serde(default)]
    pub unique_seqs_count: usize,
    #[serde(default)]
    pub mean_mut_freq: f64,
    #[serde(default)]
    pub is_paired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_id: Option<String>,
    // in the order upstream listed them
    #[serde(default, deserialize_with = "tree_summaries")]
    pub trees: Vec<TreeSummary>,
    // every other key, reachable by field name
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClonalFamily {
    pub fn locus(&self) -> Option<&str> {
        self.sample.as_ref().and_then(|s| s.locus.as_deref())
    }
}

// Trees are written either as an object keyed by tree ident or as a list.

fn tree_summaries<'de, D>(deserializer: D) -> Result<Vec<TreeSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Value = serde::Deserialize::deserialize(deserializer)?;
    let items = match v {
        Value::Null => return Ok(Vec::new()),
        Value::Array(x) => x,
        Value::Object(m) => m.into_iter().map(|(_, x)| x).collect(),
        _ => return Err(D::Error::custom("trees must be an object or a list")),
    };
    let mut trees = Vec::<TreeSummary>::new();
    for x in items {
        trees.push(serde_json::from_value(x).map_err(D::Error::custom)?);
    }
    Ok(trees)
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Datasets.  Families of a dataset are only visible once it has finished loading.

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadStatus {
    Done,
    Loading,
    #[serde(other)]
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub dataset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub clone_count: usize,
    #[serde(default)]
    pub subjects_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<LoadStatus>,
}

impl Dataset {
    pub fn is_loaded(&self) -> bool {
        self.loading == Some(LoadStatus::Done)
    }

    // Display name, which is the dataset id if the dataset is unnamed.

    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.dataset_id,
        }
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// A position in a sequence that differs from naive.  Records of kind Naive are the
// reference track: one per naive position, with mut_from == mut_to.
//
// mut_from is None when the sequence runs past the end of naive.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Naive,
    Root,
    Internal,
    Leaf,
}

impl From<NodeType> for MutationKind {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Root => MutationKind::Root,
            NodeType::Internal => MutationKind::Internal,
            NodeType::Leaf => MutationKind::Leaf,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    #[serde(rename = "type")]
    pub kind: MutationKind,
    pub parent: Option<String>,
    pub seq_id: String,
    pub position: usize,
    pub mut_from: Option<char>,
    pub mut_to: char,
}
