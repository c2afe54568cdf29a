// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Choose which tree of a clonal family to show.
//
// An explicitly selected tree wins.  Otherwise prefer a seed lineage tree, then a min adcl
// tree, then whatever tree is listed first.

use olmsted_core::defs::{ClonalFamily, DownsamplingStrategy, Tree};
use std::collections::HashMap;

// Trees, fetched by whoever owns them.  Fetching and eviction happen elsewhere; here a tree
// is either resident or not.

pub trait TreeSource {
    fn tree(&self, ident: &str) -> Option<&Tree>;
}

impl TreeSource for HashMap<String, Tree> {
    fn tree(&self, ident: &str) -> Option<&Tree> {
        self.get(ident)
    }
}

impl TreeSource for [Tree] {
    fn tree(&self, ident: &str) -> Option<&Tree> {
        self.iter().find(|t| t.ident == ident)
    }
}

pub fn resolve_tree_ident<'a>(f: &'a ClonalFamily, explicit: Option<&'a str>) -> Option<&'a str> {
    if let Some(ident) = explicit {
        return Some(ident);
    }
    let with = |s: DownsamplingStrategy| f.trees.iter().find(|t| t.downsampling_strategy == s);
    with(DownsamplingStrategy::SeedLineage)
        .or_else(|| with(DownsamplingStrategy::MinAdcl))
        .or_else(|| f.trees.first())
        .map(|t| t.ident.as_str())
}

pub fn selected_tree<'a, S: TreeSource + ?Sized>(
    source: &'a S,
    f: &ClonalFamily,
    explicit: Option<&str>,
) -> Option<&'a Tree> {
    let ident = match explicit {
        Some(ident) => ident,
        None => resolve_tree_ident(f, None)?,
    };
    source.tree(ident)
}
