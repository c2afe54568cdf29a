// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// The family whose details are shown: the one selected by ident, which need not be on the
// current page, else the first family on the page.

use olmsted_core::defs::ClonalFamily;
use std::collections::BTreeMap;

pub fn find_family<'a>(
    by_dataset: &'a BTreeMap<String, Vec<ClonalFamily>>,
    ident: &str,
) -> Option<&'a ClonalFamily> {
    by_dataset.values().flat_map(|x| x.iter()).find(|f| f.ident == ident)
}

pub fn selected_family(
    by_dataset: &BTreeMap<String, Vec<ClonalFamily>>,
    page: &[Option<ClonalFamily>],
    selected_ident: Option<&str>,
) -> Option<ClonalFamily> {
    if let Some(f) = selected_ident.and_then(|ident| find_family(by_dataset, ident)) {
        return Some(f.clone());
    }
    page.first().cloned().flatten()
}
