// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// The clonal family query pipeline.
//
// available -> brushed -> page -> selected -> heavy_light
//
// Each stage is memoized on the value of its direct inputs, so handing the pipeline a state
// whose collections were rebuilt but are equal does not cause any recomputation.  A stage
// only recomputes if what it reads changed, and it always reads the current output of the
// stage before it.  The caches may be cleared at any time.

use crate::brush::{brushed_families, BrushSelection};
use crate::filter::{available_families, FilterSet};
use crate::page::{last_page, sort_and_paginate, Pagination};
use crate::pairing::{heavy_light, paired_clone, HeavyLight};
use crate::selected::selected_family;
use crate::state::ExplorerState;
use log::debug;
use olmsted_core::defs::{ClonalFamily, Dataset};
use olmsted_core::memo::Memo;
use std::collections::BTreeMap;
use std::rc::Rc;

type Families = BTreeMap<String, Vec<ClonalFamily>>;
type Slots = Vec<Option<ClonalFamily>>;

#[derive(Default)]
pub struct QueryPipeline {
    available: Memo<(Families, Vec<Dataset>, FilterSet), Vec<ClonalFamily>>,
    brushed: Memo<(Vec<ClonalFamily>, Option<BrushSelection>, Vec<Dataset>), Slots>,
    page: Memo<(Slots, Pagination, Vec<Dataset>), Slots>,
    selected: Memo<(Families, Slots, Option<String>), Option<ClonalFamily>>,
    heavy_light: Memo<(Option<ClonalFamily>, Option<ClonalFamily>), HeavyLight>,
}

impl QueryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&mut self, s: &ExplorerState) -> Rc<Vec<ClonalFamily>> {
        if let Some(x) = self
            .available
            .find(|(f, d, q)| *f == s.families && *d == s.datasets && *q == s.filters)
        {
            return x;
        }
        let x = available_families(&s.families, &s.datasets, &s.filters);
        debug!("recomputed available families: {}", x.len());
        let key = (s.families.clone(), s.datasets.clone(), s.filters.clone());
        self.available.store(key, x)
    }

    pub fn brushed(&mut self, s: &ExplorerState) -> Rc<Slots> {
        let available = self.available(s);
        if let Some(x) = self.brushed.find(|(a, b, d)| {
            a == available.as_ref() && b.as_ref() == s.brush.as_ref() && *d == s.datasets
        }) {
            return x;
        }
        let x = brushed_families(&available, s.brush.as_ref(), &s.datasets);
        debug!("recomputed brushed families: {}", x.len());
        let key = (available.as_ref().clone(), s.brush.clone(), s.datasets.clone());
        self.brushed.store(key, x)
    }

    pub fn page(&mut self, s: &ExplorerState) -> Rc<Slots> {
        let brushed = self.brushed(s);
        if let Some(x) = self.page.find(|(b, p, d)| {
            b == brushed.as_ref() && *p == s.pagination && *d == s.datasets
        }) {
            return x;
        }
        let x = sort_and_paginate(&brushed, &s.pagination, &s.datasets);
        debug!("recomputed page {}: {}", s.pagination.page, x.len());
        let key = (brushed.as_ref().clone(), s.pagination.clone(), s.datasets.clone());
        self.page.store(key, x)
    }

    pub fn selected(&mut self, s: &ExplorerState) -> Rc<Option<ClonalFamily>> {
        let page = self.page(s);
        if let Some(x) = self.selected.find(|(f, p, i)| {
            *f == s.families && p == page.as_ref() && *i == s.selected_ident
        }) {
            return x;
        }
        let x = selected_family(&s.families, &page, s.selected_ident.as_deref());
        debug!("recomputed selected family");
        let key = (s.families.clone(), page.as_ref().clone(), s.selected_ident.clone());
        self.selected.store(key, x)
    }

    pub fn last_page(&mut self, s: &ExplorerState) -> Option<usize> {
        last_page(self.brushed(s).len(), s.pagination.per_page)
    }

    // The selected family and its partner, ordered heavy then light.

    pub fn heavy_light(&mut self, s: &ExplorerState) -> Rc<HeavyLight> {
        let selected = self.selected(s);
        let f = selected.as_ref().as_ref();
        let partner = f.and_then(|f| paired_clone(s.families.values().flatten(), f));
        if let Some(x) = self
            .heavy_light
            .find(|(a, b)| a.as_ref() == f && b.as_ref() == partner)
        {
            return x;
        }
        let x = heavy_light(f, partner);
        debug!("recomputed heavy and light families");
        self.heavy_light.store((f.cloned(), partner.cloned()), x)
    }

    pub fn clear(&mut self) {
        self.available.clear();
        self.brushed.clear();
        self.page.clear();
        self.selected.clear();
        self.heavy_light.clear();
    }

    // recomputation counts of available, brushed, page, selected and heavy_light
    pub fn recomputations(&self) -> [usize; 5] {
        [
            self.available.recomputations(),
            self.brushed.recomputations(),
            self.page.recomputations(),
            self.selected.recomputations(),
            self.heavy_light.recomputations(),
        ]
    }
}
