// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// State of the clonal family explorer, and the transitions a user can make on it.
//
// Every transition that changes which families are shown sends the table back to the first
// page.  Paging down does not check against the last page; that is up to the caller, who
// knows it from the query pipeline.

use crate::brush::{Axis, BrushAxis, BrushFilter, BrushSelection};
use crate::filter::FilterSet;
use crate::page::Pagination;
use log::debug;
use olmsted_core::defs::{Chain, ClonalFamily, Dataset};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplorerState {
    // families of each dataset, keyed by dataset id
    pub families: BTreeMap<String, Vec<ClonalFamily>>,
    pub datasets: Vec<Dataset>,
    pub filters: FilterSet,
    pub brush: Option<BrushSelection>,
    pub pagination: Pagination,
    pub selected_ident: Option<String>,
    pub selected_seq: Option<String>,
    // explicitly chosen tree, else one is picked for the family
    pub selected_tree: Option<String>,
    pub chain: Chain,
}

impl ExplorerState {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        ExplorerState {
            datasets,
            ..Default::default()
        }
    }

    pub fn receive_families(&mut self, dataset_id: &str, families: Vec<ClonalFamily>) {
        debug!("received {} families for {}", families.len(), dataset_id);
        self.families.insert(dataset_id.to_string(), families);
    }

    pub fn page_down(&mut self) {
        self.pagination.page += 1;
    }

    pub fn page_up(&mut self) {
        if self.pagination.page > 0 {
            self.pagination.page -= 1;
        }
    }

    // Sort by a column.  A new column sorts descending, the current column flips.

    pub fn toggle_sort(&mut self, column: &str) {
        let p = &mut self.pagination;
        p.desc = if p.order_by == column { !p.desc } else { true };
        p.order_by = column.to_string();
        p.page = 0;
    }

    // Set the brush on one axis.  A range of None means the brush was lifted.

    pub fn update_brush(&mut self, axis: Axis, field_name: &str, range: Option<(f64, f64)>) {
        let range = range.map(|(a, b)| if b < a { (b, a) } else { (a, b) });
        let b = self.brush.get_or_insert_with(BrushSelection::default);
        let a = BrushAxis {
            field_name: field_name.to_string(),
            range,
        };
        match axis {
            Axis::X => b.x = Some(a),
            Axis::Y => b.y = Some(a),
        }
        b.clicked = None;
        self.pagination.page = 0;
    }

    pub fn filter_brush(&mut self, field_name: &str, value: Value) {
        let b = self.brush.get_or_insert_with(BrushSelection::default);
        b.filter = Some(BrushFilter {
            field_name: field_name.to_string(),
            value,
        });
        self.pagination.page = 0;
    }

    pub fn clear_brush(&mut self) {
        self.brush = None;
        self.pagination.page = 0;
    }

    // Select a family.  If brush is set, the table is narrowed to just that family.

    pub fn toggle_family(&mut self, ident: &str, brush: bool) {
        self.selected_ident = Some(ident.to_string());
        self.selected_seq = None;
        self.selected_tree = None;
        if brush {
            self.brush = Some(BrushSelection::clicked(ident));
            self.pagination.page = 0;
        }
    }

    pub fn select_seq(&mut self, seq_id: Option<&str>) {
        self.selected_seq = seq_id.map(|s| s.to_string());
    }

    pub fn select_tree(&mut self, ident: Option<&str>) {
        self.selected_tree = ident.map(|s| s.to_string());
        self.selected_seq = None;
    }

    pub fn set_chain(&mut self, chain: Chain) {
        self.chain = chain;
    }

    pub fn set_filter(&mut self, field: &str, values: Vec<String>) {
        if values.is_empty() {
            self.filters.remove(field);
        } else {
            self.filters.insert(field.to_string(), values);
        }
        self.pagination.page = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.pagination.page = 0;
    }

    // Back to the initial state, keeping the families and datasets already loaded.

    pub fn reset(&mut self) {
        let families = std::mem::take(&mut self.families);
        let datasets = std::mem::take(&mut self.datasets);
        *self = ExplorerState {
            families,
            datasets,
            ..Default::default()
        };
    }
}
