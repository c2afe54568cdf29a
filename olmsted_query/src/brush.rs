// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Restrict the available families to a brush selection made on the scatterplot.
//
// A brush selection is either a click on one family, or a rectangle given by an open range
// on each of two numeric fields, optionally combined with an exact match on a facet field.
//
// A click on a family that is not available yields a single empty slot rather than nothing.
// Downstream code copes with this, and it is kept so as not to change what the table shows.

use log::warn;
use olmsted_core::defs::{ClonalFamily, Dataset};
use olmsted_core::fields::{resolve_field, resolve_field_f64};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

// field name meaning "no facet"
pub const NO_FACET: &str = "none";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushAxis {
    pub field_name: String,
    // None once the brush is cleared
    pub range: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushFilter {
    pub field_name: String,
    pub value: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub clicked: Option<String>,
    pub x: Option<BrushAxis>,
    pub y: Option<BrushAxis>,
    pub filter: Option<BrushFilter>,
}

impl BrushSelection {
    pub fn clicked(ident: &str) -> Self {
        BrushSelection {
            clicked: Some(ident.to_string()),
            ..Default::default()
        }
    }

    pub fn rect(x: &str, xr: (f64, f64), y: &str, yr: (f64, f64)) -> Self {
        BrushSelection {
            x: Some(BrushAxis {
                field_name: x.to_string(),
                range: Some(xr),
            }),
            y: Some(BrushAxis {
                field_name: y.to_string(),
                range: Some(yr),
            }),
            ..Default::default()
        }
    }
}

fn in_range(f: &ClonalFamily, field: &str, range: (f64, f64), datasets: &[Dataset]) -> bool {
    match resolve_field_f64(f, field, datasets) {
        Some(v) => range.0 < v && v < range.1,
        None => false,
    }
}

pub fn in_brush(f: &ClonalFamily, brush: &BrushSelection, datasets: &[Dataset]) -> bool {
    if let Some(filter) = &brush.filter {
        if filter.field_name != NO_FACET
            && resolve_field(f, &filter.field_name, datasets).as_ref() != Some(&filter.value)
        {
            return false;
        }
    }
    if let (Some(x), Some(y)) = (&brush.x, &brush.y) {
        if let (Some(xr), Some(yr)) = (x.range, y.range) {
            return in_range(f, &x.field_name, xr, datasets)
                && in_range(f, &y.field_name, yr, datasets);
        }
    }
    true
}

pub fn brushed_families(
    available: &[ClonalFamily],
    brush: Option<&BrushSelection>,
    datasets: &[Dataset],
) -> Vec<Option<ClonalFamily>> {
    let brush = match brush {
        Some(b) => b,
        None => return available.iter().cloned().map(Some).collect(),
    };
    if let Some(ident) = &brush.clicked {
        let hit = available.iter().find(|f| &f.ident == ident).cloned();
        if hit.is_none() {
            warn!("clicked family {} is not available", ident);
        }
        return vec![hit];
    }
    available
        .iter()
        .filter(|f| in_brush(f, brush, datasets))
        .cloned()
        .map(Some)
        .collect()
}
