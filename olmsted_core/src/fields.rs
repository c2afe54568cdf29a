// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Resolve a named field of a clonal family to a json value.
//
// A field name is either a literal key ("unique_seqs_count", "has_seed"), a dot path into
// nested objects ("sample.locus"), or the virtual field "dataset_name", which is looked up
// in the dataset list.  Locus values are upper cased, so that filtering on locus is case
// insensitive.  A name that does not resolve gives None, which matches nothing.

use crate::defs::{ClonalFamily, Dataset};
use serde_json::{json, Value};

pub const DATASET_NAME: &str = "dataset_name";
pub const SAMPLE_LOCUS: &str = "sample.locus";

pub fn resolve_field(f: &ClonalFamily, field: &str, datasets: &[Dataset]) -> Option<Value> {
    if field == DATASET_NAME {
        let name = match datasets.iter().find(|d| d.dataset_id == f.dataset_id) {
            Some(d) => d.display_name().to_string(),
            None => f.dataset_id.clone(),
        };
        return Some(Value::String(name));
    }
    if field == SAMPLE_LOCUS {
        return f.locus().map(|x| Value::String(x.to_uppercase()));
    }
    let mut parts = field.split('.');
    let head = parts.next()?;
    let mut v = top_level(f, head)?;
    for p in parts {
        v = match v {
            Value::Object(mut m) => m.remove(p)?,
            _ => return None,
        };
    }
    if v.is_null() {
        return None;
    }
    Some(v)
}

fn top_level(f: &ClonalFamily, key: &str) -> Option<Value> {
    let v = match key {
        "ident" => json!(f.ident),
        "dataset_id" => json!(f.dataset_id),
        "clone_id" => json!(f.clone_id),
        "unique_seqs_count" => json!(f.unique_seqs_count),
        "mean_mut_freq" => json!(f.mean_mut_freq),
        "is_paired" => json!(f.is_paired),
        "pair_id" => json!(f.pair_id),
        "sample" => serde_json::to_value(f.sample.as_ref()?).ok()?,
        "trees" => serde_json::to_value(&f.trees).ok()?,
        _ => f.extra.get(key)?.clone(),
    };
    Some(v)
}

// String form of a resolved value, as used for filter membership and filter options.
// Strings are taken verbatim, other scalars are rendered as json.

pub fn value_string(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => Some(v.to_string()),
    }
}

pub fn resolve_field_string(f: &ClonalFamily, field: &str, datasets: &[Dataset]) -> Option<String> {
    resolve_field(f, field, datasets).and_then(|v| value_string(&v))
}

// Numeric value of a field, if it has one.

pub fn resolve_field_f64(f: &ClonalFamily, field: &str, datasets: &[Dataset]) -> Option<f64> {
    resolve_field(f, field, datasets).and_then(|v| v.as_f64())
}
