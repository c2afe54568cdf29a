// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Read clonal families, datasets and trees from json files written upstream.

use crate::defs::{ClonalFamily, Dataset, Tree};
use io_utils::path_exists;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::read_to_string;

fn read_json_value(path: &str, what: &str) -> Result<Value, String> {
    if !path_exists(path) {
        return Err(format!("\nThe {} file {} does not exist.\n", what, path));
    }
    let s = read_to_string(path)
        .map_err(|e| format!("\nUnable to read the {} file {}: {}.\n", what, path, e))?;
    serde_json::from_str(&s)
        .map_err(|e| format!("\nThe {} file {} is not valid json: {}.\n", what, path, e))
}

fn parse_list<T: DeserializeOwned>(v: Value, path: &str, what: &str) -> Result<Vec<T>, String> {
    match v {
        Value::Array(_) => serde_json::from_value(v).map_err(|e| {
            format!("\nSomething is wrong with an entry in the {} file {}: {}.\n", what, path, e)
        }),
        _ => Err(format!("\nThe {} file {} should contain a json list.\n", what, path)),
    }
}

pub fn read_datasets(path: &str) -> Result<Vec<Dataset>, String> {
    let v = read_json_value(path, "datasets")?;
    let datasets: Vec<Dataset> = parse_list(v, path, "datasets")?;
    debug!("read {} datasets from {}", datasets.len(), path);
    Ok(datasets)
}

pub fn read_trees(path: &str) -> Result<Vec<Tree>, String> {
    let v = read_json_value(path, "trees")?;
    let trees: Vec<Tree> = parse_list(v, path, "trees")?;
    debug!("read {} trees from {}", trees.len(), path);
    Ok(trees)
}

// Families come either as a list, in which case they are grouped by their dataset_id,
// or as an object mapping dataset id to a list of families.

pub fn read_families(path: &str) -> Result<BTreeMap<String, Vec<ClonalFamily>>, String> {
    let v = read_json_value(path, "clonal families")?;
    let mut by_dataset = BTreeMap::<String, Vec<ClonalFamily>>::new();
    match v {
        Value::Object(m) => {
            for (dataset_id, x) in m {
                let families = parse_list(x, path, "clonal families")?;
                by_dataset.insert(dataset_id, families);
            }
        }
        _ => {
            let families: Vec<ClonalFamily> = parse_list(v, path, "clonal families")?;
            for f in families {
                by_dataset.entry(f.dataset_id.clone()).or_default().push(f);
            }
        }
    }
    debug!(
        "read {} clonal families in {} datasets from {}",
        by_dataset.values().map(|x| x.len()).sum::<usize>(),
        by_dataset.len(),
        path
    );
    Ok(by_dataset)
}
