// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Test clonal families against the high-level filters, and collect the families that are
// available for browsing: those of fully loaded datasets that pass every filter.
//
// A filter set maps a field name to the values allowed for it.  A family passes if, for every
// field with a nonempty list of allowed values, its value for that field is in the list.
// Fields resolve as described in olmsted_core::fields.

use olmsted_core::defs::{ClonalFamily, Dataset};
use olmsted_core::fields::{resolve_field_string, SAMPLE_LOCUS};
use std::collections::BTreeMap;
use vector_utils::unique_sort;

pub type FilterSet = BTreeMap<String, Vec<String>>;

pub fn passes_filters(f: &ClonalFamily, filters: &FilterSet, datasets: &[Dataset]) -> bool {
    for (field, allowed) in filters.iter() {
        if allowed.is_empty() {
            continue;
        }
        let value = match resolve_field_string(f, field, datasets) {
            Some(v) => v,
            None => return false,
        };
        let ok = if field == SAMPLE_LOCUS {
            allowed.iter().any(|a| a.to_uppercase() == value)
        } else {
            allowed.contains(&value)
        };
        if !ok {
            return false;
        }
    }
    true
}

pub fn available_families(
    by_dataset: &BTreeMap<String, Vec<ClonalFamily>>,
    datasets: &[Dataset],
    filters: &FilterSet,
) -> Vec<ClonalFamily> {
    let mut available = Vec::<ClonalFamily>::new();
    for d in datasets.iter() {
        if !d.is_loaded() {
            continue;
        }
        if let Some(families) = by_dataset.get(&d.dataset_id) {
            for f in families.iter() {
                if passes_filters(f, filters, datasets) {
                    available.push(f.clone());
                }
            }
        }
    }
    available
}

// Number of clonal families in loaded datasets, as reported by the datasets themselves.

pub fn count_loaded_families(datasets: &[Dataset]) -> usize {
    datasets
        .iter()
        .filter(|d| d.is_loaded())
        .map(|d| d.clone_count)
        .sum()
}

// The distinct values a field takes, sorted, for offering as filter choices.

pub fn filter_options(families: &[ClonalFamily], field: &str, datasets: &[Dataset]) -> Vec<String> {
    let mut values = families
        .iter()
        .filter_map(|f| resolve_field_string(f, field, datasets))
        .filter(|v| !v.is_empty())
        .collect::<Vec<String>>();
    unique_sort(&mut values);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, family, mock_state};
    use olmsted_core::defs::LoadStatus;
    use pretty_trace::PrettyTrace;

    fn idents(x: &[ClonalFamily]) -> Vec<&str> {
        x.iter().map(|f| f.ident.as_str()).collect()
    }

    #[test]
    fn test_locus_filter() {
        PrettyTrace::new().on();
        let mut by_dataset = BTreeMap::new();
        by_dataset.insert(
            "dataset-1".to_string(),
            vec![family("f1", "dataset-1", "IGH", 1), family("f2", "dataset-1", "IGK", 1)],
        );
        let datasets = vec![dataset("dataset-1", LoadStatus::Done)];
        let mut filters = FilterSet::new();
        filters.insert("sample.locus".to_string(), vec!["IGH".to_string()]);
        assert_eq!(idents(&available_families(&by_dataset, &datasets, &filters)), vec!["f1"]);

        // Locus matching ignores case on both sides.

        filters.insert("sample.locus".to_string(), vec!["igk".to_string()]);
        assert_eq!(idents(&available_families(&by_dataset, &datasets, &filters)), vec!["f2"]);
    }

    #[test]
    fn test_available_families() {
        PrettyTrace::new().on();
        let s = mock_state();
        let none = FilterSet::new();
        let all = available_families(&s.families, &s.datasets, &none);
        assert_eq!(idents(&all), vec!["family-1", "family-2", "family-3", "family-4"]);

        // An empty list of allowed values does not constrain.

        let mut filters = FilterSet::new();
        filters.insert("sample.locus".to_string(), Vec::new());
        assert_eq!(available_families(&s.families, &s.datasets, &filters).len(), 4);

        // Or within a field, and across fields.

        filters.insert(
            "sample.locus".to_string(),
            vec!["IGK".to_string(), "IGL".to_string()],
        );
        let got = available_families(&s.families, &s.datasets, &filters);
        assert_eq!(idents(&got), vec!["family-2", "family-4"]);
        filters.insert("dataset_name".to_string(), vec!["Test Dataset".to_string()]);
        filters.insert("has_seed".to_string(), vec!["true".to_string()]);
        let got = available_families(&s.families, &s.datasets, &filters);
        assert_eq!(idents(&got), vec!["family-4"]);

        // A field nobody has excludes everybody.

        filters.insert("v_call".to_string(), vec!["IGHV1-2".to_string()]);
        assert!(available_families(&s.families, &s.datasets, &filters).is_empty());
    }

    #[test]
    fn test_unloaded_datasets() {
        PrettyTrace::new().on();
        let mut s = mock_state();
        s.datasets[0].loading = Some(LoadStatus::Loading);
        assert!(available_families(&s.families, &s.datasets, &FilterSet::new()).is_empty());
        assert_eq!(count_loaded_families(&s.datasets), 0);
        s.datasets[0].loading = Some(LoadStatus::Done);
        assert_eq!(count_loaded_families(&s.datasets), 3);
        let mut more = dataset("dataset-2", LoadStatus::Done);
        more.clone_count = 2;
        s.datasets.push(more);
        assert_eq!(count_loaded_families(&s.datasets), 5);
    }

    #[test]
    fn test_filter_options() {
        PrettyTrace::new().on();
        let s = mock_state();
        let all = s.families["dataset-1"].clone();
        assert_eq!(
            filter_options(&all, "sample.locus", &s.datasets),
            vec!["IGH", "IGK", "IGL"]
        );
        assert_eq!(filter_options(&all, "dataset_name", &s.datasets), vec!["Test Dataset"]);
        assert!(filter_options(&all, "v_call", &s.datasets).is_empty());
    }
}
