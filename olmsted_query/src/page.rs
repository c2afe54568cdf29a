// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Sort the brushed families and cut out one page of them.
//
// Sorting is stable.  Values are compared by json type first (booleans, then numbers, then
// strings, then anything else), then by value.  A family lacking the sort field, or an empty
// slot, sorts after everything in ascending order and before everything in descending order.

use olmsted_core::defs::{ClonalFamily, Dataset};
use olmsted_core::fields::resolve_field;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub order_by: String,
    pub desc: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 0,
            per_page: 10,
            order_by: "unique_seqs_count".to_string(),
            desc: true,
        }
    }
}

fn type_rank(v: &Value) -> usize {
    match v {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        _ => 3,
    }
}

pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

pub fn sort_and_paginate(
    brushed: &[Option<ClonalFamily>],
    pagination: &Pagination,
    datasets: &[Dataset],
) -> Vec<Option<ClonalFamily>> {
    let keys = brushed
        .iter()
        .map(|f| {
            f.as_ref()
                .and_then(|f| resolve_field(f, &pagination.order_by, datasets))
        })
        .collect::<Vec<_>>();
    let mut ids = (0..brushed.len()).collect::<Vec<usize>>();
    ids.sort_by(|&i, &j| {
        let o = compare_values(keys[i].as_ref(), keys[j].as_ref());
        if pagination.desc {
            o.reverse()
        } else {
            o
        }
    });
    let start = pagination.page.saturating_mul(pagination.per_page);
    ids.iter()
        .skip(start)
        .take(pagination.per_page)
        .map(|&i| brushed[i].clone())
        .collect()
}

// Index of the last page, or None if there is nothing to show.

pub fn last_page(n: usize, per_page: usize) -> Option<usize> {
    if n == 0 || per_page == 0 {
        return None;
    }
    Some((n + per_page - 1) / per_page - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{family, mock_state};
    use pretty_trace::PrettyTrace;
    use serde_json::json;

    fn idents(x: &[Option<ClonalFamily>]) -> Vec<&str> {
        x.iter()
            .map(|f| f.as_ref().map(|f| f.ident.as_str()).unwrap_or("-"))
            .collect()
    }

    #[test]
    fn test_page_by_count() {
        PrettyTrace::new().on();
        let brushed = vec![
            Some(family("f1", "d", "IGH", 10)),
            Some(family("f2", "d", "IGH", 20)),
            Some(family("f3", "d", "IGH", 5)),
        ];
        let mut p = Pagination {
            page: 0,
            per_page: 2,
            order_by: "unique_seqs_count".to_string(),
            desc: true,
        };
        assert_eq!(idents(&sort_and_paginate(&brushed, &p, &[])), vec!["f2", "f1"]);
        p.page = 1;
        assert_eq!(idents(&sort_and_paginate(&brushed, &p, &[])), vec!["f3"]);
        p.page = 0;
        p.desc = false;
        assert_eq!(idents(&sort_and_paginate(&brushed, &p, &[])), vec!["f3", "f1"]);
    }

    #[test]
    fn test_pagination_bounds() {
        PrettyTrace::new().on();
        let s = mock_state();
        let brushed = s.families["dataset-1"].iter().cloned().map(Some).collect::<Vec<_>>();
        for per_page in 1..6 {
            let pages = (brushed.len() + per_page - 1) / per_page;
            assert_eq!(last_page(brushed.len(), per_page), Some(pages - 1));
            for page in pages..pages + 3 {
                let p = Pagination {
                    page,
                    per_page,
                    ..Default::default()
                };
                assert!(sort_and_paginate(&brushed, &p, &s.datasets).is_empty());
            }
        }
        let p = Pagination {
            page: usize::MAX,
            ..Default::default()
        };
        assert!(sort_and_paginate(&brushed, &p, &s.datasets).is_empty());
        assert_eq!(last_page(0, 10), None);
        assert_eq!(last_page(4, 0), None);
        assert_eq!(last_page(10, 10), Some(0));
        assert_eq!(last_page(11, 10), Some(1));
    }

    #[test]
    fn test_sort_is_stable() {
        PrettyTrace::new().on();
        let brushed = vec![
            Some(family("a", "d", "IGH", 1)),
            Some(family("b", "d", "IGK", 1)),
            Some(family("c", "d", "IGH", 1)),
        ];
        for desc in [false, true].iter() {
            let p = Pagination {
                desc: *desc,
                ..Default::default()
            };
            assert_eq!(idents(&sort_and_paginate(&brushed, &p, &[])), vec!["a", "b", "c"]);
        }
        let p = Pagination {
            order_by: "sample.locus".to_string(),
            desc: false,
            ..Default::default()
        };
        assert_eq!(idents(&sort_and_paginate(&brushed, &p, &[])), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        PrettyTrace::new().on();
        let s = mock_state();
        let mut brushed = s.families["dataset-1"].iter().cloned().map(Some).collect::<Vec<_>>();
        brushed.push(None);
        let p = Pagination {
            order_by: "pair_id".to_string(),
            desc: false,
            ..Default::default()
        };
        let x = sort_and_paginate(&brushed, &p, &s.datasets);
        assert_eq!(idents(&x), vec!["family-3", "family-4", "family-1", "family-2", "-"]);
        assert_eq!(compare_values(Some(&json!(true)), Some(&json!(0))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10.5))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("b")), Some(&json!("a"))), Ordering::Greater);
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Greater);
    }
}
