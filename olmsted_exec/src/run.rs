// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Load clonal families, datasets and trees, query them as set on the command line, and
// report the page of families, the selected family and the views of its tree.

use crate::proc_args::ExecOpt;
use io_utils::*;
use itertools::Itertools;
use olmsted_core::defs::{ClonalFamily, Dataset, LoadStatus, MutationKind, MutationRecord, Tree};
use olmsted_core::read_json::{read_datasets, read_families, read_trees};
use olmsted_query::brush::Axis;
use olmsted_query::filter::count_loaded_families;
use olmsted_query::pipeline::QueryPipeline;
use olmsted_query::state::ExplorerState;
use olmsted_tree::derive::{DeriveOpt, FamilyAlignment, LineageAlignment, TreeDeriver};
use olmsted_tree::newick::newick;
use olmsted_tree::select::selected_tree;
use serde_derive::Serialize;
use std::io::Write;

#[derive(Serialize)]
pub struct Report {
    pub loaded_families: usize,
    pub available: usize,
    pub brushed: usize,
    pub last_page: Option<usize>,
    pub page: Vec<Option<ClonalFamily>>,
    pub selected: Option<String>,
    pub heavy: Option<String>,
    pub light: Option<String>,
    pub tree: Option<String>,
    pub family_alignment: Option<FamilyAlignment>,
    pub lineage_alignment: Option<LineageAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newick: Option<String>,
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Without a datasets file, every dataset named by the families is taken to be loaded.

fn implied_datasets(opt: &ExecOpt, state: &ExplorerState) -> Result<Vec<Dataset>, String> {
    if let Some(path) = &opt.datasets {
        return read_datasets(path);
    }
    Ok(state
        .families
        .keys()
        .map(|id| Dataset {
            dataset_id: id.clone(),
            loading: Some(LoadStatus::Done),
            ..Default::default()
        })
        .collect())
}

pub fn load_state(opt: &ExecOpt) -> Result<ExplorerState, String> {
    let mut state = ExplorerState::default();
    for (dataset_id, families) in read_families(&opt.families)? {
        state.receive_families(&dataset_id, families);
    }
    state.datasets = implied_datasets(opt, &state)?;
    for (field, values) in opt.filters.iter() {
        state.set_filter(field, values.clone());
    }
    if let Some(b) = &opt.brush_x {
        state.update_brush(Axis::X, &b.field_name, Some((b.lo, b.hi)));
    }
    if let Some(b) = &opt.brush_y {
        state.update_brush(Axis::Y, &b.field_name, Some((b.lo, b.hi)));
    }
    if let Some(ident) = &opt.click {
        state.toggle_family(ident, true);
    }
    if let Some(ident) = &opt.family {
        state.toggle_family(ident, false);
    }
    state.select_tree(opt.tree.as_deref());
    state.select_seq(opt.seq.as_deref());
    state.set_chain(opt.chain);
    state.pagination = opt.pagination.clone();
    Ok(state)
}

pub fn build_report(opt: &ExecOpt, state: &ExplorerState, trees: &[Tree]) -> Report {
    let mut q = QueryPipeline::new();
    let available = q.available(state).len();
    let brushed = q.brushed(state).len();
    let page = q.page(state).as_ref().clone();
    let selected = q.selected(state).as_ref().clone();
    let hl = q.heavy_light(state);
    let tree = selected
        .as_ref()
        .and_then(|f| selected_tree(trees, f, state.selected_tree.as_deref()));
    let dopt = DeriveOpt {
        chain: state.chain,
        include_all_nodes: opt.all_nodes,
    };
    let mut deriver = TreeDeriver::new();
    let family_alignment = deriver.family_alignment(tree, state.chain).as_ref().clone();
    let lineage_alignment = deriver
        .lineage_alignment(tree, state.selected_seq.as_deref(), &dopt)
        .as_ref()
        .clone();
    Report {
        loaded_families: count_loaded_families(&state.datasets),
        available,
        brushed,
        last_page: q.last_page(state),
        page,
        selected: selected.map(|f| f.ident),
        heavy: hl.heavy.as_ref().map(|f| f.ident.clone()),
        light: hl.light.as_ref().map(|f| f.ident.clone()),
        tree: tree.map(|t| t.ident.clone()),
        family_alignment,
        lineage_alignment,
        newick: if opt.newick { tree.and_then(newick) } else { None },
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

fn print_mutations(log: &mut Vec<u8>, track: &[MutationRecord]) {
    let muts = track
        .iter()
        .filter(|m| m.kind != MutationKind::Naive)
        .map(|m| {
            let from = m.mut_from.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
            format!("{}:{}{}{}", m.seq_id, from, m.position + 1, m.mut_to)
        })
        .collect::<Vec<String>>();
    fwriteln!(log, "mutations = {}", muts.len());
    for m in muts.iter() {
        fwriteln!(log, "    {}", m);
    }
}

pub fn print_report(log: &mut Vec<u8>, r: &Report) {
    fwriteln!(
        log,
        "families: {} in loaded datasets, {} available, {} brushed",
        r.loaded_families,
        r.available,
        r.brushed
    );
    match r.last_page {
        Some(last) => {
            fwriteln!(log, "pages: {}", last + 1);
        }
        None => {
            fwriteln!(log, "pages: none");
        }
    }
    for f in r.page.iter() {
        match f {
            Some(f) => {
                fwriteln!(
                    log,
                    "    {} dataset={} locus={} unique_seqs_count={} mean_mut_freq={}",
                    f.ident,
                    f.dataset_id,
                    f.locus().unwrap_or("?"),
                    f.unique_seqs_count,
                    f.mean_mut_freq
                );
            }
            None => {
                fwriteln!(log, "    (missing family)");
            }
        }
    }
    let name = |x: &Option<String>| x.clone().unwrap_or_else(|| "none".to_string());
    fwriteln!(log, "selected family: {}", name(&r.selected));
    fwriteln!(log, "heavy: {}, light: {}", name(&r.heavy), name(&r.light));
    fwriteln!(log, "tree: {}", name(&r.tree));
    if let Some(a) = &r.family_alignment {
        fwriteln!(log, "\nFAMILY ALIGNMENT");
        fwriteln!(log, "naive and leaves = {}", a.leaves_count_incl_naive);
        print_mutations(log, &a.mutation_track);
        fwriteln!(
            log,
            "downloadable = {}",
            a.downloadable_sequences.iter().map(|n| &n.sequence_id).format(",")
        );
    }
    if let Some(a) = &r.lineage_alignment {
        fwriteln!(log, "\nLINEAGE");
        fwriteln!(
            log,
            "path = {}",
            a.downloadable_lineage_sequences.iter().map(|n| &n.sequence_id).format(" > ")
        );
        fwriteln!(log, "distinct sequences = {}", a.lineage_seq_counter);
        print_mutations(log, &a.lineage_mutation_track);
    }
    if let Some(n) = &r.newick {
        fwriteln!(log, "\nNEWICK\n{}", n);
    }
}

pub fn run(opt: &ExecOpt, log: &mut Vec<u8>) -> Result<(), String> {
    let state = load_state(opt)?;
    let trees = match &opt.trees {
        Some(path) => read_trees(path)?,
        None => Vec::new(),
    };
    let r = build_report(opt, &state, &trees);
    if opt.json {
        let s = serde_json::to_string_pretty(&r)
            .map_err(|e| format!("\nUnable to write json: {}.\n", e))?;
        fwriteln!(log, "{}", s);
    } else {
        print_report(log, &r);
    }
    Ok(())
}
