// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Process command line arguments.  Arguments are KEY=VALUE or bare KEY.

use olmsted_core::defs::Chain;
use olmsted_query::filter::FilterSet;
use olmsted_query::page::Pagination;
use string_utils::TextUtils;

#[derive(Clone, Debug, PartialEq)]
pub struct BrushArg {
    pub field_name: String,
    pub lo: f64,
    pub hi: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecOpt {
    pub families: String,
    pub datasets: Option<String>,
    pub trees: Option<String>,
    pub pagination: Pagination,
    pub filters: FilterSet,
    pub click: Option<String>,
    pub brush_x: Option<BrushArg>,
    pub brush_y: Option<BrushArg>,
    pub family: Option<String>,
    pub tree: Option<String>,
    pub seq: Option<String>,
    pub chain: Chain,
    pub all_nodes: bool,
    pub newick: bool,
    pub json: bool,
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

fn bad_arg(arg: &str, hint: &str) -> String {
    format!(
        "\nYour command line includes \"{}\", which is not a valid argument.\n\
         Perhaps you meant \"{}\".\n",
        arg, hint
    )
}

// Simple arguments.  We test for e.g. JSON or JSON=.

pub fn is_simple_arg(arg: &str, x: &str) -> Result<bool, String> {
    if arg == x || arg == format!("{}=", x) {
        return Ok(true);
    } else if arg.starts_with(&format!("{}=", x)) {
        return Err(bad_arg(arg, x));
    }
    Ok(false)
}

pub fn is_usize_arg(arg: &str, x: &str) -> Result<bool, String> {
    let hint = format!("{}=n, where n >= 0 is an integer", x);
    if arg == x {
        return Err(bad_arg(arg, &hint));
    } else if arg.starts_with(&format!("{}=", x)) {
        if arg.after("=").parse::<usize>().is_ok() {
            return Ok(true);
        }
        return Err(bad_arg(arg, &hint));
    }
    Ok(false)
}

pub fn is_string_arg(arg: &str, x: &str) -> Result<bool, String> {
    if arg == x || arg == format!("{}=", x) {
        return Err(bad_arg(arg, &format!("{}=s for some nonempty string s", x)));
    } else if arg.starts_with(&format!("{}=", x)) {
        return Ok(true);
    }
    Ok(false)
}

// Parse field:lo:hi.

fn brush_arg(arg: &str) -> Result<BrushArg, String> {
    let hint = format!("{}=field:lo:hi, where lo and hi are numbers", arg.before("="));
    let fields = arg.after("=").split(':').collect::<Vec<&str>>();
    if fields.len() != 3 || fields[0].is_empty() {
        return Err(bad_arg(arg, &hint));
    }
    match (fields[1].parse::<f64>(), fields[2].parse::<f64>()) {
        (Ok(lo), Ok(hi)) => Ok(BrushArg {
            field_name: fields[0].to_string(),
            lo,
            hi,
        }),
        _ => Err(bad_arg(arg, &hint)),
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Process arguments.  The first argument is the program name.

pub fn proc_args(args: &[String]) -> Result<ExecOpt, String> {
    let mut opt = ExecOpt::default();
    let mut families = None;
    for arg in args.iter().skip(1) {
        let arg = arg.as_str();
        if is_string_arg(arg, "FAMILIES")? {
            families = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "DATASETS")? {
            opt.datasets = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "TREES")? {
            opt.trees = Some(arg.after("=").to_string());
        } else if is_usize_arg(arg, "PAGE")? {
            opt.pagination.page = arg.after("=").force_usize();
        } else if is_usize_arg(arg, "PER_PAGE")? {
            opt.pagination.per_page = arg.after("=").force_usize();
        } else if is_string_arg(arg, "ORDER_BY")? {
            opt.pagination.order_by = arg.after("=").to_string();
        } else if is_simple_arg(arg, "ASC")? {
            opt.pagination.desc = false;
        } else if is_string_arg(arg, "FILTER")? {
            let f = arg.after("=");
            if !f.contains(':') || f.before(":").is_empty() {
                return Err(bad_arg(arg, "FILTER=field:value1,...,valuen"));
            }
            let values = f
                .after(":")
                .split(',')
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
                .collect::<Vec<String>>();
            opt.filters
                .entry(f.before(":").to_string())
                .or_default()
                .extend(values);
        } else if is_string_arg(arg, "CLICK")? {
            opt.click = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "BRUSH_X")? {
            opt.brush_x = Some(brush_arg(arg)?);
        } else if is_string_arg(arg, "BRUSH_Y")? {
            opt.brush_y = Some(brush_arg(arg)?);
        } else if is_string_arg(arg, "FAMILY")? {
            opt.family = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "TREE")? {
            opt.tree = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "SEQ")? {
            opt.seq = Some(arg.after("=").to_string());
        } else if is_string_arg(arg, "CHAIN")? {
            opt.chain = match arg.after("=") {
                "heavy" => Chain::Heavy,
                "light" => Chain::Light,
                _ => return Err(bad_arg(arg, "CHAIN=heavy or CHAIN=light")),
            };
        } else if is_simple_arg(arg, "ALL_NODES")? {
            opt.all_nodes = true;
        } else if is_simple_arg(arg, "NEWICK")? {
            opt.newick = true;
        } else if is_simple_arg(arg, "JSON")? {
            opt.json = true;
        } else {
            return Err(format!(
                "\nUnrecognized argument {}.  Please type \"olmsted\" to see usage.\n",
                arg
            ));
        }
    }
    opt.families = match families {
        Some(f) => f,
        None => return Err("\nYou need to specify FAMILIES=path.\n".to_string()),
    };
    Ok(opt)
}
