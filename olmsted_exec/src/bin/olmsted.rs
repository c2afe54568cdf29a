// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Browse clonal families and their trees from the command line.
//
// Usage: olmsted FAMILIES=families.json [DATASETS=datasets.json] [TREES=trees.json] ...
//
// Log level comes from RUST_LOG and is warn by default.

use log::LevelFilter;
use olmsted_exec::proc_args::proc_args;
use olmsted_exec::run::run;
use pretty_trace::*;
use std::env;
use std::process::exit;
use string_utils::strme;

const USAGE: &str = "\nolmsted FAMILIES=path [DATASETS=path] [TREES=path]\n\
    \x20   [PAGE=n] [PER_PAGE=n] [ORDER_BY=field] [ASC]\n\
    \x20   [FILTER=field:value1,...,valuen] [BRUSH_X=field:lo:hi] [BRUSH_Y=field:lo:hi]\n\
    \x20   [CLICK=family] [FAMILY=family] [TREE=tree] [SEQ=sequence]\n\
    \x20   [CHAIN=heavy|light] [ALL_NODES] [NEWICK] [JSON]\n";

fn main() {
    PrettyTrace::new().on();
    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(LevelFilter::Warn)
        .format_timestamp(None)
        .format_target(false);
    if let Ok(filters) = env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 1 {
        print!("{}", USAGE);
        return;
    }
    let opt = match proc_args(&args) {
        Ok(opt) => opt,
        Err(e) => {
            eprint!("{}", e);
            exit(1);
        }
    };
    let mut log = Vec::<u8>::new();
    if let Err(e) = run(&opt, &mut log) {
        eprint!("{}", e);
        exit(1);
    }
    print!("{}", strme(&log));
}
