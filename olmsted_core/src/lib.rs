// Copyright (c) 2021 10x Genomics, Inc. All rights reserved.

pub mod defs;
pub mod fields;
pub mod memo;
pub mod read_json;
