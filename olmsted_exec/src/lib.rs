// Copyright (c) 2021 10x Genomics, Inc. All rights reserved.

pub mod proc_args;
pub mod run;
