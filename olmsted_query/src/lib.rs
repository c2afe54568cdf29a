// Copyright (c) 2021 10x Genomics, Inc. All rights reserved.

pub mod brush;
pub mod filter;
pub mod page;
pub mod pairing;
pub mod pipeline;
pub mod selected;
pub mod state;
