/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod cli;
pub mod errors;
pub mod filter_context;
pub mod filters;
pub mod format;
pub mod harness;
pub mod options;
pub mod readers;
pub mod traversals;
pub mod writers;
