/*
 * errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Errors of the filter harness.
//!
//! The filters themselves cannot fail; only reading and writing the
//! document can.

use crate::readers::json::JsonReadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Failed to read document: {0}")]
    Read(#[from] JsonReadError),

    #[error("Failed to write document: {0}")]
    Write(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
