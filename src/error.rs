// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for trajectory editing.
//!
//! None of these are fatal. They describe why an interpolation request
//! produced nothing, so callers can prompt the user or ignore them.

use thiserror::Error;

/// Result type alias for path operations
pub type Result<T> = std::result::Result<T, PathError>;

/// Recoverable outcomes of preview and commit requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("not enough known positions: found {found}, need at least {required}")]
    InsufficientSamples { found: usize, required: usize },

    #[error("interpolation needs exactly 2 selected frames, {selected} selected")]
    InvalidSelection { selected: usize },

    #[error("invalid frame range: begin {begin} must be before end {end}")]
    InvalidRange { begin: usize, end: usize },
}

impl PathError {
    /// True when the request was well formed but the data was too sparse.
    pub fn is_insufficient_samples(&self) -> bool {
        matches!(self, Self::InsufficientSamples { .. })
    }
}
