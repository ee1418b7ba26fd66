// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Conversion pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read level document {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid level document: {0}")]
    Document(#[from] levelobj_core::Error),

    #[error("Model asset for '{model}' could not be loaded: {source}")]
    Asset {
        model: String,
        #[source]
        source: levelobj_geometry::Error,
    },

    #[error("Invalid model catalog: {0}")]
    Catalog(String),

    #[error("Document name '{name}' was already written by {first:?} in this batch")]
    DuplicateName { name: String, first: PathBuf },

    #[error("Failed to write {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(format!("JSON error: {}", err))
    }
}
