// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a level document
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed level document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Placement #{index} ({kind}) is missing required field '{field}'")]
    MissingField {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },

    #[error("Invalid color value '{0}': expected 6 hex digits with optional '#'")]
    InvalidColor(String),

    #[error("Placement #{index} has invalid ramp direction {code} (expected 0-3)")]
    InvalidDirection { index: usize, code: i64 },
}
