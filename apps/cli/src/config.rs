// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converter configuration loaded from environment variables.

use std::path::PathBuf;

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the default level documents.
    pub input_dir: PathBuf,
    /// Directory the `.obj`/`.mtl` pairs are written to.
    pub output_dir: PathBuf,
    /// Root that catalog mesh paths are resolved against.
    pub asset_dir: PathBuf,
    /// Optional JSON catalog replacing the built-in model table.
    pub catalog: Option<PathBuf>,
    /// Number of worker threads for parallel batches.
    pub worker_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("wavefront"),
            asset_dir: PathBuf::from("assets"),
            catalog: None,
            worker_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            input_dir: path("LEVELOBJ_INPUT_DIR").unwrap_or(defaults.input_dir),
            output_dir: path("LEVELOBJ_OUTPUT_DIR").unwrap_or(defaults.output_dir),
            asset_dir: path("LEVELOBJ_ASSET_DIR").unwrap_or(defaults.asset_dir),
            catalog: path("LEVELOBJ_CATALOG"),
            worker_threads: lookup("LEVELOBJ_WORKER_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.worker_threads),
        }
    }
}
