// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level-to-Wavefront conversion pipeline shared by the CLI and library users.
//!
//! ```rust,ignore
//! use levelobj_processing::{ConvertOptions, Converter, ModelCatalog};
//! use levelobj_geometry::MeshCache;
//!
//! let catalog = ModelCatalog::krunker_default();
//! let cache = MeshCache::new();
//! let options = ConvertOptions { asset_root: "assets".into() };
//! let level = Converter::new(&catalog, &cache, &options).convert(&document)?;
//! std::fs::write(level.obj_file_name(), &level.obj)?;
//! ```

pub mod batch;
pub mod catalog;
pub mod converter;
pub mod error;

pub use batch::{
    convert_and_write, convert_batch, convert_file, default_inputs, write_artifacts, Artifacts,
    BatchOptions, BatchReport, DocumentOutcome, DEFAULT_LEVELS,
};
pub use catalog::{CatalogEntry, ModelCatalog};
pub use converter::{artifact_stem, ConversionStats, ConvertOptions, ConvertedLevel, Converter};
pub use error::{Error, Result};
