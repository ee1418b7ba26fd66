// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model catalog: which placement kinds are instanced from mesh assets
//!
//! The catalog is built once at startup and passed by reference to the
//! converter; it is never modified afterwards.

use crate::error::{Error, Result};
use levelobj_core::PrimitiveKind;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Binding of a placement kind to a mesh asset and its texture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Placement kind id
    pub id: u32,
    /// Short name, also used for the material (`<name>_mtl`)
    pub name: String,
    /// Mesh asset, relative to the asset root
    pub mesh: PathBuf,
    /// Texture referenced from the material file as written
    pub texture: String,
}

impl CatalogEntry {
    fn standard(kind: PrimitiveKind) -> Self {
        let name = kind.name();
        Self {
            id: kind.id(),
            name: name.to_string(),
            mesh: PathBuf::from(format!("models/{name}.obj")),
            texture: format!("textures/{name}.png"),
        }
    }

    /// Name of the single material shared by every instance of this entry
    pub fn material_name(&self) -> String {
        format!("{}_mtl", self.name)
    }
}

/// Immutable kind-to-asset table
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    entries: FxHashMap<PrimitiveKind, CatalogEntry>,
}

impl ModelCatalog {
    /// Catalog with no models; every model kind is skipped
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard Krunker model set under `models/` and `textures/`
    pub fn krunker_default() -> Self {
        let kinds = [
            PrimitiveKind::Crate,
            PrimitiveKind::Barrel,
            PrimitiveKind::Vehicle,
            PrimitiveKind::Stack,
            PrimitiveKind::Tree,
            PrimitiveKind::Cone,
            PrimitiveKind::Container,
            PrimitiveKind::Grass,
            PrimitiveKind::ContainerR,
            PrimitiveKind::AcidBarrel,
            PrimitiveKind::Door,
            PrimitiveKind::Window,
        ];
        let entries = kinds
            .into_iter()
            .map(|kind| (kind, CatalogEntry::standard(kind)))
            .collect();
        Self { entries }
    }

    /// Build from explicit entries; duplicate or unknown ids are rejected
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self> {
        let mut map = FxHashMap::default();
        for entry in entries {
            let kind = PrimitiveKind::from_id(entry.id)
                .ok_or_else(|| Error::Catalog(format!("unknown placement id {}", entry.id)))?;
            if map.contains_key(&kind) {
                return Err(Error::Catalog(format!("duplicate entry for {kind}")));
            }
            map.insert(kind, entry);
        }
        Ok(Self { entries: map })
    }

    /// Load a JSON array of entries
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "Loaded model catalog");
        Ok(catalog)
    }

    #[inline]
    pub fn get(&self, kind: PrimitiveKind) -> Option<&CatalogEntry> {
        self.entries.get(&kind)
    }

    #[inline]
    pub fn contains(&self, kind: PrimitiveKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
