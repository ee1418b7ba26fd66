// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion orchestrator
//!
//! One linear pass over a document's placements. Every placement either
//! contributes geometry (box, wedge or model instance) or is skipped; the
//! running counters in [`ObjOutput`] guarantee that face lines only refer
//! back to already emitted vertices.

use crate::catalog::{CatalogEntry, ModelCatalog};
use crate::error::{Error, Result};
use levelobj_core::{LevelDocument, Placement, PrimitiveKind, Shape};
use levelobj_geometry::{
    BoxPrimitive, LoadedMesh, Material, MaterialStyle, MeshCache, ModelInstance, MtlOutput,
    ObjOutput, WedgePrimitive,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Library-level conversion settings
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Directory that catalog mesh paths are resolved against
    pub asset_root: PathBuf,
}

/// Counters describing one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub placements: usize,
    pub hidden: usize,
    pub unsupported: usize,
    pub boxes: usize,
    pub wedges: usize,
    pub models: usize,
    pub vertices: u32,
    pub tex_coords: u32,
    pub faces: u32,
    pub materials: u32,
}

/// The two text artifacts of one document
#[derive(Debug, Clone)]
pub struct ConvertedLevel {
    /// File stem shared by both artifacts
    pub name: String,
    /// Geometry file body, starting with `mtllib <name>.mtl`
    pub obj: String,
    /// Material file body
    pub mtl: String,
    pub stats: ConversionStats,
}

impl ConvertedLevel {
    pub fn obj_file_name(&self) -> String {
        format!("{}.obj", self.name)
    }

    pub fn mtl_file_name(&self) -> String {
        format!("{}.mtl", self.name)
    }
}

/// File stem for a document name: path separators and whitespace become `_`
pub fn artifact_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "level".to_string()
    } else {
        stem
    }
}

/// Converts level documents against a fixed catalog and shared mesh cache
pub struct Converter<'a> {
    catalog: &'a ModelCatalog,
    meshes: &'a MeshCache,
    options: &'a ConvertOptions,
}

impl<'a> Converter<'a> {
    pub fn new(catalog: &'a ModelCatalog, meshes: &'a MeshCache, options: &'a ConvertOptions) -> Self {
        Self {
            catalog,
            meshes,
            options,
        }
    }

    /// Convert one document into its geometry and material artifacts
    pub fn convert(&self, document: &LevelDocument) -> Result<ConvertedLevel> {
        let name = artifact_stem(&document.name);
        let models = self.load_models(document)?;

        let mut obj = ObjOutput::new();
        let mut mtl = MtlOutput::new();
        let mut defined_models: FxHashSet<PrimitiveKind> = FxHashSet::default();
        let mut stats = ConversionStats {
            placements: document.objects.len(),
            ..Default::default()
        };

        for (index, placement) in document.objects.iter().enumerate() {
            if placement.is_hidden() {
                stats.hidden += 1;
                continue;
            }

            let Some(kind) = placement.kind() else {
                tracing::trace!(index, id = placement.kind_id(), "Skipping unknown placement id");
                stats.unsupported += 1;
                continue;
            };

            if let Some(entry) = self.catalog.get(kind) {
                let instance = ModelInstance::from_placement(placement, index)?;
                let material = entry.material_name();
                if defined_models.insert(kind) {
                    mtl.define(&Material::textured(&material, &entry.texture));
                }
                instance.emit(&models[&kind], &material, &mut obj);
                stats.models += 1;
                continue;
            }

            match kind.shape() {
                Shape::Box => {
                    let primitive = BoxPrimitive::from_placement(placement, index)?;
                    apply_style(placement, &mut obj, &mut mtl);
                    primitive.emit(&mut obj);
                    stats.boxes += 1;
                }
                Shape::Wedge => {
                    let primitive = WedgePrimitive::from_placement(placement, index)?;
                    apply_style(placement, &mut obj, &mut mtl);
                    primitive.emit(&mut obj);
                    stats.wedges += 1;
                }
                Shape::Model | Shape::Unsupported => {
                    tracing::trace!(index, %kind, "Skipping unsupported placement");
                    stats.unsupported += 1;
                }
            }
        }

        stats.vertices = obj.vertex_count();
        stats.tex_coords = obj.tex_coord_count();
        stats.faces = obj.face_count();
        stats.materials = mtl.material_count();

        tracing::debug!(
            level = %name,
            placements = stats.placements,
            hidden = stats.hidden,
            unsupported = stats.unsupported,
            vertices = stats.vertices,
            faces = stats.faces,
            materials = stats.materials,
            "Converted level"
        );

        Ok(ConvertedLevel {
            obj: obj.finish(&format!("{name}.mtl")),
            mtl: mtl.finish(),
            name,
            stats,
        })
    }

    /// Load every catalog mesh a visible placement refers to. Runs before
    /// any geometry is built so a missing asset fails the whole document.
    fn load_models(
        &self,
        document: &LevelDocument,
    ) -> Result<FxHashMap<PrimitiveKind, Arc<LoadedMesh>>> {
        let mut models = FxHashMap::default();
        let referenced = document
            .objects
            .iter()
            .filter(|p| !p.is_hidden())
            .filter_map(Placement::kind);

        for kind in referenced {
            if models.contains_key(&kind) {
                continue;
            }
            if let Some(entry) = self.catalog.get(kind) {
                models.insert(kind, self.load_entry(entry)?);
            }
        }
        Ok(models)
    }

    fn load_entry(&self, entry: &CatalogEntry) -> Result<Arc<LoadedMesh>> {
        let path = self.options.asset_root.join(&entry.mesh);
        self.meshes.get_or_load(&path).map_err(|source| Error::Asset {
            model: entry.name.clone(),
            source,
        })
    }
}

/// Emit a color material and select it, if the placement has any color,
/// emissive color or opacity
fn apply_style(placement: &Placement, obj: &mut ObjOutput, mtl: &mut MtlOutput) {
    let style = MaterialStyle::resolve(placement.color, placement.emissive, placement.opacity);
    if let Some(style) = style {
        let name = mtl.next_color_name();
        mtl.define(&style.into_material(name.as_str()));
        obj.use_material(&name);
    }
}
