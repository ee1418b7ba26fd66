// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide cache of loaded mesh assets
//!
//! Each asset path is loaded and normalized once, then shared read-only as
//! `Arc<LoadedMesh>` across placements, documents and threads.

use crate::error::Result;
use crate::mesh::LoadedMesh;
use crate::obj::load_obj;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: RwLock<FxHashMap<PathBuf, Arc<LoadedMesh>>>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mesh for `path`, loading it on first request
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<LoadedMesh>> {
        if let Some(mesh) = self.get(path) {
            return Ok(mesh);
        }

        // Load outside the lock; a concurrent loader of the same path is
        // harmless, the first insert wins.
        let loaded = Arc::new(load_obj(path)?);
        let mut meshes = self.meshes.write().unwrap_or_else(|e| e.into_inner());
        let entry = meshes
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::clone(&loaded));
        Ok(Arc::clone(entry))
    }

    pub fn get(&self, path: &Path) -> Option<Arc<LoadedMesh>> {
        let meshes = self.meshes.read().unwrap_or_else(|e| e.into_inner());
        meshes.get(path).map(Arc::clone)
    }

    /// Seed the cache with an already parsed mesh. Existing entries are kept.
    pub fn insert(&self, path: impl Into<PathBuf>, mesh: LoadedMesh) -> Arc<LoadedMesh> {
        let mut meshes = self.meshes.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(meshes.entry(path.into()).or_insert_with(|| Arc::new(mesh)))
    }

    pub fn len(&self) -> usize {
        self.meshes.read().map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_once_and_shares() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v 0 0 0\nv 2 2 2\nv 2 0 0\nf 1 2 3").unwrap();

        let cache = MeshCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.vertex_count(), 3);
    }

    #[test]
    fn test_insert_does_not_replace() {
        let cache = MeshCache::new();
        let mut original = LoadedMesh::new();
        original.positions.push(nalgebra::Point3::origin());
        let kept = cache.insert("models/a.obj", original);
        let again = cache.insert("models/a.obj", LoadedMesh::new());
        assert!(Arc::ptr_eq(&kept, &again));
        assert_eq!(again.vertex_count(), 1);
    }

    #[test]
    fn test_missing_asset_not_cached() {
        let cache = MeshCache::new();
        assert!(cache.get_or_load(Path::new("/nonexistent/levelobj.obj")).is_err());
        assert!(cache.is_empty());
    }
}
