// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// One corner of a face: 1-based indices exactly as written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex: u32,
    pub texture: Option<u32>,
    pub normal: Option<u32>,
}

impl FaceVertex {
    #[inline]
    pub fn new(vertex: u32, texture: Option<u32>, normal: Option<u32>) -> Self {
        Self {
            vertex,
            texture,
            normal,
        }
    }
}

/// Polygon face; quads and triangles stay inline
pub type Face = SmallVec<[FaceVertex; 4]>;

/// Polygon mesh as read from a Wavefront file
#[derive(Debug, Clone, Default)]
pub struct LoadedMesh {
    /// Vertex positions
    pub positions: Vec<Point3<f64>>,
    /// Texture coordinates (u, v, w)
    pub tex_coords: Vec<Vector3<f64>>,
    /// Vertex normals
    pub normals: Vec<Vector3<f64>>,
    /// Polygon faces, never re-triangulated
    pub faces: Vec<Face>,
}

impl LoadedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds (min, max); origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        for p in &self.positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }

    /// Normalize into the instancing convention: the base sits on Y = 0 with
    /// unit height, and X/Z are divided by half their extent.
    ///
    /// X and Z are scaled but not recentered. An axis with zero extent is
    /// left unscaled.
    pub fn normalize(&mut self) {
        if self.is_empty() {
            return;
        }

        let (min, max) = self.bounds();
        let extent = max - min;
        let half_x = nonzero_or_one(extent.x / 2.0);
        let height = nonzero_or_one(extent.y);
        let half_z = nonzero_or_one(extent.z / 2.0);

        for p in &mut self.positions {
            p.x /= half_x;
            p.y = (p.y - min.y) / height;
            p.z /= half_z;
        }
    }

    /// Consume and return the normalized mesh
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Check every face reference against the element counts
    pub fn references_resolve(&self) -> bool {
        let in_range = |index: u32, len: usize| index >= 1 && (index as usize) <= len;
        self.faces.iter().flatten().all(|corner| {
            in_range(corner.vertex, self.positions.len())
                && corner
                    .texture
                    .map_or(true, |t| in_range(t, self.tex_coords.len()))
                && corner
                    .normal
                    .map_or(true, |n| in_range(n, self.normals.len()))
        })
    }
}

#[inline]
fn nonzero_or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}
