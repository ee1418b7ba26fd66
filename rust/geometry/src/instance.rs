// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model instancing: splice a loaded mesh into the combined output

use crate::mesh::LoadedMesh;
use crate::transform::EulerRotation;
use crate::wavefront::ObjOutput;
use levelobj_core::Placement;
use nalgebra::{Point3, Vector3};

/// Horizontal footprint that catalog meshes are authored against
pub const MODEL_AUTHORING_SCALE: f64 = 1.5;

/// Placement of one model instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInstance {
    pub position: Point3<f64>,
    pub size: Vector3<f64>,
    pub rotation: [f64; 3],
}

impl ModelInstance {
    pub fn from_placement(placement: &Placement, index: usize) -> levelobj_core::Result<Self> {
        let p = placement.require_position(index)?;
        let s = placement.require_size(index)?;
        Ok(Self {
            position: Point3::from(p),
            size: Vector3::from(s),
            rotation: placement.rotation.unwrap_or_default(),
        })
    }

    /// Scale, rotate and translate one normalized mesh vertex
    pub fn transform_point(&self, rotation: &EulerRotation, p: &Point3<f64>) -> Point3<f64> {
        let scaled = Vector3::new(
            p.x * (self.size.x / MODEL_AUTHORING_SCALE),
            p.y * self.size.y,
            p.z * (self.size.z / MODEL_AUTHORING_SCALE),
        );
        self.position + rotation.rotate(scaled)
    }

    /// Append the mesh under `material`. Face indices are offset by the
    /// vertex and texture counts held before this instance; offsets saturate
    /// at `u32::MAX` rather than wrap.
    pub fn emit(&self, mesh: &LoadedMesh, material: &str, out: &mut ObjOutput) {
        let vertex_base = out.vertex_count();
        let texture_base = out.tex_coord_count();

        out.use_material(material);
        for face in &mesh.faces {
            out.push_textured_face(face.iter().map(|corner| {
                (
                    vertex_base.saturating_add(corner.vertex),
                    corner.texture.map(|t| texture_base.saturating_add(t)),
                )
            }));
        }

        let rotation = EulerRotation::new(self.rotation);
        for p in &mesh.positions {
            out.push_vertex(self.transform_point(&rotation, p));
        }
        for t in &mesh.tex_coords {
            out.push_tex_coord(*t);
        }
    }
}
