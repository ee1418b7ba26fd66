// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accumulated Wavefront output
//!
//! Geometry is written into four separate streams (vertices, texture
//! coordinates, normals, faces) so that every face line can reference data
//! emitted earlier, then concatenated in that order by [`ObjOutput::finish`].
//! The running counters are the 1-based index base for the next element.

use crate::material::Material;
use nalgebra::{Point3, Vector3};
use std::fmt::{self, Write};

/// Number formatter for output lines; negative zero prints as `0`
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0.0 + 0.0 == +0.0
        write!(f, "{}", self.0 + 0.0)
    }
}

/// Growing geometry text plus running element counters
#[derive(Debug, Clone, Default)]
pub struct ObjOutput {
    vertices: String,
    tex_coords: String,
    normals: String,
    faces: String,
    vertex_count: u32,
    tex_coord_count: u32,
    normal_count: u32,
    face_count: u32,
}

impl ObjOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices emitted so far
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn tex_coord_count(&self) -> u32 {
        self.tex_coord_count
    }

    #[inline]
    pub fn normal_count(&self) -> u32 {
        self.normal_count
    }

    #[inline]
    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    pub fn push_vertex(&mut self, p: Point3<f64>) {
        let _ = writeln!(self.vertices, "v {} {} {}", Num(p.x), Num(p.y), Num(p.z));
        self.vertex_count += 1;
    }

    pub fn push_tex_coord(&mut self, t: Vector3<f64>) {
        let _ = writeln!(self.tex_coords, "vt {} {} {}", Num(t.x), Num(t.y), Num(t.z));
        self.tex_coord_count += 1;
    }

    pub fn push_normal(&mut self, n: Vector3<f64>) {
        let _ = writeln!(self.normals, "vn {} {} {}", Num(n.x), Num(n.y), Num(n.z));
        self.normal_count += 1;
    }

    /// Append a face of absolute 1-based vertex indices
    pub fn push_face(&mut self, indices: impl IntoIterator<Item = u32>) {
        self.faces.push('f');
        for index in indices {
            let _ = write!(self.faces, " {index}");
        }
        self.faces.push('\n');
        self.face_count += 1;
    }

    /// Append a face of absolute `(vertex, texture)` pairs, written `v/vt`
    pub fn push_textured_face(&mut self, corners: impl IntoIterator<Item = (u32, Option<u32>)>) {
        self.faces.push('f');
        for (vertex, texture) in corners {
            match texture {
                Some(texture) => {
                    let _ = write!(self.faces, " {vertex}/{texture}");
                }
                None => {
                    let _ = write!(self.faces, " {vertex}");
                }
            }
        }
        self.faces.push('\n');
        self.face_count += 1;
    }

    /// Select a material for the faces that follow
    pub fn use_material(&mut self, name: &str) {
        let _ = writeln!(self.faces, "usemtl {name}");
    }

    /// Assemble the geometry artifact, headed by a `mtllib` reference
    pub fn finish(self, material_library: &str) -> String {
        let mut out = String::with_capacity(
            material_library.len()
                + 8
                + self.vertices.len()
                + self.tex_coords.len()
                + self.normals.len()
                + self.faces.len(),
        );
        let _ = writeln!(out, "mtllib {material_library}");
        out.push_str(&self.vertices);
        out.push_str(&self.tex_coords);
        out.push_str(&self.normals);
        out.push_str(&self.faces);
        out
    }
}

/// Growing material text plus the sequential color-material counter
#[derive(Debug, Clone, Default)]
pub struct MtlOutput {
    text: String,
    defined: u32,
    color_count: u32,
}

impl MtlOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequential color-material name (`cmtl0`, `cmtl1`, ...)
    pub fn next_color_name(&mut self) -> String {
        let name = format!("cmtl{}", self.color_count);
        self.color_count += 1;
        name
    }

    /// Append a `newmtl` block
    pub fn define(&mut self, material: &Material) {
        material.write_to(&mut self.text);
        self.defined += 1;
    }

    /// Number of material blocks written
    #[inline]
    pub fn material_count(&self) -> u32 {
        self.defined
    }

    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj;

    #[test]
    fn test_num_formatting() {
        assert_eq!(Num(1.0).to_string(), "1");
        assert_eq!(Num(0.5).to_string(), "0.5");
        assert_eq!(Num(-0.0).to_string(), "0");
        assert_eq!(Num(-2.25).to_string(), "-2.25");
    }

    #[test]
    fn test_stream_order_and_counters() {
        let mut out = ObjOutput::new();
        out.use_material("cmtl0");
        out.push_face([1, 2, 3]);
        out.push_vertex(Point3::new(0.0, 0.0, 0.0));
        out.push_vertex(Point3::new(1.0, 0.0, 0.0));
        out.push_vertex(Point3::new(0.0, 1.0, 0.0));
        out.push_normal(Vector3::z());
        out.push_tex_coord(Vector3::new(0.5, 0.5, 0.0));

        assert_eq!(out.vertex_count(), 3);
        assert_eq!(out.tex_coord_count(), 1);
        assert_eq!(out.normal_count(), 1);
        assert_eq!(out.face_count(), 1);

        let text = out.finish("level.mtl");
        assert_eq!(
            text,
            "mtllib level.mtl\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0.5 0.5 0\n\
             vn 0 0 1\n\
             usemtl cmtl0\nf 1 2 3\n"
        );
    }

    #[test]
    fn test_output_loads_back() {
        let mut out = ObjOutput::new();
        for i in 0..4 {
            out.push_vertex(Point3::new(i as f64, 0.0, 1.0));
        }
        out.push_tex_coord(Vector3::new(0.0, 1.0, 0.0));
        out.push_textured_face([(1, Some(1)), (2, Some(1)), (3, None), (4, Some(1))]);

        let mesh = parse_obj(&out.finish("x.mtl")).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0][1].texture, Some(1));
        assert_eq!(mesh.faces[0][2].texture, None);
        assert!(mesh.references_resolve());
    }

    #[test]
    fn test_color_names_are_sequential() {
        let mut mtl = MtlOutput::new();
        assert_eq!(mtl.next_color_name(), "cmtl0");
        assert_eq!(mtl.next_color_name(), "cmtl1");
        assert_eq!(mtl.material_count(), 0);
    }
}
