// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box and wedge primitive generators
//!
//! Both generators read the output's running vertex count before appending,
//! so their face lines only ever reference their own freshly emitted block.

use crate::transform::EulerRotation;
use crate::wavefront::ObjOutput;
use levelobj_core::{Placement, RampDirection};
use nalgebra::{Point3, Vector3};

/// Box topology over the 8 corners, 0-based
pub const BOX_FACES: [[u32; 4]; 6] = [
    [0, 2, 4, 1],
    [1, 4, 7, 5],
    [5, 7, 6, 3],
    [3, 6, 2, 0],
    [2, 6, 7, 4],
    [3, 0, 1, 5],
];

/// Ramp quad, emitted in both windings so it shows from either side
pub const WEDGE_FACES: [[u32; 4]; 2] = [[0, 1, 2, 3], [3, 2, 1, 0]];

/// Box-family primitive (cube, plane, water)
///
/// `position` is the bottom-center of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPrimitive {
    pub position: Point3<f64>,
    pub size: Vector3<f64>,
    /// Present only when the placement carried an `r` field
    pub rotation: Option<[f64; 3]>,
}

impl BoxPrimitive {
    pub fn from_placement(placement: &Placement, index: usize) -> levelobj_core::Result<Self> {
        let p = placement.require_position(index)?;
        let s = placement.require_size(index)?;
        Ok(Self {
            position: Point3::from(p),
            size: Vector3::from(s),
            rotation: placement.rotation,
        })
    }

    /// Axis-aligned corners, built from a recentered copy of the position
    fn aligned_corners(&self) -> [Point3<f64>; 8] {
        let s = self.size;
        let x = self.position.x - s.x / 2.0;
        let y = self.position.y;
        let z = self.position.z - s.z / 2.0;
        [
            Point3::new(x, y, z),
            Point3::new(x + s.x, y, z),
            Point3::new(x, y + s.y, z),
            Point3::new(x, y, z + s.z),
            Point3::new(x + s.x, y + s.y, z),
            Point3::new(x + s.x, y, z + s.z),
            Point3::new(x, y + s.y, z + s.z),
            Point3::new(x + s.x, y + s.y, z + s.z),
        ]
    }

    /// The 8 world-space corners in emission order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let corners = self.aligned_corners();
        let Some(angles) = self.rotation else {
            return corners;
        };

        // Rotate in object space about the placement position
        let rotation = EulerRotation::new(angles);
        corners.map(|corner| rotation.rotate_about(corner, self.position))
    }

    /// Append 8 vertices and 6 quads
    pub fn emit(&self, out: &mut ObjOutput) {
        let base = out.vertex_count() + 1;
        for corner in self.corners() {
            out.push_vertex(corner);
        }
        for face in BOX_FACES {
            out.push_face(face.map(|i| base + i));
        }
    }
}

/// Ramp primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgePrimitive {
    pub position: Point3<f64>,
    pub size: Vector3<f64>,
    pub direction: RampDirection,
}

impl WedgePrimitive {
    pub fn from_placement(placement: &Placement, index: usize) -> levelobj_core::Result<Self> {
        let p = placement.require_position(index)?;
        let s = placement.require_size(index)?;
        Ok(Self {
            position: Point3::from(p),
            size: Vector3::from(s),
            direction: placement.ramp_direction(index)?,
        })
    }

    /// Two low corners at `y`, two raised corners at `y + sy` on the side
    /// the ramp rises towards
    pub fn corners(&self) -> [Point3<f64>; 4] {
        let c = self.position;
        let (hx, hz) = (self.size.x / 2.0, self.size.z / 2.0);
        let (low, high) = (c.y, c.y + self.size.y);

        match self.direction {
            RampDirection::PosX => [
                Point3::new(c.x - hx, low, c.z + hz),
                Point3::new(c.x - hx, low, c.z - hz),
                Point3::new(c.x + hx, high, c.z + hz),
                Point3::new(c.x + hx, high, c.z - hz),
            ],
            RampDirection::PosZ => [
                Point3::new(c.x + hx, low, c.z - hz),
                Point3::new(c.x - hx, low, c.z - hz),
                Point3::new(c.x + hx, high, c.z + hz),
                Point3::new(c.x - hx, high, c.z + hz),
            ],
            RampDirection::NegX => [
                Point3::new(c.x + hx, low, c.z + hz),
                Point3::new(c.x + hx, low, c.z - hz),
                Point3::new(c.x - hx, high, c.z + hz),
                Point3::new(c.x - hx, high, c.z - hz),
            ],
            RampDirection::NegZ => [
                Point3::new(c.x + hx, low, c.z + hz),
                Point3::new(c.x - hx, low, c.z + hz),
                Point3::new(c.x + hx, high, c.z - hz),
                Point3::new(c.x - hx, high, c.z - hz),
            ],
        }
    }

    /// Append 4 vertices and 2 faces
    pub fn emit(&self, out: &mut ObjOutput) {
        let base = out.vertex_count() + 1;
        for corner in self.corners() {
            out.push_vertex(corner);
        }
        for face in WEDGE_FACES {
            out.push_face(face.map(|i| base + i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn cube(rotation: Option<[f64; 3]>) -> BoxPrimitive {
        BoxPrimitive {
            position: Point3::new(3.0, 1.0, -2.0),
            size: Vector3::new(2.0, 4.0, 6.0),
            rotation,
        }
    }

    #[test]
    fn test_aligned_corners_recentered() {
        let corners = cube(None).corners();
        assert_eq!(corners[0], Point3::new(2.0, 1.0, -5.0));
        assert_eq!(corners[7], Point3::new(4.0, 5.0, 1.0));
        assert_eq!(corners[3], Point3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_zero_rotation_matches_aligned_path() {
        let aligned = cube(None).corners();
        let rotated = cube(Some([0.0, 0.0, 0.0])).corners();
        for (a, r) in aligned.iter().zip(rotated.iter()) {
            assert_relative_eq!(*a, *r, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_pivots_on_position() {
        let prim = cube(Some([0.0, FRAC_PI_2, 0.0]));
        let corners = prim.corners();
        // A quarter turn about Y swaps the X and Z footprint
        let min_x = corners.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let min_z = corners.iter().map(|p| p.z).fold(f64::MAX, f64::min);
        let max_z = corners.iter().map(|p| p.z).fold(f64::MIN, f64::max);
        assert_relative_eq!(max_x - min_x, 6.0, epsilon = 1e-9);
        assert_relative_eq!(max_z - min_z, 2.0, epsilon = 1e-9);
        assert_relative_eq!((max_x + min_x) / 2.0, 3.0, epsilon = 1e-9);
        assert_relative_eq!((max_z + min_z) / 2.0, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_input_placement_untouched() {
        let placement = Placement {
            position: Some([0.0, 0.0, 0.0]),
            size: Some([2.0, 2.0, 2.0]),
            ..Default::default()
        };
        let prim = BoxPrimitive::from_placement(&placement, 0).unwrap();
        prim.corners();
        prim.corners();
        assert_eq!(placement.position, Some([0.0, 0.0, 0.0]));
        assert_eq!(prim.corners()[0], Point3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn test_box_faces_offset_by_running_count() {
        let mut out = ObjOutput::new();
        cube(None).emit(&mut out);
        cube(None).emit(&mut out);
        assert_eq!(out.vertex_count(), 16);
        assert_eq!(out.face_count(), 12);

        let text = out.finish("t.mtl");
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces[0], "f 1 3 5 2");
        assert_eq!(faces[5], "f 4 1 2 6");
        assert_eq!(faces[6], "f 9 11 13 10");
    }

    #[test]
    fn test_wedge_direction_table() {
        let ramp = |direction| WedgePrimitive {
            position: Point3::origin(),
            size: Vector3::new(2.0, 2.0, 2.0),
            direction,
        };

        let pos_x = ramp(RampDirection::PosX).corners();
        assert!(pos_x[..2].iter().all(|p| p.x == -1.0 && p.y == 0.0));
        assert!(pos_x[2..].iter().all(|p| p.x == 1.0 && p.y == 2.0));

        let neg_x = ramp(RampDirection::NegX).corners();
        assert!(neg_x[..2].iter().all(|p| p.x == 1.0 && p.y == 0.0));
        assert!(neg_x[2..].iter().all(|p| p.x == -1.0 && p.y == 2.0));

        let pos_z = ramp(RampDirection::PosZ).corners();
        assert!(pos_z[..2].iter().all(|p| p.z == -1.0 && p.y == 0.0));
        assert!(pos_z[2..].iter().all(|p| p.z == 1.0 && p.y == 2.0));

        let neg_z = ramp(RampDirection::NegZ).corners();
        assert!(neg_z[..2].iter().all(|p| p.z == 1.0 && p.y == 0.0));
        assert!(neg_z[2..].iter().all(|p| p.z == -1.0 && p.y == 2.0));
    }

    #[test]
    fn test_wedge_emits_both_windings() {
        let mut out = ObjOutput::new();
        out.push_vertex(Point3::origin());
        WedgePrimitive {
            position: Point3::origin(),
            size: Vector3::new(2.0, 2.0, 2.0),
            direction: RampDirection::PosX,
        }
        .emit(&mut out);

        assert_eq!(out.vertex_count(), 5);
        assert_eq!(out.face_count(), 2);
        let text = out.finish("t.mtl");
        assert!(text.ends_with("f 2 3 4 5\nf 5 4 3 2\n"));
    }
}
