// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rotation utilities shared by primitive and model generation
//!
//! Rotations are given per placement as Euler angles `(rx, ry, rz)` in
//! radians and always applied as `Rz(Ry(Rx(v)))`.

use nalgebra::{Matrix3, Point3, Vector3};

/// Principal rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed rotation matrix about a single axis
pub fn rotation_matrix(axis: Axis, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ),
    }
}

/// Matrix-vector product `m * v`
#[inline]
pub fn apply_matrix(v: Vector3<f64>, m: &Matrix3<f64>) -> Vector3<f64> {
    m * v
}

/// Euler rotation applied X first, then Y, then Z
#[derive(Debug, Clone, Copy)]
pub struct EulerRotation {
    x: Matrix3<f64>,
    y: Matrix3<f64>,
    z: Matrix3<f64>,
}

impl EulerRotation {
    pub fn new(angles: [f64; 3]) -> Self {
        Self {
            x: rotation_matrix(Axis::X, angles[0]),
            y: rotation_matrix(Axis::Y, angles[1]),
            z: rotation_matrix(Axis::Z, angles[2]),
        }
    }

    pub fn identity() -> Self {
        Self::new([0.0; 3])
    }

    /// Rotate a vector as `Rz(Ry(Rx(v)))`
    #[inline]
    pub fn rotate(&self, v: Vector3<f64>) -> Vector3<f64> {
        apply_matrix(apply_matrix(apply_matrix(v, &self.x), &self.y), &self.z)
    }

    /// Rotate a point about `pivot`
    #[inline]
    pub fn rotate_about(&self, point: Point3<f64>, pivot: Point3<f64>) -> Point3<f64> {
        pivot + self.rotate(point - pivot)
    }
}

impl Default for EulerRotation {
    fn default() -> Self {
        Self::identity()
    }
}
