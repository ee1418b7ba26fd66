// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LevelObj Geometry Processing
//!
//! Turns level placements into Wavefront geometry: box and wedge primitives,
//! instanced catalog meshes, and color materials. Rotations use nalgebra.

pub mod cache;
pub mod error;
pub mod instance;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod transform;
pub mod wavefront;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Point3, Vector3};

pub use cache::MeshCache;
pub use error::{Error, Result};
pub use instance::{ModelInstance, MODEL_AUTHORING_SCALE};
pub use material::{Material, MaterialStyle};
pub use mesh::{Face, FaceVertex, LoadedMesh};
pub use obj::{load_obj, parse_obj};
pub use primitives::{BoxPrimitive, WedgePrimitive, BOX_FACES, WEDGE_FACES};
pub use transform::{apply_matrix, rotation_matrix, Axis, EulerRotation};
pub use wavefront::{MtlOutput, Num, ObjOutput};
