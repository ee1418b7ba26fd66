// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Mixed primitives and cached model instances written into one OBJ stream

use approx::assert_relative_eq;
use levelobj_core::RampDirection;
use levelobj_geometry::{
    parse_obj, BoxPrimitive, MeshCache, ModelInstance, ObjOutput, Point3, Vector3,
    WedgePrimitive,
};
use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::sync::Arc;

const BARREL: &str = "\
# barrel, authored at 3 units wide and 6 tall
o barrel
v -1.5 0 -1.5
v 1.5 0 -1.5
v 1.5 0 1.5
v -1.5 0 1.5
v 0 6 0
vt 0 0
vt 1 0
vt 0.5 1
s off
f 1/1 2/2 5/3
f 2/1 3/2 5/3
f 3/1 4/2 5/3
f 4/1 1/2 5/3
";

#[test]
fn test_scene_references_resolve_and_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("barrel.obj");
    fs::write(&path, BARREL).unwrap();

    let cache = MeshCache::new();
    let barrel = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&barrel, &cache.get_or_load(&path).unwrap()));
    assert_eq!(cache.len(), 1);

    let mut out = ObjOutput::new();
    BoxPrimitive {
        position: Point3::new(0.0, 0.0, 0.0),
        size: Vector3::new(4.0, 2.0, 4.0),
        rotation: Some([0.0, FRAC_PI_2, 0.0]),
    }
    .emit(&mut out);
    WedgePrimitive {
        position: Point3::new(10.0, 0.0, 0.0),
        size: Vector3::new(2.0, 3.0, 2.0),
        direction: RampDirection::PosX,
    }
    .emit(&mut out);
    for x in [-10.0, -20.0] {
        ModelInstance {
            position: Point3::new(x, 1.0, 0.0),
            size: Vector3::new(1.5, 2.0, 1.5),
            rotation: [0.0; 3],
        }
        .emit(&barrel, "barrel_mtl", &mut out);
    }

    assert_eq!(out.vertex_count(), 8 + 4 + 5 + 5);
    assert_eq!(out.tex_coord_count(), 3 + 3);
    assert_eq!(out.face_count(), 6 + 2 + 4 + 4);

    let text = out.finish("scene.mtl");
    assert!(text.starts_with("mtllib scene.mtl\n"));

    let scene = parse_obj(&text).unwrap();
    assert!(scene.references_resolve());

    let (min, max) = scene.bounds();
    // Second barrel: normalized base spans [-1, 1] in x, apex at y = 1 + 2
    assert_relative_eq!(min.x, -21.0, epsilon = 1e-9);
    assert_relative_eq!(max.x, 11.0, epsilon = 1e-9);
    assert_relative_eq!(min.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(max.y, 3.0, epsilon = 1e-9);
}
