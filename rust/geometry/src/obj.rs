// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront mesh loader
//!
//! Reads `v`, `vt`, `vn` and `f` directives; everything else (`usemtl`,
//! `mtllib`, groups, smoothing, comments) is skipped. Output written by
//! [`crate::wavefront::ObjOutput`] loads back through the same parser.

use crate::error::{Error, Result};
use crate::mesh::{Face, FaceVertex, LoadedMesh};
use nalgebra::{Point3, Vector3};
use std::path::Path;

/// Directive keyword; longer prefixes are matched before `v`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    TexCoord,
    Normal,
    Vertex,
    Face,
}

impl Directive {
    fn classify(keyword: &str) -> Option<Self> {
        match keyword {
            "vt" => Some(Self::TexCoord),
            "vn" => Some(Self::Normal),
            "v" => Some(Self::Vertex),
            "f" => Some(Self::Face),
            _ => None,
        }
    }
}

/// Load and normalize a mesh asset
pub fn load_obj(path: &Path) -> Result<LoadedMesh> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(&text)?.normalized();

    tracing::debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        tex_coords = mesh.tex_coord_count(),
        faces = mesh.face_count(),
        "Loaded mesh asset"
    );

    Ok(mesh)
}

/// Parse Wavefront text without normalizing
pub fn parse_obj(text: &str) -> Result<LoadedMesh> {
    let mut mesh = LoadedMesh::new();

    for (line_index, raw) in text.lines().enumerate() {
        let line_no = line_index + 1;
        let mut fields = raw.split_whitespace();
        let Some(directive) = fields.next().and_then(Directive::classify) else {
            continue;
        };

        match directive {
            Directive::TexCoord => {
                let [u, v, w] = parse_floats(fields, line_no, 2)?;
                mesh.tex_coords.push(Vector3::new(u, v, w));
            }
            Directive::Normal => {
                let [x, y, z] = parse_floats(fields, line_no, 3)?;
                mesh.normals.push(Vector3::new(x, y, z));
            }
            Directive::Vertex => {
                let [x, y, z] = parse_floats(fields, line_no, 3)?;
                mesh.positions.push(Point3::new(x, y, z));
            }
            Directive::Face => {
                let face = fields
                    .map(|group| parse_face_vertex(group, line_no))
                    .collect::<Result<Face>>()?;
                if face.len() < 3 {
                    return Err(Error::parse(
                        line_no,
                        format!("face has {} references, need at least 3", face.len()),
                    ));
                }
                mesh.faces.push(face);
            }
        }
    }

    Ok(mesh)
}

/// Up to three floats; components past `required` default to zero
fn parse_floats<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
    required: usize,
) -> Result<[f64; 3]> {
    let mut out = [0.0; 3];
    let mut count = 0;
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = fast_float::parse::<f64, _>(field)
            .map_err(|_| Error::parse(line, format!("invalid number '{field}'")))?;
        count += 1;
    }
    if count < required {
        return Err(Error::parse(
            line,
            format!("expected {required} components, found {count}"),
        ));
    }
    Ok(out)
}

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn parse_face_vertex(group: &str, line: usize) -> Result<FaceVertex> {
    let mut parts = group.split('/');
    let vertex = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::parse(line, format!("face reference '{group}' has no vertex")))
        .and_then(|s| parse_index(s, line))?;
    let texture = parse_optional_index(parts.next(), line)?;
    let normal = parse_optional_index(parts.next(), line)?;
    Ok(FaceVertex::new(vertex, texture, normal))
}

fn parse_optional_index(part: Option<&str>, line: usize) -> Result<Option<u32>> {
    match part {
        None | Some("") => Ok(None),
        Some(s) => parse_index(s, line).map(Some),
    }
}

fn parse_index(text: &str, line: usize) -> Result<u32> {
    match lexical_core::parse::<u32>(text.as_bytes()) {
        Ok(0) | Err(_) => Err(Error::parse(
            line,
            format!("invalid face index '{text}' (expected 1-based positive integer)"),
        )),
        Ok(index) => Ok(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const QUAD: &str = "\
# exported crate
mtllib crate.mtl
o Crate
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 2.0 1.0
v -1.0 2.0 1.0
vt 0.0 0.0
vt 1.0 0.0 0.5
vt 1.0 1.0
vn 0.0 1.0 0.0
usemtl crate_mtl
s off
f 1/1/1 2/2/1 3/3/1 4/1/1
f 1//1 2//1 3//1
f 4 3 2
";

    #[test]
    fn test_parse_directives() {
        let mesh = parse_obj(QUAD).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.tex_coord_count(), 3);
        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.face_count(), 3);

        assert_eq!(mesh.tex_coords[0], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.tex_coords[1], Vector3::new(1.0, 0.0, 0.5));

        // polygon kept intact
        assert_eq!(mesh.faces[0].len(), 4);
        assert_eq!(mesh.faces[0][3], FaceVertex::new(4, Some(1), Some(1)));
        assert_eq!(mesh.faces[1][0], FaceVertex::new(1, None, Some(1)));
        assert_eq!(mesh.faces[2][0], FaceVertex::new(4, None, None));
        assert!(mesh.references_resolve());
    }

    #[test]
    fn test_vt_not_mistaken_for_vertex() {
        let mesh = parse_obj("vt 0.5 0.5\nvn 0 0 1\n").unwrap();
        assert!(mesh.positions.is_empty());
        assert_eq!(mesh.tex_coord_count(), 1);
        assert_eq!(mesh.normals.len(), 1);
    }

    #[test]
    fn test_malformed_lines_report_line_number() {
        let err = parse_obj("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(matches!(err, Error::MeshParse { line: 2, .. }), "{err}");

        let err = parse_obj("v 0 0\n").unwrap_err();
        assert!(matches!(err, Error::MeshParse { line: 1, .. }), "{err}");

        let err = parse_obj("v 0 0 0\nf 1 0 1\n").unwrap_err();
        assert!(matches!(err, Error::MeshParse { line: 2, .. }), "{err}");

        let err = parse_obj("f 1 2\n").unwrap_err();
        assert!(matches!(err, Error::MeshParse { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_load_obj_normalizes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(QUAD.as_bytes()).unwrap();

        let mesh = load_obj(file.path()).unwrap();
        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.y, 0.0);
        assert_relative_eq!(max.y, 1.0);
        assert_relative_eq!(max.x, 1.0);
        assert_relative_eq!(max.z, 1.0);
    }

    #[test]
    fn test_missing_asset_is_io_error() {
        let err = load_obj(Path::new("/nonexistent/levelobj/model.obj")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
