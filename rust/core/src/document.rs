// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level document and placement records
//!
//! Documents use the compact field names of Krunker-style map exports:
//!
//! | Field     | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `id`      | Placement kind (defaults to cube)         |
//! | `p`       | Position `[x, y, z]`                      |
//! | `s`       | Size `[x, y, z]`                          |
//! | `r`       | Euler rotation in radians                 |
//! | `d`       | Ramp direction code (0-3)                 |
//! | `c` / `e` | Color / emissive color (hex or integer)   |
//! | `opacity` | Dissolve factor                           |
//! | `v`       | Visibility flag (`1` hides the placement) |

use crate::color::PackedColor;
use crate::error::{Error, Result};
use crate::kind::PrimitiveKind;
use serde::{Deserialize, Serialize};

/// A parsed level: a name plus an ordered list of placements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDocument {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<Placement>,
}

impl LevelDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Parse a document from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: LevelDocument = serde_json::from_slice(bytes)?;
        tracing::debug!(
            name = %document.name,
            placements = document.objects.len(),
            "Parsed level document"
        );
        Ok(document)
    }
}

/// One positioned, sized object from the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Raw kind id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f64; 3]>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<i64>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<PackedColor>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<PackedColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl Placement {
    /// Kind id with the document default (cube) applied
    #[inline]
    pub fn kind_id(&self) -> u32 {
        self.id.unwrap_or(PrimitiveKind::Cube.id())
    }

    /// Resolved kind, or `None` for ids outside the known set
    #[inline]
    pub fn kind(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_id(self.kind_id())
    }

    /// True when the visibility flag hides this placement
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.visibility.is_some_and(Visibility::is_hidden)
    }

    /// Position, required for every rendered kind
    pub fn require_position(&self, index: usize) -> Result<[f64; 3]> {
        self.position.ok_or(Error::MissingField {
            index,
            kind: self.kind_name(),
            field: "p",
        })
    }

    /// Size, required for every rendered kind
    pub fn require_size(&self, index: usize) -> Result<[f64; 3]> {
        self.size.ok_or(Error::MissingField {
            index,
            kind: self.kind_name(),
            field: "s",
        })
    }

    /// Ramp direction; an absent code falls back to [`RampDirection::DEFAULT`]
    pub fn ramp_direction(&self, index: usize) -> Result<RampDirection> {
        match self.direction {
            None => Ok(RampDirection::DEFAULT),
            Some(code) => {
                RampDirection::from_code(code).ok_or(Error::InvalidDirection { index, code })
            }
        }
    }

    fn kind_name(&self) -> &'static str {
        self.kind().map_or("unknown", PrimitiveKind::name)
    }
}

/// Visibility flag; maps store it as `0`/`1` or occasionally as a boolean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visibility {
    Flag(i64),
    Bool(bool),
}

impl Visibility {
    #[inline]
    pub fn is_hidden(self) -> bool {
        matches!(self, Visibility::Flag(1) | Visibility::Bool(true))
    }
}

/// Direction a ramp rises towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampDirection {
    /// Code 0
    PosX,
    /// Code 1
    PosZ,
    /// Code 2
    NegX,
    /// Code 3
    NegZ,
}

impl RampDirection {
    /// Used when a ramp has no `d` field. Map exports omit it for ramps
    /// rising towards -Z.
    pub const DEFAULT: RampDirection = RampDirection::NegZ;

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::PosX),
            1 => Some(Self::PosZ),
            2 => Some(Self::NegX),
            3 => Some(Self::NegZ),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::PosX => 0,
            Self::PosZ => 1,
            Self::NegX => 2,
            Self::NegZ => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "name": "sample",
        "spawns": [[0, 0, 0]],
        "objects": [
            {"p": [0, 0, 0], "s": [2, 2, 2], "c": "#00FF00"},
            {"id": 9, "p": [1, 2, 3], "s": [4, 5, 6], "d": 1, "v": 1},
            {"id": 5, "p": [0, 10, 0]},
            {"id": 4, "p": [0, 0, 0], "s": [1, 1, 1], "r": [0, 1.5, 0], "e": 16711680, "opacity": 0.5}
        ]
    }"##;

    #[test]
    fn test_parse_sample_document() {
        let doc = LevelDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.name, "sample");
        assert_eq!(doc.objects.len(), 4);

        let cube = &doc.objects[0];
        assert_eq!(cube.kind(), Some(PrimitiveKind::Cube));
        assert_eq!(cube.color.map(PackedColor::packed), Some(0x00FF00));
        assert!(!cube.is_hidden());

        let ramp = &doc.objects[1];
        assert_eq!(ramp.kind(), Some(PrimitiveKind::Ramp));
        assert!(ramp.is_hidden());
        assert_eq!(ramp.ramp_direction(1).unwrap(), RampDirection::PosZ);

        let plane = &doc.objects[3];
        assert_eq!(plane.rotation, Some([0.0, 1.5, 0.0]));
        assert_eq!(plane.emissive.map(PackedColor::packed), Some(0xFF0000));
        assert_eq!(plane.opacity, Some(0.5));
    }

    #[test]
    fn test_spawn_point_without_size_parses() {
        let doc = LevelDocument::from_json(SAMPLE).unwrap();
        let spawn = &doc.objects[2];
        assert_eq!(spawn.kind(), Some(PrimitiveKind::SpawnPoint));
        assert!(matches!(
            spawn.require_size(2),
            Err(Error::MissingField { index: 2, field: "s", .. })
        ));
    }

    #[test]
    fn test_text_and_bytes_parse_identically() {
        let from_text = LevelDocument::from_json(SAMPLE).unwrap();
        let from_bytes = LevelDocument::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(from_text.name, from_bytes.name);
        assert_eq!(from_text.objects.len(), from_bytes.objects.len());
        assert_eq!(from_text.objects[3].rotation, from_bytes.objects[3].rotation);
        assert!(matches!(LevelDocument::from_slice(b"{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_wrong_arity_is_fatal() {
        let text = r#"{"name": "bad", "objects": [{"p": [0, 0], "s": [1, 1, 1]}]}"#;
        assert!(matches!(LevelDocument::from_json(text), Err(Error::Json(_))));
    }

    #[test]
    fn test_ramp_direction_policy() {
        let mut ramp = Placement {
            id: Some(9),
            ..Default::default()
        };
        assert_eq!(ramp.ramp_direction(0).unwrap(), RampDirection::NegZ);

        ramp.direction = Some(2);
        assert_eq!(ramp.ramp_direction(0).unwrap(), RampDirection::NegX);

        ramp.direction = Some(7);
        assert!(matches!(
            ramp.ramp_direction(4),
            Err(Error::InvalidDirection { index: 4, code: 7 })
        ));
    }

    #[test]
    fn test_boolean_visibility() {
        let text = r#"{"name": "v", "objects": [{"v": true}, {"v": 0}, {"v": false}]}"#;
        let doc = LevelDocument::from_json(text).unwrap();
        let hidden: Vec<bool> = doc.objects.iter().map(Placement::is_hidden).collect();
        assert_eq!(hidden, vec![true, false, false]);
    }
}
