// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material synthesis from packed colors

use crate::wavefront::Num;
use levelobj_core::PackedColor;
use std::fmt::Write;

/// One `newmtl` block
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// `Kd`
    pub diffuse: Option<[f64; 3]>,
    /// `Ke`
    pub emissive: Option<[f64; 3]>,
    /// `Ka`
    pub ambient: Option<[f64; 3]>,
    /// `d`
    pub dissolve: Option<f64>,
    /// `map_Kd`
    pub diffuse_map: Option<String>,
}

impl Material {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: None,
            emissive: None,
            ambient: None,
            dissolve: None,
            diffuse_map: None,
        }
    }

    /// Plain diffuse color
    pub fn from_color(name: impl Into<String>, color: PackedColor) -> Self {
        Self {
            diffuse: Some(color.unit_rgb()),
            ..Self::named(name)
        }
    }

    /// Emissive material: diffuse, emissive and ambient all come from the
    /// emissive channel
    pub fn from_emissive(name: impl Into<String>, emissive: PackedColor) -> Self {
        let rgb = emissive.unit_rgb();
        Self {
            diffuse: Some(rgb),
            emissive: Some(rgb),
            ambient: Some(rgb),
            ..Self::named(name)
        }
    }

    /// White diffuse modulated by a texture
    pub fn textured(name: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            diffuse: Some([1.0, 1.0, 1.0]),
            diffuse_map: Some(texture.into()),
            ..Self::named(name)
        }
    }

    pub fn with_dissolve(mut self, opacity: f64) -> Self {
        self.dissolve = Some(opacity);
        self
    }

    /// Append the `newmtl` block to `out`
    pub fn write_to(&self, out: &mut String) {
        let _ = writeln!(out, "newmtl {}", self.name);
        let channels = [
            ("Kd", self.diffuse),
            ("Ke", self.emissive),
            ("Ka", self.ambient),
        ];
        for (key, value) in channels {
            if let Some([r, g, b]) = value {
                let _ = writeln!(out, "{key} {} {} {}", Num(r), Num(g), Num(b));
            }
        }
        if let Some(d) = self.dissolve {
            let _ = writeln!(out, "d {}", Num(d));
        }
        if let Some(map) = &self.diffuse_map {
            let _ = writeln!(out, "map_Kd {map}");
        }
    }
}

/// Color inputs of a placement, resolved before any material is named
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialStyle {
    Color {
        color: PackedColor,
        opacity: Option<f64>,
    },
    /// Emissive takes over every coefficient, the base color is ignored
    Emissive {
        emissive: PackedColor,
        opacity: Option<f64>,
    },
    /// Opacity without any color: a material carrying only `d`
    Dissolve { opacity: f64 },
}

impl MaterialStyle {
    /// `None` only when the placement has no color, emissive color or opacity
    pub fn resolve(
        color: Option<PackedColor>,
        emissive: Option<PackedColor>,
        opacity: Option<f64>,
    ) -> Option<Self> {
        match (color, emissive, opacity) {
            (_, Some(emissive), _) => Some(Self::Emissive { emissive, opacity }),
            (Some(color), None, _) => Some(Self::Color { color, opacity }),
            (None, None, Some(opacity)) => Some(Self::Dissolve { opacity }),
            (None, None, None) => None,
        }
    }

    pub fn into_material(self, name: impl Into<String>) -> Material {
        let (material, opacity) = match self {
            Self::Color { color, opacity } => (Material::from_color(name, color), opacity),
            Self::Emissive { emissive, opacity } => {
                (Material::from_emissive(name, emissive), opacity)
            }
            Self::Dissolve { opacity } => (Material::named(name), Some(opacity)),
        };
        match opacity {
            Some(d) => material.with_dissolve(d),
            None => material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(material: &Material) -> String {
        let mut out = String::new();
        material.write_to(&mut out);
        out
    }

    #[test]
    fn test_plain_color() {
        let color = PackedColor::from_hex("#00FF00").unwrap();
        let text = render(&Material::from_color("cmtl0", color));
        assert_eq!(text, "newmtl cmtl0\nKd 0 1 0\n");
    }

    #[test]
    fn test_hex_and_integer_give_same_diffuse() {
        let a = Material::from_color("a", PackedColor::from_hex("#FF0000").unwrap());
        let b = Material::from_color("a", PackedColor::new(16711680));
        assert_eq!(a, b);
        assert_eq!(a.diffuse, Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_emissive_dominates_all_coefficients() {
        let style = MaterialStyle::resolve(
            Some(PackedColor::new(0x0000FF)),
            Some(PackedColor::new(0xFF0000)),
            None,
        )
        .unwrap();
        let text = render(&style.into_material("cmtl3"));
        assert_eq!(text, "newmtl cmtl3\nKd 1 0 0\nKe 1 0 0\nKa 1 0 0\n");
    }

    #[test]
    fn test_dissolve_appended() {
        let style = MaterialStyle::resolve(Some(PackedColor::new(0xFFFFFF)), None, Some(0.25));
        let text = render(&style.unwrap().into_material("cmtl1"));
        assert_eq!(text, "newmtl cmtl1\nKd 1 1 1\nd 0.25\n");
    }

    #[test]
    fn test_opacity_alone_gives_dissolve_only_material() {
        let style = MaterialStyle::resolve(None, None, Some(0.5)).unwrap();
        assert_eq!(style, MaterialStyle::Dissolve { opacity: 0.5 });
        assert_eq!(render(&style.into_material("cmtl2")), "newmtl cmtl2\nd 0.5\n");
    }

    #[test]
    fn test_no_inputs_no_material() {
        assert_eq!(MaterialStyle::resolve(None, None, None), None);
    }

    #[test]
    fn test_textured() {
        let text = render(&Material::textured("crate_mtl", "textures/crate.png"));
        assert_eq!(text, "newmtl crate_mtl\nKd 1 1 1\nmap_Kd textures/crate.png\n");
    }
}
