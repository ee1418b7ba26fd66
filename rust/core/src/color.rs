// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Packed 24-bit RGB colors
//!
//! Level documents store colors either as hex strings (`"#FF0000"`, `"00ff00"`)
//! or as plain integers (`16711680`). Both are resolved into a [`PackedColor`]
//! while the document is deserialized, so nothing downstream branches on the
//! encoding.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 24-bit RGB value packed as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawColor", into = "u32")]
pub struct PackedColor(u32);

impl PackedColor {
    /// Create from a packed integer. Bits above the low 24 are kept but
    /// ignored by the channel accessors.
    #[inline]
    pub const fn new(packed: u32) -> Self {
        Self(packed)
    }

    /// Parse a hex color with optional leading `#`
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        // Digits only; no sign
        let all_hex = digits.bytes().all(|b| b.is_ascii_hexdigit());
        if digits.is_empty() || digits.len() > 6 || !all_hex {
            return Err(Error::InvalidColor(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| Error::InvalidColor(text.to_string()))
    }

    /// Raw packed value
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Byte channels `(R, G, B)`
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        ]
    }

    /// Channels scaled to `0.0..=1.0`
    #[inline]
    pub fn unit_rgb(self) -> [f64; 3] {
        let [r, g, b] = self.channels();
        [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]
    }
}

impl From<PackedColor> for u32 {
    fn from(color: PackedColor) -> Self {
        color.0
    }
}

/// Wire form of a color field before resolution
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Packed(u32),
    Hex(String),
}

impl TryFrom<RawColor> for PackedColor {
    type Error = Error;

    fn try_from(raw: RawColor) -> Result<Self> {
        match raw {
            RawColor::Packed(value) => Ok(Self(value)),
            RawColor::Hex(text) => Self::from_hex(&text),
        }
    }
}
