// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement kinds and their geometric classification

use std::fmt;

/// Placement kind, keyed by the document's integer `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum PrimitiveKind {
    Cube = 0,
    Crate = 1,
    Barrel = 2,
    Ladder = 3,
    Plane = 4,
    SpawnPoint = 5,
    CameraPosition = 6,
    Vehicle = 7,
    Stack = 8,
    Ramp = 9,
    ScoreZone = 10,
    Billboard = 11,
    DeathZone = 12,
    Particles = 13,
    Objective = 14,
    Tree = 15,
    Cone = 16,
    Container = 17,
    Grass = 18,
    ContainerR = 19,
    AcidBarrel = 20,
    Door = 21,
    Window = 22,
    Flag = 23,
    Water = 24,
    CheckPoint = 25,
    WeaponPickup = 26,
}

/// How a kind turns into geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Eight-corner box (cube, plane, water)
    Box,
    /// Four-corner sloped quad (ramp)
    Wedge,
    /// Instanced external mesh
    Model,
    /// Not rendered
    Unsupported,
}

impl PrimitiveKind {
    /// Every known kind, in id order
    pub const ALL: [PrimitiveKind; 27] = [
        Self::Cube,
        Self::Crate,
        Self::Barrel,
        Self::Ladder,
        Self::Plane,
        Self::SpawnPoint,
        Self::CameraPosition,
        Self::Vehicle,
        Self::Stack,
        Self::Ramp,
        Self::ScoreZone,
        Self::Billboard,
        Self::DeathZone,
        Self::Particles,
        Self::Objective,
        Self::Tree,
        Self::Cone,
        Self::Container,
        Self::Grass,
        Self::ContainerR,
        Self::AcidBarrel,
        Self::Door,
        Self::Window,
        Self::Flag,
        Self::Water,
        Self::CheckPoint,
        Self::WeaponPickup,
    ];

    /// Look up a kind by document id. Unknown ids yield `None`.
    #[inline]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Geometric classification of this kind
    pub fn shape(self) -> Shape {
        match self {
            Self::Cube | Self::Plane | Self::Water => Shape::Box,
            Self::Ramp => Shape::Wedge,
            Self::Crate
            | Self::Barrel
            | Self::Vehicle
            | Self::Stack
            | Self::Tree
            | Self::Cone
            | Self::Container
            | Self::Grass
            | Self::ContainerR
            | Self::AcidBarrel
            | Self::Door
            | Self::Window => Shape::Model,
            _ => Shape::Unsupported,
        }
    }

    /// Lowercase name used in logs and asset file names
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Crate => "crate",
            Self::Barrel => "barrel",
            Self::Ladder => "ladder",
            Self::Plane => "plane",
            Self::SpawnPoint => "spawn_point",
            Self::CameraPosition => "camera_position",
            Self::Vehicle => "vehicle",
            Self::Stack => "stack",
            Self::Ramp => "ramp",
            Self::ScoreZone => "score_zone",
            Self::Billboard => "billboard",
            Self::DeathZone => "death_zone",
            Self::Particles => "particles",
            Self::Objective => "objective",
            Self::Tree => "tree",
            Self::Cone => "cone",
            Self::Container => "container",
            Self::Grass => "grass",
            Self::ContainerR => "container_r",
            Self::AcidBarrel => "acid_barrel",
            Self::Door => "door",
            Self::Window => "window",
            Self::Flag => "flag",
            Self::Water => "water",
            Self::CheckPoint => "check_point",
            Self::WeaponPickup => "weapon_pickup",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_id(27), None);
        assert_eq!(PrimitiveKind::from_id(u32::MAX), None);
    }

    #[test]
    fn test_box_family_shares_shape() {
        assert_eq!(PrimitiveKind::Cube.shape(), Shape::Box);
        assert_eq!(PrimitiveKind::Plane.shape(), Shape::Box);
        assert_eq!(PrimitiveKind::Water.shape(), Shape::Box);
        assert_eq!(PrimitiveKind::Ramp.shape(), Shape::Wedge);
    }

    #[test]
    fn test_gameplay_kinds_unsupported() {
        for kind in [
            PrimitiveKind::SpawnPoint,
            PrimitiveKind::Ladder,
            PrimitiveKind::Billboard,
            PrimitiveKind::DeathZone,
            PrimitiveKind::WeaponPickup,
        ] {
            assert_eq!(kind.shape(), Shape::Unsupported, "{kind}");
        }
        assert_eq!(PrimitiveKind::Crate.shape(), Shape::Model);
        assert_eq!(PrimitiveKind::Window.shape(), Shape::Model);
    }
}
