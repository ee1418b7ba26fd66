// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # LevelObj Core
//!
//! Data model for game-level documents consumed by the LevelObj converter.
//!
//! ## Overview
//!
//! - **Documents**: [`LevelDocument`] is a level name plus an ordered list of [`Placement`]s
//! - **Kinds**: [`PrimitiveKind`] enumerates every placement id and classifies it by [`Shape`]
//! - **Colors**: [`PackedColor`] resolves hex-string and integer color encodings at parse time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use levelobj_core::{LevelDocument, Shape};
//!
//! let doc = LevelDocument::from_json(r#"{"name": "demo", "objects": [{"p": [0,0,0], "s": [1,1,1]}]}"#)?;
//! for placement in &doc.objects {
//!     if let Some(kind) = placement.kind() {
//!         println!("{} -> {:?}", kind, kind.shape());
//!     }
//! }
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod kind;

pub use color::PackedColor;
pub use document::{LevelDocument, Placement, RampDirection, Visibility};
pub use error::{Error, Result};
pub use kind::{PrimitiveKind, Shape};
