// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed set of mesh maps the pipeline bakes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::import::MeshMapUsage;

/// A baked texture channel derived from mesh geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeshMapKind {
    Normal,
    NormalWorldSpace,
    AmbientOcclusion,
    Curvature,
    Position,
}

impl MeshMapKind {
    /// Every kind, in bake order.
    pub const ALL: [MeshMapKind; 5] = [
        Self::Normal,
        Self::NormalWorldSpace,
        Self::AmbientOcclusion,
        Self::Curvature,
        Self::Position,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NormalWorldSpace => "normal-world-space",
            Self::AmbientOcclusion => "ambient-occlusion",
            Self::Curvature => "curvature",
            Self::Position => "position",
        }
    }

    /// Baking sub-command. World-space normals bake through the bare kind
    /// name; every other kind bakes through its `-from-mesh` variant.
    pub fn subcommand(self) -> String {
        match self {
            Self::NormalWorldSpace => self.name().to_string(),
            _ => format!("{}-from-mesh", self.name()),
        }
    }

    /// Whether the bake takes the antialiasing / low-def flag pair.
    /// World-space normals do not.
    pub fn refines_detail(self) -> bool {
        !matches!(self, Self::NormalWorldSpace)
    }

    /// Host texture-set slot this map binds to.
    pub fn usage(self) -> MeshMapUsage {
        match self {
            Self::Normal => MeshMapUsage::Normal,
            Self::NormalWorldSpace => MeshMapUsage::WorldSpaceNormal,
            Self::AmbientOcclusion => MeshMapUsage::AmbientOcclusion,
            Self::Curvature => MeshMapUsage::Curvature,
            Self::Position => MeshMapUsage::Position,
        }
    }
}

impl fmt::Display for MeshMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
