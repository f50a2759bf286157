// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for map kinds.

use super::*;

#[test]
fn bake_order_is_stable() {
    let names: Vec<&str> = MeshMapKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names, vec![
        "normal",
        "normal-world-space",
        "ambient-occlusion",
        "curvature",
        "position",
    ]);
}

#[yare::parameterized(
    normal = { MeshMapKind::Normal, "normal-from-mesh" },
    ao = { MeshMapKind::AmbientOcclusion, "ambient-occlusion-from-mesh" },
    curvature = { MeshMapKind::Curvature, "curvature-from-mesh" },
    position = { MeshMapKind::Position, "position-from-mesh" },
    world_space = { MeshMapKind::NormalWorldSpace, "normal-world-space" },
)]
fn subcommand_shape(kind: MeshMapKind, expected: &str) {
    assert_eq!(kind.subcommand(), expected);
}

#[test]
fn only_world_space_skips_detail_refinement() {
    for kind in MeshMapKind::ALL {
        assert_eq!(
            kind.refines_detail(),
            kind != MeshMapKind::NormalWorldSpace
        );
    }
}

#[test]
fn serializes_as_kind_name() {
    let json = serde_json::to_string(&MeshMapKind::NormalWorldSpace).unwrap();
    assert_eq!(json, "\"normal-world-space\"");
    let back: MeshMapKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, MeshMapKind::NormalWorldSpace);
}
