//! Spawns and removes mesh entities for committed bricks.
//!
//! The engine owns the brick data; this module diffs its list against the
//! spawned meshes each frame, spawning bodies (plus stud children) for new
//! bricks and despawning meshes whose brick was deleted.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use engine::brick::{Brick, BrickId};
use engine::config::{STUD_HEIGHT, STUD_RADIUS, STUD_SPACING, UNIT};
use engine::placement::PlacementEngine;

/// Maps committed brick ids to their spawned mesh entities.
#[derive(Resource, Default)]
pub struct BrickMeshIndex(pub HashMap<BrickId, Entity>);

#[derive(Component)]
pub struct BrickMesh3d(pub BrickId);

/// Marker for the white back-face shell around the selected brick.
#[derive(Component)]
pub struct SelectionShell;

pub fn sync_brick_meshes(
    mut commands: Commands,
    engine: Res<PlacementEngine>,
    mut index: ResMut<BrickMeshIndex>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for brick in engine.bricks() {
        if index.0.contains_key(&brick.id) {
            continue;
        }
        let entity = spawn_brick_mesh(&mut commands, &mut meshes, &mut materials, brick);
        index.0.insert(brick.id, entity);
    }

    index.0.retain(|id, entity| {
        if engine.get(*id).is_some() {
            true
        } else {
            commands.entity(*entity).despawn_recursive();
            false
        }
    });
}

fn spawn_brick_mesh(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    brick: &Brick,
) -> Entity {
    let fp = brick.footprint();
    let height = brick.height();

    // Glossy ABS-plastic look.
    let material = materials.add(StandardMaterial {
        base_color: brick.color,
        perceptual_roughness: 0.3,
        metallic: 0.1,
        reflectance: 0.5,
        ..default()
    });

    let body = if brick.size.is_round() {
        meshes.add(Cylinder::new(UNIT / 2.0, height))
    } else {
        meshes.add(Cuboid::new(
            fp.width as f32 * UNIT,
            height,
            fp.length as f32 * UNIT,
        ))
    };

    let root = commands
        .spawn((
            BrickMesh3d(brick.id),
            Mesh3d(body),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(brick.position + Vec3::Y * (height / 2.0)),
        ))
        .id();

    // One stud per footprint cell, positioned relative to the body center.
    // The round 1x1 gets a single centered stud.
    let stud = meshes.add(Cylinder::new(STUD_RADIUS, STUD_HEIGHT));
    if brick.size.is_round() {
        let child = commands
            .spawn((
                Mesh3d(stud),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, height / 2.0 + STUD_HEIGHT / 2.0, 0.0),
            ))
            .id();
        commands.entity(root).add_child(child);
    } else {
        for i in 0..fp.width {
            for j in 0..fp.length {
                let x = (i as f32 - (fp.width as f32 - 1.0) / 2.0) * STUD_SPACING;
                let z = (j as f32 - (fp.length as f32 - 1.0) / 2.0) * STUD_SPACING;
                let child = commands
                    .spawn((
                        Mesh3d(stud.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_xyz(x, height / 2.0 + STUD_HEIGHT / 2.0, z),
                    ))
                    .id();
                commands.entity(root).add_child(child);
            }
        }
    }

    root
}

/// Keep a single highlight shell on whichever brick is selected.
pub fn update_selection_highlight(
    mut commands: Commands,
    engine: Res<PlacementEngine>,
    index: Res<BrickMeshIndex>,
    shells: Query<(Entity, &Parent), With<SelectionShell>>,
    brick_meshes: Query<&BrickMesh3d>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let selected = engine.selection();

    let mut shell_exists = false;
    for (shell, parent) in &shells {
        let still_selected = brick_meshes
            .get(parent.get())
            .is_ok_and(|mesh| Some(mesh.0) == selected);
        if still_selected {
            shell_exists = true;
        } else {
            commands.entity(shell).despawn();
        }
    }

    if shell_exists {
        return;
    }
    let Some(id) = selected else {
        return;
    };
    let (Some(brick), Some(&root)) = (engine.get(id), index.0.get(&id)) else {
        return;
    };

    let fp = brick.footprint();
    let height = brick.height();
    let shell_mesh = meshes.add(Cuboid::new(
        fp.width as f32 * UNIT * 1.05,
        height * 1.05,
        fp.length as f32 * UNIT * 1.05,
    ));
    let shell_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        // Front faces culled so the shell reads as an outline.
        cull_mode: Some(Face::Front),
        ..default()
    });
    let shell = commands
        .spawn((
            SelectionShell,
            Mesh3d(shell_mesh),
            MeshMaterial3d(shell_material),
            Transform::IDENTITY,
        ))
        .id();
    commands.entity(root).add_child(shell);
}
