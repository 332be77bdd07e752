//! Scene evaluation command.
//!
//! Loads a YAML scene, propagates world matrices from every root and prints
//! each node's local and world transform in traversal order.

use crate::scene_file::SceneFile;
use crate::EvalArgs;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use xform_scene::{NodeId, Scene};

/// One evaluated node, as written by `--json`.
#[derive(Debug, Serialize)]
struct NodeReport {
    id: u64,
    name: String,
    parent: Option<u64>,
    depth: usize,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<[f64; 16]>,
    world: [f64; 16],
    world_position: [f64; 3],
    world_quaternion: [f64; 4],
    world_scale: [f64; 3],
}

/// Runs the eval command.
pub fn run(args: EvalArgs, verbose: bool) -> Result<()> {
    let file = SceneFile::from_file(&args.input)
        .with_context(|| format!("Failed to load scene: {}", args.input.display()))?;
    debug!(nodes = file.node_count(), "scene file loaded");
    let (mut scene, roots) = file.build().context("Failed to build scene")?;

    scene.update_matrix_world();
    info!(nodes = scene.len(), roots = roots.len(), "scene evaluated");

    let reports = collect_reports(&scene, args.world_only)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_text(&reports, verbose);
    }
    Ok(())
}

fn collect_reports(scene: &Scene, world_only: bool) -> Result<Vec<NodeReport>> {
    scene
        .traverse_all()
        .into_iter()
        .map(|id| report(scene, id, world_only))
        .collect()
}

fn report(scene: &Scene, id: NodeId, world_only: bool) -> Result<NodeReport> {
    let node = scene.get(id).with_context(|| format!("node {id} vanished"))?;
    let (position, quaternion, scale) = node.matrix_world.decompose();

    Ok(NodeReport {
        id: id.raw(),
        name: node.name.clone(),
        parent: node.parent().map(NodeId::raw),
        depth: scene.ancestors(id).len(),
        visible: node.visible,
        local: (!world_only).then(|| node.matrix.to_array()),
        world: node.matrix_world.to_array(),
        world_position: position.to_array(),
        world_quaternion: quaternion.to_array(),
        world_scale: scale.to_array(),
    })
}

fn print_text(reports: &[NodeReport], verbose: bool) {
    for r in reports {
        let indent = "  ".repeat(r.depth);
        let name = if r.name.is_empty() { "<unnamed>" } else { r.name.as_str() };
        let hidden = if r.visible { "" } else { " (hidden)" };
        println!("{indent}{name} #{}{hidden}", r.id);

        let inner = format!("{indent}    ");
        if let Some(local) = r.local {
            println!("{indent}  local:");
            println!("{}", super::format_matrix(&xform_math::Matrix4::from_array(local), &inner));
        }
        println!("{indent}  world:");
        println!("{}", super::format_matrix(&xform_math::Matrix4::from_array(r.world), &inner));

        if verbose {
            let [px, py, pz] = r.world_position;
            let [qx, qy, qz, qw] = r.world_quaternion;
            let [sx, sy, sz] = r.world_scale;
            println!("{indent}  position:   ({px:.6}, {py:.6}, {pz:.6})");
            println!("{indent}  quaternion: ({qx:.6}, {qy:.6}, {qz:.6}, {qw:.6})");
            println!("{indent}  scale:      ({sx:.6}, {sy:.6}, {sz:.6})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_follow_traversal() {
        let yaml = "nodes:\n  - name: a\n    position: [1, 0, 0]\n    children:\n      - name: b\n        position: [0, 1, 0]\n";
        let (mut scene, _) = SceneFile::from_yaml_str(yaml).unwrap().build().unwrap();
        scene.update_matrix_world();

        let reports = collect_reports(&scene, false).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].name, "b");
        assert_eq!(reports[1].depth, 1);
        assert_eq!(reports[1].parent, Some(reports[0].id));
        assert_eq!(&reports[1].world[12..15], &[1.0, 1.0, 0.0]);
        assert_eq!(reports[1].local.map(|m| m[13]), Some(1.0));

        let world_only = collect_reports(&scene, true).unwrap();
        assert!(world_only.iter().all(|r| r.local.is_none()));
        let json = serde_json::to_string(&world_only).unwrap();
        assert!(!json.contains("\"local\""));
    }
}
