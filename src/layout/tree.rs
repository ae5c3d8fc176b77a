//! Mini-app tree of a single step.
//!
//! Depths map to columns (`depth * column_width`). Each column is centred
//! against the tallest one, and the synthetic root sits in the leftmost
//! column at the vertical centre.

use crate::config::TreeConfig;
use crate::layout::truncate_chars;
use crate::model::node::{
    EdgeKind, GraphEdge, GraphNode, NodeData, Position, Tone, root_node_id, run_node_id,
};
use crate::resolve::Layering;
use crate::source::{ConversationStep, MiniAppRun};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepTree {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

pub fn layout_tree(
    step_id: &str,
    step: Option<&ConversationStep>,
    runs: &[MiniAppRun],
    layering: &Layering<'_>,
    cfg: &TreeConfig,
) -> StepTree {
    let max_rows = layering.max_rows() as f64;
    let root_id = root_node_id(step_id);

    let user_text = step.map(|s| s.user_text.as_str()).unwrap_or_default();
    let subtitle = match truncate_chars(user_text, cfg.subtitle_chars) {
        s if s.is_empty() => "Mini-app tree".to_string(),
        s => s,
    };

    let mut nodes = Vec::with_capacity(runs.len() + 1);
    nodes.push(GraphNode {
        id: root_id.clone(),
        position: Position::new(
            cfg.root_x,
            cfg.baseline_y + (max_rows - 1.0) * cfg.row_height / 2.0,
        ),
        data: NodeData::Step {
            step_id: step_id.to_string(),
            label: format!("Step {step_id}"),
            subtitle,
            meta: format!("{} mini-apps", runs.len()),
            tone: Tone::Slate,
        },
    });

    for (&depth, row) in &layering.rows {
        let top = cfg.baseline_y + (max_rows - row.len() as f64) * cfg.row_height / 2.0;
        for (idx, run) in row.iter().enumerate() {
            nodes.push(GraphNode {
                id: run_node_id(step_id, &run.run_id),
                position: Position::new(
                    depth as f64 * cfg.column_width,
                    top + idx as f64 * cfg.row_height,
                ),
                data: NodeData::Run {
                    step_id: step_id.to_string(),
                    run_id: run.run_id.clone(),
                    label: run.name.replace('_', " "),
                    subtitle: run.run_id.clone(),
                    meta: match run.order {
                        Some(order) if order != 0 => format!("order {order}"),
                        _ => String::new(),
                    },
                    tone: Tone::cycle(idx),
                },
            });
        }
    }

    let edges = if layering.has_dependencies {
        dependency_edges(step_id, &root_id, runs, layering)
    } else {
        chain_edges(step_id, &root_id, runs)
    };

    StepTree { nodes, edges }
}

/// Root fans out to runs without valid parents; every valid parent gets its
/// own incoming edge.
fn dependency_edges(
    step_id: &str,
    root_id: &str,
    runs: &[MiniAppRun],
    layering: &Layering<'_>,
) -> Vec<GraphEdge> {
    let mut edges = Vec::new();
    for run in runs {
        let target = run_node_id(step_id, &run.run_id);
        let parents = layering.valid_parents(&run.run_id);
        if parents.is_empty() {
            edges.push(GraphEdge {
                id: format!("e-root:{step_id}->{}", run.run_id),
                source: root_id.to_string(),
                target,
                kind: EdgeKind::Root,
                animated: false,
            });
            continue;
        }
        for parent in parents {
            edges.push(GraphEdge {
                id: format!("e-run:{step_id}:{parent}->{}", run.run_id),
                source: run_node_id(step_id, parent),
                target: target.clone(),
                kind: EdgeKind::Dependency,
                animated: false,
            });
        }
    }
    edges
}

/// Root -> first run, then each run to the next in order.
fn chain_edges(step_id: &str, root_id: &str, runs: &[MiniAppRun]) -> Vec<GraphEdge> {
    let mut edges = Vec::with_capacity(runs.len());
    if let Some(first) = runs.first() {
        edges.push(GraphEdge {
            id: format!("e-root:{step_id}->{}", first.run_id),
            source: root_id.to_string(),
            target: run_node_id(step_id, &first.run_id),
            kind: EdgeKind::Root,
            animated: false,
        });
    }
    for pair in runs.windows(2) {
        let (prev, next) = (&pair[0].run_id, &pair[1].run_id);
        edges.push(GraphEdge {
            id: format!("e-run:{step_id}:{prev}->{next}"),
            source: run_node_id(step_id, prev),
            target: run_node_id(step_id, next),
            kind: EdgeKind::Chain,
            animated: false,
        });
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_step;
    use pretty_assertions::assert_eq;

    fn run(id: &str, order: Option<i64>, deps: &[&str]) -> MiniAppRun {
        MiniAppRun {
            run_id: id.to_string(),
            name: format!("{id}_app"),
            order,
            depends_on: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn position_of(tree: &StepTree, id: &str) -> Position {
        tree.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.position)
            .unwrap()
    }

    fn build(runs: &[MiniAppRun]) -> StepTree {
        let layering = resolve_step(runs);
        layout_tree("s2", None, runs, &layering, &TreeConfig::default())
    }

    #[test]
    fn columns_are_centred_against_the_tallest() {
        let runs = vec![
            run("r1", Some(1), &[]),
            run("r2", Some(2), &["r1"]),
            run("r3", Some(3), &["r1"]),
            run("r4", Some(4), &["r2", "r3"]),
        ];
        let tree = build(&runs);

        assert_eq!(tree.nodes.len(), 5);
        assert_eq!(position_of(&tree, "runroot:s2"), Position::new(24.0, 185.0));
        assert_eq!(position_of(&tree, "run:s2:r1"), Position::new(320.0, 185.0));
        assert_eq!(position_of(&tree, "run:s2:r2"), Position::new(640.0, 110.0));
        assert_eq!(position_of(&tree, "run:s2:r3"), Position::new(640.0, 260.0));
        assert_eq!(position_of(&tree, "run:s2:r4"), Position::new(960.0, 185.0));
    }

    #[test]
    fn multi_parent_run_gets_one_dashed_edge_per_parent() {
        let runs = vec![
            run("r1", Some(1), &[]),
            run("r2", Some(2), &["r1"]),
            run("r3", Some(3), &["r1"]),
            run("r4", Some(4), &["r2", "r3"]),
        ];
        let tree = build(&runs);

        let into_r4: Vec<_> = tree
            .edges
            .iter()
            .filter(|e| e.target == "run:s2:r4")
            .map(|e| (e.source.as_str(), e.kind))
            .collect();
        assert_eq!(
            into_r4,
            vec![
                ("run:s2:r2", EdgeKind::Dependency),
                ("run:s2:r3", EdgeKind::Dependency)
            ]
        );
        assert!(tree.edges.iter().filter(|e| e.target == "run:s2:r4").all(|e| e.kind.is_dashed()));

        let roots: Vec<_> = tree
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Root)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(roots, vec!["e-root:s2->r1"]);
    }

    #[test]
    fn dependency_free_step_is_a_chain() {
        let runs = vec![run("a", Some(1), &[]), run("b", Some(2), &[]), run("c", None, &[])];
        let tree = build(&runs);

        let ids: Vec<_> = tree.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e-root:s2->a", "e-run:s2:a->b", "e-run:s2:b->c"]);
        assert_eq!(tree.edges[1].kind, EdgeKind::Chain);
        assert_eq!(position_of(&tree, "run:s2:b").x, 640.0);
    }

    #[test]
    fn root_payload_falls_back_when_step_has_no_text() {
        let runs = vec![run("a", Some(0), &[])];
        let tree = build(&runs);

        match &tree.nodes[0].data {
            NodeData::Step { subtitle, meta, .. } => {
                assert_eq!(subtitle, "Mini-app tree");
                assert_eq!(meta, "1 mini-apps");
            }
            other => panic!("unexpected payload {other:?}"),
        }
        match &tree.nodes[1].data {
            NodeData::Run { label, meta, subtitle, .. } => {
                assert_eq!(label, "a app");
                assert_eq!(meta, "");
                assert_eq!(subtitle, "a");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
