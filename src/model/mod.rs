//! Graph model: merge the parsed sources with the computed layouts into one
//! immutable snapshot.
//!
//! The conversation defines the canonical step order and the complete step
//! key set. Steps that only other files mention are left out of every
//! step-keyed map.

pub mod node;

use crate::config::LayoutConfig;
use crate::layout::{layout_timeline, layout_tree};
use crate::resolve::resolve_step;
use crate::source::{
    ConversationStep, MiniAppRun, RunId, RunIndex, RunLog, RunLogIndex, SourceFiles, StepId,
    StepLogIndex, parse_conversation, parse_mini_apps, parse_run_logs, parse_step_logs,
};
use node::{GraphEdge, GraphNode};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
    pub conversation_id: String,
    pub step_order: Vec<StepId>,
    pub steps_by_id: BTreeMap<StepId, ConversationStep>,
    pub step_logs_by_step_id: StepLogIndex,
    pub runs_by_step_id: RunIndex,
    /// All run logs, including ones no run refers to.
    pub run_logs_by_run_id: RunLogIndex,
    /// Resolved layer of every run, per step.
    pub run_depths_by_step_id: BTreeMap<StepId, BTreeMap<RunId, i64>>,

    pub step_nodes: Vec<GraphNode>,
    pub step_edges: Vec<GraphEdge>,
    pub run_nodes_by_step_id: BTreeMap<StepId, Vec<GraphNode>>,
    pub run_edges_by_step_id: BTreeMap<StepId, Vec<GraphEdge>>,
}

impl GraphModel {
    pub fn step(&self, step_id: &str) -> Option<&ConversationStep> {
        self.steps_by_id.get(step_id)
    }

    pub fn step_logs(&self, step_id: &str) -> &[Value] {
        self.step_logs_by_step_id
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn runs(&self, step_id: &str) -> &[MiniAppRun] {
        self.runs_by_step_id
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn run_log(&self, run_id: &str) -> Option<&RunLog> {
        self.run_logs_by_run_id.get(run_id)
    }

    pub fn run_nodes(&self, step_id: &str) -> &[GraphNode] {
        self.run_nodes_by_step_id
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn run_edges(&self, step_id: &str) -> &[GraphEdge] {
        self.run_edges_by_step_id
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Build the graph model. Pure: identical inputs give identical snapshots.
pub fn build_graph_model(files: &SourceFiles, cfg: &LayoutConfig) -> GraphModel {
    let conversation = parse_conversation(&files.conversation);
    let mut step_logs = parse_step_logs(files.step_logs.as_ref());
    let mut runs = parse_mini_apps(files.mini_apps.as_ref());
    let run_logs = parse_run_logs(files.run_logs.as_ref());

    let step_order: Vec<StepId> = conversation
        .steps
        .iter()
        .map(|s| s.step_id.clone())
        .collect();
    let known: BTreeSet<&str> = step_order.iter().map(String::as_str).collect();

    retain_known_steps(&mut step_logs, &known, "step logs");
    retain_known_steps(&mut runs, &known, "mini-app runs");

    let steps_by_id: BTreeMap<StepId, ConversationStep> = conversation
        .steps
        .iter()
        .map(|s| (s.step_id.clone(), s.clone()))
        .collect();

    let (step_nodes, step_edges) = layout_timeline(&conversation.steps, &cfg.timeline);

    let mut run_depths_by_step_id = BTreeMap::new();
    let mut run_nodes_by_step_id = BTreeMap::new();
    let mut run_edges_by_step_id = BTreeMap::new();
    for (step_id, step_runs) in &runs {
        let layering = resolve_step(step_runs);
        let tree = layout_tree(
            step_id,
            steps_by_id.get(step_id),
            step_runs,
            &layering,
            &cfg.tree,
        );
        debug!(
            step_id = %step_id,
            runs = step_runs.len(),
            columns = layering.rows.len(),
            has_dependencies = layering.has_dependencies,
            "laid out mini-app tree"
        );

        run_depths_by_step_id.insert(
            step_id.clone(),
            layering
                .depths
                .iter()
                .map(|(id, d)| (id.to_string(), *d))
                .collect(),
        );
        run_nodes_by_step_id.insert(step_id.clone(), tree.nodes);
        run_edges_by_step_id.insert(step_id.clone(), tree.edges);
    }

    GraphModel {
        conversation_id: conversation.conversation_id,
        step_order,
        steps_by_id,
        step_logs_by_step_id: step_logs,
        runs_by_step_id: runs,
        run_logs_by_run_id: run_logs,
        run_depths_by_step_id,
        step_nodes,
        step_edges,
        run_nodes_by_step_id,
        run_edges_by_step_id,
    }
}

fn retain_known_steps<V>(index: &mut BTreeMap<StepId, V>, known: &BTreeSet<&str>, what: &str) {
    index.retain(|step_id, _| {
        let keep = known.contains(step_id.as_str());
        if !keep {
            warn!(step_id = %step_id, source = what, "step not in conversation; ignored");
        }
        keep
    });
}
