//! Render-ready node and edge shapes shared by both graph views.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Colour family a renderer may use for a node card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Slate,
    Amber,
    Cyan,
    Mint,
    Violet,
}

impl Tone {
    pub const PALETTE: [Tone; 5] = [Tone::Slate, Tone::Amber, Tone::Cyan, Tone::Mint, Tone::Violet];

    /// Palette entry for the `idx`-th item, wrapping around.
    pub fn cycle(idx: usize) -> Self {
        Self::PALETTE[idx % Self::PALETTE.len()]
    }
}

/// Node payload: either a conversation step or a mini-app run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NodeData {
    Step {
        step_id: String,
        label: String,
        subtitle: String,
        meta: String,
        tone: Tone,
    },
    Run {
        step_id: String,
        run_id: String,
        label: String,
        subtitle: String,
        meta: String,
        tone: Tone,
    },
}

impl NodeData {
    pub fn step_id(&self) -> &str {
        match self {
            NodeData::Step { step_id, .. } | NodeData::Run { step_id, .. } => step_id,
        }
    }

    pub fn run_id(&self) -> Option<&str> {
        match self {
            NodeData::Step { .. } => None,
            NodeData::Run { run_id, .. } => Some(run_id),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeData::Step { label, .. } | NodeData::Run { label, .. } => label,
        }
    }

    pub fn is_step(&self) -> bool {
        matches!(self, NodeData::Step { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

/// What an edge represents; renderers style on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Consecutive conversation steps.
    Timeline,
    /// Synthetic step root to a run with no valid parent.
    Root,
    /// Declared dependency between two runs.
    Dependency,
    /// Sequential link in a dependency-free step.
    Chain,
}

impl EdgeKind {
    pub fn is_dashed(self) -> bool {
        matches!(self, EdgeKind::Dependency)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub animated: bool,
}

pub fn step_node_id(step_id: &str) -> String {
    format!("step:{step_id}")
}

pub fn root_node_id(step_id: &str) -> String {
    format!("runroot:{step_id}")
}

pub fn run_node_id(step_id: &str, run_id: &str) -> String {
    format!("run:{step_id}:{run_id}")
}
