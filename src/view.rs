//! Presentation overlays over a finished [`GraphModel`].
//!
//! Nothing here mutates the model: orientation, selection highlighting and
//! manual position overrides only decorate a borrowed view of it.

use crate::layout::{Orientation, reflow};
use crate::model::GraphModel;
use crate::model::node::{GraphEdge, GraphNode, NodeData, Position};
use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// What the user has focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Step {
        step_id: String,
    },
    Run {
        step_id: String,
        run_id: String,
    },
}

impl Selection {
    pub fn step_id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Step { step_id } | Selection::Run { step_id, .. } => Some(step_id),
        }
    }

    pub fn run_id(&self) -> Option<&str> {
        match self {
            Selection::Run { run_id, .. } => Some(run_id),
            _ => None,
        }
    }

    /// Step whose nodes are highlighted: the selected one, else the first
    /// step of the conversation.
    pub fn active_step<'a>(&'a self, model: &'a GraphModel) -> Option<&'a str> {
        self.step_id()
            .or_else(|| model.step_order.first().map(String::as_str))
    }

    /// `(active, muted)` flags for a node when `active_step` is highlighted.
    pub fn highlight(&self, active_step: Option<&str>, data: &NodeData) -> (bool, bool) {
        let Some(step_id) = active_step else {
            return (false, false);
        };
        let same_step = data.step_id() == step_id;
        let active = match data.run_id() {
            None => same_step,
            Some(run_id) => same_step && self.run_id().is_none_or(|r| r == run_id),
        };
        (active, !active)
    }
}

/// Parses `step` or `step/run`.
impl FromStr for Selection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Selection::None);
        }
        match s.split_once('/') {
            None => Ok(Selection::Step {
                step_id: s.to_string(),
            }),
            Some((step, run)) if !step.is_empty() && !run.is_empty() => Ok(Selection::Run {
                step_id: step.to_string(),
                run_id: run.to_string(),
            }),
            Some(_) => bail!("selection must look like <step> or <step>/<run>: {s:?}"),
        }
    }
}

/// Manually placed nodes, keyed by node id. Ids missing from a view are ignored.
pub type PositionOverrides = BTreeMap<String, Position>;

/// Which of the two graphs to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Steps,
    MiniApps { step_id: String },
}

#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub orientation: Orientation,
    pub selection: Selection,
    pub overrides: PositionOverrides,
    pub margin: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedNode<'a> {
    pub id: &'a str,
    pub position: Position,
    pub data: &'a NodeData,
    pub active: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedView<'a> {
    pub nodes: Vec<RenderedNode<'a>>,
    pub edges: &'a [GraphEdge],
}

pub fn render_view<'a>(
    model: &'a GraphModel,
    mode: &ViewMode,
    opts: &ViewOptions,
) -> RenderedView<'a> {
    let (nodes, edges): (&[GraphNode], &[GraphEdge]) = match mode {
        ViewMode::Steps => (model.step_nodes.as_slice(), model.step_edges.as_slice()),
        ViewMode::MiniApps { step_id } => (model.run_nodes(step_id), model.run_edges(step_id)),
    };

    let computed: Vec<Position> = nodes.iter().map(|n| n.position).collect();
    let positions = reflow(&computed, opts.orientation, opts.margin);
    let active_step = opts.selection.active_step(model);

    let nodes = nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| {
            let (active, muted) = opts.selection.highlight(active_step, &node.data);
            RenderedNode {
                id: &node.id,
                position: opts.overrides.get(&node.id).copied().unwrap_or(position),
                data: &node.data,
                active,
                muted,
            }
        })
        .collect();

    RenderedView { nodes, edges }
}

/// How interesting a step's mini-app tree is to look at: entry runs count
/// once, merge runs twice, and larger trees get a small bonus.
pub fn tree_score(model: &GraphModel, step_id: &str) -> f64 {
    let runs = model.runs(step_id);
    if runs.is_empty() {
        return 0.0;
    }
    let roots = runs.iter().filter(|r| r.depends_on.is_empty()).count();
    let merges = runs.iter().filter(|r| r.depends_on.len() > 1).count();
    roots as f64 + merges as f64 * 2.0 + runs.len().saturating_sub(2) as f64 * 0.1
}

/// First step in conversation order with the highest [`tree_score`].
pub fn best_tree_step(model: &GraphModel) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for step_id in &model.step_order {
        let score = tree_score(model, step_id);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((step_id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Step whose mini-app tree to show when none is named explicitly.
///
/// A selected run keeps its step. A selected step is kept only when its tree
/// scores above 1; otherwise, and with nothing selected, the richest tree wins.
pub fn mini_app_step<'a>(model: &'a GraphModel, selection: &'a Selection) -> Option<&'a str> {
    match selection {
        Selection::Run { step_id, .. } => Some(step_id.as_str()),
        Selection::Step { step_id } if tree_score(model, step_id) > 1.0 => Some(step_id.as_str()),
        _ => best_tree_step(model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::Tone;
    use pretty_assertions::assert_eq;

    fn run_data(step: &str, run: &str) -> NodeData {
        NodeData::Run {
            step_id: step.into(),
            run_id: run.into(),
            label: String::new(),
            subtitle: String::new(),
            meta: String::new(),
            tone: Tone::Slate,
        }
    }

    fn step_data(step: &str) -> NodeData {
        NodeData::Step {
            step_id: step.into(),
            label: String::new(),
            subtitle: String::new(),
            meta: String::new(),
            tone: Tone::Slate,
        }
    }

    #[test]
    fn parses_selection() {
        assert_eq!("".parse::<Selection>().unwrap(), Selection::None);
        assert_eq!(
            "s1".parse::<Selection>().unwrap(),
            Selection::Step { step_id: "s1".into() }
        );
        assert_eq!(
            "s1/r2".parse::<Selection>().unwrap(),
            Selection::Run {
                step_id: "s1".into(),
                run_id: "r2".into()
            }
        );
        assert!("s1/".parse::<Selection>().is_err());
    }

    #[test]
    fn nothing_active_highlights_nothing() {
        assert_eq!(Selection::None.highlight(None, &step_data("s1")), (false, false));
    }

    #[test]
    fn step_selection_activates_step_and_its_runs() {
        let sel = Selection::Step { step_id: "s1".into() };
        let active = sel.step_id();
        assert_eq!(sel.highlight(active, &step_data("s1")), (true, false));
        assert_eq!(sel.highlight(active, &step_data("s2")), (false, true));
        assert_eq!(sel.highlight(active, &run_data("s1", "r1")), (true, false));
        assert_eq!(sel.highlight(active, &run_data("s2", "r1")), (false, true));
    }

    #[test]
    fn run_selection_activates_only_that_run() {
        let sel = Selection::Run {
            step_id: "s1".into(),
            run_id: "r1".into(),
        };
        let active = sel.step_id();
        assert_eq!(sel.highlight(active, &run_data("s1", "r1")), (true, false));
        assert_eq!(sel.highlight(active, &run_data("s1", "r2")), (false, true));
        assert_eq!(sel.highlight(active, &step_data("s1")), (true, false));
    }
}
