use crate::config::TimelineConfig;
use crate::layout::truncate_chars;
use crate::model::node::{
    EdgeKind, GraphEdge, GraphNode, NodeData, Position, Tone, step_node_id,
};
use crate::source::ConversationStep;

/// Lay conversation steps out left to right.
///
/// Odd-indexed steps drop by `zigzag_y`; every edge with an even pair index
/// is animated.
pub fn layout_timeline(
    steps: &[ConversationStep],
    cfg: &TimelineConfig,
) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let nodes = steps
        .iter()
        .enumerate()
        .map(|(idx, step)| GraphNode {
            id: step_node_id(&step.step_id),
            position: Position::new(
                idx as f64 * cfg.spacing_x,
                cfg.baseline_y + (idx % 2) as f64 * cfg.zigzag_y,
            ),
            data: NodeData::Step {
                step_id: step.step_id.clone(),
                label: format!("Step {}", step.step_id),
                subtitle: truncate_chars(&step.user_text, cfg.subtitle_chars),
                meta: step.ts.clone().unwrap_or_default(),
                tone: Tone::cycle(idx),
            },
        })
        .collect();

    let edges = steps
        .windows(2)
        .enumerate()
        .map(|(idx, pair)| {
            let (from, to) = (&pair[0].step_id, &pair[1].step_id);
            GraphEdge {
                id: format!("e-step:{from}->{to}"),
                source: step_node_id(from),
                target: step_node_id(to),
                kind: EdgeKind::Timeline,
                animated: idx % 2 == 0,
            }
        })
        .collect();

    (nodes, edges)
}
