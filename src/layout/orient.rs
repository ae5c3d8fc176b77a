use crate::model::node::Position;
use serde::{Deserialize, Serialize};

/// Axis the graphs flow along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Re-flow computed positions for `orientation`.
///
/// Horizontal is the computed layout. Vertical swaps the axes, then shifts
/// the whole layout so that the smallest coordinate on each axis (taking 0
/// as an upper bound) lands on `margin`.
pub fn reflow(positions: &[Position], orientation: Orientation, margin: f64) -> Vec<Position> {
    if orientation == Orientation::Horizontal {
        return positions.to_vec();
    }

    let swapped: Vec<Position> = positions.iter().map(|p| Position::new(p.y, p.x)).collect();
    let min_x = swapped.iter().map(|p| p.x).fold(0.0, f64::min);
    let min_y = swapped.iter().map(|p| p.y).fold(0.0, f64::min);
    let offset_x = if min_x < margin { margin - min_x } else { 0.0 };
    let offset_y = if min_y < margin { margin - min_y } else { 0.0 };

    swapped
        .into_iter()
        .map(|p| Position::new(p.x + offset_x, p.y + offset_y))
        .collect()
}
