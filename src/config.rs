//! Layout constants, optionally overridden from a JSON file.
//!
//! Every field has a default, so `{}` or a partial file is valid.

use crate::Result;
use crate::source::load::read_json;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub timeline: TimelineConfig,
    pub tree: TreeConfig,
    /// Minimum coordinate after re-flowing into the vertical orientation.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            tree: TreeConfig::default(),
            margin: 24.0,
        }
    }
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub spacing_x: f64,
    pub baseline_y: f64,
    /// Added to every other step to stagger the row.
    pub zigzag_y: f64,
    pub subtitle_chars: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            spacing_x: 320.0,
            baseline_y: 140.0,
            zigzag_y: 40.0,
            subtitle_chars: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub column_width: f64,
    pub row_height: f64,
    pub baseline_y: f64,
    pub root_x: f64,
    pub subtitle_chars: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            column_width: 320.0,
            row_height: 150.0,
            baseline_y: 110.0,
            root_x: 24.0,
            subtitle_chars: 48,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{ "tree": { "row_height": 100 }, "margin": 24 }"#).unwrap();
        assert_eq!(cfg.tree.row_height, 100.0);
        assert_eq!(cfg.tree.column_width, 320.0);
        assert_eq!(cfg.timeline, TimelineConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        let cfg: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LayoutConfig::default());
        assert_eq!(cfg.margin, 24.0);
    }
}
