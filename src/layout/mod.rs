//! Coordinate placement for the step timeline and the per-step mini-app trees.

pub mod orient;
pub mod timeline;
pub mod tree;

pub use orient::{Orientation, reflow};
pub use timeline::layout_timeline;
pub use tree::{StepTree, layout_tree};

/// First `max` characters of `s`.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("¿Cuánto tarda?", 6), "¿Cuánt");
        assert_eq!(truncate_chars("short", 42), "short");
    }
}
