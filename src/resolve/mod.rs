//! Per-step dependency resolution.

pub mod depth;

pub use depth::{Layering, resolve_step};
