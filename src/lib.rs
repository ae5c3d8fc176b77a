//! Build a render-ready graph model from conversation logs and the mini-app
//! runs triggered at each step.
//!
//! Flow: raw files -> [`source`] parsers -> [`resolve`] per-step layering ->
//! [`layout`] coordinates -> [`model::GraphModel`]. [`view`] decorates a
//! finished model for display without touching its topology.

pub mod config;
pub mod layout;
pub mod model;
pub mod resolve;
pub mod source;
pub mod view;

pub use config::LayoutConfig;
pub use model::{GraphModel, build_graph_model};
pub use source::{SourceFiles, SourcePaths};

pub type Result<T> = anyhow::Result<T>;
