//! Terminal display system
//!
//! Renders listing and battle state for the user. Separates concerns
//! between logging (tracing, spinners) and command results (plain text
//! written to stdout).

pub mod render;
pub mod styling;
pub mod table;

pub use render::{render_battle, render_listing};
pub use styling::StyleManager;
pub use table::TableDisplay;
