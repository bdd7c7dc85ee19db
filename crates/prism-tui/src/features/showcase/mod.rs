//! Showcase feature slice: the auto-rotating headline panel shown on
//! the register screen.
//!
//! - `state.rs`: the fixed headline sequence and `RotationState`
//! - `render.rs`: the panel renderer

mod render;
mod state;

pub use render::render_panel;
pub use state::{HEADLINES, Headline, ROTATION_INTERVAL, RotationState};
