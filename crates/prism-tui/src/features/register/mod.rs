//! Register screen feature slice.
//!
//! The screen pairs the registration form with the rotating headline
//! showcase; the showcase's rotation state is owned here and recreated
//! each time the screen mounts.

mod render;
mod state;
mod update;

pub use render::render_screen;
pub use state::{Focus, RegisterState};
pub use update::handle_key;
