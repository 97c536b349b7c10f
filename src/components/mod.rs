//! UI components mounted by the app.

pub mod cursor;
mod dom;
pub mod particle_field;
pub mod theme_toggle;
