//! Particle field background.
//!
//! Renders a drifting particle field on a full-viewport canvas with:
//! - Pointer repulsion with relaxation back to each particle's base drift
//! - Edge wrapping so the field stays populated
//! - Distance-faded connection lines to each particle's nearest neighbors
//! - Colors taken from the page theme every frame
//!
//! # Example
//!
//! ```ignore
//! use portfolio_particles::{FieldConfig, ParticleBackground};
//!
//! let config = FieldConfig { particle_count: 60, ..FieldConfig::default() };
//! view! { <ParticleBackground config=config /> }
//! ```

mod component;
pub mod config;
pub mod particles;
pub mod render;
pub mod theme;

pub use component::ParticleBackground;
pub use config::FieldConfig;
pub use particles::{Connection, Particle, ParticleField, Pointer};
pub use render::{Surface, render};
pub use theme::{Color, Palette, ThemeMode};
