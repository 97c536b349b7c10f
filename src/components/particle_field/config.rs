//! Tunables for the particle field.

use serde::Deserialize;

/// Upper bound on `particle_count`; connection planning is quadratic in it.
pub const MAX_PARTICLES: usize = 2_000;
/// Upper bound on `max_connections`.
pub const MAX_CONNECTIONS: usize = 32;
/// Upper bound on the base speed, in pixels per frame.
pub const MAX_SPEED: f64 = 200.0;
/// Upper bound on pixel lengths (radii, distances, widths, margins).
pub const MAX_LENGTH: f64 = 10_000.0;
/// Upper bound on the pointer repulsion strength.
pub const MAX_STRENGTH: f64 = 1_000.0;

/// Immutable simulation and rendering parameters.
///
/// Deserialized from the page with camelCase keys; every key is optional and
/// falls back to [`FieldConfig::default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
	/// Number of particles allocated on every reset.
	pub particle_count: usize,
	/// Smallest dot radius in pixels.
	pub radius_min: f64,
	/// Largest dot radius in pixels.
	pub radius_max: f64,
	/// Base drift speed (pixels per frame, per axis). Velocity is capped at 4x this.
	pub speed: f64,
	/// Particles closer than this are candidates for a connection line.
	pub connection_distance: f64,
	/// Pointer influence radius.
	pub mouse_radius: f64,
	/// Pointer repulsion strength.
	pub mouse_strength: f64,
	/// Fewest lines drawn from a particle (when enough neighbors exist).
	pub min_connections: usize,
	/// Most lines drawn from a particle.
	pub max_connections: usize,
	/// Dot opacity.
	pub dot_opacity: f64,
	/// Line opacity at zero distance, fading linearly to 0 at `connection_distance`.
	pub line_opacity: f64,
	/// Connection line width in pixels.
	pub line_width: f64,
	/// How far past an edge a particle travels before wrapping to the other side.
	pub edge_margin: f64,
	/// Viewports narrower than this never start the effect.
	pub min_viewport_width: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 80,
			radius_min: 1.0,
			radius_max: 3.0,
			speed: 0.5,
			connection_distance: 120.0,
			mouse_radius: 150.0,
			mouse_strength: 3.0,
			min_connections: 1,
			max_connections: 3,
			dot_opacity: 0.8,
			line_opacity: 0.35,
			line_width: 1.0,
			edge_margin: 10.0,
			min_viewport_width: 768.0,
		}
	}
}

impl FieldConfig {
	/// Normalize user-supplied values so the simulation never sees empty or
	/// overflowing ranges.
	///
	/// Inverted bounds are swapped, magnitudes are clamped to `[0, MAX_*]` and
	/// opacities to `[0, 1]`. Non-finite values take the default.
	pub fn sanitized(self) -> Self {
		let defaults = Self::default();
		let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
		let bounded = |v: f64, fallback: f64, max: f64| finite_or(v, fallback).clamp(0.0, max);
		let length = |v: f64, fallback: f64| bounded(v, fallback, MAX_LENGTH);

		let radius_a = length(self.radius_min, defaults.radius_min);
		let radius_b = length(self.radius_max, defaults.radius_max);
		let connections_a = self.min_connections.min(MAX_CONNECTIONS);
		let connections_b = self.max_connections.min(MAX_CONNECTIONS);

		Self {
			particle_count: self.particle_count.min(MAX_PARTICLES),
			radius_min: radius_a.min(radius_b),
			radius_max: radius_a.max(radius_b),
			speed: bounded(self.speed, defaults.speed, MAX_SPEED),
			connection_distance: length(self.connection_distance, defaults.connection_distance),
			mouse_radius: length(self.mouse_radius, defaults.mouse_radius),
			mouse_strength: bounded(self.mouse_strength, defaults.mouse_strength, MAX_STRENGTH),
			min_connections: connections_a.min(connections_b),
			max_connections: connections_a.max(connections_b),
			dot_opacity: finite_or(self.dot_opacity, defaults.dot_opacity).clamp(0.0, 1.0),
			line_opacity: finite_or(self.line_opacity, defaults.line_opacity).clamp(0.0, 1.0),
			line_width: length(self.line_width, defaults.line_width),
			edge_margin: length(self.edge_margin, defaults.edge_margin),
			min_viewport_width: length(self.min_viewport_width, defaults.min_viewport_width),
		}
	}

	/// Velocity magnitude cap.
	pub fn max_speed(&self) -> f64 {
		self.speed * 4.0
	}
}
