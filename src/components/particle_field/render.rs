//! Drawing the field.
//!
//! Rendering goes through the [`Surface`] trait so the same pass drives the
//! canvas in the browser and a recorder in tests. Passes, in z-order:
//! 1. Clear
//! 2. Connection lines, faded by distance
//! 3. Particle dots on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::theme::{Color, Palette};

/// A 2D drawing target.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, PI * 2.0);
		self.fill();
	}
}

/// Renders one frame. Reads the field only, so it can be repeated freely.
pub fn render<S: Surface + ?Sized>(surface: &mut S, field: &ParticleField, palette: &Palette) {
	let config = field.config();
	surface.clear(field.width(), field.height());

	for connection in field.connections() {
		let (a, b) = (
			&field.particles[connection.from],
			&field.particles[connection.to],
		);
		let alpha = config.line_opacity * (1.0 - connection.distance / config.connection_distance);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			palette.line.with_alpha(alpha),
			config.line_width,
		);
	}

	let dot = palette.dot.with_alpha(config.dot_opacity);
	for p in &field.particles {
		surface.fill_circle((p.x, p.y), p.radius, dot);
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::FieldConfig;
	use super::super::particles::{Particle, ParticleField, Pointer};
	use super::super::theme::{Color, ThemeMode};
	use super::{Surface, render};

	#[derive(Clone, Debug, PartialEq)]
	enum DrawCall {
		Clear(f64, f64),
		Line((f64, f64), (f64, f64), Color),
		Circle((f64, f64), f64, Color),
	}

	#[derive(Default)]
	struct Recorder {
		calls: Vec<DrawCall>,
	}

	impl Surface for Recorder {
		fn clear(&mut self, width: f64, height: f64) {
			self.calls.push(DrawCall::Clear(width, height));
		}

		fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, _width: f64) {
			self.calls.push(DrawCall::Line(from, to, color));
		}

		fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
			self.calls.push(DrawCall::Circle(center, radius, color));
		}
	}

	fn record(field: &ParticleField) -> Vec<DrawCall> {
		let mut recorder = Recorder::default();
		render(&mut recorder, field, &ThemeMode::Dark.palette());
		recorder.calls
	}

	fn dot_at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			base_vx: 0.0,
			base_vy: 0.0,
			radius: 2.0,
		}
	}

	#[test]
	fn render_is_repeatable_without_update() {
		let mut field = ParticleField::new(
			FieldConfig {
				particle_count: 40,
				..FieldConfig::default()
			},
			400.0,
			300.0,
			17,
		);
		assert_eq!(record(&field), record(&field));

		field.update(Pointer::at(200.0, 150.0), 1.0 / 60.0);
		assert_eq!(record(&field), record(&field));
	}

	#[test]
	fn clears_then_lines_then_dots() {
		let field = ParticleField::new(
			FieldConfig {
				particle_count: 30,
				..FieldConfig::default()
			},
			300.0,
			300.0,
			23,
		);
		let calls = record(&field);

		assert_eq!(calls.first(), Some(&DrawCall::Clear(300.0, 300.0)));
		let first_dot = calls
			.iter()
			.position(|c| matches!(c, DrawCall::Circle(..)))
			.unwrap();
		assert!(
			calls[first_dot..]
				.iter()
				.all(|c| matches!(c, DrawCall::Circle(..)))
		);
		assert_eq!(calls.len() - first_dot, 30);
	}

	#[test]
	fn line_opacity_fades_with_distance() {
		let config = FieldConfig {
			particle_count: 0,
			connection_distance: 100.0,
			line_opacity: 0.5,
			dot_opacity: 0.8,
			min_connections: 1,
			max_connections: 1,
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 500.0, 500.0, 1);
		field.particles.extend([dot_at(100.0, 100.0), dot_at(175.0, 100.0)]);

		let calls = record(&field);
		let palette = ThemeMode::Dark.palette();
		assert_eq!(
			calls,
			vec![
				DrawCall::Clear(500.0, 500.0),
				DrawCall::Line((100.0, 100.0), (175.0, 100.0), palette.line.with_alpha(0.125)),
				DrawCall::Line((175.0, 100.0), (100.0, 100.0), palette.line.with_alpha(0.125)),
				DrawCall::Circle((100.0, 100.0), 2.0, palette.dot.with_alpha(0.8)),
				DrawCall::Circle((175.0, 100.0), 2.0, palette.dot.with_alpha(0.8)),
			]
		);
	}

	#[test]
	fn empty_field_only_clears() {
		let field = ParticleField::new(FieldConfig::default(), 0.0, 0.0, 1);
		assert_eq!(record(&field), vec![DrawCall::Clear(0.0, 0.0)]);
	}
}
