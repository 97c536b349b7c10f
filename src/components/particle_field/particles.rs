//! Particle state and the per-frame force model.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;

/// Fraction of the gap to base velocity closed per frame.
const RELAXATION: f64 = 0.03;
/// Converts the configured mouse strength into a per-frame velocity kick.
const REPULSION_SCALE: f64 = 0.1;
/// Longest step accepted, so a backgrounded tab doesn't teleport the field.
const MAX_DT: f64 = 1.0 / 15.0;
/// Frames per second the force constants are tuned for.
const FRAME_RATE: f64 = 60.0;

/// Most recently observed pointer position, in surface-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

impl Pointer {
	/// Sentinel for "no pointer": far enough outside any surface that no
	/// particle is ever within the mouse radius.
	pub const ABSENT: Self = Self {
		x: -9999.0,
		y: -9999.0,
	};

	pub const fn at(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn is_absent(self) -> bool {
		self == Self::ABSENT
	}
}

impl Default for Pointer {
	fn default() -> Self {
		Self::ABSENT
	}
}

/// A single point in the field.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Resting drift, fixed at creation.
	pub base_vx: f64,
	pub base_vy: f64,
	pub radius: f64,
}

impl Particle {
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}

/// A line to draw between two particles, indexed into [`ParticleField::particles`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub from: usize,
	pub to: usize,
	pub distance: f64,
}

/// Owns every particle plus the surface bounds they live in.
///
/// The whole set is replaced on [`reset`](Self::reset); between resets only
/// [`update`](Self::update) mutates particles.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	config: FieldConfig,
	width: f64,
	height: f64,
	rng: SmallRng,
	seed: u64,
	frame: u64,
}

impl ParticleField {
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			config: config.sanitized(),
			width,
			height,
			rng: SmallRng::seed_from_u64(seed),
			seed,
			frame: 0,
		};
		field.reset(width, height);
		field
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Re-seed every particle for a surface of the given size.
	///
	/// A zero-area (or non-finite) surface yields an empty field.
	pub fn reset(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.particles.clear();

		if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
			return;
		}

		let speed = self.config.speed;
		let (radius_min, radius_max) = (self.config.radius_min, self.config.radius_max);
		self.particles.reserve(self.config.particle_count);

		for _ in 0..self.config.particle_count {
			let vx = self.rng.gen_range(-speed..=speed);
			let vy = self.rng.gen_range(-speed..=speed);
			self.particles.push(Particle {
				x: self.rng.gen_range(0.0..width),
				y: self.rng.gen_range(0.0..height),
				vx,
				vy,
				base_vx: vx,
				base_vy: vy,
				radius: self.rng.gen_range(radius_min..=radius_max),
			});
		}
	}

	/// Resizing always re-seeds; existing particles are not rescaled.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.reset(width, height);
	}

	/// Advance every particle by `dt` seconds (one display frame is `1/60`).
	pub fn update(&mut self, pointer: Pointer, dt: f64) {
		let frames = dt.clamp(0.0, MAX_DT) * FRAME_RATE;
		let relax = 1.0 - (1.0 - RELAXATION).powf(frames);
		let max_speed = self.config.max_speed();
		let (mouse_radius, mouse_strength) = (self.config.mouse_radius, self.config.mouse_strength);
		let margin = self.config.edge_margin;
		let repel = !pointer.is_absent();

		for p in &mut self.particles {
			let (dx, dy) = (p.x - pointer.x, p.y - pointer.y);
			let dist = dx.hypot(dy);
			if repel && dist > 0.0 && dist < mouse_radius {
				let force =
					(mouse_radius - dist) / mouse_radius * mouse_strength * REPULSION_SCALE * frames;
				p.vx += dx / dist * force;
				p.vy += dy / dist * force;
			}

			p.vx += (p.base_vx - p.vx) * relax;
			p.vy += (p.base_vy - p.vy) * relax;

			let speed = p.speed();
			if speed > max_speed {
				let scale = max_speed / speed;
				p.vx *= scale;
				p.vy *= scale;
			}

			p.x += p.vx * frames;
			p.y += p.vy * frames;

			p.x = wrap(p.x, self.width, margin);
			p.y = wrap(p.y, self.height, margin);
		}

		self.frame = self.frame.wrapping_add(1);
	}

	/// Lines to draw this frame.
	///
	/// Each particle connects to its nearest neighbors within the connection
	/// distance; how many is drawn per particle from
	/// `[min_connections, max_connections]` and capped by the neighbor count.
	/// The draw depends only on the seed and frame counter, so repeated calls
	/// between updates agree.
	pub fn connections(&self) -> Vec<Connection> {
		let threshold = self.config.connection_distance;
		let (min_k, max_k) = (self.config.min_connections, self.config.max_connections);
		let mut rng = SmallRng::seed_from_u64(
			self.seed ^ self.frame.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15),
		);

		let mut connections = Vec::new();
		let mut neighbors: Vec<(usize, f64)> = Vec::new();

		for (i, a) in self.particles.iter().enumerate() {
			neighbors.clear();
			for (j, b) in self.particles.iter().enumerate() {
				if i == j {
					continue;
				}
				let distance = (a.x - b.x).hypot(a.y - b.y);
				if distance < threshold {
					neighbors.push((j, distance));
				}
			}

			// Draw even when there are no neighbors, so one particle's count
			// never shifts the next particle's.
			let k = rng.gen_range(min_k..=max_k).min(neighbors.len());
			if k == 0 {
				continue;
			}

			neighbors.sort_by(|x, y| x.1.total_cmp(&y.1));
			connections.extend(neighbors.iter().take(k).map(|&(to, distance)| Connection {
				from: i,
				to,
				distance,
			}));
		}

		connections
	}
}

/// Teleport a coordinate that left `[-margin, extent + margin]` to the opposite edge.
fn wrap(value: f64, extent: f64, margin: f64) -> f64 {
	if value < -margin {
		extent + margin
	} else if value > extent + margin {
		-margin
	} else {
		value
	}
}
