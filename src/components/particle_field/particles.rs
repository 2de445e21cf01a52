//! Particle simulation: drift, pointer repulsion, edge reflection and
//! proximity links.
//!
//! Nothing here touches the browser. The field is advanced one frame at a time
//! by [`ParticleField::step`], and links are recomputed from current positions
//! by [`ParticleField::links`].

use rand::Rng;

use super::config::FieldConfig;

/// A single drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Fixed at creation.
	pub radius: f64,
	/// Fixed at creation.
	pub opacity: f64,
}

impl Particle {
	fn spawn<R: Rng>(rng: &mut R, config: &FieldConfig, width: f64, height: f64) -> Self {
		let speed = config.initial_speed;
		Self {
			x: sample(rng, 0.0, width),
			y: sample(rng, 0.0, height),
			vx: sample(rng, -speed, speed),
			vy: sample(rng, -speed, speed),
			radius: sample(rng, config.radius_min, config.radius_max),
			opacity: sample(rng, config.opacity_min, config.opacity_max),
		}
	}

	/// Reflect each velocity component that points further out of `[0, bound]`.
	fn reflect(&mut self, width: f64, height: f64) {
		if self.x < 0.0 {
			self.vx = self.vx.abs();
		} else if self.x > width {
			self.vx = -self.vx.abs();
		}
		if self.y < 0.0 {
			self.vy = self.vy.abs();
		} else if self.y > height {
			self.vy = -self.vy.abs();
		}
	}
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty.
fn sample<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// A connection line between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle (always less than `b`).
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	/// Line alpha, in `(0, link_opacity]`.
	pub alpha: f64,
}

/// Velocity change a particle at offset `(dx, dy)` from the pointer receives.
///
/// `(dx, dy)` points from the pointer to the particle. The impulse points the
/// same way with magnitude `strength * (radius - d) / radius`, and is zero when
/// the particle sits exactly on the pointer or at `d >= radius`.
pub fn repulsion_impulse(dx: f64, dy: f64, radius: f64, strength: f64) -> (f64, f64) {
	let d = dx.hypot(dy);
	if d <= 0.0 || d >= radius {
		return (0.0, 0.0);
	}
	let force = (radius - d) / radius * strength;
	(dx / d * force, dy / d * force)
}

/// Alpha of a connection line of length `d`, or `None` when `d >= threshold`.
pub fn link_alpha(d: f64, threshold: f64, opacity: f64) -> Option<f64> {
	(d < threshold).then(|| (1.0 - d / threshold) * opacity)
}

/// A fixed-size set of particles inside a resizable surface.
#[derive(Clone, Debug)]
pub struct ParticleField {
	particles: Vec<Particle>,
	config: FieldConfig,
	width: f64,
	height: f64,
	pointer: (f64, f64),
}

impl ParticleField {
	/// Spawn `config.particle_count` particles uniformly over `width x height`.
	/// The pointer starts at the centre of the surface.
	pub fn new<R: Rng>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let particles = (0..config.particle_count)
			.map(|_| Particle::spawn(&mut *rng, &config, width, height))
			.collect();
		Self::with_particles(particles, config, width, height)
	}

	/// Build a field from explicit particles.
	pub fn with_particles(
		particles: Vec<Particle>,
		config: FieldConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self {
			particles,
			config,
			width,
			height,
			pointer: (width / 2.0, height / 2.0),
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn pointer(&self) -> (f64, f64) {
		self.pointer
	}

	/// Record the latest pointer position. Later calls overwrite earlier ones.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = (x, y);
	}

	/// Change the surface bounds. Particles keep their positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance every particle by one frame: repulsion, Euler step, reflection.
	pub fn step(&mut self) {
		let (px, py) = self.pointer;
		let radius = self.config.repulsion_radius;
		let strength = self.config.repulsion_strength;

		for p in &mut self.particles {
			let (ix, iy) = repulsion_impulse(p.x - px, p.y - py, radius, strength);
			p.vx += ix;
			p.vy += iy;

			p.x += p.vx;
			p.y += p.vy;

			p.reflect(self.width, self.height);
		}
	}

	/// Every pair closer than the connection threshold, in `(a, b)` order.
	pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
		let threshold = self.config.connection_distance;
		let opacity = self.config.link_opacity;

		self.particles.iter().enumerate().flat_map(move |(a, p)| {
			self.particles[a + 1..]
				.iter()
				.enumerate()
				.filter_map(move |(offset, q)| {
					let distance = (p.x - q.x).hypot(p.y - q.y);
					link_alpha(distance, threshold, opacity).map(|alpha| Link {
						a,
						b: a + 1 + offset,
						distance,
						alpha,
					})
				})
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rand::{SeedableRng, rngs::SmallRng};
	use test_case::test_case;

	fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			radius: 2.0,
			opacity: 0.5,
		}
	}

	fn field(particles: Vec<Particle>) -> ParticleField {
		ParticleField::with_particles(particles, FieldConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn spawned_particles_respect_configured_ranges() {
		let mut rng = SmallRng::seed_from_u64(7);
		let config = FieldConfig::default();
		let field = ParticleField::new(config.clone(), 800.0, 600.0, &mut rng);

		assert_eq!(field.particles().len(), config.particle_count);
		for p in field.particles() {
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((-0.25..0.25).contains(&p.vx));
			assert!((-0.25..0.25).contains(&p.vy));
			assert!((1.0..3.0).contains(&p.radius));
			assert!((0.2..0.7).contains(&p.opacity));
		}
	}

	#[test]
	fn pointer_starts_at_surface_centre() {
		let mut rng = SmallRng::seed_from_u64(1);
		let field = ParticleField::new(FieldConfig::default(), 1024.0, 768.0, &mut rng);
		assert_eq!(field.pointer(), (512.0, 384.0));
	}

	#[test]
	fn zero_sized_surface_spawns_at_origin() {
		let mut rng = SmallRng::seed_from_u64(3);
		let field = ParticleField::new(FieldConfig::default(), 0.0, 0.0, &mut rng);
		assert_eq!(field.particles().len(), 60);
		assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}

	#[test]
	fn particle_count_never_changes() {
		let mut rng = SmallRng::seed_from_u64(42);
		let mut field = ParticleField::new(FieldConfig::default(), 640.0, 480.0, &mut rng);

		for frame in 0..500 {
			if frame % 50 == 0 {
				field.set_pointer((frame % 640) as f64, (frame % 480) as f64);
			}
			if frame == 250 {
				field.resize(320.0, 240.0);
			}
			field.step();
			assert_eq!(field.particles().len(), 60);
		}
	}

	#[test_case(0.0 ; "on the pointer")]
	#[test_case(200.0 ; "at the radius")]
	#[test_case(350.0 ; "beyond the radius")]
	fn no_impulse_outside_open_radius(d: f64) {
		assert_eq!(repulsion_impulse(d, 0.0, 200.0, 0.02), (0.0, 0.0));
	}

	#[test]
	fn impulse_points_away_from_pointer() {
		let (ix, iy) = repulsion_impulse(-30.0, 40.0, 200.0, 0.02);
		assert!(ix < 0.0);
		assert!(iy > 0.0);
		// (R - d) / R * strength with d = 50
		let magnitude = ix.hypot(iy);
		assert!((magnitude - 0.015).abs() < 1e-12);
	}

	#[test]
	fn impulse_strictly_decreases_with_distance() {
		let magnitudes: Vec<f64> = (1..200)
			.map(|d| {
				let (ix, iy) = repulsion_impulse(d as f64, 0.0, 200.0, 0.02);
				ix.hypot(iy)
			})
			.collect();
		assert!(magnitudes.windows(2).all(|w| w[0] > w[1]));
		assert!(magnitudes.iter().all(|&m| m > 0.0));
	}

	#[test]
	fn link_alpha_strictly_decreases_with_distance() {
		let alphas: Vec<f64> = (0..150)
			.map(|d| link_alpha(d as f64, 150.0, 0.15).unwrap())
			.collect();
		assert!(alphas.windows(2).all(|w| w[0] > w[1]));
		assert_eq!(alphas[0], 0.15);
	}

	#[test_case(150.0 ; "at threshold")]
	#[test_case(150.000_001 ; "just past threshold")]
	#[test_case(200.0 ; "far away")]
	fn no_link_at_or_beyond_threshold(d: f64) {
		assert_eq!(link_alpha(d, 150.0, 0.15), None);
	}

	#[test]
	fn nearby_pair_is_repelled_and_linked() {
		// Pointer at (400, 300), particles 70 either side of it and 140 apart.
		let mut field = field(vec![
			particle(330.0, 300.0, 0.0, 0.0),
			particle(470.0, 300.0, 0.0, 0.0),
		]);
		field.step();

		let [left, right] = field.particles() else {
			panic!("expected two particles");
		};
		assert!(left.vx < 0.0, "left particle pushed left");
		assert!(right.vx > 0.0, "right particle pushed right");
		assert_eq!(left.vy, 0.0);

		let links: Vec<Link> = field.links().collect();
		assert_eq!(links.len(), 1);
		assert_eq!((links[0].a, links[0].b), (0, 1));
		assert!(links[0].distance < 150.0);
		assert!(links[0].alpha > 0.0);
	}

	#[test]
	fn distant_pair_is_not_linked() {
		let mut field = field(vec![
			particle(50.0, 50.0, 0.0, 0.0),
			particle(250.0, 50.0, 0.0, 0.0),
		]);
		field.set_pointer(700.0, 550.0);
		field.step();

		let [a, b] = field.particles() else {
			panic!("expected two particles");
		};
		assert_eq!((a.vx, a.vy, b.vx, b.vy), (0.0, 0.0, 0.0, 0.0));
		assert_eq!(field.links().count(), 0);
	}

	#[test]
	fn crossing_right_edge_inverts_x_velocity() {
		let mut field = field(vec![particle(805.0, 100.0, 0.3, 0.1)]);
		field.set_pointer(0.0, 600.0);
		field.step();

		let p = &field.particles()[0];
		assert_eq!(p.vx, -0.3);
		assert_eq!(p.vy, 0.1);
		// Position is not clamped.
		assert!(p.x > 800.0);
	}

	#[test_case(particle(0.1, 300.0, -0.3, 0.0), true, false ; "left edge")]
	#[test_case(particle(400.0, 599.9, 0.0, 0.3), false, true ; "bottom edge")]
	#[test_case(particle(0.1, 0.1, -0.3, -0.3), true, true ; "corner")]
	fn crossing_inverts_only_the_crossed_component(start: Particle, flip_x: bool, flip_y: bool) {
		let mut field = field(vec![start.clone()]);
		// Park the pointer far outside so repulsion does not interfere.
		field.set_pointer(-10_000.0, -10_000.0);
		field.step();

		let p = &field.particles()[0];
		let expect = |v: f64, flip: bool| if flip { -v } else { v };
		assert_eq!(p.vx, expect(start.vx, flip_x));
		assert_eq!(p.vy, expect(start.vy, flip_y));
	}

	#[test]
	fn resize_keeps_positions_and_particles_drift_back() {
		let mut field = field(vec![particle(700.0, 100.0, 0.2, 0.0)]);
		field.set_pointer(-10_000.0, -10_000.0);
		field.resize(400.0, 600.0);

		assert_eq!(field.size(), (400.0, 600.0));
		assert_eq!(field.particles()[0].x, 700.0);

		field.step();
		assert!(field.particles()[0].vx < 0.0);
		let after_first = field.particles()[0].x;
		for _ in 0..10 {
			field.step();
		}
		assert!(field.particles()[0].x < after_first);
	}

	#[test]
	fn latest_pointer_wins() {
		let mut field = field(Vec::new());
		field.set_pointer(10.0, 20.0);
		field.set_pointer(30.0, 40.0);
		assert_eq!(field.pointer(), (30.0, 40.0));
	}

	#[test]
	fn links_cover_each_close_pair_once() {
		let field = field(vec![
			particle(0.0, 0.0, 0.0, 0.0),
			particle(100.0, 0.0, 0.0, 0.0),
			particle(200.0, 0.0, 0.0, 0.0),
		]);
		let pairs: Vec<(usize, usize)> = field.links().map(|l| (l.a, l.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (1, 2)]);
	}
}
