//! Ambient particle simulation.
//!
//! Particles drift at constant velocity, wrap around the surface edges with a
//! small invisible margin, and pulse in opacity by reflecting a fixed-size
//! jitter whenever opacity leaves the visible band.

use std::f64::consts::TAU;

use rand::Rng;

use super::types::ParticleOptions;

/// Fewest particles ever seeded, however small the surface.
pub const MIN_PARTICLES: usize = 24;
/// Most particles ever seeded, however large the surface.
pub const MAX_PARTICLES: usize = 140;
/// Logical area that `density` particles occupy.
pub const AREA_UNIT: f64 = 10_000.0;
/// Lower edge of the opacity band.
pub const OPACITY_MIN: f64 = 0.15;
/// Upper edge of the opacity band.
pub const OPACITY_MAX: f64 = 0.8;
/// Distance past an edge at which a particle re-enters from the other side.
pub const WRAP_MARGIN: f64 = 5.0;
/// Largest per-frame opacity change.
pub const MAX_JITTER: f64 = 0.003;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub alpha: f64,
	/// Signed per-frame opacity delta. Only its sign ever changes.
	pub jitter: f64,
	pub phase: f64, // For sway
}

impl Particle {
	/// Sample a fresh particle somewhere on a `width` x `height` surface.
	pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64, speed: f64) -> Self {
		Self {
			x: rng.gen_range(0.0..1.0) * width,
			y: rng.gen_range(0.0..1.0) * height,
			vx: (rng.gen_range(0.0..1.0) - 0.5) * speed,
			vy: (rng.gen_range(0.0..1.0) - 0.5) * speed,
			radius: rng.gen_range(0.4..2.2),
			alpha: rng.gen_range(0.2..OPACITY_MAX),
			jitter: rng.gen_range(-MAX_JITTER..MAX_JITTER),
			phase: rng.gen_range(0.0..TAU),
		}
	}

	/// Advance one frame: move, pulse, then wrap.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		// Reflect, don't clamp: the overshoot is corrected on the next frame.
		self.alpha += self.jitter;
		if self.alpha < OPACITY_MIN || self.alpha > OPACITY_MAX {
			self.jitter = -self.jitter;
		}

		self.x = wrap(self.x, width);
		self.y = wrap(self.y, height);
	}
}

fn wrap(v: f64, extent: f64) -> f64 {
	let mut v = v;
	if v < -WRAP_MARGIN {
		v = extent + WRAP_MARGIN;
	}
	if v > extent + WRAP_MARGIN {
		v = -WRAP_MARGIN;
	}
	v
}

/// Number of particles to seed for a surface area and density.
///
/// `floor(area / 10000 * density)` clamped to `[24, 140]`. Non-finite inputs
/// land on the lower bound.
pub fn target_count(width: f64, height: f64, density: f64) -> usize {
	let raw = (width * height / AREA_UNIT * density).floor();
	// f64::max discards NaN, so degenerate input ends up at the floor.
	raw.max(MIN_PARTICLES as f64).min(MAX_PARTICLES as f64) as usize
}

/// Manages ambient background particles.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	speed: f64,
	density: f64,
}

impl ParticleSystem {
	pub fn new<R: Rng>(
		options: &ParticleOptions,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let mut system = Self {
			particles: Vec::new(),
			width,
			height,
			speed: options.speed,
			density: options.density,
		};
		system.reseed(rng);
		system
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Discard every particle and sample a fresh set sized for the current bounds.
	fn reseed<R: Rng>(&mut self, rng: &mut R) {
		let count = target_count(self.width, self.height, self.density);
		self.particles = (0..count)
			.map(|_| Particle::random(rng, self.width, self.height, self.speed))
			.collect();
	}

	/// Adopt new bounds. Prior particle state is not preserved.
	pub fn resize<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
		self.width = width;
		self.height = height;
		self.reseed(rng);
	}

	/// Advance every particle by one frame.
	pub fn update(&mut self) {
		let (w, h) = (self.width, self.height);
		for p in &mut self.particles {
			p.advance(w, h);
		}
	}

	/// Vertical draw offset for a particle at a given frame.
	pub fn sway_offset(particle: &Particle, frame: u64, options: &ParticleOptions) -> f64 {
		if !options.sway_enabled() {
			return 0.0;
		}
		options.amplitude * (options.frequency * frame as f64 + particle.phase).sin()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn options(speed: f64, density: f64) -> ParticleOptions {
		ParticleOptions {
			speed,
			density,
			..Default::default()
		}
	}

	fn still(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			radius: 1.0,
			alpha: 0.5,
			jitter: 0.0,
			phase: 0.0,
		}
	}

	#[test]
	fn count_scenarios() {
		assert_eq!(target_count(1000.0, 600.0, 2.2), 132);
		assert_eq!(target_count(100.0, 100.0, 0.035), 24);
		assert_eq!(target_count(4000.0, 4000.0, 2.2), 140);
	}

	#[test]
	fn count_handles_degenerate_input() {
		assert_eq!(target_count(0.0, 0.0, 2.2), MIN_PARTICLES);
		assert_eq!(target_count(1000.0, 600.0, -3.0), MIN_PARTICLES);
		assert_eq!(target_count(1000.0, 600.0, f64::NAN), MIN_PARTICLES);
		assert_eq!(target_count(1000.0, 600.0, f64::INFINITY), MAX_PARTICLES);
	}

	#[test]
	fn seeded_attributes_fall_in_their_ranges() {
		let mut rng = StdRng::seed_from_u64(7);
		let system = ParticleSystem::new(&options(0.15, 2.2), 1000.0, 600.0, &mut rng);
		assert_eq!(system.particles.len(), 132);
		for p in &system.particles {
			assert!((0.0..1000.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!(p.vx.abs() <= 0.075 && p.vy.abs() <= 0.075);
			assert!((0.4..2.2).contains(&p.radius));
			assert!((0.2..0.8).contains(&p.alpha));
			assert!(p.jitter.abs() <= MAX_JITTER);
		}
	}

	#[test]
	fn overshoot_reflects_jitter() {
		let mut p = still(10.0, 10.0, 0.0, 0.0);
		p.alpha = 0.81;
		p.jitter = 0.002;
		p.advance(100.0, 100.0);
		assert!(p.jitter < 0.0);
		p.advance(100.0, 100.0);
		assert!(p.alpha < 0.81);
	}

	#[test]
	fn crossing_low_bound_reflects_upward() {
		let mut p = still(10.0, 10.0, 0.0, 0.0);
		p.alpha = 0.151;
		p.jitter = -0.003;
		p.advance(100.0, 100.0);
		assert!(p.alpha < OPACITY_MIN);
		assert_eq!(p.jitter, 0.003);
		p.advance(100.0, 100.0);
		assert!(p.alpha >= OPACITY_MIN);
	}

	#[test]
	fn wraps_to_opposite_margin() {
		let mut p = still(-5.0, 50.0, -0.1, 0.0);
		p.advance(200.0, 100.0);
		assert_eq!(p.x, 205.0);

		let mut p = still(205.0, 50.0, 0.1, 0.0);
		p.advance(200.0, 100.0);
		assert_eq!(p.x, -5.0);

		let mut p = still(50.0, 104.95, 0.0, 0.1);
		p.advance(200.0, 100.0);
		assert_eq!(p.y, -5.0);

		// Inside the margin nothing happens yet.
		let mut p = still(-4.0, 50.0, -0.5, 0.0);
		p.advance(200.0, 100.0);
		assert_eq!(p.x, -4.5);
	}

	#[test]
	fn resize_replaces_the_whole_set() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut system = ParticleSystem::new(&options(0.15, 2.2), 1000.0, 600.0, &mut rng);
		let before = system.particles.clone();

		system.resize(4000.0, 4000.0, &mut rng);
		assert_eq!(system.particles.len(), 140);
		assert_eq!((system.width(), system.height()), (4000.0, 4000.0));

		system.resize(1000.0, 600.0, &mut rng);
		assert_eq!(system.particles.len(), 132);
		assert_ne!(system.particles, before);
	}

	#[test]
	fn sway_is_off_by_default() {
		let p = still(0.0, 0.0, 0.0, 0.0);
		assert_eq!(ParticleSystem::sway_offset(&p, 42, &ParticleOptions::default()), 0.0);

		let swaying = ParticleOptions {
			amplitude: 20.0,
			frequency: 0.06,
			..Default::default()
		};
		let quarter = (std::f64::consts::FRAC_PI_2 / 0.06).round() as u64;
		let off = ParticleSystem::sway_offset(&p, quarter, &swaying);
		assert!((off - 20.0).abs() < 0.1);
	}

	proptest! {
		#[test]
		fn count_always_within_bounds(
			w in 0.0f64..20_000.0,
			h in 0.0f64..20_000.0,
			density in 0.0f64..50.0,
		) {
			let n = target_count(w, h, density);
			prop_assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&n));
		}

		#[test]
		fn opacity_overshoot_is_bounded(seed in any::<u64>(), frames in 0usize..1500) {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut system = ParticleSystem::new(&options(0.15, 0.035), 320.0, 240.0, &mut rng);
			for _ in 0..frames {
				system.update();
				for p in &system.particles {
					let eps = p.jitter.abs() + 1e-9;
					prop_assert!(p.alpha >= OPACITY_MIN - eps, "alpha {} below band", p.alpha);
					prop_assert!(p.alpha <= OPACITY_MAX + eps, "alpha {} above band", p.alpha);
				}
			}
		}

		#[test]
		fn positions_never_escape(
			seed in any::<u64>(),
			speed in 0.0f64..40.0,
			w in 1.0f64..800.0,
			h in 1.0f64..800.0,
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut system = ParticleSystem::new(&options(speed, 1.0), w, h, &mut rng);
			for _ in 0..500 {
				system.update();
				for p in &system.particles {
					prop_assert!(p.x >= -WRAP_MARGIN - p.vx.abs() && p.x <= w + WRAP_MARGIN);
					prop_assert!(p.y >= -WRAP_MARGIN - p.vy.abs() && p.y <= h + WRAP_MARGIN);
				}
			}
		}

		#[test]
		fn resize_matches_density_formula(
			seed in any::<u64>(),
			w in 0.0f64..6000.0,
			h in 0.0f64..6000.0,
			density in 0.0f64..5.0,
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut system = ParticleSystem::new(&options(0.15, density), 640.0, 480.0, &mut rng);
			system.resize(w, h, &mut rng);
			prop_assert_eq!(system.particles.len(), target_count(w, h, density));
		}
	}
}
