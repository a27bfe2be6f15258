//! Particle field lifecycle state.
//!
//! Owns the particle set, the measured surface, and the `active` flag that
//! makes teardown stick: once [`FieldState::unmount`] has run, a frame or
//! resize callback that the host had already dispatched is a no-op.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::particles::ParticleSystem;
use super::render::{self, Painter};
use super::scale::SurfaceMetrics;
use super::types::ParticleOptions;

/// What the frame loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
	/// Schedule another tick.
	Continue,
	/// Stop; the field has been torn down.
	Stop,
}

/// Core state for one mounted particle field.
///
/// Created when the component acquires its drawing context, then mutated
/// once per animation frame and once per observed resize.
pub struct FieldState {
	pub options: ParticleOptions,
	pub metrics: SurfaceMetrics,
	pub particles: ParticleSystem,
	pub frame: u64,
	active: bool,
	rng: StdRng,
}

impl FieldState {
	/// Mount with OS entropy.
	pub fn mount(options: ParticleOptions, metrics: SurfaceMetrics) -> Self {
		Self::mount_with_rng(options, metrics, StdRng::from_entropy())
	}

	pub fn mount_with_rng(
		options: ParticleOptions,
		metrics: SurfaceMetrics,
		mut rng: StdRng,
	) -> Self {
		let particles = ParticleSystem::new(&options, metrics.width, metrics.height, &mut rng);
		debug!(
			"peerly: particle field mounted at {}x{} (ratio {}), {} particles",
			metrics.width,
			metrics.height,
			metrics.ratio,
			particles.particles.len()
		);
		Self {
			options,
			metrics,
			particles,
			frame: 0,
			active: true,
			rng,
		}
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Advance the simulation one step and draw it.
	pub fn tick<P: Painter + ?Sized>(&mut self, painter: &P) -> FrameOutcome {
		if !self.active {
			return FrameOutcome::Stop;
		}
		self.particles.update();
		render::render(painter, &self.particles, &self.options, self.frame);
		self.frame = self.frame.wrapping_add(1);
		FrameOutcome::Continue
	}

	/// Re-run initialization for a new surface size.
	///
	/// Returns `false` (and changes nothing) once the field is torn down.
	pub fn resize<P: Painter + ?Sized>(&mut self, metrics: SurfaceMetrics, painter: &P) -> bool {
		if !self.active {
			return false;
		}
		painter.set_pixel_ratio(metrics.ratio);
		self.particles.resize(metrics.width, metrics.height, &mut self.rng);
		self.metrics = metrics;
		debug!(
			"peerly: particle field resized to {}x{}, {} particles",
			metrics.width,
			metrics.height,
			self.particles.particles.len()
		);
		true
	}

	/// Stop reacting to frames and resizes.
	pub fn unmount(&mut self) {
		if self.active {
			self.active = false;
			debug!("peerly: particle field unmounted after {} frames", self.frame);
		}
	}
}
