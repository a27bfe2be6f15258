//! Canvas rendering for the particle field.
//!
//! Drawing goes through the small [`Painter`] trait so the frame pass can run
//! against a real `CanvasRenderingContext2d` in the browser and against a
//! recorder in tests. All coordinates are logical units; the backing-store
//! scale is applied once per resize via [`Painter::set_pixel_ratio`].

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSystem;
use super::types::ParticleOptions;

/// The subset of a 2D drawing context the particle field needs.
pub trait Painter {
	/// Map logical units onto the backing store, replacing any prior transform.
	fn set_pixel_ratio(&self, ratio: f64);
	/// Clear the `width` x `height` logical rectangle at the origin.
	fn clear(&self, width: f64, height: f64);
	/// Fill a circle with a CSS color at the given global alpha.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str, alpha: f64);
	/// Restore global alpha to fully opaque.
	fn reset_alpha(&self);
}

impl Painter for CanvasRenderingContext2d {
	fn set_pixel_ratio(&self, ratio: f64) {
		let _ = self.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}

	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str, alpha: f64) {
		self.begin_path();
		self.set_fill_style_str(fill);
		self.set_global_alpha(alpha);
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn reset_alpha(&self) {
		self.set_global_alpha(1.0);
	}
}

/// Clear the surface and draw every particle at its current position.
///
/// `frame` only feeds the optional sway offset.
pub fn render<P: Painter + ?Sized>(
	painter: &P,
	particles: &ParticleSystem,
	options: &ParticleOptions,
	frame: u64,
) {
	painter.clear(particles.width(), particles.height());

	let fill = options.color.as_css();
	for p in &particles.particles {
		let dy = ParticleSystem::sway_offset(p, frame, options);
		painter.fill_circle(p.x, p.y + dy, p.radius, fill, p.alpha);
	}

	painter.reset_alpha();
}

#[cfg(test)]
pub(crate) mod recording {
	//! A [`Painter`] that records calls instead of drawing.

	use std::cell::RefCell;

	use super::Painter;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Call {
		PixelRatio(f64),
		Clear(f64, f64),
		Circle {
			x: f64,
			y: f64,
			radius: f64,
			fill: String,
			alpha: f64,
		},
		ResetAlpha,
	}

	#[derive(Default)]
	pub struct RecordingPainter {
		pub calls: RefCell<Vec<Call>>,
	}

	impl RecordingPainter {
		pub fn circles(&self) -> usize {
			self.calls
				.borrow()
				.iter()
				.filter(|c| matches!(c, Call::Circle { .. }))
				.count()
		}

		pub fn take(&self) -> Vec<Call> {
			self.calls.take()
		}
	}

	impl Painter for RecordingPainter {
		fn set_pixel_ratio(&self, ratio: f64) {
			self.calls.borrow_mut().push(Call::PixelRatio(ratio));
		}

		fn clear(&self, width: f64, height: f64) {
			self.calls.borrow_mut().push(Call::Clear(width, height));
		}

		fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str, alpha: f64) {
			self.calls.borrow_mut().push(Call::Circle {
				x,
				y,
				radius,
				fill: fill.to_string(),
				alpha,
			});
		}

		fn reset_alpha(&self) {
			self.calls.borrow_mut().push(Call::ResetAlpha);
		}
	}
}
