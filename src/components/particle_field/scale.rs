//! Device pixel scaling for the particle canvas.
//!
//! # Coordinate Spaces
//!
//! - **Logical**: CSS pixels as reported by the canvas' rendered size. The
//!   simulation and every drawing call work in logical units.
//! - **Backing**: the canvas' own pixel buffer, `logical * ratio`. The context
//!   transform maps logical to backing so high-density displays stay sharp.
//!
//! The ratio is clamped to `[1, 2]`.

/// Smallest device scaling factor applied to the backing surface.
pub const MIN_PIXEL_RATIO: f64 = 1.0;
/// Largest device scaling factor applied to the backing surface.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Clamp a reported `devicePixelRatio` into the supported range.
///
/// Missing or nonsensical reports (zero, negative, NaN) fall back to 1.
pub fn clamp_pixel_ratio(reported: f64) -> f64 {
	if reported.is_finite() && reported > 0.0 {
		reported.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
	} else {
		MIN_PIXEL_RATIO
	}
}

/// Measured size of the drawing surface in both coordinate spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceMetrics {
	/// Logical width.
	pub width: f64,
	/// Logical height.
	pub height: f64,
	/// Clamped device scaling factor.
	pub ratio: f64,
	/// Backing buffer width in device pixels.
	pub backing_width: u32,
	/// Backing buffer height in device pixels.
	pub backing_height: u32,
}

impl SurfaceMetrics {
	/// Compute metrics from a measured logical size and a reported pixel ratio.
	pub fn new(width: f64, height: f64, reported_ratio: f64) -> Self {
		let width = sanitize_extent(width);
		let height = sanitize_extent(height);
		let ratio = clamp_pixel_ratio(reported_ratio);
		Self {
			width,
			height,
			ratio,
			backing_width: (width * ratio).floor() as u32,
			backing_height: (height * ratio).floor() as u32,
		}
	}

	/// Logical area, used for density scaling.
	pub fn area(&self) -> f64 {
		self.width * self.height
	}
}

fn sanitize_extent(v: f64) -> f64 {
	if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ratio_is_clamped() {
		assert_eq!(clamp_pixel_ratio(0.5), 1.0);
		assert_eq!(clamp_pixel_ratio(1.5), 1.5);
		assert_eq!(clamp_pixel_ratio(3.0), 2.0);
		assert_eq!(clamp_pixel_ratio(0.0), 1.0);
		assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
	}

	#[test]
	fn backing_size_scales_and_floors() {
		let m = SurfaceMetrics::new(1000.5, 600.0, 1.5);
		assert_eq!(m.backing_width, 1500);
		assert_eq!(m.backing_height, 900);
		assert_eq!(m.width, 1000.5);

		let hi = SurfaceMetrics::new(800.0, 600.0, 3.0);
		assert_eq!((hi.backing_width, hi.backing_height), (1600, 1200));
	}

	#[test]
	fn degenerate_sizes_collapse_to_zero() {
		let m = SurfaceMetrics::new(-10.0, f64::INFINITY, 1.0);
		assert_eq!(m.area(), 0.0);
		assert_eq!((m.backing_width, m.backing_height), (0, 0));
	}
}
