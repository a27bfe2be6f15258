//! Configuration accepted by the particle field component.

use serde::Deserialize;

use super::theme::Color;

/// Options for a [`ParticleField`](super::ParticleField) mount.
///
/// Every field is independently defaulted, so a partial JSON object such as
/// `{ "density": 2.2 }` deserializes cleanly.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
	/// Fill color shared by every particle. Its own alpha multiplies with the
	/// per-particle opacity.
	pub color: Color,
	/// Scales the per-axis velocity range `[-0.5, 0.5)` at seeding.
	pub speed: f64,
	/// Particles per 10 000 square logical units, before clamping.
	pub density: f64,
	/// Vertical sway amplitude in logical units. `0.0` disables sway.
	pub amplitude: f64,
	/// Sway angular frequency in radians per frame. `0.0` disables sway.
	pub frequency: f64,
}

impl ParticleOptions {
	/// Whether the render-only sway offset is active.
	pub fn sway_enabled(&self) -> bool {
		self.amplitude > 0.0 && self.frequency > 0.0
	}
}

impl Default for ParticleOptions {
	fn default() -> Self {
		Self {
			color: Color::rgba(255, 255, 255, 0.35),
			speed: 0.15,
			density: 0.035,
			amplitude: 0.0,
			frequency: 0.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let opts: ParticleOptions =
			serde_json::from_str(r#"{ "density": 2.2, "color": "rgba(255,255,255,0.42)" }"#)
				.unwrap();
		assert_eq!(opts.density, 2.2);
		assert_eq!(opts.speed, 0.15);
		assert_eq!(opts.color.as_css(), "rgba(255,255,255,0.42)");
		assert!(!opts.sway_enabled());
	}

	#[test]
	fn invalid_color_is_a_parse_error() {
		let res = serde_json::from_str::<ParticleOptions>(r#"{ "color": "not a color" }"#);
		assert!(res.is_err());
	}

	#[test]
	fn sway_needs_both_modifiers() {
		let mut opts = ParticleOptions {
			amplitude: 20.0,
			..Default::default()
		};
		assert!(!opts.sway_enabled());
		opts.frequency = 0.06;
		assert!(opts.sway_enabled());
	}
}
