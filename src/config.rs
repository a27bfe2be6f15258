//! Site configuration.
//!
//! The waitlist endpoint is baked in at build time from `PEERLY_SCRIPT_URL`
//! (or the legacy `PEERLY_GAS_URL`) and may be overridden by the page with
//! `<meta name="peerly-script-url" content="...">`.
//!
//! Particle options default to the landing page look and may be overridden by
//! a `<script id="particle-options" type="application/json">` element.

use log::{error, info, warn};
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlMetaElement, HtmlScriptElement};

use crate::components::particle_field::{Color, ParticleOptions};

/// Meta tag consulted for a runtime endpoint override.
pub const ENDPOINT_META: &str = "peerly-script-url";
/// Script element holding JSON particle options.
pub const PARTICLE_OPTIONS_ID: &str = "particle-options";

/// Landing page particle look.
pub fn site_particle_options() -> ParticleOptions {
	ParticleOptions {
		color: Color::rgba(255, 255, 255, 0.42),
		speed: 0.14,
		density: 2.2,
		amplitude: 20.0,
		frequency: 0.06,
	}
}

/// Pick the first non-blank candidate, in priority order.
pub fn first_configured<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
	candidates
		.into_iter()
		.flatten()
		.map(str::trim)
		.find(|s| !s.is_empty())
		.map(str::to_string)
}

/// Layer a JSON object of particle options over `defaults`.
///
/// Each field is read on its own: a missing field keeps its default, and an
/// invalid or unknown field is logged and skipped without affecting the
/// others. Anything other than a JSON object leaves `defaults` untouched.
pub fn parse_particle_options(json: &str, defaults: ParticleOptions) -> ParticleOptions {
	let fields = match serde_json::from_str::<Map<String, Value>>(json) {
		Ok(fields) => fields,
		Err(e) => {
			warn!("peerly: ignoring particle options: {}", e);
			return defaults;
		}
	};

	let mut options = defaults;
	for (key, value) in fields {
		let applied = match key.as_str() {
			"color" => serde_json::from_value(value).map(|v| options.color = v),
			"speed" => serde_json::from_value(value).map(|v| options.speed = v),
			"density" => serde_json::from_value(value).map(|v| options.density = v),
			"amplitude" => serde_json::from_value(value).map(|v| options.amplitude = v),
			"frequency" => serde_json::from_value(value).map(|v| options.frequency = v),
			_ => {
				warn!("peerly: unknown particle option {:?}", key);
				continue;
			}
		};
		if let Err(e) = applied {
			warn!("peerly: ignoring particle option {:?}: {}", key, e);
		}
	}
	options
}

fn document() -> Option<Document> {
	web_sys::window()?.document()
}

fn meta_endpoint(document: &Document) -> Option<String> {
	let selector = format!("meta[name=\"{ENDPOINT_META}\"]");
	let element = document.query_selector(&selector).ok()??;
	let meta: HtmlMetaElement = element.dyn_into().ok()?;
	Some(meta.content())
}

/// Resolve the waitlist endpoint, logging when none is configured.
pub fn waitlist_endpoint() -> Option<String> {
	let from_page = document().and_then(|d| meta_endpoint(&d));
	let endpoint = first_configured([
		from_page.as_deref(),
		option_env!("PEERLY_SCRIPT_URL"),
		option_env!("PEERLY_GAS_URL"),
	]);
	match &endpoint {
		Some(url) => info!("peerly: waitlist endpoint {}", url),
		None => error!(
			"peerly: PEERLY_SCRIPT_URL (or PEERLY_GAS_URL) is not set and no <meta name=\"{}\"> was found",
			ENDPOINT_META
		),
	}
	endpoint
}

/// Load particle options from the page, or the landing page defaults.
pub fn particle_options() -> ParticleOptions {
	let json = document()
		.and_then(|d| d.get_element_by_id(PARTICLE_OPTIONS_ID))
		.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|script| script.text().ok());
	match json {
		Some(json) => parse_particle_options(&json, site_particle_options()),
		None => site_particle_options(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn page_override_wins_then_build_vars() {
		assert_eq!(
			first_configured([Some("https://page"), Some("https://build")]).as_deref(),
			Some("https://page")
		);
		assert_eq!(
			first_configured([None, Some("  "), Some("https://legacy ")]).as_deref(),
			Some("https://legacy")
		);
		assert_eq!(first_configured([None, Some("")]), None);
	}

	#[test]
	fn bad_json_keeps_site_defaults() {
		let opts = parse_particle_options("{ density: ", site_particle_options());
		assert_eq!(opts, site_particle_options());
	}

	#[test]
	fn json_overrides_fields() {
		let opts = parse_particle_options(r##"{ "color": "#ff8800", "speed": 0.3 }"##, site_particle_options());
		assert_eq!(opts.color.as_css(), "#ff8800");
		assert_eq!(opts.speed, 0.3);
		assert_eq!(opts.density, site_particle_options().density);
	}

	#[test]
	fn partial_override_keeps_site_values() {
		let site = site_particle_options();
		let opts = parse_particle_options(r#"{ "speed": 0.3 }"#, site_particle_options());
		assert_eq!(opts.speed, 0.3);
		assert_eq!(opts.density, 2.2);
		assert_eq!(opts.amplitude, 20.0);
		assert_eq!(opts.frequency, 0.06);
		assert_eq!(opts.color, site.color);
		assert!(opts.sway_enabled());
	}

	#[test]
	fn bad_field_keeps_its_neighbours() {
		let opts = parse_particle_options(
			r#"{ "color": "not a color", "density": 1.0, "speed": "fast", "glow": true }"#,
			site_particle_options(),
		);
		assert_eq!(opts.density, 1.0);
		assert_eq!(opts.color, site_particle_options().color);
		assert_eq!(opts.speed, 0.14);

		let opts = parse_particle_options(r#"{ "color": "white", "density": 1.0 }"#, site_particle_options());
		assert_eq!(opts.color.as_css(), "white");
		assert_eq!(opts.density, 1.0);
	}

	#[test]
	fn non_object_keeps_site_defaults() {
		assert_eq!(parse_particle_options("[1, 2]", site_particle_options()), site_particle_options());
		assert_eq!(parse_particle_options("null", site_particle_options()), site_particle_options());
	}
}
