//! peerly: landing page and waitlist for Peerly.
//!
//! This crate provides the WASM client for the Peerly landing page: a hero
//! section over an ambient particle field, and a sign-up form that posts to a
//! spreadsheet-backed endpoint with device-local de-duplication.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

// Enables the browser entropy source for `rand` on wasm32.
use getrandom as _;

pub mod components;
pub mod config;

pub use components::particle_field::{ParticleField, ParticleOptions};
pub use components::waitlist::WaitlistForm;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("peerly: logging initialized");
}

/// Main application component.
/// Renders the particle backdrop, hero copy and waitlist form.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let particle_options = config::particle_options();
	let endpoint = config::waitlist_endpoint();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Peerly" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta
			name="description"
			content="Peerly connects students and professionals through peer-to-peer sessions."
		/>

		<div class="page">
			<ParticleField class="particle-backdrop" options=particle_options />
			<main class="content">
				<header class="hero">
					<h1>"Introducing Peerly"</h1>
					<p class="blurb">
						"Peerly connects students and professionals through peer-to-peer sessions. "
						"Share your skills, get help when you're stuck, and grow in a community "
						"that believes knowledge gets stronger when it's shared."
					</p>
				</header>
				<WaitlistForm endpoint=endpoint />
				<footer class="footer">
					<p class="tagline">"Sign up to join the community"</p>
					<p class="copyright">"© 2025 Peerly"</p>
				</footer>
			</main>
		</div>
	}
}
