//! Ambient particle field component.
//!
//! Renders a decorative field of softly pulsing, drifting points on an HTML
//! canvas:
//! - Particle count proportional to the canvas area, clamped to `[24, 140]`
//! - Constant-velocity drift with wrap-around just outside each edge
//! - Opacity pulsing by reflecting a small jitter at the band edges
//! - Reseeding whenever the canvas' rendered size changes
//!
//! # Example
//!
//! ```ignore
//! use peerly::components::particle_field::{ParticleField, ParticleOptions};
//!
//! let options = ParticleOptions { density: 2.2, ..Default::default() };
//! view! { <ParticleField class="fixed inset-0" options=options /> }
//! ```

mod component;
pub mod particles;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ParticleField;
pub use render::Painter;
pub use state::{FieldState, FrameOutcome};
pub use theme::{Color, ColorError};
pub use types::ParticleOptions;
