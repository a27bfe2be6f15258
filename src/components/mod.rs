//! UI components.

pub mod particle_field;
pub mod waitlist;
