//! Core types for the bulkkot fireworks card.
//!
//! This crate holds the pieces shared between the scene simulation and the
//! terminal front end: the [`Surface`] drawing contract and color
//! conversion helpers.

mod color;
mod surface;

pub use color::{firework_color, hsl_to_rgb};
pub use surface::Surface;
