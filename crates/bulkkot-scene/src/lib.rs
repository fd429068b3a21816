//! Firework scene simulation for the bulkkot fireworks card.
//!
//! Short-lived entities (ascending rockets, burst particles) plus the
//! fixed starfield behind them, and the [`Scene`] state driving per-frame
//! update, draw, and cull. Rendering goes through the
//! [`Surface`](bulkkot_core::Surface) contract, so the simulation never
//! touches the terminal directly.

mod entity;
mod particle;
mod rocket;
mod scene;
mod star;

pub use entity::{Entity, retain_alive};
pub use particle::{BURST_COUNT, Particle, burst};
pub use rocket::Rocket;
pub use scene::Scene;
pub use star::{Star, Starfield};
