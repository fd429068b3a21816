//! Ascending firework shells.

use bulkkot_core::{Surface, firework_color};
use ratatui::style::Color;

use crate::entity::Entity;

/// Upward-velocity loss per frame while ascending.
const GRAVITY: f32 = 0.05;

/// Slowest launch speed; the actual speed is uniform in
/// [LAUNCH_SPEED, LAUNCH_SPEED + LAUNCH_SPREAD).
const LAUNCH_SPEED: f32 = 6.0;
const LAUNCH_SPREAD: f32 = 3.0;

/// Shell body dimensions, in scene units.
const BODY_WIDTH: f32 = 3.0;
const BODY_HEIGHT: f32 = 8.0;

/// A shell climbing from the bottom edge toward its apex.
///
/// Two states: ascending, then exploded — terminal, entered at most once,
/// exactly on the tick the vertical velocity turns non-negative. The scene
/// spawns the burst and removes the shell on that same tick.
#[derive(Debug, Clone)]
pub struct Rocket {
    pub(crate) x: f32,
    pub(crate) y: f32,
    /// Velocity at launch; negative, pointing up.
    pub(crate) launch_vy: f32,
    /// Frames since launch.
    pub(crate) age: f32,
    pub(crate) exploded: bool,
    pub(crate) color: Color,
}

impl Rocket {
    /// Launch a shell from a random spot on the bottom edge.
    pub fn launch(width: f32, height: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: rng.f32() * width,
            y: height,
            launch_vy: -(LAUNCH_SPEED + rng.f32() * LAUNCH_SPREAD),
            age: 0.0,
            exploded: false,
            color: firework_color(rng.f32() * 360.0),
        }
    }

    /// Current vertical velocity.
    ///
    /// Recomputed from the launch state each frame; accumulating GRAVITY in
    /// a running sum drifts the zero crossing off its tick by a few ulps.
    pub fn vy(&self) -> f32 {
        self.launch_vy + self.age * GRAVITY
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Entity for Rocket {
    fn update(&mut self, _rng: &mut fastrand::Rng) -> bool {
        if self.exploded {
            return false;
        }
        self.y += self.vy();
        self.age += 1.0;
        if self.vy() >= 0.0 {
            self.exploded = true;
        }
        !self.exploded
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.exploded {
            return;
        }
        surface.fill_rect(self.x, self.y, BODY_WIDTH, BODY_HEIGHT, self.color, 1.0);
    }
}
