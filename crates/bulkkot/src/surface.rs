//! Braille canvas backend for the scene drawing surface.

use bulkkot_core::Surface;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Points, Rectangle};

/// Alpha below which a braille dot reads as noise rather than light.
const MIN_VISIBLE_ALPHA: f32 = 0.05;

/// Adapts a ratatui canvas [`Context`] to the scene's [`Surface`] contract.
///
/// Scene coordinates run y-down from the top-left corner; the canvas runs
/// y-up, so every call flips. Alpha has no terminal equivalent and is
/// expressed by dimming the color toward the black sky.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    width: f32,
    height: f32,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, width: f32, height: f32) -> Self {
        Self { ctx, width, height }
    }

    fn flip(&self, y: f32) -> f64 {
        f64::from(self.height - y)
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// The canvas starts blank every frame, so there is nothing to erase.
    fn clear(&mut self) {}

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32) {
        let Some(color) = dim(color, alpha) else {
            return;
        };

        // Entity radii are sub-cell, so a filled circle collapses to a
        // single braille dot; anything larger falls back to the outline.
        if radius > 2.0 {
            self.ctx.draw(&Circle {
                x: f64::from(x),
                y: self.flip(y),
                radius: f64::from(radius),
                color,
            });
        } else {
            self.ctx.draw(&Points {
                coords: &[(f64::from(x), self.flip(y))],
                color,
            });
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, alpha: f32) {
        let Some(color) = dim(color, alpha) else {
            return;
        };

        self.ctx.draw(&Rectangle {
            x: f64::from(x),
            y: self.flip(y + height),
            width: f64::from(width),
            height: f64::from(height),
            color,
        });
    }
}

/// Fold alpha into the color, dropping draws too dim to see.
fn dim(color: Color, alpha: f32) -> Option<Color> {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha < MIN_VISIBLE_ALPHA {
        return None;
    }

    match color {
        Color::Rgb(r, g, b) => Some(Color::Rgb(
            scale(r, alpha),
            scale(g, alpha),
            scale(b, alpha),
        )),
        other => Some(other),
    }
}

fn scale(channel: u8, alpha: f32) -> u8 {
    (f32::from(channel) * alpha) as u8
}
