//! The drawing surface contract.

use ratatui::style::Color;

/// A 2D drawing surface the scene paints onto once per frame.
///
/// Coordinates are scene units with the origin at the top-left corner and y
/// growing downward; implementations map them to their own device space.
/// Color and alpha travel with every call, so no draw can leak paint state
/// into the next one.
pub trait Surface {
    /// Current surface dimensions as (width, height).
    fn size(&self) -> (f32, f32);

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Paint a filled circle. `alpha` is nominally 0..=1; backends with a
    /// narrower gamut clamp it.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32);

    /// Paint a filled axis-aligned rectangle with its top-left corner at
    /// (`x`, `y`).
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, alpha: f32);
}
