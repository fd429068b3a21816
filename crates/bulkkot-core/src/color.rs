//! Color utility functions.

use ratatui::style::Color;

/// The color of a firework shell and its burst for the given hue in degrees.
///
/// Full saturation at 60% lightness, the classic vivid firework palette.
pub fn firework_color(hue: f32) -> Color {
    hsl_to_rgb(hue, 1.0, 0.6)
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_hsl_grayscale() {
        assert_eq!(hsl_to_rgb(180.0, 0.0, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(hsl_to_rgb(180.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_firework_color_is_vivid() {
        // Hue 0 at 60% lightness lands on a bright red.
        assert_eq!(firework_color(0.0), Color::Rgb(255, 51, 51));
    }
}
