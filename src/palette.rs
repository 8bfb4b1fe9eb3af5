//! Theme palettes.
//!
//! The field is recolored from a single dark/light flag. Each [`Theme`] maps
//! to a fixed [`Palette`] of gradient stops and solid colors; nothing else
//! about a frame depends on the theme.

use glam::Vec4;

/// Dark or light page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Theme {
    /// Near-black background with cyan and purple particles.
    #[default]
    Dark,
    /// Near-white background with blue and indigo particles.
    Light,
}

impl Theme {
    /// Build from the host's boolean dark-mode flag.
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Whether this is the dark theme.
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// The palette used to draw this theme.
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

/// Straight (non-premultiplied) RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS-style `rgba(r, g, b, a)` with 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::from(Vec4::from(self).lerp(Vec4::from(other), t))
    }

    /// Premultiplied form with an extra alpha factor applied.
    pub fn premultiplied(self, alpha: f32) -> Vec4 {
        let a = (self.a * alpha).clamp(0.0, 1.0);
        Vec4::new(self.r * a, self.g * a, self.b * a, a)
    }
}

impl From<Rgba> for Vec4 {
    fn from(c: Rgba) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Rgba {
    fn from(v: Vec4) -> Self {
        Rgba::new(v.x, v.y, v.z, v.w)
    }
}

/// A color at a normalized offset along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Sample a gradient at `t`, clamping to the first and last stop.
///
/// Stops must be sorted by offset. An empty slice samples as transparent.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Rgba::TRANSPARENT,
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= 0.0 {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// Every color a frame needs for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Vertical background gradient, top to bottom.
    pub background: [ColorStop; 3],
    /// Radial glow around each particle, center to rim.
    pub glow: [ColorStop; 3],
    /// Solid particle core.
    pub core: Rgba,
    /// Link stroke color before the per-link alpha.
    pub link: Rgba,
}

const DARK: Palette = Palette {
    background: [
        ColorStop::new(0.0, Rgba::from_rgba8(0, 0, 0, 0.95)),
        ColorStop::new(0.5, Rgba::from_rgba8(15, 23, 42, 0.9)),
        ColorStop::new(1.0, Rgba::from_rgba8(0, 0, 0, 0.95)),
    ],
    glow: [
        ColorStop::new(0.0, Rgba::from_rgba8(56, 189, 248, 0.6)),
        ColorStop::new(0.5, Rgba::from_rgba8(147, 51, 234, 0.3)),
        ColorStop::new(1.0, Rgba::from_rgba8(56, 189, 248, 0.0)),
    ],
    core: Rgba::from_rgba8(56, 189, 248, 0.8),
    link: Rgba::from_rgba8(56, 189, 248, 0.3),
};

const LIGHT: Palette = Palette {
    background: [
        ColorStop::new(0.0, Rgba::from_rgba8(248, 250, 252, 0.95)),
        ColorStop::new(0.5, Rgba::from_rgba8(241, 245, 249, 0.9)),
        ColorStop::new(1.0, Rgba::from_rgba8(248, 250, 252, 0.95)),
    ],
    glow: [
        ColorStop::new(0.0, Rgba::from_rgba8(59, 130, 246, 0.4)),
        ColorStop::new(0.5, Rgba::from_rgba8(99, 102, 241, 0.2)),
        ColorStop::new(1.0, Rgba::from_rgba8(59, 130, 246, 0.0)),
    ],
    core: Rgba::from_rgba8(59, 130, 246, 0.6),
    link: Rgba::from_rgba8(59, 130, 246, 0.3),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_flag() {
        assert_eq!(Theme::from_dark_flag(true), Theme::Dark);
        assert_eq!(Theme::from_dark_flag(false), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!(Theme::default().is_dark());
    }

    #[test]
    fn test_palettes_are_translucent() {
        for theme in [Theme::Dark, Theme::Light] {
            for stop in theme.palette().background {
                assert!(stop.color.a >= 0.9 && stop.color.a <= 0.95);
            }
            assert_eq!(theme.palette().glow[2].color.a, 0.0);
        }
    }

    #[test]
    fn test_dark_background_darker_than_light() {
        let dark = Theme::Dark.palette().background[1].color;
        let light = Theme::Light.palette().background[1].color;
        assert!(dark.r + dark.g + dark.b < light.r + light.g + light.b);
    }

    #[test]
    fn test_sample_stops_interpolates() {
        let stops = [
            ColorStop::new(0.0, Rgba::new(0.0, 0.0, 0.0, 1.0)),
            ColorStop::new(1.0, Rgba::new(1.0, 0.5, 0.0, 0.0)),
        ];
        let mid = sample_stops(&stops, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.25).abs() < 1e-6);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_stops_clamps() {
        let stops = Theme::Dark.palette().glow;
        assert_eq!(sample_stops(&stops, -1.0), stops[0].color);
        assert_eq!(sample_stops(&stops, 2.0), stops[2].color);
        assert_eq!(sample_stops(&[], 0.3), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_premultiplied() {
        let c = Rgba::new(1.0, 0.5, 0.0, 0.5).premultiplied(0.5);
        assert_eq!(c, Vec4::new(0.25, 0.125, 0.0, 0.25));
    }
}
