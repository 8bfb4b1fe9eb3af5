//! CPU rasterizer.
//!
//! [`PixelCanvas`] stores premultiplied RGBA as one `Vec4` per pixel and
//! composites every call source-over. Circle and line edges get one pixel of
//! coverage-based anti-aliasing. The buffer can be handed to the GPU as
//! `Rgba32Float` texels or exported as an 8-bit image.

use std::path::Path;

use glam::{Vec2, Vec4};
use image::{ImageResult, Rgba as ImageRgba, RgbaImage};

use crate::palette::{sample_stops, ColorStop, Rgba};
use crate::surface::{DrawSurface, Paint};

/// A software drawing surface.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl PixelCanvas {
    /// A transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    /// Premultiplied pixels, row-major from the top-left corner.
    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Raw bytes of the pixel buffer, laid out as `Rgba32Float`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Premultiplied pixel at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Convert to an 8-bit straight-alpha image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[self.index(x, y)];
            let rgb = if p.w > 0.0 { p.truncate() / p.w } else { p.truncate() };
            ImageRgba([to_u8(rgb.x), to_u8(rgb.y), to_u8(rgb.z), to_u8(p.w)])
        })
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: Vec4) {
        let i = self.index(x, y);
        let dst = self.pixels[i];
        self.pixels[i] = src + dst * (1.0 - src.w);
    }

    /// Inclusive pixel bounds of a box, clipped to the canvas.
    fn clip_box(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 || !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32 - 1.0);
        let y1 = max.y.ceil().min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Vec4::ZERO);
    }

    fn clear(&mut self) {
        self.pixels.fill(Vec4::ZERO);
    }

    fn fill_vertical_gradient(&mut self, stops: &[ColorStop]) {
        let h = self.height as f32;
        for y in 0..self.height {
            let t = (y as f32 + 0.5) / h;
            let src = sample_stops(stops, t).premultiplied(1.0);
            for x in 0..self.width {
                self.blend(x, y, src);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip_box(center - reach, center + reach) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = p.distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let color = match paint {
                    Paint::Solid(c) => *c,
                    Paint::Radial { radius: r, stops } => {
                        let t = if *r > 0.0 { d / r } else { 1.0 };
                        if t > 1.0 {
                            continue;
                        }
                        sample_stops(stops, t)
                    }
                };
                self.blend(x, y, color.premultiplied(alpha * coverage));
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, alpha: f32) {
        if width <= 0.0 || alpha <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip_box(from.min(to) - reach, from.max(to) + reach)
        else {
            return;
        };

        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + seg * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color.premultiplied(alpha * coverage));
                }
            }
        }
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
