//! The 2D drawing context the field renders into.
//!
//! [`DrawSurface`] is small: the field only ever clears, paints
//! a vertical gradient, fills circles and strokes lines. Two implementations
//! ship with the crate: [`PixelCanvas`](crate::PixelCanvas) rasterizes on
//! the CPU, and [`RecordingSurface`] keeps a display list of every call.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::palette::{ColorStop, Rgba};

/// How a circle is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Rgba),
    /// A radial gradient centered on the circle. Stop offsets are relative to
    /// `radius`; beyond the last stop the gradient is transparent.
    Radial { radius: f32, stops: Vec<ColorStop> },
}

/// A 2D drawing context sized to the viewport.
///
/// `alpha` arguments multiply the paint's own alpha, like a canvas
/// `globalAlpha`.
pub trait DrawSurface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface. Contents after a resize are unspecified.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Composite a top-to-bottom gradient over the whole surface.
    fn fill_vertical_gradient(&mut self, stops: &[ColorStop]);

    /// Composite a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, alpha: f32);

    /// Composite a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, alpha: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Clear,
    VerticalGradient { stops: Vec<ColorStop> },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
        alpha: f32,
    },
}

impl DrawCommand {
    /// Whether the command puts pixels on the surface.
    pub fn is_draw(&self) -> bool {
        !matches!(self, DrawCommand::Resize { .. })
    }
}

/// A display-list surface.
///
/// Clones share the same command log, so a test can keep a handle after the
/// surface has been moved into a mounted background and dropped with it.
/// The size is per clone; resizes show up in the log as
/// [`DrawCommand::Resize`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    log: Rc<RefCell<Vec<DrawCommand>>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            log: Rc::default(),
        }
    }

    /// Snapshot of every command recorded so far.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.borrow().clone()
    }

    /// Number of commands that drew pixels.
    pub fn draw_count(&self) -> usize {
        self.log.borrow().iter().filter(|c| c.is_draw()).count()
    }

    /// Number of filled circles recorded.
    pub fn circle_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Number of lines recorded.
    pub fn line_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.log.borrow_mut().clear();
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.log.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, command: DrawCommand) {
        self.log.borrow_mut().push(command);
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self) {
        self.push(DrawCommand::Clear);
    }

    fn fill_vertical_gradient(&mut self, stops: &[ColorStop]) {
        self.push(DrawCommand::VerticalGradient {
            stops: stops.to_vec(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, alpha: f32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            paint: paint.clone(),
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, alpha: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }
}
