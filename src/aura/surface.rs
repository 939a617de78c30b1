// src/aura/surface.rs
//! Drawing surface abstraction and radial gradients.

use crate::color::{ColorRgb, Rgba};

/// A position in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One stop of a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// A gradient between two concentric circles around `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    center: Point,
    inner_radius: f32,
    outer_radius: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::with_capacity(2),
        }
    }

    /// Add a stop, keeping stops ordered by offset. Stops with equal
    /// offsets keep insertion order.
    pub fn add_color_stop(&mut self, offset: f32, color: Rgba) {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, ColorStop { offset, color });
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `point`, linearly interpolated between the surrounding
    /// stops. Outside the stop range the nearest stop color is used.
    pub fn color_at(&self, point: Point) -> Option<Rgba> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;

        let span = self.outer_radius - self.inner_radius;
        let t = if span <= 0.0 {
            1.0
        } else {
            (point.distance(self.center) - self.inner_radius) / span
        };

        if t <= first.offset {
            return Some(first.color);
        }
        if t >= last.offset {
            return Some(last.color);
        }

        let upper = self.stops.partition_point(|s| s.offset <= t);
        let (a, b) = (self.stops[upper - 1], self.stops[upper]);
        let local = if b.offset > a.offset {
            (t - a.offset) / (b.offset - a.offset)
        } else {
            0.0
        };
        Some(lerp_rgba(a.color, b.color, local))
    }
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba {
        color: ColorRgb::new(
            channel(a.color.red, b.color.red),
            channel(a.color.green, b.color.green),
            channel(a.color.blue, b.color.blue),
        ),
        alpha: a.alpha + (b.alpha - a.alpha) * t,
    }
}

/// The drawing operations the aura engine needs from its host.
pub trait Surface {
    /// Canvas width in canvas units.
    fn width(&self) -> f32;

    /// Canvas height in canvas units.
    fn height(&self) -> f32;

    /// Erase `region` back to the background.
    fn clear(&mut self, region: Region);

    /// Push the current global alpha.
    fn save(&mut self);

    /// Pop the global alpha pushed by the matching `save`.
    fn restore(&mut self);

    /// Opacity multiplied into everything drawn until the next `restore`.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill the disc of `radius` around `center` with `gradient`.
    fn fill_disc(&mut self, center: Point, radius: f32, gradient: &RadialGradient);

    /// The whole canvas as a region.
    fn bounds(&self) -> Region {
        Region::new(0.0, 0.0, self.width(), self.height())
    }
}
