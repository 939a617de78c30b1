// src/aura/canvas.rs
//! Software framebuffer implementing [`Surface`].

use super::surface::{Point, RadialGradient, Region, Surface};
use crate::color::ColorRgb;

/// An RGB framebuffer over a black background.
///
/// Drawing happens in canvas units; each pixel covers a `unit_width` x
/// `unit_height` block of them and is sampled at its center. Fills are
/// composited source-over with the gradient alpha times the global alpha.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    columns: usize,
    rows: usize,
    unit_width: f32,
    unit_height: f32,
    /// Linear channel values in [0, 1], row-major
    pixels: Vec<[f32; 3]>,
    global_alpha: f32,
    saved: Vec<f32>,
}

impl PixelCanvas {
    pub fn new(columns: usize, rows: usize, unit_width: f32, unit_height: f32) -> Self {
        Self {
            columns,
            rows,
            unit_width: unit_width.max(f32::MIN_POSITIVE),
            unit_height: unit_height.max(f32::MIN_POSITIVE),
            pixels: vec![[0.0; 3]; columns * rows],
            global_alpha: 1.0,
            saved: Vec::new(),
        }
    }

    /// A canvas for a terminal area drawn with half blocks: one pixel per
    /// column, two per row. `cell_width` x `cell_height` are canvas units
    /// per terminal cell.
    pub fn for_cells(columns: u16, rows: u16, cell_width: f32, cell_height: f32) -> Self {
        Self::new(
            columns as usize,
            rows as usize * 2,
            cell_width,
            cell_height / 2.0,
        )
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// The pixel at (`column`, `row`), or `None` outside the canvas.
    pub fn pixel(&self, column: usize, row: usize) -> Option<ColorRgb> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let [r, g, b] = self.pixels[row * self.columns + column];
        Some(ColorRgb::new(quantize(r), quantize(g), quantize(b)))
    }

    /// Canvas-unit position of a pixel center.
    fn pixel_center(&self, column: usize, row: usize) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.unit_width,
            (row as f32 + 0.5) * self.unit_height,
        )
    }

    /// Pixel index range whose centers lie inside `[start, end)` canvas units.
    fn span(start: f32, end: f32, unit: f32, len: usize) -> std::ops::Range<usize> {
        let first = (start / unit - 0.5).ceil().max(0.0) as usize;
        let last = ((end / unit - 0.5).ceil().max(0.0) as usize).min(len);
        first.min(last)..last
    }
}

fn quantize(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Surface for PixelCanvas {
    fn width(&self) -> f32 {
        self.columns as f32 * self.unit_width
    }

    fn height(&self) -> f32 {
        self.rows as f32 * self.unit_height
    }

    fn clear(&mut self, region: Region) {
        let xs = Self::span(region.x, region.x + region.width, self.unit_width, self.columns);
        let ys = Self::span(region.y, region.y + region.height, self.unit_height, self.rows);
        for row in ys {
            let line = row * self.columns;
            self.pixels[line + xs.start..line + xs.end].fill([0.0; 3]);
        }
    }

    fn save(&mut self) {
        self.saved.push(self.global_alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.saved.pop() {
            self.global_alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // non-finite or out-of-range values are ignored, like a 2D canvas
        if (0.0..=1.0).contains(&alpha) {
            self.global_alpha = alpha;
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f32, gradient: &RadialGradient) {
        if radius <= 0.0 || self.global_alpha <= 0.0 {
            return;
        }

        let xs = Self::span(center.x - radius, center.x + radius, self.unit_width, self.columns);
        let ys = Self::span(center.y - radius, center.y + radius, self.unit_height, self.rows);

        for row in ys {
            for column in xs.clone() {
                let p = self.pixel_center(column, row);
                if p.distance(center) > radius {
                    continue;
                }
                let Some(src) = gradient.color_at(p) else {
                    continue;
                };
                let a = src.alpha * self.global_alpha;
                if a <= 0.0 {
                    continue;
                }
                let src = [
                    src.color.red as f32 / 255.0,
                    src.color.green as f32 / 255.0,
                    src.color.blue as f32 / 255.0,
                ];
                let dst = &mut self.pixels[row * self.columns + column];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s * a + *d * (1.0 - a);
                }
            }
        }
    }
}
