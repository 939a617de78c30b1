// src/ui/widgets/aura.rs
//! Full-screen aura widget: two canvas rows per terminal cell.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::aura::PixelCanvas;
use crate::color::ColorRgb;

/// Upper half block; the foreground paints the top pixel, the background
/// the bottom one.
const HALF_BLOCK: char = '▀';

/// Draws a [`PixelCanvas`] into the buffer with half blocks.
pub struct AuraView<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> AuraView<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

fn to_color(c: ColorRgb) -> Color {
    Color::Rgb(c.red, c.green, c.blue)
}

impl Widget for AuraView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for column in 0..area.width {
                let (x, y) = (column as usize, row as usize * 2);
                let top = self.canvas.pixel(x, y).unwrap_or(ColorRgb::BLACK);
                let bottom = self.canvas.pixel(x, y + 1).unwrap_or(ColorRgb::BLACK);

                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

/// Render the aura canvas.
pub fn render_aura(f: &mut Frame<'_>, area: Rect, canvas: &PixelCanvas) {
    f.render_widget(AuraView::new(canvas), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::{Point, RadialGradient, Surface};

    #[test]
    fn cells_carry_both_pixels() {
        let mut canvas = PixelCanvas::for_cells(2, 1, 1.0, 2.0);
        let red = ColorRgb::new(255, 0, 0);
        // cover only the top pixel row
        let center = Point::new(0.5, 0.5);
        let mut g = RadialGradient::new(center, 0.0, 0.6);
        g.add_color_stop(0.0, red.with_alpha(1.0));
        g.add_color_stop(1.0, red.with_alpha(1.0));
        canvas.fill_disc(center, 0.6, &g);

        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        AuraView::new(&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
        // outside the canvas renders black
        assert_eq!(buf[(2, 0)].fg, Color::Rgb(0, 0, 0));
    }
}
