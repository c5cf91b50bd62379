//! Pixel drawing on an RGB image
//!
//! Coordinates are signed so shapes may extend past the edges; everything
//! outside the image is clipped.

use image::{Rgb, RgbImage};

use crate::font::{self, ADVANCE};

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([60, 60, 60]);
    pub const GRID: Rgb<u8> = Rgb([210, 210, 210]);
    pub const PANEL: Rgb<u8> = Rgb([234, 234, 242]);
    pub const HEADER: Rgb<u8> = Rgb([225, 228, 236]);

    /// Categorical palette for bars and boxes, cycled by index.
    pub const PALETTE: [Rgb<u8>; 6] = [
        Rgb([76, 114, 176]),
        Rgb([221, 132, 82]),
        Rgb([85, 168, 104]),
        Rgb([196, 78, 82]),
        Rgb([129, 114, 179]),
        Rgb([147, 120, 96]),
    ];

    pub const DIVERGING_LOW: Rgb<u8> = Rgb([59, 76, 192]);
    pub const DIVERGING_MID: Rgb<u8> = Rgb([242, 242, 242]);
    pub const DIVERGING_HIGH: Rgb<u8> = Rgb([180, 4, 38]);

    #[must_use]
    pub fn palette(index: usize) -> Rgb<u8> {
        PALETTE[index % PALETTE.len()]
    }
}

/// Interpolate between two colors
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn interpolate_color(c1: Rgb<u8>, c2: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t) * f64::from(a) + t * f64::from(b)).round() as u8;
    Rgb([
        mix(c1.0[0], c2.0[0]),
        mix(c1.0[1], c2.0[1]),
        mix(c1.0[2], c2.0[2]),
    ])
}

/// Maps a value in `[-1, 1]` onto a blue-white-red scale.
///
/// ```
/// use steerage_render::canvas::{colors, diverging_color};
///
/// assert_eq!(diverging_color(-1.0), colors::DIVERGING_LOW);
/// assert_eq!(diverging_color(0.0), colors::DIVERGING_MID);
/// assert_eq!(diverging_color(3.0), colors::DIVERGING_HIGH);
/// ```
#[must_use]
pub fn diverging_color(value: f64) -> Rgb<u8> {
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        interpolate_color(colors::DIVERGING_MID, colors::DIVERGING_LOW, -v)
    } else {
        interpolate_color(colors::DIVERGING_MID, colors::DIVERGING_HIGH, v)
    }
}

/// A readable text color on top of `background`.
#[must_use]
pub fn contrast_color(background: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = background.0;
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma < 128.0 {
        colors::WHITE
    } else {
        colors::BLACK
    }
}

/// Rounds a pixel coordinate.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn px(value: f64) -> i64 {
    value.round() as i64
}

/// Horizontal placement of text relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, extent: i64) -> i64 {
        match self {
            Self::Start => 0,
            Self::Center => extent / 2,
            Self::End => extent,
        }
    }
}

/// An image being drawn.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        i64::from(self.image.width())
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        i64::from(self.image.height())
    }

    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Sets one pixel, ignoring coordinates outside the image.
    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width());
        let y1 = (y + height).min(self.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Draws the one-pixel outline of a rectangle.
    pub fn stroke_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgb<u8>) {
        if width <= 0 || height <= 0 {
            return;
        }
        let (x1, y1) = (x + width - 1, y + height - 1);
        self.hline(y, x, x1, color);
        self.hline(y1, x, x1, color);
        self.vline(x, y, y1, color);
        self.vline(x1, y, y1, color);
    }

    pub fn hline(&mut self, y: i64, x1: i64, x2: i64, color: Rgb<u8>) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in start.max(0)..=end.min(self.width() - 1) {
            self.put(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y1: i64, y2: i64, color: Rgb<u8>) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start.max(0)..=end.min(self.height() - 1) {
            self.put(x, y, color);
        }
    }

    /// Draws a line with Bresenham's algorithm.
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgb<u8>) {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);
        loop {
            self.put(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws the outline of a circle (midpoint algorithm).
    pub fn circle(&mut self, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
        let (mut x, mut y) = (radius, 0);
        let mut err = 1 - radius;
        while x >= y {
            for (ox, oy) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.put(cx + ox, cy + oy, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draws text with its top edge at `y`, aligned horizontally on `x`.
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, align: Align, color: Rgb<u8>) {
        let width = i64::from(font::text_width(text, scale));
        let x = x - align.offset(width);
        let scale = i64::from(scale);
        let advance = i64::from(ADVANCE) * scale;
        for (i, c) in (0_i64..).zip(text.chars()) {
            let glyph = font::glyph(c);
            let gx = x + i * advance;
            for row in 0..font::GLYPH_HEIGHT {
                for col in 0..font::GLYPH_WIDTH {
                    if font::is_set(&glyph, col, row) {
                        let px = gx + i64::from(col) * scale;
                        let py = y + i64::from(row) * scale;
                        self.fill_rect(px, py, scale, scale, color);
                    }
                }
            }
        }
    }

    /// Draws text centered on (`cx`, `cy`).
    pub fn text_centered(&mut self, cx: i64, cy: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let height = i64::from(font::text_height(scale));
        self.text(cx, cy - height / 2, text, scale, Align::Center, color);
    }

    /// Draws text rotated a quarter turn counterclockwise, centered on
    /// (`cx`, `cy`), reading bottom to top.
    pub fn text_vertical(&mut self, cx: i64, cy: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let length = i64::from(font::text_width(text, scale));
        let height = i64::from(font::text_height(scale));
        let scale_px = i64::from(scale);
        let advance = i64::from(ADVANCE) * scale_px;
        let left = cx - height / 2;
        let bottom = cy + length / 2;
        for (i, c) in (0_i64..).zip(text.chars()) {
            let glyph = font::glyph(c);
            for row in 0..font::GLYPH_HEIGHT {
                for col in 0..font::GLYPH_WIDTH {
                    if font::is_set(&glyph, col, row) {
                        let px = left + i64::from(row) * scale_px;
                        let py = bottom - i * advance - i64::from(col + 1) * scale_px;
                        self.fill_rect(px, py, scale_px, scale_px, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_color() {
        let mid = interpolate_color(colors::BLACK, colors::WHITE, 0.5);
        assert_eq!(mid, Rgb([128, 128, 128]));
        assert_eq!(interpolate_color(colors::BLACK, colors::WHITE, 2.0), colors::WHITE);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut canvas = Canvas::new(4, 4, colors::WHITE);
        canvas.fill_rect(-10, -10, 12, 12, colors::BLACK);
        canvas.line(-5, 3, 10, 3, colors::BLACK);
        canvas.circle(0, 0, 20, colors::BLACK);
        let image = canvas.into_image();
        assert_eq!(*image.get_pixel(1, 1), colors::BLACK);
        assert_eq!(*image.get_pixel(2, 2), colors::WHITE);
        assert_eq!(*image.get_pixel(3, 3), colors::BLACK);
    }

    #[test]
    fn test_text_width_matches_pixels() {
        let mut canvas = Canvas::new(40, 10, colors::WHITE);
        canvas.text(0, 0, "11", 1, Align::Start, colors::BLACK);
        let image = canvas.into_image();
        // Second "1" starts one advance later; its stem is at column 6 + 2.
        assert_eq!(*image.get_pixel(8, 0), colors::BLACK);
        assert_eq!(*image.get_pixel(12, 0), colors::WHITE);
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color(colors::DIVERGING_HIGH), colors::WHITE);
        assert_eq!(contrast_color(colors::DIVERGING_MID), colors::BLACK);
    }
}
