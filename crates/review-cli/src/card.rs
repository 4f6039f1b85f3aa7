//! Raster rendering of the shareable evaluation card.
//!
//! ```text
//! ┌──────────────────────┐
//! │        NAME          │
//! │      [ LEVEL ]       │
//! │                      │
//! │     radar chart      │
//! │                      │
//! │   4.5        31.5    │
//! │ AVERAGE      TOTAL   │
//! └──────────────────────┘
//! ```

use crate::font::{glyph, text_width, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use review_core::{ImageCard, ImageRenderer, SessionError, SCALE_MAX, SCALE_STEP};
use std::f64::consts::PI;
use std::io::Cursor;
use tracing::debug;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([17, 24, 39, 255]);
const LABEL: Rgba<u8> = Rgba([55, 65, 81, 255]);
const MUTED: Rgba<u8> = Rgba([107, 114, 128, 255]);
const GRID: Rgba<u8> = Rgba([229, 231, 235, 255]);
const ACCENT: Rgba<u8> = Rgba([147, 51, 234, 255]);

const FILL_ALPHA: f64 = 0.25;
const MARGIN: f64 = 80.0;

/// Draws the evaluation card as a PNG.
#[derive(Debug, Default)]
pub struct PngCardRenderer;

impl ImageRenderer for PngCardRenderer {
    fn render(&mut self, card: &ImageCard) -> review_core::Result<Vec<u8>> {
        let mut canvas = Canvas::new(card.width, card.height);
        let (w, h) = (f64::from(card.width), f64::from(card.height));
        let cx = w / 2.0;

        let name_scale = fitting_scale(&card.name, w - 2.0 * MARGIN, 16);
        canvas.text(&card.name, cx, h * 0.05, name_scale, INK);

        if let Some(level) = &card.level_badge {
            let scale = fitting_scale(level, w - 4.0 * MARGIN, 8);
            let pad = f64::from(scale) * 4.0;
            let badge_w = f64::from(text_width(level, scale)) + 2.0 * pad;
            let badge_h = f64::from(GLYPH_HEIGHT * scale) + 2.0 * pad;
            let top = h * 0.05 + f64::from(GLYPH_HEIGHT * name_scale) + h * 0.02;
            canvas.fill_rect(cx - badge_w / 2.0, top, badge_w, badge_h, ACCENT);
            canvas.text(level, cx, top + pad, scale, WHITE);
        }

        canvas.radar(card, cx, h * 0.42, w * 0.36);

        let figures_top = h * 0.76;
        for (value, caption, x) in [
            (&card.average, "AVERAGE", w / 3.0),
            (&card.total, "TOTAL", w * 2.0 / 3.0),
        ] {
            canvas.text(value, x, figures_top, 20, INK);
            canvas.text(caption, x, figures_top + f64::from(GLYPH_HEIGHT * 20) + 48.0, 7, MUTED);
        }

        canvas.encode()
    }
}

/// An RGBA canvas with clipping draw operations.
struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, WHITE),
        }
    }

    fn width(&self) -> f64 {
        f64::from(self.image.width())
    }

    fn plot(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && x < i64::from(self.image.width()) && y < i64::from(self.image.height()) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>, alpha: f64) {
        let base = *self.image.get_pixel(x, y);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - alpha) + f64::from(b) * alpha).round() as u8;
        self.image.put_pixel(
            x,
            y,
            Rgba([mix(base[0], color[0]), mix(base[1], color[1]), mix(base[2], color[2]), 255]),
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        let (x1, y1) = ((x + width).round() as i64, (y + height).round() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, color);
            }
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Rgba<u8>) {
        let length = (to.0 - from.0).hypot(to.1 - from.1);
        let steps = length.ceil().max(1.0) as u32;
        let half = thickness / 2.0;
        for step in 0..=steps {
            let t = f64::from(step) / f64::from(steps);
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.fill_rect(x - half, y - half, thickness, thickness, color);
        }
    }

    /// Draws `text` centered on `cx`, kept inside the margins.
    fn text(&mut self, text: &str, cx: f64, top: f64, scale: u32, color: Rgba<u8>) {
        let width = f64::from(text_width(text, scale));
        let max_left = (self.width() - MARGIN - width).max(MARGIN);
        let left = (cx - width / 2.0).clamp(MARGIN, max_left);
        let cell = f64::from(scale);

        for (i, c) in text.chars().enumerate() {
            let origin = left + f64::from(i as u32 * ADVANCE) * cell;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            origin + f64::from(col) * cell,
                            top + row as f64 * cell,
                            cell,
                            cell,
                            color,
                        );
                    }
                }
            }
        }
    }

    fn radar(&mut self, card: &ImageCard, cx: f64, cy: f64, radius: f64) {
        let n = card.values.len().max(1) as f64;
        let point = |i: usize, r: f64| {
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / n;
            (cx + r * angle.cos(), cy + r * angle.sin())
        };
        let polygon: Vec<(f64, f64)> = card
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| point(i, radius * (v / SCALE_MAX).clamp(0.0, 1.0)))
            .collect();

        let rings: Vec<f64> = (1..=(SCALE_MAX / SCALE_STEP) as u32)
            .map(|ring| radius * f64::from(ring) * SCALE_STEP / SCALE_MAX)
            .collect();

        // One pass over the chart area: polygon fill, then grid rings on top.
        let x0 = (cx - radius - 2.0).max(0.0) as u32;
        let y0 = (cy - radius - 2.0).max(0.0) as u32;
        let x1 = ((cx + radius + 2.0) as u32).min(self.image.width());
        let y1 = ((cy + radius + 2.0) as u32).min(self.image.height());
        for py in y0..y1 {
            for px in x0..x1 {
                let (x, y) = (f64::from(px) + 0.5, f64::from(py) + 0.5);
                if contains(&polygon, x, y) {
                    self.blend(px, py, ACCENT, FILL_ALPHA);
                }
                let d = (x - cx).hypot(y - cy);
                if rings.iter().any(|r| (d - r).abs() <= 1.5) {
                    self.image.put_pixel(px, py, GRID);
                }
            }
        }

        for i in 0..card.values.len() {
            self.line((cx, cy), point(i, radius), 3.0, GRID);
        }
        for (i, from) in polygon.iter().enumerate() {
            let to = polygon[(i + 1) % polygon.len()];
            self.line(*from, to, 8.0, ACCENT);
        }

        let widest = card.labels.iter().map(String::as_str).max_by_key(|l| l.chars().count());
        let scale = widest.map_or(5, |l| fitting_scale(l, self.width() * 0.42, 5));
        let half_height = f64::from(GLYPH_HEIGHT * scale) / 2.0;
        for (i, label) in card.labels.iter().enumerate() {
            let (x, y) = point(i, radius * 1.12);
            self.text(label, x, y - half_height, scale, LABEL);
        }
    }

    fn encode(self) -> review_core::Result<Vec<u8>> {
        let (width, height) = self.image.dimensions();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| SessionError::Export(format!("cannot encode card: {e}")))?;
        debug!(width, height, bytes = bytes.len(), "card encoded");
        Ok(bytes)
    }
}

/// Largest scale up to `max` at which `text` fits in `width`.
fn fitting_scale(text: &str, width: f64, max: u32) -> u32 {
    let unit = f64::from(text_width(text, 1).max(1));
    ((width / unit).floor() as u32).clamp(1, max)
}

/// Even-odd point-in-polygon test.
fn contains(polygon: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for (i, &(xi, yi)) in polygon.iter().enumerate() {
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
