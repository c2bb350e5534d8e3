//! Label fonts and text measurement.
//!
//! Fonts expose two measurement queries: a tight ink bounding box and an
//! advance-based size. Either may be unavailable for a given font or text,
//! so callers go through [`measure_text`], which prefers the bounding box,
//! falls back to the size query, and ends in an empty box.

use crate::{PlaceholderError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use std::path::Path;

/// Glyph cell size of the built-in bitmap font
pub const GLYPH_SIZE: u32 = 8;

/// Measured text extent relative to the draw origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBox {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Draw origin that centers this box inside a `width` x `height` area.
    /// May be negative when the text is larger than the area.
    pub fn centered_origin(&self, width: u32, height: u32) -> (i32, i32) {
        let x = (width as i32 - self.width as i32) / 2 - self.x;
        let y = (height as i32 - self.height as i32) / 2 - self.y;
        (x, y)
    }
}

pub trait LabelFont {
    /// Tight bounds of the inked pixels, `None` when the font can't tell.
    fn text_bbox(&self, text: &str) -> Option<TextBox>;

    /// Advance width and line height, `None` when the font can't tell.
    fn text_size(&self, text: &str) -> Option<(u32, u32)>;

    /// Draw `text` with its origin at (x, y). Pixels outside the image are dropped.
    fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>);
}

/// Measure `text`, preferring the bounding box over the legacy size query.
pub fn measure_text(font: &dyn LabelFont, text: &str) -> TextBox {
    if let Some(bbox) = font.text_bbox(text) {
        return bbox;
    }

    log::debug!("bounding box unavailable for \"{text}\", using size query");

    match font.text_size(text) {
        Some((width, height)) => TextBox {
            x: 0,
            y: 0,
            width,
            height,
        },
        None => {
            log::debug!("size query unavailable for \"{text}\", label left empty");
            TextBox::default()
        }
    }
}

/// Built-in 8x8 bitmap font, drawn at an integer pixel scale.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    scale: u32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

impl BitmapFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn glyph(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
    }

    /// Set pixels of `text` in glyph units, with their pen offsets applied.
    fn ink(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
        text.chars()
            .filter_map(Self::glyph)
            .enumerate()
            .flat_map(|(index, rows)| {
                let pen = index as u32 * GLYPH_SIZE;
                rows.into_iter().enumerate().flat_map(move |(row, bits)| {
                    (0..GLYPH_SIZE)
                        .filter(move |col| bits & (1u8 << *col) != 0)
                        .map(move |col| (pen + col, row as u32))
                })
            })
    }
}

impl LabelFont for BitmapFont {
    fn text_bbox(&self, text: &str) -> Option<TextBox> {
        let bounds = Self::ink(text).fold(None, |acc: Option<(u32, u32, u32, u32)>, (x, y)| {
            Some(match acc {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            })
        });

        let Some((x0, y0, x1, y1)) = bounds else {
            return Some(TextBox::default());
        };

        Some(TextBox {
            x: (x0 * self.scale) as i32,
            y: (y0 * self.scale) as i32,
            width: (x1 - x0 + 1) * self.scale,
            height: (y1 - y0 + 1) * self.scale,
        })
    }

    fn text_size(&self, text: &str) -> Option<(u32, u32)> {
        let glyphs = text.chars().filter_map(Self::glyph).count() as u32;
        if glyphs == 0 {
            return Some((0, 0));
        }

        Some((glyphs * GLYPH_SIZE * self.scale, GLYPH_SIZE * self.scale))
    }

    fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let scale = self.scale as i32;
        for (px, py) in Self::ink(text) {
            let rect = Rect::at(x + px as i32 * scale, y + py as i32 * scale)
                .of_size(self.scale, self.scale);
            draw_filled_rect_mut(image, rect, color);
        }
    }
}

/// TrueType/OpenType font loaded from disk.
pub struct TrueTypeFont {
    font: FontVec,
    scale: PxScale,
}

impl TrueTypeFont {
    pub fn load(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|e| PlaceholderError::Font {
            error: e.to_string(),
            path: path.display().to_string(),
        })?;

        log::debug!("loaded font {} at {size}px", path.display());

        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }
}

impl LabelFont for TrueTypeFont {
    fn text_bbox(&self, text: &str) -> Option<TextBox> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut last = None;
        let mut bounds: Option<ab_glyph::Rect> = None;

        // Same layout order as `imageproc::drawing::draw_text_mut`: place,
        // advance, then kern only between outlined glyphs.
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            let glyph = id.with_scale_and_position(self.scale, point(caret, scaled.ascent()));
            caret += scaled.h_advance(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            if let Some(prev) = last {
                caret += scaled.kern(id, prev);
            }
            last = Some(id);

            let b = outlined.px_bounds();
            bounds = Some(match bounds {
                None => b,
                Some(acc) => ab_glyph::Rect {
                    min: point(acc.min.x.min(b.min.x), acc.min.y.min(b.min.y)),
                    max: point(acc.max.x.max(b.max.x), acc.max.y.max(b.max.y)),
                },
            });
        }

        bounds.map(|b| TextBox {
            x: b.min.x.floor() as i32,
            y: b.min.y.floor() as i32,
            width: (b.max.x - b.min.x).ceil() as u32,
            height: (b.max.y - b.min.y).ceil() as u32,
        })
    }

    fn text_size(&self, text: &str) -> Option<(u32, u32)> {
        Some(imageproc::drawing::text_size(self.scale, &self.font, text))
    }

    fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        imageproc::drawing::draw_text_mut(image, color, x, y, self.scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SizeOnlyFont;

    impl LabelFont for SizeOnlyFont {
        fn text_bbox(&self, _text: &str) -> Option<TextBox> {
            None
        }

        fn text_size(&self, text: &str) -> Option<(u32, u32)> {
            Some((text.len() as u32 * 6, 11))
        }

        fn draw(&self, _: &mut RgbaImage, _: i32, _: i32, _: &str, _: Rgba<u8>) {}
    }

    struct BlindFont;

    impl LabelFont for BlindFont {
        fn text_bbox(&self, _text: &str) -> Option<TextBox> {
            None
        }

        fn text_size(&self, _text: &str) -> Option<(u32, u32)> {
            None
        }

        fn draw(&self, _: &mut RgbaImage, _: i32, _: i32, _: &str, _: Rgba<u8>) {}
    }

    #[test]
    fn test_measure_falls_back_to_size() {
        let bbox = measure_text(&SizeOnlyFont, "LOGO");
        assert_eq!(
            bbox,
            TextBox {
                x: 0,
                y: 0,
                width: 24,
                height: 11
            }
        );
    }

    #[test]
    fn test_measure_empty_when_unsupported() {
        let bbox = measure_text(&BlindFont, "LOGO");
        assert!(bbox.is_empty());
        assert_eq!(bbox, TextBox::default());
    }

    #[test]
    fn test_bitmap_bbox() {
        let font = BitmapFont::new(1);
        let bbox = font.text_bbox("LOGO").unwrap();
        assert!(bbox.width > 0 && bbox.width <= 4 * GLYPH_SIZE);
        assert!(bbox.height > 0 && bbox.height <= GLYPH_SIZE);

        let doubled = BitmapFont::new(2).text_bbox("LOGO").unwrap();
        assert_eq!(doubled.x, bbox.x * 2);
        assert_eq!(doubled.y, bbox.y * 2);
        assert_eq!(doubled.width, bbox.width * 2);
        assert_eq!(doubled.height, bbox.height * 2);

        assert_eq!(font.text_bbox("").unwrap(), TextBox::default());
        assert_eq!(font.text_bbox("   ").unwrap(), TextBox::default());
    }

    #[test]
    fn test_bitmap_size() {
        let font = BitmapFont::default();
        assert_eq!(font.scale(), 2);
        assert_eq!(font.text_size("LOGO"), Some((64, 16)));
        assert_eq!(font.text_size("tunaMelt six inch"), Some((17 * 16, 16)));
        assert_eq!(font.text_size(""), Some((0, 0)));
        assert_eq!(BitmapFont::new(0).scale(), 1);
    }

    #[test]
    fn test_centered_origin() {
        let bbox = TextBox {
            x: 1,
            y: 2,
            width: 100,
            height: 20,
        };
        assert_eq!(bbox.centered_origin(400, 200), (149, 88));

        let wide = TextBox {
            x: 0,
            y: 0,
            width: 500,
            height: 10,
        };
        assert_eq!(wide.centered_origin(400, 200), (-50, 95));
    }

    #[test]
    fn test_bitmap_draw_clips() {
        let background = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        let mut image = RgbaImage::from_pixel(20, 10, background);

        BitmapFont::new(2).draw(&mut image, -6, -4, "WIDE LABEL", white);

        assert!(image.pixels().any(|p| *p == white));
        assert!(image.pixels().all(|p| *p == white || *p == background));
    }

    #[test]
    fn test_truetype_missing_file() {
        let err = TrueTypeFont::load("/nonexistent/font.ttf", 24.0)
            .err()
            .unwrap();
        assert!(matches!(err, PlaceholderError::Io(_)));
    }

    #[test]
    fn test_truetype_invalid_data() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font")?;

        let err = TrueTypeFont::load(&path, 24.0).err().unwrap();
        assert!(matches!(err, PlaceholderError::Font { .. }));
        Ok(())
    }

    const SYSTEM_FONTS: [&str; 4] = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
    ];

    fn system_font(size: f32) -> Option<TrueTypeFont> {
        SYSTEM_FONTS
            .iter()
            .find_map(|path| TrueTypeFont::load(path, size).ok())
    }

    /// (left, right, top, bottom) margins of the pixels that differ from `background`.
    fn ink_margins(image: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = image.dimensions();
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != background)
            .map(|(x, y, _)| (x, y))
            .collect();

        let min_x = inked.iter().map(|p| p.0).min()?;
        let max_x = inked.iter().map(|p| p.0).max()?;
        let min_y = inked.iter().map(|p| p.1).min()?;
        let max_y = inked.iter().map(|p| p.1).max()?;
        Some((min_x, w - 1 - max_x, min_y, h - 1 - max_y))
    }

    #[test]
    fn test_truetype_bbox_matches_drawn_ink() {
        let Some(font) = system_font(20.0) else {
            eprintln!("no system TrueType font found, skipping");
            return;
        };

        let background = Rgba([70, 160, 70, 255]);
        let white = Rgba([255, 255, 255, 255]);

        // Kerned pairs must measure the same way they are drawn.
        for text in ["LOGO", "AVAVAVAV To Wa", "tunaMelt six inch"] {
            let bbox = font.text_bbox(text).unwrap();
            assert!(!bbox.is_empty(), "{text}");

            let (w, h) = font.text_size(text).unwrap();
            assert!(w > 0 && h > 0, "{text}");

            let mut image = RgbaImage::from_pixel(400, 200, background);
            let (x, y) = bbox.centered_origin(400, 200);
            font.draw(&mut image, x, y, text, white);

            let (left, right, top, bottom) = ink_margins(&image, background).unwrap();
            assert!(left.abs_diff(right) <= 1, "{text}: {left} vs {right}");
            assert!(top.abs_diff(bottom) <= 2, "{text}: {top} vs {bottom}");
        }
    }

    #[test]
    fn test_truetype_whitespace_falls_back_to_size() {
        let Some(font) = system_font(20.0) else {
            eprintln!("no system TrueType font found, skipping");
            return;
        };

        assert_eq!(font.text_bbox("   "), None);
        let (width, height) = font.text_size("   ").unwrap();
        assert_eq!(
            measure_text(&font, "   "),
            TextBox {
                x: 0,
                y: 0,
                width,
                height
            }
        );
    }
}
