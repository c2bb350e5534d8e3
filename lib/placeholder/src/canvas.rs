use crate::{
    Result,
    font::{LabelFont, measure_text},
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// Solid-color RGBA canvas with a centered label.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Center `text` on the canvas. An unmeasurable label is skipped.
    pub fn draw_centered_label(&mut self, font: &dyn LabelFont, text: &str, color: Rgba<u8>) {
        let bbox = measure_text(font, text);
        if bbox.is_empty() {
            log::debug!("skip empty label \"{text}\"");
            return;
        }

        let (x, y) = bbox.centered_origin(self.width(), self.height());
        log::debug!(
            "label \"{text}\" at ({x}, {y}), size: {}x{}",
            bbox.width,
            bbox.height
        );

        font.draw(&mut self.image, x, y, text, color);
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}
