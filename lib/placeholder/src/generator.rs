//! The one-shot generation pass: the logo, then every variant in every size.

use crate::{
    PlaceholderError, Result,
    canvas::Canvas,
    font::{BitmapFont, LabelFont},
    output::OutputLocation,
    preset::{CatalogConfig, LOGO_FILE_NAME, SizePreset},
};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Fails when the linked `image` build can't encode `format`.
pub fn ensure_encoder(format: ImageFormat) -> Result<()> {
    if format.writing_enabled() {
        Ok(())
    } else {
        Err(PlaceholderError::EncoderUnavailable(format))
    }
}

pub struct Generator {
    config: CatalogConfig,
    font: Box<dyn LabelFont>,
}

impl Generator {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            font: Box::new(BitmapFont::default()),
        }
    }

    pub fn with_font(mut self, font: Box<dyn LabelFont>) -> Self {
        self.font = font;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn render_logo(&self) -> Canvas {
        let (width, height) = self.config.logo_size;
        let mut canvas = Canvas::new(width, height, self.config.logo_color);
        canvas.draw_centered_label(
            self.font.as_ref(),
            &self.config.logo_text,
            self.config.text_color,
        );
        canvas
    }

    pub fn render_variant(&self, variant: &str, size: &SizePreset) -> Canvas {
        let (width, height) = self.config.variant_size;
        let mut canvas = Canvas::new(width, height, size.fill());
        canvas.draw_centered_label(
            self.font.as_ref(),
            &CatalogConfig::variant_label(variant, size),
            self.config.text_color,
        );
        canvas
    }

    /// Render and write every image into `location`, calling `on_written`
    /// after each file. Returns the written paths in render order.
    pub fn run(
        &self,
        location: &OutputLocation,
        on_written: impl FnMut(&Path),
    ) -> Result<Vec<PathBuf>> {
        self.run_with_format(ImageFormat::Png, location, on_written)
    }

    /// Nothing is created on disk unless `format` can be encoded.
    pub(crate) fn run_with_format(
        &self,
        format: ImageFormat,
        location: &OutputLocation,
        mut on_written: impl FnMut(&Path),
    ) -> Result<Vec<PathBuf>> {
        ensure_encoder(format)?;
        location.ensure()?;

        let mut written = Vec::with_capacity(self.config.image_count());

        let path = location.path_of(LOGO_FILE_NAME);
        self.render_logo().save_png(&path)?;
        on_written(&path);
        written.push(path);

        for variant in &self.config.variants {
            for size in &self.config.sizes {
                let path = location.path_of(&CatalogConfig::variant_file_name(variant, size));
                self.render_variant(variant, size).save_png(&path)?;
                on_written(&path);
                written.push(path);
            }
        }

        log::info!(
            "generated {} images in {}",
            written.len(),
            location.dir.display()
        );

        Ok(written)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
