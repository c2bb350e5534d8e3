//! # Placeholder - placeholder image generation
//!
//! Renders the app's placeholder assets: one logo plus a labeled, solid-color
//! rectangle for every sandwich variant and size preset, encoded as PNG.
//!
//! ## Modules
//!
//! - `preset`: variant names, size presets and the `CatalogConfig`
//! - `font`: text measurement and the built-in / TrueType label fonts
//! - `canvas`: solid-color RGBA canvas with centered labels
//! - `output`: project root and output directory resolution
//! - `generator`: the one-shot generation pass

pub mod canvas;
pub mod font;
pub mod generator;
pub mod output;
pub mod preset;

pub use canvas::Canvas;
pub use font::{BitmapFont, LabelFont, TextBox, TrueTypeFont, measure_text};
pub use generator::{Generator, ensure_encoder};
pub use output::OutputLocation;
pub use preset::{CatalogConfig, SizePreset};

pub type Result<T> = std::result::Result<T, PlaceholderError>;

#[derive(thiserror::Error, Debug)]
pub enum PlaceholderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load font {path}. Error: {error}")]
    Font { error: String, path: String },

    #[error("{0:?} encoding is not available in the linked image library")]
    EncoderUnavailable(image::ImageFormat),
}
