//! Variant names, size presets and the catalog of images to render.

use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, Rgba};

/// Variant names, kept in sync with the app's `SandwichType` enum.
pub const VARIANTS: [&str; 4] = [
    "veggieDelight",
    "chickenTeriyaki",
    "tunaMelt",
    "meatballMarinara",
];

pub const LOGO_FILE_NAME: &str = "logo.png";

/// A size label and the background color of its images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizePreset {
    pub label: String,
    pub color: Rgb<u8>,
}

impl SizePreset {
    pub fn new(label: impl Into<String>, color: Rgb<u8>) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    /// Label as shown on the image, e.g. `six_inch` -> `six inch`.
    pub fn display_label(&self) -> String {
        self.label.replace('_', " ")
    }

    /// Opaque fill color for the canvas.
    pub fn fill(&self) -> Rgba<u8> {
        let Rgb([r, g, b]) = self.color;
        Rgba([r, g, b, 255])
    }
}

pub fn default_variants() -> Vec<String> {
    VARIANTS.iter().map(|v| v.to_string()).collect()
}

pub fn default_sizes() -> Vec<SizePreset> {
    vec![
        SizePreset::new("footlong", Rgb([70, 160, 70])),
        SizePreset::new("six_inch", Rgb([160, 70, 70])),
    ]
}

/// Everything the generator renders, passed in explicitly.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CatalogConfig {
    #[derivative(Default(value = "default_variants()"))]
    pub variants: Vec<String>,

    /// Ordered; one image per variant and preset.
    #[derivative(Default(value = "default_sizes()"))]
    pub sizes: Vec<SizePreset>,

    #[derivative(Default(value = "String::from(\"LOGO\")"))]
    pub logo_text: String,

    #[derivative(Default(value = "Rgba([30, 120, 200, 255])"))]
    pub logo_color: Rgba<u8>,

    /// Logo canvas (width, height)
    #[derivative(Default(value = "(300, 300)"))]
    pub logo_size: (u32, u32),

    /// Variant canvas (width, height)
    #[derivative(Default(value = "(400, 200)"))]
    pub variant_size: (u32, u32),

    #[derivative(Default(value = "Rgba([255, 255, 255, 255])"))]
    pub text_color: Rgba<u8>,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant_file_name(variant: &str, size: &SizePreset) -> String {
        format!("{variant}_{}.png", size.label)
    }

    pub fn variant_label(variant: &str, size: &SizePreset) -> String {
        format!("{variant} {}", size.display_label())
    }

    /// Number of files a full run writes: the logo plus variants × sizes.
    pub fn image_count(&self) -> usize {
        1 + self.variants.len() * self.sizes.len()
    }

    /// Output file names in render order.
    pub fn file_names(&self) -> Vec<String> {
        let mut names = vec![LOGO_FILE_NAME.to_string()];
        for variant in &self.variants {
            for size in &self.sizes {
                names.push(Self::variant_file_name(variant, size));
            }
        }
        names
    }
}
