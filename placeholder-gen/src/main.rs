//! Generate placeholder PNG images for the app.
//!
//! Run from the project root:
//!   cargo run -p placeholder-gen
//!
//! This creates:
//!   assets/images/logo.png
//!   assets/images/{SandwichType.name}_footlong.png
//!   assets/images/{SandwichType.name}_six_inch.png

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageFormat;
use placeholder::{
    BitmapFont, CatalogConfig, Generator, LabelFont, OutputLocation, TrueTypeFont, ensure_encoder,
};
use std::{path::PathBuf, process};

#[derive(Parser, Debug)]
#[command(version, about = "Generate placeholder PNG images into assets/images")]
struct Args {
    /// Project root, defaults to the parent of this tool's directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// TrueType/OpenType font for the labels, defaults to the built-in bitmap font
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels, used with --font
    #[arg(long, default_value_t = 20.0)]
    font_size: f32,
}

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn label_font(args: &Args) -> Box<dyn LabelFont> {
    let Some(path) = &args.font else {
        return Box::new(BitmapFont::default());
    };

    match TrueTypeFont::load(path, args.font_size) {
        Ok(font) => Box::new(font),
        Err(e) => {
            log::warn!("{e}. Fall back to the built-in font");
            Box::new(BitmapFont::default())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger();

    // `image` is built without default features; PNG must be compiled in.
    if let Err(e) = ensure_encoder(ImageFormat::Png) {
        println!(
            "ERROR: PNG encoding is not available. Rebuild with the `png` feature of the `image` crate."
        );
        println!("Import error: {e}");
        process::exit(1);
    }

    let location = match &args.root {
        Some(root) => OutputLocation::from_root(root),
        None => OutputLocation::from_tool_dir(env!("CARGO_MANIFEST_DIR")),
    };

    println!("Project root: {}", location.root.display());
    println!("Output directory: {}", location.dir.display());

    let generator = Generator::new(CatalogConfig::default()).with_font(label_font(&args));
    generator
        .run(&location, |path| println!("Wrote {}", path.display()))
        .with_context(|| format!("failed to generate images in {}", location.dir.display()))?;

    println!("Placeholders generated. Run: flutter pub get");

    Ok(())
}
