//! # Pricetag CLI
//!
//! Command-line interface for rendering price tags and print sheets.
//!
//! ## Usage
//!
//! ```bash
//! # List available sizes and themes
//! pricetag sizes
//! pricetag themes
//!
//! # Render one tag to PNG
//! pricetag render --record item.json --size Standard --out tag.png
//!
//! # Brand skin, two languages side by side on an A4 sheet
//! pricetag render --record item.json --size Wide --brand nordlys \
//!     --lang en --lang2 ka --sheet A4 --out pair.png
//!
//! # Render a whole file of records onto A4 sheets
//! pricetag batch --records items.json --size Small --sheet A4 --out-dir sheets/
//!
//! # How many tags of a size fit on a sheet
//! pricetag fit --size Standard --sheet A4
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for layout decisions.

use clap::{Parser, Subcommand};
use image::RgbaImage;
use log::info;
use std::path::{Path, PathBuf};

use pricetag::{
    Catalog, TagError,
    batch::{BatchReport, render_batch},
    catalog::load_records,
    paper::SheetSize,
    sheet::{fit_count, pack_batch, pack_pair, pack_single},
    style::StyleSelection,
    tag::{self, BackgroundCache},
};

/// Pricetag - Retail price tag renderer
#[derive(Parser, Debug)]
#[command(name = "pricetag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overlaying the built-in sizes, themes, brands and labels
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the tag(s) of a single record
    Render {
        /// Record JSON file (an object, or an array whose first item is used)
        #[arg(long, value_name = "FILE")]
        record: PathBuf,

        /// Tag size name
        #[arg(long, default_value = "Standard")]
        size: String,

        /// Theme name
        #[arg(long, default_value = "default")]
        theme: String,

        /// Brand skin name (overrides the theme)
        #[arg(long, default_value = "default")]
        brand: String,

        /// Tag language
        #[arg(long, default_value = "en")]
        lang: String,

        /// Second language; renders a companion tag
        #[arg(long)]
        lang2: Option<String>,

        /// Mark the item as a special offer
        #[arg(long)]
        special: bool,

        /// Place the output on a print sheet (A4, A3, Letter)
        #[arg(long)]
        sheet: Option<String>,

        /// Output PNG path
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Render many records onto print sheets
    Batch {
        /// JSON array of records
        #[arg(long, value_name = "FILE")]
        records: PathBuf,

        /// Tag size name
        #[arg(long, default_value = "Standard")]
        size: String,

        /// Theme name
        #[arg(long, default_value = "default")]
        theme: String,

        /// Brand skin name (overrides the theme)
        #[arg(long, default_value = "default")]
        brand: String,

        /// Tag language
        #[arg(long, default_value = "en")]
        lang: String,

        /// Print sheet name
        #[arg(long, default_value = "A4")]
        sheet: String,

        /// Directory for the sheet PNGs
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Show how a tag size tiles a sheet
    Fit {
        /// Tag size name
        #[arg(long)]
        size: String,

        /// Print sheet name
        #[arg(long, default_value = "A4")]
        sheet: String,
    },

    /// List tag sizes
    Sizes,

    /// List themes and brand skins
    Themes,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TagError> {
    let cli = Cli::parse();
    let catalog = match &cli.config {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::built_in(),
    };

    match cli.command {
        Commands::Render {
            record,
            size,
            theme,
            brand,
            lang,
            lang2,
            special,
            sheet,
            out,
        } => {
            let record = load_records(&record)?
                .into_iter()
                .next()
                .ok_or_else(|| TagError::InvalidRecord("no record in file".into()))??;

            let selection = selection(&theme, &brand);
            let dual = lang2.is_some();
            let resources = catalog.resources();

            let mut tags = Vec::new();
            for language in std::iter::once(&lang).chain(lang2.as_ref()) {
                let request = catalog
                    .request(&size, &selection, language)?
                    .special(special)
                    .dual(dual);
                tags.push(tag::render(&record, &request, &resources, None)?);
            }

            let images = match sheet {
                Some(name) => {
                    let sheet = sheet_by_name(&name)?;
                    match tags.as_slice() {
                        [a, b] => pack_pair(a, b, &sheet),
                        _ => tags.iter().map(|t| pack_single(t, &sheet)).collect(),
                    }
                }
                None => tags,
            };
            for path in save_all(&out, &images)? {
                println!("Saved to {}", path.display());
            }
        }

        Commands::Batch {
            records,
            size,
            theme,
            brand,
            lang,
            sheet,
            out_dir,
        } => {
            let sheet = sheet_by_name(&sheet)?;
            let request = catalog.request(&size, &selection(&theme, &brand), &lang)?;
            let fit = fit_count(&sheet, request.size.width_cm, request.size.height_cm);
            if fit.is_empty() {
                return Err(TagError::DegenerateSize {
                    width_cm: request.size.width_cm,
                    height_cm: request.size.height_cm,
                });
            }

            // Malformed items are reported alongside render failures.
            let mut parse_failures = BatchReport::default();
            let mut positions = Vec::new();
            let mut items = Vec::new();
            for (idx, item) in load_records(&records)?.into_iter().enumerate() {
                match item {
                    Ok(record) => {
                        positions.push(idx);
                        items.push(record);
                    }
                    Err(e) => parse_failures.push_failure(Some(idx), "", e),
                }
            }

            let resources = catalog.resources();
            let mut report = render_batch(&items, &request, &resources, &BackgroundCache::new());
            for tag in &mut report.tags {
                tag.index = positions[tag.index];
            }
            for failure in &mut report.failures {
                failure.index = failure.index.map(|i| positions[i]);
            }
            report.failures.extend(parse_failures.failures);
            report.failures.sort_by_key(|f| f.index);

            std::fs::create_dir_all(&out_dir)?;
            let sheets = pack_batch(&report.images(), &fit, &sheet)?;
            for (i, page) in sheets.iter().enumerate() {
                let path = out_dir.join(format!("sheet_{:03}.png", i + 1));
                page.save(&path)?;
                info!("Saved {}", path.display());
            }

            println!(
                "{} ({} per sheet, {} sheet(s))",
                report.summary(),
                fit.count,
                sheets.len()
            );
            for failure in &report.failures {
                let index = failure.index.map_or("?".to_string(), |i| i.to_string());
                println!("  #{} {}: {}", index, failure.sku, failure.error);
            }
        }

        Commands::Fit { size, sheet } => {
            let size = catalog.size(&size)?;
            let sheet = sheet_by_name(&sheet)?;
            let fit = fit_count(&sheet, size.width_cm, size.height_cm);
            println!(
                "{} ({}x{} cm) on {}: {} per sheet",
                size.name, size.width_cm, size.height_cm, sheet.name, fit.count
            );
            println!(
                "  grid: {} cols x {} rows{}",
                fit.cols,
                fit.rows,
                if fit.rotated { " (rotated)" } else { "" }
            );
        }

        Commands::Sizes => {
            println!("Available sizes:");
            for size in &catalog.sizes {
                let (w, h) = size.pixel_size();
                let mut notes = Vec::new();
                if size.is_accessory_style {
                    notes.push("accessory".to_string());
                }
                if let Some(design) = &size.design {
                    notes.push(design.clone());
                }
                println!(
                    "  {:<12} {:>5} x {:<5} cm  {:>4} x {:<4} px  specs: {}  {}",
                    size.name,
                    size.width_cm,
                    size.height_cm,
                    w,
                    h,
                    size.spec_limit,
                    notes.join(", ")
                );
            }
        }

        Commands::Themes => {
            println!("Available themes:");
            for theme in &catalog.themes {
                println!("  {}", theme.name);
            }
            println!("\nAvailable brands:");
            for brand in &catalog.brands {
                println!("  {}", brand.name);
            }
        }
    }

    Ok(())
}

fn selection(theme: &str, brand: &str) -> StyleSelection {
    StyleSelection::default().with_theme(theme).with_brand(brand)
}

fn sheet_by_name(name: &str) -> Result<SheetSize, TagError> {
    SheetSize::by_name(name).ok_or_else(|| TagError::Config(format!("Unknown sheet '{}'", name)))
}

/// Save one image to `out`, or several as `out_1.png`, `out_2.png`, ...
fn save_all(out: &Path, images: &[RgbaImage]) -> Result<Vec<PathBuf>, TagError> {
    let paths: Vec<PathBuf> = if images.len() == 1 {
        vec![out.to_path_buf()]
    } else {
        let stem = out
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tag".to_string());
        (1..=images.len())
            .map(|i| out.with_file_name(format!("{}_{}.png", stem, i)))
            .collect()
    };

    for (image, path) in images.iter().zip(&paths) {
        image
            .save(path)
            .map_err(|e| TagError::Image(format!("Failed to save PNG: {}", e)))?;
    }
    Ok(paths)
}
