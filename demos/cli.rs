//! Command-line interface for chroma_palette
//!
//! Decodes an image, extracts its palette and prints palette + theme JSON

use chroma_palette::accessibility::{audit_palette, contrast_stats};
use chroma_palette::{analyze_pixels, ExtractionConfig, Palette, PixelBuffer, Theme, ThemeComposer};
use serde::Serialize;
use std::{env, path::Path, process};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output<'a> {
    palette: &'a Palette,
    theme: &'a Theme,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config needs a file path");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(image_path) = image_path_arg else {
        print_help(&args[0]);
        process::exit(1);
    };

    let config = match config_path {
        Some(path) => match ExtractionConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Warning: {}", error);
                eprintln!("Suggestion: {}", error.user_message());
                ExtractionConfig::default()
            }
        },
        None => ExtractionConfig::default(),
    };

    let image = match image::open(&image_path) {
        Ok(image) => image.to_rgba8(),
        Err(error) => {
            eprintln!("Error: cannot decode '{}': {}", image_path, error);
            process::exit(1);
        }
    };
    let buffer = PixelBuffer::from_rgba_image(&image);

    match analyze_pixels(&buffer, &config) {
        Ok(palette) => {
            let theme = ThemeComposer::new().compose_palette(&palette);
            print_result(&palette, &theme);
        }
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Extract a color palette and an accessible theme from an image.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Extraction settings (see generate_config)");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=chroma_palette=debug for pipeline statistics.");
}

fn print_result(palette: &Palette, theme: &Theme) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(&Output { palette, theme }) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("Palette ({} colors):", palette.len());
    for color in palette {
        eprintln!(
            "  {}  {:5.1}%  hsl({}, {}%, {}%)",
            color.hex, color.percentage, color.hsl.h, color.hsl.s, color.hsl.l
        );
    }

    let reports = audit_palette(palette);
    let stats = contrast_stats(&reports);
    eprintln!();
    eprintln!(
        "Contrast: {}/{} colors readable with black or white text ({}%)",
        stats.passing, stats.total, stats.pass_rate
    );
    for report in &reports {
        let advice = report.recommend();
        eprintln!(
            "  {}  white {:.2}, black {:.2} -> use {:?} text",
            report.background, report.white_ratio, report.black_ratio, advice.best_choice
        );
    }

    eprintln!();
    eprintln!("Theme:");
    for (role, color) in theme.roles() {
        eprintln!("  {:<18} {}", role, color);
    }

    if palette.is_empty() {
        eprintln!("  Warning: no opaque pixels sampled, showing the default theme.");
    }
}
