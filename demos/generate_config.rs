//! Generate a default extraction configuration file
//!
//! Creates a JSON config with all default parameters

use chroma_palette::ExtractionConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/palette.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = ExtractionConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Max colors:          {}", config.max_colors);
            eprintln!("  Min share:           {:.1}%", config.min_percentage);
            eprintln!(
                "  Sample stride:       {} bytes (every {} pixels)",
                config.sample_rate,
                config.sample_rate / 4
            );
            eprintln!("  Quantization step:   {}", config.quantization_factor);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
