use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use spritecut::modules::extract_sprites::SpriteExtract;

use crate::config::parse_config;

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct ExtractSpritesCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Cuts every sprite out of a sprite sheet into sprite_NNN files
    #[command(name = "extract_sprites")]
    ExtractSprites {
        /// Path to the sprite sheet
        #[arg(short, long)]
        path: PathBuf,
        /// Output folder. Defaults to `sprites` next to the sheet
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max per channel difference that still counts as background
        #[arg(long)]
        tolerance: Option<u8>,
        /// Shortest sprite side kept, in pixels
        #[arg(long)]
        min_size: Option<usize>,
        /// Empty rows/columns needed between two sprites
        #[arg(long)]
        gap_threshold: Option<usize>,
        /// Extra pixels around every sprite
        #[arg(long)]
        padding: Option<u32>,
        /// Output image format
        #[arg(long)]
        extension: Option<String>,
    },
}

pub struct ExtractSprites;

impl Cli for ExtractSprites {
    fn name(&self) -> &'static str {
        "extract_sprites"
    }

    fn cli(&self) -> CliRes {
        let cli = ExtractSpritesCli::parse();

        let Commands::ExtractSprites {
            path,
            output,
            tolerance,
            min_size,
            gap_threshold,
            padding,
            extension,
        } = cli.command;

        let config = match parse_config() {
            Ok(config) => config,
            Err(err) => {
                println!("Error parsing config.toml: {}", err);
                return CliRes::Err;
            }
        };

        let mut extract = SpriteExtract::new(&path);

        extract.options(config.extract);

        if let Some(folder) = output.or(config.sprites_folder) {
            extract.sprites_folder(folder);
        }

        if let Some(v) = tolerance {
            extract.tolerance(v);
        }

        if let Some(v) = min_size {
            extract.min_size(v);
        }

        if let Some(v) = gap_threshold {
            extract.gap_threshold(v);
        }

        if let Some(v) = padding {
            extract.padding(v);
        }

        if let Some(ext) = extension.as_deref() {
            extract.extension(ext);
        }

        let report = match extract.work() {
            Ok(report) => report,
            Err(err) => {
                println!("{}", err);
                return CliRes::Err;
            }
        };

        let folder = extract.get_sprites_folder();

        println!(
            "Extracted {} sprites to {}",
            report.sprites.len(),
            folder.display()
        );

        if let (Some(first), Some(last)) = (report.written.first(), report.written.last()) {
            println!(
                "Files: {} ~ {}",
                first
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default(),
                last.file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default(),
            );
            println!("Next: check the sprites, map names to numbers and run rename_sprites");
        }

        CliRes::Ok
    }

    fn cli_help(&self) {
        let _ = ExtractSpritesCli::command().print_help();
    }
}
