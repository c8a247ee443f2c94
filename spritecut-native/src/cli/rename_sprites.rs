use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use spritecut::{
    modules::rename_sprites::{RenameError, RenameSprites as RenameSpritesModule, SpriteMapping},
    utils::constants::DEFAULT_SPRITES_FOLDER,
};

use crate::config::parse_config;

use super::*;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct RenameSpritesCli {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Copies sprite_NNN files to the names given in a mapping file
    #[command(name = "rename_sprites")]
    RenameSprites {
        /// Path to the mapping .toml
        #[arg(short, long)]
        mapping: PathBuf,
        /// Folder with the numbered sprites
        #[arg(short, long)]
        folder: Option<PathBuf>,
        /// Image extension of the sprites
        #[arg(long)]
        extension: Option<String>,
    },
}

pub struct RenameSprites;

impl Cli for RenameSprites {
    fn name(&self) -> &'static str {
        "rename_sprites"
    }

    fn cli(&self) -> CliRes {
        let cli = RenameSpritesCli::parse();

        let Commands::RenameSprites {
            mapping,
            folder,
            extension,
        } = cli.command;

        let config = match parse_config() {
            Ok(config) => config,
            Err(err) => {
                println!("Error parsing config.toml: {}", err);
                return CliRes::Err;
            }
        };

        let mapping = match SpriteMapping::from_file(&mapping) {
            Ok(mapping) => mapping,
            Err(err) => {
                println!("{}", err);
                return CliRes::Err;
            }
        };

        let folder = folder
            .or(config.sprites_folder)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SPRITES_FOLDER));

        let total = mapping.len();

        let mut rename = RenameSpritesModule::new(folder);

        rename
            .mapping(mapping)
            .extension(extension.as_deref().unwrap_or(&config.extract.extension));

        match rename.work() {
            Ok(report) => {
                for (name, from) in report.skipped.iter() {
                    println!("  x {} missing, skipped {}", from.display(), name);
                }

                println!("Done! {}/{} sprites ready.", report.copied.len(), total);

                CliRes::Ok
            }
            Err(RenameError::Unmapped { names }) => {
                println!("Not mapped yet: {}", names.join(", "));
                println!("Fill in their sprite numbers in the mapping file.");

                CliRes::Err
            }
            Err(err) => {
                println!("{}", err);

                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        let _ = RenameSpritesCli::command().print_help();
    }
}
