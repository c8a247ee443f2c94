//! Parses config file

use std::{
    env,
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use spritecut::modules::extract_sprites::SpriteExtractOptions;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Defaults for `extract_sprites`, flags override these
    pub extract: SpriteExtractOptions,
    /// Where sprites are written to and renamed in
    pub sprites_folder: Option<PathBuf>,
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary
///
/// No config file is the same as an empty one.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path
            .parent()
            .map(|parent| parent.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        log::debug!("No {} found, using defaults", path.display());
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    let config: Config = toml::from_str(&buffer)?;

    // relative folders are relative to the config file
    let root = path.parent().unwrap_or_else(|| Path::new("."));

    let sprites_folder = config.sprites_folder.map(|folder| {
        if folder.is_relative() {
            root.join(folder)
        } else {
            folder
        }
    });

    Ok(Config {
        sprites_folder,
        ..config
    })
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "\
sprites_folder = \"client/public/sprites\"

[extract]
tolerance = 30
",
        )
        .unwrap();

        let config = parse_config_from_file(&path).unwrap();

        assert_eq!(config.extract.tolerance, 30);
        assert_eq!(config.extract.padding, 1);
        assert_eq!(
            config.sprites_folder,
            Some(dir.path().join("client/public/sprites"))
        );
    }

    #[test]
    fn empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();

        let config = parse_config_from_file(&path).unwrap();

        assert_eq!(config.extract, SpriteExtractOptions::default());
        assert!(config.sprites_folder.is_none());
    }

    #[test]
    fn malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[extract]\ntolerance = \"loose\"\n").unwrap();

        assert!(parse_config_from_file(&path).is_err());
    }
}
