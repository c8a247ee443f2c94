//! Copies numbered sprites to their semantic names.
//!
//! The mapping is a TOML file with a single `[mapping]` table:
//!
//! ```toml
//! [mapping]
//! scruffy-dog = 1
//! dark-crow = 2
//! raccoon = 0 # not assigned yet
//! ```
//!
//! Any entry still at `0` blocks the whole run. A numbered file that is missing only
//! skips its own entry.
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use log::{info, warn};

use crate::utils::{
    constants::{DEFAULT_SPRITE_EXTENSION, UNMAPPED_SPRITE_INDEX},
    misc::{maybe_add_extension_to_string, sprite_file_name},
};

const MAPPING_TABLE: &str = "mapping";

/// Names become file names inside the sprites folder, so no separators, `.` or `..`.
fn check_name(name: &str) -> Result<(), RenameError> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    );

    if !is_plain || name.contains(['/', '\\']) {
        return Err(RenameError::InvalidMapping {
            message: format!("`{}` is not a plain file name", name),
        });
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error("Unmapped sprites: {}", .names.join(", "))]
    Unmapped { names: Vec<String> },
    #[error("Invalid mapping: {message}")]
    InvalidMapping { message: String },
    #[error("Cannot copy {} to {}: {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Semantic name to sprite index, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteMapping {
    entries: Vec<(String, u32)>,
}

impl SpriteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, index: u32) -> &mut Self {
        self.entries.push((name.into(), index));

        self
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unmapped(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, index)| *index == UNMAPPED_SPRITE_INDEX)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RenameError> {
        let table: toml::Table = toml::from_str(s).map_err(|err| RenameError::InvalidMapping {
            message: err.to_string(),
        })?;

        let Some(mapping) = table.get(MAPPING_TABLE).and_then(|value| value.as_table()) else {
            return Err(RenameError::InvalidMapping {
                message: format!("missing `[{}]` table", MAPPING_TABLE),
            });
        };

        mapping
            .iter()
            .map(|(name, value)| {
                check_name(name)?;

                value
                    .as_integer()
                    .and_then(|index| u32::try_from(index).ok())
                    .map(|index| (name.to_owned(), index))
                    .ok_or_else(|| RenameError::InvalidMapping {
                        message: format!("`{}` is not a sprite index: {}", name, value),
                    })
            })
            .collect()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenameError> {
        let s = fs::read_to_string(path.as_ref()).map_err(|err| RenameError::InvalidMapping {
            message: format!("cannot read {}: {}", path.as_ref().display(), err),
        })?;

        Self::from_toml_str(&s)
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SpriteMapping {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, index)| (name.into(), index))
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RenameReport {
    /// Name and the file it was copied to
    pub copied: Vec<(String, PathBuf)>,
    /// Name and the numbered file that was not found
    pub skipped: Vec<(String, PathBuf)>,
}

impl RenameReport {
    pub fn total(&self) -> usize {
        self.copied.len() + self.skipped.len()
    }
}

pub struct RenameSprites {
    sprites_folder: PathBuf,
    mapping: SpriteMapping,
    extension: String,
}

impl RenameSprites {
    pub fn new(sprites_folder: impl AsRef<Path> + Into<PathBuf>) -> Self {
        Self {
            sprites_folder: sprites_folder.into(),
            mapping: SpriteMapping::default(),
            extension: DEFAULT_SPRITE_EXTENSION.to_string(),
        }
    }

    pub fn mapping(&mut self, mapping: SpriteMapping) -> &mut Self {
        self.mapping = mapping;

        self
    }

    pub fn extension(&mut self, ext: &str) -> &mut Self {
        self.extension = ext.trim_start_matches('.').to_string();

        self
    }

    /// Nothing is copied unless every entry has an index.
    pub fn work(&self) -> Result<RenameReport, RenameError> {
        let unmapped = self.mapping.unmapped();

        if !unmapped.is_empty() {
            return Err(RenameError::Unmapped {
                names: unmapped.into_iter().map(str::to_owned).collect(),
            });
        }

        for (name, _) in self.mapping.entries() {
            check_name(name)?;
        }

        if !self.sprites_folder.is_dir() {
            warn!(
                "Sprite folder {} does not exist, every entry will be skipped",
                self.sprites_folder.display()
            );
        }

        let mut report = RenameReport::default();

        for (name, index) in self.mapping.entries() {
            let from = self
                .sprites_folder
                .join(sprite_file_name(*index as usize, &self.extension));
            let to = self
                .sprites_folder
                .join(maybe_add_extension_to_string(name, &self.extension));

            if !from.is_file() {
                warn!("{} not found, skipping {}", from.display(), name);
                report.skipped.push((name.to_owned(), from));
                continue;
            }

            fs::copy(&from, &to).map_err(|source| RenameError::CopyFailed {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;

            info!("{} -> {}", from.display(), to.display());
            report.copied.push((name.to_owned(), to));
        }

        Ok(report)
    }
}
