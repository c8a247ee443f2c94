use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::eyre;
use image::{imageops, ImageFormat, Rgb, RgbaImage};
use log::{debug, info};
use serde::Deserialize;

use crate::{
    err,
    utils::{
        constants::{
            DEFAULT_BG_TOLERANCE, DEFAULT_GAP_THRESHOLD, DEFAULT_MIN_SPRITE_SIZE, DEFAULT_PADDING,
            DEFAULT_SPRITES_FOLDER, DEFAULT_SPRITE_EXTENSION,
        },
        img_stuffs::{estimate_background_color, make_background_transparent, ForegroundMask},
        misc::sprite_file_name,
        projection::{find_segments, Segment},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpriteExtractOptions {
    /// Max per channel difference from the background color that is still background
    pub tolerance: u8,
    /// Shortest accepted sprite side, in pixels
    pub min_size: usize,
    /// Number of empty rows or columns that separate two sprites
    pub gap_threshold: usize,
    /// Extra pixels around every sprite, clamped to the sheet
    pub padding: u32,
    /// Output image format, by extension
    pub extension: String,
}

impl Default for SpriteExtractOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BG_TOLERANCE,
            min_size: DEFAULT_MIN_SPRITE_SIZE,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            padding: DEFAULT_PADDING,
            extension: DEFAULT_SPRITE_EXTENSION.to_string(),
        }
    }
}

impl SpriteExtractOptions {
    pub fn check(&self) -> eyre::Result<()> {
        if self.gap_threshold == 0 {
            return err!("gap_threshold must be at least 1");
        }

        if self.min_size == 0 {
            return err!("min_size must be at least 1");
        }

        if self.extension.is_empty() {
            return err!("extension is empty");
        }

        self.output_format()?;

        Ok(())
    }

    /// Image format for `extension`. Only formats that keep an 8 bit alpha channel.
    pub fn output_format(&self) -> eyre::Result<ImageFormat> {
        let Some(format) = ImageFormat::from_extension(&self.extension) else {
            return err!("unknown image extension `{}`", self.extension);
        };

        let keeps_rgba8 = matches!(
            format,
            ImageFormat::Png
                | ImageFormat::Bmp
                | ImageFormat::Tiff
                | ImageFormat::Tga
                | ImageFormat::WebP
                | ImageFormat::Qoi
        );

        if !keeps_rgba8 || !format.writing_enabled() {
            return err!(
                "`{}` cannot be written as an RGBA image",
                self.extension
            );
        }

        Ok(format)
    }
}

/// `(y1, x1)` inclusive, `(y2, x2)` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub y1: usize,
    pub x1: usize,
    pub y2: usize,
    pub x2: usize,
}

impl BoundingBox {
    pub fn from_segments(row: Segment, column: Segment) -> Self {
        Self {
            y1: row.start,
            x1: column.start,
            y2: row.end,
            x2: column.end,
        }
    }

    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }

    /// Grows the box by `padding` on every side without leaving a `width` x `height` sheet.
    pub fn padded(&self, padding: usize, width: usize, height: usize) -> Self {
        Self {
            y1: self.y1.saturating_sub(padding),
            x1: self.x1.saturating_sub(padding),
            y2: (self.y2 + padding).min(height),
            x2: (self.x2 + padding).min(width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRecord {
    /// 1-based, row-major. Output file names come from this.
    pub index: usize,
    pub bbox: BoundingBox,
}

/// Finds row bands over the whole mask, then sprite columns inside each band.
///
/// Records come out top to bottom, then left to right inside a band.
pub fn detect_sprites(mask: &ForegroundMask, options: &SpriteExtractOptions) -> Vec<SpriteRecord> {
    let rows = find_segments(
        &mask.row_projection(),
        options.gap_threshold,
        options.min_size,
    );

    info!("Detected rows: {}", rows.len());

    rows.iter()
        .flat_map(|&row| {
            find_segments(
                &mask.column_projection(row),
                options.gap_threshold,
                options.min_size,
            )
            .into_iter()
            .map(move |column| BoundingBox::from_segments(row, column))
        })
        .enumerate()
        .map(|(i, bbox)| SpriteRecord {
            index: i + 1,
            bbox,
        })
        .collect()
}

/// Cuts `bbox` plus padding out of the sheet and clears its background.
///
/// Background is classified again on the crop itself because padding pixels are
/// outside of what the sheet mask covered.
pub fn crop_sprite(
    img: &RgbaImage,
    bbox: &BoundingBox,
    bg: Rgb<u8>,
    options: &SpriteExtractOptions,
) -> RgbaImage {
    let (width, height) = img.dimensions();
    let padded = bbox.padded(options.padding as usize, width as usize, height as usize);

    let mut crop = imageops::crop_imm(
        img,
        padded.x1 as u32,
        padded.y1 as u32,
        padded.width() as u32,
        padded.height() as u32,
    )
    .to_image();

    make_background_transparent(&mut crop, bg, options.tolerance);

    crop
}

#[derive(Debug)]
pub struct ExtractReport {
    pub background: Rgb<u8>,
    pub sprites: Vec<SpriteRecord>,
    pub written: Vec<PathBuf>,
}

pub struct SpriteExtract {
    sheet: PathBuf,
    // None means `sprites` next to the sheet
    sprites_folder: Option<PathBuf>,
    options: SpriteExtractOptions,
}

impl SpriteExtract {
    pub fn new(sheet: impl AsRef<Path> + Into<PathBuf>) -> Self {
        Self {
            sheet: sheet.into(),
            sprites_folder: None,
            options: SpriteExtractOptions::default(),
        }
    }

    pub fn sprites_folder(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.sprites_folder = Some(path.into());

        self
    }

    pub fn options(&mut self, options: SpriteExtractOptions) -> &mut Self {
        self.options = options;

        self
    }

    pub fn tolerance(&mut self, v: u8) -> &mut Self {
        self.options.tolerance = v;

        self
    }

    pub fn min_size(&mut self, v: usize) -> &mut Self {
        self.options.min_size = v;

        self
    }

    pub fn gap_threshold(&mut self, v: usize) -> &mut Self {
        self.options.gap_threshold = v;

        self
    }

    pub fn padding(&mut self, v: u32) -> &mut Self {
        self.options.padding = v;

        self
    }

    pub fn extension(&mut self, ext: &str) -> &mut Self {
        self.options.extension = ext.trim_start_matches('.').to_string();

        self
    }

    pub fn get_sprites_folder(&self) -> PathBuf {
        match &self.sprites_folder {
            Some(folder) => folder.to_path_buf(),
            None => self
                .sheet
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_SPRITES_FOLDER),
        }
    }

    fn check_sheet(&self) -> eyre::Result<()> {
        if !self.sheet.exists() {
            return err!("sprite sheet `{}` does not exist", self.sheet.display());
        }

        if !self.sheet.is_file() {
            return err!("sprite sheet `{}` is not a file", self.sheet.display());
        }

        Ok(())
    }

    /// Segments the whole sheet first, then writes `sprite_001`, `sprite_002`, ...
    ///
    /// Existing files with the same names are overwritten. Files written before a
    /// failure are left in place.
    pub fn work(&self) -> eyre::Result<ExtractReport> {
        self.options.check()?;
        let format = self.options.output_format()?;
        self.check_sheet()?;

        let img = image::open(&self.sheet)
            .map_err(|err| eyre!("Cannot open image {}: {}", self.sheet.display(), err))?
            .into_rgba8();

        let (width, height) = img.dimensions();

        if width == 0 || height == 0 {
            return err!("sprite sheet `{}` is empty", self.sheet.display());
        }

        info!("Loaded sprite sheet {} ({}x{})", self.sheet.display(), width, height);

        let background = estimate_background_color(&img);
        let Rgb([r, g, b]) = background;

        info!("Background color: RGB({}, {}, {})", r, g, b);

        let mask = ForegroundMask::new(&img, background, self.options.tolerance);

        info!(
            "Foreground pixels: {} / {}",
            mask.foreground_count(),
            width as usize * height as usize
        );

        let sprites = detect_sprites(&mask, &self.options);

        info!("Detected sprites: {}", sprites.len());

        let sprites_folder = self.get_sprites_folder();
        fs::create_dir_all(&sprites_folder)?;

        let mut written = Vec::with_capacity(sprites.len());

        for sprite in sprites.iter() {
            let crop = crop_sprite(&img, &sprite.bbox, background, &self.options);
            let path = sprites_folder.join(sprite_file_name(sprite.index, &self.options.extension));

            crop.save_with_format(&path, format)
                .map_err(|err| eyre!("Cannot write sprite {}: {}", path.display(), err))?;

            debug!(
                "{} ({}x{} @ {},{})",
                path.display(),
                crop.width(),
                crop.height(),
                sprite.bbox.x1,
                sprite.bbox.y1
            );

            written.push(path);
        }

        Ok(ExtractReport {
            background,
            sprites,
            written,
        })
    }
}
