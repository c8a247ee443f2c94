/// Max per channel RGB difference that still counts as background.
pub const DEFAULT_BG_TOLERANCE: u8 = 25;
/// Shortest run, in pixels, kept on either axis.
pub const DEFAULT_MIN_SPRITE_SIZE: usize = 12;
/// Consecutive empty rows/columns that end a run.
pub const DEFAULT_GAP_THRESHOLD: usize = 2;
pub const DEFAULT_PADDING: u32 = 1;

pub const DEFAULT_SPRITE_EXTENSION: &str = "png";
pub const DEFAULT_SPRITES_FOLDER: &str = "sprites";
pub const SPRITE_FILE_PREFIX: &str = "sprite";

/// Mapping entries still pointing at this index have not been assigned yet.
pub const UNMAPPED_SPRITE_INDEX: u32 = 0;
