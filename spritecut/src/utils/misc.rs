use crate::utils::constants::SPRITE_FILE_PREFIX;

#[macro_export]
macro_rules! err {
    ($e: ident) => {{
        use eyre::eyre;

        Err(eyre!($e))
    }};

    ($format_string: literal) => {{
        use eyre::eyre;

        Err(eyre!($format_string))
    }};

    ($($arg:tt)*) => {{
        use eyre::eyre;

        Err(eyre!($($arg)*))
    }};
}

/// `sprite_NNN.<ext>` where NNN is the 1-based scan index padded to 3 digits.
///
/// The rename tool relies on this exact scheme.
pub fn sprite_file_name(index: usize, ext: &str) -> String {
    format!("{}_{:03}.{}", SPRITE_FILE_PREFIX, index, ext)
}

pub fn maybe_add_extension_to_string(s: &str, ext: &str) -> String {
    let ext_with_dot = format!(".{}", ext);

    if s.ends_with(&ext_with_dot) {
        s.to_string()
    } else {
        format!("{}.{}", s, ext)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sprite_names_are_zero_padded() {
        assert_eq!(sprite_file_name(1, "png"), "sprite_001.png");
        assert_eq!(sprite_file_name(42, "png"), "sprite_042.png");
        assert_eq!(sprite_file_name(134, "bmp"), "sprite_134.bmp");
        assert_eq!(sprite_file_name(1000, "png"), "sprite_1000.png");
    }

    #[test]
    fn extension_added_once() {
        assert_eq!(maybe_add_extension_to_string("raccoon", "png"), "raccoon.png");
        assert_eq!(
            maybe_add_extension_to_string("raccoon.png", "png"),
            "raccoon.png"
        );
    }
}
