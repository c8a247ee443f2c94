pub mod extract_sprites;
pub mod rename_sprites;
