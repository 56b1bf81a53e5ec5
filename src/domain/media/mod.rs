pub mod entity;
pub mod invariants;

pub use entity::{MediaId, MediaItem};
pub use invariants::validate_media_item;
