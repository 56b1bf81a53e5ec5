use super::entity::MediaItem;
use crate::domain::{DomainError, DomainResult};

/// Validates all MediaItem invariants
/// These are the absolute rules that must hold for an item to be usable
pub fn validate_media_item(item: &MediaItem) -> DomainResult<()> {
    validate_title(&item.title)?;
    validate_rating(item)?;
    Ok(())
}

/// Title cannot be blank
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Media title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// If a rating is present it must stay on the source's 0-10 scale
fn validate_rating(item: &MediaItem) -> DomainResult<()> {
    if let Some(rating) = item.rating {
        if !(0.0..=10.0).contains(&rating) {
            return Err(DomainError::InvariantViolation(format!(
                "Rating {} outside the 0-10 scale for media {}",
                rating, item.id
            )));
        }
    }
    Ok(())
}
