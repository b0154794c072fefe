//! Slugs

use thiserror::Error;

/// Longest slug accepted.
pub const MAX_SLUG_LEN: usize = 128;

/// Slug validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    /// Slug is empty.
    #[error("slug cannot be empty")]
    Empty,

    /// Slug is longer than [`MAX_SLUG_LEN`].
    #[error("slug cannot be longer than {MAX_SLUG_LEN} characters")]
    TooLong,

    /// Slug has characters outside `[a-z0-9-]` or misplaced dashes.
    #[error("slug may only contain lowercase letters, digits and single inner dashes")]
    InvalidCharacters,
}

/// Derive a URL slug from a display name, cut to [`MAX_SLUG_LEN`] at a clean boundary.
///
/// ```
/// assert_eq!(emporium::slug::slugify("  Hiking & Trail Shoes "), "hiking-trail-shoes");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }

            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    // Only ASCII is ever pushed, so every index is a char boundary.
    slug.truncate(MAX_SLUG_LEN);

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Check that `slug` is a canonical slug.
///
/// # Errors
///
/// Returns a [`SlugError`] describing the first problem found.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(SlugError::TooLong);
    }

    let valid_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid_chars || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(SlugError::InvalidCharacters);
    }

    Ok(())
}
