//! Slug resolution shared by catalog entities.

use emporium::slug::{SlugError, slugify, validate_slug};

/// Use the provided slug when present, otherwise derive one from the name.
pub(crate) fn resolve_slug(name: &str, slug: Option<&str>) -> Result<String, SlugError> {
    let slug = match slug.map(str::trim).filter(|slug| !slug.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    };

    validate_slug(&slug)?;

    Ok(slug)
}
