// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of a ticket title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a saved search name.
pub const MAX_SEARCH_NAME_LEN: usize = 100;

/// Validates that a required text field is not blank and fits its limit.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming `field` if the trimmed value is
/// empty or longer than `max_len` characters.
pub fn validate_required_text(
    field: &str,
    value: &str,
    max_len: Option<usize>,
) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if let Some(max) = max_len
        && trimmed.chars().count() > max
    {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Validates a ticket title.
///
/// # Errors
///
/// Returns an error if the title is blank or too long.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    validate_required_text("title", title, Some(MAX_TITLE_LEN))
}

/// Validates a ticket description.
///
/// # Errors
///
/// Returns an error if the description is blank.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    validate_required_text("description", description, None)
}

/// Validates the resolution text required to enter `Resolved`.
///
/// # Errors
///
/// Returns an error if the resolution is missing or blank.
pub fn validate_resolution(resolution: Option<&str>) -> Result<(), DomainError> {
    validate_required_text("resolution", resolution.unwrap_or_default(), None)
}

/// Validates comment content.
///
/// # Errors
///
/// Returns an error if the content is blank.
pub fn validate_comment_content(content: &str) -> Result<(), DomainError> {
    validate_required_text("content", content, None)
}

/// Validates a saved search name.
///
/// # Errors
///
/// Returns an error if the name is blank or too long.
pub fn validate_search_name(name: &str) -> Result<(), DomainError> {
    validate_required_text("name", name, Some(MAX_SEARCH_NAME_LEN))
}
