// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attachment metadata validation.
//!
//! Only metadata is checked; the blob behind the storage key is never read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Attachment policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentPolicyError {
    /// A required text field is blank.
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },

    /// The filename carries a directory component.
    #[error("Filename must not contain path separators")]
    PathInFilename,

    /// The attachment has no content.
    #[error("Attachment must not be empty")]
    Empty,

    /// The attachment exceeds the configured limit.
    #[error("Attachment is {size_bytes} bytes; the limit is {max_bytes} bytes")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

impl AttachmentPolicyError {
    /// The request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => *field,
            Self::PathInFilename => "filename",
            Self::Empty | Self::TooLarge { .. } => "size_bytes",
        }
    }
}

/// Attachment policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentPolicy {
    /// Largest accepted attachment, in bytes.
    pub max_bytes: u64,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

impl AttachmentPolicy {
    /// Validates attachment metadata against the policy.
    ///
    /// # Errors
    ///
    /// Returns an `AttachmentPolicyError` if:
    /// - The filename, mime type or storage key is blank
    /// - The filename contains `/` or `\`
    /// - The size is zero or above `max_bytes`
    pub fn validate(
        &self,
        filename: &str,
        size_bytes: u64,
        mime_type: &str,
        storage_key: &str,
    ) -> Result<(), AttachmentPolicyError> {
        if filename.trim().is_empty() {
            return Err(AttachmentPolicyError::MissingField { field: "filename" });
        }
        if filename.contains(['/', '\\']) {
            return Err(AttachmentPolicyError::PathInFilename);
        }
        if mime_type.trim().is_empty() {
            return Err(AttachmentPolicyError::MissingField { field: "mime_type" });
        }
        if storage_key.trim().is_empty() {
            return Err(AttachmentPolicyError::MissingField {
                field: "storage_key",
            });
        }
        if size_bytes == 0 {
            return Err(AttachmentPolicyError::Empty);
        }
        if size_bytes > self.max_bytes {
            return Err(AttachmentPolicyError::TooLarge {
                size_bytes,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}
