// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server configuration file.
//!
//! ```json
//! {
//!   "sla": { "premium": { "response_hours": 2, "resolution_hours": 8 } },
//!   "attachments": { "max_bytes": 5242880 }
//! }
//! ```
//!
//! Every section is optional and falls back to the built-in defaults.

use serde::Deserialize;
use servicedesk_api::AttachmentPolicy;
use servicedesk_domain::{DomainError, SlaPolicy};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid SLA configuration: {0}")]
    InvalidSla(DomainError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub sla: SlaPolicy,
    pub attachments: AttachmentPolicy,
}

impl ServerConfig {
    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or SLA targets whose response
    /// window exceeds the resolution window.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.sla.validate().map_err(ConfigError::InvalidSla)?;
        Ok(config)
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text: String = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
