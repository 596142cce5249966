// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket classification vocabulary.
//!
//! Every classification enum has a stable SCREAMING_SNAKE string form used
//! for persistence, history entries and the API. Unknown strings are
//! rejected with `DomainError::Validation` naming the field.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates `as_str`, `ALL`, `FromStr` and `Display` for a fieldless enum.
///
/// The macro only maps variants to strings; no rule logic lives here.
macro_rules! classification_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the persisted string representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(DomainError::validation(
                        $field,
                        format!("unknown value '{s}'"),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

classification_enum! {
    /// The functional area a ticket belongs to.
    Category, "category" {
        Hardware => "HARDWARE",
        Software => "SOFTWARE",
        Network => "NETWORK",
        Access => "ACCESS",
        Other => "OTHER",
    }
}

classification_enum! {
    /// How quickly the requester wants the ticket handled.
    Priority, "priority" {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

classification_enum! {
    /// The breadth of the problem.
    Impact, "impact" {
        Minor => "MINOR",
        Moderate => "MODERATE",
        Major => "MAJOR",
        Critical => "CRITICAL",
    }
}

classification_enum! {
    /// How time-sensitive the problem is.
    Urgency, "urgency" {
        Low => "LOW",
        Normal => "NORMAL",
        High => "HIGH",
        Immediate => "IMMEDIATE",
    }
}

classification_enum! {
    /// The support tier that determines SLA targets.
    ServiceLevel, "service_level" {
        Standard => "STANDARD",
        Premium => "PREMIUM",
        CriticalSupport => "CRITICAL_SUPPORT",
    }
}

impl Category {
    /// Human-readable name used in exports.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Hardware => "Hardware",
            Self::Software => "Software",
            Self::Network => "Network",
            Self::Access => "Access",
            Self::Other => "Other",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Default for Impact {
    fn default() -> Self {
        Self::Moderate
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Normal
    }
}

impl Default for ServiceLevel {
    fn default() -> Self {
        Self::Standard
    }
}
