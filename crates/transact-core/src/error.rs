// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Transact bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum TransactError {
    // -- Configuration --
    /// A configuration field is missing, mis-shaped, or carries an unknown
    /// enum token. `field` is a dotted path such as `tasks[1].product`.
    #[error("invalid configuration at `{field}`: {reason}")]
    Config { field: String, reason: String },

    // -- Platform bridge --
    #[error("platform error: {0}")]
    Platform(String),

    #[error("native SDK not available on this platform")]
    PlatformUnavailable,

    // -- Settings / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TransactError {
    /// Shorthand for a [`TransactError::Config`] at the given field path.
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Error code reported to the host caller in a failed method response.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } | Self::Serialization(_) => "ConfigError",
            Self::Platform(_) | Self::PlatformUnavailable | Self::Io(_) => "PlatformError",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TransactError>;
