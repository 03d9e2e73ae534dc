// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::PlatformInfo;

/// Environment variable naming a JSON settings file for the host binary.
pub const SETTINGS_ENV: &str = "TRANSACT_BRIDGE_CONFIG";

/// Settings for one bridge instance. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Name of the method channel the host registers the plugin under.
    pub channel_name: String,
    /// Platform name reported to the native SDK.
    pub platform_name: String,
    /// Version of the embedded native SDK.
    pub sdk_version: String,
    /// Appended to `sdk_version` so sessions are attributed to this host.
    pub sdk_version_suffix: String,
    /// Attach a `platform` descriptor to every decoded session config.
    pub stamp_platform: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            channel_name: "atomic_transact_flutter".into(),
            platform_name: std::env::consts::OS.into(),
            sdk_version: env!("CARGO_PKG_VERSION").into(),
            sdk_version_suffix: "-flutter".into(),
            stamp_platform: true,
        }
    }
}

impl BridgeSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "bridge settings loaded");
        Ok(settings)
    }

    /// Load from the file named by [`SETTINGS_ENV`], or use defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable bridge settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Platform descriptor to stamp on session configs, if enabled.
    pub fn platform_info(&self) -> Option<PlatformInfo> {
        self.stamp_platform.then(|| PlatformInfo {
            name: self.platform_name.clone(),
            sdk_version: format!("{}{}", self.sdk_version, self.sdk_version_suffix),
        })
    }
}
