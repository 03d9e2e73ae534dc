// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub SDK for desktop/CI builds where the native Transact SDK is unavailable.
//
// Presentation always fails with `PlatformUnavailable`; real implementations
// are supplied by the mobile host.

use transact_core::error::{Result, TransactError};
use transact_core::{ActionConfig, SessionConfig};

use crate::sink::EventSink;
use crate::traits::NativeTransact;

/// No-op SDK returned on non-mobile platforms.
pub struct StubSdk;

impl NativeTransact for StubSdk {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn present(&self, config: SessionConfig, _sink: EventSink) -> Result<()> {
        tracing::warn!(
            scope = ?config.scope,
            tasks = config.tasks.len(),
            "NativeTransact::present called on stub SDK"
        );
        Err(TransactError::PlatformUnavailable)
    }

    fn present_action(&self, config: ActionConfig, _sink: EventSink) -> Result<()> {
        tracing::warn!(id = %config.id, "NativeTransact::present_action called on stub SDK");
        Err(TransactError::PlatformUnavailable)
    }

    fn dismiss(&self) {
        tracing::warn!("NativeTransact::dismiss called on stub SDK");
    }
}
