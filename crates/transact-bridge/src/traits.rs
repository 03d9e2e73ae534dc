// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seam between the bridge and the native Transact SDK.

use transact_core::error::Result;
use transact_core::{ActionConfig, SessionConfig};

use crate::sink::EventSink;

/// Presentation surface of the native Transact SDK.
///
/// Implementations own the UI lifecycle. They report everything that
/// happens during a session through the [`EventSink`] they were given and
/// finish with exactly one completion event.
pub trait NativeTransact: Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;

    /// Present a Transact session.
    ///
    /// Returns once the session has been handed to the native UI. Errors
    /// mean nothing was presented and no events will follow.
    fn present(&self, config: SessionConfig, sink: EventSink) -> Result<()>;

    /// Present a single Transact action by id.
    fn present_action(&self, config: ActionConfig, sink: EventSink) -> Result<()>;

    /// Ask the native UI to close. Fire-and-forget: whether a `closed`
    /// completion follows is up to the SDK.
    fn dismiss(&self);
}
