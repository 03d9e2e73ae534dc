// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Transact bridge: method-call plugin sitting between a host caller and
//! the embedded native Transact SDK.
//!
//! The host hands [`plugin::TransactPlugin`] untyped method calls; the plugin
//! decodes them with `transact-codec`, presents the native SDK through the
//! [`traits::NativeTransact`] seam, and streams the SDK's events back as
//! encoded [`channel::ChannelMessage`]s through an [`plugin::EventPump`].

use std::sync::Arc;

pub mod channel;
pub mod plugin;
pub mod sink;
pub mod stub;
pub mod traits;

pub use channel::{ChannelMessage, MethodCall, MethodResponse};
pub use plugin::{EventPump, TransactPlugin};
pub use sink::{EventSink, SessionId, SessionRegistry};
pub use traits::NativeTransact;

/// Native SDK used when the host does not link one in.
///
/// Mobile hosts pass their own [`NativeTransact`] implementation to
/// [`TransactPlugin::new`]; desktop and CI builds get the stub, which
/// rejects every presentation with `PlatformUnavailable`.
pub fn default_sdk() -> Arc<dyn NativeTransact> {
    Arc::new(stub::StubSdk)
}
