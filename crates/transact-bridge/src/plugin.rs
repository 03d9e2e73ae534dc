// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-call plugin: the entry points the host invokes.
//
// Each call is decoded synchronously. Only a fully valid configuration
// reaches the native SDK. Failures are returned to the caller as an error
// response and never as an event. Events the SDK emits afterwards flow
// through one queue and are encoded as they are pulled off by the
// `EventPump`.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument, warn};

use transact_codec::{decode_action, decode_session, encode};
use transact_core::BridgeSettings;
use transact_core::error::{Result, TransactError};

use crate::channel::{
    ChannelMessage, DISMISS_TRANSACT, MethodCall, MethodResponse, PRESENT_ACTION,
    PRESENT_TRANSACT,
};
use crate::sink::{Envelope, EventSink, SessionId, SessionRegistry};
use crate::traits::NativeTransact;

/// Receiving end of the plugin's event queue.
///
/// Yields one encoded [`ChannelMessage`] per native event, in emission
/// order. Ends once the plugin and every outstanding sink have been dropped.
pub struct EventPump {
    rx: UnboundedReceiver<Envelope>,
}

impl EventPump {
    /// Wait for the next event and encode it.
    pub async fn next(&mut self) -> Option<ChannelMessage> {
        let envelope = self.rx.recv().await?;
        Some(Self::encode(envelope))
    }

    /// Encode the next queued event without waiting.
    pub fn try_next(&mut self) -> Option<ChannelMessage> {
        self.rx.try_recv().ok().map(Self::encode)
    }

    fn encode((session, event): Envelope) -> ChannelMessage {
        let message: ChannelMessage = encode(&event).into();
        debug!(session = %session, method = message.method, "event encoded");
        message
    }
}

/// The plugin object a host registers on its method channel.
pub struct TransactPlugin {
    sdk: Arc<dyn NativeTransact>,
    settings: BridgeSettings,
    registry: SessionRegistry,
    events: UnboundedSender<Envelope>,
}

impl TransactPlugin {
    /// Build a plugin around `sdk`, returning it with its event pump.
    pub fn new(sdk: Arc<dyn NativeTransact>, settings: BridgeSettings) -> (Self, EventPump) {
        let (events, rx) = mpsc::unbounded_channel();
        info!(
            platform = sdk.platform_name(),
            channel = %settings.channel_name,
            "transact plugin created"
        );

        let plugin = Self {
            sdk,
            settings,
            registry: SessionRegistry::default(),
            events,
        };
        (plugin, EventPump { rx })
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Number of sessions whose sinks are still open.
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }

    /// Dispatch a host call by method name.
    #[instrument(skip_all, fields(method = %call.method))]
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let outcome = match call.method.as_str() {
            PRESENT_TRANSACT => self.handle_present_transact(&call.arguments),
            PRESENT_ACTION => self.handle_present_action(&call.arguments),
            DISMISS_TRANSACT => {
                self.dismiss_transact();
                Ok(())
            }
            other => {
                debug!(method = other, "unknown method");
                return MethodResponse::NotImplemented;
            }
        };

        match outcome {
            Ok(()) => MethodResponse::ok(),
            Err(e) => {
                warn!(error = %e, code = e.code(), "method call failed");
                e.into()
            }
        }
    }

    fn handle_present_transact(&self, arguments: &Value) -> Result<()> {
        let configuration = arguments
            .get("configuration")
            .filter(|v| !v.is_null())
            .ok_or_else(|| TransactError::config("configuration", "required field missing"))?;
        let environment_path = environment_path(arguments)?;

        self.present_transact(configuration, environment_path).map(|_| ())
    }

    fn handle_present_action(&self, arguments: &Value) -> Result<()> {
        let environment_path = environment_path(arguments)?;
        self.present_action(arguments, environment_path).map(|_| ())
    }

    /// Decode a session configuration and present it.
    pub fn present_transact(
        &self,
        configuration: &Value,
        environment_path: Option<&str>,
    ) -> Result<SessionId> {
        let mut config = decode_session(configuration, environment_path)?;
        config.platform = self.settings.platform_info();

        let sink = self.open_sink();
        let session = sink.session_id();
        info!(session = %session, scope = ?config.scope, "presenting transact session");

        self.sdk.present(config, sink.clone()).inspect_err(|_| sink.close())?;
        Ok(session)
    }

    /// Decode an action record (`id`, optional `theme`) and present it.
    pub fn present_action(
        &self,
        arguments: &Value,
        environment_path: Option<&str>,
    ) -> Result<SessionId> {
        let config = decode_action(arguments, environment_path)?;

        let sink = self.open_sink();
        let session = sink.session_id();
        info!(session = %session, action = %config.id, "presenting transact action");

        self.sdk
            .present_action(config, sink.clone())
            .inspect_err(|_| sink.close())?;
        Ok(session)
    }

    /// Forward a dismiss request to the native SDK.
    ///
    /// No completion is synthesized; open sessions stay registered until
    /// the SDK reports one or drops the session's sink.
    pub fn dismiss_transact(&self) {
        info!(active = self.registry.len(), "dismiss requested");
        self.sdk.dismiss();
    }

    fn open_sink(&self) -> EventSink {
        EventSink::open(self.events.clone(), self.registry.clone())
    }
}

/// Optional `environmentPath` argument.
fn environment_path(arguments: &Value) -> Result<Option<&str>> {
    match arguments.get("environmentPath") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(path)) => Ok(Some(path.as_str())),
        Some(_) => Err(TransactError::config("environmentPath", "expected string")),
    }
}
