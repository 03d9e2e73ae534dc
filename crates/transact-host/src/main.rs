// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transact host harness
//
// Reads one JSON method call per line on stdin and writes one JSON line per
// reply on stdout: `{"response": ...}` for each call and `{"event": ...}` for
// each pushed event. Logs go to stderr.

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use transact_bridge::{EventPump, MethodCall, MethodResponse, TransactPlugin, default_sdk};
use transact_core::BridgeSettings;
use transact_core::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = BridgeSettings::from_env();
    info!(channel = %settings.channel_name, "transact host starting");

    let (plugin, pump) = TransactPlugin::new(default_sdk(), settings);

    let (out_tx, out_rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(write_lines(out_rx));
    let (stop_tx, stop_rx) = oneshot::channel();
    let forwarder = tokio::spawn(forward_events(pump, out_tx.clone(), stop_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if out_tx.send(handle_line(&plugin, line)).is_err() {
            break;
        }
    }

    info!(active = plugin.active_sessions(), "stdin closed, shutting down");

    // The pump stays open while the plugin lives; flush what is queued and stop.
    let _ = stop_tx.send(());
    if let Err(e) = forwarder.await {
        warn!(error = %e, "event forwarder failed");
    }
    drop(out_tx);
    if let Ok(Err(e)) = writer.await {
        warn!(error = %e, "stdout writer failed");
    }
    Ok(())
}

/// Answer one input line with a `{"response": ...}` record.
fn handle_line(plugin: &TransactPlugin, line: &str) -> Value {
    let response = match serde_json::from_str::<MethodCall>(line) {
        Ok(call) => plugin.handle(&call),
        Err(e) => {
            warn!(error = %e, "malformed method call");
            MethodResponse::Error {
                code: "ConfigError".into(),
                message: format!("malformed method call: {e}"),
            }
        }
    };
    json!({ "response": response })
}

/// Forward pushed events until `stop` fires, then flush the queued ones.
async fn forward_events(
    mut pump: EventPump,
    out: mpsc::UnboundedSender<Value>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            message = pump.next() => {
                let Some(message) = message else { return };
                if out.send(json!({ "event": message })).is_err() {
                    return;
                }
            }
            _ = &mut stop => break,
        }
    }

    while let Some(message) = pump.try_next() {
        if out.send(json!({ "event": message })).is_err() {
            return;
        }
    }
}

async fn write_lines(mut rx: mpsc::UnboundedReceiver<Value>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(value) = rx.recv().await {
        let mut line = serde_json::to_vec(&value)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use transact_bridge::{EventSink, NativeTransact};
    use transact_core::error::TransactError;
    use transact_core::{ActionConfig, SessionConfig, TransactEvent};

    const VALID_PRESENT: &str = concat!(
        r#"{"method":"presentTransact","#,
        r#""arguments":{"configuration":{"publicToken":"t","language":"en"}}}"#
    );

    /// Reports a launch for every session, then lets the sink go.
    struct LaunchingSdk;

    impl NativeTransact for LaunchingSdk {
        fn platform_name(&self) -> &str {
            "test"
        }

        fn present(&self, _config: SessionConfig, sink: EventSink) -> Result<()> {
            sink.emit(TransactEvent::Launch);
            Ok(())
        }

        fn present_action(&self, _config: ActionConfig, _sink: EventSink) -> Result<()> {
            Err(TransactError::PlatformUnavailable)
        }

        fn dismiss(&self) {}
    }

    fn plugin() -> TransactPlugin {
        TransactPlugin::new(default_sdk(), BridgeSettings::default()).0
    }

    #[test]
    fn valid_config_reaches_the_stub_sdk() {
        let reply = handle_line(&plugin(), VALID_PRESENT);
        assert_eq!(reply["response"]["status"], "error");
        assert_eq!(reply["response"]["code"], "PlatformError");
    }

    #[test]
    fn invalid_config_is_reported_as_config_error() {
        let line = r#"{"method":"presentTransact","arguments":{"configuration":{}}}"#;
        let reply = handle_line(&plugin(), line);
        assert_eq!(reply["response"]["code"], "ConfigError");
    }

    #[test]
    fn malformed_line_is_answered() {
        let reply = handle_line(&plugin(), "{not json");
        assert_eq!(reply["response"]["status"], "error");
        assert_eq!(reply["response"]["code"], "ConfigError");
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let reply = handle_line(&plugin(), r#"{"method":"openSesame"}"#);
        assert_eq!(reply["response"]["status"], "notImplemented");
    }

    #[tokio::test]
    async fn queued_events_are_flushed_on_shutdown() {
        let (plugin, pump) =
            TransactPlugin::new(std::sync::Arc::new(LaunchingSdk), BridgeSettings::default());
        for _ in 0..3 {
            assert_eq!(handle_line(&plugin, VALID_PRESENT)["response"]["status"], "success");
        }

        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        stop_tx.send(()).unwrap();
        forward_events(pump, out_tx, stop_rx).await;

        for _ in 0..3 {
            let pushed = out_rx.try_recv().expect("event written");
            assert_eq!(pushed["event"]["method"], "onLaunch");
        }
        assert!(out_rx.try_recv().is_err());
    }
}
