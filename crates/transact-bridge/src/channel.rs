// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message shapes exchanged with the host over the method channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use transact_codec::EncodedEvent;
use transact_core::TransactError;

/// Method names the plugin answers.
pub const PRESENT_TRANSACT: &str = "presentTransact";
pub const PRESENT_ACTION: &str = "presentAction";
pub const DISMISS_TRANSACT: &str = "dismissTransact";

/// A host → plugin call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Synchronous answer to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn ok() -> Self {
        Self::Success {
            result: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<TransactError> for MethodResponse {
    fn from(err: TransactError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// A plugin → host push, one per native event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMessage {
    pub method: &'static str,
    pub arguments: Value,
}

impl From<EncodedEvent> for ChannelMessage {
    fn from(encoded: EncodedEvent) -> Self {
        Self {
            method: encoded.method,
            arguments: encoded.arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_call_arguments_default_to_null() {
        let call: MethodCall = serde_json::from_str(r#"{"method": "dismissTransact"}"#).unwrap();
        assert_eq!(call.method, DISMISS_TRANSACT);
        assert_eq!(call.arguments, Value::Null);
    }

    #[test]
    fn responses_serialize_with_a_status_tag() {
        assert_eq!(
            serde_json::to_value(MethodResponse::ok()).unwrap(),
            json!({"status": "success", "result": null})
        );
        assert_eq!(
            serde_json::to_value(MethodResponse::NotImplemented).unwrap(),
            json!({"status": "notImplemented"})
        );

        let err: MethodResponse =
            TransactError::config("publicToken", "required field missing").into();
        let value = serde_json::to_value(err).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "ConfigError");
        assert!(value["message"].as_str().unwrap().contains("publicToken"));
    }
}
