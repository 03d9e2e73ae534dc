// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transact codec: the schema translation layer between loosely-typed host
// payloads (`serde_json::Value`) and the typed models in `transact-core`.
//
// `decode` turns configuration records into `SessionConfig` / `ActionConfig`;
// `encode` flattens native events back into records for the host.

pub mod decode;
pub mod encode;
mod extract;

pub use decode::{ConfigKind, TypedConfig, decode, decode_action, decode_session};
pub use encode::{EncodedEvent, encode};
pub use extract::normalize_token;
