// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transact bridge: Core config and event types, errors, and settings shared
// across all crates.

pub mod error;
pub mod event;
pub mod session;
pub mod settings;
pub mod token;

pub use error::TransactError;
pub use event::*;
pub use session::*;
pub use settings::BridgeSettings;
pub use token::TokenEnum;
