// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed events emitted by the native Transact SDK during a session.
//
// The native module's delegate callbacks are collapsed into one sum type,
// `TransactEvent`, so they can travel through a single ordered queue.

use serde_json::{Map, Value};

use crate::session::Product;
use crate::token::TokenEnum;

/// Everything the native module can report during a session.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactEvent {
    /// An action session finished loading.
    Launch,
    Interaction(Interaction),
    DataRequest(DataRequest),
    AuthStatusUpdate(AuthStatusUpdate),
    TaskStatusUpdate(TaskStatusUpdate),
    /// Terminal event. Nothing is delivered after it.
    Completion(Completion),
}

impl TransactEvent {
    /// Whether this event ends the session's callback stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completion(_))
    }

    /// Channel method name the event is pushed under.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Launch => "onLaunch",
            Self::Interaction(_) => "onInteraction",
            Self::DataRequest(_) => "onDataRequest",
            Self::AuthStatusUpdate(_) => "onAuthStatusUpdate",
            Self::TaskStatusUpdate(_) => "onTaskStatusUpdate",
            Self::Completion(_) => "onCompletion",
        }
    }
}

/// A user interaction inside the Transact UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub name: String,
    /// Raw interaction payload. Known keys (`identifier`, `customer`,
    /// `language`, `product`, `additionalProduct`, `payroll`, `company`) are
    /// lifted out on encode; the whole map is also forwarded as-is.
    pub value: Option<Map<String, Value>>,
}

/// The SDK asks the host for additional data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRequest {
    pub identifier: Option<String>,
    pub fields: Option<Vec<String>>,
}

/// Payload of a `closed` / `finished` completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseData {
    pub task_id: Option<String>,
    pub reason: Option<String>,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Closed(ResponseData),
    Finished(ResponseData),
    /// The native module could not run the session at all.
    Error(CompletionError),
}

impl Completion {
    /// Value of the `type` key in the `onCompletion` payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Closed(_) => "closed",
            Self::Finished(_) => "finished",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionError {
    InvalidConfig,
    UnableToConnectToTransact,
    Unknown,
}

impl CompletionError {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidConfig => "invalidConfig",
            Self::UnableToConnectToTransact => "unableToConnectToTransact",
            Self::Unknown => "unknownError",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    Failed,
}

impl TokenEnum for AuthStatus {
    const KIND: &'static str = "auth status";
    const VARIANTS: &'static [Self] = &[Self::Authenticated, Self::Failed];

    fn name(self) -> &'static str {
        match self {
            Self::Authenticated => "AUTHENTICATED",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthStatusUpdate {
    pub status: AuthStatus,
    pub company: Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Processing,
    Success,
    Failed,
}

impl TokenEnum for TaskStatus {
    const KIND: &'static str = "task status";
    const VARIANTS: &'static [Self] = &[Self::Processing, Self::Success, Self::Failed];

    fn name(self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Progress report for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatusUpdate {
    pub task_id: String,
    pub product: Product,
    pub status: TaskStatus,
    pub fail_reason: Option<String>,
    pub company: Company,
    /// At most one detail block accompanies an update.
    pub detail: Option<TaskDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskDetail {
    Switch(SwitchData),
    Deposit(DepositData),
    /// Another company manages the account on the user's behalf.
    ManagedBy(Company),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchData {
    pub payment_method: PaymentMethod,
}

/// Payment method used by a switch task. Each variant owns its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Card {
        expiry: Option<String>,
        brand: Option<String>,
        last_four: Option<String>,
    },
    Bank {
        routing_number: Option<String>,
        account_type: Option<String>,
        last_four_account_number: Option<String>,
    },
}

impl PaymentMethod {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Card { .. } => "card",
            Self::Bank { .. } => "bank",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositData {
    pub account_type: Option<String>,
    pub distribution_amount: Option<f64>,
    pub distribution_type: Option<String>,
    pub last_four: Option<String>,
    pub routing_number: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub branding: Option<Branding>,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branding: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub color: String,
    pub logo: Logo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub url: String,
    pub background_color: Option<String>,
}
