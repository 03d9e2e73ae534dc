// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Strictly-typed session configuration handed to the native Transact SDK.
//
// Values here are built per call by the decoder in `transact-codec` and
// dropped once the native module has taken them. The `Serialize` derives
// produce the native SDK's JSON wire form for SDKs that consume JSON.

use serde::Serialize;

use crate::error::Result;
use crate::token::TokenEnum;

/// Which Transact flow the session runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    #[default]
    UserLink,
    PayLink,
}

impl TokenEnum for Scope {
    const KIND: &'static str = "scope";
    const VARIANTS: &'static [Self] = &[Self::UserLink, Self::PayLink];

    fn name(self) -> &'static str {
        match self {
            Self::UserLink => "USER_LINK",
            Self::PayLink => "PAY_LINK",
        }
    }
}

/// Product offered by a task. Also reused as the task operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Deposit,
    Verify,
    Identify,
    Balance,
    Tax,
    Switch,
    Present,
}

impl TokenEnum for Product {
    const KIND: &'static str = "product";
    const VARIANTS: &'static [Self] = &[
        Self::Deposit,
        Self::Verify,
        Self::Identify,
        Self::Balance,
        Self::Tax,
        Self::Switch,
        Self::Present,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Verify => "VERIFY",
            Self::Identify => "IDENTIFY",
            Self::Balance => "BALANCE",
            Self::Tax => "TAX",
            Self::Switch => "SWITCH",
            Self::Present => "PRESENT",
        }
    }
}

/// UI language. Transmitted as the lower-case ISO code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl TokenEnum for Language {
    const KIND: &'static str = "language";
    const VARIANTS: &'static [Self] = &[Self::En, Self::Es];

    fn name(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Es => "ES",
        }
    }
}

/// Flow events the host app wants to handle itself instead of the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handoff {
    ExitPrompt,
    AuthenticationSuccess,
    HighLatency,
    DeepLink,
    Email,
}

impl TokenEnum for Handoff {
    const KIND: &'static str = "handoff";
    const VARIANTS: &'static [Self] = &[
        Self::ExitPrompt,
        Self::AuthenticationSuccess,
        Self::HighLatency,
        Self::DeepLink,
        Self::Email,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ExitPrompt => "EXIT_PROMPT",
            Self::AuthenticationSuccess => "AUTHENTICATION_SUCCESS",
            Self::HighLatency => "HIGH_LATENCY",
            Self::DeepLink => "DEEP_LINK",
            Self::Email => "EMAIL",
        }
    }
}

/// How a deposit distribution is sized. Sent upper-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionType {
    Total,
    Percent,
    Fixed,
}

impl TokenEnum for DistributionType {
    const KIND: &'static str = "distribution type";
    const VARIANTS: &'static [Self] = &[Self::Total, Self::Percent, Self::Fixed];

    fn name(self) -> &'static str {
        match self {
            Self::Total => "TOTAL",
            Self::Percent => "PERCENT",
            Self::Fixed => "FIXED",
        }
    }
}

/// What to do with the distribution. Sent upper-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionAction {
    Create,
    Update,
    Delete,
}

impl TokenEnum for DistributionAction {
    const KIND: &'static str = "distribution action";
    const VARIANTS: &'static [Self] = &[Self::Create, Self::Update, Self::Delete];

    fn name(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// Screen the session opens on when deep-linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeeplinkStep {
    SearchCompany,
    SearchPayroll,
    LoginCompany,
    LoginPayroll,
}

impl TokenEnum for DeeplinkStep {
    const KIND: &'static str = "deeplink step";
    const VARIANTS: &'static [Self] = &[
        Self::SearchCompany,
        Self::SearchPayroll,
        Self::LoginCompany,
        Self::LoginPayroll,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::SearchCompany => "SEARCH_COMPANY",
            Self::SearchPayroll => "SEARCH_PAYROLL",
            Self::LoginCompany => "LOGIN_COMPANY",
            Self::LoginPayroll => "LOGIN_PAYROLL",
        }
    }
}

/// Company search filter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchTag {
    Bank,
    GigEconomy,
    PayrollProvider,
    Unemployment,
}

impl TokenEnum for SearchTag {
    const KIND: &'static str = "search tag";
    const VARIANTS: &'static [Self] = &[
        Self::Bank,
        Self::GigEconomy,
        Self::PayrollProvider,
        Self::Unemployment,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Bank => "BANK",
            Self::GigEconomy => "GIG_ECONOMY",
            Self::PayrollProvider => "PAYROLL_PROVIDER",
            Self::Unemployment => "UNEMPLOYMENT",
        }
    }
}

/// Backend the native SDK talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    /// Custom endpoint; always set when the caller supplies a path.
    Custom(String),
}

/// Deposit distribution requested for the session or a single task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    #[serde(rename = "type")]
    pub kind: DistributionType,
    pub action: DistributionAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// One unit of work within a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
}

/// Visual overrides. Colour strings are passed through unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deeplink {
    pub step: DeeplinkStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
}

/// Company search filters. Tag lists are order-preserving sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub tags: Vec<SearchTag>,
    pub excluded_tags: Vec<SearchTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

/// Feature flags. Unknown flags in the input are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractional_deposits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unemployment_carousel: Option<bool>,
}

/// Host platform descriptor attached to every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub name: String,
    pub sdk_version: String,
}

/// Root configuration for a `presentTransact` session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub public_token: String,
    pub scope: Scope,
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff: Option<Vec<Handoff>>,
    pub language: Language,
    /// Opaque host metadata, forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deeplink: Option<Deeplink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Search>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiments: Option<Experiments>,
    pub environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformInfo>,
}

impl SessionConfig {
    /// Minimal config with every optional field unset.
    pub fn new(public_token: impl Into<String>, language: Language) -> Self {
        Self {
            public_token: public_token.into(),
            scope: Scope::default(),
            tasks: Vec::new(),
            additional_product: None,
            distribution: None,
            linked_account: None,
            handoff: None,
            language,
            metadata: None,
            theme: None,
            deeplink: None,
            search: None,
            experiments: None,
            environment: Environment::default(),
            platform: None,
        }
    }

    /// JSON form consumed by native SDKs that decode their config from JSON.
    pub fn to_native_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Configuration for a `presentAction` session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub id: String,
    pub environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl ActionConfig {
    pub fn to_native_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
