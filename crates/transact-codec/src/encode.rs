// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event encoding: typed native events into untyped records for the host.
//
// Encoding is total. Absent optionals are omitted, rendered as `""`, or as
// `null` depending on the field; each function below documents its policy.

use serde_json::{Map, Value, json};

use transact_core::{
    AuthStatusUpdate, Company, Completion, DataRequest, DepositData, Interaction, PaymentMethod,
    ResponseData, TaskDetail, TaskStatusUpdate, TokenEnum, TransactEvent,
};

type Record = Map<String, Value>;

/// Keys lifted out of an interaction's `value` record.
const INTERACTION_KEYS: [&str; 7] = [
    "identifier",
    "customer",
    "language",
    "product",
    "additionalProduct",
    "payroll",
    "company",
];

/// One push to the host: the channel method and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedEvent {
    pub method: &'static str,
    /// `Value::Null` for payload-less events such as `onLaunch`.
    pub arguments: Value,
}

/// Encode an event into the channel push that reports it.
pub fn encode(event: &TransactEvent) -> EncodedEvent {
    let arguments = match event {
        TransactEvent::Launch => Value::Null,
        TransactEvent::Interaction(i) => json!({ "interaction": encode_interaction(i) }),
        TransactEvent::DataRequest(r) => json!({ "request": encode_data_request(r) }),
        TransactEvent::AuthStatusUpdate(a) => json!({ "auth": encode_auth_status_update(a) }),
        TransactEvent::TaskStatusUpdate(t) => json!({ "task": encode_task_status_update(t) }),
        TransactEvent::Completion(c) => Value::Object(encode_completion(c)),
    };

    EncodedEvent {
        method: event.method(),
        arguments,
    }
}

/// `{type, response}` for closed/finished, `{type: "error", error}` otherwise.
pub fn encode_completion(completion: &Completion) -> Record {
    let mut out = Record::new();
    out.insert("type".into(), completion.kind().into());
    match completion {
        Completion::Closed(data) | Completion::Finished(data) => {
            out.insert("response".into(), Value::Object(encode_response_data(data)));
        }
        Completion::Error(code) => {
            out.insert("error".into(), code.code().into());
        }
    }
    out
}

/// Lifted keys are always present (`""` when missing). Without a value
/// record, `value` itself is `null`.
pub fn encode_interaction(interaction: &Interaction) -> Record {
    let mut out = Record::new();
    out.insert("name".into(), interaction.name.clone().into());

    for key in INTERACTION_KEYS {
        let lifted = interaction
            .value
            .as_ref()
            .map(|value| lift_string(value, key))
            .unwrap_or_default();
        out.insert(key.into(), lifted.into());
    }

    let value = match &interaction.value {
        Some(map) => Value::Object(map.clone()),
        None => Value::Null,
    };
    out.insert("value".into(), value);
    out
}

/// String form of `value[key]`: strings verbatim, `null`/missing as `""`,
/// anything else as its JSON text.
fn lift_string(value: &Record, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `identifier` always; `fields` only when the request carries a list.
pub fn encode_data_request(request: &DataRequest) -> Record {
    let mut out = Record::new();
    out.insert(
        "identifier".into(),
        request.identifier.clone().unwrap_or_default().into(),
    );
    if let Some(fields) = &request.fields {
        out.insert("fields".into(), fields.clone().into());
    }
    out
}

pub fn encode_response_data(data: &ResponseData) -> Record {
    let mut out = Record::new();
    out.insert("taskId".into(), data.task_id.clone().unwrap_or_default().into());
    out.insert("reason".into(), data.reason.clone().unwrap_or_default().into());
    out
}

/// `branding` is left out entirely when the company has none.
pub fn encode_company(company: &Company) -> Record {
    let mut out = Record::new();
    out.insert("id".into(), company.id.clone().into());
    out.insert("name".into(), company.name.clone().into());

    if let Some(branding) = &company.branding {
        let mut logo = Record::new();
        logo.insert("url".into(), branding.logo.url.clone().into());
        if let Some(background) = &branding.logo.background_color {
            logo.insert("backgroundColor".into(), background.clone().into());
        }

        let mut brand = Record::new();
        brand.insert("color".into(), branding.color.clone().into());
        brand.insert("logo".into(), Value::Object(logo));
        out.insert("branding".into(), Value::Object(brand));
    }
    out
}

pub fn encode_auth_status_update(update: &AuthStatusUpdate) -> Record {
    let mut out = Record::new();
    out.insert("status".into(), update.status.wire_token().into());
    out.insert("company".into(), Value::Object(encode_company(&update.company)));
    out
}

/// Base keys are always present (`failReason` is `null` when unset); the
/// single detail block, if any, adds `switchData`, `depositData` or
/// `managedBy`.
pub fn encode_task_status_update(update: &TaskStatusUpdate) -> Record {
    let mut out = Record::new();
    out.insert("taskId".into(), update.task_id.clone().into());
    out.insert("product".into(), update.product.wire_token().into());
    out.insert("status".into(), update.status.wire_token().into());
    out.insert("failReason".into(), optional(&update.fail_reason));
    out.insert("company".into(), Value::Object(encode_company(&update.company)));

    match &update.detail {
        Some(TaskDetail::Switch(switch)) => {
            let mut data = Record::new();
            data.insert(
                "paymentMethod".into(),
                Value::Object(encode_payment_method(&switch.payment_method)),
            );
            out.insert("switchData".into(), Value::Object(data));
        }
        Some(TaskDetail::Deposit(deposit)) => {
            out.insert("depositData".into(), Value::Object(encode_deposit_data(deposit)));
        }
        Some(TaskDetail::ManagedBy(company)) => {
            out.insert("managedBy".into(), Value::Object(encode_company(company)));
        }
        None => {}
    }
    out
}

/// `type` plus the keys of the active variant only.
fn encode_payment_method(method: &PaymentMethod) -> Record {
    let mut out = Record::new();
    out.insert("type".into(), method.kind().into());
    match method {
        PaymentMethod::Card {
            expiry,
            brand,
            last_four,
        } => {
            out.insert("expiry".into(), optional(expiry));
            out.insert("brand".into(), optional(brand));
            out.insert("lastFour".into(), optional(last_four));
        }
        PaymentMethod::Bank {
            routing_number,
            account_type,
            last_four_account_number,
        } => {
            out.insert("routingNumber".into(), optional(routing_number));
            out.insert("accountType".into(), optional(account_type));
            out.insert(
                "lastFourAccountNumber".into(),
                optional(last_four_account_number),
            );
        }
    }
    out
}

fn encode_deposit_data(deposit: &DepositData) -> Record {
    let mut out = Record::new();
    out.insert("accountType".into(), optional(&deposit.account_type));
    out.insert(
        "distributionAmount".into(),
        deposit.distribution_amount.map_or(Value::Null, Value::from),
    );
    out.insert("distributionType".into(), optional(&deposit.distribution_type));
    out.insert("lastFour".into(), optional(&deposit.last_four));
    out.insert("routingNumber".into(), optional(&deposit.routing_number));
    out.insert("title".into(), optional(&deposit.title));
    out
}

fn optional(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}
