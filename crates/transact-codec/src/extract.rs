// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-field extraction from untyped records.
//
// Every helper returns `Ok(None)` for an absent or `null` key and an error
// naming the full field path when the value has the wrong shape.

use serde_json::{Map, Value};

use transact_core::TokenEnum;
use transact_core::error::{Result, TransactError};

pub(crate) type Record = Map<String, Value>;

/// Dotted path of `key` below `prefix`.
pub(crate) fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Hyphens become underscores, then upper-case: `deep-link` → `DEEP_LINK`.
pub fn normalize_token(raw: &str) -> String {
    raw.replace('-', "_").to_uppercase()
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}

fn mismatch(field: String, expected: &str, found: &Value) -> TransactError {
    TransactError::config(field, format!("expected {expected}, found {}", shape(found)))
}

fn present<'a>(obj: &'a Record, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

pub(crate) fn optional_str(obj: &Record, prefix: &str, key: &str) -> Result<Option<String>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(field_path(prefix, key), "string", other)),
    }
}

pub(crate) fn required_str(obj: &Record, prefix: &str, key: &str) -> Result<String> {
    optional_str(obj, prefix, key)?
        .ok_or_else(|| TransactError::config(field_path(prefix, key), "required field missing"))
}

pub(crate) fn optional_bool(obj: &Record, prefix: &str, key: &str) -> Result<Option<bool>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(mismatch(field_path(prefix, key), "boolean", other)),
    }
}

pub(crate) fn optional_number(obj: &Record, prefix: &str, key: &str) -> Result<Option<f64>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| TransactError::config(field_path(prefix, key), "number out of range")),
        Some(other) => Err(mismatch(field_path(prefix, key), "number", other)),
    }
}

pub(crate) fn optional_record<'a>(
    obj: &'a Record,
    prefix: &str,
    key: &str,
) -> Result<Option<&'a Record>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(mismatch(field_path(prefix, key), "record", other)),
    }
}

pub(crate) fn optional_list<'a>(
    obj: &'a Record,
    prefix: &str,
    key: &str,
) -> Result<Option<&'a [Value]>> {
    match present(obj, key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(other) => Err(mismatch(field_path(prefix, key), "list", other)),
    }
}

/// The root of a payload, which must be a record.
pub(crate) fn as_record<'a>(value: &'a Value, field: &str) -> Result<&'a Record> {
    value
        .as_object()
        .ok_or_else(|| mismatch(field.to_string(), "record", value))
}

fn unknown_token<E: TokenEnum>(field: String, raw: &str) -> TransactError {
    TransactError::config(field, format!("unknown {} `{raw}`", E::KIND))
}

/// Match `raw` after [`normalize_token`].
pub(crate) fn normalized_enum<E: TokenEnum>(raw: &str, field: String) -> Result<E> {
    E::from_name(&normalize_token(raw)).ok_or_else(|| unknown_token::<E>(field, raw))
}

/// Match `raw` exactly, with no case folding or separator substitution.
pub(crate) fn exact_enum<E: TokenEnum>(raw: &str, field: String) -> Result<E> {
    E::from_name(raw).ok_or_else(|| unknown_token::<E>(field, raw))
}

pub(crate) fn optional_enum<E: TokenEnum>(
    obj: &Record,
    prefix: &str,
    key: &str,
) -> Result<Option<E>> {
    optional_str(obj, prefix, key)?
        .map(|raw| normalized_enum(&raw, field_path(prefix, key)))
        .transpose()
}

/// Decode a list of tokens into an order-preserving set; repeats are dropped.
pub(crate) fn enum_set<E: TokenEnum>(items: &[Value], field: &str) -> Result<Vec<E>> {
    let mut out: Vec<E> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let at = format!("{field}[{i}]");
        let raw = item.as_str().ok_or_else(|| mismatch(at.clone(), "string", item))?;
        let variant = normalized_enum::<E>(raw, at)?;
        if !out.contains(&variant) {
            out.push(variant);
        }
    }
    Ok(out)
}
