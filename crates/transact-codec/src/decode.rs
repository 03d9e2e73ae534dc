// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration decoding: untyped host records into typed Transact configs.
//
// Enum tokens go through `normalize_token` (kebab-case to UPPER_SNAKE) before
// matching, except `distribution.type` / `distribution.action`, which are
// already sent upper-case and are matched exactly.

use serde_json::Value;
use tracing::debug;

use transact_core::error::{Result, TransactError};
use transact_core::{
    ActionConfig, Deeplink, Distribution, Environment, Experiments, Handoff, Language, Scope,
    Search, SessionConfig, Task, Theme,
};

use crate::extract::*;

/// Which configuration shape a payload is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Session,
    Action,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedConfig {
    Session(SessionConfig),
    Action(ActionConfig),
}

/// Decode `raw` into the config shape named by `kind`.
///
/// A supplied `environment_path` always wins: the result's environment is
/// `Environment::Custom(path)` whatever the payload says.
pub fn decode(
    raw: &Value,
    kind: ConfigKind,
    environment_path: Option<&str>,
) -> Result<TypedConfig> {
    match kind {
        ConfigKind::Session => decode_session(raw, environment_path).map(TypedConfig::Session),
        ConfigKind::Action => decode_action(raw, environment_path).map(TypedConfig::Action),
    }
}

/// Decode a `presentTransact` configuration record.
pub fn decode_session(raw: &Value, environment_path: Option<&str>) -> Result<SessionConfig> {
    let obj = as_record(raw, "configuration")?;

    let public_token = required_str(obj, "", "publicToken")?;
    let language = decode_language(obj)?;
    let scope = optional_enum::<Scope>(obj, "", "scope")?.unwrap_or_default();

    let tasks = match optional_list(obj, "", "tasks")? {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let at = format!("tasks[{i}]");
                decode_task(as_record(item, &at)?, &at)
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let handoff = optional_list(obj, "", "handoff")?
        .map(|items| enum_set::<Handoff>(items, "handoff"))
        .transpose()?;

    let distribution = optional_record(obj, "", "distribution")?
        .map(|d| decode_distribution(d, "distribution"))
        .transpose()?;

    let config = SessionConfig {
        public_token,
        scope,
        tasks,
        additional_product: optional_enum(obj, "", "additionalProduct")?,
        distribution,
        linked_account: optional_str(obj, "", "linkedAccount")?,
        handoff,
        language,
        metadata: obj.get("metadata").filter(|v| !v.is_null()).cloned(),
        theme: optional_record(obj, "", "theme")?
            .map(|t| decode_theme(t, "theme"))
            .transpose()?,
        deeplink: optional_record(obj, "", "deeplink")?
            .map(decode_deeplink)
            .transpose()?,
        search: optional_record(obj, "", "search")?
            .map(decode_search)
            .transpose()?,
        experiments: optional_record(obj, "", "experiments")?
            .map(decode_experiments)
            .transpose()?,
        environment: decode_environment(obj, environment_path)?,
        platform: None,
    };

    debug!(
        scope = ?config.scope,
        tasks = config.tasks.len(),
        environment = ?config.environment,
        "session configuration decoded"
    );
    Ok(config)
}

/// Decode a `presentAction` record (`id`, optional `environment` and `theme`).
pub fn decode_action(raw: &Value, environment_path: Option<&str>) -> Result<ActionConfig> {
    let obj = as_record(raw, "configuration")?;

    let config = ActionConfig {
        id: required_str(obj, "", "id")?,
        environment: decode_environment(obj, environment_path)?,
        theme: optional_record(obj, "", "theme")?
            .map(|t| decode_theme(t, "theme"))
            .transpose()?,
    };

    debug!(id = %config.id, environment = ?config.environment, "action configuration decoded");
    Ok(config)
}

fn decode_language(obj: &Record) -> Result<Language> {
    let raw = required_str(obj, "", "language")?;
    normalized_enum(&raw, "language".to_string())
}

fn decode_environment(obj: &Record, environment_path: Option<&str>) -> Result<Environment> {
    if let Some(path) = environment_path {
        return Ok(Environment::Custom(path.to_string()));
    }

    let Some(raw) = optional_str(obj, "", "environment")? else {
        return Ok(Environment::default());
    };
    match normalize_token(&raw).as_str() {
        "PRODUCTION" => Ok(Environment::Production),
        "SANDBOX" => Ok(Environment::Sandbox),
        "CUSTOM" => Err(TransactError::config(
            "environment",
            "custom environment requires an endpoint path",
        )),
        _ => Err(TransactError::config(
            "environment",
            format!("unknown environment `{raw}`"),
        )),
    }
}

fn decode_task(obj: &Record, at: &str) -> Result<Task> {
    Ok(Task {
        product: optional_enum(obj, at, "product")?,
        operation: optional_enum(obj, at, "operation")?,
        distribution: optional_record(obj, at, "distribution")?
            .map(|d| decode_distribution(d, &field_path(at, "distribution")))
            .transpose()?,
    })
}

fn decode_distribution(obj: &Record, at: &str) -> Result<Distribution> {
    let kind = required_str(obj, at, "type")?;
    let action = required_str(obj, at, "action")?;

    Ok(Distribution {
        kind: exact_enum(&kind, field_path(at, "type"))?,
        action: exact_enum(&action, field_path(at, "action"))?,
        amount: optional_number(obj, at, "amount")?,
    })
}

fn decode_theme(obj: &Record, at: &str) -> Result<Theme> {
    Ok(Theme {
        brand_color: optional_str(obj, at, "brandColor")?,
        overlay_color: optional_str(obj, at, "overlayColor")?,
        dark: optional_bool(obj, at, "dark")?,
    })
}

fn decode_deeplink(obj: &Record) -> Result<Deeplink> {
    let step = required_str(obj, "deeplink", "step")?;

    Ok(Deeplink {
        step: normalized_enum(&step, "deeplink.step".to_string())?,
        company_id: optional_str(obj, "deeplink", "companyId")?,
        company_name: optional_str(obj, "deeplink", "companyName")?,
        connector_id: optional_str(obj, "deeplink", "connectorId")?,
    })
}

fn decode_search(obj: &Record) -> Result<Search> {
    let tags = match optional_list(obj, "search", "tags")? {
        Some(items) => enum_set(items, "search.tags")?,
        None => Vec::new(),
    };
    let excluded_tags = match optional_list(obj, "search", "excludedTags")? {
        Some(items) => enum_set(items, "search.excludedTags")?,
        None => Vec::new(),
    };

    Ok(Search {
        tags,
        excluded_tags,
        rule_id: optional_str(obj, "search", "ruleId")?,
    })
}

fn decode_experiments(obj: &Record) -> Result<Experiments> {
    // Unrecognised flags are ignored.
    Ok(Experiments {
        fractional_deposits: optional_bool(obj, "experiments", "fractionalDeposits")?,
        unemployment_carousel: optional_bool(obj, "experiments", "unemploymentCarousel")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use transact_core::{
        DeeplinkStep, DistributionAction, DistributionType, Product, SearchTag, TokenEnum,
    };

    fn field_of(err: TransactError) -> String {
        match err {
            TransactError::Config { field, .. } => field,
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_minimal_session() {
        let raw = json!({
            "publicToken": "tok1",
            "language": "en",
            "scope": "user-link",
            "handoff": ["deep-link", "email"]
        });

        let config = decode_session(&raw, None).unwrap();
        assert_eq!(config.public_token, "tok1");
        assert_eq!(config.scope, Scope::UserLink);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.handoff, Some(vec![Handoff::DeepLink, Handoff::Email]));
        assert!(config.tasks.is_empty());
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn scope_defaults_only_when_absent() {
        let absent = json!({"publicToken": "t", "language": "es"});
        assert_eq!(decode_session(&absent, None).unwrap().scope, Scope::UserLink);

        let pay = json!({"publicToken": "t", "language": "es", "scope": "pay-link"});
        assert_eq!(decode_session(&pay, None).unwrap().scope, Scope::PayLink);

        let bogus = json!({"publicToken": "t", "language": "es", "scope": "both-links"});
        assert_eq!(field_of(decode_session(&bogus, None).unwrap_err()), "scope");
    }

    #[test]
    fn language_matches_case_insensitively() {
        for token in ["en", "EN", "En"] {
            let raw = json!({"publicToken": "t", "language": token});
            assert_eq!(decode_session(&raw, None).unwrap().language, Language::En);
        }
        let raw = json!({"publicToken": "t", "language": "ES"});
        assert_eq!(decode_session(&raw, None).unwrap().language, Language::Es);

        let unknown = json!({"publicToken": "t", "language": "fr"});
        assert_eq!(field_of(decode_session(&unknown, None).unwrap_err()), "language");
    }

    #[test]
    fn missing_required_fields_are_named() {
        let no_token = json!({"language": "en"});
        assert_eq!(field_of(decode_session(&no_token, None).unwrap_err()), "publicToken");

        let no_language = json!({"publicToken": "t"});
        assert_eq!(field_of(decode_session(&no_language, None).unwrap_err()), "language");

        let wrong_shape = json!({"publicToken": 42, "language": "en"});
        assert_eq!(field_of(decode_session(&wrong_shape, None).unwrap_err()), "publicToken");
    }

    #[test]
    fn non_record_payload_is_rejected() {
        let err = decode_session(&json!(["not", "a", "record"]), None).unwrap_err();
        assert_eq!(field_of(err), "configuration");
    }

    #[test]
    fn decodes_tasks_in_order() {
        let raw = json!({
            "publicToken": "t",
            "language": "en",
            "tasks": [
                {"product": "deposit", "distribution": {"type": "PERCENT", "action": "UPDATE", "amount": 12.5}},
                {"product": "verify"},
                {"operation": "switch"}
            ]
        });

        let config = decode_session(&raw, None).unwrap();
        assert_eq!(config.tasks.len(), 3);
        assert_eq!(config.tasks[0].product, Some(Product::Deposit));
        assert_eq!(
            config.tasks[0].distribution,
            Some(Distribution {
                kind: DistributionType::Percent,
                action: DistributionAction::Update,
                amount: Some(12.5),
            })
        );
        assert_eq!(config.tasks[1].product, Some(Product::Verify));
        assert_eq!(config.tasks[2].product, None);
        assert_eq!(config.tasks[2].operation, Some(Product::Switch));
    }

    #[test]
    fn one_bad_task_aborts_the_decode() {
        let raw = json!({
            "publicToken": "t",
            "language": "en",
            "tasks": [{"product": "deposit"}, {"product": "teleport"}]
        });
        assert_eq!(field_of(decode_session(&raw, None).unwrap_err()), "tasks[1].product");

        let not_a_record = json!({"publicToken": "t", "language": "en", "tasks": ["deposit"]});
        assert_eq!(field_of(decode_session(&not_a_record, None).unwrap_err()), "tasks[0]");
    }

    #[test]
    fn null_optionals_decode_as_absent() {
        let raw = json!({
            "publicToken": "t",
            "language": "en",
            "tasks": null,
            "handoff": null,
            "theme": null,
            "search": null,
            "metadata": null
        });
        let config = decode_session(&raw, None).unwrap();
        assert!(config.tasks.is_empty());
        assert!(config.handoff.is_none());
        assert!(config.theme.is_none());
        assert!(config.search.is_none());
        assert!(config.metadata.is_none());
    }

    #[test]
    fn distribution_tokens_are_case_sensitive() {
        let upper = json!({
            "publicToken": "t", "language": "en",
            "distribution": {"type": "TOTAL", "action": "CREATE"}
        });
        let config = decode_session(&upper, None).unwrap();
        let distribution = config.distribution.expect("distribution");
        assert_eq!(distribution.kind, DistributionType::Total);
        assert_eq!(distribution.amount, None);

        let lower = json!({
            "publicToken": "t", "language": "en",
            "distribution": {"type": "total", "action": "CREATE"}
        });
        assert_eq!(field_of(decode_session(&lower, None).unwrap_err()), "distribution.type");

        let task_level = json!({
            "publicToken": "t", "language": "en",
            "tasks": [{"product": "deposit", "distribution": {"type": "FIXED", "action": "create"}}]
        });
        assert_eq!(
            field_of(decode_session(&task_level, None).unwrap_err()),
            "tasks[0].distribution.action"
        );
    }

    #[test]
    fn metadata_of_any_shape_is_forwarded_verbatim() {
        for metadata in [
            json!([1, "x", null]),
            json!("opaque"),
            json!(42),
            json!(true),
            json!({"a": {"b": [null, 2.5]}}),
        ] {
            let raw = json!({"publicToken": "t", "language": "en", "metadata": metadata.clone()});
            assert_eq!(decode_session(&raw, None).unwrap().metadata, Some(metadata));
        }
    }

    #[test]
    fn decodes_nested_records() {
        let raw = json!({
            "publicToken": "t",
            "language": "en",
            "additionalProduct": "verify",
            "linkedAccount": "acct_9",
            "theme": {"brandColor": "#00ff00", "dark": true},
            "deeplink": {"step": "login-company", "companyId": "c1"},
            "search": {"tags": ["gig-economy", "bank"], "excludedTags": ["unemployment"], "ruleId": "r7"},
            "experiments": {"fractionalDeposits": true, "someFutureFlag": "whatever"},
            "metadata": {"nested": [1, {"deep": null}], "flag": false}
        });

        let config = decode_session(&raw, None).unwrap();
        assert_eq!(config.additional_product, Some(Product::Verify));
        assert_eq!(config.linked_account.as_deref(), Some("acct_9"));

        let theme = config.theme.expect("theme");
        assert_eq!(theme.brand_color.as_deref(), Some("#00ff00"));
        assert_eq!(theme.overlay_color, None);
        assert_eq!(theme.dark, Some(true));

        let deeplink = config.deeplink.expect("deeplink");
        assert_eq!(deeplink.step, DeeplinkStep::LoginCompany);
        assert_eq!(deeplink.company_id.as_deref(), Some("c1"));

        let search = config.search.expect("search");
        assert_eq!(search.tags, vec![SearchTag::GigEconomy, SearchTag::Bank]);
        assert_eq!(search.excluded_tags, vec![SearchTag::Unemployment]);
        assert_eq!(search.rule_id.as_deref(), Some("r7"));

        let experiments = config.experiments.expect("experiments");
        assert_eq!(experiments.fractional_deposits, Some(true));
        assert_eq!(experiments.unemployment_carousel, None);

        assert_eq!(
            config.metadata,
            Some(json!({"nested": [1, {"deep": null}], "flag": false}))
        );
    }

    #[test]
    fn search_without_tag_lists_has_empty_sets() {
        let raw = json!({"publicToken": "t", "language": "en", "search": {"ruleId": "r1"}});
        let search = decode_session(&raw, None).unwrap().search.expect("search");
        assert!(search.tags.is_empty());
        assert!(search.excluded_tags.is_empty());
    }

    #[test]
    fn invalid_tokens_fail_with_field_paths() {
        let cases = [
            (json!({"handoff": ["email", "fax"]}), "handoff[1]"),
            (json!({"deeplink": {"step": "nowhere"}}), "deeplink.step"),
            (json!({"deeplink": {"companyId": "c1"}}), "deeplink.step"),
            (json!({"search": {"tags": ["bank", "casino"]}}), "search.tags[1]"),
            (json!({"search": {"excludedTags": [7]}}), "search.excludedTags[0]"),
            (json!({"additionalProduct": "loans"}), "additionalProduct"),
            (json!({"experiments": {"fractionalDeposits": "yes"}}), "experiments.fractionalDeposits"),
            (json!({"theme": {"dark": "very"}}), "theme.dark"),
            (json!({"language": "klingon"}), "language"),
        ];

        for (overrides, expected) in cases {
            let mut raw = json!({"publicToken": "t", "language": "en"});
            for (k, v) in overrides.as_object().expect("record") {
                raw[k] = v.clone();
            }
            let err = decode_session(&raw, None).unwrap_err();
            assert_eq!(field_of(err), expected, "payload: {raw}");
        }
    }

    #[test]
    fn every_kebab_handoff_token_decodes() {
        for v in Handoff::VARIANTS {
            let raw = json!({"publicToken": "t", "language": "en", "handoff": [v.wire_token()]});
            assert_eq!(decode_session(&raw, None).unwrap().handoff, Some(vec![*v]));
        }
    }

    #[test]
    fn environment_path_overrides_payload() {
        let raw = json!({"publicToken": "t", "language": "en", "environment": "sandbox"});
        assert_eq!(decode_session(&raw, None).unwrap().environment, Environment::Sandbox);

        let path = "https://transact.qa.example.test";
        let first = decode_session(&raw, Some(path)).unwrap();
        assert_eq!(first.environment, Environment::Custom(path.into()));

        let bare = json!({"publicToken": "t", "language": "en"});
        let again = decode_session(&bare, Some(path)).unwrap();
        assert_eq!(again.environment, first.environment);
    }

    #[test]
    fn custom_environment_without_path_is_rejected() {
        let raw = json!({"publicToken": "t", "language": "en", "environment": "custom"});
        assert_eq!(field_of(decode_session(&raw, None).unwrap_err()), "environment");
    }

    #[test]
    fn decodes_action_config() {
        let raw = json!({"id": "act_42", "theme": {"overlayColor": "#000000"}});
        let action = decode_action(&raw, Some("https://qa.example.test")).unwrap();
        assert_eq!(action.id, "act_42");
        assert_eq!(action.environment, Environment::Custom("https://qa.example.test".into()));
        assert_eq!(
            action.theme.and_then(|t| t.overlay_color).as_deref(),
            Some("#000000")
        );

        assert_eq!(field_of(decode_action(&json!({}), None).unwrap_err()), "id");
    }

    #[test]
    fn decode_dispatches_on_kind() {
        let session = json!({"publicToken": "t", "language": "en"});
        assert!(matches!(
            decode(&session, ConfigKind::Session, None).unwrap(),
            TypedConfig::Session(_)
        ));

        let action = json!({"id": "a"});
        assert!(matches!(
            decode(&action, ConfigKind::Action, None).unwrap(),
            TypedConfig::Action(_)
        ));
    }
}
