//! Retry definitions and the names methods refer to them by.

use indexmap::IndexMap;
use veneer_config::{RetryCodesDefinition, RetryParamsDefinition, StatusCode};
use veneer_model::MethodModel;

pub const RETRY_CODES_IDEMPOTENT_NAME: &str = "idempotent";
pub const RETRY_CODES_NON_IDEMPOTENT_NAME: &str = "non_idempotent";
pub const RETRY_PARAMS_DEFAULT_NAME: &str = "default";

/// Retry codes name for a method the config says nothing about.
pub fn infer_retry_codes_name(method: &MethodModel) -> &'static str {
    if method.idempotent {
        RETRY_CODES_IDEMPOTENT_NAME
    } else {
        RETRY_CODES_NON_IDEMPOTENT_NAME
    }
}

pub fn default_retry_codes() -> Vec<RetryCodesDefinition> {
    vec![
        RetryCodesDefinition {
            name: RETRY_CODES_IDEMPOTENT_NAME.to_string(),
            retry_codes: vec![StatusCode::DeadlineExceeded, StatusCode::Unavailable],
        },
        RetryCodesDefinition {
            name: RETRY_CODES_NON_IDEMPOTENT_NAME.to_string(),
            retry_codes: Vec::new(),
        },
    ]
}

pub fn default_retry_params() -> Vec<RetryParamsDefinition> {
    vec![RetryParamsDefinition {
        name: RETRY_PARAMS_DEFAULT_NAME.to_string(),
        initial_retry_delay_millis: 100,
        retry_delay_multiplier: 1.3,
        max_retry_delay_millis: 60_000,
        initial_rpc_timeout_millis: 20_000,
        rpc_timeout_multiplier: 1.0,
        max_rpc_timeout_millis: 20_000,
        total_timeout_millis: 600_000,
    }]
}

/// Retry codes by name, falling back to the defaults when none are defined.
pub fn retry_codes_map(defs: &[RetryCodesDefinition]) -> IndexMap<String, Vec<StatusCode>> {
    let defs = if defs.is_empty() {
        default_retry_codes()
    } else {
        defs.to_vec()
    };
    defs.into_iter().map(|d| (d.name, d.retry_codes)).collect()
}

/// Retry params by name, falling back to the defaults when none are defined.
pub fn retry_params_map(defs: &[RetryParamsDefinition]) -> IndexMap<String, RetryParamsDefinition> {
    let defs = if defs.is_empty() {
        default_retry_params()
    } else {
        defs.to_vec()
    };
    defs.into_iter().map(|d| (d.name.clone(), d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_empty() {
        let codes = retry_codes_map(&[]);
        assert_eq!(
            codes.get("idempotent"),
            Some(&vec![StatusCode::DeadlineExceeded, StatusCode::Unavailable])
        );
        assert_eq!(codes.get("non_idempotent"), Some(&Vec::new()));

        let params = retry_params_map(&[]);
        let default = params.get("default").unwrap();
        assert_eq!(default.initial_retry_delay_millis, 100);
        assert_eq!(default.total_timeout_millis, 600_000);
    }

    #[test]
    fn test_explicit_definitions_replace_defaults() {
        let codes = retry_codes_map(&[RetryCodesDefinition {
            name: "custom".into(),
            retry_codes: vec![StatusCode::Aborted],
        }]);
        assert_eq!(codes.len(), 1);
        assert!(codes.contains_key("custom"));
    }
}
