//! Dispatch Integration Tests
//!
//! Runs operations end to end through the dispatcher against a spy remote.
//! These tests verify that:
//! - The remote is never reached when policy or confirmation blocks a call
//! - Allowed, confirmed calls reach the remote exactly once
//! - Remote failures and timeouts come back as outcomes
//! - Identifier normalization and confirmation stripping shape the forwarded params

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use edugate_core::{EdugateError, EdugateResult, RemoteClient, RiskTier, CONFIRMATION_FIELD};
use edugate_safety::{DispatchError, DispatchOutcome, Dispatcher, GateConfig};
use edugate_tools::{OperationCatalog, OperationSpec, ToolCategory};
use serde_json::{json, Value};

/// Remote behaviour for a test
#[derive(Clone)]
enum Behaviour {
    Return(Value),
    Fail(String),
    Slow(Duration, Value),
    Hang,
}

/// Spy remote recording every call
struct SpyRemote {
    behaviour: Behaviour,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Value)>>,
}

impl SpyRemote {
    fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_params(&self) -> Value {
        self.last
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, params)| params.clone())
            .unwrap_or(Value::Null)
    }
}

#[async_trait]
impl RemoteClient for SpyRemote {
    async fn call(&self, operation: &str, params: Value) -> EdugateResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((operation.to_string(), params));

        match &self.behaviour {
            Behaviour::Return(value) => Ok(value.clone()),
            Behaviour::Fail(message) => Err(EdugateError::remote(message.clone())),
            Behaviour::Slow(delay, value) => {
                tokio::time::sleep(*delay).await;
                Ok(value.clone())
            }
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Value::Null)
            }
        }
    }
}

fn schema() -> Value {
    json!({
        "type": "object",
        "properties": { "username": { "type": "string" } }
    })
}

/// Catalog with one operation per tier
fn test_catalog() -> OperationCatalog {
    OperationCatalog::from_operations(vec![
        OperationSpec::new("get_user", "Get a user", RiskTier::Safe, ToolCategory::Users, schema())
            .with_identity_param("username"),
        OperationSpec::new("update_user", "Update a user", RiskTier::Moderate, ToolCategory::Users, schema())
            .with_identity_param("username"),
        OperationSpec::new("deactivate_user", "Deactivate a user", RiskTier::Destructive, ToolCategory::Users, schema())
            .with_identity_param("username")
            .with_warning("The account cannot sign in."),
        OperationSpec::new("delete_user", "Delete a user", RiskTier::Critical, ToolCategory::Users, schema())
            .with_identity_param("username"),
    ])
    .unwrap()
}

fn config(allow_destructive: bool, require_confirmation: bool) -> GateConfig {
    GateConfig {
        allow_destructive,
        require_confirmation,
        remote_timeout_secs: None,
    }
}

fn setup(behaviour: Behaviour, config: GateConfig) -> (Dispatcher, Arc<SpyRemote>) {
    let remote = SpyRemote::new(behaviour);
    let dispatcher = Dispatcher::new(remote.clone(), test_catalog(), config);
    (dispatcher, remote)
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_safe_operation_runs_without_confirmation() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!({"username": "jane.doe"})), config(false, true));

    let outcome = dispatcher.dispatch("get_user", json!({"username": "jane.doe"})).await;

    assert!(outcome.is_success());
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_destructive_denied_before_remote() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(false, true));

    let outcome = dispatcher
        .dispatch("deactivate_user", json!({"username": "jane.doe", CONFIRMATION_FIELD: true}))
        .await;

    match outcome.error() {
        Some(DispatchError::PolicyDenied { operation, reason }) => {
            assert_eq!(operation, "deactivate_user");
            assert!(reason.contains("EDUGATE_ALLOW_DESTRUCTIVE"));
        }
        other => panic!("expected PolicyDenied, got {:?}", other),
    }
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn test_critical_denied_before_remote() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(false, false));

    let outcome = dispatcher.dispatch("delete_user", json!({"username": "jane.doe"})).await;

    assert!(matches!(outcome.error(), Some(DispatchError::PolicyDenied { .. })));
    assert!(outcome.to_string().contains("critical operations are disabled"));
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn test_missing_confirmation_blocks_remote() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, true));

    let outcome = dispatcher.dispatch("deactivate_user", json!({"username": "jane.doe"})).await;

    match outcome.error() {
        Some(err @ DispatchError::ConfirmationMissing { message, .. }) => {
            assert!(err.is_retryable());
            assert!(message.contains("The account cannot sign in."));
            assert!(message.contains(CONFIRMATION_FIELD));
        }
        other => panic!("expected ConfirmationMissing, got {:?}", other),
    }
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn test_confirmed_call_reaches_remote_once() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, true));

    let outcome = dispatcher
        .dispatch("deactivate_user", json!({"username": "jane.doe", CONFIRMATION_FIELD: true}))
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.to_string(), "Operation 'deactivate_user' completed successfully.");
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_remote_failure_is_contained() {
    let (dispatcher, remote) = setup(Behaviour::Fail("HTTP 502 from upstream".into()), config(true, true));

    let outcome = dispatcher
        .dispatch("deactivate_user", json!({"username": "jane.doe", CONFIRMATION_FIELD: true}))
        .await;

    match outcome {
        DispatchOutcome::Failure(DispatchError::RemoteFailure { operation, message }) => {
            assert_eq!(operation, "deactivate_user");
            assert_eq!(message, "HTTP 502 from upstream");
        }
        other => panic!("expected RemoteFailure, got {:?}", other),
    }
    assert_eq!(remote.calls(), 1);

    // Still usable afterwards
    let outcome = dispatcher.dispatch("get_user", json!({"username": "jane.doe"})).await;
    assert!(outcome.error().is_some());
    assert_eq!(remote.calls(), 2);
}

// ============================================================================
// Gate properties
// ============================================================================

#[tokio::test]
async fn test_loose_confirmation_values_never_reach_remote() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, true));

    for value in [json!(1), json!("true"), json!("1"), json!(false), json!(null)] {
        let outcome = dispatcher
            .dispatch("delete_user", json!({"username": "jane.doe", CONFIRMATION_FIELD: value}))
            .await;
        assert!(matches!(outcome.error(), Some(DispatchError::ConfirmationMissing { .. })));
    }
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn test_confirmation_disabled_globally() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, false));

    let outcome = dispatcher.dispatch("delete_user", json!({"username": "jane.doe"})).await;

    assert!(outcome.is_success());
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_unknown_operation_treated_as_moderate() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!("ok")), config(false, true));

    let outcome = dispatcher.dispatch("archive_timetable", json!({})).await;

    assert!(outcome.is_success());
    assert_eq!(remote.calls(), 1);
    assert_eq!(dispatcher.policy().tier_of("archive_timetable"), RiskTier::Moderate);
}

#[tokio::test]
async fn test_advertised_matches_call_time_policy() {
    for allow in [false, true] {
        let (dispatcher, _remote) = setup(Behaviour::Return(json!(true)), config(allow, false));
        let advertised: Vec<String> = dispatcher
            .advertised_operations()
            .iter()
            .map(|op| op.name.clone())
            .collect();

        for name in dispatcher.catalog().names() {
            let outcome = dispatcher.dispatch(name, json!({})).await;
            let denied = matches!(outcome.error(), Some(DispatchError::PolicyDenied { .. }));
            assert_eq!(advertised.iter().any(|n| n == name), !denied, "{} (allow={})", name, allow);
        }
    }
}

// ============================================================================
// Parameter shaping
// ============================================================================

#[tokio::test]
async fn test_identifier_normalized_before_remote() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(false, true));

    dispatcher.dispatch("get_user", json!({"username": "John Doe"})).await;

    assert_eq!(remote.last_params(), json!({"username": "john.doe"}));
}

#[tokio::test]
async fn test_garbage_identifier_still_dispatched() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(false, true));

    let outcome = dispatcher.dispatch("update_user", json!({"username": "?! ##"})).await;

    assert!(outcome.is_success());
    assert_eq!(remote.last_params(), json!({"username": "."}));
}

#[tokio::test]
async fn test_confirmation_field_not_forwarded() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, true));

    dispatcher
        .dispatch("delete_user", json!({"username": "jane.doe", CONFIRMATION_FIELD: true}))
        .await;

    assert_eq!(remote.last_params(), json!({"username": "jane.doe"}));
}

#[tokio::test]
async fn test_null_params_become_empty_object() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(false, true));

    dispatcher.dispatch("get_user", Value::Null).await;

    assert_eq!(remote.last_params(), json!({}));
}

// ============================================================================
// Timeouts and concurrency
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_timeout_is_an_outcome() {
    let mut gate = config(false, true);
    gate.remote_timeout_secs = Some(5);
    let (dispatcher, remote) = setup(Behaviour::Hang, gate);

    let outcome = dispatcher.dispatch("get_user", json!({"username": "jane.doe"})).await;

    assert_eq!(
        outcome.error(),
        Some(&DispatchError::Timeout {
            operation: "get_user".to_string(),
            timeout_secs: 5,
        })
    );
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_zero_timeout_from_yaml_does_not_expire() {
    let gate = GateConfig::from_yaml_str("remote_timeout_secs: 0").unwrap();
    let (dispatcher, remote) = setup(
        Behaviour::Slow(Duration::from_millis(10), json!({"username": "jane.doe"})),
        gate,
    );

    let outcome = dispatcher.dispatch("get_user", json!({"username": "jane.doe"})).await;

    assert!(outcome.is_success(), "unexpected outcome: {}", outcome);
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_dispatches_are_independent() {
    let (dispatcher, remote) = setup(Behaviour::Return(json!(true)), config(true, true));

    let calls = (0..20).map(|i| {
        let dispatcher = dispatcher.clone();
        async move {
            let params = if i % 2 == 0 {
                json!({"username": "jane.doe", CONFIRMATION_FIELD: true})
            } else {
                json!({"username": "jane.doe"})
            };
            dispatcher.dispatch("deactivate_user", params).await
        }
    });
    let outcomes = futures::future::join_all(calls).await;

    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 10);
    assert_eq!(remote.calls(), 10);
}
