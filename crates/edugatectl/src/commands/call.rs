use std::sync::Arc;

use anyhow::{bail, Context, Result};
use edugate_core::CONFIRMATION_FIELD;
use edugate_safety::{DispatchOutcome, Dispatcher, GateConfig};
use edugate_tools::HttpRemoteClient;
use serde_json::Value;

/// Dispatch one operation against the remote server
pub async fn execute(
    config: GateConfig,
    operation: &str,
    params: &str,
    confirm: bool,
    endpoint: &str,
) -> Result<()> {
    let params = build_params(params, confirm)?;

    let remote = HttpRemoteClient::new(endpoint).context("Failed to create remote client")?;
    let dispatcher = Dispatcher::builtin(Arc::new(remote), config);

    match dispatcher.dispatch(operation, params).await {
        DispatchOutcome::Success { text, .. } => {
            println!("{}", text);
            Ok(())
        }
        DispatchOutcome::Failure(err) => {
            eprintln!("{}", err);
            bail!("{} ({})", err.kind(), err.operation())
        }
    }
}

/// Parse `--params` and apply `--confirm`
fn build_params(raw: &str, confirm: bool) -> Result<Value> {
    let mut params: Value = serde_json::from_str(raw).context("--params must be a JSON object")?;
    if !params.is_object() {
        bail!("--params must be a JSON object");
    }
    if confirm {
        params[CONFIRMATION_FIELD] = Value::Bool(true);
    }
    Ok(params)
}
