//! View and call mode CLI logic
//!
//! Single contract invocations against the configured contract, for
//! inspecting state around a suite run.

use crate::{CallOutcome, Error, FunctionCallOptions, Settings, TestContext};
use anyhow::Result;
use serde_json::{Value, json};
use tracing::info;

/// Arguments for `view`
#[derive(Debug)]
pub struct ViewArgs {
    pub config: Option<String>,
    pub method: String,
    pub args: Option<String>,
    pub verbose: bool,
}

/// Arguments for `call`
#[derive(Debug)]
pub struct CallArgs {
    pub config: Option<String>,
    pub method: String,
    pub args: Option<String>,
    pub gas: Option<u64>,
    pub deposit: Option<String>,
    pub verbose: bool,
}

/// Print the JSON result of a view call
pub async fn run_view_mode(args: ViewArgs) -> Result<()> {
    let settings = prepare(args.config.as_deref(), args.verbose, |_| {})?;
    let call_args = parse_args(args.args.as_deref())?;

    let ctx = TestContext::setup(&settings).await?;
    let result: Value = ctx
        .account()
        .view_function(ctx.contract_id(), &args.method, &call_args)
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Submit a signed function call and print its hash and status
pub async fn run_call_mode(args: CallArgs) -> Result<()> {
    let settings = prepare(args.config.as_deref(), args.verbose, |settings| {
        if let Some(gas) = args.gas {
            settings.transaction.gas = gas;
        }
        if let Some(deposit) = &args.deposit {
            settings.transaction.deposit = deposit.clone();
        }
    })?;
    let call_args = parse_args(args.args.as_deref())?;

    let ctx = TestContext::setup(&settings).await?;
    let options = FunctionCallOptions::new(ctx.contract_id().clone(), args.method.as_str())
        .with_args(call_args)
        .with_gas(settings.transaction.gas)
        .with_deposit(settings.deposit()?);

    let outcome = ctx.account().function_call(options).await?;
    info!("Call to {} landed in {}", args.method, outcome.transaction_hash);

    println!("{}", serde_json::to_string_pretty(&outcome_summary(&outcome))?);
    Ok(())
}

/// Load settings, apply CLI overrides, start logging, then validate
fn prepare(
    config: Option<&str>,
    verbose: bool,
    overrides: impl FnOnce(&mut Settings),
) -> Result<Settings> {
    let mut settings = super::load_settings(config)?;
    overrides(&mut settings);
    super::init_logging(&settings.logging, verbose);
    settings.validate()?;
    Ok(settings)
}

/// Parse `--args`, defaulting to an empty object
pub fn parse_args(args: Option<&str>) -> crate::Result<Value> {
    match args {
        None => Ok(json!({})),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| Error::config("args", format!("Invalid JSON arguments: {}", e))),
    }
}

/// Hash, status, logs, gas and the decoded return value
pub fn outcome_summary(outcome: &CallOutcome) -> Value {
    let bytes = &outcome.return_value;
    let return_value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
    };

    json!({
        "transaction_hash": outcome.transaction_hash,
        "status": "SUCCESS",
        "logs": outcome.logs,
        "gas_burnt": outcome.gas_burnt,
        "return_value": return_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_defaults_to_empty_object() {
        assert_eq!(parse_args(None).unwrap(), json!({}));
        assert_eq!(
            parse_args(Some(r#"{"account_id":"a.testnet"}"#)).unwrap(),
            json!({"account_id": "a.testnet"})
        );
    }

    #[test]
    fn test_parse_args_rejects_invalid_json() {
        let err = parse_args(Some("{not json")).unwrap_err();
        assert!(matches!(err, Error::Config { ref field, .. } if field == "args"));
    }

    #[test]
    fn test_outcome_summary() {
        let outcome = CallOutcome {
            transaction_hash: "9xTx".to_string(),
            logs: vec!["turned".to_string()],
            gas_burnt: 300,
            return_value: b"\"West\"".to_vec(),
        };

        let summary = outcome_summary(&outcome);
        assert_eq!(summary["transaction_hash"], "9xTx");
        assert_eq!(summary["status"], "SUCCESS");
        assert_eq!(summary["logs"], json!(["turned"]));
        assert_eq!(summary["gas_burnt"], 300);
        assert_eq!(summary["return_value"], "West");
    }

    #[test]
    fn test_outcome_summary_unit_and_raw_returns() {
        let mut outcome = CallOutcome {
            transaction_hash: "9xTx".to_string(),
            logs: vec![],
            gas_burnt: 1,
            return_value: vec![],
        };
        assert_eq!(outcome_summary(&outcome)["return_value"], Value::Null);

        outcome.return_value = b"not json".to_vec();
        assert_eq!(outcome_summary(&outcome)["return_value"], "not json");
    }
}
