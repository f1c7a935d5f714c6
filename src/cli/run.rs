//! Suite mode CLI logic
//!
//! Runs the end-to-end cases and prints the report to stdout.

use crate::{
    Report, Settings, Suite, TestContext,
    error::format_error_for_logging,
    utils::version,
};
use anyhow::Result;
use tracing::{error, info};

/// Arguments for suite mode
#[derive(Debug, Default)]
pub struct RunArgs {
    pub config: Option<String>,
    pub cases: Vec<String>,
    pub json: bool,
    pub verbose: bool,
}

/// Run suite mode, returning the process exit code
pub async fn run_suite_mode(args: RunArgs) -> Result<i32> {
    // Load configuration FIRST so logging.level from the file applies
    let report = match super::load_settings(args.config.as_deref()) {
        Ok(settings) => {
            super::init_logging(&settings.logging, args.verbose);
            info!("Starting robot-e2e v{}", version::get_version());
            execute(&settings, &args.cases).await
        }
        Err(e) => {
            super::init_logging(&Default::default(), args.verbose);
            error!("Failed to load configuration: {}", format_error_for_logging(&e));
            Report::setup_failed(&e)
        }
    };

    print_report(&report, args.json)?;
    Ok(report.exit_code())
}

/// Validate settings, set up the shared context and run the selected cases.
/// Any failure before the first case yields a setup-failed report.
pub async fn execute(settings: &Settings, cases: &[String]) -> Report {
    let suite = match settings
        .validate()
        .and_then(|_| Suite::default().filter(cases))
    {
        Ok(suite) => suite,
        Err(e) => return Report::setup_failed(&e),
    };

    let ctx = match TestContext::setup(settings).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Setup failed: {}", format_error_for_logging(&e));
            return Report::setup_failed(&e);
        }
    };

    info!("Running {} case(s): {}", suite.len(), suite.names().join(", "));
    let report = suite.run(&ctx).await;
    info!("{} passed, {} failed", report.passed(), report.failed());
    report
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(())
}
