//! Command-line entry point for robot-e2e
//!
//! Runs the end-to-end suite by default. `view` and `call` invoke a single
//! method on the configured contract.
//!
//! # Usage
//!
//! ## Suite Mode
//! ```bash
//! robot-e2e --config robot-e2e.toml
//! robot-e2e run --case "test owner_id" --json
//! ```
//!
//! ## Single Calls
//! ```bash
//! robot-e2e view direction
//! robot-e2e call turn_right --gas 30000000000000
//! ```

use clap::{Args, Parser, Subcommand};

use robot_e2e::cli::{
    call::{CallArgs, ViewArgs, run_call_mode, run_view_mode},
    run::{RunArgs, run_suite_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "robot-e2e")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Suite options when no subcommand is provided
    #[command(flatten)]
    run: SuiteOptions,

    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Default)]
struct SuiteOptions {
    /// Run only the named case (repeatable)
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the end-to-end suite
    Run(SuiteOptions),

    /// Call a view method and print its JSON result
    View {
        /// Contract method name
        method: String,

        /// JSON arguments
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },

    /// Submit a signed function call
    Call {
        /// Contract method name
        method: String,

        /// JSON arguments
        #[arg(long, value_name = "JSON")]
        args: Option<String>,

        /// Attached gas
        #[arg(long)]
        gas: Option<u64>,

        /// Attached deposit in yoctoNEAR
        #[arg(long)]
        deposit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::View { method, args }) => {
            run_view_mode(ViewArgs {
                config: cli.config,
                method,
                args,
                verbose: cli.verbose,
            })
            .await
        }
        Some(Commands::Call {
            method,
            args,
            gas,
            deposit,
        }) => {
            run_call_mode(CallArgs {
                config: cli.config,
                method,
                args,
                gas,
                deposit,
                verbose: cli.verbose,
            })
            .await
        }
        command => {
            let options = match command {
                Some(Commands::Run(options)) => options,
                _ => cli.run,
            };
            let args = RunArgs {
                config: cli.config,
                cases: options.cases,
                json: options.json,
                verbose: cli.verbose,
            };
            let code = run_suite_mode(args).await?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
    }
}
