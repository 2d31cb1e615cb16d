//! `central-publish` entrypoint.
//!
//! Validates, bundles and uploads one Maven publication to the Central
//! Publisher Portal, then prints the deployment id.

use central_publisher_cli::app::run;
use central_publisher_cli::cli::Cli;
use central_publisher_cli::error::Result;
use central_publisher_cli::output::write_error_chain;
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Route library log records to stderr; `RUST_LOG` overrides the flags.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_error_chain(stderr, &err);
            1
        }
    }
}
