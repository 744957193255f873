use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use env_replace::EnvReplaceError;
use env_replace::rewrite::rewrite_stream;
use env_replace::table::{EnvSnapshot, build_rule_set};

#[derive(Parser)]
#[command(name = "env-replace")]
#[command(
	author,
	version,
	about = "Un-expand environment variables for more compact output",
	long_about = "Un-expand environment variables for more compact output.\n\n\
		Reads stdin and replaces long values found in the current environment \
		with $NAME references.\n\n\
		Usage:\n\n    some-big-output-producing-command | env-replace"
)]
struct Cli {}

fn main() -> ExitCode {
	let _cli = Cli::parse();
	init_logging();

	match run() {
		Ok(code) => code,
		Err(e) => {
			// Downstream closed the pipe; nothing useful left to report.
			if e
				.downcast_ref::<EnvReplaceError>()
				.is_some_and(EnvReplaceError::is_broken_pipe)
			{
				return ExitCode::FAILURE;
			}
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

/// Logs go to stderr so stdout carries only the rewritten stream.
fn init_logging() {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "env_replace=warn".into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run() -> Result<ExitCode> {
	let env = EnvSnapshot::from_process();
	let rules = build_rule_set(&env);

	let stdin = std::io::stdin();
	let stdout = std::io::stdout();
	let mut output = stdout.lock();

	rewrite_stream(&rules, stdin.lock(), &mut output).context("Failed to rewrite input")?;

	Ok(ExitCode::SUCCESS)
}
