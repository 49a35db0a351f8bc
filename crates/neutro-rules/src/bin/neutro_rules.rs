//! Recycling rules CLI.
//!
//! This binary delegates to `neutro_rules::cli` for parsing and execution,
//! keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use neutro_rules::RulesSettings;
use neutro_rules::cli::{CliError, ParseOutcome, USAGE, execute, load_rules, parse_args};
use ortho_config::OrthoConfig;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let settings = RulesSettings::load_from_iter([OsString::from("neutro-rules")]).map_err(
        |err| CliError::Config {
            message: err.to_string(),
        },
    )?;
    init_tracing(settings.json_logs);

    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            write_stdout(USAGE);
            Ok(())
        }
        ParseOutcome::Command(command) => {
            let rules = load_rules(&settings)?;
            let policy = settings.lookup_policy();
            debug!(?command, ?policy, "executing command");
            let output = execute(&command, &rules, policy)?;
            write_stdout(&format!("{output}\n"));
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn write_stdout(message: &str) {
    if let Err(err) = io::stdout().lock().write_all(message.as_bytes()) {
        drop(err);
    }
}
