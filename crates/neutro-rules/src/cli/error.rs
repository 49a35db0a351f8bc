//! Error types for the rules CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::{LookupError, RegistryError};

/// Errors surfaced by the CLI parsing and execution flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    /// No subcommand was supplied.
    #[error("missing command; expected one of: convert, points, level, summary, materials")]
    MissingCommand,
    /// The subcommand is not recognised.
    #[error("unknown command: {value}")]
    UnknownCommand {
        /// Command name that was not recognised.
        value: String,
    },
    /// A required flag was not supplied.
    #[error("missing required flag: {flag}")]
    MissingFlag {
        /// Flag that was not supplied.
        flag: &'static str,
    },
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The entries file could not be read.
    #[error("failed to read entries file at '{path}': {message}")]
    EntriesRead {
        /// Path to the entries file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The entries file is not a JSON array of entries.
    #[error("invalid entries JSON: {message}")]
    EntriesParse {
        /// Description of the parse error.
        message: String,
    },
    /// Settings could not be loaded.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
    /// The command result could not be rendered as JSON.
    #[error("failed to render output: {message}")]
    Output {
        /// Description of the serialisation failure.
        message: String,
    },
    /// A material, level, or unit id was not recognised.
    #[error("lookup error: {source}")]
    Lookup {
        /// Underlying lookup error.
        #[from]
        #[source]
        source: LookupError,
    },
    /// The material registry could not be loaded.
    #[error("registry error: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
}
