//! CLI support for evaluating the recycling rules.
//!
//! This module provides parsing and execution helpers for the
//! `neutro-rules` binary. The binary delegates to these functions so they
//! can be exercised in tests without spawning a subprocess.

mod error;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

pub use error::CliError;

use crate::config::RulesSettings;
use crate::conversion::convert_with_policy;
use crate::fs_read;
use crate::level::{LevelBenefits, LevelDecision, LevelProgress, UserLevel, check_level_upgrade_id};
use crate::material::{MaterialSpec, MeasureUnit};
use crate::points::points_with_policy;
use crate::policy::LookupPolicy;
use crate::registry::MaterialRegistry;
use crate::rules::Rules;
use crate::summary::{RecyclingEntry, summarize};

/// Usage text printed for `--help`.
pub const USAGE: &str = concat!(
    "Usage: neutro-rules <command> [options]\n",
    "\n",
    "Commands:\n",
    "  convert --material <id> --quantity <x> --from <unit> --to <unit>\n",
    "  points --material <id> --kg <x>\n",
    "  level --points <n> --level <id>\n",
    "  summary --entries <path>\n",
    "  materials\n",
    "\n",
    "Units: kg, un, sacos, L\n",
    "Levels: bronze, silver, gold\n",
    "\n",
    "Environment:\n",
    "  NEUTRO_STRICT_LOOKUPS   Reject unknown materials and levels\n",
    "  NEUTRO_JSON_LOGS        Emit logs as JSON\n",
    "  NEUTRO_REGISTRY_PATH    Material registry JSON replacing the builtin table\n",
    "\n",
    "  -h, --help              Print this help output\n",
);

/// A parsed CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert a quantity between units.
    Convert {
        /// Material id.
        material: String,
        /// Quantity in `from` units.
        quantity: f64,
        /// Source unit.
        from: MeasureUnit,
        /// Target unit.
        to: MeasureUnit,
    },
    /// Compute points for recycled kilograms.
    Points {
        /// Material id.
        material: String,
        /// Kilograms recycled.
        kg: f64,
    },
    /// Check whether a point balance upgrades a level.
    Level {
        /// Accumulated points.
        points: i64,
        /// Current level id.
        level: String,
    },
    /// Summarise a JSON file of recycling entries.
    Summary {
        /// Path to the entries file.
        entries: Utf8PathBuf,
    },
    /// List the material registry.
    Materials,
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Run the parsed command.
    Command(Command),
}

/// Parses CLI arguments into a command.
///
/// # Errors
///
/// Returns [`CliError`] when the command is missing or unknown, a required
/// flag is absent, or a value cannot be parsed.
///
/// # Example
///
/// ```
/// use neutro_rules::MeasureUnit;
/// use neutro_rules::cli::{Command, ParseOutcome, parse_args};
///
/// let args = ["convert", "--material", "papel", "--quantity", "10", "--from", "kg", "--to", "sacos"]
///     .map(str::to_owned);
///
/// let outcome = parse_args(args.into_iter()).expect("parse args");
/// assert_eq!(
///     outcome,
///     ParseOutcome::Command(Command::Convert {
///         material: "papel".to_owned(),
///         quantity: 10.0,
///         from: MeasureUnit::Kilograms,
///         to: MeasureUnit::Bags,
///     })
/// );
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let Some(command) = args.next() else {
        return Err(CliError::MissingCommand);
    };
    if is_help(&command) {
        return Ok(ParseOutcome::Help);
    }
    if !COMMANDS.contains(&command.as_str()) {
        return Err(CliError::UnknownCommand { value: command });
    }

    let mut flags = Flags::default();
    while let Some(arg) = args.next() {
        if is_help(&arg) {
            return Ok(ParseOutcome::Help);
        }
        let flag = known_flag(&arg).ok_or(CliError::UnknownArgument { value: arg })?;
        let value = next_value(&mut args, flag)?;
        flags.set(flag, value);
    }

    let parsed = match command.as_str() {
        "convert" => Command::Convert {
            material: flags.require("--material")?,
            quantity: parse_number(&flags.require("--quantity")?, "--quantity")?,
            from: flags.require("--from")?.parse()?,
            to: flags.require("--to")?.parse()?,
        },
        "points" => Command::Points {
            material: flags.require("--material")?,
            kg: parse_number(&flags.require("--kg")?, "--kg")?,
        },
        "level" => Command::Level {
            points: parse_number(&flags.require("--points")?, "--points")?,
            level: flags.require("--level")?,
        },
        "summary" => Command::Summary {
            entries: Utf8PathBuf::from(flags.require("--entries")?),
        },
        "materials" => Command::Materials,
        _ => return Err(CliError::UnknownCommand { value: command }),
    };

    flags.reject_unused()?;
    Ok(ParseOutcome::Command(parsed))
}

/// Runs a command and renders its result as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CliError`] when a lookup fails under
/// [`LookupPolicy::Strict`], the entries file cannot be read, or the result
/// cannot be serialised.
///
/// # Example
///
/// ```
/// use neutro_rules::{LookupPolicy, Rules};
/// use neutro_rules::cli::{Command, execute};
///
/// let command = Command::Points {
///     material: "plastico".to_owned(),
///     kg: 10.0,
/// };
/// let output = execute(&command, &Rules::builtin(), LookupPolicy::Lenient).expect("execute");
///
/// assert!(output.contains("\"points\": 150"));
/// ```
pub fn execute(command: &Command, rules: &Rules, policy: LookupPolicy) -> Result<String, CliError> {
    match command {
        Command::Convert {
            material,
            quantity,
            from,
            to,
        } => {
            let result =
                convert_with_policy(rules.registry(), policy, material, *quantity, *from, *to)?;
            render(&ConvertOutput {
                material,
                quantity: *quantity,
                from: *from,
                to: *to,
                result,
            })
        }
        Command::Points { material, kg } => {
            let points = points_with_policy(rules, policy, *kg, material)?;
            render(&PointsOutput {
                material,
                kg: *kg,
                points,
            })
        }
        Command::Level { points, level } => {
            let decision = check_level_upgrade_id(rules.levels(), policy, *points, level)?;
            let resolved = decision.new_level.parse::<UserLevel>().ok();
            render(&LevelOutput {
                progress: resolved.map(|current| rules.levels().progress(*points, current)),
                benefits: resolved.map(|current| *rules.levels().benefits(current)),
                decision,
            })
        }
        Command::Summary { entries } => {
            let parsed = load_entries(entries)?;
            render(&summarize(rules, &parsed, policy)?)
        }
        Command::Materials => {
            let specs: Vec<&MaterialSpec> = rules.registry().specs().collect();
            render(&specs)
        }
    }
}

/// Builds the rule tables selected by `settings`.
///
/// Without a registry path the builtin tables are used. With one, the
/// registry file replaces the builtin material registry while the points
/// and level tables stay builtin.
///
/// # Errors
///
/// Returns [`CliError::Config`] when the registry path is not UTF-8 and
/// [`CliError::Registry`] when the registry file cannot be loaded.
pub fn load_rules(settings: &RulesSettings) -> Result<Rules, CliError> {
    let Some(path) = settings.registry_path.clone() else {
        return Ok(Rules::builtin());
    };
    let utf8_path = Utf8PathBuf::from_path_buf(path).map_err(|rejected| CliError::Config {
        message: format!("registry path is not UTF-8: {}", rejected.display()),
    })?;
    let registry = MaterialRegistry::from_file(&utf8_path)?;
    Ok(Rules::builtin().with_registry(registry))
}

/// Loads a JSON array of recycling entries.
///
/// # Errors
///
/// Returns [`CliError::EntriesRead`] or [`CliError::EntriesParse`] when the
/// file cannot be read or parsed.
pub fn load_entries(path: &Utf8Path) -> Result<Vec<RecyclingEntry>, CliError> {
    let contents = fs_read::read_to_string(path).map_err(|e| CliError::EntriesRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| CliError::EntriesParse {
        message: e.to_string(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertOutput<'a> {
    material: &'a str,
    quantity: f64,
    from: MeasureUnit,
    to: MeasureUnit,
    result: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PointsOutput<'a> {
    material: &'a str,
    kg: f64,
    points: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelOutput {
    #[serde(flatten)]
    decision: LevelDecision,
    progress: Option<LevelProgress>,
    benefits: Option<LevelBenefits>,
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output {
        message: e.to_string(),
    })
}

const COMMANDS: [&str; 5] = ["convert", "points", "level", "summary", "materials"];

const FLAGS: [&str; 8] = [
    "--material",
    "--quantity",
    "--from",
    "--to",
    "--kg",
    "--points",
    "--level",
    "--entries",
];

#[derive(Debug, Default)]
struct Flags {
    values: Vec<(&'static str, String)>,
}

impl Flags {
    fn set(&mut self, flag: &'static str, value: String) {
        self.values.retain(|(existing, _)| *existing != flag);
        self.values.push((flag, value));
    }

    fn require(&mut self, flag: &'static str) -> Result<String, CliError> {
        let position = self
            .values
            .iter()
            .position(|(existing, _)| *existing == flag)
            .ok_or(CliError::MissingFlag { flag })?;
        Ok(self.values.swap_remove(position).1)
    }

    fn reject_unused(self) -> Result<(), CliError> {
        self.values.into_iter().next().map_or(Ok(()), |(flag, _)| {
            Err(CliError::UnknownArgument {
                value: flag.to_owned(),
            })
        })
    }
}

fn is_help(arg: &str) -> bool {
    matches!(arg, "-h" | "--help")
}

fn known_flag(arg: &str) -> Option<&'static str> {
    FLAGS.into_iter().find(|flag| *flag == arg)
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}
