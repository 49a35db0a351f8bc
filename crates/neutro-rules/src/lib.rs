//! Recycling rules for the Neutro marketplace.
//!
//! This crate holds the pure rules behind the marketplace screens: material
//! unit conversion, gamification points, and the bronze/silver/gold level
//! ladder. Every table is an immutable value built once and passed by
//! reference; nothing here performs I/O apart from optional registry and
//! entries file loading.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Converting quantities between `kg`, `un`, `sacos`, and `L` through a
//!   kilogram pivot
//! - Scoring recycled kilograms with per-material multipliers
//! - Checking level upgrades and reporting progress and benefits
//! - Awarding points to a [`PointsRecord`] and summarising batches of
//!   recycled material
//! - Choosing between silent fallback and strict errors for unknown keys
//!   with [`LookupPolicy`]
//!
//! # Example
//!
//! ```
//! use neutro_rules::{
//!     LevelTable, MaterialRegistry, MeasureUnit, PointsTable, UserLevel, calculate_points,
//!     check_level_upgrade, convert_unit,
//! };
//!
//! let registry = MaterialRegistry::builtin();
//! let kg = convert_unit(&registry, "papel", 2.0, MeasureUnit::Bags, MeasureUnit::Kilograms);
//! assert!((kg - 10.0).abs() < 1e-9);
//!
//! let points = calculate_points(&PointsTable::builtin(), kg, "papel");
//! assert_eq!(points, 120);
//!
//! let upgrade = check_level_upgrade(&LevelTable::builtin(), 1_020, UserLevel::Bronze);
//! assert_eq!(upgrade.new_level, UserLevel::Silver);
//! ```

pub mod cli;
mod config;
mod conversion;
mod error;
mod fs_read;
mod level;
mod material;
mod points;
mod policy;
mod record;
mod registry;
mod rules;
mod summary;

pub use config::RulesSettings;
pub use conversion::{convert_unit, convert_with_policy, try_convert_unit};
pub use error::{LookupError, RegistryError};
pub use level::{
    LevelBenefits, LevelDecision, LevelProgress, LevelTable, LevelTier, LevelUpgrade, UserLevel,
    check_level_upgrade, check_level_upgrade_id,
};
pub use material::{ConversionFactors, MaterialSpec, MaterialType, MeasureUnit};
pub use points::{
    BASE_POINTS_PER_KG, DEFAULT_MULTIPLIER, PointsTable, calculate_points, points_with_policy,
    try_calculate_points,
};
pub use policy::LookupPolicy;
pub use record::{Award, PointsRecord};
pub use registry::MaterialRegistry;
pub use rules::Rules;
pub use summary::{MaterialTotals, RecyclingEntry, RecyclingSummary, summarize};
