//! Gamification points for recycled material.
//!
//! Every kilogram earns a fixed number of base points, scaled by a
//! per-material multiplier. Material keys are free-form strings; keys
//! without a multiplier earn the default multiplier.

#![expect(
    clippy::float_arithmetic,
    reason = "points are derived from fractional kilograms"
)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::policy::LookupPolicy;
use crate::rules::Rules;

/// Base points earned per recycled kilogram.
pub const BASE_POINTS_PER_KG: f64 = 10.0;

/// Multiplier applied to materials with no entry in the table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Per-material point multipliers.
///
/// # Example
///
/// ```
/// use neutro_rules::PointsTable;
///
/// let table = PointsTable::builtin().with_multiplier("vidro", 2.5);
/// assert_eq!(table.multiplier("vidro"), Some(2.5));
/// assert_eq!(table.multiplier("madeira"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTable {
    base_points_per_kg: f64,
    multipliers: BTreeMap<String, f64>,
}

impl PointsTable {
    /// Returns the compiled-in multiplier table.
    #[must_use]
    pub fn builtin() -> Self {
        let multipliers = [
            ("papel", 1.2),
            ("plastico", 1.5),
            ("vidro", 1.8),
            ("metal", 2.0),
            ("eletronico", 3.0),
        ]
        .into_iter()
        .map(|(material, multiplier)| (material.to_owned(), multiplier))
        .collect();

        Self {
            base_points_per_kg: BASE_POINTS_PER_KG,
            multipliers,
        }
    }

    /// Returns a copy of the table with `material` mapped to `multiplier`.
    #[must_use]
    pub fn with_multiplier(mut self, material: &str, multiplier: f64) -> Self {
        self.multipliers.insert(material.to_owned(), multiplier);
        self
    }

    /// Returns the multiplier registered for `material`, if any.
    #[must_use]
    pub fn multiplier(&self, material: &str) -> Option<f64> {
        self.multipliers.get(material).copied()
    }

    /// Returns the base points earned per kilogram.
    #[must_use]
    pub const fn base_points_per_kg(&self) -> f64 {
        self.base_points_per_kg
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Computes the points earned for recycling `kg_recycled` of a material.
///
/// Materials without a multiplier use [`DEFAULT_MULTIPLIER`]. The result is
/// rounded half away from zero.
///
/// # Example
///
/// ```
/// use neutro_rules::{PointsTable, calculate_points};
///
/// let table = PointsTable::builtin();
/// assert_eq!(calculate_points(&table, 5.0, "papel"), 60);
/// assert_eq!(calculate_points(&table, 10.0, "unknown_material"), 100);
/// ```
#[must_use]
pub fn calculate_points(table: &PointsTable, kg_recycled: f64, material_type: &str) -> i64 {
    let multiplier = table.multiplier(material_type).unwrap_or(DEFAULT_MULTIPLIER);
    scaled_points(table, kg_recycled, multiplier)
}

/// Computes points, rejecting materials the registry does not know.
///
/// Registered materials without a multiplier earn [`DEFAULT_MULTIPLIER`],
/// matching [`calculate_points`].
///
/// # Errors
///
/// Returns [`LookupError::UnknownMaterial`] if `material_type` is not in the
/// registry.
///
/// # Example
///
/// ```
/// use neutro_rules::{Rules, try_calculate_points};
///
/// let rules = Rules::builtin();
/// assert_eq!(try_calculate_points(&rules, 1.0, "aluminio"), Ok(10));
/// assert!(try_calculate_points(&rules, 1.0, "madeira").is_err());
/// ```
pub fn try_calculate_points(
    rules: &Rules,
    kg_recycled: f64,
    material_type: &str,
) -> Result<i64, LookupError> {
    rules.registry().find(material_type)?;
    Ok(calculate_points(rules.points(), kg_recycled, material_type))
}

/// Computes points under an explicit [`LookupPolicy`].
///
/// # Errors
///
/// Returns [`LookupError::UnknownMaterial`] only under
/// [`LookupPolicy::Strict`].
pub fn points_with_policy(
    rules: &Rules,
    policy: LookupPolicy,
    kg_recycled: f64,
    material_type: &str,
) -> Result<i64, LookupError> {
    policy.recover(
        try_calculate_points(rules, kg_recycled, material_type),
        || calculate_points(rules.points(), kg_recycled, material_type),
    )
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate, which is the intended clamp for huge inputs"
)]
fn scaled_points(table: &PointsTable, kg_recycled: f64, multiplier: f64) -> i64 {
    let base_points = kg_recycled * table.base_points_per_kg;
    (base_points * multiplier).round() as i64
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn table() -> PointsTable {
        PointsTable::builtin()
    }

    #[rstest]
    #[case(5.0, "papel", 60)]
    #[case(10.0, "plastico", 150)]
    #[case(1.0, "eletronico", 30)]
    #[case(2.5, "vidro", 45)]
    #[case(3.0, "metal", 60)]
    #[case(10.0, "unknown_material", 100)]
    fn calculates_points(
        table: PointsTable,
        #[case] kg: f64,
        #[case] material: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(calculate_points(&table, kg, material), expected);
    }

    #[rstest]
    #[case::rounds_up(0.24, "papel", 3)]
    #[case::rounds_down(0.22, "outros", 2)]
    #[case::half_rounds_away_from_zero(0.25, "outros", 3)]
    #[case::negative_half_rounds_away_from_zero(-0.25, "outros", -3)]
    #[case::zero(0.0, "metal", 0)]
    fn rounds_to_nearest(
        table: PointsTable,
        #[case] kg: f64,
        #[case] material: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(calculate_points(&table, kg, material), expected);
    }

    #[rstest]
    fn material_keys_are_case_sensitive(table: PointsTable) {
        assert_eq!(calculate_points(&table, 1.0, "Papel"), 10);
    }

    #[test]
    fn strict_points_reject_unknown_material() {
        assert_eq!(
            try_calculate_points(&Rules::builtin(), 10.0, "madeira"),
            Err(LookupError::UnknownMaterial {
                id: "madeira".to_owned()
            })
        );
    }

    #[rstest]
    #[case("aluminio", 10)]
    #[case("cobre", 10)]
    #[case("oleo", 10)]
    #[case("outros", 10)]
    #[case("papel", 12)]
    fn strict_points_accept_registered_materials(#[case] material: &str, #[case] expected: i64) {
        assert_eq!(
            points_with_policy(&Rules::builtin(), LookupPolicy::Strict, 1.0, material),
            Ok(expected)
        );
    }

    #[rstest]
    #[case(LookupPolicy::Lenient, Ok(100))]
    #[case(LookupPolicy::Strict, Err(LookupError::UnknownMaterial { id: "madeira".to_owned() }))]
    fn policy_controls_unknown_material(
        #[case] policy: LookupPolicy,
        #[case] expected: Result<i64, LookupError>,
    ) {
        assert_eq!(
            points_with_policy(&Rules::builtin(), policy, 10.0, "madeira"),
            expected
        );
    }

    #[rstest]
    fn custom_multiplier_overrides_builtin(table: PointsTable) {
        let custom = table.with_multiplier("papel", 2.0);
        assert_eq!(calculate_points(&custom, 5.0, "papel"), 100);
    }

    #[test]
    fn table_deserializes_from_camel_case() {
        let json = r#"{"basePointsPerKg": 20.0, "multipliers": {"cobre": 4.0}}"#;
        let table: PointsTable = serde_json::from_str(json).expect("deserialize");
        assert_eq!(calculate_points(&table, 1.0, "cobre"), 80);
    }
}
