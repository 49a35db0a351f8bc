//! Aggregated recycling totals.
//!
//! A summary converts each recycled quantity to kilograms, scores it, and
//! accumulates totals per material id.

#![expect(
    clippy::float_arithmetic,
    reason = "kilogram totals are sums of fractional quantities"
)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::conversion::convert_with_policy;
use crate::error::LookupError;
use crate::material::MeasureUnit;
use crate::points::calculate_points;
use crate::policy::LookupPolicy;
use crate::rules::Rules;

/// One recycled quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclingEntry {
    /// Material id, as accepted by the registry and points table.
    pub material: String,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Unit the quantity is expressed in.
    pub unit: MeasureUnit,
}

/// Totals for one material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTotals {
    /// Kilograms recycled.
    pub kg: f64,
    /// Points earned.
    pub points: i64,
    /// Number of entries folded into the totals.
    pub entries: usize,
}

/// Totals across a batch of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingSummary {
    /// Kilograms recycled across all materials.
    pub total_kg: f64,
    /// Points earned across all materials.
    pub total_points: i64,
    /// Totals keyed by material id.
    pub materials: BTreeMap<String, MaterialTotals>,
}

/// Summarises `entries` under `policy`.
///
/// Material ids are checked against the registry only; registered
/// materials without a points multiplier earn the default multiplier. Under
/// [`LookupPolicy::Lenient`], unknown materials keep their quantity as the
/// kilogram value.
///
/// # Errors
///
/// Returns [`LookupError::UnknownMaterial`] for the first unknown material
/// under [`LookupPolicy::Strict`].
///
/// # Example
///
/// ```
/// use neutro_rules::{LookupPolicy, MeasureUnit, RecyclingEntry, Rules, summarize};
///
/// let entries = vec![RecyclingEntry {
///     material: "papel".to_owned(),
///     quantity: 2.0,
///     unit: MeasureUnit::Bags,
/// }];
/// let summary = summarize(&Rules::builtin(), &entries, LookupPolicy::Strict).expect("summary");
///
/// assert!((summary.total_kg - 10.0).abs() < 1e-9);
/// assert_eq!(summary.total_points, 120);
/// ```
pub fn summarize(
    rules: &Rules,
    entries: &[RecyclingEntry],
    policy: LookupPolicy,
) -> Result<RecyclingSummary, LookupError> {
    entries
        .iter()
        .try_fold(RecyclingSummary::default(), |mut summary, entry| {
            let kg = convert_with_policy(
                rules.registry(),
                policy,
                &entry.material,
                entry.quantity,
                entry.unit,
                MeasureUnit::Kilograms,
            )?;
            let points = calculate_points(rules.points(), kg, &entry.material);

            let totals = summary.materials.entry(entry.material.clone()).or_default();
            totals.kg += kg;
            totals.points = totals.points.saturating_add(points);
            totals.entries += 1;

            summary.total_kg += kg;
            summary.total_points = summary.total_points.saturating_add(points);
            Ok(summary)
        })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[fixture]
    fn rules() -> Rules {
        Rules::builtin()
    }

    fn entry(material: &str, quantity: f64, unit: MeasureUnit) -> RecyclingEntry {
        RecyclingEntry {
            material: material.to_owned(),
            quantity,
            unit,
        }
    }

    #[rstest]
    fn empty_batch_has_zero_totals(rules: Rules) {
        let summary = summarize(&rules, &[], LookupPolicy::Strict).expect("summary");
        assert_eq!(summary, RecyclingSummary::default());
    }

    #[rstest]
    fn groups_entries_by_material(rules: Rules) {
        let entries = vec![
            entry("papel", 5.0, MeasureUnit::Kilograms),
            entry("papel", 1.0, MeasureUnit::Bags),
            entry("plastico", 10.0, MeasureUnit::Kilograms),
        ];

        let summary = summarize(&rules, &entries, LookupPolicy::Strict).expect("summary");

        let paper = summary.materials.get("papel").expect("paper totals");
        assert!((paper.kg - 10.0).abs() < TOLERANCE);
        assert_eq!(paper.points, 120);
        assert_eq!(paper.entries, 2);
        assert_eq!(summary.materials.len(), 2);
        assert_eq!(summary.total_points, 270);
        assert!((summary.total_kg - 20.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn totals_match_material_rows(rules: Rules) {
        let entries = vec![
            entry("vidro", 3.0, MeasureUnit::Units),
            entry("oleo", 5.5, MeasureUnit::Liters),
            entry("aluminio", 120.0, MeasureUnit::Units),
            entry("metal", 1.0, MeasureUnit::Bags),
        ];

        let summary = summarize(&rules, &entries, LookupPolicy::Strict).expect("summary");

        let row_points: i64 = summary.materials.values().map(|row| row.points).sum();
        let row_kg: f64 = summary.materials.values().map(|row| row.kg).sum();
        assert_eq!(summary.total_points, row_points);
        assert!((summary.total_kg - row_kg).abs() < TOLERANCE);
    }

    #[rstest]
    fn lenient_summary_keeps_unknown_materials(rules: Rules) {
        let entries = vec![entry("madeira", 4.0, MeasureUnit::Bags)];

        let summary = summarize(&rules, &entries, LookupPolicy::Lenient).expect("summary");

        let wood = summary.materials.get("madeira").expect("wood totals");
        assert!((wood.kg - 4.0).abs() < TOLERANCE);
        assert_eq!(wood.points, 40);
    }

    #[rstest]
    fn strict_summary_rejects_unknown_materials(rules: Rules) {
        let entries = vec![
            entry("papel", 1.0, MeasureUnit::Kilograms),
            entry("madeira", 4.0, MeasureUnit::Bags),
        ];

        assert_eq!(
            summarize(&rules, &entries, LookupPolicy::Strict),
            Err(LookupError::UnknownMaterial {
                id: "madeira".to_owned()
            })
        );
    }

    #[test]
    fn entries_deserialize_with_unit_ids() {
        let parsed: Vec<RecyclingEntry> =
            serde_json::from_str(r#"[{"material": "oleo", "quantity": 2, "unit": "L"}]"#)
                .expect("deserialize");
        assert_eq!(parsed, vec![entry("oleo", 2.0, MeasureUnit::Liters)]);
    }
}
