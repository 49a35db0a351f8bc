//! Unit conversion through a kilogram pivot.
//!
//! A quantity is multiplied by the source unit's factor and divided by the
//! target unit's factor for the same material. No rounding is applied;
//! display formatting belongs to the caller.

#![expect(
    clippy::float_arithmetic,
    reason = "conversions are defined in IEEE-754 double precision"
)]

use crate::error::LookupError;
use crate::material::{ConversionFactors, MeasureUnit};
use crate::policy::LookupPolicy;
use crate::registry::MaterialRegistry;

/// Converts `quantity` of a material between two units.
///
/// Unknown material ids return `quantity` unchanged. Quantities are not
/// validated, so zero and negative values pass straight through the
/// arithmetic.
///
/// # Example
///
/// ```
/// use neutro_rules::{MaterialRegistry, MeasureUnit, convert_unit};
///
/// let registry = MaterialRegistry::builtin();
/// let bags = convert_unit(&registry, "papel", 10.0, MeasureUnit::Kilograms, MeasureUnit::Bags);
/// assert!((bags - 2.0).abs() < 1e-9);
///
/// let untouched = convert_unit(&registry, "madeira", 10.0, MeasureUnit::Kilograms, MeasureUnit::Bags);
/// assert!((untouched - 10.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn convert_unit(
    registry: &MaterialRegistry,
    material_id: &str,
    quantity: f64,
    source: MeasureUnit,
    target: MeasureUnit,
) -> f64 {
    registry
        .find(material_id)
        .map_or(quantity, |spec| pivot(&spec.factors, quantity, source, target))
}

/// Converts `quantity` of a material between two units, rejecting unknown
/// material ids.
///
/// # Errors
///
/// Returns [`LookupError::UnknownMaterial`] if `material_id` is not in the
/// registry.
pub fn try_convert_unit(
    registry: &MaterialRegistry,
    material_id: &str,
    quantity: f64,
    source: MeasureUnit,
    target: MeasureUnit,
) -> Result<f64, LookupError> {
    let spec = registry.find(material_id)?;
    Ok(pivot(&spec.factors, quantity, source, target))
}

/// Converts under an explicit [`LookupPolicy`].
///
/// # Errors
///
/// Returns [`LookupError::UnknownMaterial`] only under
/// [`LookupPolicy::Strict`].
pub fn convert_with_policy(
    registry: &MaterialRegistry,
    policy: LookupPolicy,
    material_id: &str,
    quantity: f64,
    source: MeasureUnit,
    target: MeasureUnit,
) -> Result<f64, LookupError> {
    policy.recover(
        try_convert_unit(registry, material_id, quantity, source, target),
        || quantity,
    )
}

fn pivot(factors: &ConversionFactors, quantity: f64, source: MeasureUnit, target: MeasureUnit) -> f64 {
    let in_kg = quantity * factors.factor(source);
    in_kg / factors.factor(target)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::material::MaterialType;

    const TOLERANCE: f64 = 1e-9;

    #[fixture]
    fn registry() -> MaterialRegistry {
        MaterialRegistry::builtin()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case::paper_kg_to_bags("papel", 10.0, MeasureUnit::Kilograms, MeasureUnit::Bags, 2.0)]
    #[case::paper_bags_to_kg("papel", 3.0, MeasureUnit::Bags, MeasureUnit::Kilograms, 15.0)]
    #[case::aluminium_cans_to_kg("aluminio", 200.0, MeasureUnit::Units, MeasureUnit::Kilograms, 3.0)]
    #[case::glass_litres_to_units("vidro", 2.0, MeasureUnit::Liters, MeasureUnit::Units, 4.0)]
    #[case::oil_litres_to_kg("oleo", 11.0, MeasureUnit::Liters, MeasureUnit::Kilograms, 10.0)]
    #[case::batteries_units_to_kg("pilhas", 80.0, MeasureUnit::Units, MeasureUnit::Kilograms, 2.0)]
    fn converts_between_units(
        registry: MaterialRegistry,
        #[case] material: &str,
        #[case] quantity: f64,
        #[case] source: MeasureUnit,
        #[case] target: MeasureUnit,
        #[case] expected: f64,
    ) {
        assert_close(convert_unit(&registry, material, quantity, source, target), expected);
    }

    #[rstest]
    fn identity_conversion_returns_quantity(registry: MaterialRegistry) {
        for material in MaterialType::ALL {
            for unit in MeasureUnit::ALL {
                for quantity in [0.0, 1.0, 12.5, 1_000.0] {
                    assert_close(convert_unit(&registry, material.id(), quantity, unit, unit), quantity);
                }
            }
        }
    }

    #[rstest]
    fn round_trip_returns_original_quantity(registry: MaterialRegistry) {
        for material in MaterialType::ALL {
            for source in MeasureUnit::ALL {
                for target in MeasureUnit::ALL {
                    let there = convert_unit(&registry, material.id(), 42.0, source, target);
                    let back = convert_unit(&registry, material.id(), there, target, source);
                    assert_close(back, 42.0);
                }
            }
        }
    }

    #[rstest]
    fn negative_and_zero_quantities_are_not_validated(registry: MaterialRegistry) {
        assert_close(convert_unit(&registry, "papel", -10.0, MeasureUnit::Kilograms, MeasureUnit::Bags), -2.0);
        assert_close(convert_unit(&registry, "papel", 0.0, MeasureUnit::Bags, MeasureUnit::Units), 0.0);
    }

    #[rstest]
    fn unknown_material_returns_quantity_unchanged(registry: MaterialRegistry) {
        assert_close(
            convert_unit(&registry, "madeira", 7.5, MeasureUnit::Bags, MeasureUnit::Liters),
            7.5,
        );
    }

    #[rstest]
    fn strict_conversion_rejects_unknown_material(registry: MaterialRegistry) {
        let result = try_convert_unit(&registry, "madeira", 7.5, MeasureUnit::Bags, MeasureUnit::Liters);
        assert_eq!(
            result,
            Err(LookupError::UnknownMaterial {
                id: "madeira".to_owned()
            })
        );
    }

    #[rstest]
    #[case(LookupPolicy::Lenient, Ok(7.5))]
    #[case(LookupPolicy::Strict, Err(LookupError::UnknownMaterial { id: "madeira".to_owned() }))]
    fn policy_controls_unknown_material(
        registry: MaterialRegistry,
        #[case] policy: LookupPolicy,
        #[case] expected: Result<f64, LookupError>,
    ) {
        let result = convert_with_policy(
            &registry,
            policy,
            "madeira",
            7.5,
            MeasureUnit::Bags,
            MeasureUnit::Liters,
        );
        assert_eq!(result, expected);
    }
}
