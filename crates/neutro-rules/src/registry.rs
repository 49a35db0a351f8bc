//! Material registry types and JSON parsing.
//!
//! The registry maps every [`MaterialType`] to exactly one
//! [`MaterialSpec`]. It is built once, either from the compiled-in table or
//! from a versioned JSON document, and then passed by reference to the
//! functions that need it.

use std::collections::BTreeMap;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LookupError, RegistryError};
use crate::fs_read;
use crate::material::{ConversionFactors, MaterialSpec, MaterialType, MeasureUnit};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Immutable registry of conversion factors keyed by material.
///
/// # Example
///
/// ```
/// use neutro_rules::{MaterialRegistry, MaterialType, MeasureUnit};
///
/// let registry = MaterialRegistry::builtin();
/// let oil = registry.find("oleo").expect("oil is registered");
///
/// assert_eq!(oil.material, MaterialType::Oil);
/// assert_eq!(oil.default_unit, MeasureUnit::Liters);
/// assert_eq!(registry.len(), MaterialType::ALL.len());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRegistry {
    specs: BTreeMap<MaterialType, MaterialSpec>,
}

impl MaterialRegistry {
    /// Returns the compiled-in registry.
    #[must_use]
    pub fn builtin() -> Self {
        let specs = builtin_specs()
            .into_iter()
            .map(|spec| (spec.material, spec))
            .collect();
        Self { specs }
    }

    /// Parses a material registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or names an unknown material or unit
    /// - The version is unsupported
    /// - A material is repeated or missing
    /// - Any factor is zero, negative, or not finite
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawMaterialRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a material registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = fs_read::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.as_std_path().to_path_buf(),
            message: e.to_string(),
        })?;

        let registry = Self::from_json(&contents)?;
        info!(path = %path, material_count = registry.len(), "material registry loaded");
        Ok(registry)
    }

    fn from_raw(raw: RawMaterialRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut specs = BTreeMap::new();
        for spec in raw.materials {
            validate_factors(&spec)?;
            let material = spec.material;
            if specs.insert(material, spec).is_some() {
                return Err(RegistryError::DuplicateMaterial {
                    id: material.id().to_owned(),
                });
            }
        }

        // Every material needs a factor set; conversions pivot through `kg`.
        if let Some(missing) = MaterialType::ALL
            .into_iter()
            .find(|material| !specs.contains_key(material))
        {
            return Err(RegistryError::MissingMaterial {
                id: missing.id().to_owned(),
            });
        }

        Ok(Self { specs })
    }

    /// Returns the entry for a material.
    ///
    /// Construction rejects registries missing a material, so this returns
    /// `Some` for every [`MaterialType`].
    #[must_use]
    pub fn spec(&self, material: MaterialType) -> Option<&MaterialSpec> {
        self.specs.get(&material)
    }

    /// Finds an entry by material id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownMaterial`] if the id names no material.
    pub fn find(&self, material_id: &str) -> Result<&MaterialSpec, LookupError> {
        let material = material_id.parse::<MaterialType>()?;
        self.spec(material).ok_or_else(|| LookupError::UnknownMaterial {
            id: material_id.to_owned(),
        })
    }

    /// Returns all entries in material order.
    pub fn specs(&self) -> impl Iterator<Item = &MaterialSpec> {
        self.specs.values()
    }

    /// Returns the number of materials in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the registry holds no materials.
    ///
    /// Registries built by this crate are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Serialises the registry to the versioned JSON document format.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ParseError`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let raw = RawMaterialRegistryRef {
            version: SUPPORTED_VERSION,
            materials: self.specs.values().collect(),
        };
        serde_json::to_string_pretty(&raw).map_err(|e| RegistryError::ParseError {
            message: e.to_string(),
        })
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_factors(spec: &MaterialSpec) -> Result<(), RegistryError> {
    for unit in MeasureUnit::ALL {
        let value = spec.factors.factor(unit);
        if !value.is_finite() || value <= 0.0 {
            return Err(RegistryError::InvalidFactor {
                id: spec.material.id().to_owned(),
                unit: unit.id().to_owned(),
                value,
            });
        }
    }
    Ok(())
}

fn builtin_specs() -> Vec<MaterialSpec> {
    use MaterialType as M;
    use MeasureUnit as U;

    let spec = |material: M, name: &str, default_unit: U, factors: ConversionFactors| {
        MaterialSpec {
            material,
            name: name.to_owned(),
            default_unit,
            factors,
        }
    };

    vec![
        spec(M::Paper, "Papel", U::Kilograms, ConversionFactors::new(1.0, 0.05, 5.0, 0.1)),
        spec(M::Plastic, "Plástico", U::Kilograms, ConversionFactors::new(1.0, 0.03, 3.0, 0.05)),
        spec(M::Glass, "Vidro", U::Kilograms, ConversionFactors::new(1.0, 0.4, 15.0, 0.8)),
        spec(M::Metal, "Metal", U::Kilograms, ConversionFactors::new(1.0, 0.5, 20.0, 1.5)),
        spec(M::Aluminum, "Alumínio", U::Kilograms, ConversionFactors::new(1.0, 0.015, 4.0, 0.3)),
        spec(M::Copper, "Cobre", U::Kilograms, ConversionFactors::new(1.0, 0.2, 25.0, 2.0)),
        // Measured in litres; factors are relative to one litre.
        spec(M::Oil, "Óleo de cozinha", U::Liters, ConversionFactors::new(1.1, 0.9, 20.0, 1.0)),
        // Measured in units; factors are relative to one item.
        spec(M::Electronics, "Eletrônicos", U::Units, ConversionFactors::new(0.5, 1.0, 10.0, 0.25)),
        spec(M::Batteries, "Pilhas e baterias", U::Units, ConversionFactors::new(40.0, 1.0, 200.0, 25.0)),
        spec(M::Lamps, "Lâmpadas", U::Units, ConversionFactors::new(5.0, 1.0, 50.0, 2.0)),
        spec(M::Organic, "Orgânico", U::Kilograms, ConversionFactors::new(1.0, 0.3, 10.0, 0.9)),
        spec(M::Other, "Outros", U::Kilograms, ConversionFactors::new(1.0, 0.5, 8.0, 0.5)),
    ]
}

/// Raw JSON representation for deserialisation.
#[derive(Debug, Deserialize)]
struct RawMaterialRegistry {
    version: u32,
    materials: Vec<MaterialSpec>,
}

/// Borrowed JSON representation for serialisation.
#[derive(Debug, Serialize)]
struct RawMaterialRegistryRef<'a> {
    version: u32,
    materials: Vec<&'a MaterialSpec>,
}
