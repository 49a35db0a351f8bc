//! Material and unit-of-measure types.
//!
//! Materials and units are closed sets identified on the wire by the short
//! Portuguese ids the marketplace uses (`papel`, `sacos`, ...). Conversion
//! factors are stored per material without assuming a universal meaning:
//! for materials whose default unit is not `kg` the factors are expressed
//! relative to that default unit instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A category of recyclable material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    /// Paper and cardboard.
    #[serde(rename = "papel")]
    Paper,
    /// Plastics.
    #[serde(rename = "plastico")]
    Plastic,
    /// Glass.
    #[serde(rename = "vidro")]
    Glass,
    /// Mixed ferrous metal.
    #[serde(rename = "metal")]
    Metal,
    /// Aluminium cans and scrap.
    #[serde(rename = "aluminio")]
    Aluminum,
    /// Copper wire and scrap.
    #[serde(rename = "cobre")]
    Copper,
    /// Used cooking oil.
    #[serde(rename = "oleo")]
    Oil,
    /// Electronic waste.
    #[serde(rename = "eletronico")]
    Electronics,
    /// Batteries.
    #[serde(rename = "pilhas")]
    Batteries,
    /// Lamps and bulbs.
    #[serde(rename = "lampadas")]
    Lamps,
    /// Compostable organic waste.
    #[serde(rename = "organico")]
    Organic,
    /// Anything else.
    #[serde(rename = "outros")]
    Other,
}

impl MaterialType {
    /// Every material, in registry order.
    pub const ALL: [Self; 12] = [
        Self::Paper,
        Self::Plastic,
        Self::Glass,
        Self::Metal,
        Self::Aluminum,
        Self::Copper,
        Self::Oil,
        Self::Electronics,
        Self::Batteries,
        Self::Lamps,
        Self::Organic,
        Self::Other,
    ];

    /// Returns the wire id of the material.
    ///
    /// # Example
    ///
    /// ```
    /// use neutro_rules::MaterialType;
    ///
    /// assert_eq!(MaterialType::Electronics.id(), "eletronico");
    /// ```
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Paper => "papel",
            Self::Plastic => "plastico",
            Self::Glass => "vidro",
            Self::Metal => "metal",
            Self::Aluminum => "aluminio",
            Self::Copper => "cobre",
            Self::Oil => "oleo",
            Self::Electronics => "eletronico",
            Self::Batteries => "pilhas",
            Self::Lamps => "lampadas",
            Self::Organic => "organico",
            Self::Other => "outros",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MaterialType {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|material| material.id() == s)
            .ok_or_else(|| LookupError::UnknownMaterial { id: s.to_owned() })
    }
}

/// A unit of measure a quantity of material can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureUnit {
    /// Kilograms; the pivot unit for conversions.
    #[serde(rename = "kg")]
    Kilograms,
    /// Individual units (items).
    #[serde(rename = "un")]
    Units,
    /// Bags.
    #[serde(rename = "sacos")]
    Bags,
    /// Litres.
    #[serde(rename = "L")]
    Liters,
}

impl MeasureUnit {
    /// Every unit of measure.
    pub const ALL: [Self; 4] = [Self::Kilograms, Self::Units, Self::Bags, Self::Liters];

    /// Returns the wire id of the unit.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Units => "un",
            Self::Bags => "sacos",
            Self::Liters => "L",
        }
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MeasureUnit {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.id() == s)
            .ok_or_else(|| LookupError::UnknownUnit { id: s.to_owned() })
    }
}

/// Conversion factors for one material, one per [`MeasureUnit`].
///
/// For most materials a factor reads "one of this unit equals N kilograms".
/// Materials measured by default in litres or units (oil, electronics,
/// batteries, lamps) store factors relative to that default unit, so the
/// `kg` factor is not always `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactors {
    /// Factor for kilograms.
    pub kg: f64,
    /// Factor for units.
    pub un: f64,
    /// Factor for bags.
    pub sacos: f64,
    /// Factor for litres.
    #[serde(rename = "L")]
    pub liters: f64,
}

impl ConversionFactors {
    /// Creates a factor set.
    #[must_use]
    pub const fn new(kg: f64, un: f64, sacos: f64, liters: f64) -> Self {
        Self {
            kg,
            un,
            sacos,
            liters,
        }
    }

    /// Returns the factor for `unit`.
    #[must_use]
    pub const fn factor(&self, unit: MeasureUnit) -> f64 {
        match unit {
            MeasureUnit::Kilograms => self.kg,
            MeasureUnit::Units => self.un,
            MeasureUnit::Bags => self.sacos,
            MeasureUnit::Liters => self.liters,
        }
    }
}

/// Registry entry describing one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSpec {
    /// The material this entry describes.
    #[serde(rename = "id")]
    pub material: MaterialType,
    /// Human-readable label.
    pub name: String,
    /// Unit the marketplace displays quantities in by default.
    pub default_unit: MeasureUnit,
    /// Conversion factors for the material.
    pub factors: ConversionFactors,
}
