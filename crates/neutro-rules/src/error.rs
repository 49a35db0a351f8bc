//! Error types for the neutro-rules crate.
//!
//! This module defines semantic error enums for key lookups and material
//! registry loading, following the project's error handling conventions with
//! `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when a lookup key is not recognised.
///
/// Lenient callers never see these; they are surfaced by the `try_*`
/// functions and by any operation running under
/// [`LookupPolicy::Strict`](crate::LookupPolicy::Strict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The material id does not name a known material.
    #[error("unknown material '{id}'")]
    UnknownMaterial {
        /// The material id that was not found.
        id: String,
    },

    /// The level id does not name a known level.
    #[error("unknown level '{id}'")]
    UnknownLevel {
        /// The level id that was not found.
        id: String,
    },

    /// The unit id does not name a known unit of measure.
    #[error("unknown unit '{id}'")]
    UnknownUnit {
        /// The unit id that was not found.
        id: String,
    },
}

/// Errors that can occur when parsing or validating a material registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A material appears more than once.
    #[error("material '{id}' is defined more than once")]
    DuplicateMaterial {
        /// The repeated material id.
        id: String,
    },

    /// A material has no entry in the registry.
    #[error("material '{id}' has no conversion factors")]
    MissingMaterial {
        /// The material id with no entry.
        id: String,
    },

    /// A conversion factor is zero, negative, or not finite.
    #[error("invalid factor for material '{id}' unit '{unit}': {value}")]
    InvalidFactor {
        /// Material whose factor is invalid.
        id: String,
        /// Unit whose factor is invalid.
        unit: String,
        /// The rejected factor.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_unknown_material_formats_correctly() {
        let err = LookupError::UnknownMaterial {
            id: "madeira".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown material 'madeira'");
    }

    #[test]
    fn lookup_error_unknown_level_formats_correctly() {
        let err = LookupError::UnknownLevel {
            id: "platinum".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown level 'platinum'");
    }

    #[test]
    fn lookup_error_unknown_unit_formats_correctly() {
        let err = LookupError::UnknownUnit {
            id: "ton".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown unit 'ton'");
    }

    #[test]
    fn registry_error_io_formats_correctly() {
        let err = RegistryError::IoError {
            path: PathBuf::from("/tmp/materials.json"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read registry file at '/tmp/materials.json': file not found"
        );
    }

    #[test]
    fn registry_error_version_formats_correctly() {
        let err = RegistryError::UnsupportedVersion {
            expected: 1,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported registry version: expected 1, found 3"
        );
    }

    #[test]
    fn registry_error_duplicate_formats_correctly() {
        let err = RegistryError::DuplicateMaterial {
            id: "vidro".to_owned(),
        };
        assert_eq!(err.to_string(), "material 'vidro' is defined more than once");
    }

    #[test]
    fn registry_error_missing_formats_correctly() {
        let err = RegistryError::MissingMaterial {
            id: "cobre".to_owned(),
        };
        assert_eq!(err.to_string(), "material 'cobre' has no conversion factors");
    }

    #[test]
    fn registry_error_invalid_factor_formats_correctly() {
        let err = RegistryError::InvalidFactor {
            id: "papel".to_owned(),
            unit: "sacos".to_owned(),
            value: -2.5,
        };
        assert_eq!(
            err.to_string(),
            "invalid factor for material 'papel' unit 'sacos': -2.5"
        );
    }
}
