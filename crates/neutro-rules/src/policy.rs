//! Handling of unrecognised lookup keys.
//!
//! Marketplace screens historically treated unknown materials and levels as
//! "use the default and carry on". [`LookupPolicy::Lenient`] keeps that
//! behaviour; [`LookupPolicy::Strict`] turns the same situations into
//! [`LookupError`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LookupError;

/// How unknown material or level keys are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Substitute a default value or a no-op result.
    #[default]
    Lenient,
    /// Surface the unknown key as an error.
    Strict,
}

impl LookupPolicy {
    /// Selects [`Self::Strict`] when `strict` is set.
    ///
    /// # Example
    ///
    /// ```
    /// use neutro_rules::LookupPolicy;
    ///
    /// assert_eq!(LookupPolicy::from_strict(false), LookupPolicy::Lenient);
    /// assert_eq!(LookupPolicy::from_strict(true), LookupPolicy::Strict);
    /// ```
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    /// Applies the policy to a lookup result.
    ///
    /// Lenient policies replace an error with `fallback()`; strict policies
    /// return the error unchanged.
    pub(crate) fn recover<T, F>(self, result: Result<T, LookupError>, fallback: F) -> Result<T, LookupError>
    where
        F: FnOnce() -> T,
    {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (Self::Strict, Err(err)) => Err(err),
            (Self::Lenient, Err(err)) => {
                debug!(error = %err, "unknown key; using fallback");
                Ok(fallback())
            }
        }
    }
}
