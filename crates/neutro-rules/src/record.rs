//! Point balances and the award flow.
//!
//! A [`PointsRecord`] belongs to whoever stores user progress. Awarding
//! points never mutates a record in place; it returns the next record
//! alongside what changed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LookupError;
use crate::level::{UserLevel, check_level_upgrade};
use crate::points::points_with_policy;
use crate::policy::LookupPolicy;
use crate::rules::Rules;

/// A user's accumulated points and current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRecord {
    /// Accumulated points.
    pub points: i64,
    /// Current level.
    pub level: UserLevel,
}

/// Result of awarding points for one recycling drop-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    /// Points earned by the drop-off.
    pub earned: i64,
    /// The record after the award.
    pub record: PointsRecord,
    /// Whether the level changed.
    pub upgraded: bool,
}

impl PointsRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(points: i64, level: UserLevel) -> Self {
        Self { points, level }
    }

    /// Adds the points for `kg_recycled` of `material_type` and re-evaluates
    /// the level once.
    ///
    /// Point totals saturate at the `i64` bounds.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownMaterial`] for materials missing from
    /// the registry under [`LookupPolicy::Strict`].
    ///
    /// # Example
    ///
    /// ```
    /// use neutro_rules::{LookupPolicy, PointsRecord, Rules, UserLevel};
    ///
    /// let rules = Rules::builtin();
    /// let record = PointsRecord::new(950, UserLevel::Bronze);
    /// let award = record
    ///     .award(&rules, 5.0, "papel", LookupPolicy::Lenient)
    ///     .expect("lenient awards never fail");
    ///
    /// assert_eq!(award.earned, 60);
    /// assert_eq!(award.record, PointsRecord::new(1_010, UserLevel::Silver));
    /// assert!(award.upgraded);
    /// ```
    pub fn award(
        &self,
        rules: &Rules,
        kg_recycled: f64,
        material_type: &str,
        policy: LookupPolicy,
    ) -> Result<Award, LookupError> {
        let earned = points_with_policy(rules, policy, kg_recycled, material_type)?;
        let points = self.points.saturating_add(earned);
        let upgrade = check_level_upgrade(rules.levels(), points, self.level);

        if upgrade.should_upgrade {
            info!(
                from = %self.level,
                to = %upgrade.new_level,
                points,
                "level upgraded"
            );
        }

        Ok(Award {
            earned,
            record: Self::new(points, upgrade.new_level),
            upgraded: upgrade.should_upgrade,
        })
    }
}
