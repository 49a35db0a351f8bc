//! User levels, thresholds, and benefits.
//!
//! Levels form a one-way ladder: bronze, silver, gold. A level check moves
//! at most one rung per call and never moves down; gold is terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::policy::LookupPolicy;

/// A gamification tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    /// Entry level.
    #[default]
    Bronze,
    /// Middle level.
    Silver,
    /// Top level.
    Gold,
}

impl UserLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 3] = [Self::Bronze, Self::Silver, Self::Gold];

    /// Returns the wire id of the level.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Returns the level above this one, or `None` for gold.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => None,
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UserLevel {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.id() == s)
            .ok_or_else(|| LookupError::UnknownLevel { id: s.to_owned() })
    }
}

/// Perks granted to users at a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBenefits {
    /// Discount applied to partner coupons, in percent.
    pub coupon_discount_percent: u8,
    /// Coupons that can be redeemed per month.
    pub monthly_coupon_limit: u32,
    /// Whether collection requests are scheduled first.
    pub priority_collection: bool,
}

/// Entry threshold and benefits for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTier {
    /// Minimum accumulated points for the level.
    pub min_points: i64,
    /// Benefits unlocked at the level.
    pub benefits: LevelBenefits,
}

/// Thresholds and benefits for every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    bronze: LevelTier,
    silver: LevelTier,
    gold: LevelTier,
}

impl LevelTable {
    /// Returns the compiled-in level table.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            bronze: LevelTier {
                min_points: 0,
                benefits: LevelBenefits {
                    coupon_discount_percent: 5,
                    monthly_coupon_limit: 2,
                    priority_collection: false,
                },
            },
            silver: LevelTier {
                min_points: 1_000,
                benefits: LevelBenefits {
                    coupon_discount_percent: 10,
                    monthly_coupon_limit: 5,
                    priority_collection: false,
                },
            },
            gold: LevelTier {
                min_points: 5_000,
                benefits: LevelBenefits {
                    coupon_discount_percent: 15,
                    monthly_coupon_limit: 10,
                    priority_collection: true,
                },
            },
        }
    }

    /// Returns the tier for `level`.
    #[must_use]
    pub const fn tier(&self, level: UserLevel) -> &LevelTier {
        match level {
            UserLevel::Bronze => &self.bronze,
            UserLevel::Silver => &self.silver,
            UserLevel::Gold => &self.gold,
        }
    }

    /// Returns the minimum points for `level`.
    #[must_use]
    pub const fn threshold(&self, level: UserLevel) -> i64 {
        self.tier(level).min_points
    }

    /// Returns the benefits granted at `level`.
    #[must_use]
    pub const fn benefits(&self, level: UserLevel) -> &LevelBenefits {
        &self.tier(level).benefits
    }

    /// Returns the highest level whose threshold `points` meets.
    ///
    /// Points below every threshold map to bronze.
    ///
    /// # Example
    ///
    /// ```
    /// use neutro_rules::{LevelTable, UserLevel};
    ///
    /// let table = LevelTable::builtin();
    /// assert_eq!(table.level_for_points(999), UserLevel::Bronze);
    /// assert_eq!(table.level_for_points(7_500), UserLevel::Gold);
    /// ```
    #[must_use]
    pub fn level_for_points(&self, points: i64) -> UserLevel {
        UserLevel::ALL
            .into_iter()
            .rev()
            .find(|level| points >= self.threshold(*level))
            .unwrap_or(UserLevel::Bronze)
    }

    /// Reports how far `points` are from the level above `level`.
    #[must_use]
    pub fn progress(&self, points: i64, level: UserLevel) -> LevelProgress {
        let Some(next_level) = level.next() else {
            return LevelProgress {
                level,
                next_level: None,
                points_to_next: None,
                percent: 100,
            };
        };

        let floor = self.threshold(level);
        let ceiling = self.threshold(next_level);
        let band = ceiling.saturating_sub(floor);
        let earned = points.saturating_sub(floor).clamp(0, band.max(0));
        let percent = earned
            .saturating_mul(100)
            .checked_div(band)
            .and_then(|value| u8::try_from(value).ok())
            .unwrap_or(100);

        LevelProgress {
            level,
            next_level: Some(next_level),
            points_to_next: Some(ceiling.saturating_sub(points).max(0)),
            percent,
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Position of a user within their current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// The level the progress is measured from.
    pub level: UserLevel,
    /// The next level, or `None` at gold.
    pub next_level: Option<UserLevel>,
    /// Points still needed for the next level.
    pub points_to_next: Option<i64>,
    /// Completion of the current band, 0 to 100.
    pub percent: u8,
}

/// Outcome of a level check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpgrade {
    /// Whether the user moves up a level.
    pub should_upgrade: bool,
    /// The level after the check.
    pub new_level: UserLevel,
}

/// Decides whether `current_points` lift a user above `current_level`.
///
/// # Example
///
/// ```
/// use neutro_rules::{LevelTable, UserLevel, check_level_upgrade};
///
/// let table = LevelTable::builtin();
/// let upgrade = check_level_upgrade(&table, 1_000, UserLevel::Bronze);
///
/// assert!(upgrade.should_upgrade);
/// assert_eq!(upgrade.new_level, UserLevel::Silver);
/// ```
#[must_use]
pub fn check_level_upgrade(table: &LevelTable, current_points: i64, current_level: UserLevel) -> LevelUpgrade {
    match current_level.next() {
        Some(next) if current_points >= table.threshold(next) => LevelUpgrade {
            should_upgrade: true,
            new_level: next,
        },
        _ => LevelUpgrade {
            should_upgrade: false,
            new_level: current_level,
        },
    }
}

/// Outcome of a level check on a raw level id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDecision {
    /// Whether the user moves up a level.
    pub should_upgrade: bool,
    /// The level id after the check.
    pub new_level: String,
}

impl From<LevelUpgrade> for LevelDecision {
    fn from(upgrade: LevelUpgrade) -> Self {
        Self {
            should_upgrade: upgrade.should_upgrade,
            new_level: upgrade.new_level.id().to_owned(),
        }
    }
}

/// Runs [`check_level_upgrade`] on a raw level id.
///
/// Under [`LookupPolicy::Lenient`] an unknown id is a no-op that echoes the
/// id back.
///
/// # Errors
///
/// Returns [`LookupError::UnknownLevel`] for unknown ids under
/// [`LookupPolicy::Strict`].
pub fn check_level_upgrade_id(
    table: &LevelTable,
    policy: LookupPolicy,
    current_points: i64,
    level_id: &str,
) -> Result<LevelDecision, LookupError> {
    let decision = level_id
        .parse::<UserLevel>()
        .map(|level| LevelDecision::from(check_level_upgrade(table, current_points, level)));
    policy.recover(decision, || LevelDecision {
        should_upgrade: false,
        new_level: level_id.to_owned(),
    })
}
