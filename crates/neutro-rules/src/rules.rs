//! The bundle of immutable rule tables.

use crate::level::LevelTable;
use crate::points::PointsTable;
use crate::registry::MaterialRegistry;

/// Conversion, points, and level tables built once and shared by reference.
///
/// # Example
///
/// ```
/// use neutro_rules::Rules;
///
/// let rules = Rules::builtin();
/// assert!(!rules.registry().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rules {
    registry: MaterialRegistry,
    points: PointsTable,
    levels: LevelTable,
}

impl Rules {
    /// Bundles the supplied tables.
    #[must_use]
    pub const fn new(registry: MaterialRegistry, points: PointsTable, levels: LevelTable) -> Self {
        Self {
            registry,
            points,
            levels,
        }
    }

    /// Bundles the compiled-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            MaterialRegistry::builtin(),
            PointsTable::builtin(),
            LevelTable::builtin(),
        )
    }

    /// Returns the bundle with `registry` replacing the material registry.
    #[must_use]
    pub fn with_registry(self, registry: MaterialRegistry) -> Self {
        Self { registry, ..self }
    }

    /// Returns the material registry.
    #[must_use]
    pub const fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Returns the points table.
    #[must_use]
    pub const fn points(&self) -> &PointsTable {
        &self.points
    }

    /// Returns the level table.
    #[must_use]
    pub const fn levels(&self) -> &LevelTable {
        &self.levels
    }
}
