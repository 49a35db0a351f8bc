//! Runtime settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::policy::LookupPolicy;

/// Settings controlling how the rules binary loads and applies its tables.
///
/// Values come from `NEUTRO_*` environment variables or a configuration
/// file; command-line flags are left to the command parser.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NEUTRO")]
pub struct RulesSettings {
    /// Reject unknown materials and levels instead of falling back.
    #[ortho_config(default = false)]
    pub strict_lookups: bool,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
    /// Optional material registry file replacing the builtin table.
    pub registry_path: Option<PathBuf>,
}

impl RulesSettings {
    /// Returns the lookup policy selected by the settings.
    #[must_use]
    pub const fn lookup_policy(&self) -> LookupPolicy {
        LookupPolicy::from_strict(self.strict_lookups)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> RulesSettings {
        RulesSettings::load_from_iter([OsString::from("neutro-rules")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("NEUTRO_STRICT_LOOKUPS", None::<String>),
            ("NEUTRO_JSON_LOGS", None::<String>),
            ("NEUTRO_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.strict_lookups);
        assert!(!settings.json_logs);
        assert!(settings.registry_path.is_none());
        assert_eq!(settings.lookup_policy(), LookupPolicy::Lenient);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("NEUTRO_STRICT_LOOKUPS", Some("true".to_owned())),
            ("NEUTRO_JSON_LOGS", Some("true".to_owned())),
            (
                "NEUTRO_REGISTRY_PATH",
                Some("/tmp/neutro_materials.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.json_logs);
        assert_eq!(settings.lookup_policy(), LookupPolicy::Strict);
        assert_eq!(
            settings.registry_path,
            Some(PathBuf::from("/tmp/neutro_materials.json"))
        );
    }
}
