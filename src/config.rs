//! Fit configuration: formatting profiles and reduction rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reduce::{default_rules, ReductionRule};
use crate::render::{default_profiles, FormatProfile};

/// Profiles to try (most spacious first) and rules to apply (least
/// destructive first).
///
/// Loadable from JSON; a missing key keeps its built-in default.
///
/// ```
/// use onepage::FitConfig;
///
/// let config = FitConfig::from_json(r#"{"rules": []}"#).unwrap();
/// assert_eq!(config.profiles.len(), 2);
/// assert!(config.rules.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Formatting profiles, tried in order
    pub profiles: Vec<FormatProfile>,

    /// Reduction rules, applied cumulatively in order
    pub rules: Vec<ReductionRule>,
}

impl FitConfig {
    /// Create the built-in configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the profile list.
    pub fn with_profiles(mut self, profiles: Vec<FormatProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<ReductionRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Check that the configuration can drive a fit run.
    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(Error::Config("at least one profile is required".to_string()));
        }
        if let Some(p) = self
            .profiles
            .iter()
            .find(|p| p.margin < 0.0 || p.body_pt <= 0.0)
        {
            return Err(Error::Config(format!(
                "profile \"{}\" has a negative margin or non-positive body size",
                p.name
            )));
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            rules: default_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.rules.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let result = FitConfig::from_json(r#"{"profiles": []}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_profile_rejected() {
        let config = FitConfig::new().with_profiles(vec![FormatProfile::standard().with_margin(-1.0)]);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_json_profiles_and_rules() {
        let config = FitConfig::from_json(
            r#"{
                "profiles": [{"name": "only", "margin": 0.4, "body_pt": 9.5}],
                "rules": [{"rule": "drop_section", "title": "Hobbies"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.profiles[0].name, "only");
        assert_eq!(config.profiles[0].name_pt, 13.0);
        assert_eq!(config.rules, vec![ReductionRule::drop_section("Hobbies")]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FitConfig::load("/no/such/onepage.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = FitConfig::new().with_rules(vec![ReductionRule::keep_projects(1)]);
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(FitConfig::load(&path).unwrap(), config);
    }
}
