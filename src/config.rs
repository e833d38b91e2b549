//! YAML configuration for `geoslim simplify`.
//!
//! Every field is optional; a missing file section takes its default.
//!
//! ```yaml
//! tolerances:
//!   Polygon: 0.001
//!   MultiPolygon: 0.001
//! property_rule:
//!   source: ZIP_CODE
//!   target: ZCTA5CE10
//!   keep: [ZCTA5CE10, PO_NAME, STATE]
//! drop_members: [crs, name]
//! output: compact
//! ```
//!
//! A `tolerances` section replaces the default table as a whole, so kinds
//! it does not list are not simplified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::GeoslimError;
use crate::model::{GeometryKind, OutputStyle};
use crate::rewrite::{PropertyRule, RewriteOptions, Tolerances, DEFAULT_TOLERANCE};

/// Members removed from the collection unless configured otherwise.
pub const DEFAULT_DROP_MEMBERS: [&str; 2] = ["crs", "name"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tolerance per geometry type name.
    pub tolerances: BTreeMap<String, f64>,
    pub property_rule: Option<PropertyRule>,
    /// Top-level collection members to remove before writing.
    pub drop_members: Vec<String>,
    pub output: OutputStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerances: [GeometryKind::Polygon, GeometryKind::MultiPolygon]
                .iter()
                .map(|kind| (kind.name().to_string(), DEFAULT_TOLERANCE))
                .collect(),
            property_rule: None,
            drop_members: DEFAULT_DROP_MEMBERS.iter().map(|m| m.to_string()).collect(),
            output: OutputStyle::default(),
        }
    }
}

impl Config {
    /// Loads a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: &Path) -> Result<Self, GeoslimError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self =
            serde_yaml::from_str(&text).map_err(|source| GeoslimError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GeoslimError> {
        serde_yaml::from_str(yaml).map_err(|source| GeoslimError::ConfigParse {
            path: "<string>".into(),
            source,
        })
    }

    /// Validated rewrite options.
    ///
    /// # Errors
    /// Fails on a tolerance that is not finite and positive, on a tolerance
    /// for a kind that cannot be simplified, and on an invalid property rule.
    pub fn rewrite_options(&self) -> Result<RewriteOptions, GeoslimError> {
        let mut tolerances = Tolerances::new();
        for (name, value) in &self.tolerances {
            tolerances.set(GeometryKind::from_name(name), *value)?;
        }

        let options = RewriteOptions {
            tolerances,
            property_rule: self.property_rule.clone(),
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::Tolerance;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.drop_members, vec!["crs", "name"]);
        assert_eq!(config.output, OutputStyle::Compact);

        let options = config.rewrite_options().unwrap();
        assert_eq!(options, RewriteOptions::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
tolerances:
  Polygon: 0.01
  LineString: 0.5
property_rule:
  source: ZIP_CODE
  target: ZCTA5CE10
  keep: [ZCTA5CE10, PO_NAME, STATE]
drop_members: [crs]
output: pretty
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.output, OutputStyle::Pretty);
        assert_eq!(config.drop_members, vec!["crs"]);

        let options = config.rewrite_options().unwrap();
        assert_eq!(
            options.tolerances.get(&GeometryKind::Polygon).map(Tolerance::get),
            Some(0.01)
        );
        assert_eq!(options.tolerances.get(&GeometryKind::MultiPolygon), None);
        let rule = options.property_rule.unwrap();
        assert_eq!(rule.target_key, "ZCTA5CE10");
        assert!(rule.allow.contains("PO_NAME"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml_str("tolerance: 0.1").unwrap_err();
        assert!(matches!(err, GeoslimError::ConfigParse { .. }));

        let err = Config::from_yaml_str("property_rule: {source: a, target: b, extra: 1}")
            .unwrap_err();
        assert!(matches!(err, GeoslimError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_tolerance() {
        let config = Config::from_yaml_str("tolerances: {Polygon: 0}").unwrap();
        let err = config.rewrite_options().unwrap_err();
        assert!(matches!(
            err,
            GeoslimError::InvalidTolerance { ref kind, value } if kind == "Polygon" && value == 0.0
        ));

        let config = Config::from_yaml_str("tolerances: {Point: 1.0}").unwrap();
        assert!(matches!(
            config.rewrite_options(),
            Err(GeoslimError::UnsupportedToleranceKind(_))
        ));
    }

    #[test]
    fn test_invalid_rule() {
        let config =
            Config::from_yaml_str("property_rule: {source: ZIP_CODE, target: ''}").unwrap();
        assert!(matches!(
            config.rewrite_options(),
            Err(GeoslimError::InvalidPropertyRule(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geoslim.yaml");
        std::fs::write(&path, "output: pretty\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().output, OutputStyle::Pretty);

        std::fs::write(&path, "output: [nope\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("geoslim.yaml"));
    }
}
