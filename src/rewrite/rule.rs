//! Property rename and allow-list rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GeoslimError;
use crate::model::Properties;

/// Copies one property to a new key and then trims the map to an allow-list.
///
/// The rule only fires when the source key is present. A feature without
/// it keeps its properties exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyRule {
    /// Key whose value is copied.
    #[serde(rename = "source")]
    pub source_key: String,

    /// Key the value is copied to. Always retained.
    #[serde(rename = "target")]
    pub target_key: String,

    /// Keys retained after the copy, in addition to the target key.
    #[serde(rename = "keep", default)]
    pub allow: BTreeSet<String>,
}

impl PropertyRule {
    /// Creates a rule.
    pub fn new<I, S>(source_key: impl Into<String>, target_key: impl Into<String>, allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_key: source_key.into(),
            target_key: target_key.into(),
            allow: allow.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks that both keys are non-empty.
    pub fn validate(&self) -> Result<(), GeoslimError> {
        if self.source_key.is_empty() {
            return Err(GeoslimError::InvalidPropertyRule(
                "source key must not be empty".to_string(),
            ));
        }
        if self.target_key.is_empty() {
            return Err(GeoslimError::InvalidPropertyRule(
                "target key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies the rule. Returns true if the source key was present.
    pub fn apply(&self, properties: &mut Properties) -> bool {
        let Some(value) = properties.get(&self.source_key).cloned() else {
            return false;
        };

        properties.insert(self.target_key.clone(), value);
        properties.retain(|key, _| key == self.target_key || self.allow.contains(key));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zip_rule() -> PropertyRule {
        PropertyRule::new("ZIP_CODE", "ZCTA5CE10", ["ZCTA5CE10", "PO_NAME", "STATE"])
    }

    #[test]
    fn test_rename_and_trim() {
        let mut props = Properties::from(vec![("ZIP_CODE", "90210"), ("EXTRA", "x")]);
        assert!(zip_rule().apply(&mut props));
        assert_eq!(props, Properties::from(vec![("ZCTA5CE10", "90210")]));
    }

    #[test]
    fn test_keeps_allowed_keys() {
        let mut props = Properties::from(vec![
            ("ZIP_CODE", json!("90210")),
            ("PO_NAME", json!("Beverly Hills")),
            ("STATE", json!("CA")),
            ("SHAPE_AREA", json!(1234.5)),
        ]);
        zip_rule().apply(&mut props);
        assert_eq!(
            props.keys().collect::<Vec<_>>(),
            vec!["PO_NAME", "STATE", "ZCTA5CE10"]
        );
    }

    #[test]
    fn test_missing_source_is_a_no_op() {
        let original = Properties::from(vec![("PO_NAME", "Beverly Hills"), ("EXTRA", "x")]);
        let mut props = original.clone();
        assert!(!zip_rule().apply(&mut props));
        assert_eq!(props, original);
    }

    #[test]
    fn test_source_kept_only_if_allowed() {
        let rule = PropertyRule::new("zip", "zcta", ["zip"]);
        let mut props = Properties::from(vec![("zip", json!(90210))]);
        rule.apply(&mut props);
        assert_eq!(props.get("zip"), Some(&json!(90210)));
        assert_eq!(props.get("zcta"), Some(&json!(90210)));
    }

    #[test]
    fn test_null_value_is_copied() {
        let mut props = Properties::from(vec![("ZIP_CODE", json!(null))]);
        assert!(zip_rule().apply(&mut props));
        assert_eq!(props.get("ZCTA5CE10"), Some(&json!(null)));
    }

    #[test]
    fn test_validate() {
        assert!(zip_rule().validate().is_ok());
        assert!(PropertyRule::new("", "b", Vec::<String>::new())
            .validate()
            .is_err());
        assert!(PropertyRule::new("a", "", Vec::<String>::new())
            .validate()
            .is_err());
    }
}
