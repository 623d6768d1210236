//! Budget plan configuration loading from plan.toml
//!
//! The planner's category-to-fraction table is configuration, not code: a
//! TOML file can override individual category fractions and the default
//! share. When no file is present the built-in table is used.

use crate::core::planner::PlanConfig;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level structure of the plan.toml file.
#[derive(Debug, Deserialize)]
struct PlanFile {
    /// The `[plan]` section
    plan: PlanConfig,
}

/// Loads a budget plan from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is
/// invalid, or the `[plan]` section is missing.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read plan file: {e}"),
    })?;

    let file: PlanFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse plan file: {e}"),
    })?;

    Ok(file.plan)
}

/// Loads the budget plan from the default location (./plan.toml), falling
/// back to the built-in fraction table when the file does not exist.
pub fn load_default_plan() -> Result<PlanConfig> {
    if Path::new("plan.toml").exists() {
        load_plan("plan.toml")
    } else {
        Ok(PlanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_plan_toml() {
        let toml_str = r#"
            [plan]
            default_fraction = 0.04

            [plan.fractions]
            Kitchen = 0.20
            "Custom Tilework" = 0.08
        "#;

        let file: PlanFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.plan.default_fraction, 0.04);
        assert_eq!(file.plan.fraction_for("Kitchen"), 0.20);
        assert_eq!(file.plan.fraction_for("Custom Tilework"), 0.08);
        assert_eq!(file.plan.fraction_for("Anything Else"), 0.04);
    }

    #[test]
    fn test_parse_plan_toml_defaults() {
        // An empty section falls back to the flat default share everywhere
        let file: PlanFile = toml::from_str("[plan]\n").unwrap();
        assert_eq!(file.plan.default_fraction, 0.05);
        assert_eq!(file.plan.fraction_for("Kitchen"), 0.05);
    }

    #[test]
    fn test_load_plan_missing_file() {
        let result = load_plan("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
