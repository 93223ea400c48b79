//! Loader settings
//!
//! Knobs that control how the documentation configuration is produced, not the
//! configuration itself. Defaults reproduce the hosted-build contract: the
//! `READTHEDOCS` flag, the literal `True`, and `cmake --build build -t usr`.
//! Layering follows the usual order: built-in defaults, then an optional
//! `ginkgo-docs.toml`, then `GINKGO_DOCS__*` environment variables.

use config::{Config, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::theme::{ThemeOptions, ThemeSchema};

pub const SETTINGS_FILE: &str = "ginkgo-docs.toml";
pub const ENV_PREFIX: &str = "GINKGO_DOCS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Environment variable that marks a hosted build
    pub hosted_flag: String,
    /// Exact value the flag must carry; anything else is a local build
    pub hosted_value: String,
    /// Build-system driver invoked in hosted builds
    pub build_program: String,
    /// Build target producing the API reference
    pub reference_target: String,
    /// Build directory name under the project root
    pub build_dir_name: String,
    /// Public header directory name under the project root
    pub include_dir_name: String,
    /// Theme options applied over the built-in ones
    pub theme_options: ThemeOptions,
    /// Option types and defaults the selected theme understands
    pub theme_schema: ThemeSchema,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            hosted_flag: "READTHEDOCS".to_string(),
            hosted_value: "True".to_string(),
            build_program: "cmake".to_string(),
            reference_target: "usr".to_string(),
            build_dir_name: "build".to_string(),
            include_dir_name: "include".to_string(),
            theme_options: ThemeOptions::default(),
            theme_schema: ThemeSchema::default(),
        }
    }
}

impl LoaderSettings {
    /// Load settings from `dir/ginkgo-docs.toml` (if present) and the process environment.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with(Some(&dir.join(SETTINGS_FILE)), None)
    }

    /// Load settings from an optional file and an explicit environment map.
    ///
    /// Passing `None` for `env` reads the process environment.
    pub fn load_with(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = file {
            debug!("Looking for loader settings in {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_sources() {
        let settings = LoaderSettings::load_with(None, Some(HashMap::new())).unwrap();
        assert_eq!(settings, LoaderSettings::default());
        assert_eq!(settings.hosted_flag, "READTHEDOCS");
        assert_eq!(settings.hosted_value, "True");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let settings =
            LoaderSettings::load_with(Some(&temp_dir.path().join(SETTINGS_FILE)), Some(HashMap::new()))
                .unwrap();
        assert_eq!(settings.build_program, "cmake");
    }

    #[test]
    fn test_file_then_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            "build_program = \"/opt/cmake/bin/cmake\"\nreference_target = \"doxygen\"\n",
        )
        .unwrap();

        let mut env = HashMap::new();
        env.insert("GINKGO_DOCS__REFERENCE_TARGET".to_string(), "usr-full".to_string());

        let settings = LoaderSettings::load_with(Some(&path), Some(env)).unwrap();
        assert_eq!(settings.build_program, "/opt/cmake/bin/cmake");
        assert_eq!(settings.reference_target, "usr-full");
        assert_eq!(settings.build_dir_name, "build");
    }

    #[test]
    fn test_theme_tables_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"
[theme_options]
navigation_depth = 2

[theme_schema.sidebar_hide_name]
type = "bool"
default = false
"#,
        )
        .unwrap();

        let settings = LoaderSettings::load_with(Some(&path), Some(HashMap::new())).unwrap();
        assert_eq!(
            settings.theme_options.get("navigation_depth"),
            Some(&serde_json::json!(2))
        );
        let spec = &settings.theme_schema["sidebar_hide_name"];
        assert_eq!(spec.option_type, crate::theme::ThemeOptionType::Bool);
        assert_eq!(spec.default, serde_json::json!(false));
    }
}
