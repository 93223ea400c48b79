//! HTML output and theme options
//!
//! Theme options are an ordered mapping from option name to a boolean, integer
//! or string value. The consuming theme decides which keys it recognizes; an
//! optional schema can be supplied to check value types before handing the
//! options over.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Theme option type for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeOptionType {
    Bool,
    String,
    Integer,
}

impl ThemeOptionType {
    /// Classify a value; `None` for anything a theme option cannot hold
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(ThemeOptionType::Bool),
            Value::String(_) => Some(ThemeOptionType::String),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ThemeOptionType::Integer),
            _ => None,
        }
    }
}

/// Theme option specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeOptionSpec {
    #[serde(rename = "type")]
    pub option_type: ThemeOptionType,
    pub default: Value,
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

pub type ThemeSchema = IndexMap<String, ThemeOptionSpec>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeOptions(IndexMap<String, Value>);

impl ThemeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge user overrides on top of these options.
    /// Existing keys keep their position; new keys are appended.
    pub fn merged(&self, overrides: &ThemeOptions) -> ThemeOptions {
        let mut result = self.0.clone();
        for (key, value) in &overrides.0 {
            result.insert(key.clone(), value.clone());
        }
        ThemeOptions(result)
    }

    /// Fill in schema defaults for options not set here, appended in schema order.
    pub fn with_schema_defaults(&self, schema: &ThemeSchema) -> ThemeOptions {
        let mut result = self.0.clone();
        for (key, spec) in schema {
            result
                .entry(key.clone())
                .or_insert_with(|| spec.default.clone());
        }
        ThemeOptions(result)
    }

    /// Check every value is a bool, integer or string, and matches `schema` where given.
    pub fn validate(&self, schema: &ThemeSchema) -> Result<()> {
        for (key, value) in &self.0 {
            let actual = ThemeOptionType::of(value).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "Theme option '{}' must be a bool, integer or string, got {}",
                    key, value
                ))
            })?;

            let Some(spec) = schema.get(key) else {
                continue;
            };

            if actual != spec.option_type {
                return Err(ConfigError::Invalid(format!(
                    "Theme option '{}' has invalid type, expected {:?}",
                    key, spec.option_type
                )));
            }

            if let (Some(allowed), Some(s)) = (&spec.values, value.as_str()) {
                if !allowed.iter().any(|a| a == s) {
                    return Err(ConfigError::Invalid(format!(
                        "Theme option '{}' has invalid value '{}', allowed: {:?}",
                        key, s, allowed
                    )));
                }
            }
        }

        Ok(())
    }
}

/// HTML builder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlOptions {
    #[serde(rename = "html_theme")]
    pub theme: String,
    #[serde(rename = "html_theme_options")]
    pub theme_options: ThemeOptions,
    #[serde(rename = "html_static_path")]
    pub static_path: Vec<String>,
    #[serde(rename = "html_logo")]
    pub logo: String,
    #[serde(rename = "html_title")]
    pub title: String,
    #[serde(rename = "html_baseurl")]
    pub baseurl: String,
}

impl HtmlOptions {
    pub fn ginkgo(title: String) -> Self {
        let theme_options = ThemeOptions::new()
            .with("canonical_url", "")
            .with("display_version", true)
            .with("prev_next_buttons_location", "bottom")
            .with("style_external_links", false)
            .with("logo_only", false)
            // Toc options
            .with("collapse_navigation", true)
            .with("sticky_navigation", true)
            .with("navigation_depth", 4)
            .with("includehidden", true)
            .with("titles_only", false);

        Self {
            theme: "furo".to_string(),
            theme_options,
            static_path: vec!["_static".to_string()],
            logo: "../assets/logo_doc.png".to_string(),
            title,
            baseurl: "https://greole.github.io/ginkgo".to_string(),
        }
    }
}
