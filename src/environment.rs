//! Build environment detection.

use log::debug;
use std::collections::HashMap;
use std::fmt;

use crate::settings::LoaderSettings;

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnvironment {
    /// A developer checkout with pre-generated reference output
    Local,
    /// A documentation hosting service that must build the reference itself
    Hosted,
}

impl BuildEnvironment {
    /// Detect the environment from the hosted-build flag.
    ///
    /// Only an exact match on the configured value selects `Hosted`; `true`,
    /// `1` or an empty string all mean a local build.
    pub fn detect(env: &impl EnvSource, settings: &LoaderSettings) -> Self {
        let value = env.var(&settings.hosted_flag);
        debug!("{} = {:?}", settings.hosted_flag, value);

        match value {
            Some(v) if v == settings.hosted_value => BuildEnvironment::Hosted,
            _ => BuildEnvironment::Local,
        }
    }

    pub fn is_hosted(self) -> bool {
        self == BuildEnvironment::Hosted
    }
}

impl fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEnvironment::Local => write!(f, "local"),
            BuildEnvironment::Hosted => write!(f, "hosted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(value: Option<&str>) -> HashMap<String, String> {
        let mut env = HashMap::new();
        if let Some(v) = value {
            env.insert("READTHEDOCS".to_string(), v.to_string());
        }
        env
    }

    #[test]
    fn test_unset_flag_is_local() {
        let settings = LoaderSettings::default();
        assert_eq!(
            BuildEnvironment::detect(&env_with(None), &settings),
            BuildEnvironment::Local
        );
    }

    #[test]
    fn test_only_exact_literal_is_hosted() {
        let settings = LoaderSettings::default();
        assert!(BuildEnvironment::detect(&env_with(Some("True")), &settings).is_hosted());

        for value in ["true", "TRUE", "1", "yes", "", " True"] {
            assert_eq!(
                BuildEnvironment::detect(&env_with(Some(value)), &settings),
                BuildEnvironment::Local,
                "value {:?} must not select a hosted build",
                value
            );
        }
    }

    #[test]
    fn test_custom_flag_name() {
        let settings = LoaderSettings {
            hosted_flag: "CI_DOCS".to_string(),
            hosted_value: "1".to_string(),
            ..LoaderSettings::default()
        };
        let mut env = HashMap::new();
        env.insert("CI_DOCS".to_string(), "1".to_string());
        env.insert("READTHEDOCS".to_string(), "True".to_string());

        assert!(BuildEnvironment::detect(&env, &settings).is_hosted());
        assert_eq!(BuildEnvironment::Hosted.to_string(), "hosted");
    }
}
