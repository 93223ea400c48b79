//! The documentation build configuration
//!
//! `DocsConfig` is the full set of values handed to the documentation builder.
//! Everything except the doxylink mapping is fixed; the mapping depends on
//! whether the build runs on a hosting service, in which case the API
//! reference is built first.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::doxylink::{ginkgo_doxylink, DoxylinkMap, DoxylinkTarget};
use crate::environment::{BuildEnvironment, EnvSource, ProcessEnv};
use crate::error::{ConfigError, Result};
use crate::matching::ExcludeSet;
use crate::project::{ProjectInfo, ProjectLayout};
use crate::reference::{build_reference, CommandRunner, ProcessRunner};
use crate::settings::LoaderSettings;
use crate::theme::HtmlOptions;

pub const DOXYLINK_EXTENSION: &str = "sphinxcontrib.doxylink";

/// Extensions in load order
pub const EXTENSIONS: &[&str] = &[
    "myst_parser",
    "sphinx.ext.autodoc",
    "sphinx.ext.intersphinx",
    "sphinx.ext.autosectionlabel",
    "sphinx.ext.todo",
    "sphinx.ext.coverage",
    "sphinx.ext.mathjax",
    "sphinx.ext.ifconfig",
    "sphinx.ext.viewcode",
    "sphinx_sitemap",
    "sphinx.ext.inheritance_diagram",
    DOXYLINK_EXTENSION,
];

pub const MYST_EXTENSIONS: &[&str] = &[
    "amsmath",
    "colon_fence",
    "deflist",
    "dollarmath",
    "linkify",
    "replacements",
    "smartquotes",
];

/// Output format for `DocsConfig::render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Toml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(flatten)]
    pub project: ProjectInfo,
    pub extensions: Vec<String>,
    pub templates_path: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub highlight_language: String,
    #[serde(flatten)]
    pub html: HtmlOptions,
    pub myst_enable_extensions: Vec<String>,
    pub doxylink: DoxylinkMap,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DocsConfig {
    /// The fixed configuration with the given doxylink mapping.
    pub fn new(doxylink: DoxylinkMap) -> Self {
        let project = ProjectInfo::ginkgo();
        let html = HtmlOptions::ginkgo(project.title());

        Self {
            project,
            extensions: owned(EXTENSIONS),
            templates_path: owned(&["_templates"]),
            exclude_patterns: owned(&["_build", "Thumbs.db", ".DS_Store"]),
            highlight_language: "c++".to_string(),
            html,
            myst_enable_extensions: owned(MYST_EXTENSIONS),
            doxylink,
        }
    }

    /// Load using the process environment and the real build system.
    pub async fn load(conf_path: &Path, settings: &LoaderSettings) -> Result<Self> {
        Self::load_with(conf_path, settings, &ProcessEnv, &ProcessRunner).await
    }

    /// Load with an explicit environment and command runner.
    ///
    /// Theme overrides and schema defaults from `settings` are applied first.
    /// In a hosted build the reference target is then built exactly once, and
    /// waited for, before the doxylink mapping is computed. A local build never
    /// looks at `conf_path`.
    pub async fn load_with<E, R>(
        conf_path: &Path,
        settings: &LoaderSettings,
        env: &E,
        runner: &R,
    ) -> Result<Self>
    where
        E: EnvSource,
        R: CommandRunner,
    {
        let environment = BuildEnvironment::detect(env, settings);
        info!("Documentation build environment: {}", environment);

        let mut config = Self::new(DoxylinkMap::new());
        let theme_options = config
            .html
            .theme_options
            .merged(&settings.theme_options)
            .with_schema_defaults(&settings.theme_schema);
        theme_options.validate(&settings.theme_schema)?;
        config.html.theme_options = theme_options;

        let target = match environment {
            BuildEnvironment::Hosted => {
                let layout = ProjectLayout::from_conf_path(conf_path, settings)?;
                debug!(
                    "Project root {}, include {}, build {}",
                    layout.root.display(),
                    layout.include_dir.display(),
                    layout.build_dir.display()
                );
                build_reference(runner, settings, &layout.build_dir).await?;
                DoxylinkTarget::under_build_dir(&layout.build_dir)
            }
            BuildEnvironment::Local => DoxylinkTarget::local(),
        };
        config.doxylink = ginkgo_doxylink(target);

        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.project.project.trim().is_empty() {
            return Err(ConfigError::Invalid("project name is empty".to_string()));
        }
        if self.project.release.trim().is_empty() {
            return Err(ConfigError::Invalid("release is empty".to_string()));
        }

        check_unique("extension", &self.extensions)?;
        check_unique("MyST extension", &self.myst_enable_extensions)?;

        self.html.theme_options.validate(&Default::default())?;

        if !self.doxylink.is_empty() && !self.extensions.iter().any(|e| e == DOXYLINK_EXTENSION) {
            return Err(ConfigError::Invalid(format!(
                "doxylink is configured but '{}' is not enabled",
                DOXYLINK_EXTENSION
            )));
        }

        Ok(())
    }

    /// Documentation sources under `source_dir` not removed by `exclude_patterns`.
    pub fn source_documents(&self, source_dir: &Path) -> Result<Vec<PathBuf>> {
        ExcludeSet::new(&self.exclude_patterns)?.source_documents(source_dir)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let rendered = match format {
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            OutputFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
            OutputFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        };
        rendered.map_err(ConfigError::Serialize)
    }
}

fn check_unique(kind: &str, items: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.as_str()) {
            return Err(ConfigError::Invalid(format!("duplicate {} '{}'", kind, item)));
        }
    }
    Ok(())
}
