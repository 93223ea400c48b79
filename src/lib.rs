//! Ginkgo documentation configuration
//!
//! Produces the configuration consumed by the documentation builder for the
//! Ginkgo linear algebra library, building the API reference first when the
//! documentation is built on a hosting service.

pub mod config;
pub mod doxylink;
pub mod environment;
pub mod error;
pub mod matching;
pub mod project;
pub mod reference;
pub mod settings;
pub mod theme;

pub use config::{DocsConfig, OutputFormat};
pub use doxylink::{DoxylinkMap, DoxylinkTarget};
pub use environment::{BuildEnvironment, EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use project::{ProjectInfo, ProjectLayout};
pub use reference::{CommandRunner, Completion, Invocation, ProcessRunner};
pub use settings::LoaderSettings;
pub use theme::{HtmlOptions, ThemeOptionSpec, ThemeOptionType, ThemeOptions, ThemeSchema};
