//! Project metadata and on-disk layout.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::settings::LoaderSettings;

/// Project information shown in page headers and footers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project: String,
    pub copyright: String,
    pub author: String,
    pub release: String,
}

impl ProjectInfo {
    pub fn ginkgo() -> Self {
        Self {
            project: "Ginkgo".to_string(),
            copyright: "2024, The Ginkgo Authors".to_string(),
            author: "The Ginkgo Authors".to_string(),
            release: "1.9.0".to_string(),
        }
    }

    /// Display title, `"<project> v<release>"`
    pub fn title(&self) -> String {
        format!("{} v{}", self.project, self.release)
    }
}

/// Directories of the library checkout the documentation belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub include_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl ProjectLayout {
    /// Derive the layout from the location of the documentation configuration file.
    ///
    /// The configuration lives in `<root>/doc/`, so the root is the parent of the
    /// file's parent. Paths are made absolute without touching the filesystem;
    /// the parent of the filesystem root is the root itself.
    pub fn from_conf_path(conf_path: &Path, settings: &LoaderSettings) -> Result<Self> {
        let conf_path = absolutize(conf_path)?;
        let root = parent_or_self(&parent_or_self(&conf_path));

        Ok(Self {
            include_dir: root.join(&settings.include_dir_name),
            build_dir: root.join(&settings.build_dir_name),
            root,
        })
    }
}

fn parent_or_self(path: &Path) -> PathBuf {
    path.parent().unwrap_or(path).to_path_buf()
}

/// Make `path` absolute against the working directory and fold `.`/`..` lexically.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(ConfigError::WorkingDir)?
            .join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!(ProjectInfo::ginkgo().title(), "Ginkgo v1.9.0");
    }

    #[test]
    fn test_layout_from_conf_path() {
        let layout = ProjectLayout::from_conf_path(
            Path::new("/src/ginkgo/doc/conf.py"),
            &LoaderSettings::default(),
        )
        .unwrap();
        assert_eq!(layout.root, PathBuf::from("/src/ginkgo"));
        assert_eq!(layout.include_dir, PathBuf::from("/src/ginkgo/include"));
        assert_eq!(layout.build_dir, PathBuf::from("/src/ginkgo/build"));
    }

    #[test]
    fn test_layout_folds_dot_segments() {
        let layout = ProjectLayout::from_conf_path(
            Path::new("/src/ginkgo/./doc/../doc/conf.py"),
            &LoaderSettings::default(),
        )
        .unwrap();
        assert_eq!(layout.build_dir, PathBuf::from("/src/ginkgo/build"));
    }

    #[test]
    fn test_relative_conf_path_becomes_absolute() {
        let layout =
            ProjectLayout::from_conf_path(Path::new("doc/conf.py"), &LoaderSettings::default())
                .unwrap();
        assert!(layout.root.is_absolute());
        assert_eq!(layout.root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_conf_at_filesystem_root_uses_root() {
        let layout =
            ProjectLayout::from_conf_path(Path::new("/conf.py"), &LoaderSettings::default())
                .unwrap();
        assert_eq!(layout.root, PathBuf::from("/"));
        assert_eq!(layout.build_dir, PathBuf::from("/build"));
    }
}
