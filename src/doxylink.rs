//! Cross-reference link (doxylink) configuration
//!
//! Maps a role namespace such as `gko` to the tag file produced by the
//! reference generator and the directory holding the generated pages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const GINKGO_NAMESPACE: &str = "gko";
pub const TAG_FILE: &str = "Ginkgo.tag";

const LOCAL_TAG_FILE: &str = "_doxygen/Ginkgo.tag";
const LOCAL_HTML_DIR: &str = "../_doxygen/usr";

/// Serialized as a `[tag_file, html_dir]` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoxylinkTarget(pub PathBuf, pub PathBuf);

impl DoxylinkTarget {
    pub fn new(tag_file: impl Into<PathBuf>, html_dir: impl Into<PathBuf>) -> Self {
        Self(tag_file.into(), html_dir.into())
    }

    pub fn tag_file(&self) -> &Path {
        &self.0
    }

    pub fn html_dir(&self) -> &Path {
        &self.1
    }

    /// Paths relative to the documentation source directory
    pub fn local() -> Self {
        Self::new(LOCAL_TAG_FILE, LOCAL_HTML_DIR)
    }

    /// Paths under `<build_dir>/doc/_doxygen`
    pub fn under_build_dir(build_dir: &Path) -> Self {
        let doxygen_dir = build_dir.join("doc").join("_doxygen");
        Self::new(doxygen_dir.join(TAG_FILE), doxygen_dir.join("usr"))
    }
}

pub type DoxylinkMap = IndexMap<String, DoxylinkTarget>;

/// The mapping with `target` registered under the `gko` namespace.
pub fn ginkgo_doxylink(target: DoxylinkTarget) -> DoxylinkMap {
    let mut map = DoxylinkMap::new();
    map.insert(GINKGO_NAMESPACE.to_string(), target);
    map
}
