//! Exclude-pattern matching for documentation sources.
//!
//! Patterns use the documentation builder's glob dialect:
//! - `**` matches across directory separators
//! - `*` matches everything except a directory separator
//! - `?` matches any single character except a directory separator
//! - `[seq]` / `[!seq]` match a character in / not in seq
//!
//! A path is excluded when the path itself or any of its ancestor
//! directories matches, so `_build` removes everything below `_build/`.

use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::WalkDir;

use crate::error::{ConfigError, Result};

lazy_static::lazy_static! {
    static ref PATTERN_CACHE: Mutex<HashMap<String, Regex>> = Mutex::new(HashMap::new());
}

/// Source suffixes the documentation build reads
pub const SOURCE_SUFFIXES: &[&str] = &["rst", "md"];

/// Translate a glob into an anchored regex.
pub fn translate_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < n {
        match chars[i] {
            '*' if i + 1 < n && chars[i + 1] == '*' => {
                if i + 2 < n && chars[i + 2] == '/' {
                    out.push_str("(?:[^/]+/)*");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            '[' => {
                // A `]` right after `[` or `[!` is a class member, not the close
                let mut j = i + 1;
                if j < n && (chars[j] == '!' || chars[j] == '^') {
                    j += 1;
                }
                if j < n && chars[j] == ']' {
                    j += 1;
                }
                match chars[j.min(n)..].iter().position(|&c| c == ']') {
                    Some(offset) => {
                        let close = j + offset;
                        let mut body = &chars[i + 1..close];
                        out.push('[');
                        if let Some('!') | Some('^') = body.first() {
                            out.push('^');
                            body = &body[1..];
                        }
                        for &c in body {
                            if matches!(c, '\\' | '[' | ']' | '&' | '~') {
                                out.push('\\');
                            }
                            out.push(c);
                        }
                        out.push(']');
                        i = close + 1;
                    }
                    None => {
                        out.push_str("\\[");
                        i += 1;
                    }
                }
            }
            c => {
                out.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }

    format!("^{}$", out)
}

/// Compile a glob, caching the result.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    let regex = Regex::new(&translate_pattern(pattern)).map_err(|source| ConfigError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Forward-slash form of a relative path
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A compiled set of exclude patterns
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    regexes: Vec<Regex>,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let regexes = patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { regexes })
    }

    /// Whether `relative` or one of its ancestors matches a pattern
    pub fn is_excluded(&self, relative: &Path) -> bool {
        relative
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .any(|p| {
                let normalized = normalize_path(p);
                self.regexes.iter().any(|r| r.is_match(&normalized))
            })
    }

    /// Source documents under `dir` that are not excluded, sorted.
    pub fn source_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(dir).follow_links(false).into_iter();

        for entry in walker.filter_entry(|e| {
            e.path()
                .strip_prefix(dir)
                .map(|rel| rel.as_os_str().is_empty() || !self.is_excluded(rel))
                .unwrap_or(true)
        }) {
            let entry = entry.map_err(|source| ConfigError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let is_source = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SOURCE_SUFFIXES.contains(&ext));
            if is_source {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}
