// src/core/ignore_list.rs

//! The user's ignore list (`ignore_v2.ini`).
//!
//! One glob pattern per line; blank lines and lines starting with `#` or `;` are
//! skipped. Patterns are interpreted relative to the sync root:
//!
//! - `*.tmp`, `.git/` : no slash (other than a trailing one), matched against every
//!   path component.
//! - `/Music/*.m3u`, `Work/drafts` : contains a slash, matched against the path
//!   from the root. Anything beneath a matching directory is ignored as well.
//! - A trailing `/` restricts the pattern to directories.

use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IgnoreListError {
    #[error("Failed to read ignore list '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid ignore pattern '{pattern}' on line {line}: {source}")]
    Pattern {
        pattern: String,
        line: usize,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug)]
struct Rule {
    regex: Regex,
    rooted: bool,
    dir_only: bool,
}

#[derive(Debug)]
pub struct IgnoreList {
    root: PathBuf,
    rules: Vec<Rule>,
}

impl IgnoreList {
    /// Reads and compiles the ignore file for the tree rooted at `root`.
    pub fn load(file: &Path, root: &Path) -> Result<Self, IgnoreListError> {
        let content = fs::read_to_string(file).map_err(|e| IgnoreListError::Io {
            path: file.display().to_string(),
            source: e,
        })?;
        let list = Self::parse(&content, root)?;
        log::debug!(
            "Loaded {} ignore rule(s) from '{}'",
            list.rules.len(),
            file.display()
        );
        Ok(list)
    }

    pub fn parse(content: &str, root: &Path) -> Result<Self, IgnoreListError> {
        let mut rules = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let (body, dir_only) = match line.strip_suffix('/') {
                Some(stripped) => (stripped, true),
                None => (line, false),
            };
            let rooted = body.contains('/');
            let body = body.trim_start_matches('/');
            if body.is_empty() {
                continue;
            }

            let regex = Regex::new(&glob_to_regex(body)).map_err(|e| IgnoreListError::Pattern {
                pattern: line.to_string(),
                line: idx + 1,
                source: e,
            })?;
            rules.push(Rule {
                regex,
                rooted,
                dir_only,
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            rules,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tells whether `path` (absolute under the root, or relative to it) is ignored.
    /// `is_dir` says whether `path` itself is a directory.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return false;
        }

        let last = parts.len() - 1;
        // Every component but the last is a directory by construction.
        let component_is_dir = |i: usize| i < last || is_dir;

        self.rules.iter().any(|rule| {
            if rule.rooted {
                (0..parts.len()).any(|i| {
                    (!rule.dir_only || component_is_dir(i))
                        && rule.regex.is_match(&parts[..=i].join("/"))
                })
            } else {
                parts.iter().enumerate().any(|(i, part)| {
                    (!rule.dir_only || component_is_dir(i)) && rule.regex.is_match(part)
                })
            }
        })
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');
    for ch in glob.chars() {
        match ch {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            _ => out.push_str(&regex::escape(&ch.to_string())),
        }
    }
    out.push('$');
    out
}
