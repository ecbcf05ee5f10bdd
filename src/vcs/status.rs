//! Porcelain-style status parsing.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// One scan of a porcelain status report, split into the change categories
/// the protocols act on.
///
/// A path lives in exactly one category. Rename and copy entries are
/// directed (source, destination) edges rather than plain paths. The
/// snapshot is built once from a status report, consumed within the same
/// operation, and never mutated afterwards except through [`add`](Self::add)
/// during parsing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChangeStatus {
    base_path: PathBuf,
    added: BTreeSet<String>,
    modified: BTreeSet<String>,
    copied: BTreeSet<(String, String)>,
    renamed: BTreeSet<(String, String)>,
    deleted: BTreeSet<String>,
    untracked: BTreeSet<String>,
}

impl ChangeStatus {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Parse a porcelain status report rooted at `base_path`.
    ///
    /// Each line splits on its first run of whitespace into a status token
    /// and a path; the token's first character selects the category. Lines
    /// that do not split, rename/copy entries without an arrow, and unknown
    /// status characters are skipped.
    pub fn parse(base_path: impl Into<PathBuf>, report: &str) -> Self {
        let mut status = Self::new(base_path);
        for line in report.lines() {
            let Some((token, rest)) = line.trim().split_once(|c: char| c.is_whitespace()) else {
                continue;
            };
            let Some(key) = token.chars().next() else {
                continue;
            };
            status.add(key, rest.trim());
        }
        status
    }

    /// Insert one entry under a category key. Rename and copy entries carry
    /// an arrow pointing from source to destination.
    pub fn add(&mut self, key: char, path: &str) {
        match key {
            'A' => {
                self.added.insert(path.to_string());
            }
            'M' => {
                self.modified.insert(path.to_string());
            }
            'C' => {
                if let Some(pair) = split_arrow(path) {
                    self.copied.insert(pair);
                }
            }
            'R' => {
                if let Some(pair) = split_arrow(path) {
                    self.renamed.insert(pair);
                }
            }
            'D' => {
                self.deleted.insert(path.to_string());
            }
            '?' => {
                self.untracked.insert(path.to_string());
            }
            _ => {}
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn added(&self) -> &BTreeSet<String> {
        &self.added
    }

    pub fn modified(&self) -> &BTreeSet<String> {
        &self.modified
    }

    pub fn copied(&self) -> &BTreeSet<(String, String)> {
        &self.copied
    }

    pub fn renamed(&self) -> &BTreeSet<(String, String)> {
        &self.renamed
    }

    pub fn deleted(&self) -> &BTreeSet<String> {
        &self.deleted
    }

    pub fn untracked(&self) -> &BTreeSet<String> {
        &self.untracked
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.added.len()
            + self.modified.len()
            + self.copied.len()
            + self.renamed.len()
            + self.deleted.len()
            + self.untracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths a push registers with the centralized system: additions,
    /// modifications, and the destinations of copies and renames.
    pub fn paths_to_register(&self) -> BTreeSet<String> {
        let mut paths: BTreeSet<String> = self.added.iter().cloned().collect();
        paths.extend(self.modified.iter().cloned());
        paths.extend(self.copied.iter().map(|(_, destination)| destination.clone()));
        paths.extend(self.renamed.iter().map(|(_, destination)| destination.clone()));
        paths
    }
}

fn split_arrow(path: &str) -> Option<(String, String)> {
    let (source, destination) = path.split_once("->")?;
    Some((source.trim().to_string(), destination.trim().to_string()))
}

/// Diagnostic rendering, the inverse of [`ChangeStatus::parse`]: one line
/// per entry.
impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.added {
            writeln!(f, "A {path}")?;
        }
        for path in &self.modified {
            writeln!(f, "M {path}")?;
        }
        for (source, destination) in &self.copied {
            writeln!(f, "C {source} -> {destination}")?;
        }
        for (source, destination) in &self.renamed {
            writeln!(f, "R {source} -> {destination}")?;
        }
        for path in &self.deleted {
            writeln!(f, "D {path}")?;
        }
        for path in &self.untracked {
            writeln!(f, "? {path}")?;
        }
        Ok(())
    }
}
