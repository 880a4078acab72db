//! # Document Discovery
//!
//! Turns command-line inputs into an ordered, de-duplicated list of document
//! paths. Each input is one of:
//!
//! - an existing file, taken as-is;
//! - an existing directory, contributing its `*.json` files (not recursive);
//! - a glob pattern such as `outputs/*.json`, expanded with the `glob` crate.
//!
//! An input that matches nothing is logged and skipped. Directory and glob
//! matches are sorted; inputs keep their command-line order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Pattern used by `--batch`.
pub const BATCH_PATTERN: &str = "*.json";

/// Resolve `inputs` to document paths.
pub fn resolve_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for input in inputs {
        for path in expand(input) {
            if seen.insert(path.clone()) {
                documents.push(path);
            }
        }
    }

    documents
}

/// All `*.json` files in `dir`, sorted.
pub fn batch_documents(dir: &Path) -> Vec<PathBuf> {
    let pattern = dir.join(BATCH_PATTERN);
    match pattern.to_str() {
        Some(p) => glob_files(p),
        None => {
            tracing::warn!(dir = %dir.display(), "directory path is not valid UTF-8");
            Vec::new()
        }
    }
}

fn expand(input: &str) -> Vec<PathBuf> {
    let path = Path::new(input);
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if path.is_dir() {
        return batch_documents(path);
    }

    let matches = glob_files(input);
    if matches.is_empty() {
        tracing::warn!(input, "no documents match");
    }
    matches
}

fn glob_files(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable path while expanding pattern");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "{}").unwrap();
        path
    }

    fn s(p: &Path) -> String {
        p.display().to_string()
    }

    #[test]
    fn explicit_files_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.json");
        let a = touch(dir.path(), "a.json");
        assert_eq!(resolve_inputs(&[s(&b), s(&a)]), vec![b, a]);
    }

    #[test]
    fn directory_contributes_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.json");
        let a = touch(dir.path(), "a.json");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "c.json");

        assert_eq!(resolve_inputs(&[s(dir.path())]), vec![a, b]);
    }

    #[test]
    fn glob_patterns_expand() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "run-1.json");
        let b = touch(dir.path(), "run-2.yaml");
        touch(dir.path(), "other.json");

        let pattern = s(&dir.path().join("run-*"));
        assert_eq!(resolve_inputs(&[pattern]), vec![a, b]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.json");
        let all = s(&dir.path().join("*.json"));
        assert_eq!(resolve_inputs(&[s(&a), all]), vec![a]);
    }

    #[test]
    fn unmatched_input_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = s(&dir.path().join("missing.json"));
        assert!(resolve_inputs(&[missing]).is_empty());
    }

    #[test]
    fn batch_documents_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.json");
        touch(dir.path(), "a.yaml");
        assert_eq!(batch_documents(dir.path()), vec![a]);
    }
}
