//! Package resolution via composer.json manifests
//!
//! Maps an absolute file path to the package it belongs to by walking the
//! configured package roots. The manifest lookup for each package directory is
//! memoized for the lifetime of the resolver, including misses, so a missing
//! or malformed manifest is read at most once.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Manifest file name looked up in each package directory
const MANIFEST_FILE: &str = "composer.json";

/// Why a manifest failed to yield a package name. Never surfaced to callers;
/// every variant collapses to a cached miss.
#[derive(Debug, Error)]
enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest has no name field")]
    MissingName,
}

/// The subset of composer.json the resolver cares about
#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
}

/// Resolves file paths to package names, with a per-directory cache.
///
/// One resolver per worker is the recommended setup; the cache is plain owned
/// state with no synchronization.
#[derive(Debug, Default)]
pub struct PackageResolver {
    roots: Vec<PathBuf>,
    cache: HashMap<PathBuf, Option<String>>,
    manifest_reads: usize,
}

impl PackageResolver {
    /// Create a resolver for the given package root directories
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            cache: HashMap::new(),
            manifest_reads: 0,
        }
    }

    /// Whether any package roots are configured
    pub fn has_roots(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Number of manifest read attempts performed so far. Cache hits do not
    /// count; useful for asserting memoization in tests.
    pub fn manifest_reads(&self) -> usize {
        self.manifest_reads
    }

    /// Resolve the package name for an absolute file path.
    ///
    /// For each configured root that is a prefix of `file_path`, the first
    /// path segment below the root names the candidate package directory;
    /// its manifest is read for a string `name` field. A missing, unreadable,
    /// or malformed manifest is a soft miss: it is cached as `None` and the
    /// next root is tried. Returns `None` when no root yields a name.
    pub fn resolve(&mut self, file_path: &Path) -> Option<String> {
        for root_index in 0..self.roots.len() {
            let root = &self.roots[root_index];
            let Ok(relative) = file_path.strip_prefix(root) else {
                continue;
            };
            let Some(Component::Normal(segment)) = relative.components().next() else {
                continue;
            };
            let package_dir = root.join(segment);

            if let Some(cached) = self.cache.get(&package_dir) {
                match cached {
                    Some(name) => return Some(name.clone()),
                    None => continue,
                }
            }

            self.manifest_reads += 1;
            let name = read_manifest_name(&package_dir).ok();
            self.cache.insert(package_dir, name.clone());
            if name.is_some() {
                return name;
            }
        }
        None
    }
}

fn read_manifest_name(package_dir: &Path) -> Result<String, ManifestError> {
    let text = fs::read_to_string(package_dir.join(MANIFEST_FILE))?;
    let manifest: Manifest = serde_json::from_str(&text)?;
    manifest.name.ok_or(ManifestError::MissingName)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(root: &Path, package: &str, body: &str) {
        let dir = root.join(package);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), body).unwrap();
    }

    #[test]
    fn test_resolves_name_from_manifest() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "widgets", r#"{"name": "acme/widgets"}"#);

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        let file = temp.path().join("widgets/src/Foo.php");
        assert_eq!(resolver.resolve(&file), Some("acme/widgets".to_string()));
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "widgets", r#"{"name": "acme/widgets"}"#);

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        let first = resolver.resolve(&temp.path().join("widgets/src/Foo.php"));
        let second = resolver.resolve(&temp.path().join("widgets/other/Bar.php"));

        assert_eq!(first, second);
        assert_eq!(resolver.manifest_reads(), 1);
    }

    #[test]
    fn test_missing_manifest_is_cached_miss() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bare")).unwrap();

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        assert_eq!(resolver.resolve(&temp.path().join("bare/src/Foo.php")), None);
        assert_eq!(resolver.resolve(&temp.path().join("bare/src/Bar.php")), None);
        assert_eq!(resolver.manifest_reads(), 1);
    }

    #[test]
    fn test_malformed_manifest_is_soft_miss() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "broken", "{not json");

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        assert_eq!(resolver.resolve(&temp.path().join("broken/src/Foo.php")), None);
    }

    #[test]
    fn test_non_string_name_is_soft_miss() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "odd", r#"{"name": 42}"#);

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        assert_eq!(resolver.resolve(&temp.path().join("odd/src/Foo.php")), None);
    }

    #[test]
    fn test_manifest_without_name_is_soft_miss() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "anon", r#"{"description": "no name"}"#);

        let mut resolver = PackageResolver::new(vec![temp.path().to_path_buf()]);
        assert_eq!(resolver.resolve(&temp.path().join("anon/src/Foo.php")), None);
    }

    #[test]
    fn test_file_outside_all_roots() {
        let temp = TempDir::new().unwrap();
        let mut resolver = PackageResolver::new(vec![temp.path().join("packages")]);
        assert_eq!(resolver.resolve(Path::new("/elsewhere/src/Foo.php")), None);
    }

    #[test]
    fn test_later_root_tried_after_miss() {
        let temp = TempDir::new().unwrap();
        let first_root = temp.path().join("apps");
        let second_root = temp.path().join("apps/site/packages");
        write_manifest(&second_root, "widgets", r#"{"name": "acme/widgets"}"#);
        fs::create_dir_all(first_root.join("site")).unwrap();

        // the file sits under both roots; only the second has a manifest
        let mut resolver = PackageResolver::new(vec![first_root, second_root.clone()]);
        let file = second_root.join("widgets/src/Foo.php");
        assert_eq!(resolver.resolve(&file), Some("acme/widgets".to_string()));
    }

    #[test]
    fn test_no_roots_configured() {
        let mut resolver = PackageResolver::new(Vec::new());
        assert!(!resolver.has_roots());
        assert_eq!(resolver.resolve(Path::new("/repo/packages/a/Foo.php")), None);
    }
}
