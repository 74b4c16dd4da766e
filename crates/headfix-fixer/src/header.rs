//! Per-file header text resolution
//!
//! Decides what the header for a given file should literally say: either the
//! static configured text, or the template with `{package_name}` and `{year}`
//! filled in when the file resolves to a package. Resolution is total — every
//! file gets some header text (possibly empty, meaning "no header").

use std::path::Path;

use chrono::Datelike;

use crate::config::HeaderConfig;
use crate::package::PackageResolver;

/// Placeholder replaced with the resolved package name
const PACKAGE_NAME_PLACEHOLDER: &str = "{package_name}";
/// Placeholder replaced with the current four-digit year
const YEAR_PLACEHOLDER: &str = "{year}";

/// Resolves the header text for individual files.
#[derive(Debug)]
pub struct HeaderResolver {
    header: String,
    template: String,
    year: i32,
    packages: PackageResolver,
}

impl HeaderResolver {
    /// Create a resolver from the fixer configuration, using the current
    /// calendar year for `{year}`.
    pub fn new(config: &HeaderConfig) -> Self {
        Self::with_year(config, chrono::Local::now().year())
    }

    /// Create a resolver with a fixed year, for deterministic output
    pub fn with_year(config: &HeaderConfig, year: i32) -> Self {
        Self {
            header: config.header.clone(),
            template: config.header_template.clone(),
            year,
            packages: PackageResolver::new(config.package_roots.clone()),
        }
    }

    /// The package resolver backing template lookups
    pub fn packages(&self) -> &PackageResolver {
        &self.packages
    }

    /// Resolve the header text for one file. Falls back to the static header
    /// whenever the template does not apply, so this never fails.
    pub fn resolve(&mut self, file_path: &Path) -> String {
        if self.template.is_empty() || !self.packages.has_roots() {
            return self.header.clone();
        }
        match self.packages.resolve(file_path) {
            Some(package_name) => self
                .template
                .replace(PACKAGE_NAME_PLACEHOLDER, &package_name)
                .replace(YEAR_PLACEHOLDER, &self.year.to_string()),
            None => self.header.clone(),
        }
    }
}
