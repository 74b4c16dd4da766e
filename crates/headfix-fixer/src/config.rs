//! Header fixer configuration
//!
//! Mirrors the option surface a PHP-CS-Fixer rule entry would carry, so a
//! host can deserialize the rule's option map straight into [`HeaderConfig`].
//! The original rule accepted `comment_type` with `comment`/`PHPDoc` values;
//! those spellings are kept as serde aliases.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the header comment is anchored in the file prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLocation {
    /// Immediately after the opening tag
    AfterOpen,
    /// After `declare(strict_types=1);` when present, else after the open tag
    AfterDeclareStrict,
}

impl Default for HeaderLocation {
    fn default() -> Self {
        HeaderLocation::AfterDeclareStrict
    }
}

/// Which sides of the header get a separating blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separate {
    Both,
    Top,
    Bottom,
    None,
}

impl Default for Separate {
    fn default() -> Self {
        Separate::Both
    }
}

impl Separate {
    /// Blank line above the header
    pub fn above(self) -> bool {
        matches!(self, Separate::Both | Separate::Top)
    }

    /// Blank line below the header
    pub fn below(self) -> bool {
        matches!(self, Separate::Both | Separate::Bottom)
    }
}

/// Comment flavor used for the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    /// `/* ... */`
    #[serde(alias = "comment")]
    Block,
    /// `/** ... */`
    #[serde(alias = "PHPDoc")]
    Doc,
}

impl Default for CommentStyle {
    fn default() -> Self {
        CommentStyle::Block
    }
}

/// Configuration for one fix run.
///
/// Immutable for the duration of a run; reconfiguring a fixer replaces the
/// whole value and rebuilds the package cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Whether the fixer inserts headers; when false it only removes them
    pub enabled: bool,
    /// Static header text, used when no template applies
    pub header: String,
    /// Anchor for the header comment
    pub location: HeaderLocation,
    /// Blank line policy around the header
    pub separate: Separate,
    /// Comment flavor for the header
    #[serde(alias = "comment_type")]
    pub comment_style: CommentStyle,
    /// Package root directories for per-package header resolution
    pub package_roots: Vec<PathBuf>,
    /// Template with `{package_name}` and `{year}` placeholders
    pub header_template: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header: String::new(),
            location: HeaderLocation::default(),
            separate: Separate::default(),
            comment_style: CommentStyle::default(),
            package_roots: Vec::new(),
            header_template: String::new(),
        }
    }
}
