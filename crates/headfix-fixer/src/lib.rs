//! headfix-fixer: header comment synchronization for monorepo PHP sources
//!
//! Given a tokenized file prefix, the fixer ensures the file begins with
//! exactly one canonical header comment (or none). The header text can vary
//! per sub-package: when package roots and a template are configured, the
//! fixer maps the file to its package directory, reads the package manifest's
//! `name` field (cached per directory), and substitutes it into the template.
//!
//! The host formatting engine owns file discovery, tokenization, and the
//! per-file loop; it calls [`HeaderCommentFixer::fix`] once per file with the
//! file's token stream and absolute path.
//!
//! # Example
//!
//! ```ignore
//! use headfix_fixer::{HeaderConfig, HeaderCommentFixer};
//!
//! let mut fixer = HeaderCommentFixer::new(HeaderConfig {
//!     header: "Copyright Acme".to_string(),
//!     ..HeaderConfig::default()
//! });
//! fixer.fix(&mut stream, file_path);
//! ```

pub mod config;
pub mod fixer;
pub mod header;
pub mod package;

pub use config::{CommentStyle, HeaderConfig, HeaderLocation, Separate};
pub use fixer::HeaderCommentFixer;
pub use header::HeaderResolver;
pub use package::PackageResolver;
