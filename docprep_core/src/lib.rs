//! `docprep_core` expands the markdown sources of man pages. Pages are
//! written as `*.md.in` files that pull in shared option descriptions, include
//! other fragments and switch wording depending on whether the page documents
//! a pod or a container command. Each source renders to a read-only sibling
//! with the `.in` suffix removed.
//!
//! ## Processing Pipeline
//!
//! ```text
//! *.md.in pages (sorted)
//!   → directive parser (`@@option NAME`, `@@include PATH`, text)
//!   → substitution (`<<pod|container>>`, `<<subcommand>>`, `<<fullsubcommand>>`)
//!   → atomic write of the rendered page, recording option usage
//!   → usage-header rewrite of every included option file
//! ```
//!
//! ## Modules
//!
//! - [`config`] — `docprep.toml` loading and markdown directory lookup.
//! - [`directive`] — start-of-line `@@option` / `@@include` directives.
//! - [`document`] — page categories and subcommand names.
//! - [`substitute`] — inline placeholders.
//! - [`usage`] — which pages include which option files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docprep_core::Preprocessor;
//!
//! let mut preprocessor = Preprocessor::load("docs/source/markdown").unwrap();
//! let summary = preprocessor.run().unwrap();
//! println!("rendered {} page(s)", summary.pages.len());
//! ```

pub use config::DocprepConfig;
pub use config::locate_markdown_dir;
pub use document::Category;
pub use document::Document;
pub use document::SubcommandForm;
pub use error::*;
pub use preprocess::*;
pub use usage::UsageMap;

pub mod config;
pub mod directive;
pub mod document;
#[allow(unused_assignments)]
mod error;
mod preprocess;
pub mod substitute;
pub mod usage;
