use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::directive::DirectiveError;
use crate::substitute::AlternativeError;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocprepError {
	#[error("failed to {action} `{}`", .path.display())]
	#[diagnostic(code(docprep::io_error))]
	Io {
		action: &'static str,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot read included file `{path}` (from {})", .document.display())]
	#[diagnostic(
		code(docprep::missing_include),
		help("included paths are resolved relative to the markdown directory")
	)]
	Include {
		path: String,
		document: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("markdown directory not found: {0}")]
	#[diagnostic(
		code(docprep::markdown_dir),
		help(
			"run docprep from a checkout containing `docs/source/markdown`, or set \
			 DOCPREP_MARKDOWN_DIR"
		)
	)]
	MarkdownDirNotFound(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docprep::config_parse),
		help("check that docprep.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("invalid input pattern `{pattern}`: {reason}")]
	#[diagnostic(code(docprep::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("{}:{line}: malformed directive `{text}`: {source}", .file.display())]
	#[diagnostic(
		code(docprep::malformed_directive),
		help("directives take exactly one argument: `@@option NAME` or `@@include PATH`")
	)]
	MalformedDirective {
		file: PathBuf,
		line: usize,
		text: String,
		#[source]
		source: DirectiveError,
	},

	#[error("{}: {source}", .file.display())]
	#[diagnostic(
		code(docprep::unresolved_alternative),
		help("exactly one side of `<<a|b>>` must mention `pod` (not `podman`)")
	)]
	UnresolvedAlternative {
		file: PathBuf,
		#[source]
		source: AlternativeError,
	},
}

impl DocprepError {
	pub(crate) fn io(
		action: &'static str,
		path: impl Into<PathBuf>,
		source: std::io::Error,
	) -> Self {
		Self::Io {
			action,
			path: path.into(),
			source,
		}
	}
}

pub type DocprepResult<T> = Result<T, DocprepError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
