use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DocprepError;
use crate::DocprepResult;

/// Supported config file locations in discovery order (highest precedence
/// first), relative to the markdown directory.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["docprep.toml", ".docprep.toml", ".config/docprep.toml"];

/// Location of the markdown sources relative to the checkout root.
pub const MARKDOWN_DIR: &str = "docs/source/markdown";

/// Environment variable that overrides the markdown directory lookup.
pub const MARKDOWN_DIR_ENV: &str = "DOCPREP_MARKDOWN_DIR";

/// Prefix marking a stamped line in an option file. Such lines are generated
/// by the usage-header rewrite and are never copied into rendered pages.
pub const META_PREFIX: &str = "####>";

/// Configuration loaded from a `docprep.toml` file.
///
/// Every key is optional and falls back to the conventions of the podman
/// man pages:
///
/// ```toml
/// program = "podman"
/// inputs = "*.md.in"
/// options_dir = "options"
/// option_extension = "md"
/// page_suffix = ".1.md.in"
/// pod_markers = ["-pod-", "-kube-"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DocprepConfig {
	/// Program name. Page names start with `{program}-` and the usage header
	/// lists subcommands as `{program} <subcommand>`.
	pub program: String,
	/// Glob pattern selecting the source pages in the markdown directory.
	pub inputs: String,
	/// Directory holding the option files, relative to the markdown
	/// directory.
	pub options_dir: String,
	/// Extension of option files, without the leading dot.
	pub option_extension: String,
	/// Suffix removed from a page name when deriving its subcommand.
	pub page_suffix: String,
	/// Filename substrings that classify a page as documenting a pod.
	pub pod_markers: Vec<String>,
}

impl Default for DocprepConfig {
	fn default() -> Self {
		Self {
			program: "podman".to_string(),
			inputs: "*.md.in".to_string(),
			options_dir: "options".to_string(),
			option_extension: "md".to_string(),
			page_suffix: ".1.md.in".to_string(),
			pod_markers: vec!["-pod-".to_string(), "-kube-".to_string()],
		}
	}
}

impl DocprepConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> DocprepResult<Option<DocprepConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)
			.map_err(|e| DocprepError::io("read", &config_path, e))?;
		let config: DocprepConfig =
			toml::from_str(&content).map_err(|e| DocprepError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");
		Ok(Some(config))
	}

	/// Like [`DocprepConfig::load`] but falls back to the defaults.
	pub fn load_or_default(root: &Path) -> DocprepResult<DocprepConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Path of the option file for `name`, relative to the markdown
	/// directory. This is the text written into the include markers and the
	/// key of the usage map.
	pub fn option_path(&self, name: &str) -> String {
		format!(
			"{}/{name}.{}",
			self.options_dir.trim_end_matches('/'),
			self.option_extension
		)
	}

	/// Prefix shared by every page name, e.g. `podman-`.
	pub fn page_prefix(&self) -> String {
		format!("{}-", self.program)
	}

	/// Prefix of pod subcommand pages, e.g. `podman-pod-`.
	pub fn pod_page_prefix(&self) -> String {
		format!("{}-pod-", self.program)
	}
}

/// Find the markdown directory.
///
/// [`MARKDOWN_DIR_ENV`] wins when set. Otherwise the directory containing the
/// running executable and each of its ancestors is checked for
/// [`MARKDOWN_DIR`].
pub fn locate_markdown_dir() -> DocprepResult<PathBuf> {
	if let Some(dir) = std::env::var_os(MARKDOWN_DIR_ENV) {
		let dir = PathBuf::from(dir);
		if dir.is_dir() {
			return Ok(dir);
		}

		return Err(DocprepError::MarkdownDirNotFound(format!(
			"{MARKDOWN_DIR_ENV} points at `{}`, which is not a directory",
			dir.display()
		)));
	}

	let exe = std::env::current_exe()
		.map_err(|e| DocprepError::io("locate", "current executable", e))?;
	let start = exe.parent().unwrap_or(Path::new("."));

	start
		.ancestors()
		.map(|dir| dir.join(MARKDOWN_DIR))
		.find(|dir| dir.is_dir())
		.ok_or_else(|| {
			DocprepError::MarkdownDirNotFound(format!(
				"no `{MARKDOWN_DIR}` above `{}`",
				start.display()
			))
		})
}
