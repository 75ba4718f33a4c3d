use std::fmt;
use std::path::PathBuf;

use crate::config::DocprepConfig;

/// Whether a page documents a pod-level or a container-level operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	Pod,
	Container,
}

impl Category {
	/// Classify a page by its file name. Any of `markers` appearing in the
	/// name makes it a pod page.
	pub fn from_file_name(name: &str, markers: &[String]) -> Self {
		if markers.iter().any(|marker| name.contains(marker.as_str())) {
			Self::Pod
		} else {
			Self::Container
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pod => f.write_str("pod"),
			Self::Container => f.write_str("container"),
		}
	}
}

/// The two spellings of a page's subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcommandForm {
	/// `podman-pod-start.1.md.in` → `start`
	Short,
	/// `podman-pod-start.1.md.in` → `pod start`
	Full,
}

/// Derive the subcommand identifier from a page file name.
pub fn derive_subcommand(file_name: &str, form: SubcommandForm, config: &DocprepConfig) -> String {
	let mut name = file_name;
	if form == SubcommandForm::Short {
		name = name
			.strip_prefix(config.pod_page_prefix().as_str())
			.unwrap_or(name);
	}
	let name = name
		.strip_prefix(config.page_prefix().as_str())
		.unwrap_or(name);
	let name = name
		.strip_suffix(config.page_suffix.as_str())
		.unwrap_or(name);

	name.replace('-', " ")
}

/// A source page together with everything derived from its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	/// Path of the `.in` source file.
	pub path: PathBuf,
	/// File name of the source, e.g. `podman-pod-start.1.md.in`.
	pub name: String,
	pub category: Category,
	subcommand: String,
	full_subcommand: String,
}

impl Document {
	pub fn new(path: impl Into<PathBuf>, config: &DocprepConfig) -> Self {
		let path = path.into();
		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		let category = Category::from_file_name(&name, &config.pod_markers);
		let subcommand = derive_subcommand(&name, SubcommandForm::Short, config);
		let full_subcommand = derive_subcommand(&name, SubcommandForm::Full, config);

		Self {
			path,
			name,
			category,
			subcommand,
			full_subcommand,
		}
	}

	pub fn subcommand(&self, form: SubcommandForm) -> &str {
		match form {
			SubcommandForm::Short => &self.subcommand,
			SubcommandForm::Full => &self.full_subcommand,
		}
	}

	/// The rendered page sits next to the source with the trailing `.in`
	/// removed.
	pub fn output_path(&self) -> PathBuf {
		self.path.with_extension("")
	}
}
