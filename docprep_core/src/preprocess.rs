use std::fs;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;

use crate::DocprepError;
use crate::DocprepResult;
use crate::config::DocprepConfig;
use crate::config::META_PREFIX;
use crate::directive::Line;
use crate::directive::parse_line;
use crate::document::Document;
use crate::document::SubcommandForm;
use crate::substitute::substitute_line;
use crate::usage::UsageMap;
use crate::usage::stamp_option_file;

/// Outcome of a full run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
	/// Rendered pages, in processing order.
	pub pages: Vec<PathBuf>,
	/// Option files whose usage header was rewritten.
	pub rewritten_options: Vec<PathBuf>,
	/// Option files whose usage header was already current.
	pub unchanged_options: Vec<PathBuf>,
}

/// Expands the `*.md.in` pages of one markdown directory.
///
/// A [`Preprocessor`] owns the [`UsageMap`] for its run: every page expanded
/// through it records the option files it includes, and
/// [`Preprocessor::rewrite_option_files`] stamps those files afterwards.
#[derive(Debug)]
pub struct Preprocessor {
	root: PathBuf,
	config: DocprepConfig,
	usage: UsageMap,
}

impl Preprocessor {
	pub fn new(root: impl Into<PathBuf>, config: DocprepConfig) -> Self {
		Self {
			root: root.into(),
			config,
			usage: UsageMap::new(),
		}
	}

	/// Create a preprocessor for `root`, reading `docprep.toml` when present.
	pub fn load(root: impl Into<PathBuf>) -> DocprepResult<Self> {
		let root = root.into();
		let config = DocprepConfig::load_or_default(&root)?;
		Ok(Self::new(root, config))
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn config(&self) -> &DocprepConfig {
		&self.config
	}

	pub fn usage(&self) -> &UsageMap {
		&self.usage
	}

	/// Source pages in the markdown directory, sorted by file name. Symlinks
	/// are followed; hidden files are skipped as a shell glob would.
	pub fn discover(&self) -> DocprepResult<Vec<PathBuf>> {
		let matcher = Glob::new(&self.config.inputs)
			.map_err(|e| {
				DocprepError::InvalidPattern {
					pattern: self.config.inputs.clone(),
					reason: e.to_string(),
				}
			})?
			.compile_matcher();

		let entries =
			fs::read_dir(&self.root).map_err(|e| DocprepError::io("read", &self.root, e))?;
		let mut pages = Vec::new();

		for entry in entries {
			let entry = entry.map_err(|e| DocprepError::io("read", &self.root, e))?;
			let name = entry.file_name();
			if name.to_string_lossy().starts_with('.') || !matcher.is_match(&name) {
				continue;
			}

			let path = entry.path();
			let metadata = fs::metadata(&path).map_err(|e| DocprepError::io("read", &path, e))?;
			if metadata.is_file() {
				pages.push(path);
			}
		}

		pages.sort();
		Ok(pages)
	}

	/// Expand every page, then rewrite the usage headers of the option files
	/// they include. The first error aborts the run; option files are only
	/// touched once every page has been rendered.
	pub fn run(&mut self) -> DocprepResult<RunSummary> {
		self.usage = UsageMap::new();

		let inputs = self.discover()?;
		tracing::info!(count = inputs.len(), root = %self.root.display(), "expanding pages");

		let mut summary = RunSummary::default();
		for input in &inputs {
			summary.pages.push(self.process_document(input)?);
		}

		for (path, changed) in self.rewrite_option_files()? {
			if changed {
				summary.rewritten_options.push(path);
			} else {
				summary.unchanged_options.push(path);
			}
		}

		Ok(summary)
	}

	/// Expand one page and atomically replace its rendered output. Returns
	/// the output path.
	pub fn process_document(&mut self, path: &Path) -> DocprepResult<PathBuf> {
		let document = Document::new(path, &self.config);
		let expanded = self.expand(&document)?;
		let output = document.output_path();

		write_read_only(&output, &expanded)?;
		tracing::info!(
			page = %output.display(),
			category = %document.category,
			"wrote page"
		);

		Ok(output)
	}

	/// Expand the directives and placeholders of `document` and return the
	/// rendered text. Each `@@option` is recorded in the usage map.
	pub fn expand(&mut self, document: &Document) -> DocprepResult<String> {
		let source = fs::read_to_string(&document.path)
			.map_err(|e| DocprepError::io("read", &document.path, e))?;
		let mut output = String::with_capacity(source.len());

		for (index, line) in source.split_inclusive('\n').enumerate() {
			let parsed = parse_line(line).map_err(|source| {
				DocprepError::MalformedDirective {
					file: document.path.clone(),
					line: index + 1,
					text: line.trim_end().to_string(),
					source,
				}
			})?;

			match parsed {
				Line::Option(name) => {
					let option_path = self.config.option_path(name);
					self.usage
						.record(&option_path, document.subcommand(SubcommandForm::Full));
					self.insert_file(&mut output, &option_path, document)?;
				}
				Line::Include(path) => self.insert_file(&mut output, path, document)?,
				Line::Text => output.push_str(&substitute(line, document, &document.path)?),
			}
		}

		Ok(output)
	}

	/// Copy an included file between begin/end markers. Stamped lines are
	/// dropped and the rest get the same substitution as the page itself.
	fn insert_file(
		&self,
		output: &mut String,
		path: &str,
		document: &Document,
	) -> DocprepResult<()> {
		let full_path = self.root.join(path);
		let content = fs::read_to_string(&full_path).map_err(|source| {
			DocprepError::Include {
				path: path.to_string(),
				document: document.path.clone(),
				source,
			}
		})?;
		tracing::debug!(include = path, page = %document.name, "including file");

		// The blank line keeps markdown renderers from joining the marker
		// onto the preceding paragraph.
		output.push('\n');
		output.push_str(&format!("[//]: # (BEGIN included file {path})\n"));
		for line in content.split_inclusive('\n') {
			if line.starts_with(META_PREFIX) {
				continue;
			}
			output.push_str(&substitute(line, document, &full_path)?);
		}
		output.push_str(&format!("\n[//]: # (END   included file {path})\n"));

		Ok(())
	}

	/// Stamp every option file in the usage map with the pages that include
	/// it. Files whose content would not change are left alone. Returns each
	/// option file with whether it was rewritten.
	pub fn rewrite_option_files(&self) -> DocprepResult<Vec<(PathBuf, bool)>> {
		let mut results = Vec::with_capacity(self.usage.len());

		for option_path in self.usage.option_paths() {
			let full_path = self.root.join(option_path);
			let users = self.usage.distinct_users(option_path);
			let original = fs::read_to_string(&full_path)
				.map_err(|e| DocprepError::io("read", &full_path, e))?;
			let stamped = stamp_option_file(&original, &self.config.program, &users);

			if stamped == original {
				tracing::debug!(option = option_path, "usage header unchanged");
				results.push((full_path, false));
				continue;
			}

			let temp_path = sibling_with_suffix(&full_path, ".tmp");
			write_or_cleanup(&temp_path, &stamped)?;
			rename_or_cleanup(&temp_path, &full_path)?;
			tracing::info!(
				option = option_path,
				users = users.len(),
				"rewrote usage header"
			);
			results.push((full_path, true));
		}

		Ok(results)
	}
}

/// Expand every page under `root` using its `docprep.toml`, if any.
pub fn run(root: &Path) -> DocprepResult<RunSummary> {
	Preprocessor::load(root)?.run()
}

fn substitute(line: &str, document: &Document, file: &Path) -> DocprepResult<String> {
	substitute_line(line, document).map_err(|source| {
		DocprepError::UnresolvedAlternative {
			file: file.to_path_buf(),
			source,
		}
	})
}

/// Write `content` to a private sibling, mark it read-only and move it over
/// `path`. Readers of `path` see either the old or the new file.
fn write_read_only(path: &Path, content: &str) -> DocprepResult<()> {
	let temp_path = sibling_with_suffix(path, &format!(".tmp.{}", std::process::id()));
	write_or_cleanup(&temp_path, content)?;

	if let Err(e) = make_read_only(&temp_path) {
		let _ = fs::remove_file(&temp_path);
		return Err(DocprepError::io("set permissions on", &temp_path, e));
	}

	rename_or_cleanup(&temp_path, path)
}

fn make_read_only(path: &Path) -> std::io::Result<()> {
	let mut permissions = fs::metadata(path)?.permissions();
	permissions.set_readonly(true);
	fs::set_permissions(path, permissions)
}

fn write_or_cleanup(path: &Path, content: &str) -> DocprepResult<()> {
	if let Err(e) = fs::write(path, content) {
		let _ = fs::remove_file(path);
		return Err(DocprepError::io("write", path, e));
	}

	Ok(())
}

fn rename_or_cleanup(from: &Path, to: &Path) -> DocprepResult<()> {
	if let Err(e) = fs::rename(from, to) {
		let _ = fs::remove_file(from);
		return Err(DocprepError::io("replace", to, e));
	}

	Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path
		.file_name()
		.map(|name| name.to_os_string())
		.unwrap_or_default();
	name.push(suffix);
	path.with_file_name(name)
}
