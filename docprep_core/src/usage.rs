use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::config::META_PREFIX;

/// Records which pages include which option files during one run.
///
/// Keys are option paths relative to the markdown directory (for example
/// `options/pull.md`); values are the full subcommands of the including pages
/// in the order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMap {
	entries: BTreeMap<String, Vec<String>>,
}

impl UsageMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record that the page `subcommand` includes `option_path`.
	pub fn record(&mut self, option_path: &str, subcommand: &str) {
		self.entries
			.entry(option_path.to_string())
			.or_default()
			.push(subcommand.to_string());
	}

	/// Every recorded reference to `option_path`, duplicates included.
	pub fn users(&self, option_path: &str) -> Option<&[String]> {
		self.entries.get(option_path).map(Vec::as_slice)
	}

	/// The pages that include `option_path`, each listed once, in first-seen
	/// order.
	pub fn distinct_users(&self, option_path: &str) -> Vec<&str> {
		let mut seen = HashSet::new();
		self.users(option_path)
			.unwrap_or_default()
			.iter()
			.map(String::as_str)
			.filter(|user| seen.insert(*user))
			.collect()
	}

	/// Recorded option paths in sorted order.
	pub fn option_paths(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Replace the stamped header of an option file.
///
/// The result starts with four `####>` lines naming `users`, followed by
/// every line of `content` that is not itself a stamped line.
pub fn stamp_option_file(content: &str, program: &str, users: &[&str]) -> String {
	let mut stamped = String::with_capacity(content.len() + 192);
	stamped.push_str(&format!("{META_PREFIX} This option file is used in:\n"));
	stamped.push_str(&format!("{META_PREFIX}   {program} {}\n", users.join(", ")));
	stamped.push_str(&format!(
		"{META_PREFIX} If file is edited, make sure the changes\n"
	));
	stamped.push_str(&format!("{META_PREFIX} are applicable to all of those.\n"));

	for line in content.split_inclusive('\n') {
		if !line.starts_with(META_PREFIX) {
			stamped.push_str(line);
		}
	}

	stamped
}
