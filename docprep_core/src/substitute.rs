//! Inline placeholders: `<<pod text|container text>>` alternatives and the
//! `<<subcommand>>` / `<<fullsubcommand>>` tokens.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::document::Category;
use crate::document::Document;
use crate::document::SubcommandForm;

/// Replaced by the short subcommand, e.g. `start` for `podman-pod-start`.
pub const SUBCOMMAND_TOKEN: &str = "<<subcommand>>";
/// Replaced by the full subcommand, e.g. `pod start` for `podman-pod-start`.
pub const FULL_SUBCOMMAND_TOKEN: &str = "<<fullsubcommand>>";

/// Neither side may contain `|` or `>`.
static ALTERNATIVE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<<[^|>]*\|[^|>]*>>").unwrap());
/// `pod` not followed by `m`, so `podman` never counts.
static POD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)pod(?:[^m]|$)").unwrap());

/// Why an alternative could not be resolved. Each variant carries the
/// offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlternativeError {
	#[error("neither side of `{0}` mentions a pod")]
	NoPodSide(String),
	#[error("both sides of `{0}` mention a pod")]
	BothPodSides(String),
	#[error("`{0}` is not a `<<left|right>>` alternative")]
	NotAnAlternative(String),
}

/// Whether one side of an alternative is the pod variant.
pub fn mentions_pod(side: &str) -> bool {
	POD.is_match(side)
}

/// Pick the side of a single `<<left|right>>` token that matches `category`.
///
/// The pod side is whichever side mentions `pod`; the other side is the
/// container variant. The order of the two sides does not matter.
pub fn resolve_alternative(token: &str, category: Category) -> Result<&str, AlternativeError> {
	let Some((left, right)) = token
		.strip_prefix("<<")
		.and_then(|inner| inner.strip_suffix(">>"))
		.and_then(|inner| inner.split_once('|'))
	else {
		return Err(AlternativeError::NotAnAlternative(token.to_string()));
	};

	let (pod, container) = match (mentions_pod(left), mentions_pod(right)) {
		(true, true) => return Err(AlternativeError::BothPodSides(token.to_string())),
		(false, false) => return Err(AlternativeError::NoPodSide(token.to_string())),
		(true, false) => (left, right),
		(false, true) => (right, left),
	};

	Ok(match category {
		Category::Pod => pod,
		Category::Container => container,
	})
}

/// Resolve every alternative in `line`.
pub fn replace_alternatives(line: &str, category: Category) -> Result<String, AlternativeError> {
	let mut result = String::with_capacity(line.len());
	let mut last = 0;

	for token in ALTERNATIVE.find_iter(line) {
		result.push_str(&line[last..token.start()]);
		result.push_str(resolve_alternative(token.as_str(), category)?);
		last = token.end();
	}

	result.push_str(&line[last..]);
	Ok(result)
}

/// Substitute both subcommand tokens in `line`.
pub fn replace_subcommands(line: &str, document: &Document) -> String {
	if !line.contains("<<") {
		return line.to_string();
	}

	line.replace(SUBCOMMAND_TOKEN, document.subcommand(SubcommandForm::Short))
		.replace(
			FULL_SUBCOMMAND_TOKEN,
			document.subcommand(SubcommandForm::Full),
		)
}

/// Apply alternative resolution followed by subcommand substitution.
pub fn substitute_line(line: &str, document: &Document) -> Result<String, AlternativeError> {
	let resolved = replace_alternatives(line, document.category)?;
	Ok(replace_subcommands(&resolved, document))
}
