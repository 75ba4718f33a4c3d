use thiserror::Error;

/// Start-of-line marker that pulls in `options/NAME.md`.
pub const OPTION_MARKER: &str = "@@option";
/// Start-of-line marker that pulls in an arbitrary relative path.
pub const INCLUDE_MARKER: &str = "@@include";

/// A classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
	/// Copied through after placeholder substitution.
	Text,
	/// `@@option NAME`
	Option(&'a str),
	/// `@@include PATH`
	Include(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{marker}` takes exactly one argument, got {got}")]
pub struct DirectiveError {
	pub marker: &'static str,
	pub got: usize,
}

/// Classify a line. A marker must open the line; indented markers and any
/// other leading token are text.
pub fn parse_line(line: &str) -> Result<Line<'_>, DirectiveError> {
	if line.starts_with(char::is_whitespace) {
		return Ok(Line::Text);
	}

	let mut tokens = line.split_whitespace();
	let marker = match tokens.next() {
		Some(OPTION_MARKER) => OPTION_MARKER,
		Some(INCLUDE_MARKER) => INCLUDE_MARKER,
		_ => return Ok(Line::Text),
	};

	let args: Vec<&str> = tokens.collect();
	let &[arg] = args.as_slice() else {
		return Err(DirectiveError {
			marker,
			got: args.len(),
		});
	};

	Ok(if marker == OPTION_MARKER {
		Line::Option(arg)
	} else {
		Line::Include(arg)
	})
}
