#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use docprep_core::AnyEmptyResult;
use docprep_core::config::MARKDOWN_DIR_ENV;

/// `docprep` pointed at `markdown_dir`, with colors disabled.
pub fn docprep_cmd(markdown_dir: &Path) -> Command {
	let mut cmd = Command::cargo_bin("docprep").unwrap_or_else(|e| panic!("binary: {e}"));
	cmd.env("NO_COLOR", "1")
		.env_remove("DOCPREP_LOG")
		.env(MARKDOWN_DIR_ENV, markdown_dir);
	cmd
}

pub fn write(root: &Path, relative: &str, content: &str) -> AnyEmptyResult {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	Ok(())
}

pub fn sample_docs(root: &Path) -> AnyEmptyResult {
	write(
		root,
		"options/tty.md",
		"#### **--tty**, **-t**\n\nAllocate a pseudo-TTY for the <<pod|container>>.\n",
	)?;
	write(
		root,
		"podman-pod-create.1.md.in",
		"% podman-pod-create 1\n\n## OPTIONS\n@@option tty\n",
	)?;
	write(
		root,
		"podman-run.1.md.in",
		"% podman-run 1\n\nRun `podman <<subcommand>>`.\n@@option tty\n",
	)?;
	Ok(())
}
