use clap::Parser;

/// Environment variable holding the `tracing` filter, e.g. `DOCPREP_LOG=debug`.
pub const LOG_ENV: &str = "DOCPREP_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(
	name = "docprep",
	about = "Render the markdown man page sources in docs/source/markdown.",
	long_about = "docprep renders every `*.md.in` page in docs/source/markdown to a read-only \
	              `*.md` sibling.\n\nPages may contain:\n  @@option NAME      include \
	              options/NAME.md\n  @@include PATH     include any file\n  <<pod|container>>  \
	              wording chosen by the page name\n  <<subcommand>>     short subcommand, e.g. \
	              `start`\n  <<fullsubcommand>> full subcommand, e.g. `pod start`\n\nAfterwards \
	              every included option file is stamped with the pages that use it.\n\nNo \
	              arguments are accepted. Set DOCPREP_MARKDOWN_DIR to render another directory \
	              and DOCPREP_LOG to control logging.",
	disable_help_flag = true,
	disable_version_flag = true
)]
pub struct DocprepCli {}
