use std::process;

use clap::Parser;
use docprep_cli::DEFAULT_LOG_FILTER;
use docprep_cli::DocprepCli;
use docprep_cli::LOG_ENV;
use docprep_core::DocprepResult;
use docprep_core::Preprocessor;
use docprep_core::locate_markdown_dir;
use tracing_subscriber::EnvFilter;

fn main() {
	// Any argument is a usage error; clap exits with status 2.
	let _args = DocprepCli::parse();

	// Respect NO_COLOR env var.
	let use_color = std::env::var_os("NO_COLOR").is_none();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(use_color);

	if let Err(e) = run() {
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(2);
	}
}

fn init_tracing(use_color: bool) {
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn run() -> DocprepResult<()> {
	let root = locate_markdown_dir()?;
	let summary = Preprocessor::load(&root)?.run()?;

	tracing::info!(
		pages = summary.pages.len(),
		rewritten_options = summary.rewritten_options.len(),
		unchanged_options = summary.unchanged_options.len(),
		"done"
	);

	Ok(())
}
