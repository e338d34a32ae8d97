use std::process::ExitCode;

use cran_parser::{CranParser, CranParserOptions, ResolveMode, ResolveOptions};
use cran_parser::script::ScriptOptions;

const USAGE: &str = "Usage: cran-parser [options] <list | show NAME | script NAME>";

fn main() -> ExitCode {
	let mut opts = getopts::Options::new();

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts.optflag( "h", "help",    "Show help");
		opts.optflag( "v", "verbose", "Increased vebosity");
		opts.optopt(  "s", "source",  "Root url of the CRAN snapshot", "URL");
		opts.optopt(  "o", "output",  "Write the script to a file instead of stdout", "FILE");
		opts.optopt(  "",  "method",  "Download method used by install.packages", "NAME");
		opts.optflag( "",  "batch",   "Install every archive from a single loop");
		opts.optflag( "",  "shared",  "Fetch each dependency once and reject cycles");
		opts.optflag( "",  "imports", "Treat Imports as dependencies");
		opts.optflag( "",  "json",    "Print packages as JSON");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(args.get(1..).unwrap_or_default()) {
			Ok(m)  => { m }
			Err(e) => { eprintln!("Unable to parse options: {}", e); return ExitCode::FAILURE }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage(USAGE));
			return ExitCode::SUCCESS;
		}

		parsed_options
	};

	{
		let mut logger = env_logger::Builder::from_default_env();
		if parsed_options.opt_present("v") {
			logger.filter_level(log::LevelFilter::Debug);
		}
		logger.init();
	}

	let mut options = CranParserOptions::default();
	if let Some(source) = parsed_options.opt_str("s") {
		if !options.set_cran_source(&source) {
			log::error!("Snapshot url is not a valid absolute url: {}", source);
			return ExitCode::FAILURE;
		}
	}
	if let Some(method) = parsed_options.opt_str("method") {
		options.set_transport_method(method);
	}

	let mut parser = match CranParser::from_options(&options) {
		Ok(p) => p,
		Err(e) => { log::error!("Failed to create HTTP client: {}", e); return ExitCode::FAILURE },
	};

	let result = match parsed_options.free.first().map(String::as_str) {
		Some("list") => list_packages(&mut parser),
		Some("show") => match parsed_options.free.get(1) {
			Some(name) => show_package(&mut parser, name, parsed_options.opt_present("json")),
			None => Err(Error::MissingArgument("package name")),
		},
		Some("script") => match parsed_options.free.get(1) {
			Some(name) => {
				let resolve_options = ResolveOptions::recursive()
					.include_imports(parsed_options.opt_present("imports"))
					.mode(if parsed_options.opt_present("shared") { ResolveMode::Shared } else { ResolveMode::Tree });
				let script_options = ScriptOptions::new(options.transport_method(), parsed_options.opt_present("imports"));
				write_script(&mut parser, name, &resolve_options, &script_options, parsed_options.opt_present("batch"), parsed_options.opt_str("o"))
			},
			None => Err(Error::MissingArgument("package name")),
		},
		Some(other) => Err(Error::UnknownCommand(other.to_string())),
		None => Err(Error::MissingArgument("command")),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (Error::MissingArgument(_) | Error::UnknownCommand(_))) => {
			log::error!("{}", e);
			eprintln!("{}", opts.usage(USAGE));
			ExitCode::FAILURE
		},
		Err(e) => {
			log::error!("{}", e);
			ExitCode::FAILURE
		},
	}
}

/// Collapses the line breaks the catalogue wraps long descriptions with.
fn single_line(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn list_packages(parser: &mut CranParser) -> Result<(), Error> {
	for listing in parser.get_package_list()? {
		println!("{}\t{}", listing.name, single_line(&listing.description));
	}
	Ok(())
}

/// Looks `name` up in the listing and reads its page with absolute urls.
fn get_package(parser: &mut CranParser, name: &str) -> Result<cran_parser::ResolvedPackage, Error> {
	let listing = parser.find_listing(name)?;
	log::debug!("Found {} at {}", listing.name, listing.url);
	let mut package = parser.get_package(&listing.to_ref())?;
	package.fix_urls(None)?;
	Ok(package)
}

fn show_package(parser: &mut CranParser, name: &str, json: bool) -> Result<(), Error> {
	let package = get_package(parser, name)?;

	if json {
		println!("{}", serde_json::to_string_pretty(&package)?);
		return Ok(());
	}

	println!("{} {}: {}", package.name, package.version, package.description);
	println!("\t{}", single_line(&package.long_description));
	println!("Published: {}", package.publish_date.map(|d| d.to_string()).unwrap_or_default());
	println!("Author: {}", single_line(&package.author));
	println!("Maintainer: {}", single_line(&package.maintainer));
	println!("License: {}", package.license);
	println!("NeedsCompilation: {}", if package.needs_compilation { "yes" } else { "no" });
	println!("Depends: {}", package.depends.iter().map(|d| d.name()).collect::<Vec<_>>().join(", "));
	println!("Imports: {}", package.imports.iter().map(|d| d.name()).collect::<Vec<_>>().join(", "));
	println!("Suggests: {}", package.suggests.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", "));
	println!("Source: {}", package.source_url);
	for (channel, url) in package.windows_binaries.iter().chain(package.osx_binaries.iter()) {
		println!("Binary ({}): {}", channel, url);
	}
	Ok(())
}

fn write_script(parser: &mut CranParser, name: &str, resolve_options: &ResolveOptions, script_options: &ScriptOptions, batch: bool, output: Option<String>) -> Result<(), Error> {
	let mut package = get_package(parser, name)?;

	log::info!("Resolving dependencies of {}", package.name);
	parser.resolve_with(&mut package, resolve_options)?;

	let script = if batch {
		script_options.batched_script(&package)
	} else {
		script_options.script(&package)
	};

	match output {
		Some(path) => script.save_to_disk(path)?,
		None => print!("{}", script),
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("cran-parser error: {0}")]
	CranParserError(#[from] cran_parser::Error),
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("Unknown command: {0}")]
	UnknownCommand(String),
}
