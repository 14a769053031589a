// region:    --- Modules

mod error;
mod utils;

pub use self::error::{Error, Result};
use crate::utils::cli::{
	confirm, ico_bundled, ico_check, ico_err, ico_written, prompt, txt_info,
};
use console::Term;
use prw_bundle::event::{BundleEvent, Event, EventBus};
use prw_bundle::{Bundler, STARTER_CONFIG_TOML};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use std::{fs, process};
use textwrap::wrap;
use tokio::time::sleep;

// endregion: --- Modules

#[tokio::main]
async fn main() {
	println!();
	let _ = io::stdout().flush();

	match start().await {
		Ok(_) => println!("\nBye!\n"),
		Err(e) => {
			println!("\n{} Error: {}\n", ico_err(), e);
			process::exit(1);
		}
	}
}

const DEFAULT_DIR: &str = ".";
const CONFIG_FILE: &str = "prw-bundle.toml";

// region:    --- Types

/// Input Command from the user
#[derive(Debug)]
enum Cmd {
	Quit,
	Rebuild,
	ShowConfig,
	Unknown(String),
}

impl Cmd {
	fn from_input(input: impl Into<String>) -> Self {
		let input = input.into();

		if input == "/q" {
			Self::Quit
		} else if input == "/r" || input == "/rb" {
			Self::Rebuild
		} else if input == "/c" {
			Self::ShowConfig
		} else {
			Self::Unknown(input)
		}
	}
}

// endregion: --- Types

async fn start() -> Result<()> {
	let attended = console::user_attended();

	ensure_config(attended)?;

	let event_bus = EventBus::new();
	let _ = event_printer(&event_bus).await;

	let bundler = Bundler::init_from_dir(DEFAULT_DIR, Some(event_bus))?;

	let report = bundler.build()?;

	// TODO: Replace this drain sleep with a flush/ack on the EventBus once it exposes one.
	sleep(Duration::from_millis(50)).await;
	println!(
		"\n{} {} fragment(s) bundled into {}",
		ico_check(),
		report.fragments.len(),
		report.artifact
	);

	// Unattended runs (CI, scripts) are one-shot.
	if !attended {
		return Ok(());
	}

	loop {
		sleep(Duration::from_millis(50)).await;

		let input = prompt("Command (/r rebuild, /c config, /q quit)")?;

		let cmd = Cmd::from_input(input);

		match cmd {
			Cmd::Quit => break,

			Cmd::Rebuild => {
				let report = bundler.build()?;
				sleep(Duration::from_millis(50)).await;
				println!(
					"\n{} {} fragment(s) bundled into {}",
					ico_check(),
					report.fragments.len(),
					report.artifact
				);
			}

			Cmd::ShowConfig => {
				print_config(&bundler);
			}

			Cmd::Unknown(other) => {
				println!("Unknown command '{other}'. Use /r, /c, or /q.");
			}
		}
	}

	Ok(())
}

fn ensure_config(attended: bool) -> Result<()> {
	if Path::new(CONFIG_FILE).is_file() {
		return Ok(());
	}

	if !attended {
		return Err(Error::Custom(format!(
			"No {CONFIG_FILE} found in the current directory"
		)));
	}

	let blurb = format!(
		"No {CONFIG_FILE} found. prwb bundles every file of the source directory \
		 into a single .prw artifact, with the license comment block and the \
		 Protheus directive header on top. A starter config with the defaults \
		 can be created here."
	);
	for line in wrap(&blurb, 80) {
		println!("{line}");
	}

	if confirm(&format!("Create a starter {CONFIG_FILE}?"))? {
		fs::write(CONFIG_FILE, STARTER_CONFIG_TOML)?;
		println!("{} {CONFIG_FILE} created", ico_check());
		Ok(())
	} else {
		Err("No config file, nothing to do".into())
	}
}

fn print_config(bundler: &Bundler) {
	println!();
	println!("{}", txt_info(format!("name:      {}", bundler.name())));
	println!("{}", txt_info(format!("src dir:   {}", bundler.src_dir())));
	println!("{}", txt_info(format!("dist file: {}", bundler.dist_file())));

	if let Ok(report) = bundler.last_report() {
		let last = format!(
			"last build: {} B from {}",
			report.bytes,
			report.fragments.join(", ")
		);
		for line in wrap(&last, 80) {
			println!("{}", txt_info(line.into_owned()));
		}
	}
}

async fn event_printer(event_bus: &EventBus) -> Result<()> {
	let mut rx = event_bus.subscribe()?;

	tokio::spawn(async move {
		let term = Term::stdout();

		loop {
			let evt = rx.recv().await;
			let _ = term.flush();

			if let Ok(evt) = evt {
				match evt {
					Event::Bundle(bundle_evt) => match bundle_evt {
						BundleEvent::LicenseIncluded { lines } => {
							let _ = term.write_line(&format!(
								"{} License   {lines} comment line(s) included",
								ico_check()
							));
						}
						BundleEvent::HeaderIncluded => {
							let _ = term.write_line(&format!(
								"{} Header    directive lines included",
								ico_check()
							));
						}
						BundleEvent::FragmentBundled { file_name, bytes } => {
							let _ = term.write_line(&format!(
								"{} Bundled   {file_name} ({bytes} B)",
								ico_bundled()
							));
						}
						BundleEvent::ArtifactWritten { path, bytes } => {
							let _ = term.write_line(&format!(
								"{} Written   {path} ({bytes} B)",
								ico_written()
							));
						}
					},
				}
			} else {
				// if here, the event_bus has been changed, ok to break, nothing to print.
				break;
			};

			let _ = term.flush();
		}
	});

	Ok(())
}

// region:    --- Tests


// endregion: --- Tests
