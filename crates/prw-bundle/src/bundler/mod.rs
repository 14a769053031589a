//! The `bundler` module handles everything related to the Bundler construct.
//!
//! A Bundler assembles a directory of AdvPL source fragments into one
//! distributable `.prw` artifact, optionally prefixed with a license-comment
//! block and the Protheus directive header.
//!
//! Each build is a full rebuild: fragments are enumerated, read, and joined
//! from scratch on every invocation. There is no dependency ordering between
//! fragments beyond the lexicographic file-name sort, and fragment content is
//! treated as opaque text (never transformed or filtered).

// region:    --- Modules

mod config;
mod event;

pub use event::BundleEvent;

use crate::bundler::config::Config;
use crate::event::{Event, EventBus};
use crate::utils::files::{
	ensure_dir, list_files, load_from_json, load_from_toml, read_to_string,
	save_atomic, save_to_json, XFile,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::Receiver;

// endregion: --- Modules

const PRW_BUNDLE_TOML: &str = "prw-bundle.toml";
const LAST_BUILD_JSON: &str = "last-build.json";

/// The fixed Protheus directive header (macro translation + include).
const HEADER_LINES: [&str; 2] = [
	"#xtranslate \\<<obj>\\> => <obj>():New",
	"#include \"protheus.ch\"",
];

/// Starter content for `prw-bundle.toml`, with every field at its default.
pub const STARTER_CONFIG_TOML: &str = r#"# prw-bundle configuration (all fields optional, defaults shown)

# name = "prw-bundle"
# src_dir = "src"
# dist_file = "dist/DataStructures.prw"
# include_license = true
# include_header = true
# license_file = "LICENSE"
# comment_prefix = "// "
# license_trim_lines = 2
# src_globs = ["*.prw"]
"#;

#[derive(Debug)]
pub struct Bundler {
	dir: PathBuf,
	config: Config,
	event_bus: EventBus,
}

/// Summary of one successful build, persisted under the project data dir.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildReport {
	pub artifact: String,
	pub fragments: Vec<String>,
	pub bytes: u64,
}

/// Constructor functions
impl Bundler {
	pub fn init_from_dir(
		dir: impl AsRef<Path>,
		event_bus: Option<EventBus>,
	) -> Result<Self> {
		let dir = dir.as_ref();

		let event_bus = event_bus.unwrap_or_else(EventBus::new);

		// -- Load from the directory
		let config: Config = load_from_toml(dir.join(PRW_BUNDLE_TOML))?;

		Ok(Bundler {
			dir: dir.to_path_buf(),
			config,
			event_bus,
		})
	}
}

/// Public functions
impl Bundler {
	pub fn name(&self) -> &str {
		&self.config.name
	}

	pub fn src_dir(&self) -> &str {
		&self.config.src_dir
	}

	pub fn dist_file(&self) -> &str {
		&self.config.dist_file
	}

	pub fn subscribe(&self) -> Result<Receiver<Event>> {
		self.event_bus.subscribe()
	}

	/// Runs one full build: derive the enabled preamble blocks, read every
	/// fragment (all reads happen before any write), join everything with
	/// `"\n"`, and atomically replace the artifact.
	pub fn build(&self) -> Result<BuildReport> {
		let mut blocks: Vec<String> = Vec::new();

		// -- Preamble blocks
		if self.config.include_license {
			let (block, lines) = self.license_block()?;
			blocks.push(block);
			self.event_bus.send(BundleEvent::LicenseIncluded { lines })?;
		}
		if self.config.include_header {
			blocks.push(HEADER_LINES.join("\n"));
			self.event_bus.send(BundleEvent::HeaderIncluded)?;
		}

		// -- Read all fragments
		let fragments = self.read_fragments()?;
		let mut fragment_names: Vec<String> = Vec::new();
		for (file_name, content) in fragments {
			self.event_bus.send(BundleEvent::FragmentBundled {
				file_name: file_name.clone(),
				bytes: content.len() as u64,
			})?;
			fragment_names.push(file_name);
			blocks.push(content);
		}

		// -- Assemble and emit
		let data = blocks.join("\n");
		let dist_file = self.dir.join(&self.config.dist_file);
		save_atomic(&dist_file, &data)?;

		self.event_bus.send(BundleEvent::ArtifactWritten {
			path: self.config.dist_file.clone(),
			bytes: data.len() as u64,
		})?;

		// -- Persist the report
		let report = BuildReport {
			artifact: self.config.dist_file.clone(),
			fragments: fragment_names,
			bytes: data.len() as u64,
		};
		save_to_json(self.data_dir()?.join(LAST_BUILD_JSON), &report)?;

		Ok(report)
	}

	pub fn last_report(&self) -> Result<BuildReport> {
		load_from_json(self.data_dir()?.join(LAST_BUILD_JSON))
	}
}

/// Private functions
impl Bundler {
	/// Returns the comment-prefixed license block and its line count.
	///
	/// The last `license_trim_lines` lines of the license file are dropped
	/// (trailing footer/blank lines by convention), and every remaining line
	/// gets the comment prefix, blank lines included.
	fn license_block(&self) -> Result<(String, usize)> {
		let file = self.dir.join(&self.config.license_file);
		if !file.is_file() {
			return Err(Error::MissingLicenseFile(
				file.to_string_lossy().to_string(),
			));
		}
		let content = read_to_string(&file)?;

		let lines: Vec<&str> = content.lines().collect();
		let keep = lines.len().saturating_sub(self.config.license_trim_lines);

		let block = lines[..keep]
			.iter()
			.map(|line| format!("{}{}", self.config.comment_prefix, line))
			.collect::<Vec<_>>()
			.join("\n");

		Ok((block, keep))
	}

	/// Enumerates the direct-children files of the source dir (subdirectories
	/// are silently skipped), sorted lexicographically by file name, and reads
	/// each one fully.
	fn read_fragments(&self) -> Result<Vec<(String, String)>> {
		let src_dir = self.dir.join(&self.config.src_dir);
		if !src_dir.is_dir() {
			return Err(Error::SourceDirNotFound(
				src_dir.to_string_lossy().to_string(),
			));
		}

		let src_globs: Option<Vec<&str>> = self
			.config
			.src_globs
			.as_ref()
			.map(|globs| globs.iter().map(AsRef::as_ref).collect());

		let mut files = list_files(&src_dir, src_globs.as_deref(), None)?;
		files.sort_by(|a, b| a.x_file_name().cmp(b.x_file_name()));

		let mut fragments = Vec::with_capacity(files.len());
		for file in files {
			let content =
				fs::read_to_string(&file).map_err(|e| Error::FragmentRead {
					file: file.to_string_lossy().to_string(),
					cause: e,
				})?;
			fragments.push((file.x_file_name().to_string(), content));
		}

		Ok(fragments)
	}

	fn data_dir(&self) -> Result<PathBuf> {
		let data_dir = self.dir.join(".prwb");
		ensure_dir(&data_dir)?;
		Ok(data_dir)
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn bundler_with(dir: &Path, config_toml: &str) -> Result<Bundler> {
		fs::write(dir.join(PRW_BUNDLE_TOML), config_toml)?;
		Bundler::init_from_dir(dir, None)
	}

	const NO_PREAMBLE: &str = r#"
include_license = false
include_header = false
dist_file = "dist/out.prw"
"#;

	#[test]
	fn test_build_joins_fragments_in_name_order() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		// Created out of name order on purpose.
		fs::write(dir.path().join("src/b.txt"), "beta")?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		let report = bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "alpha\nbeta");
		assert_eq!(report.fragments, ["a.txt", "b.txt"]);
		assert_eq!(report.bytes, 10);
		Ok(())
	}

	#[test]
	fn test_build_skips_subdirectories() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;
		fs::create_dir(dir.path().join("src/nested"))?;
		fs::write(dir.path().join("src/nested/z.txt"), "zeta")?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "alpha");
		Ok(())
	}

	#[test]
	fn test_build_preamble_placement() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;
		fs::write(dir.path().join("LICENSE"), "line1\nline2\nline3\n\n")?;

		let bundler = bundler_with(dir.path(), "dist_file = \"dist/out.prw\"\n")?;
		bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(
			out,
			"// line1\n// line2\n\
			 #xtranslate \\<<obj>\\> => <obj>():New\n\
			 #include \"protheus.ch\"\n\
			 alpha"
		);
		Ok(())
	}

	#[test]
	fn test_build_license_trim_and_prefix() -> Result<()> {
		let dir = TempDir::new()?;
		fs::write(dir.path().join("LICENSE"), "line1\nline2\nline3\n\n")?;

		let bundler = bundler_with(dir.path(), "")?;
		let (block, lines) = bundler.license_block()?;

		assert_eq!(block, "// line1\n// line2");
		assert_eq!(lines, 2);
		Ok(())
	}

	#[test]
	fn test_build_empty_src_no_preambles() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		let report = bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "");
		assert_eq!(report.bytes, 0);
		assert!(report.fragments.is_empty());
		Ok(())
	}

	#[test]
	fn test_build_missing_license_leaves_artifact_untouched() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;
		fs::write(dir.path().join("dist/out.prw"), "previous artifact")?;
		// No LICENSE file, but include_license defaults to true.

		let bundler = bundler_with(dir.path(), "dist_file = \"dist/out.prw\"\n")?;
		let res = bundler.build();

		assert!(matches!(res, Err(Error::MissingLicenseFile(_))));
		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "previous artifact");
		Ok(())
	}

	#[test]
	fn test_build_missing_src_dir() -> Result<()> {
		let dir = TempDir::new()?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		let res = bundler.build();

		assert!(matches!(res, Err(Error::SourceDirNotFound(_))));
		Ok(())
	}

	#[test]
	fn test_build_rerun_is_byte_identical() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;
		fs::write(dir.path().join("src/b.txt"), "beta")?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		bundler.build()?;
		let first = fs::read(dir.path().join("dist/out.prw"))?;
		bundler.build()?;
		let second = fs::read(dir.path().join("dist/out.prw"))?;

		assert_eq!(first, second);
		Ok(())
	}

	#[test]
	fn test_build_overwrites_prior_artifact() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;
		fs::write(
			dir.path().join("dist/out.prw"),
			"unrelated prior content that is much longer than the new one",
		)?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "alpha");
		Ok(())
	}

	#[test]
	fn test_build_src_globs_filter() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.prw"), "alpha")?;
		fs::write(dir.path().join("src/notes.md"), "notes")?;

		let config = r#"
include_license = false
include_header = false
dist_file = "dist/out.prw"
src_globs = ["*.prw"]
"#;
		let bundler = bundler_with(dir.path(), config)?;
		bundler.build()?;

		let out = fs::read_to_string(dir.path().join("dist/out.prw"))?;
		assert_eq!(out, "alpha");
		Ok(())
	}

	#[test]
	fn test_build_saves_report() -> Result<()> {
		let dir = TempDir::new()?;
		fs::create_dir(dir.path().join("src"))?;
		fs::create_dir(dir.path().join("dist"))?;
		fs::write(dir.path().join("src/a.txt"), "alpha")?;

		let bundler = bundler_with(dir.path(), NO_PREAMBLE)?;
		bundler.build()?;

		let report = bundler.last_report()?;
		assert_eq!(report.artifact, "dist/out.prw");
		assert_eq!(report.fragments, ["a.txt"]);
		assert_eq!(report.bytes, 5);
		Ok(())
	}
}

// endregion: --- Tests
