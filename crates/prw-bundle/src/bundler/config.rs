use serde::Deserialize;

/// Bundle configuration, loaded from `prw-bundle.toml` in the project dir.
///
/// Every field has a default matching the historical build script, so an
/// empty file (or one with only overrides) is a valid config.
#[derive(Debug, Deserialize)]
pub(super) struct Config {
	#[serde(default = "default_name")]
	pub name: String,
	#[serde(default = "default_src_dir")]
	pub src_dir: String,
	#[serde(default = "default_dist_file")]
	pub dist_file: String,
	#[serde(default = "default_true")]
	pub include_license: bool,
	#[serde(default = "default_true")]
	pub include_header: bool,
	#[serde(default = "default_license_file")]
	pub license_file: String,
	#[serde(default = "default_comment_prefix")]
	pub comment_prefix: String,
	#[serde(default = "default_license_trim_lines")]
	pub license_trim_lines: usize,
	pub src_globs: Option<Vec<String>>,
}

// region:    --- Defaults

fn default_name() -> String {
	"prw-bundle".to_string()
}

fn default_src_dir() -> String {
	"src".to_string()
}

fn default_dist_file() -> String {
	"dist/DataStructures.prw".to_string()
}

fn default_true() -> bool {
	true
}

fn default_license_file() -> String {
	"LICENSE".to_string()
}

fn default_comment_prefix() -> String {
	"// ".to_string()
}

fn default_license_trim_lines() -> usize {
	2
}

// endregion: --- Defaults

// region:    --- Tests


// endregion: --- Tests
