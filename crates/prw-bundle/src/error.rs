use crate::event;
use derive_more::From;
use std::io;
use tokio::sync::broadcast;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
	// -- bundler
	MissingLicenseFile(String),
	FragmentRead {
		file: String,
		cause: io::Error,
	},
	OutputWrite {
		file: String,
		cause: io::Error,
	},
	SourceDirNotFound(String),

	// -- utils
	FileNotFound(String),
	FileCannotCreate {
		file: String,
		cause: io::Error,
	},

	// -- Event
	#[from]
	BoadcastSend(broadcast::error::SendError<event::Event>),

	// -- Std
	#[from]
	IO(io::Error),

	// -- Externals
	#[from]
	TomlDe(toml::de::Error),
	#[from]
	SerdeJson(serde_json::Error),
	#[from]
	Glob(globset::Error),
}

// region:    --- Error Boilerplate
impl core::fmt::Display for Error {
	fn fmt(
		&self,
		fmt: &mut core::fmt::Formatter,
	) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}
// endregion: --- Error Boilerplate
