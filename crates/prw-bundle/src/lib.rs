// region:    --- Modules

mod bundler;
mod error;
pub mod event;
mod utils;

pub use self::error::{Error, Result};

pub use crate::bundler::*;

// endregion: --- Modules
