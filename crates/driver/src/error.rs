use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Debug, Error)]
pub enum DriverError {
	#[error("no usable chromedriver found; install chromedriver or configure an explicit path")]
	NotFound,

	#[error("no chromedriver download available for {platform} matching browser major version {major}")]
	NoDownloadMatch { platform: String, major: u32 },

	#[error("chromedriver download failed: {url}")]
	Download {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("chromedriver archive was malformed: {0}")]
	Archive(String),

	#[error("failed to spawn chromedriver at {path}")]
	Spawn {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("chromedriver exited during startup with {status}")]
	Exited { status: ExitStatus },

	#[error("chromedriver did not become ready within {ms}ms")]
	Ready { ms: u64 },

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
