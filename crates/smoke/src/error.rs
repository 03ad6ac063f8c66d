use thiserror::Error;
use thirtyfour::error::WebDriverError;

pub type Result<T> = std::result::Result<T, SmokeError>;

#[derive(Debug, Error)]
pub enum SmokeError {
	/// Driver resolution or driver-process startup failed. Fatal; the
	/// scenario never starts.
	#[error("driver acquisition failed: {0}")]
	Acquisition(#[from] smoke_driver::DriverError),

	#[error("browser session failed to start: {0}")]
	SessionStart(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// Wrapper re-signaled by the runner for any failure during scenario
	/// steps, so the test framework sees a single execution-failure class.
	#[error("scenario execution failed: {source}")]
	Execution {
		#[source]
		source: Box<SmokeError>,
	},

	#[error(transparent)]
	WebDriver(#[from] WebDriverError),
}
