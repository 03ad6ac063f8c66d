//! Version probing for browser and driver binaries.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Runs `<binary> --version` and parses the leading major version number.
///
/// Returns `None` when the binary cannot be executed or prints nothing
/// parseable; callers treat that as "version unknown" rather than an error.
pub(crate) async fn probe_major(binary: &Path) -> Option<u32> {
	let output = Command::new(binary).arg("--version").output().await.ok()?;
	if !output.status.success() {
		return None;
	}
	parse_major(&String::from_utf8_lossy(&output.stdout))
}

/// Checks that a binary responds to `--version` with a zero exit status.
pub(crate) async fn is_runnable(binary: &Path) -> bool {
	Command::new(binary)
		.arg("--version")
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.await
		.map(|status| status.success())
		.unwrap_or(false)
}

/// Extracts the first integer from a version line.
///
/// Handles `ChromeDriver 120.0.6099.109 (...)` and
/// `Google Chrome 120.0.6099.109` alike.
pub(crate) fn parse_major(version_line: &str) -> Option<u32> {
	version_line
		.split(|c: char| !c.is_ascii_digit())
		.find(|part| !part.is_empty())?
		.parse()
		.ok()
}
