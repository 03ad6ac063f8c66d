//! Driver binary resolution.
//!
//! Follows the same approach as Selenium Manager: find a chromedriver
//! whose major version matches the installed browser, downloading one into
//! a local cache when nothing suitable is on `PATH`.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::download;
use crate::error::{DriverError, Result};
use crate::version::{is_runnable, probe_major};

/// Capability to provide a runnable chromedriver binary.
///
/// Injected into session setup so tests can substitute a stub.
#[async_trait]
pub trait DriverProvider: Send + Sync {
	async fn resolve(&self) -> Result<PathBuf>;
}

/// Production resolver backed by `PATH`, the download cache, and the
/// Chrome-for-Testing archive.
#[derive(Debug, Clone)]
pub struct SystemDriver {
	driver_path: Option<PathBuf>,
	browser_path: Option<PathBuf>,
	cache_dir: PathBuf,
}

impl SystemDriver {
	pub fn new() -> Self {
		let cache_dir = dirs::cache_dir()
			.unwrap_or_else(std::env::temp_dir)
			.join("smoke-driver");
		Self {
			driver_path: None,
			browser_path: None,
			cache_dir,
		}
	}

	/// Sets an explicit chromedriver binary, consulted before discovery.
	pub fn with_driver_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.driver_path = Some(path.into());
		self
	}

	/// Sets an explicit browser binary used for version matching.
	pub fn with_browser_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.browser_path = Some(path.into());
		self
	}

	async fn browser_major(&self) -> Option<u32> {
		let binary = match &self.browser_path {
			Some(path) => path.clone(),
			None => find_browser()?,
		};
		let major = probe_major(&binary).await;
		debug!(target = "driver", browser = %binary.display(), major, "probed browser version");
		major
	}
}

impl Default for SystemDriver {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl DriverProvider for SystemDriver {
	async fn resolve(&self) -> Result<PathBuf> {
		if let Some(path) = &self.driver_path {
			if is_runnable(path).await {
				return Ok(path.clone());
			}
			warn!(
				target = "driver",
				path = %path.display(),
				"configured chromedriver is not runnable, falling back to discovery"
			);
		}

		let browser_major = self.browser_major().await;

		let path_driver = which::which("chromedriver").ok();
		if let Some(path) = &path_driver {
			if is_runnable(path).await {
				match (browser_major, probe_major(path).await) {
					(Some(browser), Some(driver)) if browser != driver => {
						warn!(
							target = "driver",
							path = %path.display(),
							driver,
							browser,
							"chromedriver on PATH does not match browser major version"
						);
					}
					_ => return Ok(path.clone()),
				}
			}
		}

		if let Some(major) = browser_major {
			if let Some(cached) = download::cached_driver(&self.cache_dir, major) {
				if is_runnable(&cached).await {
					debug!(target = "driver", path = %cached.display(), "using cached chromedriver");
					return Ok(cached);
				}
			}
			match download::fetch_driver(&self.cache_dir, major).await {
				Ok(path) => return Ok(path),
				Err(err) => warn!(target = "driver", error = %err, "chromedriver download failed"),
			}
		}

		// A version-mismatched PATH driver still beats nothing.
		if let Some(path) = path_driver {
			if is_runnable(&path).await {
				return Ok(path);
			}
		}

		Err(DriverError::NotFound)
	}
}

/// Locates the browser binary: `PATH` names first, then well-known
/// install locations.
fn find_browser() -> Option<PathBuf> {
	const PATH_NAMES: &[&str] = &[
		"google-chrome",
		"google-chrome-stable",
		"chromium",
		"chromium-browser",
		"chrome",
	];
	for name in PATH_NAMES {
		if let Ok(path) = which::which(name) {
			return Some(path);
		}
	}

	#[cfg(target_os = "macos")]
	const COMMON_LOCATIONS: &[&str] = &[
		"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
		"/Applications/Chromium.app/Contents/MacOS/Chromium",
	];
	#[cfg(not(target_os = "macos"))]
	const COMMON_LOCATIONS: &[&str] = &["/usr/bin/google-chrome", "/opt/google/chrome/chrome"];

	COMMON_LOCATIONS.iter().map(PathBuf::from).find(|path| path.exists())
}
