//! Chromedriver downloads from the Chrome-for-Testing archive.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{DriverError, Result};

const KNOWN_GOOD_VERSIONS_URL: &str =
	"https://googlechromelabs.github.io/chrome-for-testing/known-good-versions-with-downloads.json";

#[derive(Debug, Deserialize)]
struct KnownGoodVersions {
	versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
struct VersionEntry {
	version: String,
	downloads: Downloads,
}

#[derive(Debug, Default, Deserialize)]
struct Downloads {
	#[serde(default)]
	chromedriver: Vec<DownloadTarget>,
}

#[derive(Debug, Clone, Deserialize)]
struct DownloadTarget {
	platform: String,
	url: String,
}

/// Returns the cached driver for a browser major version, if one exists.
pub(crate) fn cached_driver(cache_dir: &Path, major: u32) -> Option<PathBuf> {
	let path = cache_dir.join(format!("chromedriver-{major}")).join(driver_file_name());
	path.exists().then_some(path)
}

/// Downloads the newest chromedriver matching the browser major version and
/// extracts it into the cache directory.
pub(crate) async fn fetch_driver(cache_dir: &Path, major: u32) -> Result<PathBuf> {
	let platform = platform_slug().ok_or_else(|| DriverError::NoDownloadMatch {
		platform: "unsupported platform".to_string(),
		major,
	})?;

	let client = reqwest::Client::new();
	let doc: KnownGoodVersions = client
		.get(KNOWN_GOOD_VERSIONS_URL)
		.send()
		.await
		.and_then(reqwest::Response::error_for_status)
		.map_err(|source| DriverError::Download {
			url: KNOWN_GOOD_VERSIONS_URL.to_string(),
			source,
		})?
		.json()
		.await
		.map_err(|source| DriverError::Download {
			url: KNOWN_GOOD_VERSIONS_URL.to_string(),
			source,
		})?;

	let (version, url) = pick_download(&doc, major, platform).ok_or_else(|| DriverError::NoDownloadMatch {
		platform: platform.to_string(),
		major,
	})?;

	info!(target = "driver", %version, %url, "downloading chromedriver");
	let archive = client
		.get(&url)
		.send()
		.await
		.and_then(reqwest::Response::error_for_status)
		.map_err(|source| DriverError::Download {
			url: url.clone(),
			source,
		})?
		.bytes()
		.await
		.map_err(|source| DriverError::Download {
			url: url.clone(),
			source,
		})?;

	let dest_dir = cache_dir.join(format!("chromedriver-{major}"));
	std::fs::create_dir_all(&dest_dir)?;
	extract_chromedriver(&archive, &dest_dir)
}

fn driver_file_name() -> &'static str {
	if cfg!(windows) { "chromedriver.exe" } else { "chromedriver" }
}

/// Chrome-for-Testing platform identifier for the current target.
fn platform_slug() -> Option<&'static str> {
	if cfg!(all(target_os = "linux", target_arch = "x86_64")) {
		Some("linux64")
	} else if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
		Some("mac-arm64")
	} else if cfg!(all(target_os = "macos", target_arch = "x86_64")) {
		Some("mac-x64")
	} else if cfg!(all(target_os = "windows", target_arch = "x86_64")) {
		Some("win64")
	} else {
		None
	}
}

/// Picks the newest listed build matching the major version and platform.
///
/// The known-good-versions document is ordered oldest to newest.
fn pick_download(doc: &KnownGoodVersions, major: u32, platform: &str) -> Option<(String, String)> {
	doc.versions
		.iter()
		.rev()
		.filter(|entry| {
			entry
				.version
				.split('.')
				.next()
				.and_then(|m| m.parse::<u32>().ok())
				== Some(major)
		})
		.find_map(|entry| {
			entry
				.downloads
				.chromedriver
				.iter()
				.find(|target| target.platform == platform)
				.map(|target| (entry.version.clone(), target.url.clone()))
		})
}

/// Writes the `chromedriver` entry of a downloaded zip into `dest_dir`.
fn extract_chromedriver(archive: &[u8], dest_dir: &Path) -> Result<PathBuf> {
	let mut zip = zip::ZipArchive::new(Cursor::new(archive)).map_err(|e| DriverError::Archive(e.to_string()))?;

	for index in 0..zip.len() {
		let mut entry = zip.by_index(index).map_err(|e| DriverError::Archive(e.to_string()))?;
		let name = entry.name().to_string();
		if name.ends_with('/') || !name.ends_with(driver_file_name()) {
			continue;
		}

		let dest = dest_dir.join(driver_file_name());
		let mut out = std::fs::File::create(&dest)?;
		std::io::copy(&mut entry, &mut out)?;

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755))?;
		}

		return Ok(dest);
	}

	Err(DriverError::Archive("no chromedriver entry in archive".to_string()))
}
