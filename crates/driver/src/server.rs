//! Managed chromedriver process.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::error::{DriverError, Result};

const READY_DEADLINE: Duration = Duration::from_secs(10);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A chromedriver child process bound to an ephemeral port.
///
/// The child is spawned with `kill_on_drop`, so a server that is dropped
/// without an explicit [`DriverServer::stop`] still takes the process down.
pub struct DriverServer {
	child: Child,
	port: u16,
}

impl DriverServer {
	/// Spawns chromedriver and waits until its status endpoint reports ready.
	pub async fn start(binary: &Path) -> Result<Self> {
		Self::start_with_deadline(binary, READY_DEADLINE).await
	}

	pub(crate) async fn start_with_deadline(binary: &Path, deadline: Duration) -> Result<Self> {
		let port = free_port()?;
		debug!(target = "driver", binary = %binary.display(), port, "starting chromedriver");

		let child = Command::new(binary)
			.arg(format!("--port={port}"))
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.kill_on_drop(true)
			.spawn()
			.map_err(|source| DriverError::Spawn {
				path: binary.to_path_buf(),
				source,
			})?;

		let mut server = Self { child, port };
		server.wait_ready(deadline).await?;
		info!(target = "driver", port, "chromedriver ready");
		Ok(server)
	}

	/// Base URL of the WebDriver endpoint.
	pub fn url(&self) -> String {
		format!("http://127.0.0.1:{}", self.port)
	}

	async fn wait_ready(&mut self, deadline: Duration) -> Result<()> {
		let status_url = format!("{}/status", self.url());
		let client = reqwest::Client::new();
		let started = Instant::now();

		loop {
			if let Some(status) = self.child.try_wait()? {
				return Err(DriverError::Exited { status });
			}

			if let Ok(response) = client.get(&status_url).send().await {
				if let Ok(body) = response.json::<serde_json::Value>().await {
					if body["value"]["ready"].as_bool().unwrap_or(false) {
						return Ok(());
					}
				}
			}

			if started.elapsed() >= deadline {
				return Err(DriverError::Ready {
					ms: deadline.as_millis() as u64,
				});
			}
			tokio::time::sleep(READY_POLL_INTERVAL).await;
		}
	}

	/// Terminates the child process and reaps it.
	pub async fn stop(mut self) -> Result<()> {
		if let Err(err) = self.child.start_kill() {
			// InvalidInput means the child already exited.
			if err.kind() != std::io::ErrorKind::InvalidInput {
				return Err(err.into());
			}
		}
		self.child.wait().await?;
		debug!(target = "driver", port = self.port, "chromedriver stopped");
		Ok(())
	}
}

fn free_port() -> Result<u16> {
	let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
	Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
	use std::fs;
	#[cfg(unix)]
	use std::os::unix::fs::PermissionsExt;
	use std::path::Path;

	use tempfile::TempDir;

	use super::*;

	#[cfg(unix)]
	fn write_mock_binary(path: &Path, body: &str) {
		let script = format!("#!/bin/sh\n{}\n", body);
		fs::write(path, script).unwrap();
		let mut perms = fs::metadata(path).unwrap().permissions();
		perms.set_mode(0o755);
		fs::set_permissions(path, perms).unwrap();
	}

	#[tokio::test]
	async fn start_fails_for_missing_binary() {
		let err = DriverServer::start(Path::new("/definitely/missing/chromedriver"))
			.await
			.err()
			.unwrap();
		assert!(matches!(err, DriverError::Spawn { .. }));
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn start_reports_child_that_exits_immediately() {
		let temp = TempDir::new().unwrap();
		let binary = temp.path().join("chromedriver");
		write_mock_binary(&binary, "exit 3");

		let err = DriverServer::start_with_deadline(&binary, Duration::from_secs(2))
			.await
			.err()
			.unwrap();
		assert!(matches!(err, DriverError::Exited { .. }), "got {err:?}");
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn start_times_out_when_child_never_listens() {
		let temp = TempDir::new().unwrap();
		let binary = temp.path().join("chromedriver");
		write_mock_binary(&binary, "sleep 30");

		let err = DriverServer::start_with_deadline(&binary, Duration::from_millis(300))
			.await
			.err()
			.unwrap();
		assert!(matches!(err, DriverError::Ready { ms: 300 }), "got {err:?}");
	}
}
