use smoke_driver::{DriverProvider, DriverServer};
use thirtyfour::WebDriver;
use tracing::{debug, info};

use super::{BrowserSession, LaunchOptions, WaitPolicy};
use crate::config::ScenarioConfig;
use crate::error::{Result, SmokeError};

/// Builds a fully initialized [`BrowserSession`]: driver acquisition,
/// browser launch, wait-policy installation, and a liveness check.
pub(crate) async fn build(config: &ScenarioConfig, provider: &dyn DriverProvider) -> Result<BrowserSession> {
	let binary = provider.resolve().await?;
	let server = DriverServer::start(&binary).await?;

	let options = LaunchOptions::default();
	let caps = options.to_capabilities()?;
	debug!(target = "smoke", server = %server.url(), "opening webdriver session");

	// If the session fails to open, dropping the server kills the driver.
	let driver = WebDriver::new(&server.url(), caps)
		.await
		.map_err(|err| SmokeError::SessionStart(err.to_string()))?;

	let session = BrowserSession {
		driver,
		server,
		wait: WaitPolicy::new(config.wait_timeout, config.poll_interval),
	};

	if let Err(err) = init_session(&session, config).await {
		// Partial handle: release it before surfacing the setup failure.
		let _ = session.shutdown().await;
		return Err(err);
	}

	info!(target = "smoke", "browser session started");
	Ok(session)
}

async fn init_session(session: &BrowserSession, config: &ScenarioConfig) -> Result<()> {
	session.driver.set_implicit_wait_timeout(config.lookup_timeout).await?;
	session.driver.maximize_window().await?;
	// Trivial navigation as a liveness check.
	session.navigate("about:blank").await?;
	Ok(())
}
