mod builder;
mod options;
mod wait;

pub use options::LaunchOptions;
use smoke_driver::{DriverProvider, DriverServer};
use thirtyfour::error::{WebDriverError, WebDriverErrorInner};
use thirtyfour::prelude::ElementQueryable;
use thirtyfour::{By, WebDriver, WebElement};
use tracing::warn;
pub use wait::WaitPolicy;

use crate::config::ScenarioConfig;
use crate::error::{Result, SmokeError};

/// Live browser session: one WebDriver connection plus the chromedriver
/// process backing it.
///
/// Exclusively owned by a single run. Teardown consumes the session, so a
/// handle cannot be used after it has been released.
pub struct BrowserSession {
	driver: WebDriver,
	server: DriverServer,
	wait: WaitPolicy,
}

impl BrowserSession {
	/// Acquires a driver, launches the browser, and verifies liveness.
	pub async fn start(config: &ScenarioConfig, provider: &dyn DriverProvider) -> Result<Self> {
		builder::build(config, provider).await
	}

	/// Navigates the session to a URL.
	pub async fn navigate(&self, url: &str) -> Result<()> {
		self.driver.goto(url).await.map_err(|source| SmokeError::Navigation {
			url: url.to_string(),
			source: anyhow::Error::new(source),
		})
	}

	/// Blocks until an element matching the selector is present, bounded by
	/// the explicit wait policy.
	pub async fn wait_for_element(&self, selector: &str) -> Result<WebElement> {
		let condition = format!("presence of element matching {selector:?}");
		self.driver
			.query(By::Css(selector))
			.wait(self.wait.timeout(), self.wait.interval())
			.first()
			.await
			.map_err(|err| match err.into_inner() {
				WebDriverErrorInner::NoSuchElement(_) => self.wait.timed_out(&condition),
				other => WebDriverError::from_inner(other).into(),
			})
	}

	/// Locates an element with a plain lookup, governed by the session-wide
	/// implicit timeout.
	pub async fn find(&self, selector: &str) -> Result<WebElement> {
		self.driver.find(By::Css(selector)).await.map_err(|err| match err.into_inner() {
			WebDriverErrorInner::NoSuchElement(_) => SmokeError::ElementNotFound {
				selector: selector.to_string(),
			},
			other => WebDriverError::from_inner(other).into(),
		})
	}

	/// Blocks until the page title contains the needle, bounded by the
	/// explicit wait policy.
	pub async fn wait_for_title(&self, needle: &str) -> Result<()> {
		let driver = &self.driver;
		let condition = format!("page title to contain {needle:?}");
		self.wait
			.until(&condition, || async move { Ok(driver.title().await?.contains(needle)) })
			.await
	}

	pub async fn title(&self) -> Result<String> {
		Ok(self.driver.title().await?)
	}

	pub async fn current_url(&self) -> Result<String> {
		Ok(self.driver.current_url().await?.to_string())
	}

	/// Quits the browser session and stops the driver process.
	pub async fn shutdown(self) -> Result<()> {
		let BrowserSession { driver, server, .. } = self;
		let quit = driver.quit().await;
		if let Err(err) = server.stop().await {
			warn!(target = "smoke", error = %err, "chromedriver did not stop cleanly");
		}
		Ok(quit?)
	}
}
