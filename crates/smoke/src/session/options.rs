use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities, DesiredCapabilities};

use crate::error::Result;

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
	(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Immutable Chrome launch flags, built once at setup and consumed by
/// session creation.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Launch with the new-style headless mode.
	pub headless: bool,
	/// Window geometry passed via `--window-size`.
	pub window_size: (u32, u32),
	/// Fixed desktop user-agent override.
	pub user_agent: String,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self {
			headless: true,
			window_size: (1920, 1080),
			user_agent: DESKTOP_USER_AGENT.to_string(),
		}
	}
}

impl LaunchOptions {
	/// Full flag set handed to Chrome.
	///
	/// Sandboxing and /dev/shm usage are disabled for container
	/// environments; the Blink automation flag is suppressed so the page
	/// behaves as it would for a regular visitor.
	pub fn args(&self) -> Vec<String> {
		let (width, height) = self.window_size;
		let mut args = Vec::new();
		if self.headless {
			args.push("--headless=new".to_string());
		}
		args.push("--no-sandbox".to_string());
		args.push("--disable-dev-shm-usage".to_string());
		args.push("--disable-gpu".to_string());
		args.push(format!("--window-size={width},{height}"));
		args.push("--disable-extensions".to_string());
		args.push("--remote-allow-origins=*".to_string());
		args.push("--disable-blink-features=AutomationControlled".to_string());
		args.push(format!("--user-agent={}", self.user_agent));
		args
	}

	pub(crate) fn to_capabilities(&self) -> Result<ChromeCapabilities> {
		let mut caps = DesiredCapabilities::chrome();
		for arg in self.args() {
			caps.add_arg(&arg)?;
		}
		Ok(caps)
	}
}
