use std::time::Duration;

/// Scenario configuration with defaults matching the stock search flow.
///
/// Everything the scenario touches (URL, selectors, query, timeouts) lives
/// here so the same flow can be pointed at another interactive page without
/// code changes.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
	/// Search page opened by the first navigation.
	pub search_url: String,
	/// CSS selector for the search input, waited on with the explicit wait.
	pub input_selector: String,
	/// CSS selector for the submit button, located with the implicit timeout.
	pub submit_selector: String,
	/// Query typed into the search input.
	pub query: String,
	/// Substring expected in the results-page URL.
	pub results_path: String,
	/// Explicit wait bound for scenario conditions.
	pub wait_timeout: Duration,
	/// Session-wide implicit timeout for plain element lookups.
	pub lookup_timeout: Duration,
	/// Poll interval used by the explicit wait.
	pub poll_interval: Duration,
}

impl Default for ScenarioConfig {
	fn default() -> Self {
		Self {
			search_url: "https://www.google.com/".to_string(),
			input_selector: "input#text".to_string(),
			submit_selector: "button[type='submit']".to_string(),
			query: "сказки Пушкина".to_string(),
			results_path: "/search".to_string(),
			wait_timeout: Duration::from_secs(15),
			lookup_timeout: Duration::from_secs(10),
			poll_interval: Duration::from_millis(250),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_reproduce_stock_scenario() {
		let config = ScenarioConfig::default();
		assert_eq!(config.search_url, "https://www.google.com/");
		assert_eq!(config.input_selector, "input#text");
		assert_eq!(config.submit_selector, "button[type='submit']");
		assert_eq!(config.query, "сказки Пушкина");
		assert_eq!(config.results_path, "/search");
		assert_eq!(config.wait_timeout, Duration::from_secs(15));
		assert_eq!(config.lookup_timeout, Duration::from_secs(10));
	}
}
