//! The search scenario: the scripted interaction sequence and its outcome.

use tracing::{info, warn};

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::session::BrowserSession;

/// Classification of a completed scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// The results page loaded at the expected path.
	Passed,
	/// The flow completed but landed on an unexpected URL.
	Failed { url: String },
}

/// Drives the search flow: navigate, type the query, submit, wait for the
/// results page, and classify where the browser ended up.
///
/// Every step is a suspension point bounded by the session's wait policy or
/// the implicit lookup timeout; the first failing step aborts the scenario.
pub async fn run_search(session: &BrowserSession, config: &ScenarioConfig) -> Result<Outcome> {
	info!(target = "smoke", url = %config.search_url, "starting search scenario");

	session.navigate(&config.search_url).await?;
	info!(target = "smoke", title = %session.title().await?, "search page opened");

	let input = session.wait_for_element(&config.input_selector).await?;
	info!(target = "smoke", selector = %config.input_selector, "search input located");

	input.send_keys(&config.query).await?;
	info!(target = "smoke", query = %config.query, "query entered");

	let button = session.find(&config.submit_selector).await?;
	button.click().await?;
	info!(target = "smoke", selector = %config.submit_selector, "submit clicked");

	session.wait_for_title(&config.query).await?;
	info!(target = "smoke", title = %session.title().await?, "results loaded");

	let url = session.current_url().await?;
	let outcome = classify(&url, &config.results_path);
	match &outcome {
		Outcome::Passed => info!(target = "smoke", %url, "PASS - results page loaded"),
		Outcome::Failed { .. } => warn!(target = "smoke", %url, "FAIL - unexpected results url"),
	}
	Ok(outcome)
}

/// Classifies the landing URL by a single results-path substring check.
pub(crate) fn classify(url: &str, results_path: &str) -> Outcome {
	if url.contains(results_path) {
		Outcome::Passed
	} else {
		Outcome::Failed { url: url.to_string() }
	}
}
