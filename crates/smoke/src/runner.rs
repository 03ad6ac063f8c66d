//! Fixture runner: setup, scenario execution, unconditional teardown.

use smoke_driver::DriverProvider;
use tracing::{debug, error, info, warn};

use crate::config::ScenarioConfig;
use crate::error::SmokeError;
use crate::scenario::{self, Outcome};
use crate::session::BrowserSession;

/// Run lifecycle states.
///
/// `Init → SetupOk → Executing → {Passed | Failed} → TornDown`, with
/// `SetupFailed` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
	Init,
	SetupFailed,
	SetupOk,
	Executing,
	Passed,
	Failed,
	TornDown,
}

/// What a single run produced.
#[derive(Debug)]
pub struct RunReport {
	/// Terminal state: [`RunState::SetupFailed`] or [`RunState::TornDown`].
	pub state: RunState,
	/// Classified outcome, present when every scenario step completed.
	pub outcome: Option<Outcome>,
	/// Fatal error, present when setup or a scenario step failed.
	pub error: Option<SmokeError>,
	/// Whether session teardown ran for this report.
	pub cleanup_attempted: bool,
}

/// Runs one full fixture lifecycle.
///
/// Setup failures abort before the scenario starts. Scenario failures are
/// logged with their source chain and re-signaled wrapped as
/// [`SmokeError::Execution`]. Teardown always runs when a session exists,
/// and teardown failures are logged and suppressed so cleanup can never
/// override the scenario's result.
pub async fn run_scenario(config: &ScenarioConfig, provider: &dyn DriverProvider) -> RunReport {
	let mut state = RunState::Init;

	let session = match BrowserSession::start(config, provider).await {
		Ok(session) => {
			advance(&mut state, RunState::SetupOk);
			session
		}
		Err(err) => {
			error!(target = "smoke", error = %err, "setup failed, scenario will not run");
			advance(&mut state, RunState::SetupFailed);
			return RunReport {
				state,
				outcome: None,
				error: Some(err),
				cleanup_attempted: false,
			};
		}
	};

	advance(&mut state, RunState::Executing);
	let (outcome, error) = match scenario::run_search(&session, config).await {
		Ok(outcome) => {
			let next = match outcome {
				Outcome::Passed => RunState::Passed,
				Outcome::Failed { .. } => RunState::Failed,
			};
			advance(&mut state, next);
			(Some(outcome), None)
		}
		Err(err) => {
			log_failure(&err);
			advance(&mut state, RunState::Failed);
			(
				None,
				Some(SmokeError::Execution {
					source: Box::new(err),
				}),
			)
		}
	};

	tear_down(session).await;
	advance(&mut state, RunState::TornDown);

	RunReport {
		state,
		outcome,
		error,
		cleanup_attempted: true,
	}
}

fn advance(state: &mut RunState, next: RunState) {
	debug!(target = "smoke", from = ?state, to = ?next, "run state");
	*state = next;
}

/// Logs a scenario failure with its full source chain.
fn log_failure(err: &SmokeError) {
	error!(target = "smoke", error = %err, "scenario execution failed");
	let mut source = std::error::Error::source(err);
	while let Some(cause) = source {
		error!(target = "smoke", %cause, "caused by");
		source = cause.source();
	}
}

async fn tear_down(session: BrowserSession) {
	match session.shutdown().await {
		Ok(()) => info!(target = "smoke", "browser closed"),
		Err(err) => warn!(target = "smoke", error = %err, "session teardown failed"),
	}
}
