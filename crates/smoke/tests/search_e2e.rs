//! End-to-end search scenario against a real Chrome.
//!
//! The search page is served from a local fixture so the tests need a
//! browser but no outside network. Run with `cargo test -- --ignored`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::Query;
use axum::response::Html;
use axum::routing::get;
use smoke::{Outcome, RunState, ScenarioConfig, SmokeError, run_scenario};
use smoke_driver::SystemDriver;

async fn search_page() -> Html<&'static str> {
	Html(
		r#"<!doctype html>
<html>
<head><title>search</title></head>
<body>
<form action="/search" method="get">
	<input id="text" name="q">
	<button type="submit">Search</button>
</form>
</body>
</html>"#,
	)
}

async fn results_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
	let query = params.get("q").cloned().unwrap_or_default();
	Html(format!(
		"<!doctype html><html><head><title>{query} - results</title></head>\
		 <body><div id=\"results\">{query}</div></body></html>"
	))
}

async fn serve_fixture() -> SocketAddr {
	let app = Router::new()
		.route("/", get(search_page))
		.route("/search", get(results_page));
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	addr
}

fn fixture_config(addr: SocketAddr) -> ScenarioConfig {
	ScenarioConfig {
		search_url: format!("http://{addr}/"),
		..Default::default()
	}
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn search_scenario_passes_end_to_end() {
	smoke::logging::init();
	let addr = serve_fixture().await;

	let report = run_scenario(&fixture_config(addr), &SystemDriver::new()).await;

	assert_eq!(report.state, RunState::TornDown);
	assert!(report.cleanup_attempted);
	if let Some(err) = &report.error {
		panic!("scenario failed: {err}");
	}
	assert_eq!(report.outcome, Some(Outcome::Passed));
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn missing_submit_button_fails_and_still_tears_down() {
	smoke::logging::init();
	let addr = serve_fixture().await;
	let config = ScenarioConfig {
		submit_selector: "button#does-not-exist".to_string(),
		lookup_timeout: Duration::from_secs(2),
		..fixture_config(addr)
	};

	let report = run_scenario(&config, &SystemDriver::new()).await;

	assert_eq!(report.state, RunState::TornDown);
	assert!(report.cleanup_attempted);
	assert!(report.outcome.is_none());
	match report.error {
		Some(SmokeError::Execution { source }) => {
			assert!(
				matches!(*source, SmokeError::ElementNotFound { .. }),
				"got {source:?}"
			);
		}
		other => panic!("expected wrapped execution failure, got {other:?}"),
	}
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn absent_search_input_times_out() {
	smoke::logging::init();
	let addr = serve_fixture().await;
	let config = ScenarioConfig {
		input_selector: "input#never-rendered".to_string(),
		wait_timeout: Duration::from_secs(2),
		lookup_timeout: Duration::from_secs(1),
		..fixture_config(addr)
	};

	let report = run_scenario(&config, &SystemDriver::new()).await;

	assert_eq!(report.state, RunState::TornDown);
	assert!(report.outcome.is_none());
	match report.error {
		Some(SmokeError::Execution { source }) => {
			assert!(matches!(*source, SmokeError::Timeout { .. }), "got {source:?}");
		}
		other => panic!("expected wrapped execution failure, got {other:?}"),
	}
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn sequential_runs_are_independent() {
	smoke::logging::init();
	let addr = serve_fixture().await;
	let config = fixture_config(addr);

	let first = run_scenario(&config, &SystemDriver::new()).await;
	let second = run_scenario(&config, &SystemDriver::new()).await;

	assert_eq!(first.state, RunState::TornDown);
	assert_eq!(second.state, RunState::TornDown);
	assert_eq!(first.outcome, Some(Outcome::Passed));
	assert_eq!(second.outcome, Some(Outcome::Passed));
}
