//! End-to-end search smoke scenario over WebDriver.
//!
//! One fixture lifecycle: setup acquires a chromedriver, launches a headless
//! Chrome session and installs the wait policy; execution drives the search
//! flow (navigate, type query, submit, wait for results) and classifies the
//! outcome; teardown releases the session unconditionally.

pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod scenario;
pub mod session;

pub use config::ScenarioConfig;
pub use error::{Result, SmokeError};
pub use runner::{RunReport, RunState, run_scenario};
pub use scenario::Outcome;
pub use session::{BrowserSession, LaunchOptions, WaitPolicy};
