use tracing_subscriber::EnvFilter;

/// Initializes the stderr subscriber for test runs.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
}
