pub mod tracker;

use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared HTTP client for all tracker requests to enable connection pooling.
///
/// Per-request timeouts come from config; this is only the connect ceiling.
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(5)
        .user_agent(concat!("sprintboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});
