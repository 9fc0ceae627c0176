//! Shared HTTP client construction for consistent timeout and TLS configuration.

use std::time::Duration;

/// Create a shared HTTP client with standard configuration.
///
/// Config: 30s connect timeout, 120s request timeout, rustls TLS,
/// `swatch/{version}` user-agent.
#[must_use]
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(120))
        .user_agent(concat!("swatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("default HTTP client construction must not fail")
}
