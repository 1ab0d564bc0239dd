use std::time::Duration;

use reqwest::Client;

const APP_USER_AGENT: &str = "MClaunch/1.1";

/// Shared HTTP client with explicit deadlines.
///
/// A stalled manifest fetch would otherwise hang the install worker
/// indefinitely, so every request carries a connect and overall timeout.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(300))
        .build()
}
