pub mod asana;

use once_cell::sync::Lazy;

/// Shared HTTP client for all API requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .user_agent(concat!("asana-statusbar/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build tuned HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        })
});
