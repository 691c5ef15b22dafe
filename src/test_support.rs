//! Shared helpers for the in-crate tests.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness; `RUST_LOG` picks the level.
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A token endpoint response in the shape Zoho sends today.
pub fn token_body(access_token: &str, expires_in: i64) -> String {
    format!(
        r#"{{"access_token":"{}","api_domain":"https://www.zohoapis.com","token_type":"Bearer","expires_in":{}}}"#,
        access_token, expires_in
    )
}

/// How many descriptors this process currently holds open on `path`.
#[cfg(target_os = "linux")]
pub fn open_handles(path: &std::path::Path) -> usize {
    let target = match path.canonicalize() {
        Ok(target) => target,
        Err(_) => return 0,
    };

    std::fs::read_dir("/proc/self/fd")
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| std::fs::read_link(entry.path()).ok())
                .filter(|link| *link == target)
                .count()
        })
        .unwrap_or(0)
}
