//! Periodic self-ping
//!
//! Free-tier hosts put idle services to sleep. A background task requests the
//! public health URL on a fixed interval so the service keeps receiving
//! traffic. Failures are logged and otherwise ignored.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Interval between pings
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Spawn the ping loop; the first ping fires one `period` after start
pub fn spawn_keepalive(url: String, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                error!("[healthz] Keepalive disabled, HTTP client failed: {}", e);
                return;
            }
        };

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval() yields immediately on the first tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match client.get(&url).send().await {
                Ok(response) => info!("[healthz] Ping success: {}", response.status().as_u16()),
                Err(e) => warn!("[healthz] Ping failed: {}", e),
            }
        }
    })
}
