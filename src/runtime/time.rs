//! Wall clock and sleeping.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::RealRuntime;

impl RealRuntime {
    pub(crate) async fn sleep_impl(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }

    pub(crate) fn now_impl(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
