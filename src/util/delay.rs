//! Platform-neutral async sleep.
//!
//! Browser builds wait on a `setTimeout` future, native builds on the tokio
//! timer. With neither platform feature the wait is skipped.

#![allow(clippy::unused_async)]

use std::time::Duration;

/// Wait for `duration`. A zero duration returns immediately.
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    {
        tokio::time::sleep(duration).await;
    }
    #[cfg(not(any(feature = "native", feature = "hydrate")))]
    {
        let _ = duration;
    }
}
