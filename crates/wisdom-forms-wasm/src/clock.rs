//! Browser timer clock

use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wisdom_forms::Clock;

/// `setTimeout`-backed clock for the simulated submitter
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerClock;

#[async_trait(?Send)]
impl Clock for TimerClock {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
