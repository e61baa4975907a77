//! Submission seam
//!
//! The controller hands collected [`FormData`] to a [`Submitter`] and waits for
//! it to resolve. The site ships with [`SimulatedSubmitter`], which succeeds
//! after a fixed latency; a real transport can be dropped in without touching
//! the state machine.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One submitted `name=value` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub name: String,
    pub value: String,
}

/// Ordered form payload, as a browser would build it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(FormEntry {
            name: name.into(),
            value: value.into(),
        });
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Deferred-callback scheduler
///
/// Futures are `?Send`: everything runs on the page's single event loop.
#[async_trait(?Send)]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[cfg(feature = "tokio")]
#[async_trait(?Send)]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Trait for submission backends
#[async_trait(?Send)]
pub trait Submitter {
    /// Deliver the form payload; an error moves the form to `Failed`
    async fn submit(&self, data: &FormData) -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Local stand-in for a real endpoint: always succeeds after `latency`
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter<C> {
    clock: C,
    latency: Duration,
}

impl<C: Clock> SimulatedSubmitter<C> {
    pub fn new(clock: C, latency: Duration) -> Self {
        Self { clock, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait(?Send)]
impl<C: Clock> Submitter for SimulatedSubmitter<C> {
    async fn submit(&self, data: &FormData) -> Result<()> {
        tracing::debug!(
            fields = data.len(),
            latency_ms = self.latency.as_millis() as u64,
            "simulating form submission"
        );
        self.clock.sleep(self.latency).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
