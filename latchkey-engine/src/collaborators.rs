//! External sync collaborators.
//!
//! The two long-running operations (inbound refresh, outbound publish) are
//! gated by the sync state machines and performed by these trait objects.
//! A real deployment substitutes network-backed implementations; the
//! simulated ones reproduce the fixed-delay stand-ins the desk currently
//! runs with, completing with no result.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use latchkey_core::{Article, Batch};
use tokio::time::sleep;

/// Upstream annotation agent: the inbound refresh boundary.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Fetch the latest batch, if a new one is available.
    ///
    /// `Ok(None)` means the refresh completed with nothing new. An `Err`
    /// drives the inbound machine to `Offline`.
    async fn fetch_latest(&self) -> Result<Option<Batch>>;
}

/// Downstream assembly desk: the outbound publish boundary.
#[async_trait]
pub trait PublishSink: Send + Sync {
    /// Deliver the approved articles. An `Err` drives the outbound machine
    /// to `Error`.
    async fn publish(&self, articles: &[Article]) -> Result<()>;
}

/// Simulated annotation agent: completes after a fixed delay with no new
/// articles.
pub struct SimulatedAgent {
    delay: Duration,
}

impl SimulatedAgent {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnnotationSource for SimulatedAgent {
    async fn fetch_latest(&self) -> Result<Option<Batch>> {
        sleep(self.delay).await;
        Ok(None)
    }
}

/// Simulated assembly desk: accepts everything after a fixed delay.
pub struct SimulatedAssembly {
    delay: Duration,
}

impl SimulatedAssembly {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PublishSink for SimulatedAssembly {
    async fn publish(&self, _articles: &[Article]) -> Result<()> {
        sleep(self.delay).await;
        Ok(())
    }
}
