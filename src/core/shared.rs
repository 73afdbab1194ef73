use super::scheduler::HospitalScheduler;
use crate::domain::model::{DispatchOutcome, QueueSnapshot};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle that serialises every operation behind one lock.
///
/// `dispatch_all` holds the lock for the whole greedy loop, so an admission
/// arriving mid-dispatch waits until the pass is finished.
#[derive(Debug, Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<HospitalScheduler>>,
}

impl SharedScheduler {
    pub fn new(scheduler: HospitalScheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    pub async fn enqueue_emergency(
        &self,
        id: i64,
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
        severity: i64,
    ) -> Result<()> {
        self.inner
            .lock()
            .await
            .enqueue_emergency(id, name, age, contact, severity)
    }

    pub async fn enqueue_regular(
        &self,
        id: i64,
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
    ) {
        self.inner
            .lock()
            .await
            .enqueue_regular(id, name, age, contact)
    }

    pub async fn dispatch_all(&self) -> DispatchOutcome {
        self.inner.lock().await.dispatch_all()
    }

    pub async fn release(&self, n: i64) -> Result<u64> {
        self.inner.lock().await.release(n)
    }

    pub async fn snapshot(&self) -> QueueSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn available_units(&self) -> u64 {
        self.inner.lock().await.available_units()
    }

    /// Runs `f` with the lock held, for callers that need several
    /// operations to appear as one.
    pub async fn with_lock<R>(&self, f: impl FnOnce(&mut HospitalScheduler) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}

impl From<HospitalScheduler> for SharedScheduler {
    fn from(scheduler: HospitalScheduler) -> Self {
        Self::new(scheduler)
    }
}
