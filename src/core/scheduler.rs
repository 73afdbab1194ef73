use super::allocator::CapacityAllocator;
use super::queues::AdmissionQueues;
use crate::domain::model::{DispatchOutcome, Patient, QueueSnapshot};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// Owns both queues and the doctor pool; the five operations callers use.
///
/// Every operation takes `&mut self`, so one instance is never observed
/// mid-dispatch. Use [`SharedScheduler`](super::shared::SharedScheduler) to
/// share one across tasks.
#[derive(Debug, Clone)]
pub struct HospitalScheduler {
    queues: AdmissionQueues,
    allocator: CapacityAllocator,
}

impl HospitalScheduler {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::with_units(config.initial_units())
    }

    pub fn with_units(initial_units: u64) -> Self {
        tracing::debug!(initial_units, "Creating hospital scheduler");
        Self {
            queues: AdmissionQueues::new(),
            allocator: CapacityAllocator::new(initial_units),
        }
    }

    pub fn enqueue_emergency(
        &mut self,
        id: i64,
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
        severity: i64,
    ) -> Result<()> {
        // Anything that does not fit a u8 is out of range; the queue rejects 0.
        let severity = u8::try_from(severity).unwrap_or(0);
        let patient = Patient::new(id, name, age, contact).with_severity(severity);
        self.queues.enqueue_emergency(patient)
    }

    pub fn enqueue_regular(
        &mut self,
        id: i64,
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
    ) {
        self.queues.enqueue_regular(Patient::new(id, name, age, contact));
    }

    pub fn dispatch_all(&mut self) -> DispatchOutcome {
        self.allocator.dispatch_all(&mut self.queues)
    }

    pub fn release(&mut self, n: i64) -> Result<u64> {
        self.allocator.release(n).inspect_err(|e| {
            tracing::warn!("Rejected release: {}", e);
        })
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.queues.snapshot()
    }

    pub fn available_units(&self) -> u64 {
        self.allocator.available_units()
    }

    pub fn queues(&self) -> &AdmissionQueues {
        &self.queues
    }
}

impl Default for HospitalScheduler {
    fn default() -> Self {
        Self::new(&crate::config::SchedulerConfig::default())
    }
}
