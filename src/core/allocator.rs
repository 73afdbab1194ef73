use super::queues::AdmissionQueues;
use crate::domain::model::{AssignmentRecord, DispatchOutcome, DispatchStatus};
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::validate_non_negative;

/// Counter of free doctors and the dispatch loop that spends them.
#[derive(Debug, Clone)]
pub struct CapacityAllocator {
    available_units: u64,
}

impl CapacityAllocator {
    pub fn new(initial_units: u64) -> Self {
        Self {
            available_units: initial_units,
        }
    }

    pub fn available_units(&self) -> u64 {
        self.available_units
    }

    /// Returns `n` doctors to the pool and reports the new total.
    ///
    /// There is no upper bound on the pool. A negative `n` is rejected and
    /// leaves the counter untouched.
    pub fn release(&mut self, n: i64) -> Result<u64> {
        let released = validate_non_negative("release_count", n)?;
        let total = self.available_units.checked_add(released).ok_or_else(|| {
            SchedulerError::invalid_argument("release_count", n, "unit counter would overflow")
        })?;

        self.available_units = total;
        tracing::info!(released, available = total, "Doctors released");
        Ok(total)
    }

    /// Greedy exhaustion loop: keeps assigning doctors until either the pool
    /// or both queues run dry. Emergency patients are always taken before
    /// regular ones.
    ///
    /// This is not a one-patient-per-call scheduler; a single call may
    /// empty the queues.
    pub fn dispatch_all(&mut self, queues: &mut AdmissionQueues) -> DispatchOutcome {
        if self.available_units == 0 {
            tracing::info!("No doctors are currently available");
            return DispatchOutcome {
                assignments: Vec::new(),
                status: DispatchStatus::AllBusy,
                remaining_units: 0,
            };
        }

        let mut assignments = Vec::new();
        while self.available_units > 0 {
            let Some((patient, source)) = queues.take_next() else {
                tracing::info!("No patients in the queue");
                break;
            };

            self.available_units -= 1;
            tracing::debug!(
                patient_id = patient.id,
                source = %source,
                remaining = self.available_units,
                "Assigned doctor"
            );
            assignments.push(AssignmentRecord::new(patient, source));
        }

        if self.available_units == 0 {
            tracing::info!("All doctors are currently busy");
        }

        let status = if assignments.is_empty() {
            DispatchStatus::NoPatients
        } else {
            DispatchStatus::AssignedSome
        };

        tracing::info!(
            assigned = assignments.len(),
            remaining = self.available_units,
            status = %status,
            "Dispatch finished"
        );

        DispatchOutcome {
            assignments,
            status,
            remaining_units: self.available_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Patient, QueueKind};

    fn queues_with(emergency: &[(i64, u8)], regular: &[i64]) -> AdmissionQueues {
        let mut queues = AdmissionQueues::new();
        for &(id, severity) in emergency {
            queues
                .enqueue_emergency(Patient::new(id, "E", 40, "c").with_severity(severity))
                .unwrap();
        }
        for &id in regular {
            queues.enqueue_regular(Patient::new(id, "R", 40, "c"));
        }
        queues
    }

    #[test]
    fn test_release_adds_units() {
        let mut allocator = CapacityAllocator::new(1);
        assert_eq!(allocator.release(4).unwrap(), 5);
        assert_eq!(allocator.release(0).unwrap(), 5);
        assert_eq!(allocator.available_units(), 5);
    }

    #[test]
    fn test_release_negative_is_rejected() {
        let mut allocator = CapacityAllocator::new(3);
        let err = allocator.release(-1).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidArgument { .. }));
        assert_eq!(allocator.available_units(), 3);
    }

    #[test]
    fn test_release_overflow_is_rejected() {
        let mut allocator = CapacityAllocator::new(u64::MAX);
        assert!(allocator.release(1).is_err());
        assert_eq!(allocator.available_units(), u64::MAX);
    }

    #[test]
    fn test_dispatch_stops_when_units_run_out() {
        let mut queues = queues_with(&[(1, 3), (2, 9)], &[3]);
        let mut allocator = CapacityAllocator::new(2);

        let outcome = allocator.dispatch_all(&mut queues);
        let served: Vec<(i64, QueueKind)> = outcome
            .assignments
            .iter()
            .map(|a| (a.patient.id, a.source))
            .collect();

        assert_eq!(
            served,
            vec![(2, QueueKind::Emergency), (1, QueueKind::Emergency)]
        );
        assert_eq!(outcome.status, DispatchStatus::AssignedSome);
        assert!(outcome.units_exhausted());
        assert_eq!(allocator.available_units(), 0);
        assert_eq!(queues.regular_len(), 1);
    }

    #[test]
    fn test_dispatch_falls_through_to_regular() {
        let mut queues = queues_with(&[(1, 5)], &[2, 3]);
        let mut allocator = CapacityAllocator::new(5);

        let outcome = allocator.dispatch_all(&mut queues);
        let ids: Vec<i64> = outcome.assignments.iter().map(|a| a.patient.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(outcome.remaining_units, 2);
        assert!(queues.is_empty());
    }

    #[test]
    fn test_dispatch_with_no_units() {
        let mut queues = queues_with(&[(1, 5)], &[2]);
        let mut allocator = CapacityAllocator::new(0);

        let outcome = allocator.dispatch_all(&mut queues);
        assert_eq!(outcome.status, DispatchStatus::AllBusy);
        assert!(outcome.assignments.is_empty());
        assert_eq!(queues.emergency_len(), 1);
        assert_eq!(queues.regular_len(), 1);
    }

    #[test]
    fn test_dispatch_with_no_patients() {
        let mut queues = AdmissionQueues::new();
        let mut allocator = CapacityAllocator::new(5);

        let outcome = allocator.dispatch_all(&mut queues);
        assert_eq!(outcome.status, DispatchStatus::NoPatients);
        assert_eq!(outcome.assigned_count(), 0);
        assert_eq!(allocator.available_units(), 5);
    }
}
