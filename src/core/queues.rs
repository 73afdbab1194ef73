use super::priority_queue::{OrderedIter, PriorityQueue};
use crate::domain::model::{validate_severity, Patient, QueueKind, QueueSnapshot};
use crate::utils::error::{Result, SchedulerError};
use std::collections::{vec_deque, VecDeque};

fn severity_key(patient: &Patient) -> u8 {
    patient.severity.unwrap_or(0)
}

/// The two waiting lines: emergency (highest severity first, ties by
/// arrival) and regular (strict FIFO).
#[derive(Debug, Clone)]
pub struct AdmissionQueues {
    emergency: PriorityQueue<Patient, u8>,
    regular: VecDeque<Patient>,
}

impl AdmissionQueues {
    pub fn new() -> Self {
        Self {
            emergency: PriorityQueue::new(severity_key),
            regular: VecDeque::new(),
        }
    }

    /// Rejects patients without a severity or with one outside 1..=10.
    pub fn enqueue_emergency(&mut self, patient: Patient) -> Result<()> {
        let severity = patient
            .severity
            .ok_or_else(|| {
                SchedulerError::invalid_argument(
                    "severity",
                    "none",
                    "emergency patients require a severity",
                )
            })
            .and_then(|severity| validate_severity(i64::from(severity)))
            .inspect_err(|e| {
                tracing::warn!(
                    patient_id = patient.id,
                    "Rejected emergency admission: {}",
                    e
                );
            })?;

        tracing::info!(
            patient_id = patient.id,
            severity,
            "Emergency patient added to queue"
        );
        self.emergency.push(patient);
        Ok(())
    }

    pub fn enqueue_regular(&mut self, mut patient: Patient) {
        patient.severity = None;
        tracing::info!(patient_id = patient.id, "Regular patient added to queue");
        self.regular.push_back(patient);
    }

    pub fn peek_next_emergency(&self) -> Result<&Patient> {
        self.emergency.peek().ok_or(SchedulerError::EmptyQueue {
            queue: QueueKind::Emergency,
        })
    }

    pub fn pop_next_emergency(&mut self) -> Result<Patient> {
        self.emergency.pop().ok_or(SchedulerError::EmptyQueue {
            queue: QueueKind::Emergency,
        })
    }

    pub fn peek_next_regular(&self) -> Result<&Patient> {
        self.regular.front().ok_or(SchedulerError::EmptyQueue {
            queue: QueueKind::Regular,
        })
    }

    pub fn pop_next_regular(&mut self) -> Result<Patient> {
        self.regular.pop_front().ok_or(SchedulerError::EmptyQueue {
            queue: QueueKind::Regular,
        })
    }

    pub fn is_emergency_empty(&self) -> bool {
        self.emergency.is_empty()
    }

    pub fn is_regular_empty(&self) -> bool {
        self.regular.is_empty()
    }

    pub fn emergency_len(&self) -> usize {
        self.emergency.len()
    }

    pub fn regular_len(&self) -> usize {
        self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_emergency_empty() && self.is_regular_empty()
    }

    /// Removes the patient who should be served next, emergency first.
    ///
    /// Returns `None` when both queues are empty; dispatch treats that as a
    /// status rather than an error.
    pub(crate) fn take_next(&mut self) -> Option<(Patient, QueueKind)> {
        if let Some(patient) = self.emergency.pop() {
            return Some((patient, QueueKind::Emergency));
        }
        self.regular
            .pop_front()
            .map(|patient| (patient, QueueKind::Regular))
    }

    pub fn snapshot_emergency(&self) -> OrderedIter<'_, Patient, u8> {
        self.emergency.iter_ordered()
    }

    pub fn snapshot_regular(&self) -> vec_deque::Iter<'_, Patient> {
        self.regular.iter()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            emergency: self.snapshot_emergency().cloned().collect(),
            regular: self.snapshot_regular().cloned().collect(),
        }
    }
}

impl Default for AdmissionQueues {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emergency(id: i64, severity: u8) -> Patient {
        Patient::new(id, format!("E{}", id), 50, "555-0000").with_severity(severity)
    }

    fn regular(id: i64) -> Patient {
        Patient::new(id, format!("R{}", id), 30, "555-1111")
    }

    #[test]
    fn test_emergency_orders_by_severity() {
        let mut queues = AdmissionQueues::new();
        for (id, severity) in [(1, 3), (2, 9), (3, 5), (4, 9), (5, 1)] {
            queues.enqueue_emergency(emergency(id, severity)).unwrap();
        }

        assert_eq!(queues.peek_next_emergency().unwrap().id, 2);
        let ids: Vec<i64> = std::iter::from_fn(|| queues.pop_next_emergency().ok())
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn test_regular_is_fifo() {
        let mut queues = AdmissionQueues::new();
        for id in [10, 4, 7] {
            queues.enqueue_regular(regular(id));
        }

        assert_eq!(queues.peek_next_regular().unwrap().id, 10);
        assert_eq!(queues.pop_next_regular().unwrap().id, 10);
        assert_eq!(queues.pop_next_regular().unwrap().id, 4);
        assert_eq!(queues.pop_next_regular().unwrap().id, 7);
        assert!(queues.is_regular_empty());
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queues = AdmissionQueues::new();
        assert!(matches!(
            queues.peek_next_emergency(),
            Err(SchedulerError::EmptyQueue {
                queue: QueueKind::Emergency
            })
        ));
        assert!(matches!(
            queues.pop_next_regular(),
            Err(SchedulerError::EmptyQueue {
                queue: QueueKind::Regular
            })
        ));
        assert!(queues.take_next().is_none());
    }

    #[test]
    fn test_emergency_severity_is_checked() {
        let mut queues = AdmissionQueues::new();
        assert!(queues.enqueue_emergency(emergency(1, 0)).is_err());
        assert!(queues.enqueue_emergency(emergency(2, 11)).is_err());
        assert!(queues.enqueue_emergency(regular(3)).is_err());
        assert!(queues.is_emergency_empty());
    }

    #[test]
    fn test_regular_drops_severity() {
        let mut queues = AdmissionQueues::new();
        queues.enqueue_regular(regular(1).with_severity(6));
        assert_eq!(queues.peek_next_regular().unwrap().severity, None);
    }

    #[test]
    fn test_take_next_prefers_emergency() {
        let mut queues = AdmissionQueues::new();
        queues.enqueue_regular(regular(1));
        queues.enqueue_emergency(emergency(2, 2)).unwrap();

        assert_eq!(queues.take_next().map(|(p, k)| (p.id, k)), Some((2, QueueKind::Emergency)));
        assert_eq!(queues.take_next().map(|(p, k)| (p.id, k)), Some((1, QueueKind::Regular)));
        assert!(queues.is_empty());
    }

    #[test]
    fn test_snapshot_leaves_queues_intact() {
        let mut queues = AdmissionQueues::new();
        queues.enqueue_emergency(emergency(1, 4)).unwrap();
        queues.enqueue_emergency(emergency(2, 8)).unwrap();
        queues.enqueue_regular(regular(3));
        queues.enqueue_regular(regular(4));

        let snapshot = queues.snapshot();
        let emergency_ids: Vec<i64> = snapshot.emergency.iter().map(|p| p.id).collect();
        let regular_ids: Vec<i64> = snapshot.regular.iter().map(|p| p.id).collect();
        assert_eq!(emergency_ids, vec![2, 1]);
        assert_eq!(regular_ids, vec![3, 4]);

        // Restartable: a second pass sees the same order.
        let again: Vec<i64> = queues.snapshot_emergency().map(|p| p.id).collect();
        assert_eq!(again, emergency_ids);

        assert_eq!(queues.emergency_len(), 2);
        assert_eq!(queues.regular_len(), 2);
    }
}
