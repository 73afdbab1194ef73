use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::validate_range;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 10;

/// A patient waiting for a doctor.
///
/// `severity` is only meaningful for emergency admissions; regular patients
/// carry `None`. Ids are caller-supplied and duplicates are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub severity: Option<u8>,
}

impl Patient {
    pub fn new(id: i64, name: impl Into<String>, age: u32, contact: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            contact: contact.into(),
            severity: None,
        }
    }

    pub fn with_severity(mut self, severity: u8) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// Checks a caller-supplied severity and narrows it to the stored type.
pub fn validate_severity(severity: i64) -> Result<u8> {
    validate_range(
        "severity",
        severity,
        i64::from(MIN_SEVERITY),
        i64::from(MAX_SEVERITY),
    )?;
    u8::try_from(severity)
        .map_err(|_| SchedulerError::invalid_argument("severity", severity, "out of range"))
}

/// Which queue a patient was admitted to. Doubles as the unit-source tag
/// on assignment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    Emergency,
    Regular,
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Emergency => write!(f, "emergency"),
            QueueKind::Regular => write!(f, "regular"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub patient: Patient,
    pub source: QueueKind,
    pub assigned_at: DateTime<Utc>,
}

impl AssignmentRecord {
    pub fn new(patient: Patient, source: QueueKind) -> Self {
        Self {
            patient,
            source,
            assigned_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchStatus {
    /// At least one patient received a doctor.
    AssignedSome,
    /// Doctors were free but nobody was waiting.
    NoPatients,
    /// No doctor was free when dispatch started.
    AllBusy,
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStatus::AssignedSome => write!(f, "assigned-some"),
            DispatchStatus::NoPatients => write!(f, "no-patients"),
            DispatchStatus::AllBusy => write!(f, "all-busy"),
        }
    }
}

/// Result of one greedy dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub assignments: Vec<AssignmentRecord>,
    pub status: DispatchStatus,
    pub remaining_units: u64,
}

impl DispatchOutcome {
    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    /// True when the pass stopped because capacity ran out.
    pub fn units_exhausted(&self) -> bool {
        self.remaining_units == 0
    }
}

/// Copy of both queues in the order they would be served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub emergency: Vec<Patient>,
    pub regular: Vec<Patient>,
}

impl QueueSnapshot {
    pub fn total(&self) -> usize {
        self.emergency.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_builder() {
        let patient = Patient::new(7, "Grace", 41, "555-0101").with_severity(8);
        assert_eq!(patient.id, 7);
        assert_eq!(patient.name, "Grace");
        assert_eq!(patient.age, 41);
        assert_eq!(patient.contact, "555-0101");
        assert_eq!(patient.severity, Some(8));

        let regular = Patient::new(8, "Linus", 30, "555-0102");
        assert_eq!(regular.severity, None);
    }

    #[test]
    fn test_validate_severity() {
        assert_eq!(validate_severity(1).unwrap(), 1);
        assert_eq!(validate_severity(10).unwrap(), 10);
        assert!(validate_severity(0).is_err());
        assert!(validate_severity(11).is_err());
        assert!(validate_severity(-3).is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&DispatchStatus::AssignedSome).unwrap();
        assert_eq!(json, "\"assigned-some\"");
        assert_eq!(DispatchStatus::AllBusy.to_string(), "all-busy");
        assert_eq!(QueueKind::Emergency.to_string(), "emergency");
    }
}
