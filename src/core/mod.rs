pub mod allocator;
pub mod priority_queue;
pub mod queues;
pub mod report;
pub mod scheduler;
pub mod shared;

pub use crate::domain::model::{
    AssignmentRecord, DispatchOutcome, DispatchStatus, Patient, QueueKind, QueueSnapshot,
};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
