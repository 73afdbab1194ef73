pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::Menu;
pub use config::{toml_config::TomlConfig, SchedulerConfig};
pub use crate::core::{
    allocator::CapacityAllocator, queues::AdmissionQueues, scheduler::HospitalScheduler,
    shared::SharedScheduler,
};
pub use domain::model::{
    AssignmentRecord, DispatchOutcome, DispatchStatus, Patient, QueueKind, QueueSnapshot,
};
pub use utils::error::{Result, SchedulerError};
