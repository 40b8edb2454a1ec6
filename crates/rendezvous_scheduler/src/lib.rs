// --- File: crates/rendezvous_scheduler/src/lib.rs ---
pub mod allocator;
pub mod availability;
#[cfg(test)]
mod availability_test;
pub mod conflict;
pub mod doc;
pub mod engine;
#[cfg(test)]
mod engine_proptest;
#[cfg(test)]
mod engine_test;
pub mod error;
pub mod handlers;
pub mod models;
pub mod partition;
#[cfg(test)]
mod partition_test;
pub mod routes;
pub mod service;
#[cfg(test)]
mod test_support;

pub use engine::{build_schedule, ScheduleOutcome};
pub use error::SchedulerError;
pub use service::SchedulerService;
