//! Repository modules for database access

pub mod schedule;
pub mod schedule_factory;
pub mod schedule_memory;
pub mod schedule_sql;

pub use schedule::{OverlapQuery, ScheduleRepository};
pub use schedule_factory::ScheduleRepositoryFactory;
pub use schedule_memory::MemoryScheduleRepository;
pub use schedule_sql::SqlScheduleRepository;
