//! Factories for the schedule repositories

use crate::repositories::schedule_memory::MemoryScheduleRepository;
use crate::repositories::schedule_sql::SqlScheduleRepository;
use crate::{DbClient, RepositoryFactory};

#[derive(Debug, Clone, Default)]
pub struct ScheduleRepositoryFactory;

impl ScheduleRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlScheduleRepository, DbClient> for ScheduleRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlScheduleRepository {
        SqlScheduleRepository::new(db_client)
    }
}

impl RepositoryFactory<MemoryScheduleRepository, ()> for ScheduleRepositoryFactory {
    fn create_repository(&self, _: ()) -> MemoryScheduleRepository {
        MemoryScheduleRepository::new()
    }
}
