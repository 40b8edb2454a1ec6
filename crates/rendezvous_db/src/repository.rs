//! Factory trait shared by the repository implementations.

/// Creates repository instances from a backing resource (a [`crate::DbClient`]
/// for the SQL store, nothing for the in-memory store).
pub trait RepositoryFactory<R, C> {
    fn create_repository(&self, config: C) -> R;
}
