// --- File: crates/rendezvous_scheduler/src/error.rs ---
use rendezvous_common::{conflict, not_found, validation_error, RendezvousError};
use rendezvous_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Scheduling conflict: {0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(#[from] DbError),
}

impl From<SchedulerError> for RendezvousError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::Validation(msg) => validation_error(msg),
            SchedulerError::NotFound(what) => not_found(what),
            SchedulerError::Conflict(msg) => conflict(msg),
            SchedulerError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendezvous_common::HttpStatusCode;

    #[test]
    fn test_scheduler_errors_map_to_http_statuses() {
        let cases = [
            (SchedulerError::Validation("end before start".into()), 400),
            (SchedulerError::NotFound("selection 9".into()), 404),
            (SchedulerError::Conflict("investor 1 is busy".into()), 409),
            (SchedulerError::Store(DbError::QueryError("locked".into())), 500),
        ];
        for (err, status) in cases {
            assert_eq!(RendezvousError::from(err).status_code(), status);
        }

        let err = RendezvousError::from(SchedulerError::NotFound("meeting 4".into()));
        assert_eq!(err.to_string(), "Not found: meeting 4");
    }
}
