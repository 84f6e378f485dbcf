use async_trait::async_trait;
use thiserror::Error;
use crate::models::{Party, SlotRecord};
use crate::services::postgres::{PostgresClient, PostgresError};

/// Errors raised while looking up availability records
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] PostgresError),

    #[error("Slot storage unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw slot records keyed by owner
///
/// The matching computation only ever reads through this trait; it never
/// talks to storage directly.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Slots owned by `owner_id`, in storage order
    async fn slots_for(&self, party: Party, owner_id: i32) -> Result<Vec<SlotRecord>, RepositoryError>;
}

#[async_trait]
impl SlotRepository for PostgresClient {
    async fn slots_for(&self, party: Party, owner_id: i32) -> Result<Vec<SlotRecord>, RepositoryError> {
        self.list_slots(party, owner_id).await.map_err(lookup_error)
    }
}

/// Connection-level failures mean storage could not be reached at all
fn lookup_error(err: PostgresError) -> RepositoryError {
    match err {
        PostgresError::SqlxError(
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)),
        ) => RepositoryError::Unavailable(e.to_string()),
        other => RepositoryError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_failures_mean_unavailable() {
        let err = lookup_error(PostgresError::SqlxError(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, RepositoryError::Unavailable(_)));

        let err = lookup_error(PostgresError::SqlxError(sqlx::Error::PoolClosed));
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn test_data_failures_stay_storage_errors() {
        let err = lookup_error(PostgresError::InvalidData("slot 3: bad weekday".to_string()));
        assert!(matches!(err, RepositoryError::Storage(PostgresError::InvalidData(_))));

        let err = lookup_error(PostgresError::SqlxError(sqlx::Error::RowNotFound));
        assert!(matches!(err, RepositoryError::Storage(PostgresError::SqlxError(_))));
    }
}
