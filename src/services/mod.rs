// Service exports
pub mod postgres;
pub mod repository;
pub mod scheduling;

pub use postgres::{PostgresClient, PostgresError};
pub use repository::{RepositoryError, SlotRepository};
pub use scheduling::{find_common_slots, MatchError};
