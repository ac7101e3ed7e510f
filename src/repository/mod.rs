use async_trait::async_trait;

use crate::models::{Event, NewEvent};
use crate::utils::error::AppError;

pub mod mongo;

pub use mongo::MongoEventStore;

/// Persistence boundary for events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Validate a draft, assign identity and creation time, persist it, and
    /// return the stored record.
    async fn create(&self, draft: NewEvent) -> Result<Event, AppError>;

    /// Every stored event, newest first. An empty store yields an empty vec.
    async fn list_all(&self) -> Result<Vec<Event>, AppError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventStore {}

        #[async_trait]
        impl EventStore for EventStore {
            async fn create(&self, draft: NewEvent) -> Result<Event, AppError>;
            async fn list_all(&self) -> Result<Vec<Event>, AppError>;
        }
    }
}
