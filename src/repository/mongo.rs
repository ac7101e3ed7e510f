use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, instrument};

use super::EventStore;
use crate::models::{Event, NewEvent};
use crate::utils::error::AppError;

const COLLECTION: &str = "events";

/// MongoDB-backed event store. Cheap to clone; the collection handle shares
/// the client's connection pool.
#[derive(Clone)]
pub struct MongoEventStore {
    collection: Collection<Event>,
}

impl MongoEventStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Create the recency index the listing query sorts on. Called once at
    /// startup; also serves as the connectivity check.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();
        self.collection.create_index(index).await?;
        info!(collection = COLLECTION, "event indexes ready");
        Ok(())
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    #[instrument(skip(self, draft), fields(title = %draft.details.title))]
    async fn create(&self, draft: NewEvent) -> Result<Event, AppError> {
        draft.validate().map_err(AppError::Validation)?;

        let event = Event::from_draft(draft);
        self.collection.insert_one(&event).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Event>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDetails, EventMode};
    use chrono::{NaiveDate, NaiveTime};
    use mongodb::Client;

    fn draft(title: &str) -> NewEvent {
        NewEvent {
            details: EventDetails {
                title: title.to_string(),
                overview: "overview".to_string(),
                description: "description".to_string(),
                venue: "venue".to_string(),
                location: "location".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
                time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                mode: EventMode::Online,
                audience: "everyone".to_string(),
                organizer: "org".to_string(),
            },
            image: "https://example.com/a.png".to_string(),
            tags: vec![],
            agenda: vec![],
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running MongoDB
    async fn create_then_list_orders_newest_first() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Client::with_uri_str(&url).await.unwrap();
        let db = client.database("cbconnect_test");
        db.collection::<Event>(COLLECTION).drop().await.unwrap();

        let store = MongoEventStore::new(&db);
        store.create_indexes().await.unwrap();

        let first = store.create(draft("first")).await.unwrap();
        let second = store.create(draft("second")).await.unwrap();

        let events = store.list_all().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, second.id);
        assert_eq!(events[1].id, first.id);
    }
}
