//! Booking repository — append-only writer for booking documents

use async_trait::async_trait;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Booking, BookingCreate, BookingStatus};
use crate::fanout::BookingStore;

const BOOKING_TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Write one booking with a generated id and a server-side timestamp.
    /// Status always starts as `pending`.
    pub async fn create(&self, data: BookingCreate) -> RepoResult<Booking> {
        let booking = Booking {
            id: None,
            event_id: data.event_id,
            waiter_id: data.waiter_id,
            waiter_name: data.waiter_name,
            all_waiter_ids: data.all_waiter_ids,
            all_waiter_names: data.all_waiter_names,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            event: data.event,
        };

        let created: Option<Booking> = self
            .base
            .db()
            .create(BOOKING_TABLE)
            .content(booking)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// All bookings of one fan-out group, in write order
    pub async fn find_by_event(&self, event_id: &str) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE event_id = $event ORDER BY created_at")
            .bind(("event", event_id.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn create_booking(&self, data: BookingCreate) -> RepoResult<Booking> {
        self.create(data).await
    }
}
