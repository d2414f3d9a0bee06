//! Booking writer
//!
//! Persists one booking per resolved waiter that holds a push token. The
//! group snapshot (`all_waiter_ids`/`all_waiter_names`) is computed once
//! from the entire resolved set, so every row of the group carries the same
//! two arrays no matter which waiters end up being skipped for lack of a
//! token. No transaction spans the loop: a failure mid-way leaves the
//! earlier rows committed.

use crate::db::models::{BookingCreate, EventDetails};
use crate::db::repository::{RepoError, RepoResult};
use crate::fanout::BookingStore;
use crate::fanout::resolver::ResolvedWaiter;

/// One persisted booking, with what the dispatch loop needs alongside it
#[derive(Debug, Clone)]
pub struct WrittenBooking {
    pub booking_id: String,
    pub waiter_id: String,
    pub waiter_name: String,
    pub fcm_token: String,
}

/// Write the group. Caller guarantees `resolved` is non-empty.
pub async fn create_bookings(
    store: &dyn BookingStore,
    event_id: &str,
    event: &EventDetails,
    resolved: &[ResolvedWaiter],
) -> RepoResult<Vec<WrittenBooking>> {
    // Group snapshot, identical on every row
    let all_waiter_ids: Vec<String> = resolved.iter().map(|w| w.id.clone()).collect();
    let all_waiter_names: Vec<String> = resolved.iter().map(|w| w.name.clone()).collect();

    let mut written = Vec::new();

    for waiter in resolved {
        let Some(token) = waiter.fcm_token.as_deref().filter(|t| !t.trim().is_empty()) else {
            tracing::warn!(waiter = %waiter.id, "no registered push token, skipping booking");
            continue;
        };

        let booking = store
            .create_booking(BookingCreate {
                event_id: event_id.to_string(),
                waiter_id: waiter.id.clone(),
                waiter_name: waiter.name.clone(),
                all_waiter_ids: all_waiter_ids.clone(),
                all_waiter_names: all_waiter_names.clone(),
                event: event.clone(),
            })
            .await?;

        let booking_id = booking
            .id
            .map(|id| id.to_string())
            .ok_or_else(|| RepoError::Database("booking created without an id".into()))?;

        tracing::info!(booking = %booking_id, waiter = %waiter.id, "booking created");

        written.push(WrittenBooking {
            booking_id,
            waiter_id: waiter.id.clone(),
            waiter_name: waiter.name.clone(),
            fcm_token: token.to_string(),
        });
    }

    Ok(written)
}
