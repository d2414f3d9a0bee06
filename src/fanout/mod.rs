//! Booking fan-out workflow
//!
//! One request books a set of waiters for an event: resolve the ids against
//! the staff directory, write one booking per token-holding waiter under a
//! shared event-group id, then notify each of them independently. The four
//! external collaborators (directory, booking store, token exchange, push
//! endpoint) sit behind trait seams and are injected at startup.

pub mod resolver;
pub mod writer;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::models::{Booking, BookingCreate, EventDetails, Waiter};
use crate::db::repository::RepoResult;
use crate::error::{AppError, AppResult};
use crate::push::credentials::{BearerToken, CredentialError};
use crate::push::fcm::DispatchError;
use crate::push::message::BookingPush;

/// Read-only staff directory
#[async_trait]
pub trait WaiterDirectory: Send + Sync {
    async fn get_waiter(&self, id: &str) -> RepoResult<Option<Waiter>>;
}

/// Append-only booking writer; the store generates the document id
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create_booking(&self, data: BookingCreate) -> RepoResult<Booking>;
}

/// Exchange of the service-account assertion for a short-lived bearer token
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn acquire(&self) -> Result<BearerToken, CredentialError>;
}

/// Push delivery endpoint
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(
        &self,
        fcm_token: &str,
        push: &BookingPush,
        credential: &BearerToken,
    ) -> Result<(), DispatchError>;
}

/// Group outcome returned to the HTTP layer
#[derive(Debug, Clone)]
pub struct FanOutOutcome {
    /// First booking written — the caller-facing "primary" id. Absent when
    /// every resolved waiter lacked a token (no row written).
    pub booking_id: Option<String>,
    /// Event-group id shared by every booking of this fan-out
    pub event_id: String,
    /// All written booking ids, in write order
    pub booking_ids: Vec<String>,
}

/// Fan-out orchestrator over the injected collaborators
#[derive(Clone)]
pub struct BookingFanOut {
    directory: Arc<dyn WaiterDirectory>,
    store: Arc<dyn BookingStore>,
    credentials: Arc<dyn AccessTokenProvider>,
    push: Arc<dyn PushSender>,
}

impl BookingFanOut {
    pub fn new(
        directory: Arc<dyn WaiterDirectory>,
        store: Arc<dyn BookingStore>,
        credentials: Arc<dyn AccessTokenProvider>,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            directory,
            store,
            credentials,
            push,
        }
    }

    /// Run one fan-out: resolve -> write -> dispatch.
    ///
    /// Per-recipient failures in resolution and dispatch are recovered
    /// locally; validation and storage failures surface as the group
    /// outcome. Already-written bookings are never rolled back.
    pub async fn execute(
        &self,
        event: EventDetails,
        waiter_ids: &[String],
    ) -> AppResult<FanOutOutcome> {
        let event_id = Uuid::new_v4().to_string();
        tracing::info!(event_group = %event_id, waiters = waiter_ids.len(), "starting booking fan-out");

        let resolution = resolver::resolve(self.directory.as_ref(), waiter_ids).await?;
        if !resolution.unresolved.is_empty() {
            tracing::warn!(
                event_group = %event_id,
                unresolved = ?resolution.unresolved,
                "some waiter ids did not resolve"
            );
        }
        if resolution.resolved.is_empty() {
            return Err(AppError::NoValidWaiters);
        }

        let written =
            writer::create_bookings(self.store.as_ref(), &event_id, &event, &resolution.resolved)
                .await?;

        for booking in &written {
            let credential = match self.credentials.acquire().await {
                Ok(token) => token,
                Err(e) => {
                    tracing::error!(
                        booking = %booking.booking_id,
                        waiter = %booking.waiter_id,
                        error = %e,
                        "access token acquisition failed, skipping notification"
                    );
                    continue;
                }
            };

            let push = BookingPush::new(&booking.booking_id, &event_id, &event);
            match self
                .push
                .send(&booking.fcm_token, &push, &credential)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        booking = %booking.booking_id,
                        waiter = %booking.waiter_id,
                        "booking notification sent"
                    );
                }
                Err(e) => {
                    // No retry; the booking stays pending either way
                    tracing::error!(
                        booking = %booking.booking_id,
                        waiter = %booking.waiter_id,
                        error = %e,
                        "booking notification failed"
                    );
                }
            }
        }

        let booking_ids: Vec<String> = written.iter().map(|b| b.booking_id.clone()).collect();
        Ok(FanOutOutcome {
            booking_id: booking_ids.first().cloned(),
            event_id,
            booking_ids,
        })
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::test_support::*;
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fanout(
        directory: FakeDirectory,
        store: RecordingStore,
        credentials: FakeTokenProvider,
        push: RecordingSender,
    ) -> (
        BookingFanOut,
        Arc<RecordingStore>,
        Arc<FakeTokenProvider>,
        Arc<RecordingSender>,
    ) {
        let store = Arc::new(store);
        let credentials = Arc::new(credentials);
        let push = Arc::new(push);
        let orchestrator = BookingFanOut::new(
            Arc::new(directory),
            store.clone(),
            credentials.clone(),
            push.clone(),
        );
        (orchestrator, store, credentials, push)
    }

    #[tokio::test]
    async fn all_unresolvable_ids_reject_before_any_write() {
        let (orchestrator, store, _, push) = fanout(
            FakeDirectory::new(),
            RecordingStore::new(),
            FakeTokenProvider::ok(),
            RecordingSender::new(),
        );

        let result = orchestrator
            .execute(event_fixture(), &ids(&["ghost-1", "ghost-2"]))
            .await;

        assert!(matches!(result, Err(AppError::NoValidWaiters)));
        assert!(store.created().is_empty());
        assert!(push.sent().is_empty());
    }

    #[tokio::test]
    async fn happy_path_books_and_notifies_every_token_holder() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", Some("tok-1"))
            .with_waiter("w2", "Ben", Some("tok-2"));
        let (orchestrator, store, credentials, push) = fanout(
            directory,
            RecordingStore::new(),
            FakeTokenProvider::ok(),
            RecordingSender::new(),
        );

        let outcome = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await
            .unwrap();

        assert_eq!(outcome.booking_ids.len(), 2);
        assert_eq!(outcome.booking_id.as_deref(), Some(outcome.booking_ids[0].as_str()));
        assert_eq!(store.created().len(), 2);
        assert_eq!(push.sent(), vec!["tok-1".to_string(), "tok-2".to_string()]);
        // One fresh credential per recipient, no caching
        assert_eq!(credentials.acquisitions.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn token_less_waiter_gets_no_booking_and_no_dispatch() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", Some("tok-1"))
            .with_waiter("w2", "Ben", None);
        let (orchestrator, store, _, push) = fanout(
            directory,
            RecordingStore::new(),
            FakeTokenProvider::ok(),
            RecordingSender::new(),
        );

        let outcome = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await
            .unwrap();

        assert_eq!(outcome.booking_ids.len(), 1);
        assert_eq!(push.sent(), vec!["tok-1".to_string()]);
        // w2 is still in the snapshot carried by w1's booking
        assert_eq!(store.created()[0].all_waiter_ids, vec!["w1", "w2"]);
    }

    #[tokio::test]
    async fn dispatch_failure_for_one_waiter_does_not_block_the_next() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", Some("tok-1"))
            .with_waiter("w2", "Ben", Some("tok-2"));
        let (orchestrator, store, _, push) = fanout(
            directory,
            RecordingStore::new(),
            FakeTokenProvider::ok(),
            RecordingSender::new().failing_for("tok-1"),
        );

        let outcome = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await
            .unwrap();

        // Both bookings persist; only w2's notification went out
        assert_eq!(outcome.booking_ids.len(), 2);
        assert_eq!(store.created().len(), 2);
        assert_eq!(push.sent(), vec!["tok-2".to_string()]);
    }

    #[tokio::test]
    async fn credential_failure_skips_every_send_but_keeps_bookings() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", Some("tok-1"))
            .with_waiter("w2", "Ben", Some("tok-2"));
        let (orchestrator, store, _, push) = fanout(
            directory,
            RecordingStore::new(),
            FakeTokenProvider::failing(),
            RecordingSender::new(),
        );

        let outcome = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await
            .unwrap();

        assert_eq!(outcome.booking_ids.len(), 2);
        assert_eq!(store.created().len(), 2);
        assert!(push.sent().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_mid_group_surfaces_without_rollback() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", Some("tok-1"))
            .with_waiter("w2", "Ben", Some("tok-2"));
        let (orchestrator, store, _, push) = fanout(
            directory,
            RecordingStore::new().fail_after(1),
            FakeTokenProvider::ok(),
            RecordingSender::new(),
        );

        let result = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        // The first write stays committed, nothing was dispatched
        assert_eq!(store.created().len(), 1);
        assert!(push.sent().is_empty());
    }

    #[tokio::test]
    async fn all_resolved_but_token_less_yields_empty_group() {
        let directory = FakeDirectory::new()
            .with_waiter("w1", "Ana", None)
            .with_waiter("w2", "Ben", None);
        let (orchestrator, store, _, push) = fanout(
            directory,
            RecordingStore::new(),
            FakeTokenProvider::ok(),
            RecordingSender::new(),
        );

        let outcome = orchestrator
            .execute(event_fixture(), &ids(&["w1", "w2"]))
            .await
            .unwrap();

        assert_eq!(outcome.booking_id, None);
        assert!(outcome.booking_ids.is_empty());
        assert!(store.created().is_empty());
        assert!(push.sent().is_empty());
    }
}
