//! Application state
//!
//! Every external collaborator is constructed exactly once here and handed
//! to the orchestrator — no global singletons, no lazy re-initialization.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::config::Config;
use crate::db::DbService;
use crate::db::repository::{BookingRepository, WaiterRepository};
use crate::fanout::BookingFanOut;
use crate::push::credentials::OauthTokenProvider;
use crate::push::fcm::FcmSender;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// Booking fan-out orchestrator with injected collaborators
    pub fanout: BookingFanOut,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db_service = DbService::new(&config.database_dir).await?;
        let db = db_service.db;

        let http = reqwest::Client::new();

        let credentials = OauthTokenProvider::new(
            http.clone(),
            config.fcm_client_email.clone(),
            config.fcm_private_key.clone(),
            config.token_uri.clone(),
        );
        let sender = FcmSender::new(
            http,
            config.fcm_endpoint.clone(),
            config.fcm_project_id.clone(),
        );

        let fanout = BookingFanOut::new(
            Arc::new(WaiterRepository::new(db.clone())),
            Arc::new(BookingRepository::new(db.clone())),
            Arc::new(credentials),
            Arc::new(sender),
        );

        Ok(Self { db, fanout })
    }
}
