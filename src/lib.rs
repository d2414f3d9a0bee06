//! maitred — staff-booking fan-out core
//!
//! Backend for the booking admin console. One incoming request books a set
//! of waiters for an event: a `booking` document is written per waiter with
//! a registered push token, and each of them receives an accept/decline
//! push notification over FCM, authorized by a short-lived bearer token
//! exchanged for a signed service-account assertion.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── config.rs  # Environment configuration
//! ├── state.rs   # Dependency-injected application state
//! ├── error.rs   # AppError taxonomy + HTTP mapping
//! ├── db/        # Embedded SurrealDB: models + repositories
//! ├── push/      # Credential exchange + FCM v1 sender
//! ├── fanout/    # Resolver, writer, orchestrator
//! └── api/       # HTTP routes
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod fanout;
pub mod push;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
