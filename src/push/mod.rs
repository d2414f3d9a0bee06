//! Push notification delivery
//!
//! Credential exchange against the OAuth2 token endpoint and message
//! dispatch over the FCM HTTP v1 API.

pub mod credentials;
pub mod fcm;
pub mod message;
