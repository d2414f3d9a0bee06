//! Persistent document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Event descriptor embedded into every booking of a group.
///
/// Never stored on its own and never mutated once embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub date: String,
    pub client_name: String,
    pub company_name: String,
    pub location: String,
    pub waiters_num: i64,
    pub pick_up_time: String,
    #[serde(default)]
    pub notes: String,
}

/// Waiter document. Created and updated by the waiter-management routes of
/// the admin console; this core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waiter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    /// Push registration token; absent until the mobile app registers one
    #[serde(default)]
    pub fcm_token: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Booking lifecycle. Only `pending` is written here; transitions to
/// accepted/declined are driven by the mobile client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Declined,
}

/// Booking document — one per (event-group, waiter) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Event-group id shared by every booking created in one fan-out
    pub event_id: String,
    pub waiter_id: String,
    /// Display name snapshotted at booking time, not live-joined
    pub waiter_name: String,
    /// Full group snapshot, identical on every row of the group
    pub all_waiter_ids: Vec<String>,
    pub all_waiter_names: Vec<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub event: EventDetails,
}

/// Insert payload for one booking row
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub event_id: String,
    pub waiter_id: String,
    pub waiter_name: String,
    pub all_waiter_ids: Vec<String>,
    pub all_waiter_names: Vec<String>,
    pub event: EventDetails,
}
