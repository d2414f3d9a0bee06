//! Booking fan-out route

use axum::routing::post;
use axum::{Json, Router, extract::State};
use serde::{Deserialize, Serialize};

use crate::db::models::EventDetails;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bookings", post(create))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event: EventInput,
    #[serde(default)]
    pub waiter_ids: Vec<String>,
}

/// Event descriptor as the admin console sends it. `waitersNum` arrives as
/// a string from the form but older clients send a bare number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
    pub waiters_num: Option<NumberOrString>,
    #[serde(default)]
    pub pick_up_time: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl EventInput {
    /// Validate required fields and build the immutable event value
    fn into_event(self) -> AppResult<EventDetails> {
        for (field, value) in [
            ("date", &self.date),
            ("clientName", &self.client_name),
            ("companyName", &self.company_name),
            ("location", &self.location),
            ("pickUpTime", &self.pick_up_time),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        let waiters_num = match self.waiters_num {
            Some(NumberOrString::Number(n)) => n,
            Some(NumberOrString::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::validation("waitersNum must be a number"))?,
            None => return Err(AppError::validation("Missing required field: waitersNum")),
        };

        Ok(EventDetails {
            date: self.date,
            client_name: self.client_name,
            company_name: self.company_name,
            location: self.location,
            waiters_num,
            pick_up_time: self.pick_up_time,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    /// Primary booking id (first written); the rest of the group is
    /// reachable via `eventId`
    pub booking_id: Option<String>,
    pub event_id: String,
}

/// POST /api/bookings — book a set of waiters for one event
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<Json<CreateBookingResponse>> {
    tracing::info!(waiters = request.waiter_ids.len(), "booking request received");

    if request.waiter_ids.is_empty() {
        return Err(AppError::NoValidWaiters);
    }
    let event = request.event.into_event()?;

    let outcome = state.fanout.execute(event, &request.waiter_ids).await?;

    Ok(Json(CreateBookingResponse {
        booking_id: outcome.booking_id,
        event_id: outcome.event_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EventInput {
        EventInput {
            date: "2025-01-01".into(),
            client_name: "Acme".into(),
            company_name: "Acme Co".into(),
            location: "Venue".into(),
            waiters_num: Some(NumberOrString::String("2".into())),
            pick_up_time: "18:00".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn accepts_waiters_num_as_string_or_number() {
        let event = input().into_event().unwrap();
        assert_eq!(event.waiters_num, 2);

        let mut numeric = input();
        numeric.waiters_num = Some(NumberOrString::Number(5));
        assert_eq!(numeric.into_event().unwrap().waiters_num, 5);
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut bad = input();
        bad.location = "   ".into();
        let err = bad.into_event().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn non_numeric_waiters_num_is_rejected() {
        let mut bad = input();
        bad.waiters_num = Some(NumberOrString::String("many".into()));
        assert!(matches!(
            bad.into_event(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn notes_default_to_empty() {
        let body = serde_json::json!({
            "date": "2025-01-01",
            "clientName": "Acme",
            "companyName": "Acme Co",
            "location": "Venue",
            "waitersNum": "2",
            "pickUpTime": "18:00",
        });
        let input: EventInput = serde_json::from_value(body).unwrap();
        let event = input.into_event().unwrap();
        assert_eq!(event.notes, "");
    }
}
