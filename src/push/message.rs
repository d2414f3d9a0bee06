//! Booking push payload (FCM HTTP v1 message shape)

use chrono::Utc;
use serde::Serialize;

use crate::db::models::EventDetails;

/// Action tag telling the mobile app to show the accept/decline prompt
pub const ACTION_ACCEPT_DECLINE: &str = "accept_decline";

const NOTIFICATION_TITLE: &str = "New Booking Request";
const ANDROID_CHANNEL_ID: &str = "booking_notifications";
const ANDROID_CLICK_ACTION: &str = "OPEN_ACTIVITY";
const APNS_CATEGORY: &str = "BOOKING_REQUEST";
const ANALYTICS_LABEL: &str = "booking_request";

/// One booking notification, minus the recipient token (the sender adds it)
#[derive(Debug, Clone, Serialize)]
pub struct BookingPush {
    pub data: DataPayload,
    pub notification: NotificationPayload,
    pub android: AndroidPayload,
    pub apns: ApnsPayload,
}

/// Data map carried to both platforms; all values are strings per FCM
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPayload {
    pub booking_id: String,
    pub event_id: String,
    pub action: String,
    pub sent_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AndroidPayload {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidNotification {
    pub channel_id: String,
    pub click_action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApnsPayload {
    pub payload: ApnsInner,
    #[serde(rename = "fcmOptions")]
    pub fcm_options: FcmOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApnsInner {
    pub aps: Aps,
    /// Mirror of the data map for the iOS notification extension
    #[serde(rename = "custom-data")]
    pub custom_data: DataPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aps {
    pub category: String,
    #[serde(rename = "content-available")]
    pub content_available: i32,
    #[serde(rename = "mutable-content")]
    pub mutable_content: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FcmOptions {
    pub analytics_label: String,
}

impl BookingPush {
    pub fn new(booking_id: &str, event_id: &str, event: &EventDetails) -> Self {
        let data = DataPayload {
            booking_id: booking_id.to_string(),
            event_id: event_id.to_string(),
            action: ACTION_ACCEPT_DECLINE.to_string(),
            sent_time: Utc::now().timestamp_millis().to_string(),
        };

        Self {
            notification: NotificationPayload {
                title: NOTIFICATION_TITLE.to_string(),
                body: notification_body(event),
            },
            android: AndroidPayload {
                priority: "high".to_string(),
                notification: AndroidNotification {
                    channel_id: ANDROID_CHANNEL_ID.to_string(),
                    click_action: ANDROID_CLICK_ACTION.to_string(),
                },
            },
            apns: ApnsPayload {
                payload: ApnsInner {
                    aps: Aps {
                        category: APNS_CATEGORY.to_string(),
                        content_available: 1,
                        mutable_content: 1,
                    },
                    custom_data: data.clone(),
                },
                fcm_options: FcmOptions {
                    analytics_label: ANALYTICS_LABEL.to_string(),
                },
            },
            data,
        }
    }
}

fn notification_body(event: &EventDetails) -> String {
    let company = non_blank(&event.company_name, "an event");
    let date = non_blank(&event.date, "a date");
    let location = non_blank(&event.location, "a location");
    format!(
        "You have been booked for {company} on {date} at {location}, go to app for more details."
    )
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
