//! FCM HTTP v1 sender

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::fanout::PushSender;
use crate::push::credentials::BearerToken;
use crate::push::message::BookingPush;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("push endpoint returned {status}: {body}")]
    Endpoint {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("push send failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// `{"message": {"token": ..., <payload fields>}}`
#[derive(Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    token: &'a str,
    #[serde(flatten)]
    push: &'a BookingPush,
}

/// Sender backed by the real FCM endpoint
#[derive(Clone)]
pub struct FcmSender {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
}

impl FcmSender {
    pub fn new(client: reqwest::Client, endpoint: String, project_id: String) -> Self {
        Self {
            client,
            endpoint,
            project_id,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint.trim_end_matches('/'),
            self.project_id
        )
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send(
        &self,
        fcm_token: &str,
        push: &BookingPush,
        credential: &BearerToken,
    ) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(&credential.access_token)
            .json(&SendRequest {
                message: Message {
                    token: fcm_token,
                    push,
                },
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Endpoint { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::EventDetails;

    #[test]
    fn send_url_joins_endpoint_and_project() {
        let sender = FcmSender::new(
            reqwest::Client::new(),
            "https://fcm.googleapis.com/".into(),
            "demo-project".into(),
        );
        assert_eq!(
            sender.send_url(),
            "https://fcm.googleapis.com/v1/projects/demo-project/messages:send"
        );
    }

    #[test]
    fn request_nests_token_inside_message() {
        let event = EventDetails {
            date: "2025-01-01".into(),
            client_name: "Acme".into(),
            company_name: "Acme Co".into(),
            location: "Venue".into(),
            waiters_num: 2,
            pick_up_time: "18:00".into(),
            notes: String::new(),
        };
        let push = BookingPush::new("booking:b1", "group-1", &event);
        let body = serde_json::to_value(SendRequest {
            message: Message {
                token: "token-1",
                push: &push,
            },
        })
        .unwrap();

        assert_eq!(body["message"]["token"], "token-1");
        assert_eq!(body["message"]["data"]["bookingId"], "booking:b1");
        assert!(body["message"]["notification"]["title"].is_string());
    }
}
