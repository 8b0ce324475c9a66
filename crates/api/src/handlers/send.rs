//! Handler for `POST /send`.

use std::convert::Infallible;

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use notify_core::types::PartyId;
use notify_pipeline::SendNotification;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Message returned once the broker has acknowledged the notification.
pub const SENT_MESSAGE: &str = "Notification sent successfully!";

/// Form body for `POST /send`.
///
/// Fields are kept as raw text so that a missing or malformed id is
/// reported as a 400 naming the field. Extraction never rejects: a body
/// that is absent, unreadable, or not a form yields empty fields, and a
/// repeated field keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SendForm {
    pub from_id: String,
    pub to_id: String,
    pub message: String,
}

impl SendForm {
    /// Build the form from decoded `(name, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut from_id = None;
        let mut to_id = None;
        let mut message = None;

        for (name, value) in pairs {
            let slot = match name.as_str() {
                "fromID" => &mut from_id,
                "toID" => &mut to_id,
                "message" => &mut message,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            from_id: from_id.unwrap_or_default(),
            to_id: to_id.unwrap_or_default(),
            message: message.unwrap_or_default(),
        }
    }

    /// Parse the raw form into a pipeline request.
    ///
    /// `fromID` is parsed before `toID`, so it is the one reported when
    /// both are invalid.
    pub fn parse(self) -> AppResult<SendNotification> {
        let from_id = parse_id("fromID", self.from_id)?;
        let to_id = parse_id("toID", self.to_id)?;
        Ok(SendNotification {
            from_id,
            to_id,
            message: self.message,
        })
    }
}

impl<S> FromRequest<S> for SendForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        let pairs = if is_multipart {
            multipart_pairs(req, state).await
        } else {
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => pairs,
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Send request has no form body");
                    Vec::new()
                }
            }
        };

        Ok(Self::from_pairs(pairs))
    }
}

/// Collect the text fields of a multipart body, stopping at the first
/// malformed part.
async fn multipart_pairs<S>(req: Request, state: &S) -> Vec<(String, String)>
where
    S: Send + Sync,
{
    let mut multipart = match Multipart::from_request(req, state).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Send request has no multipart body");
            return Vec::new();
        }
    };

    let mut pairs = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                match field.text().await {
                    Ok(value) => pairs.push((name, value)),
                    Err(e) => {
                        tracing::debug!(error = %e, "Unreadable multipart field");
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart body");
                break;
            }
        }
    }
    pairs
}

fn parse_id(field: &'static str, value: String) -> AppResult<PartyId> {
    value
        .parse()
        .map_err(|source| AppError::BadRequest {
            field,
            value,
            source,
        })
}

/// POST /send
///
/// Resolve both parties, publish the notification, and reply only after
/// the broker acknowledged it.
pub async fn send_notification(
    State(state): State<AppState>,
    form: SendForm,
) -> AppResult<Json<MessageResponse>> {
    let request = form.parse()?;
    let receipt = state.pipeline.send(request).await?;

    tracing::info!(
        partition = receipt.partition,
        offset = receipt.offset,
        "Notification sent"
    );

    Ok(Json(MessageResponse::new(SENT_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(from_id: &str, to_id: &str, message: &str) -> SendForm {
        SendForm {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            message: message.to_string(),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_valid_form() {
        let request = form("1", "2", "hi").parse().unwrap();
        assert_eq!(
            request,
            SendNotification {
                from_id: 1,
                to_id: 2,
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn non_numeric_from_id_names_field() {
        assert_matches!(
            form("x", "2", "hi").parse(),
            Err(AppError::BadRequest { field: "fromID", .. })
        );
    }

    #[test]
    fn from_id_is_reported_before_to_id() {
        assert_matches!(
            form("x", "y", "hi").parse(),
            Err(AppError::BadRequest { field: "fromID", .. })
        );
    }

    #[test]
    fn empty_to_id_names_field() {
        assert_matches!(
            form("1", "", "hi").parse(),
            Err(AppError::BadRequest { field: "toID", .. })
        );
    }

    #[test]
    fn bad_request_message_includes_value_and_cause() {
        let err = form("abc", "2", "hi").parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse fromID from value \"abc\": invalid digit found in string"
        );
    }

    #[test]
    fn repeated_field_keeps_first_value() {
        let parsed = SendForm::from_pairs(pairs(&[
            ("fromID", "1"),
            ("fromID", "3"),
            ("toID", "2"),
            ("message", "hi"),
            ("message", "ignored"),
        ]));
        assert_eq!(parsed, form("1", "2", "hi"));
    }

    #[test]
    fn unknown_and_missing_fields_are_ignored() {
        let parsed = SendForm::from_pairs(pairs(&[("extra", "x"), ("toID", "4")]));
        assert_eq!(parsed, form("", "4", ""));
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let request = SendForm {
            from_id: "1".into(),
            to_id: "1".into(),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(request.message, "");
    }
}
