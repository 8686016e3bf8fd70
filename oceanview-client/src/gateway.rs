//! Reservation gateway
//!
//! REST client for the remote reservation service. The service owns every
//! reservation; status changes are checked against [`ReservationLifecycle`]
//! before any request leaves the client.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{LoginRequest, LoginResponse};
use shared::{Reservation, ReservationLifecycle, ReservationRequest, ReservationStatus};
use std::time::Duration;

/// Reservation service operations
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    /// Authenticate and keep the issued token for later calls
    async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    /// Forget the token; the service keeps no session
    fn logout(&mut self);

    fn token(&self) -> Option<&str>;

    /// Usage guide published by the service
    async fn help(&self) -> ClientResult<String>;

    async fn create(&self, request: &ReservationRequest) -> ClientResult<Reservation>;

    /// Guest self-booking, sent without a token
    async fn create_public(&self, request: &ReservationRequest) -> ClientResult<Reservation>;

    async fn update(
        &self,
        reservation_number: &str,
        request: &ReservationRequest,
    ) -> ClientResult<Reservation>;

    async fn list(&self) -> ClientResult<Vec<Reservation>>;

    async fn get(&self, reservation_number: &str) -> ClientResult<Reservation>;

    async fn search(&self, guest_name: &str) -> ClientResult<Vec<Reservation>>;

    /// Raw status update, unchecked. Prefer [`change_status`](Self::change_status).
    async fn put_status(
        &self,
        reservation_number: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation>;

    /// Raw cancel, unchecked. Prefer [`cancel`](Self::cancel).
    async fn put_cancel(&self, reservation_number: &str) -> ClientResult<Reservation>;

    /// Update a reservation, refusing locally unless it is still editable
    async fn update_checked(
        &self,
        current: &Reservation,
        request: &ReservationRequest,
    ) -> ClientResult<Reservation> {
        if !ReservationLifecycle::is_editable(current.status) {
            tracing::warn!(
                reservation = %current.reservation_number,
                status = %current.status,
                "Refusing to edit reservation"
            );
            return Err(AppError::new(ErrorCode::ReservationNotEditable)
                .with_detail("status", current.status.as_str())
                .into());
        }
        self.update(&current.reservation_number, request).await
    }

    /// Move a reservation to `to` if the lifecycle allows it
    async fn change_status(
        &self,
        reservation: &Reservation,
        to: ReservationStatus,
    ) -> ClientResult<Reservation> {
        if let Err(e) = ReservationLifecycle::transition(reservation.status, to) {
            tracing::warn!(reservation = %reservation.reservation_number, error = %e, "Refusing status change");
            return Err(e.into());
        }
        self.put_status(&reservation.reservation_number, to).await
    }

    /// Cancel a reservation if the lifecycle allows it
    async fn cancel(&self, reservation: &Reservation) -> ClientResult<Reservation> {
        if let Err(e) = ReservationLifecycle::transition(reservation.status, ReservationStatus::Cancelled) {
            tracing::warn!(reservation = %reservation.reservation_number, error = %e, "Refusing cancellation");
            return Err(e.into());
        }
        self.put_cancel(&reservation.reservation_number).await
    }
}

/// Gateway over HTTP
#[derive(Debug, Clone)]
pub struct NetworkGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkGateway {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL, `/api` included
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sending request");
        let mut req = self.client.request(method, &url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Map a failed response, keeping the envelope's message, code and details
    fn error_from_body(status: StatusCode, text: String) -> ClientError {
        let envelope = serde_json::from_str::<ApiResponse<Value>>(&text).ok();
        let (code, message, details) = match envelope {
            Some(envelope) => {
                let code = envelope.code.and_then(|c| ErrorCode::try_from(c).ok());
                let details = envelope
                    .details
                    .map(|d| Value::Object(d.into_iter().collect()))
                    .or(envelope.data.filter(|d| !d.is_null()));
                let message = Some(envelope.message).filter(|m| !m.is_empty());
                (code, message, details)
            }
            None => (None, None, None),
        };
        let message = message.unwrap_or(text);
        tracing::debug!(%status, %message, "Request failed");

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation { message, details },
            _ => ClientError::Api {
                code: code
                    .filter(|c| !c.is_success())
                    .unwrap_or_else(|| ErrorCode::from_http_status(status)),
                message,
                details,
            },
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, text));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))?;
        if envelope.is_success() {
            envelope
                .data
                .ok_or_else(|| ClientError::InvalidResponse("Response is missing data".into()))
        } else {
            envelope.into_result().map_err(ClientError::from)
        }
    }
}

#[async_trait]
impl ReservationGateway for NetworkGateway {
    async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let req = self.client.post(format!("{}/auth/login", self.base_url)).json(&body);
        let resp: LoginResponse = self.send(req).await.map_err(|e| match e {
            // The service answers bad credentials with 400
            ClientError::Validation { message, .. } => ClientError::Unauthorized(message),
            other => other,
        })?;

        tracing::info!(username = %resp.username, role = %resp.role, "Logged in");
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    fn logout(&mut self) {
        self.token = None;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn help(&self) -> ClientResult<String> {
        self.send(self.request(Method::GET, "/auth/help")).await
    }

    async fn create(&self, request: &ReservationRequest) -> ClientResult<Reservation> {
        let created: Reservation = self
            .send(self.request(Method::POST, "/reservations").json(request))
            .await?;
        tracing::info!(reservation = %created.reservation_number, "Reservation created");
        Ok(created)
    }

    async fn create_public(&self, request: &ReservationRequest) -> ClientResult<Reservation> {
        let req = self
            .client
            .post(format!("{}/reservations/public", self.base_url))
            .json(request);
        let created: Reservation = self.send(req).await?;
        tracing::info!(reservation = %created.reservation_number, "Public reservation submitted");
        Ok(created)
    }

    async fn update(
        &self,
        reservation_number: &str,
        request: &ReservationRequest,
    ) -> ClientResult<Reservation> {
        let path = format!("/reservations/{reservation_number}");
        let updated: Reservation = self
            .send(self.request(Method::PUT, &path).json(request))
            .await?;
        tracing::info!(reservation = %reservation_number, "Reservation updated");
        Ok(updated)
    }

    async fn list(&self) -> ClientResult<Vec<Reservation>> {
        self.send(self.request(Method::GET, "/reservations")).await
    }

    async fn get(&self, reservation_number: &str) -> ClientResult<Reservation> {
        let path = format!("/reservations/{reservation_number}");
        self.send(self.request(Method::GET, &path)).await
    }

    async fn search(&self, guest_name: &str) -> ClientResult<Vec<Reservation>> {
        let req = self
            .request(Method::GET, "/reservations/search")
            .query(&[("name", guest_name)]);
        self.send(req).await
    }

    async fn put_status(
        &self,
        reservation_number: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation> {
        let path = format!("/reservations/{reservation_number}/status");
        let req = self
            .request(Method::PUT, &path)
            .query(&[("status", status.as_str())]);
        let updated: Reservation = self.send(req).await?;
        tracing::info!(reservation = %reservation_number, status = %updated.status, "Reservation status updated");
        Ok(updated)
    }

    async fn put_cancel(&self, reservation_number: &str) -> ClientResult<Reservation> {
        let path = format!("/reservations/{reservation_number}/cancel");
        let cancelled: Reservation = self.send(self.request(Method::PUT, &path)).await?;
        tracing::info!(reservation = %reservation_number, "Reservation cancelled");
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_request_keeps_field_details() {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "details": { "numberOfGuests": "Number of guests must be between 1 and 10" }
        });
        match NetworkGateway::error_from_body(StatusCode::BAD_REQUEST, body.to_string()) {
            ClientError::Validation { message, details } => {
                assert_eq!(message, "Validation failed");
                assert_eq!(
                    details.unwrap()["numberOfGuests"],
                    "Number of guests must be between 1 and 10"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_field_map_in_data_is_kept() {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "data": { "contactNumber": "Contact number must be 10 digits" }
        });
        match NetworkGateway::error_from_body(StatusCode::BAD_REQUEST, body.to_string()) {
            ClientError::Validation { details, .. } => {
                assert_eq!(details.unwrap()["contactNumber"], "Contact number must be 10 digits")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_code_wins_over_status() {
        let body = json!({
            "code": 4003,
            "message": "Can only update CONFIRMED reservations",
            "details": { "status": "CHECKED_IN" }
        });
        match NetworkGateway::error_from_body(StatusCode::CONFLICT, body.to_string()) {
            ClientError::Api { code, message, details } => {
                assert_eq!(code, ErrorCode::ReservationNotEditable);
                assert_eq!(message, "Can only update CONFIRMED reservations");
                assert_eq!(details.unwrap()["status"], "CHECKED_IN");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = NetworkGateway::error_from_body(StatusCode::BAD_GATEWAY, "upstream down".into());
        match err {
            ClientError::Api { code, message, details } => {
                assert_eq!(code, ErrorCode::InternalError);
                assert_eq!(message, "upstream down");
                assert!(details.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
