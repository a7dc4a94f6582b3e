use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::account::errors::AccountError;
use crate::domain::account::models::PhoneNumber;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

/// `?phone=` query parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhoneParams {
    pub phone: Option<String>,
}

/// HTTP request body naming a phone number (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneRequestBody {
    pub phone: String,
}

/// Phone from the query string, falling back to the JSON body.
pub(crate) fn resolve_phone(
    params: PhoneParams,
    body: Option<Json<PhoneRequestBody>>,
) -> Result<PhoneNumber, ApiError> {
    let raw = params
        .phone
        .or(body.map(|Json(body)| body.phone))
        .ok_or_else(|| ApiError::UnprocessableEntity("Missing phone".to_string()))?;

    PhoneNumber::new(raw)
        .map_err(AccountError::from)
        .map_err(ApiError::from)
}

pub async fn register(
    State(state): State<AppState>,
    Query(params): Query<PhoneParams>,
    body: Option<Json<PhoneRequestBody>>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let phone = resolve_phone(params, body)?;

    state
        .account_service
        .register(phone)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message("sms code sent"))
}
