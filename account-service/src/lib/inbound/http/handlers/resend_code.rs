use axum::extract::Query;
use axum::extract::State;
use axum::Json;

use super::register::resolve_phone;
use super::register::PhoneParams;
use super::register::PhoneRequestBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

pub async fn resend_code(
    State(state): State<AppState>,
    Query(params): Query<PhoneParams>,
    body: Option<Json<PhoneRequestBody>>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let phone = resolve_phone(params, body)?;

    state
        .account_service
        .resend_code(phone)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message("sms code resent"))
}
