use axum::extract::State;
use axum::Extension;
use axum::Json;

use crate::domain::account::models::UpdateAccountCommand;
use crate::inbound::http::handlers::AccountRequestBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Replace the caller's own account. The role is never taken from the body.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Json(body): Json<AccountRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let (id, details) = body.try_into_update()?;

    state
        .account_service
        .update_own_account(caller.account_id, UpdateAccountCommand { id, details })
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message("user updated"))
}
