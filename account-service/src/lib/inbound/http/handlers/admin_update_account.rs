use axum::extract::Query;
use axum::extract::State;
use axum::Json;

use super::admin_create_account::AdminAccountRequestBody;
use super::admin_create_account::RoleParams;
use crate::domain::account::models::UpdateAccountCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

pub async fn admin_update_account(
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
    Json(body): Json<AdminAccountRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let (role, account) = body.take_role(params)?;
    let (id, details) = account.try_into_update()?;

    state
        .account_service
        .update_account(UpdateAccountCommand { id, details }, role)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message("user updated"))
}
