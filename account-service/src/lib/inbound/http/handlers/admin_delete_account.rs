use axum::extract::Query;
use axum::extract::State;
use serde::Deserialize;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteAccountParams {
    pub id: String,
}

pub async fn admin_delete_account(
    State(state): State<AppState>,
    Query(params): Query<DeleteAccountParams>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let account_id = AccountId::from_string(&params.id).map_err(AccountError::from)?;

    state
        .account_service
        .delete_account(account_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message("user deleted"))
}
