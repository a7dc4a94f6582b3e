use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Role;
use crate::inbound::http::handlers::AccountRequestBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

/// `?role=` query parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleParams {
    pub role: Option<Role>,
}

/// Account body, optionally carrying the role to assign (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminAccountRequestBody {
    #[serde(flatten)]
    pub account: AccountRequestBody,
    #[serde(default)]
    pub role: Option<Role>,
}

impl AdminAccountRequestBody {
    /// Split off the role; the query string wins over the body.
    pub(crate) fn take_role(
        self,
        params: RoleParams,
    ) -> Result<(Role, AccountRequestBody), ApiError> {
        let role = params
            .role
            .or(self.role)
            .ok_or_else(|| ApiError::UnprocessableEntity("Missing role".to_string()))?;
        Ok((role, self.account))
    }
}

pub async fn admin_create_account(
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
    Json(body): Json<AdminAccountRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let (role, account) = body.take_role(params)?;
    let details = account.try_into_create()?;

    state
        .account_service
        .create_account(CreateAccountCommand { details, role })
        .await
        .map_err(ApiError::from)
        .map(|account| ApiSuccess::message(format!("{} registered", account.role)))
}
