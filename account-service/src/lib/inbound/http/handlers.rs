use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Age;
use crate::domain::account::models::PhoneNumber;

pub mod admin_create_account;
pub mod admin_delete_account;
pub mod admin_update_account;
pub mod login;
pub mod register;
pub mod resend_code;
pub mod update_account;

/// Successful response: status plus the bare JSON payload.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl ApiSuccess<MessageData> {
    /// `200 OK` with `{"message": ...}`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::OK,
            MessageData {
                message: message.into(),
            },
        )
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) | AccountError::NotFoundByPhone(_) => {
                ApiError::NotFound(err.to_string())
            }
            AccountError::PhoneAlreadyRegistered(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidCode => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidPhone(_)
            | AccountError::InvalidAge(_)
            | AccountError::InvalidRole(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed with an internal error");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

/// HTTP request body carrying a full set of account fields (raw JSON)
///
/// `id` is ignored on create and required on update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRequestBody {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub code: Option<String>,
}

impl AccountRequestBody {
    fn try_into_details(self) -> Result<AccountDetails, AccountError> {
        Ok(AccountDetails {
            name: self.name,
            phone: PhoneNumber::new(self.phone)?,
            password: self.password,
            age: Age::new(self.age)?,
            code: self.code,
        })
    }

    /// Split into the target id and validated details, for updates.
    pub fn try_into_update(self) -> Result<(AccountId, AccountDetails), ApiError> {
        let id = self
            .id
            .map(AccountId)
            .ok_or_else(|| ApiError::UnprocessableEntity("Missing account id".to_string()))?;
        let details = self.try_into_details()?;
        Ok((id, details))
    }

    /// Validated details, for creation.
    pub fn try_into_create(self) -> Result<AccountDetails, ApiError> {
        self.try_into_details().map_err(ApiError::from)
    }
}
