use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin_create_account::admin_create_account;
use super::handlers::admin_delete_account::admin_delete_account;
use super::handlers::admin_update_account::admin_update_account;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::resend_code::resend_code;
use super::handlers::update_account::update_account;
use super::middleware::require_access;
use super::middleware::AccessGate;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState { account_service };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/resend_code", post(resend_code))
        .route("/login", post(login));

    let user_routes = Router::new()
        .route("/", put(update_account))
        .route_layer(middleware::from_fn_with_state(
            AccessGate::require(Arc::clone(&authenticator), Role::User),
            require_access,
        ));

    let admin_routes = Router::new()
        .route(
            "/admin",
            post(admin_create_account)
                .put(admin_update_account)
                .delete(admin_delete_account),
        )
        .route_layer(middleware::from_fn_with_state(
            AccessGate::any_role(authenticator),
            require_access,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
