use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::verify_token::verify_token;
use super::middleware::authenticate_cookie;
use crate::auth::models::CookieSettings;
use crate::auth::ports::CookieStore;
use crate::auth::ports::CredentialService;
use crate::auth::ports::PasswordResetStore;
use crate::auth::ports::SessionManager;
use crate::auth::ports::Transport;
use crate::auth::ports::UserStore;
use crate::auth::service::Authenticator;

#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub credential_service: Arc<dyn CredentialService>,
    pub password_resets: Arc<dyn PasswordResetStore>,
    pub cookie_settings: CookieSettings,
}

impl AppState {
    /// Wire up a request-scoped authenticator.
    ///
    /// The stores are shared across requests; session, cookie, and
    /// transport collaborators live and die with the request.
    pub fn authenticator(
        &self,
        session: Arc<dyn SessionManager>,
        cookies: Arc<dyn CookieStore>,
        transport: Arc<dyn Transport>,
    ) -> Authenticator {
        Authenticator::new(
            Arc::clone(&self.user_store),
            Arc::clone(&self.credential_service),
            session,
            cookies,
            Arc::clone(&self.password_resets),
            transport,
            self.cookie_settings.clone(),
        )
    }
}

pub fn create_router(
    user_store: Arc<dyn UserStore>,
    credential_service: Arc<dyn CredentialService>,
    password_resets: Arc<dyn PasswordResetStore>,
    cookie_settings: CookieSettings,
) -> Router {
    let state = AppState {
        user_store,
        credential_service,
        password_resets,
        cookie_settings,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", post(verify_token))
        .route("/api/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_cookie,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
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
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
