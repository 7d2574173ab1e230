use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use super::{
    handlers,
    middleware::{admin_middleware, auth_middleware},
};
use crate::AppState;

// Payment proofs are photos or PDFs; anything past this is abuse.
const MAX_BOOKING_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router<AppState> {
    // Public routes
    let public_routes = Router::new()
        .route("/auth/request-otp", post(handlers::auth::request_otp))
        .route("/auth/verify-otp", post(handlers::auth::verify_otp))
        .route("/admin/login", post(handlers::admin::login));

    // Authenticated user routes
    let user_routes = Router::new()
        .route("/bookings", post(handlers::bookings::create_booking))
        .route(
            "/me/referrals/progress",
            get(handlers::referrals::get_progress),
        )
        .route(
            "/me/referrals/eligibility",
            get(handlers::referrals::get_eligibility),
        )
        .layer(DefaultBodyLimit::max(MAX_BOOKING_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_BOOKING_BODY_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin gate
    let admin_routes = Router::new()
        .route("/bookings", get(handlers::admin::list_bookings))
        .route(
            "/bookings/:id/confirm",
            post(handlers::admin::confirm_booking),
        )
        .route(
            "/bookings/:id/deliver",
            post(handlers::admin::deliver_booking),
        )
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .nest("/admin", admin_routes)
        .with_state(state)
}
