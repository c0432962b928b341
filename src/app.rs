//! HTTP router assembly.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware, state::AppState};

/// Path prefix for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Build the application router.
///
/// # Layout
///
/// - Public: health, registration, login, banner, services
/// - Protected (bearer token): profile, balance, top-up, payments, history
/// - Anything else, including a known path with the wrong method: 404 envelope
///
/// With `APP_ENV=development` internal error text is added to 5xx bodies.
pub fn build_router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Profile
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route("/profile/update", put(handlers::profile::update_profile))
        .route("/profile/image", put(handlers::profile::update_profile_image))
        // Wallet
        .route("/balance", get(handlers::wallet::get_balance))
        .route("/topup", post(handlers::wallet::top_up))
        // Ledger
        .route("/transaction", post(handlers::transactions::create_payment))
        .route(
            "/transaction/history",
            get(handlers::transactions::get_history),
        )
        .route(
            "/transaction/{invoice_number}",
            get(handlers::transactions::get_transaction),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/registration", post(handlers::auth::registration))
        .route("/login", post(handlers::auth::login))
        .route("/banner", get(handlers::reference::list_banners))
        .route("/services", get(handlers::reference::list_services));

    // Registered after every route so wrong-method requests get the envelope too
    let api_routes = public_routes
        .merge(authenticated_routes)
        .method_not_allowed_fallback(handlers::not_found);

    let mut app = Router::new()
        .nest(API_PREFIX, api_routes)
        .fallback(handlers::not_found);

    if state.config.is_development() {
        app = app.layer(axum_middleware::from_fn(
            middleware::error_detail::expose_error_detail,
        ));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
    .with_state(state)
}
