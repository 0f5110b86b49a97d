//! asthi-api
//!
//! HTTP surface for the Asthi Care web client: sarcopenia assessment,
//! chat assistant, speech, and appointment reminders.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(routes::health::health_check))
        // Assessment (pure, no vendor)
        .route("/assessment", post(routes::assessment::create_assessment))
        .route("/tiers/{phase}", get(routes::assessment::get_tier_bundle))
        // AI proxies
        .route("/chat", post(routes::chat::chat))
        .route("/speech-to-text", post(routes::speech::speech_to_text))
        .route("/text-to-speech", post(routes::speech::text_to_speech))
        // Notifications
        .route("/send-sms", post(routes::notifications::send_sms_notification))
        .route("/send-email", post(routes::notifications::send_email_notification));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
