//! Budgie Web Server
//!
//! Axum-based server for the Budgie finance assistant: an embedded form page
//! with five tabs (Chat, Profile Setup, Budget Analysis, Spending Insights,
//! Financial Tips) and the JSON API behind it.
//!
//! Analysis endpoints always answer 200 with a panel; errors a user can act on
//! (missing profile, bad spending data) are carried in the panel text.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{info, warn};

use budgie_core::{
    ensure_model_artifact, AIBackend, Advisor, ArtifactStatus, ProfileStore, Settings,
};

mod handlers;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const APP_JS: &str = include_str!("../assets/app.js");

/// Shared application state
pub struct AppState {
    pub profiles: ProfileStore,
    pub advisor: Advisor,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            profiles: ProfileStore::new(),
            advisor: Advisor::from_settings(&settings.ai),
            settings,
        }
    }

    /// State with a caller-supplied advisor (tests, alternative backends)
    pub fn with_advisor(settings: Settings, advisor: Advisor) -> Self {
        Self {
            profiles: ProfileStore::new(),
            advisor,
            settings,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState, static_dir: Option<&str>) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/options", get(handlers::options))
        // Chat
        .route("/chat", post(handlers::chat))
        // Profiles
        .route(
            "/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route("/profiles/:name", get(handlers::get_profile))
        // Analysis
        .route("/budget", post(handlers::budget_analysis))
        .route("/spending", post(handlers::spending_analysis))
        // Tips
        .route("/tips", get(handlers::get_tips));

    // Same-origin only: the form is served by this process
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Security headers
    // CSP: scripts from this origin only, inline styles for the embedded page, data: for the SVG charts
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Start the server
///
/// Runs the model artifact bootstrap first when `artifact.auto_download` is
/// set; a failed bootstrap aborts startup.
pub async fn serve(settings: Settings, static_dir: Option<&str>) -> anyhow::Result<()> {
    if settings.artifact.auto_download {
        let status = ensure_model_artifact(&settings.artifact)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch model artifact from {}",
                    settings.artifact.url
                )
            })?;
        match status {
            ArtifactStatus::AlreadyPresent => {
                info!("Model artifact present: {}", settings.artifact.path.display())
            }
            ArtifactStatus::Downloaded { bytes } => info!(
                "Model artifact downloaded: {} ({} bytes)",
                settings.artifact.path.display(),
                bytes
            ),
        }
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings);

    // Check AI backend connection
    check_ai_connection(&state.advisor).await;

    let app = create_router(state, static_dir);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(advisor: &Advisor) {
    let client = advisor.client();
    if client.health_check().await {
        info!(
            "✅ AI backend connected: {} {} (model: {})",
            client.backend_name(),
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  AI backend not responding: {} {} (model: {}); chat will apologize until it is up",
            client.backend_name(),
            client.host(),
            client.model()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}
