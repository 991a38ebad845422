mod centers;
mod chat;
mod overview;
mod pickups;
mod waste;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use earthguard_core::Directory;
use earthguard_gemini::{ChatGateway, GeminiClient};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub use pickups::PickupStore;
pub use waste::WasteLog;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub pickups: Arc<Mutex<PickupStore>>,
    pub waste: Arc<Mutex<WasteLog>>,
    /// `None` when no Gemini API key is configured.
    pub chat: Option<Arc<ChatGateway<GeminiClient>>>,
}

impl AppState {
    pub fn new(directory: Directory, chat: Option<ChatGateway<GeminiClient>>) -> Self {
        Self {
            directory: Arc::new(directory),
            pickups: Arc::new(Mutex::new(PickupStore::new())),
            waste: Arc::new(Mutex::new(WasteLog::new())),
            chat: chat.map(Arc::new),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct DetailBody {
    detail: String,
}

/// Error response in the dashboard backend's `{"detail": ...}` shape, used by
/// the routes outside `/api/v1`.
#[derive(Debug)]
pub(super) struct DetailError {
    status: StatusCode,
    detail: String,
}

impl DetailError {
    pub(super) fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub(super) fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for DetailError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(DetailBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct WelcomeDocument {
    message: &'static str,
    status: &'static str,
    version: &'static str,
    endpoints: Vec<EndpointEntry>,
}

#[derive(Debug, Serialize)]
struct EndpointEntry {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

const ENDPOINTS: [(&str, &str, &str); 12] = [
    ("GET", "/healthz", "service health"),
    ("GET", "/pickups/", "list scheduled pickups"),
    ("POST", "/pickups/", "schedule a pickup"),
    ("DELETE", "/pickups/{id}", "cancel a pickup"),
    ("POST", "/waste-records/", "log collected waste"),
    ("GET", "/waste-records/{user_id}", "a user's waste log"),
    ("GET", "/overview/stats", "dashboard overview figures"),
    ("GET", "/overview/impact", "environmental impact figures"),
    ("GET", "/api/v1/centers", "query recycling centers"),
    ("GET", "/api/v1/centers/{id}", "recycling center detail"),
    ("POST", "/api/v1/chat", "ask the eco assistant"),
    ("GET", "/api/v1/chat/suggestions", "starter questions"),
];

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/healthz", get(health))
        .route(
            "/pickups/",
            get(pickups::list_pickups).post(pickups::create_pickup),
        )
        .route("/pickups/{pickup_id}", delete(pickups::cancel_pickup))
        .route("/waste-records/", post(waste::create_waste_record))
        .route("/waste-records/{user_id}", get(waste::list_waste_records))
        .route("/overview/stats", get(overview::stats))
        .route("/overview/impact", get(overview::impact))
        .route("/api/v1/centers", get(centers::list_centers))
        .route("/api/v1/centers/{id}", get(centers::get_center))
        .route("/api/v1/chat", post(chat::ask))
        .route("/api/v1/chat/suggestions", get(chat::suggestions))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn welcome() -> Json<WelcomeDocument> {
    Json(WelcomeDocument {
        message: "Welcome to the EarthGuard Waste Management API",
        status: "online",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointEntry {
                method,
                path,
                description,
            })
            .collect(),
    })
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "healthy",
        timestamp: Utc::now(),
    })
}
