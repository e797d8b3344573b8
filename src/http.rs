use std::{any::Any, sync::Arc};

use axum::{
    body::Body,
    extract::{Json, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use log::error;
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
};

use crate::{
    service::{Prediction, PredictionRequest, PredictionService},
    TriageErr,
};

/// Builds the HTTP router over a shared prediction service.
pub fn router(service: Arc<PredictionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(cors::Any);

    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

async fn predict(
    State(service): State<Arc<PredictionService>>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let prediction = service.handle(&request)?;
    Ok(Json(prediction))
}

/// A request-time failure, answered with a 500 and a `detail` message.
struct ApiError(String);

impl From<TriageErr> for ApiError {
    fn from(value: TriageErr) -> Self {
        Self(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("prediction failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0 })),
        )
            .into_response()
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("handler panicked: {detail}");
    let body = json!({ "detail": detail }).to_string();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
