//! Service descriptor

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub polls: &'static str,
    pub feedback: &'static str,
}

/// Service descriptor response
#[derive(Serialize)]
pub struct ServiceDescriptor {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// GET /
async fn describe() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        message: "Pollfinder API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/api/health",
            polls: "/api/polls?date=YYYY-MM-DD&collection=NAME",
            feedback: "POST /api/feedback",
        },
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(describe))
}
