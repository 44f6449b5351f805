use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    models::dto::response::{HealthResponse, ServiceInfo},
};

#[get("/")]
async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo::default())
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let mongo_status = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                log::warn!("MongoDB readiness check failed: {}", e);
                "error"
            }
        },
        None => "not_configured",
    };

    let response = serde_json::json!({
        "status": if mongo_status == "error" { "not_ready" } else { "ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.config.quiz_store.as_str(),
        "dependencies": {
            "mongodb": mongo_status
        }
    });

    if mongo_status == "error" {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}
