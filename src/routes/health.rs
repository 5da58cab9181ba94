use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::app::AppState;

/// Liveness probe.
///
/// Reports the crate name and version, the storage backend the service runs
/// on, and the current server time. Needs no session.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.storage,
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialHasher;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_reports_service_and_storage() {
        let hasher = CredentialHasher::new("health-test-salt").unwrap();
        let state = web::Data::new(AppState::in_memory(hasher));
        let app = test::init_service(actix_web::App::new().app_data(state).service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "todolist");
        assert_eq!(json["storage"], "memory");
        assert!(json["timestamp"].is_string());
    }
}
