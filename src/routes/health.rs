use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::models::health::HealthResponse;

#[get("/health")]
pub async fn health_check(db: web::Data<DatabaseConnection>) -> HttpResponse {
    let database = match db.ping().await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        time: Utc::now(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use crate::db::testing::setup_db;
    use crate::routes::testing::test_app;

    #[actix_web::test]
    async fn test_health_check() {
        let db = setup_db().await;
        let app = test_app!(db);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
    }
}
