use actix_web::{get, http::StatusCode, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::config::Config;
use crate::routes::page_context;
use crate::services::listing_service::ListingService;
use crate::views::{bare_error_page, error_page, respond, Renderer, View};

/// GET / - Les dernières annonces
#[get("/")]
pub async fn index(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
) -> HttpResponse {
    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    match ListingService::list_recent_listings(db.get_ref(), config.feed_limit).await {
        Ok(annonces) => respond(
            renderer.get_ref(),
            StatusCode::OK,
            View::new("index", ctx.into_data(json!({ "annonces": annonces }))),
        ),
        Err(e) => error_page(renderer.get_ref(), ctx, &e),
    }
}

/// GET /cat/{id} - Les annonces d'une catégorie
#[get("/cat/{id}")]
pub async fn category(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    // La catégorie et ses annonces, les plus récentes d'abord
    let (categorie, annonces) =
        match ListingService::list_category_listings(db.get_ref(), id, config.feed_limit).await {
            Ok(feed) => feed,
            Err(e) => return error_page(renderer.get_ref(), ctx, &e),
        };

    let ctx = ctx.crumb(categorie.nom_categorie.clone(), &format!("/cat/{}", id));
    respond(
        renderer.get_ref(),
        StatusCode::OK,
        View::new(
            "category",
            ctx.into_data(json!({ "categorie": categorie, "annonces": annonces })),
        ),
    )
}

/// GET /dep/{id} - Les annonces d'un département
#[get("/dep/{id}")]
pub async fn department(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    let (departement, annonces) =
        match ListingService::list_department_listings(db.get_ref(), id, config.feed_limit).await {
            Ok(feed) => feed,
            Err(e) => return error_page(renderer.get_ref(), ctx, &e),
        };

    let ctx = ctx.crumb(departement.nom_departement.clone(), &format!("/dep/{}", id));
    respond(
        renderer.get_ref(),
        StatusCode::OK,
        View::new(
            "department",
            ctx.into_data(json!({ "departement": departement, "annonces": annonces })),
        ),
    )
}

pub fn index_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(category)
        .service(department);
}
