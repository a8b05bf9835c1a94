use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::config::Config;
use crate::models::dto::NewListingForm;
use crate::routes::page_context;
use crate::services::listing_service::ListingService;
use crate::services::reference_service::ReferenceService;
use crate::views::{bare_error_page, error_page, respond, Renderer, View};

/// GET /add - Formulaire de dépôt
#[get("/add")]
pub async fn add_item_form(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
) -> HttpResponse {
    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    match ReferenceService::list_departments(db.get_ref()).await {
        Ok(departements) => respond(
            renderer.get_ref(),
            StatusCode::OK,
            View::new("add", ctx.into_data(json!({ "departements": departements }))),
        ),
        Err(e) => error_page(renderer.get_ref(), ctx, &e),
    }
}

/// POST /add - Dépôt d'une annonce
/// Erreurs de saisie: page add-error (400). Panne: page d'erreur générique (500)
#[post("/add")]
pub async fn add_new_item(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
    form: web::Form<NewListingForm>,
) -> HttpResponse {
    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    match ListingService::create_listing(db.get_ref(), form.into_inner(), config.hash_rounds).await {
        Ok(id) => respond(
            renderer.get_ref(),
            StatusCode::OK,
            View::new("add-confirm", ctx.into_data(json!({ "id_annonce": id }))),
        ),
        Err(e) => error_page(renderer.get_ref(), ctx, &e),
    }
}

pub fn add_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_item_form).service(add_new_item);
}
