use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

use crate::config::Config;
use crate::models::dto::{ListingDetail, ModifyListingForm, PasswordForm};
use crate::routes::page_context;
use crate::services::listing_service::ListingService;
use crate::services::reference_service::ReferenceService;
use crate::views::page::PageContext;
use crate::views::{bare_error_page, error_page, respond, Renderer, View};

/// Fil d'Ariane d'une annonce: Accueil > catégorie > titre
fn item_breadcrumb(ctx: PageContext, detail: &ListingDetail) -> PageContext {
    let annonce = &detail.annonce;
    ctx.crumb(
        detail.nom_categorie.clone().unwrap_or_default(),
        &format!("/cat/{}", annonce.id_categorie),
    )
    .crumb(annonce.titre.clone(), &format!("/item/{}", annonce.id_annonce))
}

/// Messages des règles `validator`, par champ
fn validation_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Valeur invalide".to_string());
            (field.to_string(), message)
        })
        .collect()
}

/// GET /item/{id} - Détail d'une annonce
#[get("/item/{id}")]
pub async fn show_item(
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

    let detail = match ListingService::get_listing(db.get_ref(), id).await {
        Ok(detail) => detail,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    let ctx = item_breadcrumb(ctx, &detail);
    respond(
        renderer.get_ref(),
        StatusCode::OK,
        View::new(
            "item",
            ctx.into_data(json!({
                "annonce": detail.annonce,
                "annonceur": detail.annonceur,
                "dep": detail.nom_departement,
                "categorie": detail.nom_categorie,
                "photo": detail.photos,
            })),
        ),
    )
}

/// GET /item/{id}/delete - Demande du mot de passe avant suppression
#[get("/item/{id}/delete")]
pub async fn delete_item_form(
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

    match ListingService::get_listing(db.get_ref(), id).await {
        Ok(detail) => {
            let ctx = item_breadcrumb(ctx, &detail);
            respond(
                renderer.get_ref(),
                StatusCode::OK,
                View::new("delete-form", ctx.into_data(json!({ "annonce": detail.annonce }))),
            )
        }
        Err(e) => error_page(renderer.get_ref(), ctx, &e),
    }
}

/// POST /item/{id}/delete - Suppression si le mot de passe correspond
#[post("/item/{id}/delete")]
pub async fn delete_item(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
    path: web::Path<i32>,
    form: web::Form<PasswordForm>,
) -> HttpResponse {
    let id = path.into_inner();

    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    // 1. Charger l'annonce pour l'afficher une fois supprimée
    let detail = match ListingService::get_listing(db.get_ref(), id).await {
        Ok(detail) => detail,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    // 2. Supprimer si le mot de passe correspond
    match ListingService::delete_listing(db.get_ref(), id, &form.pass).await {
        Ok(authorized) => respond(
            renderer.get_ref(),
            StatusCode::OK,
            View::new(
                "delete-result",
                ctx.into_data(json!({ "annonce": detail.annonce, "pass": authorized.0 })),
            ),
        ),
        Err(e) => error_page(renderer.get_ref(), ctx, &e),
    }
}

/// GET /item/{id}/modify - Formulaire de modification
#[get("/item/{id}/modify")]
pub async fn modify_item_form(
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

    let detail = match ListingService::get_listing(db.get_ref(), id).await {
        Ok(detail) => detail,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    let departements = match ReferenceService::list_departments(db.get_ref()).await {
        Ok(departements) => departements,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    let ctx = item_breadcrumb(ctx, &detail);
    respond(
        renderer.get_ref(),
        StatusCode::OK,
        View::new(
            "modify-form",
            ctx.into_data(json!({
                "annonce": detail.annonce,
                "departements": departements,
                "dptItem": detail.nom_departement,
                "categItem": detail.nom_categorie,
            })),
        ),
    )
}

/// POST /item/{id}/modify - Modification si le mot de passe correspond
#[post("/item/{id}/modify")]
pub async fn modify_item(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    renderer: web::Data<dyn Renderer>,
    path: web::Path<i32>,
    form: web::Form<ModifyListingForm>,
) -> HttpResponse {
    let id = path.into_inner();

    let ctx = match page_context(db.get_ref(), &config).await {
        Ok(ctx) => ctx,
        Err(e) => return bare_error_page(renderer.get_ref(), &config.base_path, &e),
    };

    // 1. L'annonce doit exister avant tout examen du formulaire
    if let Err(e) = ListingService::get_listing(db.get_ref(), id).await {
        return error_page(renderer.get_ref(), ctx, &e);
    }

    // 2. Valider les nouveaux champs
    if let Err(errors) = form.validate() {
        return respond(
            renderer.get_ref(),
            StatusCode::BAD_REQUEST,
            View::new(
                "add-error",
                ctx.into_data(json!({ "errors": validation_messages(&errors) })),
            ),
        );
    }

    // 3. Appliquer si le mot de passe correspond
    let (pass, changes) = form.into_inner().into_parts();
    let authorized = match ListingService::modify_listing(db.get_ref(), id, &pass, changes).await {
        Ok(authorized) => authorized,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    // 4. Recharger l'annonce telle qu'elle est maintenant en base
    let detail = match ListingService::get_listing(db.get_ref(), id).await {
        Ok(detail) => detail,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    let departements = match ReferenceService::list_departments(db.get_ref()).await {
        Ok(departements) => departements,
        Err(e) => return error_page(renderer.get_ref(), ctx, &e),
    };

    let ctx = item_breadcrumb(ctx, &detail);
    respond(
        renderer.get_ref(),
        StatusCode::OK,
        View::new(
            "modify-result",
            ctx.into_data(json!({
                "annonce": detail.annonce,
                "annonceur": detail.annonceur,
                "pass": authorized.0,
                "departements": departements,
                "dptItem": detail.nom_departement,
                "categItem": detail.nom_categorie,
            })),
        ),
    )
}

pub fn item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(show_item)
        .service(delete_item_form)
        .service(delete_item)
        .service(modify_item_form)
        .service(modify_item);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::db::testing::{setup_db, OTHER_CATEGORY_ID};
    use crate::routes::testing::test_app;
    use crate::services::listing_service::ListingService;
    use crate::utils::validation::sample_form;

    #[actix_web::test]
    async fn test_unknown_item_is_404() {
        let db = setup_db().await;
        let app = test_app!(db);

        for uri in ["/item/999", "/item/999/delete", "/item/999/modify"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["view"], "not-found");
        }
    }

    #[actix_web::test]
    async fn test_item_page_breadcrumb() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);

        let req = test::TestRequest::get().uri(&format!("/item/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;

        let breadcrumb = body["data"]["breadcrumb"].as_array().unwrap();
        assert_eq!(breadcrumb.len(), 3);
        assert_eq!(breadcrumb[1]["text"], "Véhicules");
        assert_eq!(breadcrumb[1]["href"], "/cat/1");
        assert_eq!(breadcrumb[2]["text"], "Sample Title");
        assert_eq!(body["data"]["dep"], "Paris");
        assert!(body["data"]["photo"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_flow() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);
        let uri = format!("/item/{}/delete", id);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["view"], "delete-form");

        // Mauvais mot de passe: rien n'est supprimé
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_form(vec![("pass", "wrong")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "delete-result");
        assert_eq!(body["data"]["pass"], false);
        assert!(ListingService::get_listing(&db, id).await.is_ok());

        // Bon mot de passe
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_form(vec![("pass", "password")])
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pass"], true);
        assert_eq!(body["data"]["annonce"]["id_annonce"], id);

        let req = test::TestRequest::get().uri(&format!("/item/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    fn modify_fields(pass: &str, title: &str) -> Vec<(&'static str, String)> {
        vec![
            ("pass", pass.to_string()),
            ("categorie", OTHER_CATEGORY_ID.to_string()),
            ("departement", "75".to_string()),
            ("price", "80".to_string()),
            ("title", title.to_string()),
            ("description", "Révisé".to_string()),
            ("ville", "Paris".to_string()),
        ]
    }

    #[actix_web::test]
    async fn test_modify_flow() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);
        let uri = format!("/item/{}/modify", id);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_form(modify_fields("wrong", "Nouveau titre"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["view"], "modify-result");
        assert_eq!(body["data"]["pass"], false);
        assert_eq!(body["data"]["annonce"]["titre"], "Sample Title");

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_form(modify_fields("password", "Nouveau titre"))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pass"], true);
        assert_eq!(body["data"]["annonce"]["titre"], "Nouveau titre");
        assert_eq!(body["data"]["annonce"]["prix"], 80);
        assert_eq!(body["data"]["categItem"], "Immobilier");
    }

    #[actix_web::test]
    async fn test_modify_rejects_empty_title() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri(&format!("/item/{}/modify", id))
            .set_form(modify_fields("password", ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "add-error");
        assert_eq!(body["data"]["errors"]["title"], "Veuillez entrer un titre");

        let detail = ListingService::get_listing(&db, id).await.unwrap();
        assert_eq!(detail.annonce.titre, "Sample Title");
    }

    #[actix_web::test]
    async fn test_modify_rejects_blank_title() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri(&format!("/item/{}/modify", id))
            .set_form(modify_fields("password", "   "))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "add-error");
        assert_eq!(body["data"]["errors"]["title"], "Veuillez entrer un titre");

        let detail = ListingService::get_listing(&db, id).await.unwrap();
        assert_eq!(detail.annonce.titre, "Sample Title");
    }

    #[actix_web::test]
    async fn test_modify_with_unknown_category_is_a_form_error() {
        let db = setup_db().await;
        let id = ListingService::create_listing(&db, sample_form(), 1000).await.unwrap();
        let app = test_app!(db);

        let mut fields = modify_fields("password", "Nouveau titre");
        fields.retain(|(key, _)| *key != "categorie");
        fields.push(("categorie", "999".to_string()));

        let req = test::TestRequest::post()
            .uri(&format!("/item/{}/modify", id))
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "add-error");
        assert_eq!(body["data"]["errors"]["category"], "Veuillez choisir une catégorie");
        assert!(body["data"]["errors"].get("department").is_none());

        let detail = ListingService::get_listing(&db, id).await.unwrap();
        assert_eq!(detail.annonce.titre, "Sample Title");
    }

    #[actix_web::test]
    async fn test_invalid_modify_of_unknown_item_is_404() {
        let db = setup_db().await;
        let app = test_app!(db);

        let req = test::TestRequest::post()
            .uri("/item/4242/modify")
            .set_form(modify_fields("password", ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "not-found");
    }
}
