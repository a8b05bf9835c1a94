// ============================================================================
// VUES
// ============================================================================
//
// Description:
//   Les contrôleurs ne produisent jamais de HTML: ils choisissent une vue
//   (nom du template) et lui passent un objet JSON. Le moteur de templates est
//   branché derrière le trait Renderer.
//
// Liste des modules:
//   - page : contexte commun à toutes les pages (chemin, fil d'Ariane, catégories)
//   - json : Renderer par défaut, renvoie {view, data} en JSON
//
// ============================================================================

pub mod json;
pub mod page;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::error::{ListingError, GENERIC_FAILURE};
use page::PageContext;

pub use json::JsonRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Une vue à rendre: nom du template et données
#[derive(Debug, Clone, Serialize)]
pub struct View {
    #[serde(rename = "view")]
    pub name: &'static str,
    pub data: serde_json::Value,
}

impl View {
    pub fn new(name: &'static str, data: serde_json::Value) -> Self {
        View { name, data }
    }
}

/// Moteur de rendu externe
pub trait Renderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, RenderError>;

    fn content_type(&self) -> ContentType {
        ContentType::html()
    }
}

/// Rend une vue et construit la réponse HTTP
pub fn respond(renderer: &dyn Renderer, status: StatusCode, view: View) -> HttpResponse {
    match renderer.render(&view) {
        Ok(body) => HttpResponse::build(status)
            .insert_header(renderer.content_type())
            .body(body),
        Err(e) => {
            error!(view = view.name, error = %e, "Failed to render view");
            HttpResponse::InternalServerError()
                .insert_header(ContentType::plaintext())
                .body(GENERIC_FAILURE)
        }
    }
}

/// Page d'erreur adaptée au type d'erreur
/// Le détail des pannes n'apparaît jamais dans la réponse
pub fn error_page(renderer: &dyn Renderer, ctx: PageContext, err: &ListingError) -> HttpResponse {
    let view = match err {
        ListingError::NotFound => View::new("not-found", ctx.into_data(serde_json::json!({}))),
        ListingError::Validation(errors) => {
            View::new("add-error", ctx.into_data(serde_json::json!({ "errors": errors })))
        }
        ListingError::Storage(_) | ListingError::Hashing(_) => View::new(
            "error",
            ctx.into_data(serde_json::json!({ "message": GENERIC_FAILURE })),
        ),
    };
    respond(renderer, err.status_code(), view)
}

/// Erreur survenue avant d'avoir pu construire le contexte de page
pub fn bare_error_page(renderer: &dyn Renderer, chemin: &str, err: &ListingError) -> HttpResponse {
    error_page(renderer, PageContext::bare(chemin), err)
}
