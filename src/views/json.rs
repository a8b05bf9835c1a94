use actix_web::http::header::ContentType;

use super::{RenderError, Renderer, View};

/// Renvoie la vue sous forme JSON: {"view": ..., "data": ...}
/// Utile pour un front séparé et pour les tests
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        serde_json::to_string(view).map_err(|e| RenderError::Failed(e.to_string()))
    }

    fn content_type(&self) -> ContentType {
        ContentType::json()
    }
}
