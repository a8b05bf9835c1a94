use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::categorie;

/// Un élément du fil d'Ariane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub href: String,
    pub text: String,
}

/// Contexte d'une page, construit pour une seule requête
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub chemin: String,
    pub breadcrumb: Vec<Breadcrumb>,
    pub categories: Vec<categorie::Model>,
}

impl PageContext {
    /// Contexte de base: lien vers l'accueil seulement
    pub fn new(chemin: &str, categories: Vec<categorie::Model>) -> Self {
        PageContext {
            chemin: chemin.to_string(),
            breadcrumb: vec![Breadcrumb {
                href: home_href(chemin),
                text: "Accueil".to_string(),
            }],
            categories,
        }
    }

    /// Contexte sans catégories (page d'erreur quand la base ne répond pas)
    pub fn bare(chemin: &str) -> Self {
        Self::new(chemin, Vec::new())
    }

    pub fn crumb(mut self, text: impl Into<String>, path: &str) -> Self {
        self.breadcrumb.push(Breadcrumb {
            href: format!("{}{}", self.chemin, path),
            text: text.into(),
        });
        self
    }

    /// Fusionne le contexte avec les données propres à la vue
    pub fn into_data(self, extra: Value) -> Value {
        let mut data = Map::new();
        data.insert("chemin".to_string(), Value::String(self.chemin));
        data.insert(
            "breadcrumb".to_string(),
            serde_json::to_value(self.breadcrumb).unwrap_or(Value::Null),
        );
        data.insert(
            "categories".to_string(),
            serde_json::to_value(self.categories).unwrap_or(Value::Null),
        );

        if let Value::Object(extra) = extra {
            data.extend(extra);
        }

        Value::Object(data)
    }
}

fn home_href(chemin: &str) -> String {
    if chemin.is_empty() {
        "/".to_string()
    } else {
        chemin.to_string()
    }
}
