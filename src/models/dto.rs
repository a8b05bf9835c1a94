// Formulaires reçus et structures préparées pour les vues
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{annonce, annonceur, photo};

/// Formulaire de dépôt d'une annonce (POST /add)
/// Les noms de champs correspondent au formulaire HTML existant
#[derive(Debug, Clone, Deserialize)]
pub struct NewListingForm {
    #[serde(rename = "nom")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(rename = "departement")]
    pub department_id: i32,
    #[serde(rename = "categorie")]
    pub category_id: i32,
    pub title: String,
    pub description: String,
    pub price: i32,
    #[serde(rename = "psw")]
    pub password: String,
    #[serde(rename = "confirm-psw")]
    pub password_confirmation: String,
}

/// Formulaire de confirmation de suppression
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordForm {
    pub pass: String,
}

/// Formulaire de modification (POST /item/{id}/modify)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModifyListingForm {
    pub pass: String,
    #[serde(rename = "categorie")]
    pub category_id: i32,
    #[serde(rename = "departement")]
    pub department_id: i32,
    #[validate(range(min = 0, message = "Le prix ne peut pas être négatif"))]
    pub price: i32,
    #[validate(custom(function = "not_blank", message = "Veuillez entrer un titre"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Veuillez entrer une description"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Veuillez entrer une ville"))]
    #[serde(rename = "ville")]
    pub city: String,
}

// Un texte fait uniquement d'espaces compte comme vide
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ModifyListingForm {
    /// Sépare le mot de passe des champs à appliquer
    pub fn into_parts(self) -> (String, ListingChanges) {
        let changes = ListingChanges {
            category_id: self.category_id,
            department_id: self.department_id,
            price: self.price,
            title: self.title,
            description: self.description,
            city: self.city,
        };
        (self.pass, changes)
    }
}

/// Champs modifiables d'une annonce. Ni l'id ni le mot de passe n'en font partie.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingChanges {
    pub category_id: i32,
    pub department_id: i32,
    pub price: i32,
    pub title: String,
    pub description: String,
    pub city: String,
}

/// Résumé d'une annonce pour la page d'accueil et les listes par catégorie
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id_annonce: i32,
    pub titre: String,
    pub prix: i32,
    pub ville: String,
    pub date: chrono::NaiveDate,
    pub nom_annonceur: Option<String>,
    pub url_photo: String,
    pub nb_photo: u64,
}

/// Annonce complète pour la page de détail
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    pub annonce: annonce::Model,
    pub annonceur: Option<annonceur::Model>,
    pub nom_departement: Option<String>,
    pub nom_categorie: Option<String>,
    pub photos: Vec<photo::Model>,
}
