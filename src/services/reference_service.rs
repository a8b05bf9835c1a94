use sea_orm::*;

use crate::error::{ListingError, Result};
use crate::models::{categorie, departement};

/// Catégories et départements: données statiques, en lecture seule
pub struct ReferenceService;

impl ReferenceService {
    /// Toutes les catégories, triées par nom (menu et formulaires)
    pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<categorie::Model>> {
        let categories = categorie::Entity::find()
            .order_by_asc(categorie::Column::NomCategorie)
            .all(db)
            .await?;
        Ok(categories)
    }

    /// Tous les départements, triés par nom
    pub async fn list_departments(db: &DatabaseConnection) -> Result<Vec<departement::Model>> {
        let departements = departement::Entity::find()
            .order_by_asc(departement::Column::NomDepartement)
            .all(db)
            .await?;
        Ok(departements)
    }

    pub async fn find_category(db: &DatabaseConnection, id: i32) -> Result<categorie::Model> {
        categorie::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ListingError::NotFound)
    }

    pub async fn find_department(db: &DatabaseConnection, id: i32) -> Result<departement::Model> {
        departement::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ListingError::NotFound)
    }
}
