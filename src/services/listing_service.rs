use chrono::Utc;
use sea_orm::*;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{ListingError, Result};
use crate::models::dto::{ListingChanges, ListingDetail, ListingSummary, NewListingForm};
use crate::models::{annonce, annonceur, categorie, departement, photo};
use crate::services::reference_service::ReferenceService;
use crate::utils::password;
use crate::utils::validation::{validate_submission, FieldErrors, FormField};

/// Photo affichée quand une annonce n'en a aucune
pub const NO_IMAGE_URL: &str = "/img/noimg.png";
pub const DEFAULT_FEED_LIMIT: u64 = 12;

/// Résultat d'une opération protégée par le mot de passe de l'annonce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Authorized(pub bool);

/// Restriction appliquée à une liste d'annonces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
    All,
    Category(i32),
    Department(i32),
}

pub struct ListingService;

impl ListingService {
    /// Dépose une nouvelle annonce avec son annonceur
    /// L'annonceur et l'annonce sont créés dans une seule transaction
    pub async fn create_listing(
        db: &DatabaseConnection,
        form: NewListingForm,
        hash_rounds: u32,
    ) -> Result<i32> {
        // 1. Valider le formulaire, aucune écriture si erreur
        let errors = validate_submission(&form);
        if !errors.is_empty() {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Submission rejected");
            return Err(ListingError::Validation(errors));
        }

        // 2. Hasher le mot de passe (jamais stocké en clair)
        let mdp = password::hash_password_in_pool(form.password.clone(), hash_rounds)
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log_fault("create_listing", None, e))?;

        // 3. Créer annonceur + annonce
        let id = Self::insert_listing(db, &form, mdp)
            .await
            .map_err(ListingError::from)
            .inspect_err(|e| log_fault("create_listing", None, e))?;

        info!(id_annonce = id, "Listing created");
        Ok(id)
    }

    async fn insert_listing(
        db: &DatabaseConnection,
        form: &NewListingForm,
        mdp: String,
    ) -> std::result::Result<i32, DbErr> {
        let telephone = form
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(str::to_string);

        // Rollback automatique si la transaction est abandonnée avant commit
        let txn = db.begin().await?;

        let new_annonceur = annonceur::ActiveModel {
            nom_annonceur: Set(form.name.trim().to_string()),
            email: Set(form.email.trim().to_string()),
            telephone: Set(telephone),
            ..Default::default()
        };
        let annonceur = new_annonceur.insert(&txn).await?;

        // L'association se fait par la clé étrangère id_annonceur
        let new_annonce = annonce::ActiveModel {
            id_annonceur: Set(annonceur.id_annonceur),
            id_categorie: Set(form.category_id),
            id_departement: Set(form.department_id),
            titre: Set(form.title.clone()),
            description: Set(form.description.clone()),
            prix: Set(form.price),
            ville: Set(form.city.clone()),
            date: Set(Utc::now().date_naive()),
            mdp: Set(mdp),
            ..Default::default()
        };
        let annonce = new_annonce.insert(&txn).await?;

        txn.commit().await?;
        Ok(annonce.id_annonce)
    }

    /// Charge une annonce avec son annonceur, son département, sa catégorie et ses photos
    pub async fn get_listing(db: &DatabaseConnection, id: i32) -> Result<ListingDetail> {
        Self::load_detail(db, id)
            .await
            .inspect_err(|e| log_fault("get_listing", Some(id), e))
    }

    async fn load_detail(db: &DatabaseConnection, id: i32) -> Result<ListingDetail> {
        let annonce = Self::find_listing(db, id).await?;

        let annonceur = annonceur::Entity::find_by_id(annonce.id_annonceur)
            .one(db)
            .await?;

        let nom_departement = departement::Entity::find_by_id(annonce.id_departement)
            .one(db)
            .await?
            .map(|d| d.nom_departement);

        let nom_categorie = categorie::Entity::find_by_id(annonce.id_categorie)
            .one(db)
            .await?
            .map(|c| c.nom_categorie);

        let photos = photo::Entity::find()
            .filter(photo::Column::IdAnnonce.eq(id))
            .order_by_asc(photo::Column::IdPhoto)
            .all(db)
            .await?;

        Ok(ListingDetail {
            annonce,
            annonceur,
            nom_departement,
            nom_categorie,
            photos,
        })
    }

    /// Supprime une annonce et ses photos si le mot de passe correspond
    /// L'annonceur n'est jamais supprimé
    pub async fn delete_listing(
        db: &DatabaseConnection,
        id: i32,
        supplied_password: &str,
    ) -> Result<Authorized> {
        Self::delete_if_authorized(db, id, supplied_password)
            .await
            .inspect_err(|e| log_fault("delete_listing", Some(id), e))
    }

    async fn delete_if_authorized(
        db: &DatabaseConnection,
        id: i32,
        supplied_password: &str,
    ) -> Result<Authorized> {
        let annonce = Self::find_listing(db, id).await?;

        if !password_matches(&annonce, supplied_password).await? {
            info!(id_annonce = id, "Wrong password, listing not deleted");
            return Ok(Authorized(false));
        }

        // Photos d'abord, puis l'annonce
        let txn = db.begin().await?;
        let removed = photo::Entity::delete_many()
            .filter(photo::Column::IdAnnonce.eq(id))
            .exec(&txn)
            .await?;
        annonce::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(id_annonce = id, photos = removed.rows_affected, "Listing deleted");
        Ok(Authorized(true))
    }

    /// Applique les nouveaux champs si le mot de passe correspond
    /// Ni l'id ni le mot de passe ne sont modifiés
    pub async fn modify_listing(
        db: &DatabaseConnection,
        id: i32,
        supplied_password: &str,
        changes: ListingChanges,
    ) -> Result<Authorized> {
        Self::update_if_authorized(db, id, supplied_password, changes)
            .await
            .inspect_err(|e| log_fault("modify_listing", Some(id), e))
    }

    async fn update_if_authorized(
        db: &DatabaseConnection,
        id: i32,
        supplied_password: &str,
        changes: ListingChanges,
    ) -> Result<Authorized> {
        let annonce = Self::find_listing(db, id).await?;

        // Une catégorie ou un département inconnu est une erreur de saisie
        let errors = unknown_references(db, &changes).await?;
        if !errors.is_empty() {
            debug!(
                id_annonce = id,
                fields = ?errors.keys().collect::<Vec<_>>(),
                "Modification rejected"
            );
            return Err(ListingError::Validation(errors));
        }

        if !password_matches(&annonce, supplied_password).await? {
            info!(id_annonce = id, "Wrong password, listing not modified");
            return Ok(Authorized(false));
        }

        let mut active: annonce::ActiveModel = annonce.into();
        active.id_categorie = Set(changes.category_id);
        active.id_departement = Set(changes.department_id);
        active.prix = Set(changes.price);
        active.titre = Set(changes.title);
        active.description = Set(changes.description);
        active.ville = Set(changes.city);
        active.update(db).await?;

        info!(id_annonce = id, "Listing modified");
        Ok(Authorized(true))
    }

    /// Les dernières annonces, de la plus récente à la plus ancienne
    pub async fn list_recent_listings(
        db: &DatabaseConnection,
        limit: u64,
    ) -> Result<Vec<ListingSummary>> {
        Self::list_listings(db, FeedFilter::All, limit).await
    }

    /// Liste les annonces (toutes, par catégorie ou par département)
    /// Tri par id décroissant, au plus `limit` annonces
    /// Le filtre n'est pas vérifié: un id inconnu donne une liste vide
    pub async fn list_listings(
        db: &DatabaseConnection,
        filter: FeedFilter,
        limit: u64,
    ) -> Result<Vec<ListingSummary>> {
        Self::load_summaries(db, filter, limit)
            .await
            .inspect_err(|e| log_fault("list_listings", None, e))
    }

    /// Une catégorie et ses annonces (NotFound si la catégorie n'existe pas)
    pub async fn list_category_listings(
        db: &DatabaseConnection,
        id: i32,
        limit: u64,
    ) -> Result<(categorie::Model, Vec<ListingSummary>)> {
        let categorie = ReferenceService::find_category(db, id)
            .await
            .inspect_err(|e| log_fault("list_category_listings", None, e))?;
        let annonces = Self::list_listings(db, FeedFilter::Category(id), limit).await?;
        Ok((categorie, annonces))
    }

    /// Un département et ses annonces (NotFound si le département n'existe pas)
    pub async fn list_department_listings(
        db: &DatabaseConnection,
        id: i32,
        limit: u64,
    ) -> Result<(departement::Model, Vec<ListingSummary>)> {
        let departement = ReferenceService::find_department(db, id)
            .await
            .inspect_err(|e| log_fault("list_department_listings", None, e))?;
        let annonces = Self::list_listings(db, FeedFilter::Department(id), limit).await?;
        Ok((departement, annonces))
    }

    async fn load_summaries(
        db: &DatabaseConnection,
        filter: FeedFilter,
        limit: u64,
    ) -> Result<Vec<ListingSummary>> {
        let mut query = annonce::Entity::find();

        match filter {
            FeedFilter::All => {}
            FeedFilter::Category(id) => {
                query = query.filter(annonce::Column::IdCategorie.eq(id));
            }
            FeedFilter::Department(id) => {
                query = query.filter(annonce::Column::IdDepartement.eq(id));
            }
        }

        let rows = query
            .order_by_desc(annonce::Column::IdAnnonce)
            .limit(limit)
            .find_also_related(annonceur::Entity)
            .all(db)
            .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (annonce, annonceur) in rows {
            let nb_photo = photo::Entity::find()
                .filter(photo::Column::IdAnnonce.eq(annonce.id_annonce))
                .count(db)
                .await?;

            let url_photo = if nb_photo > 0 {
                photo::Entity::find()
                    .filter(photo::Column::IdAnnonce.eq(annonce.id_annonce))
                    .order_by_asc(photo::Column::IdPhoto)
                    .one(db)
                    .await?
                    .map(|p| p.url_photo)
            } else {
                None
            };

            summaries.push(ListingSummary {
                id_annonce: annonce.id_annonce,
                titre: annonce.titre,
                prix: annonce.prix,
                ville: annonce.ville,
                date: annonce.date,
                nom_annonceur: annonceur.map(|a| a.nom_annonceur),
                url_photo: url_photo.unwrap_or_else(|| NO_IMAGE_URL.to_string()),
                nb_photo,
            });
        }

        Ok(summaries)
    }

    async fn find_listing(db: &DatabaseConnection, id: i32) -> Result<annonce::Model> {
        annonce::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ListingError::NotFound)
    }
}

async fn password_matches(annonce: &annonce::Model, supplied_password: &str) -> Result<bool> {
    let matches =
        password::verify_password_in_pool(supplied_password.to_string(), annonce.mdp.clone())
            .await?;
    Ok(matches)
}

// Erreurs de saisie pour les références absentes de la base
async fn unknown_references(
    db: &DatabaseConnection,
    changes: &ListingChanges,
) -> Result<FieldErrors> {
    let mut errors = FieldErrors::new();

    match ReferenceService::find_category(db, changes.category_id).await {
        Ok(_) => {}
        Err(ListingError::NotFound) => {
            errors.insert(FormField::Category, "Veuillez choisir une catégorie".to_string());
        }
        Err(e) => return Err(e),
    }
    match ReferenceService::find_department(db, changes.department_id).await {
        Ok(_) => {}
        Err(ListingError::NotFound) => {
            errors.insert(FormField::Department, "Veuillez choisir un département".to_string());
        }
        Err(e) => return Err(e),
    }

    Ok(errors)
}

// Seules les pannes sont journalisées en erreur, avec le détail
fn log_fault(operation: &'static str, id_annonce: Option<i32>, err: &ListingError) {
    if err.is_fault() {
        error!(operation, ?id_annonce, error = %err, "Listing operation failed");
    }
}
