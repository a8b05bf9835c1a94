// ============================================================================
// MODÈLE : ANNONCE
// ============================================================================
//
// Description:
//   Une petite annonce déposée par un annonceur.
//
// Colonnes de la table annonce:
//   - id_annonce (INTEGER, PRIMARY KEY, SERIAL)
//   - id_annonceur (INTEGER, NOT NULL, FK vers annonceur)
//   - id_categorie (INTEGER, NOT NULL, FK vers categorie)
//   - id_departement (INTEGER, NOT NULL, FK vers departement)
//   - titre, description, ville (VARCHAR / TEXT, NOT NULL)
//   - prix (INTEGER, NOT NULL) - en unités entières
//   - date (DATE, NOT NULL) - date de dépôt
//   - mdp (VARCHAR, NOT NULL) - hash PHC, jamais le mot de passe en clair
//
// Points d'attention:
//   - mdp est écrit une seule fois à la création, aucune route ne le modifie
//   - mdp n'est jamais sérialisé vers les vues
//   - Supprimer une annonce ne supprime pas son annonceur
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annonce")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_annonce: i32,
    pub id_annonceur: i32,
    pub id_categorie: i32,
    pub id_departement: i32,
    pub titre: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub prix: i32,
    pub ville: String,
    pub date: Date,
    #[serde(skip_serializing)] // Ne jamais exposer le hash dans les vues
    pub mdp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::annonceur::Entity",
        from = "Column::IdAnnonceur",
        to = "super::annonceur::Column::IdAnnonceur"
    )]
    Annonceur,

    #[sea_orm(
        belongs_to = "super::categorie::Entity",
        from = "Column::IdCategorie",
        to = "super::categorie::Column::IdCategorie"
    )]
    Categorie,

    #[sea_orm(
        belongs_to = "super::departement::Entity",
        from = "Column::IdDepartement",
        to = "super::departement::Column::IdDepartement"
    )]
    Departement,

    #[sea_orm(has_many = "super::photo::Entity")]
    Photo,
}

impl Related<super::annonceur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Annonceur.def()
    }
}

impl Related<super::categorie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorie.def()
    }
}

impl Related<super::departement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departement.def()
    }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
