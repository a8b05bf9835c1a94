use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annonceur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_annonceur: i32,
    pub nom_annonceur: String,
    pub email: String,
    pub telephone: Option<String>, // Facultatif dans le formulaire
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::annonce::Entity")]
    Annonce,
}

impl Related<super::annonce::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Annonce.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
