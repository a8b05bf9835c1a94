use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_photo: i32,
    pub id_annonce: i32,
    pub url_photo: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Pas de ON DELETE CASCADE: les photos sont supprimées explicitement
    // avant l'annonce (voir ListingService::delete_listing)
    #[sea_orm(
        belongs_to = "super::annonce::Entity",
        from = "Column::IdAnnonce",
        to = "super::annonce::Column::IdAnnonce"
    )]
    Annonce,
}

impl Related<super::annonce::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Annonce.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
