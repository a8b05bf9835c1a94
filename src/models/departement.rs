use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_departement: i32,
    pub nom_departement: String,
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
