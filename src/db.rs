// connexion BD

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};
use tracing::{debug, info};

use crate::models::{annonce, annonceur, categorie, departement, photo};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Crée les tables manquantes à partir des entités
/// Ordre: les tables référencées avant celles qui portent les clés étrangères
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, categorie::Entity).await?;
    create_table(db, departement::Entity).await?;
    create_table(db, annonceur::Entity).await?;
    create_table(db, annonce::Entity).await?;
    create_table(db, photo::Entity).await?;

    info!("Schema ready");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    debug!(table = entity.table_name(), "Creating table if missing");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
pub mod testing {
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

    use crate::models::{categorie, departement};

    pub const CATEGORY_ID: i32 = 1;
    pub const OTHER_CATEGORY_ID: i32 = 2;
    pub const DEPARTMENT_ID: i32 = 75;
    pub const OTHER_DEPARTMENT_ID: i32 = 69;

    /// Base SQLite en mémoire avec le schéma et quelques données de référence
    pub async fn setup_db() -> DatabaseConnection {
        // Une seule connexion: chaque connexion :memory: est une base distincte
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        super::sync_schema(&db).await.unwrap();

        for (id, nom) in [(CATEGORY_ID, "Véhicules"), (OTHER_CATEGORY_ID, "Immobilier")] {
            categorie::ActiveModel {
                id_categorie: Set(id),
                nom_categorie: Set(nom.to_string()),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        for (id, nom) in [(DEPARTMENT_ID, "Paris"), (OTHER_DEPARTMENT_ID, "Rhône")] {
            departement::ActiveModel {
                id_departement: Set(id),
                nom_departement: Set(nom.to_string()),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        db
    }
}
