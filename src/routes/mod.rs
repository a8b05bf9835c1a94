pub mod health;
pub mod index;
pub mod add_item;
pub mod item;

use actix_web::web;
use sea_orm::DatabaseConnection;
use tracing::error;

use crate::config::Config;
use crate::error::ListingError;
use crate::services::reference_service::ReferenceService;
use crate::views::page::PageContext;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
    )
        .configure(index::index_routes)
        .configure(add_item::add_item_routes)
        .configure(item::item_routes);
}

/// Contexte commun d'une page: chemin, fil d'Ariane et menu des catégories
pub(crate) async fn page_context(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<PageContext, ListingError> {
    let categories = ReferenceService::list_categories(db)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to load categories"))?;

    Ok(PageContext::new(&config.base_path, categories))
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::Config;

    pub fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_path: String::new(),
            hash_rounds: 1000,
            feed_limit: 12,
            auto_schema: false,
        }
    }

    /// Application complète branchée sur une base de test et le JsonRenderer
    macro_rules! test_app {
        ($db:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data(actix_web::web::Data::new($db.clone()))
                    .app_data(actix_web::web::Data::new($crate::routes::testing::test_config()))
                    .app_data(actix_web::web::Data::from(std::sync::Arc::new(
                        $crate::views::JsonRenderer,
                    )
                        as std::sync::Arc<dyn $crate::views::Renderer>))
                    .configure($crate::routes::configure_routes),
            )
            .await
        };
    }

    pub(crate) use test_app;
}
