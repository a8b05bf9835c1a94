mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod utils;
mod views;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::views::{JsonRenderer, Renderer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("annonces=info,actix_web=info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("Connecting to database...");
    let db = db::establish_connection(&config.database_url).await?;
    if config.auto_schema {
        db::sync_schema(&db).await?;
    }
    info!("Database connected");

    let renderer: Arc<dyn Renderer> = Arc::new(JsonRenderer);
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);
    let renderer = web::Data::from(renderer);

    info!("Starting server on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(config.clone())
            .app_data(renderer.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
