use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::services::listing_service::DEFAULT_FEED_LIMIT;
use crate::utils::password::DEFAULT_ROUNDS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Configuration du serveur, lue depuis l'environnement (.env chargé par dotenv)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Préfixe des liens générés dans les vues ("chemin")
    pub base_path: String,
    pub hash_rounds: u32,
    pub feed_limit: u64,
    /// Crée les tables manquantes au démarrage
    pub auto_schema: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture des clés
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let base_path = lookup("BASE_PATH").unwrap_or_default();

        Ok(Config {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            base_path: base_path.trim_end_matches('/').to_string(),
            hash_rounds: parse_or(&lookup, "HASH_ROUNDS", DEFAULT_ROUNDS)?,
            feed_limit: parse_or(&lookup, "FEED_LIMIT", DEFAULT_FEED_LIMIT)?,
            auto_schema: parse_or(&lookup, "AUTO_SCHEMA", true)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
