use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use rand::Rng;
use thiserror::Error;

/// Nombre d'itérations par défaut (même valeur que l'ancien format Werkzeug)
pub const DEFAULT_ROUNDS: u32 = 260000;
const KEY_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Invalid hash format: {0}")]
    InvalidHash(String),

    #[error("Password task failed: {0}")]
    Task(String),
}

/// Hash un mot de passe au format PHC
/// Utilise PBKDF2-HMAC-SHA256 avec un salt aléatoire de 16 bytes
/// Format: $pbkdf2-sha256$i=<rounds>,l=32$<salt>$<hash>
pub fn hash_password(password: &str, rounds: u32) -> Result<String, PasswordError> {
    // Générer un salt aléatoire de 16 bytes
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| PasswordError::Hash(e.to_string()))?;

    let params = Params {
        rounds,
        output_length: KEY_LENGTH,
    };

    Pbkdf2
        .hash_password_customized(password.as_bytes(), None, None, params, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Vérifie un mot de passe contre un hash PHC
/// L'algorithme et les paramètres sont lus dans le hash lui-même
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(pbkdf2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
    }
}

/// hash_password sur le pool de threads bloquants
/// Les workers actix ne restent pas bloqués pendant les itérations PBKDF2
pub async fn hash_password_in_pool(password: String, rounds: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, rounds))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// verify_password sur le pool de threads bloquants
pub async fn verify_password_in_pool(
    password: String,
    stored_hash: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ROUNDS: u32 = 1000;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("secret123", TEST_ROUNDS).unwrap();

        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$pbkdf2-sha256$"));
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("Secret123", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("secret123", TEST_ROUNDS).unwrap();
        let second = hash_password("secret123", TEST_ROUNDS).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("secret123", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[actix_web::test]
    async fn test_hash_and_verify_in_pool() {
        let hash = hash_password_in_pool("secret123".to_string(), TEST_ROUNDS)
            .await
            .unwrap();

        assert!(verify_password("secret123", &hash).unwrap());
        assert!(verify_password_in_pool("secret123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_in_pool("wrong".to_string(), hash).await.unwrap());
    }
}
