use actix_web::http::StatusCode;
use sea_orm::DbErr;
use thiserror::Error;

use crate::utils::password::PasswordError;
use crate::utils::validation::FieldErrors;

/// Message affiché à l'utilisateur pour toute erreur interne.
/// Le détail reste dans les logs.
pub const GENERIC_FAILURE: &str = "Une erreur est survenue, veuillez réessayer plus tard";

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Invalid submission ({} field errors)", .0.len())]
    Validation(FieldErrors),

    #[error("Listing not found")]
    NotFound,

    #[error("Storage failure: {0}")]
    Storage(#[from] DbErr),

    #[error("Password hashing failure: {0}")]
    Hashing(#[from] PasswordError),
}

impl ListingError {
    /// Vrai pour les erreurs qui doivent être journalisées comme pannes
    pub fn is_fault(&self) -> bool {
        matches!(self, ListingError::Storage(_) | ListingError::Hashing(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingError::NotFound => StatusCode::NOT_FOUND,
            ListingError::Storage(_) | ListingError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::FormField;

    #[test]
    fn test_storage_error_is_a_fault() {
        let err = ListingError::Storage(DbErr::Custom("relation annonce does not exist".to_string()));

        assert!(err.is_fault());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_not_a_fault() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::NameAdvertiser, "Veuillez entrer votre nom".to_string());
        let err = ListingError::Validation(errors);

        assert!(!err.is_fault());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!ListingError::NotFound.is_fault());
        assert_eq!(ListingError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }
}
