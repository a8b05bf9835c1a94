// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - annonce : Les petites annonces (mot de passe hashé)
//   - annonceur : Les personnes qui déposent les annonces
//   - categorie : Catégories (données de référence)
//   - departement : Départements (données de référence)
//   - photo : URLs des photos d'une annonce
//   - dto : Formulaires reçus et structures pour les vues
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les relations entre tables sont définies dans chaque modèle
//
// ============================================================================

pub mod health;
pub mod annonce;
pub mod annonceur;
pub mod categorie;
pub mod departement;
pub mod photo;
pub mod dto;
