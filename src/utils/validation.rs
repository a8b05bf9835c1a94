// ============================================================================
// VALIDATION DES FORMULAIRES
// ============================================================================
//
// Description:
//   Fonctions pures de validation du formulaire de dépôt d'annonce.
//
// Clés d'erreur reconnues (FormField):
//   - nameAdvertiser : nom de l'annonceur vide
//   - emailAdvertiser : email invalide
//   - passwordConfirmation : les deux mots de passe diffèrent
//   - category / department : référence inconnue lors d'une modification
//
// Points d'attention:
//   - Seuls le nom, l'email et la confirmation du mot de passe sont vérifiés.
//     Ville, prix, titre, description, catégorie et département passent tels
//     quels (comportement historique du formulaire, couvert par un test)
//
// ============================================================================

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::models::dto::NewListingForm;

const TOP_LEVEL_LABELS: &str = "ad|ae|aero|af|ag|ai|al|am|an|ao|aq|ar|arpa|as|at|au|aw|az|ba|bb|bd|be|bf|bg|bh|bi|biz|bj|bm|bn|bo|br|bs|bt|bv|bw|by|bz|ca|cc|cd|cf|cg|ch|ci|ck|cl|cm|cn|co|com|coop|cr|cs|cu|cv|cx|cy|cz|de|dj|dk|dm|do|dz|ec|edu|ee|eg|eh|er|es|et|eu|fi|fj|fk|fm|fo|fr|ga|gb|gd|ge|gf|gh|gi|gl|gm|gn|gov|gp|gq|gr|gs|gt|gu|gw|gy|hk|hm|hn|hr|ht|hu|id|ie|il|in|info|int|io|iq|ir|is|it|jm|jo|jp|ke|kg|kh|ki|km|kn|kp|kr|kw|ky|kz|la|lb|lc|li|lk|lr|ls|lt|lu|lv|ly|ma|mc|md|mg|mh|mil|mk|ml|mm|mn|mo|mp|mq|mr|ms|mt|mu|museum|mv|mw|mx|my|mz|na|name|nc|ne|net|nf|ng|ni|nl|no|np|nr|nt|nu|nz|om|org|pa|pe|pf|pg|ph|pk|pl|pm|pn|pr|pro|ps|pt|pw|py|qa|re|ro|ru|rw|sa|sb|sc|sd|se|sg|sh|si|sj|sk|sl|sm|sn|so|sr|st|su|sv|sy|sz|tc|td|tf|tg|th|tj|tk|tm|tn|to|tp|tr|tt|tv|tw|tz|ua|ug|uk|um|us|uy|uz|va|vc|ve|vg|vi|vn|vu|wf|ws|ye|yt|yu|za|zm|zw";

// Un octet IPv4 entre 0 et 255
const IPV4_OCTET: &str = "(?:[0-9][0-9]?|[0-1][0-9][0-9]|2[0-4][0-9]|25[0-5])";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)^[-_.[:alnum:]]+@(?:(?:(?:[[:alnum:]]|[[:alnum:]][[:alnum:]-]*[[:alnum:]])\.)+(?:{tld})|(?:{octet}\.){{3}}{octet})$",
        tld = TOP_LEVEL_LABELS,
        octet = IPV4_OCTET,
    );
    Regex::new(&pattern).expect("email pattern is a valid regex")
});

/// Clés d'erreur du formulaire de dépôt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    NameAdvertiser,
    EmailAdvertiser,
    PasswordConfirmation,
    Category,
    Department,
}

/// Erreurs de validation: champ -> message affiché à l'annonceur
pub type FieldErrors = BTreeMap<FormField, String>;

/// Vérifie si une chaîne est un email valide
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Vérifie que le mot de passe et sa confirmation sont identiques
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

/// Valide le formulaire de dépôt
/// Retourne une map vide si le formulaire est acceptable
pub fn validate_submission(form: &NewListingForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert(FormField::NameAdvertiser, "Veuillez entrer votre nom".to_string());
    }
    if !is_valid_email(form.email.trim()) {
        errors.insert(
            FormField::EmailAdvertiser,
            "Veuillez entrer une adresse mail correcte".to_string(),
        );
    }
    if !passwords_match(&form.password, &form.password_confirmation) {
        errors.insert(
            FormField::PasswordConfirmation,
            "Les mots de passe ne correspondent pas".to_string(),
        );
    }

    errors
}

#[cfg(test)]
pub(crate) fn sample_form() -> NewListingForm {
    NewListingForm {
        name: "Julie Waltispurger".to_string(),
        email: "julie@example.com".to_string(),
        phone: Some("1234567890".to_string()),
        city: "Paris".to_string(),
        department_id: 75,
        category_id: 1,
        title: "Sample Title".to_string(),
        description: "Sample Description".to_string(),
        price: 100,
        password: "password".to_string(),
        password_confirmation: "password".to_string(),
    }
}
