//! Per-step validation of the inscription form.

use regex::Regex;
use thiserror::Error;

use crate::benefits::{BenefitContext, BenefitType};
use crate::form::InscriptionForm;
use crate::wizard::Step;

/// Institutional email suffix accepted by the form.
pub const EMAIL_DOMAIN: &str = "@itba.edu.ar";

/// The single message surfaced above the form when a step fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingField(&'static str),

    #[error("Email inválido")]
    InvalidFormat,

    #[error("Debes usar un email con dominio @itba.edu.ar")]
    DomainNotAllowed,

    #[error("{0}")]
    MissingSelection(&'static str),

    #[error("Debes aceptar los términos y condiciones")]
    TermsNotAccepted,
}

/// Gate for a forward transition out of `step`.
///
/// Checks run in a fixed order and the first failure is returned, so the
/// member always sees one message at a time.
pub fn validate(
    step: Step,
    form: &InscriptionForm,
    benefit: &BenefitContext,
) -> Result<(), ValidationError> {
    match step {
        Step::Identity => validate_identity(form),
        Step::Contact => validate_contact(form),
        Step::Preferences => validate_preferences(form, benefit),
        Step::Done => Ok(()),
    }
}

fn validate_identity(form: &InscriptionForm) -> Result<(), ValidationError> {
    if form.personal.first_name.trim().is_empty() {
        return Err(ValidationError::MissingField("El nombre es requerido"));
    }
    if form.personal.last_name.trim().is_empty() {
        return Err(ValidationError::MissingField("El apellido es requerido"));
    }
    if form.personal.student_id.trim().is_empty() {
        return Err(ValidationError::MissingField("El legajo es requerido"));
    }
    if form.personal.career.is_empty() {
        return Err(ValidationError::MissingField("La carrera es requerida"));
    }

    Ok(())
}

fn validate_contact(form: &InscriptionForm) -> Result<(), ValidationError> {
    let email = form.contact.email.trim();

    if email.is_empty() {
        return Err(ValidationError::MissingField("El email es requerido"));
    }

    let shape = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
    if !shape.is_match(email) {
        return Err(ValidationError::InvalidFormat);
    }
    if !email.ends_with(EMAIL_DOMAIN) {
        return Err(ValidationError::DomainNotAllowed);
    }

    if form.contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingField("El teléfono es requerido"));
    }

    Ok(())
}

fn validate_preferences(
    form: &InscriptionForm,
    benefit: &BenefitContext,
) -> Result<(), ValidationError> {
    if benefit.benefit_type() == BenefitType::Language && form.level().is_none() {
        return Err(ValidationError::MissingSelection(
            "Por favor selecciona un nivel de idioma",
        ));
    }

    let wants_schedule = matches!(
        benefit.benefit_type(),
        BenefitType::Sport | BenefitType::Activity
    ) && !benefit.times().is_empty();

    if wants_schedule && form.preferences.selected_schedules.is_empty() {
        return Err(ValidationError::MissingSelection(
            "Por favor selecciona al menos un horario",
        ));
    }

    if !form.preferences.terms_accepted {
        return Err(ValidationError::TermsNotAccepted);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::benefits::{schedule_key, Benefit, BenefitTime, Language};

    use super::*;

    fn sport() -> BenefitContext {
        BenefitContext::Sport(Benefit {
            id: "futbol-5".to_string(),
            name: "Fútbol 5".to_string(),
            times: Some(vec![BenefitTime {
                day: "Lunes".to_string(),
                hour_from: "18:00".to_string(),
                hour_to: "20:00".to_string(),
                place: "Campus".to_string(),
                place_url: None,
            }]),
            ..Default::default()
        })
    }

    fn language() -> BenefitContext {
        BenefitContext::Language(Language {
            id: "ingles".to_string(),
            name: "Inglés".to_string(),
            levels: Some(vec!["B1".to_string(), "B2".to_string()]),
            ..Default::default()
        })
    }

    fn filled_form() -> InscriptionForm {
        let mut form = InscriptionForm::default();
        form.personal.first_name = "Ana".to_string();
        form.personal.last_name = "Diaz".to_string();
        form.personal.student_id = "12345".to_string();
        form.personal.career = "Ingeniería Informática".to_string();
        form.contact.email = "ana@itba.edu.ar".to_string();
        form.contact.phone = "1122334455".to_string();
        form
    }

    #[test]
    fn identity_requires_every_field() {
        let benefit = sport();
        let mut form = filled_form();

        form.personal.career = String::new();
        assert_eq!(
            validate(Step::Identity, &form, &benefit),
            Err(ValidationError::MissingField("La carrera es requerida"))
        );

        form.personal.career = "Ingeniería Informática".to_string();
        assert_eq!(validate(Step::Identity, &form, &benefit), Ok(()));
    }

    #[test]
    fn identity_rejects_whitespace_only_names() {
        let mut form = filled_form();
        form.personal.first_name = "   ".to_string();

        assert_eq!(
            validate(Step::Identity, &form, &sport()),
            Err(ValidationError::MissingField("El nombre es requerido"))
        );
    }

    #[test]
    fn contact_checks_shape_before_domain() {
        let mut form = filled_form();

        form.contact.email = "no-arroba".to_string();
        assert_eq!(
            validate(Step::Contact, &form, &sport()),
            Err(ValidationError::InvalidFormat)
        );

        form.contact.email = "ana@gmail.com".to_string();
        assert_eq!(
            validate(Step::Contact, &form, &sport()),
            Err(ValidationError::DomainNotAllowed)
        );

        form.contact.email = "ana@itba.edu.ar".to_string();
        assert_eq!(validate(Step::Contact, &form, &sport()), Ok(()));
    }

    #[test]
    fn contact_requires_phone_after_email_passes() {
        let mut form = filled_form();
        form.contact.phone = String::new();

        assert_eq!(
            validate(Step::Contact, &form, &sport()),
            Err(ValidationError::MissingField("El teléfono es requerido"))
        );
    }

    #[test]
    fn preferences_require_a_schedule_when_slots_exist() {
        let benefit = sport();
        let mut form = filled_form();
        form.preferences.terms_accepted = true;

        // Missing schedule wins over accepted terms.
        assert_eq!(
            validate(Step::Preferences, &form, &benefit),
            Err(ValidationError::MissingSelection(
                "Por favor selecciona al menos un horario"
            ))
        );

        form.toggle_schedule(&schedule_key(&benefit.times()[0]));
        assert_eq!(validate(Step::Preferences, &form, &benefit), Ok(()));

        form.preferences.terms_accepted = false;
        assert_eq!(
            validate(Step::Preferences, &form, &benefit),
            Err(ValidationError::TermsNotAccepted)
        );
    }

    #[test]
    fn preferences_skip_schedules_when_no_slots_are_offered() {
        let benefit = BenefitContext::Sport(Benefit {
            id: "ajedrez".to_string(),
            name: "Ajedrez".to_string(),
            ..Default::default()
        });
        let mut form = filled_form();
        form.preferences.terms_accepted = true;

        assert_eq!(validate(Step::Preferences, &form, &benefit), Ok(()));
    }

    #[test]
    fn preferences_require_a_level_for_languages() {
        let benefit = language();
        let mut form = filled_form();
        form.preferences.terms_accepted = true;

        assert_eq!(
            validate(Step::Preferences, &form, &benefit),
            Err(ValidationError::MissingSelection(
                "Por favor selecciona un nivel de idioma"
            ))
        );

        // "No sé" is a real choice in the form.
        form.preferences.language_level = Some("n/a".to_string());
        assert_eq!(validate(Step::Preferences, &form, &benefit), Ok(()));
    }

    #[test]
    fn done_never_validates() {
        let form = InscriptionForm::default();
        assert_eq!(validate(Step::Done, &form, &sport()), Ok(()));
    }
}
