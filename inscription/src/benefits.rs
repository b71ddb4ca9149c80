//! Benefit catalogue shapes, as served by the upstream API.

use serde::{Deserialize, Serialize};

/// One offered time slot of a sport or activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitTime {
    pub day: String,
    pub hour_from: String,
    pub hour_to: String,
    pub place: String,
    pub place_url: Option<String>,
}

/// A sport or activity offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: String,
    pub name: String,
    pub inscription_url: Option<String>,
    pub max_capacity: Option<u32>,
    pub teachers: Option<Vec<String>>,
    pub notes: Option<String>,
    pub times: Option<Vec<BenefitTime>>,
}

/// An agreement with an external provider, with a fixed schedule and place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: String,
    pub name: String,
    pub inscription_url: Option<String>,
    pub schedule: Option<Vec<String>>,
    pub place: Option<String>,
    pub place_url: Option<String>,
    pub max_capacity: Option<u32>,
    pub teachers: Option<Vec<String>>,
    pub notes: Option<String>,
    pub price: Option<f64>,
}

/// A language course offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub inscription_url: Option<String>,
    pub notes: Option<String>,
    pub levels: Option<Vec<String>>,
    pub prices: Option<Vec<String>>,
}

/// The full catalogue returned by `/api/benefits`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenefitsData {
    #[serde(default)]
    pub sports: Vec<Benefit>,
    #[serde(default)]
    pub activities: Vec<Benefit>,
    #[serde(default)]
    pub agreements: Vec<Agreement>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl BenefitsData {
    /// Looks a benefit up by name, case-insensitively, across all families.
    pub fn find(&self, name: &str) -> Option<BenefitContext> {
        let matches = |candidate: &str| candidate.eq_ignore_ascii_case(name);

        if let Some(sport) = self.sports.iter().find(|b| matches(&b.name)) {
            return Some(BenefitContext::Sport(sport.clone()));
        }
        if let Some(activity) = self.activities.iter().find(|b| matches(&b.name)) {
            return Some(BenefitContext::Activity(activity.clone()));
        }
        if let Some(agreement) = self.agreements.iter().find(|a| matches(&a.name)) {
            return Some(BenefitContext::Agreement(agreement.clone()));
        }
        if let Some(language) = self.languages.iter().find(|l| matches(&l.name)) {
            return Some(BenefitContext::Language(language.clone()));
        }

        None
    }
}

/// The `type` tag travelling with every inscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    Sport,
    Activity,
    Agreement,
    Language,
}

/// The benefit the wizard was opened for.
///
/// Handed to the wizard as an explicit constructor argument by the page that
/// selected it. Immutable for the lifetime of the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum BenefitContext {
    Sport(Benefit),
    Activity(Benefit),
    Agreement(Agreement),
    Language(Language),
}

impl BenefitContext {
    pub fn benefit_type(&self) -> BenefitType {
        match self {
            BenefitContext::Sport(_) => BenefitType::Sport,
            BenefitContext::Activity(_) => BenefitType::Activity,
            BenefitContext::Agreement(_) => BenefitType::Agreement,
            BenefitContext::Language(_) => BenefitType::Language,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BenefitContext::Sport(b) | BenefitContext::Activity(b) => &b.id,
            BenefitContext::Agreement(a) => &a.id,
            BenefitContext::Language(l) => &l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BenefitContext::Sport(b) | BenefitContext::Activity(b) => &b.name,
            BenefitContext::Agreement(a) => &a.name,
            BenefitContext::Language(l) => &l.name,
        }
    }

    /// Time slots offered by the benefit. Empty for agreements and languages.
    pub fn times(&self) -> &[BenefitTime] {
        match self {
            BenefitContext::Sport(b) | BenefitContext::Activity(b) => {
                b.times.as_deref().unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Course levels offered by the benefit. Empty unless it is a language.
    pub fn levels(&self) -> &[String] {
        match self {
            BenefitContext::Language(l) => l.levels.as_deref().unwrap_or(&[]),
            _ => &[],
        }
    }
}

/// Composite key identifying one selected time slot.
///
/// Uniqueness of a selection is string equality on this key, not structural
/// comparison of the slot.
pub fn schedule_key(time: &BenefitTime) -> String {
    format!(
        "{} {} - {} {}",
        time.day, time.hour_from, time.hour_to, time.place
    )
}
