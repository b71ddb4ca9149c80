//! Role-gated access to the administrative back office.
//!
//! The authenticated user travels as an explicit [`AuthContext`] value,
//! injected into whatever needs a role check. Gating itself is the pure
//! [`authorize`] function, so it stays testable without a live session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Staff branches known to the portal. Upstream may grow new ones before we
/// do, those land on `Unknown` instead of failing the whole user parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Branch {
    It,
    Media,
    Infra,
    Deportes,
    Nautica,
    Eventos,
    Directivos,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffType {
    Presidente,
    Vicepresidente,
    Secretaria,
    Tesoreria,
    Lider,
    Miembro,
    #[serde(other)]
    Unknown,
}

/// A staff appointment, with its validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub branch: Branch,
    pub role: StaffType,
    #[serde(with = "flexible_date")]
    pub start: NaiveDate,
    #[serde(default, with = "flexible_date_opt")]
    pub end: Option<NaiveDate>,
}

/// An organization membership carried on the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_name: String,
    pub role: String,
}

/// The member record served by the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub file_number: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub career_id: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub organizations: Option<Vec<Organization>>,
}

/// What a route or view demands before letting a user in.
#[derive(Debug, Clone, Copy)]
pub enum Access<'a> {
    /// Any authenticated user.
    Any,
    /// Users whose appointment sits in one of the given branches.
    Branches(&'a [Branch]),
}

/// Pure back-office gate. IT and Directivos pass everything; everyone else
/// needs an appointment in one of the allowed branches.
pub fn authorize(user: &User, access: Access<'_>) -> bool {
    let Some(role) = &user.role else {
        return matches!(access, Access::Any);
    };

    if matches!(role.branch, Branch::It | Branch::Directivos) {
        return true;
    }

    match access {
        Access::Any => true,
        Access::Branches(allowed) => allowed.contains(&role.branch),
    }
}

/// Explicitly passed authentication state.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_role(&self, branch: Branch) -> bool {
        self.branch() == Some(branch)
    }

    pub fn has_any_role(&self, branches: &[Branch]) -> bool {
        self.branch().is_some_and(|branch| branches.contains(&branch))
    }

    /// Anonymous contexts never pass, regardless of the demanded access.
    pub fn authorize(&self, access: Access<'_>) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| authorize(user, access))
    }

    fn branch(&self) -> Option<Branch> {
        self.user
            .as_ref()
            .and_then(|user| user.role.as_ref())
            .map(|role| role.branch)
    }
}

/// Appointment dates arrive in two formats in the wild: canonical ISO
/// `yyyy-mm-dd` (possibly with a time part) and legacy `dd/mm/yyyy`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;

        super::parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {raw}")))
    }
}

mod flexible_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;

        match raw {
            None => Ok(None),
            Some(raw) => super::parse_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn member(branch: Option<Branch>) -> User {
        User {
            id: "u-1".to_string(),
            email: "ana@itba.edu.ar".to_string(),
            file_number: Some(61234),
            name: Some("Ana Diaz".to_string()),
            career_id: None,
            plan: None,
            role: branch.map(|branch| Role {
                branch,
                role: StaffType::Miembro,
                start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                end: None,
            }),
            organizations: None,
        }
    }

    #[test]
    fn it_and_directivos_pass_everything() {
        let gate = [Branch::Deportes];

        assert!(authorize(&member(Some(Branch::It)), Access::Branches(&gate)));
        assert!(authorize(
            &member(Some(Branch::Directivos)),
            Access::Branches(&gate)
        ));
        assert!(!authorize(
            &member(Some(Branch::Media)),
            Access::Branches(&gate)
        ));
        assert!(authorize(
            &member(Some(Branch::Deportes)),
            Access::Branches(&gate)
        ));
    }

    #[test]
    fn any_access_only_needs_authentication() {
        assert!(authorize(&member(None), Access::Any));
        assert!(!authorize(&member(None), Access::Branches(&[Branch::It])));
    }

    #[test]
    fn anonymous_context_never_passes() {
        let context = AuthContext::anonymous();

        assert!(!context.is_authenticated());
        assert!(!context.authorize(Access::Any));
        assert!(!context.has_role(Branch::It));
    }

    #[test]
    fn context_role_checks_match_the_appointment() {
        let context = AuthContext::authenticated(member(Some(Branch::Nautica)));

        assert!(context.has_role(Branch::Nautica));
        assert!(context.has_any_role(&[Branch::Media, Branch::Nautica]));
        assert!(!context.has_any_role(&[Branch::Media, Branch::Eventos]));
    }

    #[test]
    fn user_parses_with_both_date_formats() {
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "email": "ana@itba.edu.ar",
            "role": {
                "branch": "DEPORTES",
                "role": "LIDER",
                "start": "01/03/2025",
                "end": "2025-12-31",
            },
        }))
        .unwrap();

        let role = user.role.unwrap();
        assert_eq!(role.branch, Branch::Deportes);
        assert_eq!(role.start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(role.end, Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    }

    #[test]
    fn unknown_branch_does_not_fail_the_parse() {
        let user: User = serde_json::from_value(json!({
            "id": "u-2",
            "email": "leo@itba.edu.ar",
            "role": {
                "branch": "ROBOTICA",
                "role": "MIEMBRO",
                "start": "2026-03-01",
            },
        }))
        .unwrap();

        assert_eq!(user.role.unwrap().branch, Branch::Unknown);
    }

    #[test]
    fn datetime_starts_are_trimmed_to_the_date() {
        assert_eq!(
            parse_date("2025-03-01T00:00:00Z"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(parse_date("31-12-2025"), None);
    }
}
