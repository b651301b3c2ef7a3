use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Role granted to a signed-in portal user.
///
/// Stored values outside the four known roles are kept verbatim as
/// [`Role::Other`]. Such a role is signed in but owns no dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Hospital administrator.
    Admin,
    /// Practising doctor.
    Doctor,
    /// Operations manager (inventory and billing).
    Manager,
    /// Patient self-service.
    Patient,
    /// Any unrecognised role value.
    Other(String),
}

impl Role {
    /// Parses a stored role value. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "doctor" => Self::Doctor,
            "manager" => Self::Manager,
            "patient" => Self::Patient,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Manager => "manager",
            Self::Patient => "patient",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Returns the dashboard owned by this role, if any.
    #[must_use]
    pub fn dashboard_path(&self) -> Option<&'static str> {
        match self {
            Self::Admin => Some("/dashboard/admin"),
            Self::Doctor => Some("/dashboard/doctor"),
            Self::Manager => Some("/dashboard/manager"),
            Self::Patient => Some("/dashboard/patient"),
            Self::Other(_) => None,
        }
    }

    /// Returns every role that owns a dashboard.
    #[must_use]
    pub fn known() -> [Self; 4] {
        [Self::Admin, Self::Doctor, Self::Manager, Self::Patient]
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Role held by the current session, with an explicit signed-out state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionRole {
    /// Nobody is signed in.
    #[default]
    None,
    /// A role was assigned at login.
    Assigned(Role),
}

impl SessionRole {
    /// Builds a session role from the raw stored value.
    ///
    /// A missing or blank value means signed out.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if !value.is_empty() => Self::Assigned(Role::parse(value)),
            _ => Self::None,
        }
    }

    /// Returns the assigned role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        match self {
            Self::None => None,
            Self::Assigned(role) => Some(role),
        }
    }

    /// Returns whether a role is assigned.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// Returns the dashboard of the assigned role, if both exist.
    #[must_use]
    pub fn dashboard_path(&self) -> Option<&'static str> {
        self.role().and_then(Role::dashboard_path)
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, SessionRole};

    #[test]
    fn known_roles_roundtrip_storage_value() {
        for role in Role::known() {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert_eq!(Role::parse("Admin"), Role::Other("Admin".to_owned()));
    }

    #[test]
    fn unknown_role_has_no_dashboard() {
        assert_eq!(Role::parse("staff").dashboard_path(), None);
        assert_eq!(Role::Doctor.dashboard_path(), Some("/dashboard/doctor"));
    }

    #[test]
    fn blank_stored_value_is_signed_out() {
        assert_eq!(SessionRole::from_stored(None), SessionRole::None);
        assert_eq!(SessionRole::from_stored(Some("  ")), SessionRole::None);
        assert_eq!(
            SessionRole::from_stored(Some("manager")),
            SessionRole::Assigned(Role::Manager)
        );
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let encoded = serde_json::to_string(&Role::Patient).unwrap_or_default();
        assert_eq!(encoded, "\"patient\"");

        let decoded = serde_json::from_str::<Role>("\"staff\"");
        assert!(matches!(decoded, Ok(Role::Other(value)) if value == "staff"));
    }
}
