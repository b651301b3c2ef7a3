//! Route access decisions for the portal shell.
//!
//! The guard runs on every path or role change. Its rules are evaluated in
//! order and the first match wins:
//!
//! 1. signed out and the target is not public: go to the landing page;
//! 2. signed in and the target is `/login` or bare `/dashboard`: go to the
//!    role's own dashboard;
//! 3. signed in and the target is another role's dashboard: go to the role's
//!    own dashboard;
//! 4. anything else is allowed.
//!
//! Roles without a dashboard are sent to the landing page wherever a
//! dashboard redirect would apply.

use serde::Serialize;

use crate::role::SessionRole;
use crate::route::{LANDING_PATH, LOGIN_PATH, RouteClass, classify_route, normalize_path};

/// Outcome of evaluating a navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation proceeds.
    Allow,
    /// Navigation is redirected.
    Redirect {
        /// Path to navigate to instead.
        location: String,
        /// Replace the current history entry instead of pushing one.
        replace: bool,
    },
}

impl GuardDecision {
    fn redirect(location: &str) -> Self {
        Self::Redirect {
            location: location.to_owned(),
            replace: true,
        }
    }

    /// Returns the redirect location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect { location, .. } => Some(location.as_str()),
        }
    }

    /// Returns whether navigation proceeds unchanged.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether `target_path` may be shown for the session role.
#[must_use]
pub fn evaluate_navigation(session_role: &SessionRole, target_path: &str) -> GuardDecision {
    let path = normalize_path(target_path);
    let route = classify_route(&path);

    let Some(role) = session_role.role() else {
        return match route {
            RouteClass::Public => GuardDecision::Allow,
            _ => GuardDecision::redirect(LANDING_PATH),
        };
    };

    let own_dashboard = role.dashboard_path();
    let home = own_dashboard.unwrap_or(LANDING_PATH);

    match route {
        RouteClass::DashboardIndex => GuardDecision::redirect(home),
        RouteClass::Public if path == LOGIN_PATH => GuardDecision::redirect(home),
        RouteClass::Dashboard(dashboard) if Some(dashboard.as_str()) != own_dashboard => {
            GuardDecision::redirect(home)
        }
        _ => GuardDecision::Allow,
    }
}
