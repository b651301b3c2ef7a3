use hopespring_application::{LoginOutcome, SessionView};
use hopespring_domain::{GuardDecision, NavigationItem};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for credential login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub role: String,
    pub dashboard_path: Option<String>,
    pub redirect_to: String,
}

/// One sidebar entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/navigation-item-response.ts"
)]
pub struct NavigationItemResponse {
    pub label: String,
    pub path: String,
}

/// Current session summary for the shell.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/session-response.ts"
)]
pub struct SessionResponse {
    pub role: Option<String>,
    pub dashboard_path: Option<String>,
    pub menu: Vec<NavigationItemResponse>,
}

/// Navigation target to evaluate.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/navigation-query.ts"
)]
pub struct NavigationQuery {
    pub path: String,
}

/// Guard answer for one navigation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/portal-types/src/generated/navigation-decision-response.ts"
)]
pub struct NavigationDecisionResponse {
    pub allowed: bool,
    pub location: Option<String>,
    pub replace: bool,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        let redirect_to = outcome.next.location().unwrap_or("/").to_owned();
        Self {
            dashboard_path: outcome.role.dashboard_path().map(ToOwned::to_owned),
            role: outcome.role.as_str().to_owned(),
            redirect_to,
        }
    }
}

impl From<NavigationItem> for NavigationItemResponse {
    fn from(item: NavigationItem) -> Self {
        Self {
            label: item.label.to_owned(),
            path: item.path.to_owned(),
        }
    }
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            role: view.role.role().map(|role| role.as_str().to_owned()),
            dashboard_path: view.dashboard_path.map(ToOwned::to_owned),
            menu: view.menu.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<GuardDecision> for NavigationDecisionResponse {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Allow => Self {
                allowed: true,
                location: None,
                replace: false,
            },
            GuardDecision::Redirect { location, replace } => Self {
                allowed: false,
                location: Some(location),
                replace,
            },
        }
    }
}
