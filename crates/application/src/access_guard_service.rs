use hopespring_core::AppResult;
use hopespring_domain::{
    GuardDecision, NavigationItem, SessionRole, evaluate_navigation, navigation_menu,
};

use crate::SessionStore;

/// What the shell needs to render chrome for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Current session role.
    pub role: SessionRole,
    /// Dashboard owned by the role, if any.
    pub dashboard_path: Option<&'static str>,
    /// Sidebar entries.
    pub menu: Vec<NavigationItem>,
}

/// Application service answering navigation requests from the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuardService;

impl AccessGuardService {
    /// Creates a new access guard service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decides a navigation for the role currently held by the session.
    pub async fn navigate(
        &self,
        session: &dyn SessionStore,
        target_path: &str,
    ) -> AppResult<GuardDecision> {
        let role = session.load_role().await?;
        Ok(evaluate_navigation(&role, target_path))
    }

    /// Describes the session for the shell's chrome.
    pub async fn session_view(&self, session: &dyn SessionStore) -> AppResult<SessionView> {
        let role = session.load_role().await?;
        Ok(SessionView {
            dashboard_path: role.dashboard_path(),
            menu: navigation_menu(&role),
            role,
        })
    }
}
