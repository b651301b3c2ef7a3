use serde::Serialize;

use crate::role::{Role, SessionRole};
use crate::route::OperationalPage;

/// One sidebar entry shown to a signed-in role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    /// Display label.
    pub label: &'static str,
    /// Route path.
    pub path: &'static str,
}

impl NavigationItem {
    fn page(page: OperationalPage) -> Self {
        Self {
            label: page.label(),
            path: page.path(),
        }
    }
}

/// Returns the sidebar menu for a session role.
///
/// The first entry is always the role's dashboard. Roles without a dashboard
/// and signed-out sessions get an empty menu.
#[must_use]
pub fn navigation_menu(session_role: &SessionRole) -> Vec<NavigationItem> {
    use OperationalPage::{
        Appointments, Billing, Doctors, Inventory, LabTests, Patients, Prescriptions,
    };

    let Some(role) = session_role.role() else {
        return Vec::new();
    };
    let Some(dashboard) = role.dashboard_path() else {
        return Vec::new();
    };

    let pages: &[OperationalPage] = match role {
        Role::Admin => &[
            Patients,
            Appointments,
            Doctors,
            Inventory,
            Billing,
            Prescriptions,
            LabTests,
        ],
        Role::Doctor => &[Appointments, Patients, LabTests, Prescriptions],
        Role::Manager => &[Inventory, Billing],
        Role::Patient => &[Appointments, LabTests, Prescriptions, Billing],
        Role::Other(_) => &[],
    };

    std::iter::once(NavigationItem {
        label: "Dashboard",
        path: dashboard,
    })
    .chain(pages.iter().copied().map(NavigationItem::page))
    .collect()
}
