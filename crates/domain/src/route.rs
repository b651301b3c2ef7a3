/// Landing page.
pub const LANDING_PATH: &str = "/";

/// Credential login page.
pub const LOGIN_PATH: &str = "/login";

/// Bare dashboard entry point, resolved per role.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Routes reachable without a session role.
pub const PUBLIC_PATHS: [&str; 5] = ["/", "/login", "/about", "/doctors-list", "/register"];

const DASHBOARD_PREFIX: &str = "/dashboard/";

/// Shared operational screens behind sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationalPage {
    /// Patient register.
    Patients,
    /// Appointment book.
    Appointments,
    /// Doctor management.
    Doctors,
    /// Stock management.
    Inventory,
    /// Billing records.
    Billing,
    /// Prescriptions, optionally scoped to one patient.
    Prescriptions,
    /// Laboratory tests.
    LabTests,
}

impl OperationalPage {
    /// Returns the route path of this page.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Patients => "/patients",
            Self::Appointments => "/appointments",
            Self::Doctors => "/doctors",
            Self::Inventory => "/inventory",
            Self::Billing => "/billing",
            Self::Prescriptions => "/prescriptions",
            Self::LabTests => "/lab-tests",
        }
    }

    /// Returns the menu label of this page.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Patients => "Patients",
            Self::Appointments => "Appointments",
            Self::Doctors => "Doctors",
            Self::Inventory => "Inventory",
            Self::Billing => "Billing",
            Self::Prescriptions => "Prescriptions",
            Self::LabTests => "Lab Tests",
        }
    }

    /// Returns all operational pages.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[OperationalPage] = &[
            OperationalPage::Patients,
            OperationalPage::Appointments,
            OperationalPage::Doctors,
            OperationalPage::Inventory,
            OperationalPage::Billing,
            OperationalPage::Prescriptions,
            OperationalPage::LabTests,
        ];

        ALL
    }

    fn from_path(path: &str) -> Option<Self> {
        if let Some(rest) = path.strip_prefix("/prescriptions/") {
            return (!rest.is_empty() && !rest.contains('/')).then_some(Self::Prescriptions);
        }

        Self::all().iter().copied().find(|page| page.path() == path)
    }
}

/// Classification of a normalised route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable without a session role.
    Public,
    /// Bare `/dashboard`.
    DashboardIndex,
    /// A role-specific dashboard below `/dashboard/`.
    Dashboard(String),
    /// One of the shared operational pages.
    Operational(OperationalPage),
    /// Any other path; treated as protected.
    Protected,
}

/// Normalises a navigation target for matching.
///
/// Drops the query string and fragment, roots relative paths, and strips one
/// trailing slash.
#[must_use]
pub fn normalize_path(target: &str) -> String {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let path = target[..end].trim();

    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Returns whether the normalised path is in the public route set.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Classifies a navigation target.
#[must_use]
pub fn classify_route(target: &str) -> RouteClass {
    let path = normalize_path(target);

    if is_public_path(&path) {
        return RouteClass::Public;
    }

    if path == DASHBOARD_PATH {
        return RouteClass::DashboardIndex;
    }

    if path.starts_with(DASHBOARD_PREFIX) {
        return RouteClass::Dashboard(path);
    }

    match OperationalPage::from_path(&path) {
        Some(page) => RouteClass::Operational(page),
        None => RouteClass::Protected,
    }
}
