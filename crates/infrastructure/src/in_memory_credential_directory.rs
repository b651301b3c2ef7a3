use async_trait::async_trait;
use hopespring_application::{CredentialDirectory, CredentialEntry};
use hopespring_core::{AppError, AppResult};
use hopespring_domain::Role;

/// Fixed credential table held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCredentialDirectory {
    entries: Vec<CredentialEntry>,
}

impl InMemoryCredentialDirectory {
    /// Creates a directory over the given entries.
    #[must_use]
    pub fn new(entries: Vec<CredentialEntry>) -> Self {
        Self { entries }
    }
}

/// Demo accounts, all with password `123`.
#[must_use]
pub fn default_accounts() -> Vec<CredentialEntry> {
    ["admin", "doctor", "staff", "manager", "patient"]
        .into_iter()
        .map(|name| CredentialEntry::new(name, "123", Role::parse(name)))
        .collect()
}

/// Parses a credential table of `user:password:role` entries separated by
/// commas.
///
/// The password may itself contain colons. Blank entries are skipped. The
/// role keeps any value; unknown roles sign in without a dashboard.
pub fn parse_credential_table(value: &str) -> AppResult<Vec<CredentialEntry>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let parts = entry.split_once(':').and_then(|(username, rest)| {
                rest.rsplit_once(':')
                    .map(|(password, role)| (username, password, role))
            });
            match parts {
                Some((username, password, role))
                    if !username.is_empty() && !password.is_empty() && !role.is_empty() =>
                {
                    Ok(CredentialEntry::new(username, password, Role::parse(role)))
                }
                _ => Err(AppError::Validation(format!(
                    "credential entry '{entry}' must look like user:password:role"
                ))),
            }
        })
        .collect()
}

#[async_trait]
impl CredentialDirectory for InMemoryCredentialDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Vec<CredentialEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.username == username)
            .cloned()
            .collect())
    }
}
