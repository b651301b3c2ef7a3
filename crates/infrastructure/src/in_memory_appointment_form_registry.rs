use std::collections::HashMap;
use std::time::{Duration, Instant};

use hopespring_domain::{AppointmentForm, FormId};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct FormEntry {
    form: AppointmentForm,
    expires_at: Instant,
}

/// Open appointment forms shared by every request of the process.
///
/// Sessions only remember the [`FormId`] of their form. Entries not touched
/// within the idle timeout are dropped, so forms of abandoned sessions do
/// not pile up.
#[derive(Debug)]
pub struct InMemoryAppointmentFormRegistry {
    idle_timeout: Duration,
    entries: RwLock<HashMap<FormId, FormEntry>>,
}

impl InMemoryAppointmentFormRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the form, refreshing its idle timer.
    pub async fn get(&self, form_id: FormId) -> Option<AppointmentForm> {
        self.update(form_id, |_| {}).await
    }

    /// Stores a form under its own id, replacing an earlier copy.
    pub async fn insert(&self, form: &AppointmentForm) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            form.form_id(),
            FormEntry {
                form: form.clone(),
                expires_at: self.expiry_from(now),
            },
        );
    }

    /// Applies an edit under the registry lock and returns the edited form.
    ///
    /// Returns `None` when the form is unknown or has expired.
    pub async fn update(
        &self,
        form_id: FormId,
        apply: impl FnOnce(&mut AppointmentForm),
    ) -> Option<AppointmentForm> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries
            .get(&form_id)
            .is_some_and(|entry| entry.expires_at <= now)
        {
            entries.remove(&form_id);
            return None;
        }

        let entry = entries.get_mut(&form_id)?;
        apply(&mut entry.form);
        entry.expires_at = self.expiry_from(now);
        Some(entry.form.clone())
    }

    /// Drops the form.
    pub async fn remove(&self, form_id: FormId) {
        self.entries.write().await.remove(&form_id);
    }

    fn expiry_from(&self, now: Instant) -> Instant {
        now.checked_add(self.idle_timeout).unwrap_or(now)
    }
}
