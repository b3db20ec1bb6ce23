use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    query::{compute_stats, Filters, ViewMode},
    report::{ClipPreview, DashboardView},
    store::DetectionStore,
    types::{DerivedStats, DetectionRecord, Status},
};

/// Boundary to whatever decides whether the viewer is signed in.
pub trait SessionGate {
    fn is_active(&self) -> bool;

    /// Ends the session. Idempotent; failures are not reported.
    fn end_session(&mut self);
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Gate backed by a single fixed username and password.
#[derive(Debug, Clone, Default)]
pub struct CredentialGate {
    expected: Credentials,
    active: bool,
}

impl CredentialGate {
    pub fn new(expected: Credentials) -> Self {
        Self {
            expected,
            active: false,
        }
    }

    /// Activates the session on an exact match. A mismatch leaves any
    /// current session as it was.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if username == self.expected.username && password == self.expected.password {
            tracing::info!(username, "session started");
            self.active = true;
        } else {
            tracing::warn!(username, "login rejected");
        }
        self.active
    }
}

impl SessionGate for CredentialGate {
    fn is_active(&self) -> bool {
        self.active
    }

    fn end_session(&mut self) {
        if self.active {
            tracing::info!("session ended");
        }
        self.active = false;
    }
}

/// The authenticated view: a store plus the current filter inputs.
///
/// Only obtainable through [`Dashboard::mount`], and dropped on logout, so
/// status edits never outlive the session that made them. It cannot be
/// cloned:
///
/// ```compile_fail
/// fn copies<T: Clone>() {}
/// copies::<litterwatch_core::session::Dashboard>();
/// ```
#[derive(Debug)]
pub struct Dashboard {
    store: DetectionStore,
    filters: Filters,
}

impl Dashboard {
    pub fn mount<G: SessionGate + ?Sized>(
        gate: &G,
        records: Vec<DetectionRecord>,
    ) -> Option<Self> {
        if !gate.is_active() {
            tracing::debug!("no active session, dashboard not mounted");
            return None;
        }
        tracing::info!(count = records.len(), "dashboard mounted");
        Some(Self {
            store: DetectionStore::new(records),
            filters: Filters::default(),
        })
    }

    pub fn store(&self) -> &DetectionStore {
        &self.store
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.filters.date = date;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.filters.view = view;
    }

    pub fn update_status(&mut self, id: u64, status: Status) -> bool {
        self.store.update_status(id, status)
    }

    /// Summary cards. Always over the whole collection, not the filtered rows.
    pub fn stats(&self) -> DerivedStats {
        compute_stats(self.store.records())
    }

    pub fn visible(&self) -> Vec<DetectionRecord> {
        self.filters.apply(self.store.records())
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::new(self.stats(), &self.visible())
    }

    pub fn preview(&self, id: u64) -> Option<ClipPreview> {
        self.store.get(id).map(ClipPreview::for_record)
    }

    pub fn logout<G: SessionGate + ?Sized>(self, gate: &mut G) {
        gate.end_session();
    }
}
