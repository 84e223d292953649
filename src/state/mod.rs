//! Session report store
//!
//! Holds the latest full report per session so the presentation turn can
//! pick up what the audit turn produced. In-memory; the owning conversation
//! decides when a session ends.

use crate::models::FullReport;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trait for per-session report persistence
#[async_trait::async_trait]
pub trait SessionReportStore: Send + Sync {
    /// Replace the session's report (latest write wins)
    async fn put(&self, session_id: Uuid, report: FullReport) -> Result<()>;
    async fn get(&self, session_id: Uuid) -> Result<Option<FullReport>>;
    /// Drop the session's report; returns it if one was held
    async fn remove(&self, session_id: Uuid) -> Result<Option<FullReport>>;
}

/// In-memory report store, safe to share across concurrent sessions
#[derive(Clone)]
pub struct InMemoryReportStore {
    reports: Arc<RwLock<HashMap<Uuid, FullReport>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of sessions currently holding a report
    pub async fn session_count(&self) -> usize {
        self.reports.read().await.len()
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionReportStore for InMemoryReportStore {
    async fn put(&self, session_id: Uuid, report: FullReport) -> Result<()> {
        let mut reports = self.reports.write().await;
        reports.insert(session_id, report);
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<FullReport>> {
        let reports = self.reports.read().await;
        Ok(reports.get(&session_id).cloned())
    }

    async fn remove(&self, session_id: Uuid) -> Result<Option<FullReport>> {
        let mut reports = self.reports.write().await;
        Ok(reports.remove(&session_id))
    }
}
