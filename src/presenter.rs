//! Report presentation
//!
//! Second turn of the hand-off: renders whatever the last audit in the
//! session stored. A missing report is a user-facing message, not an error.

use crate::models::{FullReport, NOT_AVAILABLE};
use crate::state::SessionReportStore;
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const REPORT_NOT_FOUND: &str =
    "Error: Full report data not found in session memory. Please restart the audit.";

pub struct ReportPresenter {
    report_store: Arc<dyn SessionReportStore>,
}

impl ReportPresenter {
    pub fn new(report_store: Arc<dyn SessionReportStore>) -> Self {
        Self { report_store }
    }

    /// Render the session's stored report, or the not-found message
    pub async fn present(&self, session_id: Uuid) -> Result<String> {
        match self.report_store.get(session_id).await? {
            Some(report) => {
                info!(session_id = %session_id, "Presenting full report");
                Ok(render_report(&report))
            }
            None => {
                warn!(session_id = %session_id, "No stored report for session");
                Ok(REPORT_NOT_FOUND.to_string())
            }
        }
    }
}

/// Format the four report sections
pub fn render_report(report: &FullReport) -> String {
    format!(
        "\n{}\n\n**Accuracy assessment:** {}\n\n**Resources:** {}\n\n**Deep explanation:** {}\n",
        report.verdict_and_overview,
        or_na(&report.accuracy_assessment),
        or_na(&report.resources_list),
        or_na(&report.deep_explanation),
    )
}

fn or_na(field: &str) -> &str {
    if field.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AuditOrchestrator;
    use crate::audit::AuditLog;
    use crate::models::SessionContext;
    use crate::state::InMemoryReportStore;

    #[tokio::test]
    async fn test_missing_report_message() {
        let presenter = ReportPresenter::new(Arc::new(InMemoryReportStore::new()));
        let text = presenter.present(Uuid::new_v4()).await.unwrap();
        assert_eq!(text, REPORT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_renders_all_sections() {
        let store = Arc::new(InMemoryReportStore::new());
        let session = Uuid::new_v4();
        store
            .put(
                session,
                FullReport {
                    verdict_and_overview: "**True or False:** Generally True. **Overview why:** ok"
                        .to_string(),
                    accuracy_assessment: "66.67%".to_string(),
                    resources_list: "Tier 1: SEC Guide. Tier 2: N/A".to_string(),
                    deep_explanation: "Because.".to_string(),
                },
            )
            .await
            .unwrap();

        let presenter = ReportPresenter::new(store);
        let text = presenter.present(session).await.unwrap();

        assert_eq!(
            text,
            "\n**True or False:** Generally True. **Overview why:** ok\n\n\
             **Accuracy assessment:** 66.67%\n\n\
             **Resources:** Tier 1: SEC Guide. Tier 2: N/A\n\n\
             **Deep explanation:** Because.\n"
        );

        // Presenting does not consume the report
        assert_eq!(presenter.present(session).await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_presents_only_the_latest_audit() {
        let store = Arc::new(InMemoryReportStore::new());
        let orchestrator = AuditOrchestrator::with_store(store.clone(), Arc::new(AuditLog::new()));
        let presenter = ReportPresenter::new(store);
        let session = SessionContext::new(Uuid::new_v4());

        orchestrator
            .run_audit("Is the 50/30/20 budget rule legit?", &session)
            .await
            .unwrap();
        orchestrator
            .run_audit("Keep six months of expenses in an emergency fund", &session)
            .await
            .unwrap();

        let text = presenter.present(session.session_id).await.unwrap();
        assert!(text.contains("**Accuracy assessment:** 83.33%"));
        assert!(text.contains(
            "**Resources:** Tier 1: Consumer Financial Protection Bureau (CFPB). Tier 2: Fidelity Investments, NerdWallet"
        ));
        assert!(!text.contains("SEC Guide"));
        assert!(!text.contains("66.67"));
        assert!(!text.contains("50/30/20"));
    }

    #[test]
    fn test_empty_fields_render_as_na() {
        let text = render_report(&FullReport {
            verdict_and_overview: "overview".to_string(),
            ..FullReport::default()
        });
        assert!(text.contains("**Accuracy assessment:** N/A"));
        assert!(text.contains("**Resources:** N/A"));
        assert!(text.contains("**Deep explanation:** N/A"));
    }
}
