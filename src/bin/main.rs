use financial_wellness_auditor::{
    agent::AuditOrchestrator,
    audit::AuditLog,
    config::{init_tracing, AuditorConfig},
    models::SessionContext,
    presenter::ReportPresenter,
    state::InMemoryReportStore,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env, then initialize tracing
    init_tracing();

    let config = AuditorConfig::from_env()?;

    let claim = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let claim = if claim.trim().is_empty() {
        "Is the 50/30/20 budget rule legit?".to_string()
    } else {
        claim
    };

    info!("Financial Wellness Auditor starting");

    // Create components
    let store = Arc::new(InMemoryReportStore::new());
    let orchestrator = AuditOrchestrator::with_store(store.clone(), Arc::new(AuditLog::new()))
        .with_default_credit_score(config.default_credit_score);
    let presenter = ReportPresenter::new(store);

    let session = SessionContext::new(Uuid::new_v4());

    // Turn one: verdict only
    let summary = orchestrator.run_audit(&claim, &session).await?;
    println!("\n=== VERDICT ===");
    println!("{}", summary.summary_output);
    println!("Would you like the full list of Tier 1/2 Resources and the Deep Explanation?");

    // Turn two: the user said yes
    let report = presenter.present(session.session_id).await?;
    println!("\n=== FULL REPORT ===");
    println!("{}", report);

    Ok(())
}
