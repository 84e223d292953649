use financial_wellness_auditor::{
    agent::AuditOrchestrator,
    api::{start_server, ApiState},
    audit::AuditLog,
    config::{init_tracing, AuditorConfig},
    presenter::ReportPresenter,
    state::InMemoryReportStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env, then initialize tracing
    init_tracing();

    let config = AuditorConfig::from_env()?;

    info!("🚀 Financial Wellness Auditor - API Server");
    info!("📍 Port: {}", config.port);

    // Create components
    let store = Arc::new(InMemoryReportStore::new());
    let orchestrator = Arc::new(
        AuditOrchestrator::with_store(store.clone(), Arc::new(AuditLog::new()))
            .with_default_credit_score(config.default_credit_score),
    );
    let presenter = Arc::new(ReportPresenter::new(store));

    info!("✅ Auditor initialized");
    info!("📡 Starting API server...");

    start_server(ApiState::new(orchestrator, presenter), config.port).await?;

    Ok(())
}
