//! Tool trait and registry
//!
//! The two operations a conversational driver can call: `run_audit` on the
//! user's first turn, `present_full_report` once the user asks for details.

use crate::agent::AuditOrchestrator;
use crate::error::AuditorError;
use crate::models::{SessionContext, ToolInput, ToolOutput};
use crate::presenter::ReportPresenter;
use crate::Result;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Trait for a single callable tool
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, session: &SessionContext, input: &ToolInput) -> Result<ToolOutput>;
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Look up `input.tool_name` and run it for the session
    pub async fn execute(&self, session: &SessionContext, input: &ToolInput) -> Result<ToolOutput> {
        let tool = self
            .get(&input.tool_name)
            .ok_or_else(|| AuditorError::ToolNotFound(input.tool_name.clone()))?;

        debug!(
            tool_name = %input.tool_name,
            session_id = %session.session_id,
            "Executing tool"
        );

        tool.execute(session, input).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_object_parameters(input: &ToolInput) -> Result<()> {
    if input.parameters.is_object() || input.parameters.is_null() {
        Ok(())
    } else {
        Err(AuditorError::InvalidToolInput(
            "tool_input must be a JSON object".to_string(),
        ))
    }
}

fn require_claim(input: &ToolInput) -> Result<&str> {
    input
        .parameters
        .get("claim")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            AuditorError::InvalidToolInput("Expected 'claim' in tool_input".to_string())
        })
}

fn optional_credit_score(input: &ToolInput) -> Result<Option<i32>> {
    match input.parameters.get("credit_score") {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                AuditorError::InvalidToolInput(format!(
                    "'credit_score' must be an integer, got {}",
                    v
                ))
            }),
    }
}

pub struct RunAuditTool {
    orchestrator: Arc<AuditOrchestrator>,
}

impl RunAuditTool {
    pub fn new(orchestrator: Arc<AuditOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait::async_trait]
impl Tool for RunAuditTool {
    fn name(&self) -> &'static str {
        "run_audit"
    }

    fn description(&self) -> &'static str {
        "Audit the user's financial claim, save the full report to the session and return a one-line verdict"
    }

    async fn execute(&self, session: &SessionContext, input: &ToolInput) -> Result<ToolOutput> {
        ensure_object_parameters(input)?;
        let claim = require_claim(input)?;

        let session = match optional_credit_score(input)? {
            Some(score) => session.with_credit_score(score),
            None => *session,
        };

        let summary = self.orchestrator.run_audit(claim, &session).await?;

        Ok(ToolOutput {
            success: true,
            data: serde_json::to_value(summary)?,
            error: None,
        })
    }
}

pub struct PresentFullReportTool {
    presenter: Arc<ReportPresenter>,
}

impl PresentFullReportTool {
    pub fn new(presenter: Arc<ReportPresenter>) -> Self {
        Self { presenter }
    }
}

#[async_trait::async_trait]
impl Tool for PresentFullReportTool {
    fn name(&self) -> &'static str {
        "present_full_report"
    }

    fn description(&self) -> &'static str {
        "Retrieve the complete four-part report saved by the last audit in this session"
    }

    async fn execute(&self, session: &SessionContext, _input: &ToolInput) -> Result<ToolOutput> {
        let report = self.presenter.present(session.session_id).await?;

        Ok(ToolOutput {
            success: true,
            data: json!({ "report": report }),
            error: None,
        })
    }
}

/// Registry exposing both conversational-flow tools
pub fn create_default_registry(
    orchestrator: Arc<AuditOrchestrator>,
    presenter: Arc<ReportPresenter>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(RunAuditTool::new(orchestrator)));
    registry.register(Arc::new(PresentFullReportTool::new(presenter)));
    registry
}
