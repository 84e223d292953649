//! Core data models for the financial wellness auditor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Credit score assumed for users with no profile on file
pub const DEFAULT_CREDIT_SCORE: i32 = 720;

/// Sentinel reported by the tactic detector when nothing matched
pub const NO_TACTIC_SENTINEL: &str = "None Explicitly Identified";

/// Placeholder used for absent sources, evidence and report fields
pub const NOT_AVAILABLE: &str = "N/A";

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleVerdict {
    GenerallyTrue,
    UnmatchedRule,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
    Unknown,
}

//
// ================= Session =================
//

/// Per-call context supplied by the conversational driver.
///
/// Identifies the session whose report slot is read or written, and carries
/// the optional user profile the risk analyst consumes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: Uuid,
    #[serde(default)]
    pub credit_score: Option<i32>,
}

impl SessionContext {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            credit_score: None,
        }
    }

    pub fn with_credit_score(mut self, credit_score: i32) -> Self {
        self.credit_score = Some(credit_score);
        self
    }
}

//
// ================= Findings =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleFinding {
    pub verdict: RuleVerdict,
    pub score_percent: f64,
    pub tier1_sources: Vec<String>,
    pub tier2_sources: Vec<String>,
    pub rule_detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFinding {
    pub evidence_for: String,
    pub evidence_against: String,
    pub risk_level: RiskLevel,
    pub detail: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticFinding {
    pub tactic_identified: String,
    pub emotional_driver: String,
    pub source_profile: String,
}

impl TacticFinding {
    /// Finding reported when no manipulation pattern matched
    pub fn none() -> Self {
        Self {
            tactic_identified: NO_TACTIC_SENTINEL.to_string(),
            emotional_driver: NOT_AVAILABLE.to_string(),
            source_profile: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_identified(&self) -> bool {
        self.tactic_identified != NO_TACTIC_SENTINEL
    }
}

//
// ================= Report =================
//

/// The four-part artifact handed from the audit turn to the presentation turn
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FullReport {
    pub verdict_and_overview: String,
    pub accuracy_assessment: String,
    pub resources_list: String,
    pub deep_explanation: String,
}

/// Synchronous result of an audit run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditSummary {
    pub summary_output: String,
}

//
// ================= Audit Record =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: Uuid,
    pub session_id: Uuid,
    pub claim_fingerprint: String,
    pub verdict: String,
    pub score_percent: f64,
    pub risk_level: RiskLevel,
    pub tactic_detected: bool,
    pub created_at: DateTime<Utc>,
}

//
// ================= Tool I/O =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

impl fmt::Display for RuleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleVerdict::GenerallyTrue => "Generally True",
            RuleVerdict::UnmatchedRule => "Unmatched Rule",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}
