//! Audit orchestrator
//!
//! CLAIM → EVALUATE (rules, risk, tactics) → SYNTHESIZE → STORE → SUMMARIZE
//!
//! The summary is the only thing returned to the caller; the full report is
//! parked in the session store until the user asks for it.

use crate::audit::{fingerprint_claim, AuditLog};
use crate::classifier::{KeywordTacticDetector, TacticDetector};
use crate::models::{
    AuditRecord, AuditSummary, FullReport, RiskFinding, RuleFinding, RuleVerdict,
    SessionContext, TacticFinding, DEFAULT_CREDIT_SCORE,
};
use crate::risk::{ContextualRiskAnalyst, RiskAnalyst};
use crate::state::SessionReportStore;
use crate::verification::{RuleVerifier, RulebookVerifier};
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const BEHAVIORAL_MYTH_VERDICT: &str = "False (Behavioral Myth)";
const BEHAVIORAL_MYTH_SCORE: f64 = 60.0;

/// The three independent findings for one claim
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub rule: RuleFinding,
    /// Computed for telemetry only; never rendered into the report
    pub risk: RiskFinding,
    pub tactic: TacticFinding,
}

/// Which signal decided the verdict
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesis {
    /// A manipulation tactic outranks any rule match
    TacticOverride {
        tactic: String,
        emotional_driver: String,
    },
    RuleBased {
        verdict: RuleVerdict,
        score_percent: f64,
        rule_detail: String,
    },
}

impl Synthesis {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        if evaluation.tactic.is_identified() {
            Synthesis::TacticOverride {
                tactic: evaluation.tactic.tactic_identified.clone(),
                emotional_driver: evaluation.tactic.emotional_driver.clone(),
            }
        } else {
            Synthesis::RuleBased {
                verdict: evaluation.rule.verdict,
                score_percent: evaluation.rule.score_percent,
                rule_detail: evaluation.rule.rule_detail.clone(),
            }
        }
    }

    pub fn verdict(&self) -> String {
        match self {
            Synthesis::TacticOverride { .. } => BEHAVIORAL_MYTH_VERDICT.to_string(),
            Synthesis::RuleBased { verdict, .. } => verdict.to_string(),
        }
    }

    pub fn score_percent(&self) -> f64 {
        match self {
            Synthesis::TacticOverride { .. } => BEHAVIORAL_MYTH_SCORE,
            Synthesis::RuleBased { score_percent, .. } => *score_percent,
        }
    }

    /// Score as shown to the user: the fixed myth score is a whole number,
    /// rulebook scores always carry a fraction ("50.0", "66.67")
    pub fn score_display(&self) -> String {
        match self {
            Synthesis::TacticOverride { .. } => format!("{:.0}", BEHAVIORAL_MYTH_SCORE),
            Synthesis::RuleBased { score_percent, .. } => format_rule_score(*score_percent),
        }
    }

    pub fn deep_explanation(&self) -> String {
        match self {
            Synthesis::TacticOverride {
                tactic,
                emotional_driver,
            } => format!(
                "This claim is driven by the {} using the {} tactic.",
                emotional_driver, tactic
            ),
            Synthesis::RuleBased {
                score_percent,
                rule_detail,
                ..
            } => format!(
                "Verification Confidence: {}%. Rule Detail: {}",
                format_rule_score(*score_percent),
                rule_detail
            ),
        }
    }
}

fn format_rule_score(score_percent: f64) -> String {
    if score_percent.fract() == 0.0 {
        format!("{:.1}", score_percent)
    } else {
        score_percent.to_string()
    }
}

/// Assemble the four-part report.
///
/// The overview and resources always come from the rule finding, even when
/// a tactic decided the verdict.
pub fn build_report(rule: &RuleFinding, synthesis: &Synthesis) -> FullReport {
    FullReport {
        verdict_and_overview: format!(
            "**True or False:** {}. **Overview why:** {}",
            synthesis.verdict(),
            rule.rule_detail
        ),
        accuracy_assessment: format!("{}%", synthesis.score_display()),
        resources_list: format!(
            "Tier 1: {}. Tier 2: {}",
            rule.tier1_sources.join(", "),
            rule.tier2_sources.join(", ")
        ),
        deep_explanation: synthesis.deep_explanation(),
    }
}

/// What `end_session` released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTeardown {
    pub report_removed: bool,
    pub audit_records_removed: usize,
}

/// Runs the evaluators and hands the report off through the session store
pub struct AuditOrchestrator {
    rule_verifier: Box<dyn RuleVerifier>,
    risk_analyst: Box<dyn RiskAnalyst>,
    tactic_detector: Box<dyn TacticDetector>,
    report_store: Arc<dyn SessionReportStore>,
    audit_log: Arc<AuditLog>,
    default_credit_score: i32,
}

impl AuditOrchestrator {
    pub fn new(
        rule_verifier: Box<dyn RuleVerifier>,
        risk_analyst: Box<dyn RiskAnalyst>,
        tactic_detector: Box<dyn TacticDetector>,
        report_store: Arc<dyn SessionReportStore>,
        audit_log: Arc<AuditLog>,
    ) -> Self {
        Self {
            rule_verifier,
            risk_analyst,
            tactic_detector,
            report_store,
            audit_log,
            default_credit_score: DEFAULT_CREDIT_SCORE,
        }
    }

    /// Orchestrator wired with the built-in rulebook, risk model and detector
    pub fn with_store(report_store: Arc<dyn SessionReportStore>, audit_log: Arc<AuditLog>) -> Self {
        Self::new(
            Box::new(RulebookVerifier::new()),
            Box::new(ContextualRiskAnalyst),
            Box::new(KeywordTacticDetector),
            report_store,
            audit_log,
        )
    }

    pub fn with_default_credit_score(mut self, credit_score: i32) -> Self {
        self.default_credit_score = credit_score;
        self
    }

    pub fn audit_log(&self) -> &Arc<AuditLog> {
        &self.audit_log
    }

    /// Evaluate a claim with all three evaluators (no side effects)
    pub fn evaluate(&self, claim: &str, credit_score: i32) -> Evaluation {
        Evaluation {
            rule: self.rule_verifier.verify(claim),
            risk: self.risk_analyst.analyze(claim, credit_score),
            tactic: self.tactic_detector.detect(claim),
        }
    }

    /// Audit a claim, store the full report for the session, return the summary
    pub async fn run_audit(&self, claim: &str, session: &SessionContext) -> Result<AuditSummary> {
        let credit_score = session.credit_score.unwrap_or(self.default_credit_score);

        info!(
            session_id = %session.session_id,
            claim_fingerprint = %fingerprint_claim(claim),
            "Audit: starting"
        );
        debug!(claim = %claim, "Audit: claim text");

        // === EVALUATE ===
        let evaluation = self.evaluate(claim, credit_score);

        debug!(
            rule_verdict = ?evaluation.rule.verdict,
            risk_level = %evaluation.risk.risk_level,
            risk_confidence = evaluation.risk.confidence,
            tactic_detected = evaluation.tactic.is_identified(),
            "Evaluators complete"
        );

        // === SYNTHESIZE ===
        let synthesis = Synthesis::from_evaluation(&evaluation);
        let verdict = synthesis.verdict();
        let score_percent = synthesis.score_percent();
        let report = build_report(&evaluation.rule, &synthesis);

        // === STORE ===
        self.report_store.put(session.session_id, report).await?;

        let audit_id = self
            .audit_log
            .record(AuditRecord {
                audit_id: Uuid::new_v4(),
                session_id: session.session_id,
                claim_fingerprint: fingerprint_claim(claim),
                verdict: verdict.clone(),
                score_percent,
                risk_level: evaluation.risk.risk_level,
                tactic_detected: evaluation.tactic.is_identified(),
                created_at: Utc::now(),
            })
            .await?;

        info!(
            session_id = %session.session_id,
            audit_id = %audit_id,
            verdict = %verdict,
            score = score_percent,
            "Audit: report stored"
        );

        Ok(AuditSummary {
            summary_output: format!("{} ({}% match).", verdict, synthesis.score_display()),
        })
    }

    /// Forget everything held for a session: its report and its audit trail
    pub async fn end_session(&self, session_id: Uuid) -> Result<SessionTeardown> {
        let report_removed = self.report_store.remove(session_id).await?.is_some();
        let audit_records_removed = self.audit_log.remove_session(session_id).await?;

        info!(
            session_id = %session_id,
            report_removed,
            audit_records_removed,
            "Session ended"
        );

        Ok(SessionTeardown {
            report_removed,
            audit_records_removed,
        })
    }
}
