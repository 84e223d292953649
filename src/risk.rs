//! Contextual risk analysis
//!
//! Personalizes a claim against the user's profile. Currently only balance
//! transfers are modelled; every other claim falls outside the risk models.

use crate::models::{RiskFinding, RiskLevel, NOT_AVAILABLE};

/// Minimum credit score for a balance transfer to count as low risk
pub const LOW_RISK_CREDIT_FLOOR: i32 = 650;

const BALANCE_TRANSFER: &str = "balance transfer";

/// Trait for profile-aware risk analysis
pub trait RiskAnalyst: Send + Sync {
    fn analyze(&self, claim: &str, credit_score: i32) -> RiskFinding;
}

pub struct ContextualRiskAnalyst;

impl RiskAnalyst for ContextualRiskAnalyst {
    fn analyze(&self, claim: &str, credit_score: i32) -> RiskFinding {
        if !claim.to_lowercase().contains(BALANCE_TRANSFER) {
            return RiskFinding {
                evidence_for: NOT_AVAILABLE.to_string(),
                evidence_against: NOT_AVAILABLE.to_string(),
                risk_level: RiskLevel::Unknown,
                detail: "Claim is outside current contextual risk models.".to_string(),
                confidence: 0.5,
            };
        }

        let risk_level = if credit_score >= LOW_RISK_CREDIT_FLOOR {
            RiskLevel::Low
        } else {
            RiskLevel::High
        };

        RiskFinding {
            evidence_for: "Saves money if fees are low and credit is good.".to_string(),
            evidence_against: "High origination fees can negate savings and damage credit."
                .to_string(),
            risk_level,
            detail: format!(
                "Current User Risk: {} based on a {} score.",
                risk_level, credit_score
            ),
            confidence: 0.75,
        }
    }
}
