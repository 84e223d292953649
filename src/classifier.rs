//! Tactic Detector
//!
//! Flags persuasive framing that non-expert financial influencers lean on,
//! e.g. selling the debt snowball as the best payoff order.

use crate::models::{TacticFinding, NOT_AVAILABLE};
use tracing::debug;

/// Static keyword list — zero allocation
const DEBT_STRATEGY_KEYWORDS: &[&str] = &[
    "debt snowball",
    "debt avalanche",
    "lowest balance first",
];

const MOTIVATIONAL_FRAMING: &str = "Emotional/Motivational Framing";
const MOTIVATIONAL_DRIVER: &str =
    "Psychological relief over mathematical savings. (Debt Avalanche is mathematically better)";
const INFLUENCER_PROFILE: &str = "Non-CFP Influencer";

/// Trait for manipulation-tactic detection
pub trait TacticDetector: Send + Sync {
    fn detect(&self, claim: &str) -> TacticFinding;
}

pub struct KeywordTacticDetector;

impl TacticDetector for KeywordTacticDetector {
    fn detect(&self, claim: &str) -> TacticFinding {
        let claim = claim.to_lowercase();

        let Some(keyword) = DEBT_STRATEGY_KEYWORDS
            .iter()
            .find(|kw| claim.contains(**kw))
        else {
            return TacticFinding::none();
        };

        debug!(keyword = *keyword, "Debt strategy framing detected");

        TacticFinding {
            tactic_identified: MOTIVATIONAL_FRAMING.to_string(),
            emotional_driver: MOTIVATIONAL_DRIVER.to_string(),
            source_profile: INFLUENCER_PROFILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_TACTIC_SENTINEL;

    #[test]
    fn test_debt_strategy_phrases() {
        let cases = vec![
            "The debt snowball is the only way to get out of debt",
            "Use the Debt Avalanche method",
            "Always pay the LOWEST BALANCE FIRST",
        ];

        for c in cases {
            let finding = KeywordTacticDetector.detect(c);
            assert!(finding.is_identified(), "claim: {}", c);
            assert_eq!(finding.tactic_identified, "Emotional/Motivational Framing");
            assert_eq!(finding.source_profile, "Non-CFP Influencer");
            assert!(finding.emotional_driver.contains("Debt Avalanche"));
        }
    }

    #[test]
    fn test_no_tactic() {
        for c in ["", "snowball fights are fun", "pay off debt"] {
            let finding = KeywordTacticDetector.detect(c);
            assert!(!finding.is_identified());
            assert_eq!(finding.tactic_identified, NO_TACTIC_SENTINEL);
            assert_eq!(finding.emotional_driver, NOT_AVAILABLE);
            assert_eq!(finding.source_profile, NOT_AVAILABLE);
        }
    }
}
