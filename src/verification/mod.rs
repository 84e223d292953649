//! Rulebook verification for factual financial claims
//!
//! Claims are matched against a fixed, priority-ordered table of rules.
//! Deterministic, total over any input string.

use crate::models::{RuleFinding, RuleVerdict, NOT_AVAILABLE};
use tracing::debug;

/// Score reported when no factual rule matches
const UNMATCHED_SCORE_PERCENT: f64 = 50.0;

const UNMATCHED_DETAIL: &str = "Claim needs contextual analysis.";

/// Trait for claim verification against factual rules
pub trait RuleVerifier: Send + Sync {
    fn verify(&self, claim: &str) -> RuleFinding;
}

/// A single factual rule in the rulebook
pub struct FactualRule {
    pub name: &'static str,
    /// Rule matches if the claim contains any of these
    pub any_of: &'static [&'static str],
    /// ... and all of these
    pub all_of: &'static [&'static str],
    pub score_raw: f64,
    pub score_max: f64,
    pub tier1_sources: &'static [&'static str],
    pub tier2_sources: &'static [&'static str],
    pub rule_detail: &'static str,
}

impl FactualRule {
    /// `claim` must already be case-folded
    fn matches(&self, claim: &str) -> bool {
        let any = self.any_of.is_empty() || self.any_of.iter().any(|kw| claim.contains(kw));
        let all = self.all_of.iter().all(|kw| claim.contains(kw));
        any && all
    }

    fn score_percent(&self) -> f64 {
        round_to_hundredths(self.score_raw / self.score_max * 100.0)
    }

    fn finding(&self) -> RuleFinding {
        RuleFinding {
            verdict: RuleVerdict::GenerallyTrue,
            score_percent: self.score_percent(),
            tier1_sources: to_owned_list(self.tier1_sources),
            tier2_sources: to_owned_list(self.tier2_sources),
            rule_detail: self.rule_detail.to_string(),
        }
    }
}

/// Built-in rules, highest priority first
pub const DEFAULT_RULES: &[FactualRule] = &[
    FactualRule {
        name: "budget_50_30_20",
        any_of: &["50/30/20", "budget"],
        all_of: &[],
        score_raw: 20.0,
        score_max: 30.0,
        tier1_sources: &["SEC Guide", "CFP Board"],
        tier2_sources: &["Major Bank Site", "Economic Dept."],
        rule_detail: "The 50/30/20 method is a widely accepted guideline.",
    },
    FactualRule {
        name: "emergency_fund_six_months",
        any_of: &[],
        all_of: &["six months", "emergency fund"],
        score_raw: 25.0,
        score_max: 30.0,
        tier1_sources: &["Consumer Financial Protection Bureau (CFPB)"],
        tier2_sources: &["Fidelity Investments", "NerdWallet"],
        rule_detail: "Saving 3 to 6 months of living expenses is the prudent target range. The claim is well-supported but flexible.",
    },
];

/// Keyword rulebook evaluated in priority order
pub struct RulebookVerifier {
    rules: &'static [FactualRule],
}

impl RulebookVerifier {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }

    pub fn with_rules(rules: &'static [FactualRule]) -> Self {
        Self { rules }
    }
}

impl Default for RulebookVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVerifier for RulebookVerifier {
    fn verify(&self, claim: &str) -> RuleFinding {
        let claim = claim.to_lowercase();

        match self.rules.iter().find(|rule| rule.matches(&claim)) {
            Some(rule) => {
                debug!(rule = rule.name, "Factual rule matched");
                rule.finding()
            }
            None => {
                debug!("No factual rule matched");
                unmatched_finding()
            }
        }
    }
}

fn unmatched_finding() -> RuleFinding {
    RuleFinding {
        verdict: RuleVerdict::UnmatchedRule,
        score_percent: UNMATCHED_SCORE_PERCENT,
        tier1_sources: vec![NOT_AVAILABLE.to_string()],
        tier2_sources: vec![NOT_AVAILABLE.to_string()],
        rule_detail: UNMATCHED_DETAIL.to_string(),
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

//
// ================= Tests =================
//
