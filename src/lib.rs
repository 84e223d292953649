//! Financial Wellness Auditor
//!
//! Audits a user's financial claim and hands the result back in two turns:
//! - First turn: a one-line verdict and match score
//! - Second turn (on request): the full four-part report
//!
//! Claims are judged by a factual rulebook, a contextual risk model and a
//! manipulation-tactic detector. Tactic detection outranks rule matches.
//!
//! TWO-TURN FLOW:
//! CLAIM → EVALUATE → SYNTHESIZE → STORE → SUMMARY ... PRESENT(session)

pub mod agent;
pub mod api;
pub mod audit;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod presenter;
pub mod risk;
pub mod state;
pub mod tools;
pub mod verification;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use agent::AuditOrchestrator;
pub use presenter::ReportPresenter;
