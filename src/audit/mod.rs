//! Audit trail
//!
//! Every audit run is recorded with a fingerprint of the claim it judged.

use crate::models::AuditRecord;
use crate::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Audit trail storage
pub struct AuditLog {
    records: Arc<RwLock<HashMap<Uuid, AuditRecord>>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store an audit record
    pub async fn record(&self, record: AuditRecord) -> Result<Uuid> {
        let audit_id = record.audit_id;
        let mut records = self.records.write().await;
        records.insert(audit_id, record);
        Ok(audit_id)
    }

    /// Retrieve a record by audit ID
    pub async fn get(&self, audit_id: Uuid) -> Result<Option<AuditRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&audit_id).cloned())
    }

    /// List all audit IDs for a session (sorted by created_at)
    pub async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Uuid>> {
        let records = self.records.read().await;

        let mut items: Vec<_> = records
            .iter()
            .filter(|(_, record)| record.session_id == session_id)
            .map(|(id, record)| (*id, record.created_at))
            .collect();

        items.sort_by_key(|(_, created_at)| *created_at);

        Ok(items.into_iter().map(|(id, _)| id).collect())
    }

    /// Check a record's fingerprint against the claim it claims to cover
    pub async fn verify_claim(&self, audit_id: Uuid, claim: &str) -> Result<bool> {
        let records = self.records.read().await;

        Ok(records
            .get(&audit_id)
            .map(|record| record.claim_fingerprint == fingerprint_claim(claim))
            .unwrap_or(false))
    }

    /// Drop every record for a session; returns how many were removed
    pub async fn remove_session(&self, session_id: Uuid) -> Result<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.session_id != session_id);
        Ok(before - records.len())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 of the case-folded, trimmed claim, hex encoded
pub fn fingerprint_claim(claim: &str) -> String {
    let normalized = claim.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use chrono::{Duration, Utc};

    fn record(session_id: Uuid, claim: &str, offset_secs: i64) -> AuditRecord {
        AuditRecord {
            audit_id: Uuid::new_v4(),
            session_id,
            claim_fingerprint: fingerprint_claim(claim),
            verdict: "Generally True".to_string(),
            score_percent: 66.67,
            risk_level: RiskLevel::Unknown,
            tactic_detected: false,
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn test_fingerprint_is_normalized() {
        assert_eq!(
            fingerprint_claim("  Is the BUDGET rule legit? "),
            fingerprint_claim("is the budget rule legit?")
        );
        assert_ne!(fingerprint_claim("budget"), fingerprint_claim("debt snowball"));
        assert_eq!(fingerprint_claim("budget").len(), 64);
    }

    #[tokio::test]
    async fn test_list_for_session_is_ordered() {
        let log = AuditLog::new();
        let session = Uuid::new_v4();

        let later = record(session, "second", 10);
        let earlier = record(session, "first", 0);
        let other = record(Uuid::new_v4(), "other", 5);

        let later_id = log.record(later).await.unwrap();
        let earlier_id = log.record(earlier).await.unwrap();
        log.record(other).await.unwrap();

        let ids = log.list_for_session(session).await.unwrap();
        assert_eq!(ids, vec![earlier_id, later_id]);
        assert_eq!(log.len().await, 3);
    }

    #[tokio::test]
    async fn test_remove_session() {
        let log = AuditLog::new();
        let session = Uuid::new_v4();
        let other = Uuid::new_v4();

        log.record(record(session, "a", 0)).await.unwrap();
        log.record(record(session, "b", 1)).await.unwrap();
        log.record(record(other, "c", 2)).await.unwrap();

        assert_eq!(log.remove_session(session).await.unwrap(), 2);
        assert!(log.list_for_session(session).await.unwrap().is_empty());
        assert_eq!(log.list_for_session(other).await.unwrap().len(), 1);
        assert_eq!(log.remove_session(session).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_verify_claim() {
        let log = AuditLog::new();
        let id = log
            .record(record(Uuid::new_v4(), "Is the 50/30/20 rule legit?", 0))
            .await
            .unwrap();

        assert!(log.verify_claim(id, "is the 50/30/20 rule legit?").await.unwrap());
        assert!(!log.verify_claim(id, "something else").await.unwrap());
        assert!(!log.verify_claim(Uuid::new_v4(), "anything").await.unwrap());
    }
}
