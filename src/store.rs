//! Persistence seam for verdicts and judgements.
//!
//! Writes are idempotent upserts: a verdict is keyed by (announcement,
//! sequence, category, company, office) and a judgement by (announcement,
//! company, office), so re-running evaluation overwrites rather than
//! duplicates. The evaluation core depends only on the trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::{Category, Judgement, Target, Verdict};

/// One persisted per-clause outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub target: Target,
    pub seq: u32,
    pub category: Category,
    pub verdict: Verdict,
}

pub type VerdictKey = (u64, u32, Category, u64, u64);
pub type JudgementKey = (u64, u64, u64);

impl VerdictRecord {
    pub fn key(&self) -> VerdictKey {
        (
            self.target.announcement_id,
            self.seq,
            self.category,
            self.target.company_id,
            self.target.office_id,
        )
    }
}

pub fn judgement_key(target: &Target) -> JudgementKey {
    (
        target.announcement_id,
        target.company_id,
        target.office_id,
    )
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected for key {key:?}: {message}")]
    WriteRejected { key: String, message: String },
}

/// Storage backend seam. One implementation per engine; evaluation and batch
/// code hold a `&mut dyn JudgementStore`.
pub trait JudgementStore: Send {
    fn upsert_verdict(&mut self, record: VerdictRecord) -> Result<(), StoreError>;
    fn upsert_judgement(&mut self, judgement: Judgement) -> Result<(), StoreError>;
    fn judgement(&self, target: &Target) -> Result<Option<Judgement>, StoreError>;
    fn verdicts(&self, target: &Target) -> Result<Vec<VerdictRecord>, StoreError>;
}

/// In-memory backend used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    verdicts: BTreeMap<VerdictKey, VerdictRecord>,
    judgements: BTreeMap<JudgementKey, Judgement>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdict_count(&self) -> usize {
        self.verdicts.len()
    }

    pub fn judgement_count(&self) -> usize {
        self.judgements.len()
    }

    pub fn judgements(&self) -> impl Iterator<Item = &Judgement> {
        self.judgements.values()
    }
}

impl JudgementStore for MemoryStore {
    fn upsert_verdict(&mut self, record: VerdictRecord) -> Result<(), StoreError> {
        self.verdicts.insert(record.key(), record);
        Ok(())
    }

    fn upsert_judgement(&mut self, judgement: Judgement) -> Result<(), StoreError> {
        self.judgements
            .insert(judgement_key(&judgement.target), judgement);
        Ok(())
    }

    fn judgement(&self, target: &Target) -> Result<Option<Judgement>, StoreError> {
        Ok(self.judgements.get(&judgement_key(target)).cloned())
    }

    fn verdicts(&self, target: &Target) -> Result<Vec<VerdictRecord>, StoreError> {
        let key = judgement_key(target);
        Ok(self
            .verdicts
            .values()
            .filter(|record| judgement_key(&record.target) == key)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target {
            announcement_id: 7,
            company_id: 1,
            office_id: 2,
        }
    }

    fn record(seq: u32, message: &str) -> VerdictRecord {
        VerdictRecord {
            target: target(),
            seq,
            category: Category::Location,
            verdict: Verdict::fail(Category::Location, message),
        }
    }

    #[test]
    fn upsert_overwrites_instead_of_duplicating() {
        let mut store = MemoryStore::new();
        store
            .upsert_verdict(record(1, "first"))
            .expect("memory store never fails");
        store
            .upsert_verdict(record(1, "second"))
            .expect("memory store never fails");
        assert_eq!(store.verdict_count(), 1);
        let stored = store.verdicts(&target()).expect("read back");
        assert_eq!(stored[0].verdict.reason.message, "second");
    }

    #[test]
    fn verdicts_are_scoped_to_their_target() {
        let mut store = MemoryStore::new();
        store
            .upsert_verdict(record(1, "mine"))
            .expect("memory store never fails");
        let other = Target {
            announcement_id: 8,
            company_id: 1,
            office_id: 2,
        };
        assert!(store.verdicts(&other).expect("read back").is_empty());
    }
}
