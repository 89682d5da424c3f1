//! Chunked batch evaluation over (announcement, company, office) targets.
//!
//! Targets are processed in chunks; each chunk is evaluated in parallel and
//! flushed to the store before the next one starts, so a cancellation or a
//! storage failure loses at most one chunk of work. Evaluator faults are
//! absorbed per (target, clause) inside the engine and never abort the run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::screening::{aggregate, classify, Clause, Judgement, ScreeningEngine, Target};
use crate::snapshot::ReferenceSnapshot;
use crate::store::{JudgementStore, StoreError, VerdictRecord};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

pub struct BatchRunner<'a> {
    engine: ScreeningEngine<'a>,
    chunk_size: usize,
}

/// Totals reported after a run. `cancelled` is set when the stop flag was
/// observed before every chunk was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub targets_processed: usize,
    pub verdicts_written: usize,
    pub cancelled: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self {
            engine: ScreeningEngine::new(snapshot),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Evaluate every target against its announcement's clauses and upsert
    /// one verdict per (clause, category) plus one judgement per target.
    pub fn run(
        &self,
        clauses: &[Clause],
        targets: &[Target],
        cancel: &AtomicBool,
        store: &mut dyn JudgementStore,
    ) -> Result<BatchOutcome, StoreError> {
        let mut by_announcement: HashMap<u64, Vec<&Clause>> = HashMap::new();
        for clause in clauses {
            by_announcement
                .entry(clause.announcement_id)
                .or_default()
                .push(clause);
        }
        for list in by_announcement.values_mut() {
            list.sort_by_key(|clause| clause.seq);
        }

        let mut outcome = BatchOutcome {
            targets_processed: 0,
            verdicts_written: 0,
            cancelled: false,
        };

        for chunk in targets.chunks(self.chunk_size) {
            if cancel.load(Ordering::Relaxed) {
                outcome.cancelled = true;
                info!(
                    processed = outcome.targets_processed,
                    "batch cancelled before next chunk"
                );
                break;
            }

            let evaluated: Vec<(Vec<VerdictRecord>, Judgement)> = chunk
                .par_iter()
                .map(|target| self.evaluate_target(*target, &by_announcement))
                .collect();

            for (records, judgement) in evaluated {
                for record in records {
                    store.upsert_verdict(record)?;
                    outcome.verdicts_written += 1;
                }
                store.upsert_judgement(judgement)?;
                outcome.targets_processed += 1;
            }
            info!(
                processed = outcome.targets_processed,
                total = targets.len(),
                "chunk flushed"
            );
        }

        Ok(outcome)
    }

    fn evaluate_target(
        &self,
        target: Target,
        by_announcement: &HashMap<u64, Vec<&Clause>>,
    ) -> (Vec<VerdictRecord>, Judgement) {
        let clauses = by_announcement
            .get(&target.announcement_id)
            .map_or(&[][..], Vec::as_slice);

        let mut records = Vec::new();
        for clause in clauses {
            for category in classify(&clause.text) {
                let verdict = self.engine.evaluate(category, &clause.text, target);
                records.push(VerdictRecord {
                    target,
                    seq: clause.seq,
                    category,
                    verdict,
                });
            }
        }

        let verdicts: Vec<_> = records.iter().map(|record| record.verdict.clone()).collect();
        let judgement = aggregate(target, &verdicts);
        (records, judgement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn clause(announcement_id: u64, seq: u32, text: &str) -> Clause {
        Clause {
            announcement_id,
            seq,
            text: text.to_string(),
        }
    }

    #[test]
    fn target_without_clauses_gets_a_vacuous_pass() {
        let snapshot = ReferenceSnapshot::default();
        let runner = BatchRunner::new(&snapshot);
        let target = Target {
            announcement_id: 1,
            company_id: 1,
            office_id: 1,
        };
        let mut store = MemoryStore::new();
        let cancel = AtomicBool::new(false);
        let outcome = runner
            .run(&[], &[target], &cancel, &mut store)
            .expect("memory store never fails");
        assert_eq!(outcome.targets_processed, 1);
        assert_eq!(outcome.verdicts_written, 0);
        let judgement = store
            .judgement(&target)
            .expect("read back")
            .expect("judgement written");
        assert!(judgement.final_status);
    }

    #[test]
    fn cancellation_stops_before_the_next_chunk() {
        let snapshot = ReferenceSnapshot::default();
        let runner = BatchRunner::new(&snapshot).with_chunk_size(1);
        let targets: Vec<Target> = (0..5)
            .map(|office_id| Target {
                announcement_id: 1,
                company_id: 1,
                office_id,
            })
            .collect();
        let clauses = vec![clause(1, 1, "東京都内に本店を有すること")];
        let mut store = MemoryStore::new();
        let cancel = AtomicBool::new(true);
        let outcome = runner
            .run(&clauses, &targets, &cancel, &mut store)
            .expect("memory store never fails");
        assert!(outcome.cancelled);
        assert_eq!(outcome.targets_processed, 0);
        assert_eq!(store.judgement_count(), 0);
    }

    #[test]
    fn rerun_overwrites_previous_results() {
        let snapshot = ReferenceSnapshot::default();
        let runner = BatchRunner::new(&snapshot);
        let target = Target {
            announcement_id: 3,
            company_id: 9,
            office_id: 9,
        };
        let clauses = vec![clause(3, 1, "入札保証金は免除する")];
        let mut store = MemoryStore::new();
        let cancel = AtomicBool::new(false);
        for _ in 0..2 {
            runner
                .run(&clauses, &[target], &cancel, &mut store)
                .expect("memory store never fails");
        }
        assert_eq!(store.verdict_count(), 1);
        assert_eq!(store.judgement_count(), 1);
    }
}
