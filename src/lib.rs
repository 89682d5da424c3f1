//! Bid-announcement eligibility screening.
//!
//! Free-text requirement clauses are classified into requirement categories,
//! evaluated per (announcement, company, office) target against an immutable
//! reference snapshot, and aggregated into one judgement per target.

pub mod batch;
pub mod config;
pub mod resolve;
pub mod screening;
pub mod snapshot;
pub mod store;
pub mod telemetry;

pub use batch::{BatchOutcome, BatchRunner};
pub use screening::{aggregate, classify, Category, Clause, Judgement, Target, Verdict};
pub use snapshot::ReferenceSnapshot;
pub use store::{JudgementStore, MemoryStore, VerdictRecord};
