//! Requirement screening: clause classification, per-category evaluation,
//! and per-target judgement aggregation.

pub mod classify;
mod experience;
mod grade_item;
mod ineligibility;
pub mod judgement;
mod location;
mod technician;

#[cfg(test)]
mod tests;

pub use classify::{classify, Category};
pub use judgement::{aggregate, Judgement};

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::snapshot::ReferenceSnapshot;

/// One free-text eligibility clause extracted from an announcement, with its
/// position in the announcement's clause list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub announcement_id: u64,
    pub seq: u32,
    pub text: String,
}

/// The (announcement, company, office) triple being adjudicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    pub announcement_id: u64,
    pub company_id: u64,
    pub office_id: u64,
}

/// Structured reason attached to every verdict; rendered as
/// `カテゴリ名：メッセージ` at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub category: Category,
    pub message: String,
}

impl Reason {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{}：{}", self.category.label(), self.message)
    }
}

/// Outcome of evaluating one clause against one target. The reason is
/// populated on success as well; aggregation only collects failures but the
/// full display surface shows both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_ok: bool,
    pub reason: Reason,
    /// Advisory note that does not gate pass/fail (e.g. a dedicated
    /// technician assignment requirement).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl Verdict {
    pub fn pass(category: Category, message: impl Into<String>) -> Self {
        Self {
            is_ok: true,
            reason: Reason::new(category, message),
            advisory: None,
        }
    }

    pub fn fail(category: Category, message: impl Into<String>) -> Self {
        Self {
            is_ok: false,
            reason: Reason::new(category, message),
            advisory: None,
        }
    }
}

/// Stateless evaluator over a shared read-only snapshot.
pub struct ScreeningEngine<'a> {
    snapshot: &'a ReferenceSnapshot,
}

impl<'a> ScreeningEngine<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &'a ReferenceSnapshot {
        self.snapshot
    }

    /// Evaluate one classified clause for one target. A panicking evaluator
    /// is converted into a failing verdict scoped to this (target, clause)
    /// pair; the batch and the other targets are never affected.
    pub fn evaluate(&self, category: Category, text: &str, target: Target) -> Verdict {
        let result = catch_unwind(AssertUnwindSafe(|| {
            self.evaluate_inner(category, text, target)
        }));
        match result {
            Ok(verdict) => verdict,
            Err(_) => {
                warn!(
                    announcement = target.announcement_id,
                    company = target.company_id,
                    office = target.office_id,
                    category = category.label(),
                    "evaluator fault converted to failing verdict"
                );
                Verdict::fail(category, "判定処理中にエラーが発生しました")
            }
        }
    }

    fn evaluate_inner(&self, category: Category, text: &str, target: Target) -> Verdict {
        match category {
            Category::Ineligibility => {
                ineligibility::evaluate(text, target.company_id, target.office_id, self.snapshot)
            }
            Category::GradeAndItem => grade_item::evaluate(text, target.office_id, self.snapshot),
            Category::Location => location::evaluate(text, target.office_id, self.snapshot),
            Category::Experience => experience::evaluate(text, target.office_id, self.snapshot),
            Category::Technician => {
                technician::evaluate(text, target.company_id, target.office_id, self.snapshot)
            }
            Category::Other => Verdict::fail(
                Category::Other,
                "その他要件があります。確認してください",
            ),
        }
    }
}
