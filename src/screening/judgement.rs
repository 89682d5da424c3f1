//! Aggregation of per-clause verdicts into one judgement per target.

use serde::{Deserialize, Serialize};

use super::{Category, Target, Verdict};

/// Final per-target decision row: one category flag per rulebook, a deficit
/// message enumerating every failure, and the AND of the flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub target: Target,
    pub ineligibility_ok: bool,
    pub grade_item_ok: bool,
    pub location_ok: bool,
    pub experience_ok: bool,
    pub technician_ok: bool,
    pub other_ok: bool,
    /// Failing messages grouped per category as `[ラベル]msg1|msg2`, groups
    /// separated by a space. Empty when every verdict passed.
    pub deficit_message: String,
    pub final_status: bool,
    /// Advisory notes that do not gate the decision.
    pub message: String,
}

impl Judgement {
    fn category_flag(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Ineligibility => &mut self.ineligibility_ok,
            Category::GradeAndItem => &mut self.grade_item_ok,
            Category::Location => &mut self.location_ok,
            Category::Experience => &mut self.experience_ok,
            Category::Technician => &mut self.technician_ok,
            Category::Other => &mut self.other_ok,
        }
    }
}

const CATEGORY_ORDER: [Category; 6] = [
    Category::Ineligibility,
    Category::GradeAndItem,
    Category::Location,
    Category::Technician,
    Category::Experience,
    Category::Other,
];

/// Fold every verdict for one target. A category with no verdicts keeps its
/// flag true; duplicate failure messages within a category collapse to one.
pub fn aggregate(target: Target, verdicts: &[Verdict]) -> Judgement {
    let mut judgement = Judgement {
        target,
        ineligibility_ok: true,
        grade_item_ok: true,
        location_ok: true,
        experience_ok: true,
        technician_ok: true,
        other_ok: true,
        deficit_message: String::new(),
        final_status: true,
        message: String::new(),
    };

    let mut groups: Vec<String> = Vec::new();
    for category in CATEGORY_ORDER {
        let mut messages: Vec<&str> = Vec::new();
        for verdict in verdicts {
            if verdict.is_ok || verdict.reason.category != category {
                continue;
            }
            if !messages.contains(&verdict.reason.message.as_str()) {
                messages.push(&verdict.reason.message);
            }
        }
        if messages.is_empty() {
            continue;
        }
        *judgement.category_flag(category) = false;
        judgement.final_status = false;
        groups.push(format!("[{}]{}", category.label(), messages.join("|")));
    }
    judgement.deficit_message = groups.join(" ");

    let mut advisories: Vec<&str> = Vec::new();
    for verdict in verdicts {
        if let Some(advisory) = verdict.advisory.as_deref() {
            if !advisories.contains(&advisory) {
                advisories.push(advisory);
            }
        }
    }
    judgement.message = advisories.join("、");

    judgement
}
