//! Ordered keyword classification of raw clause text.
//!
//! A clause may trigger several categories and is then evaluated once per
//! category; forcing ambiguous clauses into a single bucket would silently
//! skip rulebooks. `Other` is emitted exactly when nothing matched.

use serde::{Deserialize, Serialize};

/// Requirement category a clause is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Ineligibility,
    GradeAndItem,
    Location,
    Technician,
    Experience,
    Other,
}

impl Category {
    /// Display label, also the prefix of every rendered reason.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Ineligibility => "欠格要件",
            Category::GradeAndItem => "業種・等級要件",
            Category::Location => "所在地要件",
            Category::Technician => "技術者要件",
            Category::Experience => "実績要件",
            Category::Other => "その他",
        }
    }

    /// Classification order is fixed; it determines the order of the
    /// emitted (category, clause) pairs.
    pub const ALL: [Category; 5] = [
        Category::Ineligibility,
        Category::GradeAndItem,
        Category::Location,
        Category::Technician,
        Category::Experience,
    ];

    fn triggers(self) -> &'static [&'static str] {
        match self {
            Category::Ineligibility => &[
                "70条",
                "71条",
                "会社更生法",
                "民事再生法",
                "更生手続",
                "再生手続",
                "情報保全",
                "資本関係",
                "人的関係",
                "滞納",
                "外国法",
                "取引停止",
                "破産",
                "暴力団",
                "指名停止",
                "後見人",
                "法人格取消",
            ],
            Category::GradeAndItem => &[
                "競争参加資格",
                "一般競争",
                "指名競争",
                "等級",
                "総合審査",
            ],
            Category::Location => &["所在", "県内", "市内", "防衛局管内", "本店が", "支店が"],
            Category::Technician => &[
                "施工管理技士",
                "技術士",
                "資格者証",
                "電気工事士",
                "建築士",
                "基幹技能者",
                "監理技術者",
                "主任技術者",
                "監理技術者資格者証",
                "監理技術者講習修了証",
            ],
            Category::Experience => &[
                "実績",
                "工事成績",
                "元請けとして",
                "元請として",
                "点以上",
                "jv比率",
                "過去実績",
            ],
            Category::Other => &[],
        }
    }
}

/// Classify a clause into every category whose trigger set matches.
/// Deterministic: the same text always yields the same ordered set.
pub fn classify(text: &str) -> Vec<Category> {
    let lowered = text.to_lowercase();
    let matched: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|category| {
            category
                .triggers()
                .iter()
                .any(|trigger| lowered.contains(trigger))
        })
        .collect();

    if matched.is_empty() {
        vec![Category::Other]
    } else {
        matched
    }
}
