//! Business-category / grade requirement evaluation.
//!
//! The clause is parsed into a condition set (scheme branch, grade, score,
//! item keywords, jurisdiction areas) and the office's license rows are
//! filtered branch by branch, short-circuiting with a branch-specific reason
//! at the first empty result.

use std::sync::LazyLock;

use regex::Regex;

use crate::resolve::{agency_areas, AgencyResolver, ConstructionResolver, UNIFIED_SCHEME};
use crate::snapshot::{LicenseRow, ReferenceSnapshot};

use super::{Category, Verdict};

/// Ministries recognized as a specific-agency scheme reference.
const AGENCY_NAMES: &[&str] = &[
    "防衛省",
    "国土交通省",
    "法務省",
    "財務省",
    "文部科学省",
    "厚生労働省",
    "農林水産省",
    "経済産業省",
    "環境省",
    "内閣府",
];

const CONSTRUCTION_ITEMS: &[&str] = &[
    "土木",
    "建築",
    "大工",
    "左官",
    "とび、土工、コンクリート",
    "石",
    "屋根",
    "電気",
    "管",
    "タイル、れんが、ブロック",
    "鋼構造物",
    "鉄筋",
    "舗装",
    "しゅんせつ",
    "板金",
    "ガラス",
    "塗装",
    "防水",
    "内装仕上",
    "機械装置",
    "熱絶縁",
    "電気通信",
    "造園",
    "さく井",
    "建具",
    "水道施設",
    "消防施設",
    "清掃施設",
    "解体",
    "その他",
    "グラウト",
    "維持",
    "自然環境共生",
    "水環境処理",
];

const UNIFIED_CATEGORIES: &[&str] = &["物品の製造", "物品の販売", "役務の提供等", "物品の買受け"];

const SPECIFIC_ITEMS: &[&str] = &[
    "衣服・その他繊維製品類",
    "ゴム・皮革・プラスチック製品類",
    "窯業・土石製品類",
    "非鉄金属・金属製品類",
    "フォーム印刷類",
    "その他印刷類",
    "図書類",
    "電子出版物類",
    "紙・紙加工品類",
    "車両類",
    "その他輸送・搬送機械器具類",
    "船舶類",
    "燃料類",
    "家具・什器類",
    "一般・産業用機器類",
    "電気・通信用機器類",
    "電子計算機類",
    "精密機器類",
    "医療用機器類",
    "事務用機器類",
    "その他機器類",
    "医薬品・医療用品類",
    "事務用品類",
    "土木・建設・建築材料類",
    "警察用装備品類",
    "防衛用装備品類",
    "その他類",
    "広告・宣伝類",
    "写真・製図類",
    "調査・研究類",
    "情報処理類",
    "翻訳・通訳・速記類",
    "ソフトウェア開発類",
    "会場等の借り上げ類",
    "賃貸借類",
    "建物管理等各種保守管理類",
    "運送類",
    "車両整備類",
    "船舶整備類",
    "電子出版類",
    "防衛用装備品類の整備類",
    "立木竹類",
];

static GRADE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-D])(?:等級以上|以上の等級|等級|という等級|以上|等級以下|以下)")
        .expect("grade pattern")
});

static SCORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)点(以上|以下|超|未満)?").expect("score pattern"));

/// Which subset of the office's licenses the clause addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scheme {
    Unified,
    Agency(String),
    Default,
}

/// Grade comparison sense. `Exact` is the fallback when the clause names a
/// grade without a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradeComparison {
    AtLeast,
    AtMost,
    Exact,
}

impl GradeComparison {
    fn label(self) -> &'static str {
        match self {
            GradeComparison::AtLeast => "以上",
            GradeComparison::AtMost => "以下",
            GradeComparison::Exact => "等しい",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreComparison {
    AtLeast,
    AtMost,
    Over,
    Under,
}

impl ScoreComparison {
    fn label(self) -> &'static str {
        match self {
            ScoreComparison::AtLeast => "以上",
            ScoreComparison::AtMost => "以下",
            ScoreComparison::Over => "超",
            ScoreComparison::Under => "未満",
        }
    }

    fn holds(self, candidate: f64, required: f64) -> bool {
        match self {
            ScoreComparison::AtLeast => candidate >= required,
            ScoreComparison::AtMost => candidate <= required,
            ScoreComparison::Over => candidate > required,
            ScoreComparison::Under => candidate < required,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GradeItemConditions {
    scheme: Scheme,
    required_grade: Option<(char, GradeComparison)>,
    required_score: Option<(f64, ScoreComparison)>,
    required_items: Vec<String>,
    required_areas: Vec<String>,
}

fn extract(text: &str) -> GradeItemConditions {
    let scheme = if text.contains(UNIFIED_SCHEME) {
        Scheme::Unified
    } else if let Some(agency) = leftmost_agency(text) {
        Scheme::Agency(agency.to_string())
    } else {
        Scheme::Default
    };

    let required_grade = GRADE_PATTERN.captures(text).map(|caps| {
        let grade = caps[1].chars().next().expect("single grade letter");
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let comparison = if whole.contains("以上") {
            GradeComparison::AtLeast
        } else if whole.contains("以下") {
            GradeComparison::AtMost
        } else {
            GradeComparison::Exact
        };
        (grade, comparison)
    });

    let required_score = SCORE_PATTERN.captures(text).and_then(|caps| {
        let score: f64 = caps[1].parse().ok()?;
        let comparison = match caps.get(2).map(|m| m.as_str()) {
            Some("以下") => ScoreComparison::AtMost,
            Some("超") => ScoreComparison::Over,
            Some("未満") => ScoreComparison::Under,
            _ => ScoreComparison::AtLeast,
        };
        Some((score, comparison))
    });

    let required_items: Vec<String> = CONSTRUCTION_ITEMS
        .iter()
        .chain(UNIFIED_CATEGORIES)
        .chain(SPECIFIC_ITEMS)
        .filter(|item| text.contains(*item))
        .map(|item| item.to_string())
        .collect();

    // Area extraction uses the detected agency's vocabulary even when the
    // scheme branch ends up unified; detection and branching are separate.
    let area_vocabulary = match leftmost_agency(text) {
        Some(agency) => agency_areas(agency),
        None => agency_areas(UNIFIED_SCHEME),
    };
    let required_areas: Vec<String> = area_vocabulary
        .iter()
        .filter(|area| text.contains(*area))
        .map(|area| area.to_string())
        .collect();

    GradeItemConditions {
        scheme,
        required_grade,
        required_score,
        required_items,
        required_areas,
    }
}

fn leftmost_agency(text: &str) -> Option<&'static str> {
    AGENCY_NAMES
        .iter()
        .filter_map(|name| text.find(name).map(|pos| (pos, *name)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, name)| name)
}

/// Ordinal grade rank: A(0) is highest, D(3) lowest.
fn grade_rank(grade: &str) -> Option<usize> {
    match grade {
        "A" => Some(0),
        "B" => Some(1),
        "C" => Some(2),
        "D" => Some(3),
        _ => None,
    }
}

fn grade_satisfies(license_grade: &str, required: char, comparison: GradeComparison) -> bool {
    let Some(license_rank) = grade_rank(license_grade) else {
        return false;
    };
    let Some(required_rank) = grade_rank(&required.to_string()) else {
        return false;
    };
    match comparison {
        GradeComparison::AtLeast => license_rank <= required_rank,
        GradeComparison::AtMost => license_rank >= required_rank,
        GradeComparison::Exact => license_rank == required_rank,
    }
}

pub(super) fn evaluate(text: &str, office_id: u64, snapshot: &ReferenceSnapshot) -> Verdict {
    let conditions = extract(text);
    let licenses = snapshot.licenses(office_id);
    if licenses.is_empty() {
        return Verdict::fail(
            Category::GradeAndItem,
            format!("拠点ID={office_id}にライセンス情報がありません"),
        );
    }

    let agencies = AgencyResolver::new(snapshot);
    let constructions = ConstructionResolver::new(snapshot);

    match &conditions.scheme {
        Scheme::Unified => {
            let unified: Vec<&LicenseRow> = licenses
                .iter()
                .filter(|license| agencies.is_unified(license.agency_id))
                .collect();
            if unified.is_empty() {
                return Verdict::fail(
                    Category::GradeAndItem,
                    "全省庁統一資格を保有していません",
                );
            }
            check_branch(&conditions, unified, &constructions, "全省庁統一資格で").unwrap_or_else(
                || {
                    Verdict::pass(
                        Category::GradeAndItem,
                        "全省庁統一資格の条件を満たしています",
                    )
                },
            )
        }
        Scheme::Agency(agency) => {
            let specific: Vec<&LicenseRow> = licenses
                .iter()
                .filter(|license| agencies.belongs_to(license.agency_id, agency))
                .collect();
            if specific.is_empty() {
                return Verdict::fail(
                    Category::GradeAndItem,
                    format!("{agency}の資格を保有していません"),
                );
            }
            check_branch(
                &conditions,
                specific,
                &constructions,
                &format!("{agency}資格で"),
            )
            .unwrap_or_else(|| {
                Verdict::pass(
                    Category::GradeAndItem,
                    format!("{agency}資格の条件を満たしています"),
                )
            })
        }
        Scheme::Default => {
            if let Some(failure) =
                check_branch(&conditions, licenses.iter().collect(), &constructions, "")
            {
                return failure;
            }
            // The default branch alone enforces jurisdiction-area
            // registration as an independent final filter.
            if !conditions.required_areas.is_empty() {
                let area_matched = licenses.iter().any(|license| {
                    agencies
                        .resolve(license.agency_id)
                        .map(|agency| {
                            conditions
                                .required_areas
                                .iter()
                                .any(|area| agency.agency_area.contains(area.as_str()))
                        })
                        .unwrap_or(false)
                });
                if !area_matched {
                    return Verdict::fail(
                        Category::GradeAndItem,
                        format!(
                            "必要な地域({})の登録がありません",
                            conditions.required_areas.join("、")
                        ),
                    );
                }
            }
            Verdict::pass(Category::GradeAndItem, "営業品目の条件を満たしています")
        }
    }
}

/// Apply the item → grade → score filters in order over the branch's
/// licenses. Returns the failing verdict at the first empty result, `None`
/// when every required filter kept at least one license.
fn check_branch(
    conditions: &GradeItemConditions,
    branch_licenses: Vec<&LicenseRow>,
    constructions: &ConstructionResolver<'_>,
    reason_prefix: &str,
) -> Option<Verdict> {
    let mut candidates = branch_licenses;

    if !conditions.required_items.is_empty() {
        candidates.retain(|license| {
            constructions.name_matches(license.construction_id, &conditions.required_items)
        });
        if candidates.is_empty() {
            return Some(Verdict::fail(
                Category::GradeAndItem,
                format!(
                    "{reason_prefix}必要な営業品目({})を保有していません",
                    conditions.required_items.join("、")
                ),
            ));
        }
    }

    if let Some((grade, comparison)) = conditions.required_grade {
        candidates.retain(|license| {
            !license.license_grade.is_empty()
                && grade_satisfies(&license.license_grade, grade, comparison)
        });
        if candidates.is_empty() {
            return Some(Verdict::fail(
                Category::GradeAndItem,
                format!(
                    "{reason_prefix}{grade}等級{}の条件を満たしていません",
                    comparison.label()
                ),
            ));
        }
    }

    if let Some((score, comparison)) = conditions.required_score {
        candidates.retain(|license| {
            license
                .license_score
                .map(|candidate| comparison.holds(candidate, score))
                .unwrap_or(false)
        });
        if candidates.is_empty() {
            return Some(Verdict::fail(
                Category::GradeAndItem,
                format!(
                    "{reason_prefix}{score}点{}の条件を満たしていません",
                    comparison.label()
                ),
            ));
        }
    }

    None
}
