//! Technician (qualified staff) requirement evaluation.
//!
//! A supervising-engineer clause demands the certificate and the training
//! completion from the same employee and, once satisfied, supersedes the
//! general qualification-list check. A dedicated-assignment phrase never
//! gates pass/fail; it is surfaced as an advisory on the verdict.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::resolve::{
    QualificationCatalog, ALL_QUALIFICATION_NAMES, SUPERVISING_ENGINEER_CERT,
    SUPERVISING_ENGINEER_TRAINING,
};
use crate::snapshot::ReferenceSnapshot;

use super::{Category, Verdict};

static EXPERIENCE_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)年(?:以上の)?(?:実務)?経験").expect("years pattern"));
static EXPERIENCE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"成績(?:評定)?(?:が|で)?(\d+)点以上").expect("score pattern"));

#[derive(Debug, Clone, Default, PartialEq)]
struct TechnicianRequirements {
    required_qualifications: Vec<String>,
    /// 監理技術者: dual-credential check, supersedes the general list.
    needs_supervising_engineer: bool,
    /// 主任技術者: recorded; the lesser role carries no extra credential
    /// check of its own.
    needs_site_engineer: bool,
    needs_dedicated: bool,
    requires_experience: bool,
    experience_years: Option<u32>,
    experience_score: Option<f64>,
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn extract(text: &str) -> TechnicianRequirements {
    let lowered = text.to_lowercase();
    let mut requirements = TechnicianRequirements::default();

    requirements.needs_dedicated = lowered.contains("専任");

    if lowered.contains("監理技術者") {
        requirements.needs_supervising_engineer = true;
        push_unique(
            &mut requirements.required_qualifications,
            SUPERVISING_ENGINEER_CERT.to_string(),
        );
        if lowered.contains("監理技術者講習") || lowered.contains("講習修了") {
            push_unique(
                &mut requirements.required_qualifications,
                SUPERVISING_ENGINEER_TRAINING.to_string(),
            );
        }
    }

    requirements.needs_site_engineer = lowered.contains("主任技術者");

    for name in ALL_QUALIFICATION_NAMES {
        match *name {
            "2級土木施工管理技士" => {
                collect_subtyped(text, name, &["土木", "鋼構造物塗装", "薬液注入"], &mut requirements);
            }
            "2級建築施工管理技士" => {
                collect_subtyped(text, name, &["建築", "躯体", "仕上げ"], &mut requirements);
            }
            "電気主任技術者" => {
                for subtype in ["1種", "2種", "3種"] {
                    let suffixed = format!("{name}{subtype}");
                    let prefixed = format!("{subtype}{name}");
                    let numbered = format!("第{subtype}{name}");
                    if text.contains(&suffixed)
                        || text.contains(&prefixed)
                        || text.contains(&numbered)
                    {
                        push_unique(
                            &mut requirements.required_qualifications,
                            format!("{name}({subtype})"),
                        );
                    }
                }
                if text.contains(name) {
                    push_unique(&mut requirements.required_qualifications, name.to_string());
                }
            }
            _ => {
                if text.contains(name) {
                    push_unique(&mut requirements.required_qualifications, name.to_string());
                }
            }
        }
    }

    if lowered.contains("実務経験")
        || lowered.contains("経験年数")
        || lowered.contains("年以上の経験")
    {
        requirements.requires_experience = true;
        if let Some(caps) = EXPERIENCE_YEARS.captures(text) {
            requirements.experience_years = caps[1].parse().ok();
        }
        if let Some(caps) = EXPERIENCE_SCORE.captures(text) {
            requirements.experience_score = caps[1].parse().ok();
        }
    }

    requirements
}

/// Sub-typed variants such as 2級土木施工管理技士(土木): full-width
/// parentheses, half-width parentheses, or the bare concatenation all count.
/// The canonical form kept is the half-width one the qualification master
/// renders; the undecorated name is matched independently.
fn collect_subtyped(
    text: &str,
    name: &str,
    subtypes: &[&str],
    requirements: &mut TechnicianRequirements,
) {
    if text.contains(name) {
        push_unique(&mut requirements.required_qualifications, name.to_string());
    }
    for subtype in subtypes {
        let full_width = format!("{name}（{subtype}）");
        let half_width = format!("{name}({subtype})");
        let bare = format!("{name}{subtype}");
        if text.contains(&full_width) || text.contains(&half_width) || text.contains(&bare) {
            push_unique(&mut requirements.required_qualifications, half_width);
        }
    }
}

struct EmployeeHoldings {
    name: String,
    qualifications: Vec<String>,
}

pub(super) fn evaluate(
    text: &str,
    company_id: u64,
    office_id: u64,
    snapshot: &ReferenceSnapshot,
) -> Verdict {
    let requirements = extract(text);
    let mut verdict = evaluate_requirements(&requirements, company_id, office_id, snapshot);
    if requirements.needs_dedicated {
        verdict.advisory = Some("技術者の専任配置が必要です".to_string());
    }
    verdict
}

fn evaluate_requirements(
    requirements: &TechnicianRequirements,
    company_id: u64,
    office_id: u64,
    snapshot: &ReferenceSnapshot,
) -> Verdict {
    let employees = snapshot.active_employees(company_id, office_id);
    if employees.is_empty() {
        return Verdict::fail(
            Category::Technician,
            "対象拠点に在籍する従業員が見つかりません",
        );
    }

    // Per-employee held, currently-active qualification display names.
    let catalog = QualificationCatalog::new(snapshot);
    let mut holdings: BTreeMap<u64, EmployeeHoldings> = BTreeMap::new();
    for employee in &employees {
        for row in snapshot.employee_qualifications(employee.employee_id) {
            if !row.is_active {
                continue;
            }
            let Some(name) = catalog.display_name(row.qualification_id) else {
                continue;
            };
            holdings
                .entry(employee.employee_id)
                .or_insert_with(|| EmployeeHoldings {
                    name: employee.employee_name.clone(),
                    qualifications: Vec::new(),
                })
                .qualifications
                .push(name);
        }
    }
    if holdings.is_empty() {
        return Verdict::fail(Category::Technician, "従業員資格情報が見つかりません");
    }

    if requirements.needs_supervising_engineer {
        let qualified: Vec<&EmployeeHoldings> = holdings
            .values()
            .filter(|employee| {
                employee
                    .qualifications
                    .iter()
                    .any(|name| name == SUPERVISING_ENGINEER_CERT)
                    && employee
                        .qualifications
                        .iter()
                        .any(|name| name == SUPERVISING_ENGINEER_TRAINING)
            })
            .collect();
        return if qualified.is_empty() {
            Verdict::fail(
                Category::Technician,
                "監理技術者資格者証と講習修了証の両方を持つ技術者がいません",
            )
        } else {
            let names: Vec<&str> = qualified
                .iter()
                .map(|employee| employee.name.as_str())
                .collect();
            Verdict::pass(
                Category::Technician,
                format!(
                    "監理技術者の要件を満たす技術者が{}名います：{}",
                    qualified.len(),
                    names.join("、")
                ),
            )
        };
    }

    if requirements.required_qualifications.is_empty() {
        return Verdict::pass(Category::Technician, "特定の技術者資格要件はありません");
    }

    let matched: Vec<MatchedEmployee> = holdings
        .iter()
        .filter_map(|(employee_id, employee)| {
            let matched_quals: Vec<String> = requirements
                .required_qualifications
                .iter()
                .filter(|required| employee.qualifications.contains(required))
                .cloned()
                .collect();
            if matched_quals.is_empty() {
                None
            } else {
                Some(MatchedEmployee {
                    employee_id: *employee_id,
                    name: employee.name.clone(),
                    qualifications: matched_quals,
                })
            }
        })
        .collect();

    if matched.is_empty() {
        return Verdict::fail(
            Category::Technician,
            format!(
                "必要な資格（{}）を持つ技術者がいません",
                requirements.required_qualifications.join("、")
            ),
        );
    }

    if requirements.requires_experience {
        if let Some(failure) = check_experience(requirements, &matched, snapshot) {
            return failure;
        }
    }

    Verdict::pass(Category::Technician, success_reason(&matched))
}

/// An employee who holds at least one of the clause's required
/// qualifications, with the subset they matched.
struct MatchedEmployee {
    employee_id: u64,
    name: String,
    qualifications: Vec<String>,
}

/// Experience checks over the already qualification-matched employees.
/// Returns the failing verdict, `None` when every present condition is met.
fn check_experience(
    requirements: &TechnicianRequirements,
    matched: &[MatchedEmployee],
    snapshot: &ReferenceSnapshot,
) -> Option<Verdict> {
    let mut any_experience = false;
    let mut per_employee_years: Vec<f64> = Vec::new();
    let mut best_score: Option<f64> = None;

    for employee in matched {
        let records = snapshot.employee_experiences(employee.employee_id);
        if !records.is_empty() {
            any_experience = true;
        }
        let mut years = 0.0;
        for record in records {
            // A duration counts only when both endpoints are well-formed.
            if let (Some(start), Some(end)) = (record.start_date, record.end_date) {
                years += (end - start).num_days().abs() as f64 / 365.25;
            }
            if let Some(score) = record.final_score {
                best_score = Some(best_score.map_or(score, |best: f64| best.max(score)));
            }
        }
        per_employee_years.push(years);
    }

    if !any_experience {
        return Some(Verdict::fail(
            Category::Technician,
            "資格要件を満たす技術者に工事経験がありません",
        ));
    }

    if let Some(required_years) = requirements.experience_years {
        let met = per_employee_years
            .iter()
            .any(|years| *years >= f64::from(required_years));
        if !met {
            return Some(Verdict::fail(
                Category::Technician,
                format!("{required_years}年以上の実務経験を持つ技術者がいません"),
            ));
        }
    }

    if let Some(required_score) = requirements.experience_score {
        let met = best_score.map_or(false, |score| score >= required_score);
        if !met {
            return Some(Verdict::fail(
                Category::Technician,
                format!("工事成績{required_score}点以上の実績を持つ技術者がいません"),
            ));
        }
    }

    None
}

/// Up to three matched technicians are listed by name with the
/// qualifications they satisfied.
fn success_reason(matched: &[MatchedEmployee]) -> String {
    let mut reason = format!("技術者要件を満たす技術者が{}名います：", matched.len());
    let shown: Vec<String> = matched
        .iter()
        .take(3)
        .map(|employee| format!("{}（{}）", employee.name, employee.qualifications.join("、")))
        .collect();
    reason.push_str(&shown.join("、"));
    if matched.len() > 3 {
        reason.push_str(&format!(" ほか{}名", matched.len() - 3));
    }
    reason
}
