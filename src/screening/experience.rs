//! Work-achievement (past performance) requirement evaluation.
//!
//! The clause is parsed into a condition set and the office's achievement
//! rows are filtered conjunctively; one surviving row passes the clause. The
//! success reason describes the most recent surviving row, the failure
//! reason enumerates the conditions that went unmet.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::resolve::{AgencyResolver, ConstructionResolver, ResolvedAgency};
use crate::snapshot::{AchievementRow, ReferenceSnapshot};

use super::{Category, Verdict};

/// Agencies whose clause text may carry an agency-scoped score floor.
const AGENCY_KEYWORDS: &[&str] = &[
    "全省庁統一",
    "防衛省",
    "法務省",
    "財務省",
    "文部科学省",
    "厚生労働省",
    "林野庁",
    "経済産業省",
    "内閣府",
    "農林水産省大臣官房予算課",
    "農林水産省地方農政局",
    "最高裁判所",
    "国土交通省大臣官房会計課所掌機関",
    "環境省",
    "国土交通省北海道開発局",
];

const CONSTRUCTION_KEYWORDS: &[&str] = &[
    "土木",
    "建築",
    "大工",
    "左官",
    "とび・土工",
    "石",
    "屋根",
    "電気",
    "管",
    "タイル",
    "鋼構造物",
    "鉄筋",
    "舗装",
    "しゅんせつ",
    "板金",
    "ガラス",
    "塗装",
    "防水",
    "内装",
    "機械",
    "熱絶縁",
    "電気通信",
    "造園",
    "さく井",
    "建具",
    "水道施設",
    "消防施設",
    "営繕",
];

const STRUCTURE_KEYWORDS: &[&str] = &["RC造", "S造", "SRC造", "木造", "鉄骨", "鉄筋コンクリート"];

static HEISEI_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"平成\s*(\d+)\s*年度以降").expect("heisei pattern"));
static REIWA_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"令和\s*(\d+)\s*年度以降").expect("reiwa pattern"));
static WESTERN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\s*年度以降").expect("western year pattern"));
static JV_RATIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:jv比率|出資比率|比率)\s*(\d+(?:\.\d+)?)\s*[%％]以上").expect("jv pattern")
});
static JV_RATIO_GA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"出資比率が(\d+(?:\.\d+)?)%以上").expect("jv-ga pattern"));
static SCORE_WITH_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:成績|評定|点数|工事成績).*?(\d+)(?:\.\d+)?\s*点以上").expect("score pattern")
});
static SCORE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.\d+)?\s*点以上").expect("bare score pattern"));
static MIN_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*[㎡m2]\s*以上").expect("area pattern"));

#[derive(Debug, Clone, Default, PartialEq)]
struct ExperienceConditions {
    /// Western fiscal year parsed from an era-based or western expression.
    fiscal_year: Option<i32>,
    /// Concrete start of that fiscal year. April 1, except the first year of
    /// 令和 which starts May 1.
    fiscal_year_start: Option<NaiveDate>,
    required_layer: Option<&'static str>,
    min_jv_ratio: Option<f64>,
    agency_scores: Vec<(&'static str, f64)>,
    min_score: Option<f64>,
    /// Recorded for display; an average-over-records check is not performed.
    requires_average: bool,
    construction_types: Vec<&'static str>,
    /// Structure/scale conditions are extracted and surfaced but not used as
    /// filters; the achievement master carries no structure columns.
    structures: Vec<&'static str>,
    min_area: Option<f64>,
}

fn fiscal_april(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 4, 1)
}

fn extract(text: &str) -> ExperienceConditions {
    let lowered = text.to_lowercase();
    let mut conditions = ExperienceConditions::default();

    if let Some(caps) = HEISEI_YEAR.captures(text) {
        if let Ok(heisei) = caps[1].parse::<i32>() {
            let fiscal_year = 1988 + heisei;
            conditions.fiscal_year = Some(fiscal_year);
            conditions.fiscal_year_start = fiscal_april(fiscal_year);
        }
    } else if let Some(caps) = REIWA_YEAR.captures(text) {
        if let Ok(reiwa) = caps[1].parse::<i32>() {
            let fiscal_year = 2018 + reiwa;
            conditions.fiscal_year = Some(fiscal_year);
            conditions.fiscal_year_start = if reiwa == 1 {
                // 令和元年度 starts on the era's first day, not April 1.
                NaiveDate::from_ymd_opt(2019, 5, 1)
            } else {
                fiscal_april(fiscal_year)
            };
        }
    } else if let Some(caps) = WESTERN_YEAR.captures(text) {
        if let Ok(year) = caps[1].parse::<i32>() {
            conditions.fiscal_year = Some(year);
            conditions.fiscal_year_start = fiscal_april(year);
        }
    }

    if lowered.contains("元請") {
        conditions.required_layer = Some("元請け");
    } else if lowered.contains("一次請") || lowered.contains("一次下請") {
        conditions.required_layer = Some("一次請");
    } else if lowered.contains("二次請") || lowered.contains("二次下請") {
        conditions.required_layer = Some("二次請");
    } else if lowered.contains("三次請") || lowered.contains("三次下請") {
        conditions.required_layer = Some("三次請");
    }

    if let Some(caps) = JV_RATIO.captures(&lowered) {
        conditions.min_jv_ratio = caps[1].parse().ok();
    } else if lowered.contains("出資比率が") && lowered.contains("%以上") {
        if let Some(caps) = JV_RATIO_GA.captures(&lowered) {
            conditions.min_jv_ratio = caps[1].parse().ok();
        } else if lowered.contains("共同企業体") || lowered.contains("jv") {
            // Common floor when the clause names a JV without a ratio.
            conditions.min_jv_ratio = Some(20.0);
        }
    }

    for agency in AGENCY_KEYWORDS {
        let pattern = format!(r"(?s){agency}.*?(\d+)点未満のものを除く");
        if let Ok(regex) = Regex::new(&pattern) {
            if let Some(caps) = regex.captures(text) {
                if let Ok(min_score) = caps[1].parse::<f64>() {
                    conditions.agency_scores.push((agency, min_score));
                }
            }
        }
    }

    if let Some(caps) = SCORE_WITH_CONTEXT.captures(text) {
        conditions.min_score = caps[1].parse().ok();
    } else if text.contains("点以上") {
        if let Some(caps) = SCORE_BARE.captures(text) {
            conditions.min_score = caps[1].parse().ok();
        }
    }

    conditions.requires_average = lowered.contains("平均");

    for keyword in CONSTRUCTION_KEYWORDS {
        if lowered.contains(keyword) {
            conditions.construction_types.push(keyword);
        }
    }

    for keyword in STRUCTURE_KEYWORDS {
        if text.contains(keyword) {
            conditions.structures.push(keyword);
        }
    }
    if let Some(caps) = MIN_AREA.captures(text) {
        conditions.min_area = caps[1].parse().ok();
    }

    conditions
}

fn agency_matches(agency: &str, resolved: Option<&ResolvedAgency>) -> bool {
    let Some(resolved) = resolved else {
        return false;
    };
    resolved.agency_name.contains(agency)
        || resolved
            .parent_name
            .as_deref()
            .map(|parent| parent.contains(agency))
            .unwrap_or(false)
}

fn row_matches(
    row: &AchievementRow,
    conditions: &ExperienceConditions,
    agencies: &AgencyResolver<'_>,
    constructions: &ConstructionResolver<'_>,
) -> bool {
    if let Some(start) = conditions.fiscal_year_start {
        // A date-bounded clause never matches a row with no completion date.
        match row.completion_date {
            Some(completed) if completed >= start => {}
            _ => return false,
        }
    }

    let layer_ok = conditions
        .required_layer
        .map(|layer| row.contractor_layer == layer)
        .unwrap_or(true);
    let jv_alternative = conditions
        .min_jv_ratio
        .map(|min| row.is_jv && row.jv_ratio.unwrap_or(0.0) >= min)
        .unwrap_or(false);
    if !(layer_ok || jv_alternative) {
        return false;
    }
    // A JV row below the required ratio fails even when its layer matches.
    if let Some(min) = conditions.min_jv_ratio {
        if row.is_jv && row.jv_ratio.unwrap_or(0.0) < min {
            return false;
        }
    }

    if !conditions.construction_types.is_empty() {
        let matched = constructions
            .resolve(row.construction_id)
            .map(|construction| {
                conditions
                    .construction_types
                    .iter()
                    .any(|keyword| construction.construction_name.contains(keyword))
            })
            .unwrap_or(false);
        if !matched {
            return false;
        }
    }

    if let Some(min_score) = conditions.min_score {
        if row.final_score.unwrap_or(0.0) < min_score {
            return false;
        }
    }

    if !conditions.agency_scores.is_empty() {
        let resolved = agencies.resolve(row.agency_id);
        for (agency, min_score) in &conditions.agency_scores {
            // The agency-scoped floor applies only to that agency's rows.
            if agency_matches(agency, resolved.as_ref())
                && row.final_score.unwrap_or(0.0) < *min_score
            {
                return false;
            }
        }
    }

    true
}

fn success_reason(
    matching: &[&AchievementRow],
    conditions: &ExperienceConditions,
    agencies: &AgencyResolver<'_>,
    constructions: &ConstructionResolver<'_>,
) -> String {
    let most_recent = matching
        .iter()
        .max_by_key(|row| row.completion_date)
        .copied()
        .unwrap_or(matching[0]);

    let resolved_agency = agencies.resolve(most_recent.agency_id);
    let mut agency_name = resolved_agency
        .as_ref()
        .map(|agency| agency.agency_name.clone())
        .unwrap_or_else(|| "不明".to_string());
    // Sub-bureau rows display under their parent agency's name.
    if let Some(parent) = resolved_agency
        .as_ref()
        .and_then(|agency| agency.parent_name.clone())
    {
        if agency_name.contains("支局") || agency_name.contains("事務局") {
            agency_name = parent;
        }
    }

    let construction_name = constructions.name_or_unknown(most_recent.construction_id);
    let completion = most_recent
        .completion_date
        .map(|date| date.format("%Y年%m月%d日").to_string())
        .unwrap_or_else(|| "不明".to_string());

    let mut details = Vec::new();
    if let (Some(year), Some(completed)) = (conditions.fiscal_year, most_recent.completion_date) {
        details.push(format!(
            "{year}年度以降の条件に対して{}年{}月に完成",
            completed.year(),
            completed.month()
        ));
    }
    if let Some(layer) = conditions.required_layer {
        details.push(format!(
            "{layer}の条件に対して{}として参加",
            most_recent.contractor_layer
        ));
    }
    if let (Some(min), true) = (conditions.min_jv_ratio, most_recent.is_jv) {
        details.push(format!(
            "JV比率{min}%以上の条件に対してJV比率{}%で参加",
            most_recent.jv_ratio.unwrap_or(0.0)
        ));
    }
    for (agency, min_score) in &conditions.agency_scores {
        if agency_matches(agency, resolved_agency.as_ref()) {
            if let Some(score) = most_recent.final_score {
                details.push(format!(
                    "{agency}発注の成績{min_score}点以上の条件に対して成績{score}点を獲得"
                ));
            }
        }
    }
    if let (Some(min_score), Some(score)) = (conditions.min_score, most_recent.final_score) {
        details.push(format!(
            "成績{min_score}点以上の条件に対して成績{score}点を獲得"
        ));
    }
    if let Some(matched_type) = conditions
        .construction_types
        .iter()
        .find(|keyword| construction_name.contains(*keyword))
    {
        details.push(format!(
            "{matched_type}工事の条件に対して{construction_name}を実施"
        ));
    }

    let mut reason = format!("{agency_name}発注の{construction_name} {completion}完成");
    if most_recent.is_jv {
        reason.push_str(&format!(
            "、JV出資比率{}%",
            most_recent.jv_ratio.unwrap_or(0.0)
        ));
    }
    if let Some(score) = most_recent.final_score {
        if score > 0.0 {
            reason.push_str(&format!("、成績{score}点"));
        }
    }
    if !details.is_empty() {
        reason.push_str("、");
        reason.push_str(&details.join("、"));
    }
    if matching.len() > 1 {
        reason = format!("合計{}件の該当実績あり：{reason}", matching.len());
    }
    reason
}

fn failure_reason(conditions: &ExperienceConditions) -> String {
    let mut reasons = Vec::new();

    if let Some(year) = conditions.fiscal_year {
        match conditions.fiscal_year_start {
            Some(start) => reasons.push(format!(
                "{year}年度以降（{}以降）の実績がない",
                start.format("%Y年%m月%d日")
            )),
            None => reasons.push(format!("{year}年度以降の実績がない")),
        }
    }
    if let Some(layer) = conditions.required_layer {
        reasons.push(format!("{layer}としての実績がない"));
    }
    if let Some(min) = conditions.min_jv_ratio {
        reasons.push(format!("JV比率{min}%以上の実績がない"));
    }
    if let Some(min_score) = conditions.min_score {
        reasons.push(format!("成績{min_score}点以上の実績がない"));
    }
    if conditions.construction_types.len() == 1 {
        reasons.push(format!("{}工事の実績がない", conditions.construction_types[0]));
    } else if conditions.construction_types.len() > 1 {
        reasons.push(format!(
            "{}などの工事実績がない",
            conditions.construction_types.join("・")
        ));
    }
    for (agency, min_score) in &conditions.agency_scores {
        reasons.push(format!("{agency}発注の成績{min_score}点以上の実績がない"));
    }

    if reasons.is_empty() {
        "要求される実績条件を満たす工事実績が確認できません".to_string()
    } else {
        reasons.join("、")
    }
}

pub(super) fn evaluate(text: &str, office_id: u64, snapshot: &ReferenceSnapshot) -> Verdict {
    let conditions = extract(text);
    let achievements = snapshot.achievements(office_id);
    if achievements.is_empty() {
        return Verdict::fail(
            Category::Experience,
            format!("拠点ID={office_id}に実績情報が見つかりません"),
        );
    }

    let agencies = AgencyResolver::new(snapshot);
    let constructions = ConstructionResolver::new(snapshot);

    let matching: Vec<&AchievementRow> = achievements
        .iter()
        .filter(|row| row_matches(row, &conditions, &agencies, &constructions))
        .collect();

    if matching.is_empty() {
        Verdict::fail(Category::Experience, failure_reason(&conditions))
    } else {
        Verdict::pass(
            Category::Experience,
            success_reason(&matching, &conditions, &agencies, &constructions),
        )
    }
}

#[cfg(test)]
mod extraction_tests {
    use super::*;

    #[test]
    fn heisei_fiscal_year_starts_april_first() {
        let conditions = extract("平成30年度以降に完成した工事");
        assert_eq!(conditions.fiscal_year, Some(2018));
        assert_eq!(
            conditions.fiscal_year_start,
            NaiveDate::from_ymd_opt(2018, 4, 1)
        );
    }

    #[test]
    fn first_reiwa_fiscal_year_starts_may_first() {
        let conditions = extract("令和元年度以降の実績を有すること");
        // 令和元 carries no digits; the numbered form is the parsed one.
        assert_eq!(conditions.fiscal_year, None);

        let conditions = extract("令和1年度以降の実績を有すること");
        assert_eq!(conditions.fiscal_year, Some(2019));
        assert_eq!(
            conditions.fiscal_year_start,
            NaiveDate::from_ymd_opt(2019, 5, 1)
        );

        let conditions = extract("令和3年度以降の実績を有すること");
        assert_eq!(
            conditions.fiscal_year_start,
            NaiveDate::from_ymd_opt(2021, 4, 1)
        );
    }

    #[test]
    fn western_fiscal_year_uses_parsed_year() {
        let conditions = extract("2020年度以降に元請けとして完成した実績");
        assert_eq!(conditions.fiscal_year, Some(2020));
        assert_eq!(
            conditions.fiscal_year_start,
            NaiveDate::from_ymd_opt(2020, 4, 1)
        );
        assert_eq!(conditions.required_layer, Some("元請け"));
    }

    #[test]
    fn agency_scoped_score_floor_is_extracted() {
        let conditions =
            extract("防衛省発注工事のうち工事成績評定点65点未満のものを除く実績があること");
        assert_eq!(conditions.agency_scores, vec![("防衛省", 65.0)]);
    }

    #[test]
    fn jv_ratio_boundary_equality_matches() {
        let conditions = extract("JV比率20%以上の実績を有すること");
        assert_eq!(conditions.min_jv_ratio, Some(20.0));

        let row = AchievementRow {
            contractor_layer: "一次請".to_string(),
            completion_date: NaiveDate::from_ymd_opt(2022, 7, 1),
            is_jv: true,
            jv_ratio: Some(20.0),
            ..AchievementRow::default()
        };
        let snapshot = ReferenceSnapshot::default();
        let agencies = AgencyResolver::new(&snapshot);
        let constructions = ConstructionResolver::new(&snapshot);
        assert!(row_matches(&row, &conditions, &agencies, &constructions));

        let below = AchievementRow {
            jv_ratio: Some(19.9),
            ..row
        };
        assert!(!row_matches(&below, &conditions, &agencies, &constructions));
    }
}
