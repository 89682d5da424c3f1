//! Office-location requirement evaluation.
//!
//! Prefecture names are matched as full names and as short-form tokens; the
//! short forms 東京/京都 only count as standalone tokens because each is a
//! substring of the other's full name. Named defense-bureau jurisdictions
//! expand to member prefectures through the region expander.

use std::sync::LazyLock;

use regex::Regex;

use crate::resolve::{RegionExpander, REGION_NAMES};
use crate::snapshot::ReferenceSnapshot;

use super::{Category, Verdict};

const PREFECTURES: &[&str] = &[
    "北海道",
    "青森県",
    "岩手県",
    "宮城県",
    "秋田県",
    "山形県",
    "福島県",
    "茨城県",
    "栃木県",
    "群馬県",
    "埼玉県",
    "千葉県",
    "東京都",
    "神奈川県",
    "新潟県",
    "富山県",
    "石川県",
    "福井県",
    "山梨県",
    "長野県",
    "岐阜県",
    "静岡県",
    "愛知県",
    "三重県",
    "滋賀県",
    "京都府",
    "大阪府",
    "兵庫県",
    "奈良県",
    "和歌山県",
    "鳥取県",
    "島根県",
    "岡山県",
    "広島県",
    "山口県",
    "徳島県",
    "香川県",
    "愛媛県",
    "高知県",
    "福岡県",
    "佐賀県",
    "長崎県",
    "熊本県",
    "大分県",
    "宮崎県",
    "鹿児島県",
    "沖縄県",
];

/// Short form → full prefecture name. Short forms are only honored as
/// standalone tokens after delimiter splitting.
const SHORT_FORMS: &[(&str, &str)] = &[
    ("北海道", "北海道"),
    ("青森", "青森県"),
    ("岩手", "岩手県"),
    ("宮城", "宮城県"),
    ("秋田", "秋田県"),
    ("山形", "山形県"),
    ("福島", "福島県"),
    ("茨城", "茨城県"),
    ("栃木", "栃木県"),
    ("群馬", "群馬県"),
    ("埼玉", "埼玉県"),
    ("千葉", "千葉県"),
    ("東京", "東京都"),
    ("神奈川", "神奈川県"),
    ("新潟", "新潟県"),
    ("富山", "富山県"),
    ("石川", "石川県"),
    ("福井", "福井県"),
    ("山梨", "山梨県"),
    ("長野", "長野県"),
    ("岐阜", "岐阜県"),
    ("静岡", "静岡県"),
    ("愛知", "愛知県"),
    ("三重", "三重県"),
    ("滋賀", "滋賀県"),
    ("京都", "京都府"),
    ("大阪", "大阪府"),
    ("兵庫", "兵庫県"),
    ("奈良", "奈良県"),
    ("和歌山", "和歌山県"),
    ("鳥取", "鳥取県"),
    ("島根", "島根県"),
    ("岡山", "岡山県"),
    ("広島", "広島県"),
    ("山口", "山口県"),
    ("徳島", "徳島県"),
    ("香川", "香川県"),
    ("愛媛", "愛媛県"),
    ("高知", "高知県"),
    ("福岡", "福岡県"),
    ("佐賀", "佐賀県"),
    ("長崎", "長崎県"),
    ("熊本", "熊本県"),
    ("大分", "大分県"),
    ("宮崎", "宮崎県"),
    ("鹿児島", "鹿児島県"),
    ("沖縄", "沖縄県"),
];

static TOKEN_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ 　,、。.・\s]+").expect("delimiter pattern"));

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

fn extract_prefectures(text: &str) -> Vec<String> {
    let mut prefectures = Vec::new();

    // Full names only count in a locative phrase (〇〇都に / 〇〇県内).
    for pref in PREFECTURES {
        let locative = format!("{pref}に");
        let within = format!("{pref}内");
        if text.contains(&locative) || text.contains(&within) {
            push_unique(&mut prefectures, pref);
        }
    }

    let tokens: Vec<&str> = TOKEN_DELIMITERS.split(text).collect();
    for (short, full) in SHORT_FORMS {
        if tokens.iter().any(|token| token == short) {
            push_unique(&mut prefectures, full);
        }
    }

    prefectures
}

fn extract_regions(text: &str) -> Vec<String> {
    REGION_NAMES
        .iter()
        .filter(|region| text.contains(*region))
        .map(|region| region.to_string())
        .collect()
}

fn extract_office_types(text: &str) -> Vec<String> {
    let etc_patterns: &[(&str, &[&str])] = &[
        ("支店等", &["支店", "営業所", "出張所", "BRANCH", "SALES_OFFICE"]),
        ("営業所等", &["営業所", "出張所", "SALES_OFFICE"]),
    ];
    let plain_patterns: &[(&str, &[&str])] = &[
        ("本店", &["本店", "本社", "HEADQUARTER"]),
        ("支店", &["支店", "BRANCH"]),
        ("営業所", &["営業所", "SALES_OFFICE"]),
        ("出張所", &["出張所"]),
    ];

    let mut types = Vec::new();

    // 「等」-suffixed phrases widen the match set and suppress the plain
    // patterns, otherwise 支店等 would also fire the narrower 支店 rule.
    let mut etc_found = false;
    for (pattern, expanded) in etc_patterns {
        if text.contains(pattern) {
            etc_found = true;
            for office_type in *expanded {
                push_unique(&mut types, office_type);
            }
        }
    }
    if !etc_found {
        for (pattern, expanded) in plain_patterns {
            if text.contains(pattern) {
                for office_type in *expanded {
                    push_unique(&mut types, office_type);
                }
            }
        }
    }

    // A bare 営業拠点 admits every office type while keeping the prefecture
    // conditions intact.
    if text.contains("営業拠点") && types.is_empty() {
        for office_type in [
            "本店",
            "本社",
            "HEADQUARTER",
            "支店",
            "BRANCH",
            "営業所",
            "SALES_OFFICE",
            "出張所",
        ] {
            push_unique(&mut types, office_type);
        }
    }

    types
}

/// Equivalence expansion of an office's recorded type: the raw value, its
/// whitespace-split words, and the canonical base forms.
fn expand_office_type(office_type: &str) -> Vec<String> {
    if office_type.is_empty() {
        return Vec::new();
    }

    let mut expanded = vec![office_type.to_string()];
    for part in office_type.split_whitespace() {
        push_unique(&mut expanded, part);
    }

    if office_type.contains("本社") || office_type.contains("本店") {
        for base in ["本社", "本店", "HEADQUARTER"] {
            push_unique(&mut expanded, base);
        }
    } else if office_type.contains("支店") {
        for base in ["支店", "BRANCH"] {
            push_unique(&mut expanded, base);
        }
    } else if office_type.contains("営業所") {
        for base in ["営業所", "SALES_OFFICE"] {
            push_unique(&mut expanded, base);
        }
    } else if office_type.contains("出張所") {
        push_unique(&mut expanded, "出張所");
    }

    expanded
}

pub(super) fn evaluate(text: &str, office_id: u64, snapshot: &ReferenceSnapshot) -> Verdict {
    let Some(office) = snapshot.office(office_id) else {
        return Verdict::fail(
            Category::Location,
            format!("拠点ID={office_id}の所在地要件が取得できません"),
        );
    };
    if office.office_address.is_empty() && office.prefecture.is_empty() {
        return Verdict::fail(
            Category::Location,
            format!("拠点ID={office_id}の所在地要件が取得できません"),
        );
    }

    let mut required_prefectures = extract_prefectures(text);
    let expander = RegionExpander::new(snapshot);
    for region in extract_regions(text) {
        for prefecture in expander.expand(&region) {
            push_unique(&mut required_prefectures, &prefecture);
        }
    }
    let required_types = extract_office_types(text);

    // Prefecture filter. The recorded prefecture column is authoritative;
    // the free-text address is the fallback.
    let mut matched_prefectures: Vec<String> = Vec::new();
    let prefecture_ok = if required_prefectures.is_empty() {
        true
    } else {
        let mut matched = false;
        if !office.prefecture.is_empty() {
            for pref in &required_prefectures {
                if &office.prefecture == pref {
                    matched = true;
                    matched_prefectures.push(pref.clone());
                }
            }
        }
        if !matched && !office.office_address.is_empty() {
            for pref in &required_prefectures {
                if office.office_address.contains(pref.as_str()) {
                    matched = true;
                    matched_prefectures.push(pref.clone());
                }
            }
        }
        matched
    };

    let type_ok = if required_types.is_empty() {
        true
    } else if text.contains("支店等")
        && (office.office_type.contains("支店")
            || office.office_type.contains("営業所")
            || office.office_type.contains("出張所"))
    {
        true
    } else if text.contains("営業拠点") {
        true
    } else {
        let expanded = expand_office_type(&office.office_type);
        required_types.iter().any(|required| {
            expanded
                .iter()
                .any(|held| required.contains(held.as_str()) || held.contains(required.as_str()))
        })
    };

    if prefecture_ok && type_ok {
        if matched_prefectures.is_empty() {
            Verdict::pass(Category::Location, "条件を満たしています")
        } else {
            let office_type = if office.office_type.is_empty() {
                "拠点"
            } else {
                office.office_type.as_str()
            };
            Verdict::pass(
                Category::Location,
                format!(
                    "{}に{}があります",
                    matched_prefectures.join("・"),
                    office_type
                ),
            )
        }
    } else if !prefecture_ok {
        Verdict::fail(
            Category::Location,
            format!(
                "要求地域({})に拠点がありません",
                required_prefectures.join("・")
            ),
        )
    } else {
        Verdict::fail(
            Category::Location,
            format!(
                "要求拠点種別({})の条件を満たしていません",
                required_types.join("・")
            ),
        )
    }
}
