//! Expansion of named regional jurisdictions into member prefectures.
//!
//! The agency master is the source of truth: a row whose name matches the
//! region and carries a non-empty comma-separated `agency_area` wins. The
//! defense-bureau map below is the fallback for regions absent from the
//! master.

use crate::snapshot::ReferenceSnapshot;

/// Regional jurisdiction names recognized in clause text.
pub const REGION_NAMES: &[&str] = &[
    "北海道防衛局",
    "帯広防衛支局",
    "東北防衛局",
    "北関東防衛局",
    "南関東防衛局",
    "東海防衛支局",
    "近畿中部防衛局",
    "中国四国防衛局",
    "九州防衛局",
    "沖縄防衛局",
];

pub struct RegionExpander<'a> {
    snapshot: &'a ReferenceSnapshot,
}

impl<'a> RegionExpander<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self { snapshot }
    }

    /// Member prefectures of a named region. Empty for unknown names.
    pub fn expand(&self, region_name: &str) -> Vec<String> {
        if let Some(row) = self.snapshot.agency_by_name(region_name) {
            if !row.agency_area.trim().is_empty() {
                return row
                    .agency_area
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect();
            }
        }
        fallback_prefectures(region_name)
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

fn fallback_prefectures(region_name: &str) -> &'static [&'static str] {
    match region_name {
        "北海道防衛局" => &["北海道"],
        "帯広防衛支局" => &["北海道"],
        "東北防衛局" => &["青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県"],
        "北関東防衛局" => &[
            "茨城県",
            "栃木県",
            "群馬県",
            "埼玉県",
            "千葉県",
            "東京都",
            "新潟県",
            "長野県",
        ],
        "南関東防衛局" => &["神奈川県", "山梨県", "静岡県"],
        "東海防衛支局" => &["岐阜県", "愛知県", "三重県"],
        "近畿中部防衛局" => &[
            "富山県",
            "石川県",
            "福井県",
            "滋賀県",
            "京都府",
            "大阪府",
            "兵庫県",
            "奈良県",
            "和歌山県",
            "愛知県",
            "岐阜県",
            "三重県",
        ],
        "中国四国防衛局" => &[
            "鳥取県",
            "島根県",
            "岡山県",
            "広島県",
            "山口県",
            "徳島県",
            "香川県",
            "愛媛県",
            "高知県",
        ],
        "九州防衛局" => &[
            "福岡県",
            "佐賀県",
            "長崎県",
            "熊本県",
            "大分県",
            "宮崎県",
            "鹿児島県",
        ],
        "沖縄防衛局" => &["沖縄県"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AgencyRow;
    use std::collections::HashSet;

    #[test]
    fn every_named_region_expands_to_distinct_prefectures() {
        let snapshot = ReferenceSnapshot::default();
        let expander = RegionExpander::new(&snapshot);
        for region in REGION_NAMES {
            let prefectures = expander.expand(region);
            assert!(!prefectures.is_empty(), "{region} expanded to nothing");
            let unique: HashSet<&String> = prefectures.iter().collect();
            assert_eq!(unique.len(), prefectures.len(), "{region} has duplicates");
        }
    }

    #[test]
    fn master_row_overrides_fallback() {
        let snapshot = ReferenceSnapshot::from_rows(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![AgencyRow {
                agency_id: 9,
                agency_name: "南関東防衛局".to_string(),
                parent_agency_id: None,
                agency_area: "神奈川県, 山梨県".to_string(),
            }],
            Vec::new(),
            Vec::new(),
        );
        let expander = RegionExpander::new(&snapshot);
        assert_eq!(
            expander.expand("南関東防衛局"),
            vec!["神奈川県".to_string(), "山梨県".to_string()]
        );
    }
}
