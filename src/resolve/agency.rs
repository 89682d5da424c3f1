//! Agency hierarchy resolution and per-agency jurisdiction vocabularies.

use crate::snapshot::ReferenceSnapshot;

/// Canonical name of the unified cross-ministry qualification scheme.
pub const UNIFIED_SCHEME: &str = "全省庁統一";

/// Agency row joined with its parent's name, the shape evaluators consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAgency {
    pub agency_id: u64,
    pub agency_name: String,
    pub parent_name: Option<String>,
    pub agency_area: String,
}

/// Keyed lookups over the agency master.
pub struct AgencyResolver<'a> {
    snapshot: &'a ReferenceSnapshot,
}

impl<'a> AgencyResolver<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn resolve(&self, agency_id: u64) -> Option<ResolvedAgency> {
        let row = self.snapshot.agency(agency_id)?;
        let parent_name = row
            .parent_agency_id
            .and_then(|parent_id| self.snapshot.agency(parent_id))
            .map(|parent| parent.agency_name.clone());
        Some(ResolvedAgency {
            agency_id: row.agency_id,
            agency_name: row.agency_name.clone(),
            parent_name,
            agency_area: row.agency_area.clone(),
        })
    }

    /// True when the license's agency is registered under the unified scheme.
    pub fn is_unified(&self, agency_id: u64) -> bool {
        self.snapshot
            .agency(agency_id)
            .map(|row| row.agency_name == UNIFIED_SCHEME)
            .unwrap_or(false)
    }

    /// True when the agency is the named ministry or a direct child of it.
    pub fn belongs_to(&self, agency_id: u64, ministry: &str) -> bool {
        let Some(row) = self.snapshot.agency(agency_id) else {
            return false;
        };
        if row.agency_name == ministry {
            return true;
        }
        row.parent_agency_id
            .and_then(|parent_id| self.snapshot.agency(parent_id))
            .map(|parent| parent.agency_name == ministry)
            .unwrap_or(false)
    }
}

/// Valid jurisdiction-area vocabulary for a named ministry's qualification
/// registrations. Unknown ministries have no vocabulary.
pub fn agency_areas(ministry: &str) -> &'static [&'static str] {
    match ministry {
        "全省庁統一" => &[
            "北海道",
            "東北",
            "関東・甲信越",
            "東海・北陸",
            "近畿",
            "中国",
            "四国",
            "九州・沖縄",
        ],
        "防衛省" => &[
            "北海道",
            "帯広",
            "東北",
            "北関東",
            "南関東",
            "近畿中部",
            "中国四国",
            "九州",
            "熊本",
            "沖縄",
        ],
        "法務省" => &[
            "北海道",
            "青森",
            "岩手",
            "宮城",
            "秋田",
            "山形",
            "福島",
            "東京",
            "神奈川",
            "埼玉",
            "千葉",
            "茨城",
            "栃木",
            "群馬",
            "山梨",
            "新潟",
            "長野",
            "富山",
            "石川",
            "福井",
            "愛知",
            "岐阜",
            "静岡",
            "三重",
            "大阪",
            "兵庫",
            "京都",
            "滋賀",
            "奈良",
            "和歌山",
            "鳥取",
            "島根",
            "岡山",
            "広島",
            "山口",
            "徳島",
            "香川",
            "愛媛",
            "高知",
            "福岡",
            "佐賀",
            "長崎",
            "熊本",
            "大分",
            "宮崎",
            "鹿児島",
            "沖縄",
            "石狩",
            "渡島",
            "檜山",
            "後志",
            "空知",
            "上川",
            "留萌",
            "宗谷",
            "オホーツク",
            "胆振",
            "日高",
            "十勝",
            "釧路",
            "根室",
        ],
        "財務省" => &[
            "北海道",
            "東北",
            "関東",
            "北陸",
            "東海",
            "近畿",
            "中国",
            "四国",
            "九州",
            "福岡",
        ],
        "厚生労働省" => &[
            "北海道",
            "東北",
            "関東・甲信越",
            "東海・北陸",
            "近畿",
            "中国",
            "四国",
            "九州・沖縄",
        ],
        "林野庁" => &[
            "本庁",
            "北海道",
            "東北",
            "関東",
            "中部",
            "近畿・中国",
            "四国",
            "九州",
        ],
        "経済産業省" => &[
            "北海道",
            "東北・関東・甲信越",
            "東海・北陸",
            "近畿",
            "中国",
            "四国",
            "九州・沖縄",
        ],
        "内閣府" => &[
            "北海道",
            "東北",
            "関東",
            "中部",
            "近畿",
            "中国",
            "四国",
            "九州",
        ],
        "農林水産省地方農政局" => &[
            "東北",
            "関東",
            "北陸",
            "東海",
            "近畿",
            "中国",
            "九州",
        ],
        "最高裁判所" => &[
            "青森",
            "岩手",
            "宮城",
            "秋田",
            "山形",
            "福島",
            "茨城",
            "栃木",
            "群馬",
            "埼玉",
            "千葉",
            "東京",
            "神奈川",
            "新潟",
            "富山",
            "石川",
            "福井",
            "山梨",
            "長野",
            "岐阜",
            "静岡",
            "愛知",
            "三重",
            "滋賀",
            "京都",
            "大阪",
            "兵庫",
            "奈良",
            "和歌山",
            "鳥取",
            "島根",
            "岡山",
            "広島",
            "山口",
            "徳島",
            "香川",
            "長崎",
            "熊本",
            "大分",
            "宮崎",
            "鹿児島",
            "沖縄",
            "石狩",
            "渡島",
            "檜山",
            "後志",
            "空知",
            "上川",
            "留萌",
            "宗谷",
            "オホーツク",
            "胆振",
            "日高",
            "十勝",
            "釧路",
            "根室",
        ],
        "国土交通省大臣官房会計課所掌機関" => &[
            "北海道運輸局",
            "東北運輸局",
            "関東運輸局",
            "北陸信越運輸局",
            "中部運輸局",
            "近畿運輸局",
            "神戸運輸監理部",
            "中国運輸局",
            "四国運輸局",
            "九州運輸局",
            "航空局",
            "東京航空局",
            "大阪航空局",
            "海上保安庁",
            "海上保安大学校",
            "海上保安学校",
            "第一管区海上保安本部",
            "第二管区海上保安本部",
            "第三管区海上保安本部",
            "第四管区海上保安本部",
            "第五管区海上保安本部",
            "第六管区海上保安本部",
            "第七管区海上保安本部",
            "第八管区海上保安本部",
            "第九管区海上保安本部",
            "第十管区海上保安本部",
            "第十一管区海上保安本部",
            "札幌管区気象台",
            "仙台管区気象台",
            "東京管区気象台",
            "大阪管区気象台",
            "福岡管区気象台",
            "沖縄気象台",
            "運輸安全委員会",
            "国土技術政策総合研究所(横須賀庁舎)",
            "海難審判所",
        ],
        "環境省" => &[
            "北海道",
            "東北",
            "関東",
            "中部",
            "近畿",
            "中国",
            "四国",
            "九州",
            "沖縄",
        ],
        "国土交通省北海道開発局" => &[
            "札幌",
            "函館",
            "小樽",
            "旭川",
            "室蘭",
            "釧路",
            "帯広",
            "網走",
            "留萌",
            "稚内",
            "本局",
        ],
        _ => &[],
    }
}
