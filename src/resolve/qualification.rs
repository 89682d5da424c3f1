//! Technician qualification catalog.

use crate::snapshot::ReferenceSnapshot;

/// Certificate required of a supervising engineer.
pub const SUPERVISING_ENGINEER_CERT: &str = "監理技術者資格者証";
/// Training-completion certificate paired with the supervising-engineer
/// certificate; both must be held by the same employee.
pub const SUPERVISING_ENGINEER_TRAINING: &str = "監理技術者講習修了証";

/// Every qualification name recognized in clause text, in catalog order.
pub const ALL_QUALIFICATION_NAMES: &[&str] = &[
    "監理技術者資格者証",
    "監理技術者講習修了証",
    "1級建設機械施工管理技士",
    "2級建設機械施工管理技士",
    "1級土木施工管理技士",
    "1級土木施工管理技士補",
    "2級土木施工管理技士",
    "2級土木施工管理技士補",
    "1級建築施工管理技士",
    "1級建築施工管理技士補",
    "2級建築施工管理技士",
    "2級建築施工管理技士補",
    "1級電気工事施工管理技士",
    "1級電気工事施工管理技士補",
    "2級電気工事施工管理技士",
    "2級電気工事施工管理技士補",
    "1級管工事施工管理技士",
    "1級管工事施工管理技士補",
    "2級管工事施工管理技士",
    "2級管工事施工管理技士補",
    "1級電気通信工事施工管理技士",
    "2級電気通信工事施工管理技士",
    "1級造園施工管理技士",
    "1級造園施工管理技士補",
    "2級造園施工管理技士",
    "2級造園施工管理技士補",
    "1級建築士",
    "2級建築士",
    "木造建築士",
    "建築設備士",
    "建設(「鋼構造及びコンクリート」)・総合技術監理(建設)(「鋼構造及びコンクリート」)",
    "建設(「鋼構造及びコンクリート」を除く)・総合技術監理(建設)(「鋼構造及びコンクリート」を除く)",
    "農業「農業農村工学」・総合技術監理(農業「農業農村工学」)",
    "電気電子・総合技術監理(電気電子)",
    "機械「熱・動力エネルギー機器」又は「流体機器」・総合技術監理(機械「熱・動力エネルギー機器」又は「流体機器」)",
    "機械「熱・動力エネルギー機器」及び「流体機器」を除く・総合技術監理(機械「熱・動力エネルギー機器」及び「流体機器」を除く)",
    "上下水道「上下水道及び工業用水道」・総合技術監理(上下水道「上下水道及び工業用水道」)",
    "上下水道(「下水道」)・総合技術監理(上下水道)(「下水道」)",
    "水産「水産土木」・総合技術監理(水産「水産土木」)",
    "森林「林業・林産」・総合技術監理(森林「林業・林産」)",
    "森林「森林土木」・総合技術監理(森林「森林土木」)",
    "衛生工学「水質管理」・総合技術監理(衛生工学「水質管理」)",
    "衛生工学「廃棄物・資源循環」・総合技術監理(衛生工学「廃棄物・資源循環」)",
    "衛生工学「建築物環境衛生管理」・総合技術監理(衛生工学「建築物環境衛生管理」)",
    "第1種電気工事士",
    "第2種電気工事士",
    "電気主任技術者",
    "電気通信主任技術者",
    "工事担任者(第一級アナログ通信及び第一級デジタル通信の両方)の交付を受けた者",
    "工事担任者(総合通信)の交付を受けた者",
    "給水装置工事主任技術者",
    "甲種消防設備士",
    "乙種消防設備士",
    "1級建築大工",
    "2級建築大工",
    "1級型枠施工",
    "2級型枠施工",
    "1級左官",
    "2級左官",
    "1級とび",
    "2級とび",
    "1級コンクリート圧送施工",
    "2級コンクリート圧送施工",
    "1級ウェルポイント施工",
    "2級ウェルポイント施工",
    "1級冷凍空気調和機器施工",
    "2級冷凍空気調和機器施工",
    "1級配管(選択科目「建築配管作業」)",
    "2級配管(選択科目「建築配管作業」)",
    "1級タイル張り",
    "2級タイル張り",
    "1級築炉",
    "2級築炉",
    "1級ブロック建築",
    "2級ブロック建築",
    "1級石材施工",
    "2級石材施工",
    "1級鉄工",
    "2級鉄工",
    "1級鉄筋施工(選択科目「鉄筋施工図作成作業」及び「鉄筋組立て作業」)",
    "2級及び3級鉄筋施工(選択科目「鉄筋施工図作成作業」及び「鉄筋組立て作業」)",
    "1級建築板金",
    "2級建築板金",
    "1級建築板金「ダクト板金作業」",
    "2級建築板金「ダクト板金作業」",
    "1級建築板金「ダクト板金作業」以外",
    "2級建築板金「ダクト板金作業」以外",
    "1級かわらぶき",
    "2級かわらぶき",
    "1級ガラス施工",
    "2級ガラス施工",
    "1級塗装",
    "2級塗装",
    "路面標示施工",
    "1級製作・内装仕上げ施工・裱装",
    "2級製作・内装仕上げ施工・裱装",
    "1級熱絶縁施工",
    "2級熱絶縁施工",
    "1級建具製作・カーテンウォール施工・サッシ施工",
    "2級建具製作・カーテンウォール施工・サッシ施工",
    "1級造園",
    "2級造園",
    "1級防水施工",
    "2級防水施工",
    "1級さく井",
    "2級さく井",
    "地すべり防止工事士",
    "基礎ぐい工事",
    "1級計装士",
    "解体工事施工技士",
    "登録電気工事基幹技能者",
    "登録橋梁基幹技能者",
    "登録造園基幹技能者",
    "登録コンクリート圧送基幹技能者",
    "登録防水基幹技能者",
    "登録トンネル基幹技能者",
    "登録建設塗装基幹技能者",
    "登録左官基幹技能者",
    "登録機械土工基幹技能者",
    "登録海上起重基幹技能者",
    "登録PC基幹技能者",
    "登録鉄筋基幹技能者",
    "登録圧接基幹技能者",
    "登録型枠基幹技能者",
    "登録配管基幹技能者",
    "登録鳶・土工基幹技能者",
    "登録切断穿孔基幹技能者",
    "登録内装仕上工事基幹技能者",
    "登録サッシ・カーテンウォール基幹技能者",
    "登録エクステリア基幹技能者",
    "登録ALC基幹技能者",
    "登録建築板金基幹技能者",
    "登録外壁仕上基幹技能者",
    "登録ダクト基幹技能者",
    "登録保温保冷基幹技能者",
    "登録ウレタン断熱基幹技能者",
    "登録グラウト基幹技能者",
    "登録冷凍空調基幹技能者",
    "登録運搬施設基幹技能者",
    "登録基礎工基幹技能者",
    "登録タイル張り基幹技能者",
    "登録標識・路面標示基幹技能者",
    "登録土工基幹技能者",
    "登録発破・破砕基幹技能者",
    "登録圧入基幹技能者",
    "登録送電線工事基幹技能者",
    "登録消化設備基幹技能者",
    "登録建築大工基幹技能者",
    "登録建築測量基幹技能者",
    "登録硝子工事基幹技能者",
    "登録さく井基幹技能者",
    "登録解体基幹技能者",
    "登録あと施工アンカー基幹技能者",
    "登録計装基幹技能者",
    "登録土質改良基幹技能者",
    "登録都市トンネル基幹技能者",
    "登録潜函基幹技能者",];

/// Display-name resolution over the qualification master.
pub struct QualificationCatalog<'a> {
    snapshot: &'a ReferenceSnapshot,
}

impl<'a> QualificationCatalog<'a> {
    pub fn new(snapshot: &'a ReferenceSnapshot) -> Self {
        Self { snapshot }
    }

    /// Canonical display name for a qualification id, appending the
    /// grade/discipline suffix as `名称(種別)` when one exists.
    pub fn display_name(&self, qualification_id: u64) -> Option<String> {
        let row = self.snapshot.qualification(qualification_id)?;
        if row.qualification_type.trim().is_empty() {
            Some(row.qualification_name.clone())
        } else {
            Some(format!(
                "{}({})",
                row.qualification_name, row.qualification_type
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::QualificationRow;

    #[test]
    fn appends_type_suffix_when_present() {
        let snapshot = ReferenceSnapshot::from_rows(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                QualificationRow {
                    qualification_id: 1,
                    qualification_name: "監理技術者資格者証".to_string(),
                    qualification_type: String::new(),
                },
                QualificationRow {
                    qualification_id: 2,
                    qualification_name: "電気主任技術者".to_string(),
                    qualification_type: "1種".to_string(),
                },
            ],
        );
        let catalog = QualificationCatalog::new(&snapshot);
        assert_eq!(
            catalog.display_name(1).as_deref(),
            Some("監理技術者資格者証")
        );
        assert_eq!(
            catalog.display_name(2).as_deref(),
            Some("電気主任技術者(1種)")
        );
        assert_eq!(catalog.display_name(99), None);
    }

    #[test]
    fn catalog_list_is_duplicate_free() {
        let mut seen = std::collections::HashSet::new();
        for name in ALL_QUALIFICATION_NAMES {
            assert!(seen.insert(name), "duplicate catalog entry: {name}");
        }
    }
}
