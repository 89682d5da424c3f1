use crate::screening::{Category, ScreeningEngine, Target};

use super::common;

fn target(company_id: u64, office_id: u64) -> Target {
    Target {
        announcement_id: 500,
        company_id,
        office_id,
    }
}

mod ineligibility {
    use super::*;

    #[test]
    fn article_70_flag_fails_with_article_in_reason() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Ineligibility,
            "契約事務取扱規則第70条に該当しない者であること",
            target(2, common::TOKYO_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("70条"));
    }

    #[test]
    fn clean_company_passes_article_70() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Ineligibility,
            "契約事務取扱規則第70条に該当しない者であること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok);
    }

    #[test]
    fn missing_company_fails_closed_with_key_in_reason() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Ineligibility,
            "70条に該当しないこと",
            target(999, common::TOKYO_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("999"));
    }

    // The flag named "ok" failing the check is the observed behavior of the
    // source system. This test pins it; see DESIGN.md before changing.
    #[test]
    fn social_insurance_polarity_is_preserved() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let text = "社会保険料の滞納がないこと";

        let flagged = engine.evaluate(
            Category::Ineligibility,
            text,
            target(3, common::TOKYO_OFFICE),
        );
        assert!(!flagged.is_ok);
        assert!(flagged.reason.message.contains("滞納NG"));

        let unflagged = engine.evaluate(
            Category::Ineligibility,
            text,
            target(1, common::TOKYO_OFFICE),
        );
        assert!(unflagged.is_ok);
    }
}

mod grade_item {
    use super::*;

    #[test]
    fn unified_scheme_grade_b_satisfies_grade_c_or_higher() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::GradeAndItem,
            "全省庁統一資格の「役務の提供等」においてC等級以上に格付けされている者",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
    }

    #[test]
    fn unified_scheme_grade_above_requirement_fails_at_most() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::GradeAndItem,
            "全省庁統一資格においてC等級以下に格付けされている者",
            target(1, common::TOKYO_OFFICE),
        );
        // The only unified license is grade B, above the C-or-lower band.
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("C等級"));
    }

    #[test]
    fn office_without_licenses_fails_immediately() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::GradeAndItem,
            "全省庁統一資格を有すること",
            target(1, common::OSAKA_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("ライセンス情報がありません"));
    }

    #[test]
    fn specific_agency_branch_accepts_child_agency_license() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::GradeAndItem,
            "防衛省の競争参加資格においてC等級に格付けされている者",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
    }
}

mod location {
    use super::*;

    #[test]
    fn office_outside_required_prefecture_fails_naming_it() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Location,
            "東京都内に本店又は支店を有すること",
            target(1, common::OSAKA_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("東京都"));
    }

    #[test]
    fn office_in_required_prefecture_passes_with_matched_name() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Location,
            "東京都内に本店を有すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
        assert!(verdict.reason.message.contains("東京都"));
    }

    #[test]
    fn region_keyword_expands_to_member_prefectures() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        // 北関東防衛局 includes 東京都 via the fallback map.
        let verdict = engine.evaluate(
            Category::Location,
            "北関東防衛局管内に営業拠点を有すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
    }

    #[test]
    fn missing_office_fails_closed() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Location,
            "東京都内に本店を有すること",
            target(1, 404),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("404"));
    }
}

mod experience {
    use super::*;

    #[test]
    fn prime_contractor_record_after_threshold_passes_with_details() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Experience,
            "令和3年度以降に元請けとして完成した土木工事の実績を有すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
        // Reason cites the surviving record's agency, category, and date.
        assert!(verdict.reason.message.contains("防衛局"));
        assert!(verdict.reason.message.contains("土木一式工事"));
        assert!(verdict.reason.message.contains("2022年10月15日"));
    }

    #[test]
    fn threshold_after_all_completions_fails_with_fiscal_year() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Experience,
            "令和5年度以降に元請けとして完成した工事の実績を有すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("2023年度以降"));
        assert!(verdict.reason.message.contains("2023年04月01日"));
    }

    #[test]
    fn office_without_achievements_fails_immediately() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Experience,
            "元請けとしての実績を有すること",
            target(1, common::OSAKA_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("実績情報が見つかりません"));
    }
}

mod technician {
    use super::*;

    #[test]
    fn certificate_without_training_fails_dual_credential_check() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        // 佐藤 holds the certificate but nobody holds the training cert.
        let verdict = engine.evaluate(
            Category::Technician,
            "監理技術者資格者証及び監理技術者講習修了証を有する者を配置すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(!verdict.is_ok);
        assert!(verdict.reason.message.contains("両方"));
    }

    #[test]
    fn named_qualification_held_by_active_employee_passes() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Technician,
            "1級土木施工管理技士を配置できること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok, "{}", verdict.reason.message);
        assert!(verdict.reason.message.contains("鈴木"));
    }

    #[test]
    fn dedicated_phrase_sets_advisory_without_gating() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Technician,
            "専任の1級土木施工管理技士を配置できること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok);
        assert_eq!(
            verdict.advisory.as_deref(),
            Some("技術者の専任配置が必要です")
        );
    }

    #[test]
    fn no_named_qualification_passes_unconditionally() {
        let snapshot = common::snapshot();
        let engine = ScreeningEngine::new(&snapshot);
        let verdict = engine.evaluate(
            Category::Technician,
            "適切な技術者を配置すること",
            target(1, common::TOKYO_OFFICE),
        );
        assert!(verdict.is_ok);
        assert!(verdict.reason.message.contains("特定の技術者資格要件はありません"));
    }
}
