//! Shared fixture snapshot for the screening tests.
//!
//! Company 1 is clean with offices in Tokyo (10) and Osaka (20); company 2
//! trips the article-70 flags; company 3 carries the social-insurance flag.

use chrono::NaiveDate;

use crate::resolve::UNIFIED_SCHEME;
use crate::snapshot::{
    AchievementRow, AgencyRow, CompanyFlags, ConstructionRow, EmployeeQualificationRow,
    EmployeeRow, LicenseRow, OfficeRow, QualificationRow, ReferenceSnapshot,
};

pub const UNIFIED_AGENCY: u64 = 1;
pub const DEFENSE_MINISTRY: u64 = 2;
pub const DEFENSE_BUREAU: u64 = 3;

pub const SERVICE_CATEGORY: u32 = 101;
pub const CIVIL_WORKS: u32 = 102;

pub const TOKYO_OFFICE: u64 = 10;
pub const OSAKA_OFFICE: u64 = 20;

pub fn snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot::from_rows(
        vec![
            CompanyFlags {
                company_id: 1,
                ..CompanyFlags::default()
            },
            CompanyFlags {
                company_id: 2,
                article_70: true,
                ..CompanyFlags::default()
            },
            CompanyFlags {
                company_id: 3,
                social_insurance_ok: true,
                ..CompanyFlags::default()
            },
        ],
        vec![
            OfficeRow {
                office_id: TOKYO_OFFICE,
                company_id: 1,
                office_name: "東京本社".to_string(),
                office_address: "東京都新宿区西新宿1-1-1".to_string(),
                office_type: "本社".to_string(),
                prefecture: "東京都".to_string(),
            },
            OfficeRow {
                office_id: OSAKA_OFFICE,
                company_id: 1,
                office_name: "大阪支店".to_string(),
                office_address: "大阪府大阪市北区梅田2-2-2".to_string(),
                office_type: "支店".to_string(),
                prefecture: "大阪府".to_string(),
            },
        ],
        vec![
            LicenseRow {
                office_id: TOKYO_OFFICE,
                agency_id: UNIFIED_AGENCY,
                construction_id: SERVICE_CATEGORY,
                license_grade: "B".to_string(),
                license_score: Some(1100.0),
                is_suspended: false,
            },
            LicenseRow {
                office_id: TOKYO_OFFICE,
                agency_id: DEFENSE_BUREAU,
                construction_id: CIVIL_WORKS,
                license_grade: "C".to_string(),
                license_score: Some(800.0),
                is_suspended: false,
            },
        ],
        vec![
            AchievementRow {
                achievement_id: 1,
                office_id: TOKYO_OFFICE,
                agency_id: DEFENSE_BUREAU,
                construction_id: CIVIL_WORKS,
                project_name: "庁舎改修工事".to_string(),
                contractor_layer: "元請け".to_string(),
                start_date: NaiveDate::from_ymd_opt(2021, 6, 1),
                completion_date: NaiveDate::from_ymd_opt(2022, 10, 15),
                final_score: Some(78.0),
                total_amount: Some(120_000_000.0),
                is_jv: false,
                jv_ratio: None,
                remarks: String::new(),
            },
            AchievementRow {
                achievement_id: 2,
                office_id: TOKYO_OFFICE,
                agency_id: DEFENSE_BUREAU,
                construction_id: CIVIL_WORKS,
                project_name: "旧庁舎解体".to_string(),
                contractor_layer: "一次請".to_string(),
                start_date: NaiveDate::from_ymd_opt(2015, 4, 1),
                completion_date: NaiveDate::from_ymd_opt(2016, 3, 31),
                final_score: Some(60.0),
                total_amount: Some(30_000_000.0),
                is_jv: false,
                jv_ratio: None,
                remarks: String::new(),
            },
        ],
        vec![
            EmployeeRow {
                employee_id: 100,
                company_id: 1,
                office_id: TOKYO_OFFICE,
                employee_name: "佐藤".to_string(),
                is_retired: false,
            },
            EmployeeRow {
                employee_id: 101,
                company_id: 1,
                office_id: TOKYO_OFFICE,
                employee_name: "鈴木".to_string(),
                is_retired: false,
            },
            EmployeeRow {
                employee_id: 102,
                company_id: 1,
                office_id: TOKYO_OFFICE,
                employee_name: "高橋".to_string(),
                is_retired: true,
            },
        ],
        vec![
            // 佐藤 holds only the supervising-engineer certificate.
            EmployeeQualificationRow {
                employee_id: 100,
                qualification_id: 1,
                obtained_date: NaiveDate::from_ymd_opt(2019, 4, 1),
                is_active: true,
            },
            // 鈴木 holds a civil-works credential.
            EmployeeQualificationRow {
                employee_id: 101,
                qualification_id: 3,
                obtained_date: NaiveDate::from_ymd_opt(2020, 4, 1),
                is_active: true,
            },
        ],
        Vec::new(),
        vec![
            AgencyRow {
                agency_id: UNIFIED_AGENCY,
                agency_name: UNIFIED_SCHEME.to_string(),
                parent_agency_id: None,
                agency_area: String::new(),
            },
            AgencyRow {
                agency_id: DEFENSE_MINISTRY,
                agency_name: "防衛省".to_string(),
                parent_agency_id: None,
                agency_area: String::new(),
            },
            AgencyRow {
                agency_id: DEFENSE_BUREAU,
                agency_name: "北関東防衛局".to_string(),
                parent_agency_id: Some(DEFENSE_MINISTRY),
                agency_area: String::new(),
            },
        ],
        vec![
            ConstructionRow {
                construction_id: SERVICE_CATEGORY,
                construction_name: "役務の提供等".to_string(),
                category_segment: "統一資格".to_string(),
                parent_construction_id: None,
            },
            ConstructionRow {
                construction_id: CIVIL_WORKS,
                construction_name: "土木一式工事".to_string(),
                category_segment: "建設工事".to_string(),
                parent_construction_id: None,
            },
        ],
        vec![
            QualificationRow {
                qualification_id: 1,
                qualification_name: "監理技術者資格者証".to_string(),
                qualification_type: String::new(),
            },
            QualificationRow {
                qualification_id: 2,
                qualification_name: "監理技術者講習修了証".to_string(),
                qualification_type: String::new(),
            },
            QualificationRow {
                qualification_id: 3,
                qualification_name: "1級土木施工管理技士".to_string(),
                qualification_type: String::new(),
            },
        ],
    )
}
