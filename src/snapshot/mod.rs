//! Immutable reference-data snapshot shared by every evaluator.
//!
//! A snapshot is loaded once per batch from the tab-separated master files
//! and never mutated afterwards; evaluators receive `&ReferenceSnapshot` and
//! perform keyed lookups only.

mod loader;

pub use loader::SnapshotError;

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statutory disqualification flags carried by a company row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFlags {
    pub company_id: u64,
    pub article_70: bool,
    pub article_71: bool,
    pub bankruptcy: bool,
    pub reorganization: bool,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub reorganization_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub reacquisition_date: Option<NaiveDate>,
    pub anti_social: bool,
    pub adult_ward: bool,
    pub foreign_restriction: bool,
    pub subversive: bool,
    /// Observed polarity from the source system: `true` fails the
    /// social-insurance trigger. See DESIGN.md open question 1.
    pub social_insurance_ok: bool,
    pub info_security: bool,
    pub boj_suspension: bool,
}

/// Office master row: address, recorded type, and located prefecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficeRow {
    pub office_id: u64,
    pub company_id: u64,
    pub office_name: String,
    pub office_address: String,
    pub office_type: String,
    pub prefecture: String,
}

/// License/registration row held by an office with a procurement agency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseRow {
    pub office_id: u64,
    pub agency_id: u64,
    pub construction_id: u32,
    pub license_grade: String,
    pub license_score: Option<f64>,
    pub is_suspended: bool,
}

/// Completed-work achievement row for an office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementRow {
    pub achievement_id: u64,
    pub office_id: u64,
    pub agency_id: u64,
    pub construction_id: u32,
    pub project_name: String,
    pub contractor_layer: String,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub completion_date: Option<NaiveDate>,
    pub final_score: Option<f64>,
    pub total_amount: Option<f64>,
    pub is_jv: bool,
    pub jv_ratio: Option<f64>,
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub employee_id: u64,
    pub company_id: u64,
    pub office_id: u64,
    pub employee_name: String,
    pub is_retired: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeQualificationRow {
    pub employee_id: u64,
    pub qualification_id: u64,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub obtained_date: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeExperienceRow {
    pub employee_id: u64,
    pub project_name: String,
    pub role_position: String,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loader::lenient_date")]
    pub end_date: Option<NaiveDate>,
    pub agency_id: u64,
    pub construction_id: u32,
    pub final_score: Option<f64>,
}

/// Procurement agency row; `agency_area` is a comma-separated prefecture or
/// area list in the master file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyRow {
    pub agency_id: u64,
    pub agency_name: String,
    pub parent_agency_id: Option<u64>,
    pub agency_area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionRow {
    pub construction_id: u32,
    pub construction_name: String,
    pub category_segment: String,
    pub parent_construction_id: Option<u32>,
}

/// Technician qualification catalog row; `qualification_type` is an optional
/// grade/discipline suffix appended to the display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualificationRow {
    pub qualification_id: u64,
    pub qualification_name: String,
    pub qualification_type: String,
}

/// Read-only bundle of every reference table an evaluation run consults.
#[derive(Debug, Default)]
pub struct ReferenceSnapshot {
    companies: HashMap<u64, CompanyFlags>,
    offices: HashMap<u64, OfficeRow>,
    licenses: HashMap<u64, Vec<LicenseRow>>,
    achievements: HashMap<u64, Vec<AchievementRow>>,
    employees: HashMap<(u64, u64), Vec<EmployeeRow>>,
    employee_qualifications: HashMap<u64, Vec<EmployeeQualificationRow>>,
    employee_experiences: HashMap<u64, Vec<EmployeeExperienceRow>>,
    agencies: HashMap<u64, AgencyRow>,
    constructions: HashMap<u32, ConstructionRow>,
    qualifications: HashMap<u64, QualificationRow>,
    agencies_by_name: HashMap<String, u64>,
}

impl ReferenceSnapshot {
    /// Load every master table from a directory of tab-separated files.
    pub fn from_dir(dir: &Path) -> Result<Self, SnapshotError> {
        loader::load(dir)
    }

    /// Assemble a snapshot from already-materialized rows (tests, adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn from_rows(
        companies: Vec<CompanyFlags>,
        offices: Vec<OfficeRow>,
        licenses: Vec<LicenseRow>,
        achievements: Vec<AchievementRow>,
        employees: Vec<EmployeeRow>,
        employee_qualifications: Vec<EmployeeQualificationRow>,
        employee_experiences: Vec<EmployeeExperienceRow>,
        agencies: Vec<AgencyRow>,
        constructions: Vec<ConstructionRow>,
        qualifications: Vec<QualificationRow>,
    ) -> Self {
        let mut snapshot = Self::default();
        for row in companies {
            snapshot.companies.insert(row.company_id, row);
        }
        for row in offices {
            snapshot.offices.insert(row.office_id, row);
        }
        for row in licenses {
            snapshot.licenses.entry(row.office_id).or_default().push(row);
        }
        for row in achievements {
            snapshot
                .achievements
                .entry(row.office_id)
                .or_default()
                .push(row);
        }
        for row in employees {
            snapshot
                .employees
                .entry((row.company_id, row.office_id))
                .or_default()
                .push(row);
        }
        for row in employee_qualifications {
            snapshot
                .employee_qualifications
                .entry(row.employee_id)
                .or_default()
                .push(row);
        }
        for row in employee_experiences {
            snapshot
                .employee_experiences
                .entry(row.employee_id)
                .or_default()
                .push(row);
        }
        for row in agencies {
            snapshot
                .agencies_by_name
                .insert(row.agency_name.clone(), row.agency_id);
            snapshot.agencies.insert(row.agency_id, row);
        }
        for row in constructions {
            snapshot.constructions.insert(row.construction_id, row);
        }
        for row in qualifications {
            snapshot.qualifications.insert(row.qualification_id, row);
        }
        snapshot
    }

    pub fn company(&self, company_id: u64) -> Option<&CompanyFlags> {
        self.companies.get(&company_id)
    }

    pub fn office(&self, office_id: u64) -> Option<&OfficeRow> {
        self.offices.get(&office_id)
    }

    pub fn licenses(&self, office_id: u64) -> &[LicenseRow] {
        self.licenses.get(&office_id).map_or(&[], Vec::as_slice)
    }

    pub fn achievements(&self, office_id: u64) -> &[AchievementRow] {
        self.achievements.get(&office_id).map_or(&[], Vec::as_slice)
    }

    /// Currently employed staff at a company/office pair.
    pub fn active_employees(&self, company_id: u64, office_id: u64) -> Vec<&EmployeeRow> {
        self.employees
            .get(&(company_id, office_id))
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .filter(|row| !row.is_retired)
            .collect()
    }

    pub fn employee_qualifications(&self, employee_id: u64) -> &[EmployeeQualificationRow] {
        self.employee_qualifications
            .get(&employee_id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn employee_experiences(&self, employee_id: u64) -> &[EmployeeExperienceRow] {
        self.employee_experiences
            .get(&employee_id)
            .map_or(&[], Vec::as_slice)
    }

    pub fn agency(&self, agency_id: u64) -> Option<&AgencyRow> {
        self.agencies.get(&agency_id)
    }

    pub fn agency_by_name(&self, name: &str) -> Option<&AgencyRow> {
        self.agencies_by_name
            .get(name)
            .and_then(|id| self.agencies.get(id))
    }

    pub fn construction(&self, construction_id: u32) -> Option<&ConstructionRow> {
        self.constructions.get(&construction_id)
    }

    pub fn qualification(&self, qualification_id: u64) -> Option<&QualificationRow> {
        self.qualifications.get(&qualification_id)
    }

    /// All (company, office) pairs present in the office master, the seed
    /// side of the announcement cross join.
    pub fn office_targets(&self) -> Vec<(u64, u64)> {
        let mut pairs: Vec<(u64, u64)> = self
            .offices
            .values()
            .map(|row| (row.company_id, row.office_id))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}
