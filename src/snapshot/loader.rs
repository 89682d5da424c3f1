//! TSV ingest for the master files.
//!
//! The storage collaborator exports each reference table as a tab-separated
//! text file. Dates and numeric scores tolerate blank or malformed cells:
//! they deserialize to `None` and are treated as "condition not satisfiable"
//! downstream rather than aborting the load.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::{
    AchievementRow, AgencyRow, CompanyFlags, ConstructionRow, EmployeeExperienceRow,
    EmployeeQualificationRow, EmployeeRow, LicenseRow, OfficeRow, QualificationRow,
    ReferenceSnapshot,
};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("master file {file} missing: {source}")]
    MissingFile {
        file: String,
        source: std::io::Error,
    },
    #[error("master file {file} unreadable: {source}")]
    Malformed { file: String, source: csv::Error },
}

const COMPANY_MASTER: &str = "company_master.txt";
const OFFICE_MASTER: &str = "office_master.txt";
const LICENSE_MASTER: &str = "office_registration_authorization_master.txt";
const ACHIEVEMENT_MASTER: &str = "office_work_achievements_master.txt";
const EMPLOYEE_MASTER: &str = "employee_master.txt";
const EMPLOYEE_QUALIFICATION_MASTER: &str = "employee_qualification_master.txt";
const TECHNICIAN_EXPERIENCE_MASTER: &str = "technician_experience_master.txt";
const AGENCY_MASTER: &str = "agency_master.txt";
const CONSTRUCTION_MASTER: &str = "construction_master.txt";
const QUALIFICATION_MASTER: &str = "technician_qualification_master.txt";

pub(super) fn load(dir: &Path) -> Result<ReferenceSnapshot, SnapshotError> {
    let companies: Vec<CompanyFlags> = read_table(dir, COMPANY_MASTER)?;
    let offices: Vec<OfficeRow> = read_table(dir, OFFICE_MASTER)?;
    let licenses: Vec<LicenseRow> = read_table(dir, LICENSE_MASTER)?;
    let achievements: Vec<AchievementRow> = read_table(dir, ACHIEVEMENT_MASTER)?;
    let employees: Vec<EmployeeRow> = read_table(dir, EMPLOYEE_MASTER)?;
    let employee_qualifications: Vec<EmployeeQualificationRow> =
        read_table(dir, EMPLOYEE_QUALIFICATION_MASTER)?;
    let employee_experiences: Vec<EmployeeExperienceRow> =
        read_table(dir, TECHNICIAN_EXPERIENCE_MASTER)?;
    let agencies: Vec<AgencyRow> = read_table(dir, AGENCY_MASTER)?;
    let constructions: Vec<ConstructionRow> = read_table(dir, CONSTRUCTION_MASTER)?;
    let qualifications: Vec<QualificationRow> = read_table(dir, QUALIFICATION_MASTER)?;

    info!(
        companies = companies.len(),
        offices = offices.len(),
        licenses = licenses.len(),
        achievements = achievements.len(),
        employees = employees.len(),
        "reference snapshot loaded"
    );

    Ok(ReferenceSnapshot::from_rows(
        companies,
        offices,
        licenses,
        achievements,
        employees,
        employee_qualifications,
        employee_experiences,
        agencies,
        constructions,
        qualifications,
    ))
}

fn read_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, SnapshotError> {
    let path = dir.join(file);
    let handle = File::open(&path).map_err(|source| SnapshotError::MissingFile {
        file: file.to_string(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(handle);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|source| SnapshotError::Malformed {
            file: file.to_string(),
            source,
        })?;
        rows.push(row);
    }
    debug!(file, rows = rows.len(), "master table read");
    Ok(rows)
}

/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`; blank or malformed cells become
/// `None` instead of failing the whole load.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_separators() {
        assert_eq!(
            parse_date("2024-04-01"),
            NaiveDate::from_ymd_opt(2024, 4, 1)
        );
        assert_eq!(
            parse_date("2024/04/01"),
            NaiveDate::from_ymd_opt(2024, 4, 1)
        );
    }

    #[test]
    fn malformed_dates_become_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("unknown"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }
}
