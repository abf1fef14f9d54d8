use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::user::CompanySummary;

pub const DEFAULT_SALARY_RANGE: &str = "Not disclosed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::Hybrid => "hybrid",
            WorkMode::Onsite => "onsite",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(WorkMode::Remote),
            "hybrid" => Ok(WorkMode::Hybrid),
            "onsite" => Ok(WorkMode::Onsite),
            other => Err(format!(
                "'{}' is not a valid work mode (expected remote, hybrid or onsite)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "full-time")]
    FullTime,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "internship")]
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(EmploymentType::FullTime),
            "part-time" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            "internship" => Ok(EmploymentType::Internship),
            other => Err(format!(
                "'{}' is not a valid employment type (expected full-time, part-time, contract or internship)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_range: String,
    pub work_mode: WorkMode,
    pub employment_type: EmploymentType,
    /// Owning company. Immutable after creation.
    pub company_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_range: String,
    pub work_mode: WorkMode,
    pub employment_type: EmploymentType,
    pub company_id: Uuid,
}

/// Active-listing row with the owning company joined in.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithCompany {
    pub job: Job,
    pub company: CompanySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_mode_parses_enumerated_values_only() {
        assert_eq!("remote".parse::<WorkMode>().unwrap(), WorkMode::Remote);
        assert_eq!("hybrid".parse::<WorkMode>().unwrap(), WorkMode::Hybrid);
        assert_eq!("onsite".parse::<WorkMode>().unwrap(), WorkMode::Onsite);
        assert!("Remote".parse::<WorkMode>().is_err());
        assert!("office".parse::<WorkMode>().is_err());
    }

    #[test]
    fn employment_type_parses_enumerated_values_only() {
        assert_eq!(
            "full-time".parse::<EmploymentType>().unwrap(),
            EmploymentType::FullTime
        );
        assert_eq!(
            "internship".parse::<EmploymentType>().unwrap(),
            EmploymentType::Internship
        );
        assert!("fulltime".parse::<EmploymentType>().is_err());
        assert!("freelance".parse::<EmploymentType>().is_err());
    }
}
