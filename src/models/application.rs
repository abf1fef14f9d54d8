use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::job::Job;
use crate::models::user::{ApplicantSummary, CompanySummary};

/// Status lifecycle of an application. The owning company assigns statuses
/// directly; forward-only ordering is intentionally not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "interview" => Ok(ApplicationStatus::Interview),
            "selected" => Ok(ApplicationStatus::Selected),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!(
                "'{}' is not a valid status (expected applied, shortlisted, interview, selected or rejected)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub applicant_id: Uuid,
}

/// Applicant-side listing row: the application with its job and the job's
/// owning company joined in.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    pub application: Application,
    pub job: Job,
    pub company: CompanySummary,
}

/// Company-side listing row: the application with its job and the applicant
/// joined in.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithApplicant {
    pub application: Application,
    pub job: Job,
    pub applicant: ApplicantSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_enumerated_values_only() {
        for s in ["applied", "shortlisted", "interview", "selected", "rejected"] {
            assert_eq!(s.parse::<ApplicationStatus>().unwrap().as_str(), s);
        }
        assert!("pending".parse::<ApplicationStatus>().is_err());
        assert!("Selected".parse::<ApplicationStatus>().is_err());
    }
}
