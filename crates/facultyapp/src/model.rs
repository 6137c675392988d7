//! # Domain Model: Postings and Applications
//!
//! This module defines the records the board keeps: [`JobPosting`] and [`Application`],
//! their statuses, and the typed ids that link them.
//!
//! ## Ownership of Fields
//!
//! Callers supply the descriptive fields of a posting ([`JobInput`]) and of an
//! application ([`ApplicantData`]). Everything else is assigned by the board:
//!
//! - **Ids**: fresh UUID v4 strings, stable for the lifetime of the record.
//! - **Timestamps**: `posted_at` / `applied_at` are set at creation and never change.
//! - **Counters**: `applications_count` starts at 0 and is only ever incremented by
//!   the store when an application is submitted.
//!
//! [`JobUpdate`] deliberately has no id, timestamp or counter field, so a partial
//! update cannot break those invariants.
//!
//! ## Stored Shape
//!
//! Records serialize as JSON with camelCase field names and lowercase statuses:
//!
//! ```text
//! {"id":"…","title":"Lecturer","subject":"Math",…,"postedAt":"2024-01-15T00:00:00Z",
//!  "status":"active","applicationsCount":0}
//! ```
//!
//! Ids are plain strings on the wire. Records written by other tools with
//! non-UUID ids (`"1"`, `"job-1700000000-ab12"`) load fine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::FacultyError;

/// Identifier of a [`JobPosting`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of an [`Application`]. Independent of the job id space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = FacultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(JobStatus::Active),
            "closed" => Ok(JobStatus::Closed),
            other => Err(FacultyError::InvalidStatus(other.to_string())),
        }
    }
}

/// Review state of an [`Application`].
///
/// Transitions are driven entirely by the reviewer: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Interview,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
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
    type Err = FacultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "interview" => Ok(ApplicationStatus::Interview),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(FacultyError::InvalidStatus(other.to_string())),
        }
    }
}

/// Caller-supplied fields of a new posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: String,
    pub subject: String,
    pub institution: String,
    pub location: String,
    pub experience_required: String,
    pub qualification: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub subject: String,
    pub institution: String,
    pub location: String,
    pub experience_required: String,
    pub qualification: String,
    pub description: String,
    pub posted_at: DateTime<Utc>,
    pub status: JobStatus,
    pub applications_count: u32,
}

impl JobPosting {
    pub fn new(input: JobInput) -> Self {
        Self {
            id: JobId::generate(),
            title: input.title,
            subject: input.subject,
            institution: input.institution,
            location: input.location,
            experience_required: input.experience_required,
            qualification: input.qualification,
            description: input.description,
            posted_at: Utc::now(),
            status: JobStatus::Active,
            applications_count: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Partial update of a posting. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub experience_required: Option<String>,
    pub qualification: Option<String>,
    pub description: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow overwrite of every provided field.
    pub fn apply_to(&self, job: &mut JobPosting) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(subject) = &self.subject {
            job.subject = subject.clone();
        }
        if let Some(institution) = &self.institution {
            job.institution = institution.clone();
        }
        if let Some(location) = &self.location {
            job.location = location.clone();
        }
        if let Some(experience) = &self.experience_required {
            job.experience_required = experience.clone();
        }
        if let Some(qualification) = &self.qualification {
            job.qualification = qualification.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(status) = self.status {
            job.status = status;
        }
    }
}

/// Applicant details copied into an [`Application`]. Not validated by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantData {
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub experience: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub qualification: String,
    pub experience: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

impl Application {
    pub fn new(job_id: JobId, applicant: ApplicantData) -> Self {
        Self {
            id: ApplicationId::generate(),
            job_id,
            applicant_name: applicant.name,
            applicant_email: applicant.email,
            qualification: applicant.qualification,
            experience: applicant.experience,
            applied_at: Utc::now(),
            status: ApplicationStatus::Applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> JobInput {
        JobInput {
            title: "Lecturer".into(),
            subject: "Math".into(),
            institution: "X".into(),
            location: "Y".into(),
            experience_required: "2-4 years".into(),
            qualification: "M.Sc.".into(),
            description: "teach".into(),
        }
    }

    #[test]
    fn new_posting_is_active_with_zero_applications() {
        let job = JobPosting::new(input());
        assert_eq!(job.status, JobStatus::Active);
        assert_eq!(job.applications_count, 0);
        assert_eq!(job.title, "Lecturer");
        assert!(!job.id.as_str().is_empty());
    }

    #[test]
    fn generated_ids_differ() {
        let a = JobPosting::new(input());
        let b = JobPosting::new(input());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_only_touches_provided_fields() {
        let mut job = JobPosting::new(input());
        let before = job.clone();
        let update = JobUpdate {
            title: Some("Senior Lecturer".into()),
            status: Some(JobStatus::Closed),
            ..Default::default()
        };
        update.apply_to(&mut job);

        assert_eq!(job.title, "Senior Lecturer");
        assert_eq!(job.status, JobStatus::Closed);
        assert_eq!(job.subject, before.subject);
        assert_eq!(job.id, before.id);
        assert_eq!(job.posted_at, before.posted_at);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(JobUpdate::default().is_empty());
        assert!(!JobUpdate::status(JobStatus::Closed).is_empty());
    }

    #[test]
    fn posting_serializes_camel_case() {
        let job = JobPosting::new(input());
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["experienceRequired"], "2-4 years");
        assert_eq!(json["applicationsCount"], 0);
        assert_eq!(json["status"], "active");
        assert!(json["postedAt"].is_string());
    }

    #[test]
    fn application_reads_camel_case_record() {
        let raw = r#"{
            "id": "1",
            "jobId": "1",
            "applicantName": "Dr. Sarah Johnson",
            "applicantEmail": "sarah.j@email.com",
            "qualification": "Ph.D. Computer Science",
            "experience": "4 years",
            "appliedAt": "2024-01-16T09:30:00.000Z",
            "status": "shortlisted"
        }"#;
        let app: Application = serde_json::from_str(raw).unwrap();
        assert_eq!(app.id.as_str(), "1");
        assert_eq!(app.job_id, JobId::from("1"));
        assert_eq!(app.status, ApplicationStatus::Shortlisted);
    }

    #[test]
    fn new_application_starts_applied() {
        let app = Application::new(
            JobId::from("j1"),
            ApplicantData {
                name: "A".into(),
                email: "a@x.com".into(),
                qualification: "M.Sc.".into(),
                experience: "2 years".into(),
            },
        );
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.applicant_name, "A");
        assert_eq!(app.job_id.as_str(), "j1");
    }

    #[test]
    fn statuses_parse_case_insensitively() {
        assert_eq!(
            "Shortlisted".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Shortlisted
        );
        assert_eq!("CLOSED".parse::<JobStatus>().unwrap(), JobStatus::Closed);
        assert!("hired".parse::<ApplicationStatus>().is_err());
    }
}
