//! # Read-Side Queries
//!
//! Filters and summaries the presentation layer builds on top of a [`JobStore`].
//! Nothing here mutates the store.
//!
//! - [`JobFilter`]: the job listing search box and drop-downs.
//! - [`ApplicationFilter`]: the reviewer's applications screen, and an applicant's
//!   own applications.
//! - [`favorite_jobs`], [`pinned_jobs`], [`applied_jobs`]: markers resolved to postings.
//!   Dangling ids (postings that were removed) are skipped.
//! - [`jobs_for_applications`]: the postings behind a filtered set of applications,
//!   e.g. one applicant's.
//! - [`StatusCounts`], [`BoardSummary`]: dashboard numbers.

use crate::model::{Application, ApplicationStatus, JobId, JobPosting, JobStatus};
use crate::store::job_store::JobStore;
use crate::store::StorageBackend;
use std::collections::HashSet;
use serde::Serialize;

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of title, institution or subject.
    pub search: Option<String>,
    pub subject: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobPosting) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                job.title.to_lowercase().contains(&term)
                    || job.institution.to_lowercase().contains(&term)
                    || job.subject.to_lowercase().contains(&term)
            }
            None => true,
        };

        matches_search
            && self.subject.as_ref().map_or(true, |s| &job.subject == s)
            && self
                .experience
                .as_ref()
                .map_or(true, |e| &job.experience_required == e)
            && self.location.as_ref().map_or(true, |l| &job.location == l)
            && self.status.map_or(true, |s| job.status == s)
    }

    pub fn apply<'a>(&self, jobs: &'a [JobPosting]) -> Vec<&'a JobPosting> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

/// Applications filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub job_id: Option<JobId>,
    pub status: Option<ApplicationStatus>,
    /// Compared case-insensitively.
    pub applicant_email: Option<String>,
}

impl ApplicationFilter {
    pub fn matches(&self, app: &Application) -> bool {
        self.job_id.as_ref().map_or(true, |id| &app.job_id == id)
            && self.status.map_or(true, |s| app.status == s)
            && self
                .applicant_email
                .as_ref()
                .map_or(true, |email| app.applicant_email.eq_ignore_ascii_case(email))
    }

    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications.iter().filter(|app| self.matches(app)).collect()
    }
}

fn resolve<'a, B: StorageBackend>(store: &'a JobStore<B>, ids: &[JobId]) -> Vec<&'a JobPosting> {
    ids.iter().filter_map(|id| store.job(id)).collect()
}

pub fn favorite_jobs<B: StorageBackend>(store: &JobStore<B>) -> Vec<&JobPosting> {
    resolve(store, store.favorite_jobs())
}

pub fn pinned_jobs<B: StorageBackend>(store: &JobStore<B>) -> Vec<&JobPosting> {
    resolve(store, store.pinned_jobs())
}

pub fn applied_jobs<B: StorageBackend>(store: &JobStore<B>) -> Vec<&JobPosting> {
    resolve(store, &store.applied_job_ids())
}

/// Distinct postings behind `applications`, in first-application order.
pub fn jobs_for_applications<'a, B: StorageBackend>(
    store: &'a JobStore<B>,
    applications: &[&Application],
) -> Vec<&'a JobPosting> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::new();
    for app in applications {
        if seen.insert(app.job_id.clone()) {
            if let Some(job) = store.job(&app.job_id) {
                jobs.push(job);
            }
        }
    }
    jobs
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: usize,
    pub shortlisted: usize,
    pub interview: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn from_applications<'a, I>(applications: I) -> Self
    where
        I: IntoIterator<Item = &'a Application>,
    {
        let mut counts = Self::default();
        for app in applications {
            match app.status {
                ApplicationStatus::Applied => counts.applied += 1,
                ApplicationStatus::Shortlisted => counts.shortlisted += 1,
                ApplicationStatus::Interview => counts.interview += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Shortlisted => self.shortlisted,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.shortlisted + self.interview + self.rejected
    }
}

/// Headline numbers for an organization dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applications: usize,
    pub shortlisted: usize,
}

impl BoardSummary {
    pub fn from_store<B: StorageBackend>(store: &JobStore<B>) -> Self {
        let counts = StatusCounts::from_applications(store.applications());
        Self {
            total_jobs: store.jobs().len(),
            active_jobs: store.jobs().iter().filter(|job| job.is_active()).count(),
            total_applications: store.applications().len(),
            shortlisted: counts.shortlisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicantData, JobInput, JobUpdate};
    use crate::store::mem_backend::MemBackend;
    use crate::store::Keyspace;

    fn job(title: &str, subject: &str, institution: &str, location: &str) -> JobInput {
        JobInput {
            title: title.into(),
            subject: subject.into(),
            institution: institution.into(),
            location: location.into(),
            experience_required: "3-5 years".into(),
            qualification: "Ph.D.".into(),
            description: "".into(),
        }
    }

    fn applicant(email: &str) -> ApplicantData {
        ApplicantData {
            name: "Someone".into(),
            email: email.into(),
            qualification: "Ph.D.".into(),
            experience: "4 years".into(),
        }
    }

    fn board() -> JobStore<MemBackend> {
        let mut store = JobStore::open(MemBackend::new(), Keyspace::default());
        store.create_job(job(
            "Assistant Professor - Computer Science",
            "Computer Science",
            "MIT University",
            "Cambridge, MA",
        ));
        store.create_job(job(
            "Professor - Physics",
            "Physics",
            "Harvard University",
            "Cambridge, MA",
        ));
        store.create_job(job(
            "Lecturer - English Literature",
            "English",
            "Yale University",
            "New Haven, CT",
        ));
        store
    }

    #[test]
    fn search_matches_title_institution_or_subject() {
        let store = board();

        let by_title = JobFilter {
            search: Some("lecturer".into()),
            ..Default::default()
        };
        assert_eq!(by_title.apply(store.jobs()).len(), 1);

        let by_institution = JobFilter {
            search: Some("HARVARD".into()),
            ..Default::default()
        };
        assert_eq!(by_institution.apply(store.jobs())[0].subject, "Physics");

        let by_subject = JobFilter {
            search: Some("computer".into()),
            ..Default::default()
        };
        assert_eq!(by_subject.apply(store.jobs()).len(), 1);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let store = board();
        assert_eq!(JobFilter::default().apply(store.jobs()).len(), 3);
    }

    #[test]
    fn exact_filters_combine() {
        let store = board();
        let filter = JobFilter {
            location: Some("Cambridge, MA".into()),
            subject: Some("Physics".into()),
            ..Default::default()
        };
        let found = filter.apply(store.jobs());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].institution, "Harvard University");
    }

    #[test]
    fn status_filter_hides_closed_jobs() {
        let mut store = board();
        let closed = store.jobs()[0].id.clone();
        store.update_job(&closed, &JobUpdate::status(JobStatus::Closed));

        let active = JobFilter {
            status: Some(JobStatus::Active),
            ..Default::default()
        };
        let found = active.apply(store.jobs());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|job| job.id != closed));
    }

    #[test]
    fn application_filter_by_job_status_and_email() {
        let mut store = board();
        let first = store.jobs()[0].id.clone();
        let second = store.jobs()[1].id.clone();
        let a = store.apply_to_job(&first, applicant("a@x.com"));
        store.apply_to_job(&first, applicant("b@x.com"));
        store.apply_to_job(&second, applicant("A@X.com"));
        store.update_application_status(&a.id, ApplicationStatus::Shortlisted);

        let for_first = ApplicationFilter {
            job_id: Some(first.clone()),
            ..Default::default()
        };
        assert_eq!(for_first.apply(store.applications()).len(), 2);

        let shortlisted = ApplicationFilter {
            status: Some(ApplicationStatus::Shortlisted),
            ..Default::default()
        };
        assert_eq!(shortlisted.apply(store.applications())[0].id, a.id);

        let mine = ApplicationFilter {
            applicant_email: Some("a@x.com".into()),
            ..Default::default()
        };
        assert_eq!(mine.apply(store.applications()).len(), 2);
    }

    #[test]
    fn marker_views_skip_removed_jobs() {
        let mut store = board();
        let keep = store.jobs()[0].id.clone();
        let gone = store.jobs()[1].id.clone();
        store.toggle_favorite(&gone);
        store.toggle_favorite(&keep);
        store.toggle_pinned(&gone);
        store.remove_job(&gone);

        let favorites = favorite_jobs(&store);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, keep);
        assert!(pinned_jobs(&store).is_empty());
        assert_eq!(store.favorite_jobs().len(), 2);
    }

    #[test]
    fn applied_jobs_resolves_distinct_postings() {
        let mut store = board();
        let first = store.jobs()[0].id.clone();
        store.apply_to_job(&first, applicant("a@x.com"));
        store.apply_to_job(&first, applicant("a@x.com"));

        let applied = applied_jobs(&store);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].applications_count, 2);
    }

    #[test]
    fn jobs_for_one_applicant() {
        let mut store = board();
        let first = store.jobs()[0].id.clone();
        let second = store.jobs()[1].id.clone();
        store.apply_to_job(&second, applicant("other@x.com"));
        store.apply_to_job(&first, applicant("me@x.com"));
        store.apply_to_job(&first, applicant("me@x.com"));

        let mine = ApplicationFilter {
            applicant_email: Some("me@x.com".into()),
            ..Default::default()
        };
        let applications = mine.apply(store.applications());
        let jobs = jobs_for_applications(&store, &applications);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, first);

        let nobody = ApplicationFilter {
            applicant_email: Some("fresh@x.com".into()),
            ..Default::default()
        };
        assert!(jobs_for_applications(&store, &nobody.apply(store.applications())).is_empty());
    }

    #[test]
    fn status_counts_and_summary() {
        let mut store = board();
        let first = store.jobs()[0].id.clone();
        let a = store.apply_to_job(&first, applicant("a@x.com"));
        let b = store.apply_to_job(&first, applicant("b@x.com"));
        store.apply_to_job(&first, applicant("c@x.com"));
        store.update_application_status(&a.id, ApplicationStatus::Shortlisted);
        store.update_application_status(&b.id, ApplicationStatus::Rejected);
        store.update_job(&first, &JobUpdate::status(JobStatus::Closed));

        let counts = StatusCounts::from_applications(store.applications());
        assert_eq!(counts.applied, 1);
        assert_eq!(counts.get(ApplicationStatus::Shortlisted), 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.total(), 3);

        let summary = BoardSummary::from_store(&store);
        assert_eq!(
            summary,
            BoardSummary {
                total_jobs: 3,
                active_jobs: 2,
                total_applications: 3,
                shortlisted: 1,
            }
        );
    }
}
