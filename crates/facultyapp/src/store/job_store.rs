//! # Job Store
//!
//! [`JobStore`] is the single source of truth for postings, applications and the
//! favorite / pinned markers. It owns the in-memory collections and writes every
//! mutation through to a [`StorageBackend`] before returning.
//!
//! ## Write Discipline
//!
//! - Every mutating method takes `&mut self`. The exclusive borrow is the critical
//!   section: `apply_to_job` appends an application *and* bumps the posting's
//!   counter, and no reader can observe one without the other.
//! - Each mutation re-serializes the whole affected collection.
//! - Persistence failures are logged and swallowed. The in-memory mutation is kept,
//!   so memory may run ahead of the medium until the next successful write of that
//!   collection.
//!
//! ## Permissive References
//!
//! Unknown ids are silent no-ops (`update_job`, `remove_job`,
//! `update_application_status`). Applications may reference postings that do not
//! exist, and markers may outlive their postings. Removing a posting does not
//! cascade to applications or markers, so application history survives.
//!
//! ## Derived Views
//!
//! [`JobStore::applied_job_ids`] is recomputed from the applications on every
//! call and can never be stale.

use super::{read_json, write_json, Keyspace, StorageBackend, StorageKey};
use crate::model::{
    ApplicantData, Application, ApplicationId, ApplicationStatus, JobId, JobInput, JobPosting,
    JobUpdate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error};

pub struct JobStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    keys: Keyspace,
    jobs: Vec<JobPosting>,
    applications: Vec<Application>,
    favorites: Vec<JobId>,
    pinned: Vec<JobId>,
    loading: bool,
}

impl<B: StorageBackend> JobStore<B> {
    /// An empty store in the default namespace. Call [`JobStore::load`] to hydrate.
    pub fn new(backend: B) -> Self {
        Self::with_keyspace(backend, Keyspace::default())
    }

    pub fn with_keyspace(backend: B, keys: Keyspace) -> Self {
        Self {
            backend,
            keys,
            jobs: Vec::new(),
            applications: Vec::new(),
            favorites: Vec::new(),
            pinned: Vec::new(),
            loading: true,
        }
    }

    /// Construct and hydrate in one step.
    pub fn open(backend: B, keys: Keyspace) -> Self {
        let mut store = Self::with_keyspace(backend, keys);
        store.load();
        store
    }

    /// Hydrate all four collections from the backend.
    ///
    /// Each collection is read independently: a missing entry is an empty
    /// collection, a malformed or unreadable one is logged and falls back to empty
    /// without affecting the others.
    pub fn load(&mut self) {
        self.loading = true;
        self.jobs = self.hydrate(StorageKey::Jobs);
        self.applications = self.hydrate(StorageKey::Applications);
        self.favorites = self.hydrate(StorageKey::Favorites);
        self.pinned = self.hydrate(StorageKey::Pinned);
        self.loading = false;

        debug!(
            jobs = self.jobs.len(),
            applications = self.applications.len(),
            favorites = self.favorites.len(),
            pinned = self.pinned.len(),
            "Loaded job board"
        );
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // --- Postings ---

    pub fn create_job(&mut self, input: JobInput) -> JobPosting {
        let job = JobPosting::new(input);
        // Most recent first
        self.jobs.insert(0, job.clone());
        self.persist_jobs();
        debug!(job_id = %job.id, title = %job.title, "Created job");
        job
    }

    pub fn update_job(&mut self, id: &JobId, update: &JobUpdate) {
        if let Some(job) = self.jobs.iter_mut().find(|job| &job.id == id) {
            update.apply_to(job);
            debug!(job_id = %id, "Updated job");
        }
        self.persist_jobs();
    }

    pub fn remove_job(&mut self, id: &JobId) {
        let before = self.jobs.len();
        self.jobs.retain(|job| &job.id != id);
        if self.jobs.len() != before {
            debug!(job_id = %id, "Removed job");
        }
        self.persist_jobs();
    }

    /// Re-read postings from the backend, discarding unpersisted in-memory state.
    /// A missing or unreadable entry leaves the current postings in place.
    pub fn refresh(&mut self) {
        let key = self.keys.key(StorageKey::Jobs);
        match read_json::<_, Vec<JobPosting>>(&self.backend, &key) {
            Ok(Some(jobs)) => {
                debug!(jobs = jobs.len(), "Refreshed jobs");
                self.jobs = jobs;
            }
            Ok(None) => {}
            Err(e) => error!(key = %key, error = %e, "Failed to refresh jobs from storage"),
        }
    }

    // --- Applications ---

    /// Submit an application and bump the posting's counter.
    ///
    /// The job id is not validated: applying to an unknown posting still records
    /// the application, and the counter step is skipped.
    pub fn apply_to_job(&mut self, job_id: &JobId, applicant: ApplicantData) -> Application {
        let application = Application::new(job_id.clone(), applicant);
        self.applications.push(application.clone());
        self.persist(StorageKey::Applications, &self.applications);

        if let Some(job) = self.jobs.iter_mut().find(|job| &job.id == job_id) {
            job.applications_count = job.applications_count.saturating_add(1);
        }
        self.persist_jobs();

        debug!(
            application_id = %application.id,
            job_id = %job_id,
            "Submitted application"
        );
        application
    }

    pub fn update_application_status(&mut self, id: &ApplicationId, status: ApplicationStatus) {
        if let Some(application) = self.applications.iter_mut().find(|app| &app.id == id) {
            application.status = status;
            debug!(application_id = %id, status = %status, "Updated application status");
        }
        self.persist(StorageKey::Applications, &self.applications);
    }

    // --- Markers ---

    pub fn toggle_favorite(&mut self, job_id: &JobId) {
        toggle(&mut self.favorites, job_id);
        self.persist(StorageKey::Favorites, &self.favorites);
    }

    pub fn toggle_pinned(&mut self, job_id: &JobId) {
        toggle(&mut self.pinned, job_id);
        self.persist(StorageKey::Pinned, &self.pinned);
    }

    // --- Seeding ---

    /// Install sample data into an empty board.
    /// Returns false, changing nothing, when postings already exist.
    pub fn seed(&mut self, jobs: Vec<JobPosting>, applications: Vec<Application>) -> bool {
        if !self.jobs.is_empty() {
            return false;
        }
        self.jobs = jobs;
        self.applications.extend(applications);
        self.persist(StorageKey::Applications, &self.applications);
        self.persist_jobs();
        true
    }

    // --- Reads ---

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn job(&self, id: &JobId) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|app| &app.id == id)
    }

    pub fn favorite_jobs(&self) -> &[JobId] {
        &self.favorites
    }

    pub fn pinned_jobs(&self) -> &[JobId] {
        &self.pinned
    }

    pub fn is_favorite(&self, job_id: &JobId) -> bool {
        self.favorites.contains(job_id)
    }

    pub fn is_pinned(&self, job_id: &JobId) -> bool {
        self.pinned.contains(job_id)
    }

    /// Distinct job ids across all applications, in first-application order.
    pub fn applied_job_ids(&self) -> Vec<JobId> {
        let mut seen = HashSet::new();
        self.applications
            .iter()
            .filter(|app| seen.insert(&app.job_id))
            .map(|app| app.job_id.clone())
            .collect()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keys
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    // --- Persistence ---

    fn hydrate<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        let key = self.keys.key(key);
        match read_json(&self.backend, &key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                error!(key = %key, error = %e, "Failed to load collection from storage");
                T::default()
            }
        }
    }

    fn persist<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let key = self.keys.key(key);
        if let Err(e) = write_json(&self.backend, &key, value) {
            error!(key = %key, error = %e, "Failed to persist collection");
        }
    }

    fn persist_jobs(&self) {
        self.persist(StorageKey::Jobs, &self.jobs);
    }
}

fn toggle(set: &mut Vec<JobId>, job_id: &JobId) {
    if let Some(pos) = set.iter().position(|id| id == job_id) {
        set.remove(pos);
    } else {
        set.push(job_id.clone());
    }
}
