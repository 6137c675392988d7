//! # Initialization
//!
//! [`initialize`] turns "where should the board live" into a ready [`FacultyContext`]:
//! configuration loaded, filesystem backend rooted, store hydrated, session restored.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. `data_dir` from configuration (`FACULTY_DATA_DIR` or `faculty.toml`).
//! 3. The OS-appropriate data directory (via the `directories` crate).
//! 4. `./.faculty` when the OS gives no answer.

use crate::config::{FacultyConfig, CONFIG_FILE};
use crate::error::Result;
use crate::identity::Session;
use crate::store::fs_backend::FsBackend;
use crate::store::job_store::JobStore;
use crate::store::StorageBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct FacultyContext {
    pub store: JobStore<FsBackend>,
    pub session: Session,
    pub config: FacultyConfig,
}

impl FacultyContext {
    /// Persist the session next to the board data.
    pub fn save_session(&self) -> Result<()> {
        self.session
            .save(self.store.backend(), self.store.keyspace())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "faculty-connect", "faculty")
}

/// Config files to consult, highest priority first.
pub fn config_files(data_override: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(dir) = data_override {
        files.push(dir.join(CONFIG_FILE));
    }
    if let Some(dirs) = project_dirs() {
        files.push(dirs.config_dir().join(CONFIG_FILE));
    }
    files
}

pub fn resolve_data_dir(data_override: Option<PathBuf>, config: &FacultyConfig) -> PathBuf {
    data_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".faculty"))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<FacultyContext> {
    let config = FacultyConfig::load_from(&config_files(data_override.as_deref()))?;
    let data_dir = resolve_data_dir(data_override, &config);
    debug!(data_dir = %data_dir.display(), namespace = %config.namespace, "Initializing board");

    let store = JobStore::open(FsBackend::new(data_dir), config.keyspace());
    info!(location = %store.backend().location(), jobs = store.jobs().len(), "Opened board");
    let session = Session::load(store.backend(), store.keyspace());

    Ok(FacultyContext {
        store,
        session,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserRole;
    use crate::model::JobInput;
    use crate::test_utils::TestEnv;
    use std::fs;

    #[test]
    fn override_wins_over_config() {
        let config = FacultyConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(
            resolve_data_dir(Some(PathBuf::from("/explicit")), &config),
            PathBuf::from("/explicit")
        );
        assert_eq!(
            resolve_data_dir(None, &config),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn override_dir_config_is_consulted_first() {
        let files = config_files(Some(Path::new("/board")));
        assert_eq!(files[0], PathBuf::from("/board").join(CONFIG_FILE));
    }

    #[test]
    fn initialize_round_trips_store_and_session() {
        let env = TestEnv::new();

        let mut ctx = initialize(Some(env.root.clone())).unwrap();
        assert!(!ctx.store.is_loading());
        let job = ctx.store.create_job(JobInput {
            title: "Lecturer".into(),
            ..Default::default()
        });
        ctx.session.login("hr@mit.edu", UserRole::Organization);
        ctx.save_session().unwrap();

        let again = initialize(Some(env.root.clone())).unwrap();
        assert_eq!(again.store.jobs().len(), 1);
        assert_eq!(again.store.jobs()[0].id, job.id);
        assert_eq!(
            again.session.user().map(|u| u.role),
            Some(UserRole::Organization)
        );
    }

    #[test]
    fn namespace_from_data_dir_config() {
        let env = TestEnv::new();
        fs::write(env.root.join(CONFIG_FILE), "namespace = \"sandbox\"\n").unwrap();

        let mut ctx = initialize(Some(env.root.clone())).unwrap();
        ctx.store.create_job(JobInput::default());

        assert!(env.root.join("sandbox-jobs.json").exists());
        assert_eq!(ctx.config.namespace, "sandbox");
        assert_eq!(ctx.store.backend().location(), env.root.display().to_string());
    }
}
