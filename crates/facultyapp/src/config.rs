//! # Configuration
//!
//! Configuration is loaded with [`confique`], layering environment variables over
//! TOML files over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FACULTY_NAMESPACE`, `FACULTY_DATA_DIR`.
//! 2. **Data directory config**: `<data dir>/faculty.toml`, when a data directory is
//!    given explicitly.
//! 3. **User config**: `faculty.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `namespace` | `faculty-connect` | Prefix of every storage key |
//! | `data_dir` | OS data directory | Where the filesystem backend keeps its files |

use crate::error::Result;
use crate::store::{Keyspace, DEFAULT_NAMESPACE};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "faculty.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FacultyConfig {
    /// Prefix of every storage key, so several boards can share one data directory.
    #[config(env = "FACULTY_NAMESPACE", default = "faculty-connect")]
    pub namespace: String,

    /// Directory for the filesystem backend. When absent, the OS data directory is used.
    #[config(env = "FACULTY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for FacultyConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_dir: None,
        }
    }
}

impl FacultyConfig {
    /// Load from the environment and the given config files, earlier files winning.
    /// Missing files are skipped.
    pub fn load_from<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = Self::builder().env();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        Ok(builder.load()?)
    }

    pub fn keyspace(&self) -> Keyspace {
        let namespace = self.namespace.trim();
        if namespace.is_empty() {
            Keyspace::default()
        } else {
            Keyspace::new(namespace)
        }
    }
}
