//! # Faculty Connect Architecture
//!
//! Faculty Connect is a **UI-agnostic job board library**: faculty applicants browse
//! and apply to postings, organizations post jobs and review applications. The
//! terminal client in `crates/faculty` is one consumer; nothing here knows about it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (crates/faculty, or any other UI)             │
//! │  - Validates input, checks roles, renders state             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  JobStore (store/job_store.rs)    Session (identity.rs)     │
//! │  - Postings, applications,        - Simulated sign-in       │
//! │    favorites, pins                - Faculty profile         │
//! │  - Write-through persistence                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StorageBackend (store/)                                    │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Ambient State
//!
//! There are no globals. A [`store::job_store::JobStore`] is an owned value
//! constructed once per session (see [`init::initialize`]) and handed to whatever
//! presents it. Mutation needs `&mut`, so there is exactly one writer at a time.
//!
//! ## Failure Model
//!
//! The store never returns errors: persistence failures are logged through
//! `tracing` and the in-memory state carries on. Unknown ids are no-ops. Only
//! backends, configuration and parsing of user-facing values return
//! [`error::Result`].
//!
//! ## Module Overview
//!
//! - [`model`]: `JobPosting`, `Application`, statuses and ids
//! - [`store`]: storage abstraction, backends and the `JobStore`
//! - [`query`]: filters, marker views and dashboard counts
//! - [`identity`]: simulated sign-in and faculty profiles
//! - [`seed`]: sample data
//! - [`config`]: configuration
//! - [`init`]: data directory resolution and context setup
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod identity;
pub mod init;
pub mod model;
pub mod query;
pub mod seed;
pub mod store;

#[cfg(test)]
pub mod test_utils;
