//! # CLI Behavior
//!
//! This is **one possible UI client** for the board, not the board itself.
//!
//! ## Roles
//!
//! `faculty login <email> --role <role>` starts a simulated session. Roles decide
//! which commands make sense (organizations post and review, faculty apply), but
//! the checks are advisory: a mismatched role prints a warning and carries on.
//!
//! ## Applying
//!
//! `faculty apply <job-id>` is the one command with a hard precondition: the
//! signed-in faculty profile must be complete, and the posting must exist and be
//! active. The store itself would accept anything.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context setup, dispatch and per-command handlers
//! - `render`: output formatting (tables, relative times)
//! - `styles`: terminal styling

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
