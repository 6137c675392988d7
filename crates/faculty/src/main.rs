//! # Faculty CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/facultyapp/`: UI-agnostic library: store, identity, queries
//! - `crates/faculty/`: this terminal client
//!
//! Everything in `facultyapp` takes and returns plain Rust values. This crate owns
//! every user-facing concern: argument parsing, input validation, advisory role
//! checks, rendering, logging setup and exit codes.
//!
//! ## Testing Approach
//!
//! - Store and identity logic are unit tested inside `facultyapp`.
//! - Rendering helpers have unit tests in `cli/render.rs`.
//! - `tests/` drives the built binary end to end against a temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
