//! Terminal styles.
//!
//! Code refers to styles by what the text *is* (a title, a timestamp, a pinned
//! marker), never by color. `console` drops the escapes when stdout is not a
//! terminal, so piped output stays plain.

use console::Style;
use facultyapp::model::{ApplicationStatus, JobStatus};

pub fn title() -> Style {
    Style::new().bold()
}

pub fn muted() -> Style {
    Style::new().color256(246).italic()
}

pub fn id() -> Style {
    Style::new().cyan()
}

pub fn marker() -> Style {
    Style::new().yellow()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow().bold()
}

pub fn job_status(status: JobStatus) -> Style {
    match status {
        JobStatus::Active => Style::new().green(),
        JobStatus::Closed => Style::new().red(),
    }
}

pub fn application_status(status: ApplicationStatus) -> Style {
    match status {
        ApplicationStatus::Applied => Style::new().blue(),
        ApplicationStatus::Shortlisted => Style::new().cyan(),
        ApplicationStatus::Interview => Style::new().yellow(),
        ApplicationStatus::Rejected => Style::new().red(),
    }
}
