//! Output formatting.
//!
//! Every function here returns a `String`; printing is left to the command
//! handlers so the formatting stays unit-testable.

use super::styles;
use chrono::{DateTime, Utc};
use facultyapp::identity::{FacultyProfile, User};
use facultyapp::model::{Application, ApplicationStatus, JobPosting};
use facultyapp::query::{BoardSummary, StatusCounts};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Characters of an id shown in listings. Commands accept any unique prefix.
pub const SHORT_ID_LEN: usize = 8;

const TITLE_WIDTH: usize = 42;
const INSTITUTION_WIDTH: usize = 24;
const TIME_WIDTH: usize = 14;

const PIN_MARKER: &str = "⚲";
const FAVORITE_MARKER: &str = "★";
const APPLIED_MARKER: &str = "✓";

/// Per-viewer markers shown next to a posting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markers {
    pub pinned: bool,
    pub favorite: bool,
    pub applied: bool,
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate to a display width, ending with an ellipsis when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push('…');
    result
}

fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn markers_column(markers: Markers) -> String {
    let slot = |on: bool, marker: &str| if on { marker.to_string() } else { " ".to_string() };
    styles::marker()
        .apply_to(format!(
            "{}{}{}",
            slot(markers.pinned, PIN_MARKER),
            slot(markers.favorite, FAVORITE_MARKER),
            slot(markers.applied, APPLIED_MARKER)
        ))
        .to_string()
}

pub fn job_line(job: &JobPosting, markers: Markers) -> String {
    let mut line = format!(
        "{} {} {}  {}  {}",
        styles::id().apply_to(short_id(job.id.as_str())),
        markers_column(markers),
        pad_to_width(&job.title, TITLE_WIDTH),
        pad_to_width(&job.institution, INSTITUTION_WIDTH),
        styles::muted().apply_to(format_time_ago(job.posted_at)),
    );
    if !job.is_active() {
        line.push_str(&format!(
            "  {}",
            styles::job_status(job.status).apply_to(job.status)
        ));
    }
    line
}

pub fn job_list<'a, I, F>(jobs: I, markers: F, empty: &str) -> String
where
    I: IntoIterator<Item = &'a JobPosting>,
    F: Fn(&JobPosting) -> Markers,
{
    let lines: Vec<String> = jobs
        .into_iter()
        .map(|job| job_line(job, markers(job)))
        .collect();
    if lines.is_empty() {
        return format!("{}\n", styles::muted().apply_to(empty));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn job_detail(job: &JobPosting, markers: Markers) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", styles::title().apply_to(&job.title)));
    out.push_str(&format!(
        "{}  {}\n\n",
        styles::id().apply_to(job.id.as_str()),
        styles::job_status(job.status).apply_to(job.status)
    ));
    let fields = [
        ("Institution", job.institution.as_str()),
        ("Location", job.location.as_str()),
        ("Subject", job.subject.as_str()),
        ("Experience", job.experience_required.as_str()),
        ("Qualification", job.qualification.as_str()),
    ];
    for (label, value) in fields {
        out.push_str(&format!("{:<14} {}\n", label, value));
    }
    out.push_str(&format!(
        "{:<14} {}\n",
        "Posted",
        job.posted_at.format("%Y-%m-%d")
    ));
    out.push_str(&format!("{:<14} {}\n", "Applicants", job.applications_count));

    let mut flags = Vec::new();
    if markers.pinned {
        flags.push("pinned");
    }
    if markers.favorite {
        flags.push("favorite");
    }
    if markers.applied {
        flags.push("applied");
    }
    if !flags.is_empty() {
        out.push_str(&format!("{:<14} {}\n", "Marked", flags.join(", ")));
    }

    out.push('\n');
    out.push_str(&job.description);
    out.push('\n');
    out
}

/// One application per line, labelled with its posting's title when known.
pub fn application_list(applications: &[&Application], jobs: &[JobPosting]) -> String {
    if applications.is_empty() {
        return format!("{}\n", styles::muted().apply_to("No applications."));
    }
    let mut out = String::new();
    for app in applications {
        let job_title = jobs
            .iter()
            .find(|job| job.id == app.job_id)
            .map(|job| job.title.as_str())
            .unwrap_or("(removed posting)");
        out.push_str(&format!(
            "{} {}  {}  {}  {}\n",
            styles::id().apply_to(short_id(app.id.as_str())),
            styles::application_status(app.status)
                .apply_to(format!("{:<11}", app.status.as_str())),
            pad_to_width(&format!("{} <{}>", app.applicant_name, app.applicant_email), 36),
            pad_to_width(job_title, TITLE_WIDTH),
            styles::muted().apply_to(format_time_ago(app.applied_at)),
        ));
    }
    out
}

pub fn status_counts(counts: &StatusCounts) -> String {
    let parts: Vec<String> = ApplicationStatus::ALL
        .iter()
        .map(|status| {
            format!(
                "{} {}",
                counts.get(*status),
                styles::application_status(*status).apply_to(status)
            )
        })
        .collect();
    format!("{}\n", parts.join("  "))
}

pub fn board_summary(summary: &BoardSummary) -> String {
    format!(
        "{:<20} {}\n{:<20} {}\n{:<20} {}\n{:<20} {}\n",
        "Total postings",
        summary.total_jobs,
        "Active postings",
        summary.active_jobs,
        "Applications",
        summary.total_applications,
        "Shortlisted",
        summary.shortlisted,
    )
}

pub fn user(user: &User) -> String {
    format!(
        "{} <{}>  {}\n",
        styles::title().apply_to(&user.name),
        user.email,
        styles::muted().apply_to(user.role)
    )
}

pub fn profile(profile: &FacultyProfile) -> String {
    let fields = [
        ("Full name", profile.full_name.as_str()),
        ("Email", profile.email.as_str()),
        ("Phone", profile.phone.as_str()),
        ("Qualification", profile.qualification.as_str()),
        ("Subject", profile.subject_expertise.as_str()),
        ("Experience", profile.years_of_experience.as_str()),
        ("Skills", profile.skills.as_str()),
        ("Bio", profile.bio.as_str()),
        ("Resume", profile.resume_url.as_deref().unwrap_or("")),
    ];
    let mut out = String::new();
    for (label, value) in fields {
        let value = if value.trim().is_empty() {
            styles::muted().apply_to("-").to_string()
        } else {
            value.to_string()
        };
        out.push_str(&format!("{:<14} {}\n", label, value));
    }

    let missing = profile.missing_fields();
    if missing.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            styles::success().apply_to("Profile complete.")
        ));
    } else {
        out.push_str(&format!(
            "\n{} {}\n",
            styles::warning().apply_to("Incomplete, missing:"),
            missing.join(", ")
        ));
    }
    out
}
