use clap::{Args, Parser, Subcommand};
use facultyapp::error::FacultyError;
use facultyapp::identity::UserRole;
use facultyapp::model::{ApplicationStatus, JobStatus};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "faculty",
    bin_name = "faculty",
    version,
    disable_help_subcommand = true,
    about = "Faculty job board: browse, post and apply from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the board data (overrides config)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in (simulated, no password)
    Login {
        email: String,

        /// faculty, organization or admin
        #[arg(short, long, value_parser = parse_with::<UserRole>, default_value = "faculty")]
        role: UserRole,
    },

    /// Create an account and sign in (simulated)
    Register {
        email: String,

        /// faculty, organization or admin
        #[arg(short, long, value_parser = parse_with::<UserRole>, default_value = "faculty")]
        role: UserRole,

        /// Your name (faculty)
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Institution name (organizations)
        #[arg(long)]
        institution: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or edit your faculty profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },

    /// Browse and manage job postings
    #[command(alias = "j")]
    Jobs {
        #[command(subcommand)]
        action: Option<JobCommands>,
    },

    /// Apply to a job with your profile
    Apply {
        /// Job id (or unique prefix)
        job: String,
    },

    /// List applications
    #[command(alias = "apps")]
    Applications {
        /// Only applications to this job
        #[arg(long)]
        job: Option<String>,

        /// applied, shortlisted, interview or rejected
        #[arg(long, value_parser = parse_with::<ApplicationStatus>)]
        status: Option<ApplicationStatus>,

        /// Only your own applications
        #[arg(long)]
        mine: bool,

        #[arg(long)]
        json: bool,
    },

    /// Set the review status of an application
    Status {
        /// Application id (or unique prefix)
        application: String,

        /// applied, shortlisted, interview or rejected
        #[arg(value_parser = parse_with::<ApplicationStatus>)]
        status: ApplicationStatus,
    },

    /// Toggle a job in your favorites
    #[command(alias = "fav")]
    Favorite { job: String },

    /// Toggle a job in your pinned list
    Pin { job: String },

    /// List favorite jobs
    Favorites,

    /// List pinned jobs
    Pinned,

    /// List jobs you have applied to
    Applied,

    /// Board totals
    Summary,

    /// Fill an empty board with sample postings and applications
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile and what is missing
    Show,

    /// Update profile fields
    Set(ProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub qualification: Option<String>,

    /// Subject expertise
    #[arg(long)]
    pub subject: Option<String>,

    /// Years of experience
    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub skills: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub resume_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// List postings
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one posting in full
    Show { job: String },

    /// Post a new job
    Post(PostArgs),

    /// Change fields of a posting
    Update {
        job: String,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Mark a posting closed
    Close { job: String },

    /// Delete a posting (its applications are kept)
    #[command(alias = "rm")]
    Remove { job: String },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Match title, institution or subject
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    /// Experience label, e.g. "3-5 years"
    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// active or closed
    #[arg(long, value_parser = parse_with::<JobStatus>)]
    pub status: Option<JobStatus>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub institution: String,

    #[arg(long)]
    pub location: String,

    /// Experience label, e.g. "2-4 years"
    #[arg(long)]
    pub experience: String,

    #[arg(long)]
    pub qualification: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub institution: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub qualification: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// active or closed
    #[arg(long, value_parser = parse_with::<JobStatus>)]
    pub status: Option<JobStatus>,
}

/// Parse through the library's `FromStr` impls so clap reports their errors.
fn parse_with<T: FromStr<Err = FacultyError>>(value: &str) -> Result<T, String> {
    value.parse().map_err(|e: FacultyError| e.to_string())
}
