use super::render::{self, Markers};
use super::setup::{
    Cli, Commands, JobCommands, ListArgs, PostArgs, ProfileArgs, ProfileCommands, UpdateArgs,
};
use super::styles;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use facultyapp::identity::{ProfileUpdate, RegisterData, UserRole};
use facultyapp::init::{initialize, FacultyContext};
use facultyapp::model::{
    ApplicationId, ApplicationStatus, JobId, JobInput, JobPosting, JobStatus, JobUpdate,
};
use facultyapp::query::{self, ApplicationFilter, BoardSummary, JobFilter, StatusCounts};
use facultyapp::seed::sample_board;
use facultyapp::store::job_store::JobStore;
use facultyapp::store::StorageBackend;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(cli.data).context("Failed to open the job board")?;

    match cli.command {
        Some(Commands::Login { email, role }) => handle_login(&mut ctx, &email, role),
        Some(Commands::Register {
            email,
            role,
            name,
            phone,
            institution,
        }) => handle_register(
            &mut ctx,
            RegisterData {
                role,
                email,
                name: non_blank(name),
                phone: non_blank(phone),
                institution_name: non_blank(institution),
            },
        ),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Profile { action }) => match action {
            None | Some(ProfileCommands::Show) => handle_profile_show(&ctx),
            Some(ProfileCommands::Set(args)) => handle_profile_set(&mut ctx, args),
        },
        Some(Commands::Jobs { action }) => match action {
            None => handle_jobs_list(&ctx, ListArgs::default()),
            Some(JobCommands::List(args)) => handle_jobs_list(&ctx, args),
            Some(JobCommands::Show { job }) => handle_jobs_show(&ctx, &job),
            Some(JobCommands::Post(args)) => handle_jobs_post(&mut ctx, args),
            Some(JobCommands::Update { job, fields }) => handle_jobs_update(&mut ctx, &job, fields),
            Some(JobCommands::Close { job }) => handle_jobs_close(&mut ctx, &job),
            Some(JobCommands::Remove { job }) => handle_jobs_remove(&mut ctx, &job),
        },
        Some(Commands::Apply { job }) => handle_apply(&mut ctx, &job),
        Some(Commands::Applications {
            job,
            status,
            mine,
            json,
        }) => handle_applications(&ctx, job.as_deref(), status, mine, json),
        Some(Commands::Status {
            application,
            status,
        }) => handle_status(&mut ctx, &application, status),
        Some(Commands::Favorite { job }) => handle_favorite(&mut ctx, &job),
        Some(Commands::Pin { job }) => handle_pin(&mut ctx, &job),
        Some(Commands::Favorites) => handle_marked(&ctx, Marked::Favorites),
        Some(Commands::Pinned) => handle_marked(&ctx, Marked::Pinned),
        Some(Commands::Applied) => handle_applied(&ctx),
        Some(Commands::Summary) => handle_summary(&ctx),
        Some(Commands::Seed) => handle_seed(&mut ctx),
        None => handle_jobs_list(&ctx, ListArgs::default()),
    }
}

/// Logs go to stderr so they never mix with command output.
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// --- Input helpers ---

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn warn_user(message: &str) {
    eprintln!("{} {}", styles::warning().apply_to("warning:"), message);
}

/// Roles are advisory: print a warning when the signed-in role does not fit.
fn advise_role(ctx: &FacultyContext, wants_manager: bool) {
    let Some(user) = ctx.session.user() else {
        let hint = if wants_manager {
            "not signed in; this is meant for organizations (faculty login <email> --role organization)"
        } else {
            "not signed in; this is meant for faculty (faculty login <email>)"
        };
        warn_user(hint);
        return;
    };
    if user.role.can_manage_jobs() != wants_manager {
        let audience = if wants_manager {
            "organizations and admins"
        } else {
            "faculty"
        };
        warn_user(&format!(
            "signed in as {}, this is meant for {}",
            user.role, audience
        ));
    }
}

/// Exact id, or a prefix matching exactly one posting.
fn resolve_job<B: StorageBackend>(store: &JobStore<B>, input: &str) -> Result<JobId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Job id is required");
    }
    let exact = JobId::new(input);
    if store.job(&exact).is_some() {
        return Ok(exact);
    }
    let matches: Vec<&JobId> = store
        .jobs()
        .iter()
        .map(|job| &job.id)
        .filter(|id| id.as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(anyhow!("Job not found: {}", input)),
        _ => Err(anyhow!(
            "Job id prefix '{}' is ambiguous ({} matches)",
            input,
            matches.len()
        )),
    }
}

fn resolve_application<B: StorageBackend>(
    store: &JobStore<B>,
    input: &str,
) -> Result<ApplicationId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Application id is required");
    }
    let exact = ApplicationId::new(input);
    if store.application(&exact).is_some() {
        return Ok(exact);
    }
    let matches: Vec<&ApplicationId> = store
        .applications()
        .iter()
        .map(|app| &app.id)
        .filter(|id| id.as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(anyhow!("Application not found: {}", input)),
        _ => Err(anyhow!(
            "Application id prefix '{}' is ambiguous ({} matches)",
            input,
            matches.len()
        )),
    }
}

/// Applications carry the profile email, so prefer it over the sign-in email.
fn viewer_email(ctx: &FacultyContext) -> Option<&str> {
    let user = ctx.session.user()?;
    match ctx.session.profile() {
        Some(profile) if !profile.email.trim().is_empty() => Some(profile.email.as_str()),
        _ => Some(user.email.as_str()),
    }
}

/// Markers for the current viewer. Applied jobs are those the viewer applied
/// to, matched by email.
fn markers_for(ctx: &FacultyContext) -> impl Fn(&JobPosting) -> Markers + '_ {
    let email = viewer_email(ctx);
    let applied: HashSet<&JobId> = ctx
        .store
        .applications()
        .iter()
        .filter(|app| email.is_some_and(|email| app.applicant_email.eq_ignore_ascii_case(email)))
        .map(|app| &app.job_id)
        .collect();
    move |job: &JobPosting| Markers {
        pinned: ctx.store.is_pinned(&job.id),
        favorite: ctx.store.is_favorite(&job.id),
        applied: applied.contains(&job.id),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// --- Session ---

fn handle_login(ctx: &mut FacultyContext, email: &str, role: UserRole) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        bail!("Email is required");
    }
    let user = ctx.session.login(email, role);
    let line = render::user(user);
    ctx.save_session()?;
    print!("Signed in: {}", line);
    Ok(())
}

fn handle_register(ctx: &mut FacultyContext, data: RegisterData) -> Result<()> {
    if data.email.trim().is_empty() {
        bail!("Email is required");
    }
    let user = ctx.session.register(RegisterData {
        email: data.email.trim().to_string(),
        ..data
    });
    let line = render::user(user);
    ctx.save_session()?;
    print!("Registered: {}", line);
    Ok(())
}

fn handle_logout(ctx: &mut FacultyContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.session.logout();
    ctx.save_session()?;
    println!("Signed out.");
    Ok(())
}

fn handle_whoami(ctx: &FacultyContext) -> Result<()> {
    match ctx.session.user() {
        Some(user) => print!("{}", render::user(user)),
        None => println!("Not signed in."),
    }
    println!(
        "{}",
        styles::muted().apply_to(format!(
            "Board: {} (namespace {})",
            ctx.store.backend().location(),
            ctx.config.namespace
        ))
    );
    Ok(())
}

fn handle_profile_show(ctx: &FacultyContext) -> Result<()> {
    let profile = ctx
        .session
        .profile()
        .ok_or_else(|| anyhow!("No faculty profile; sign in with --role faculty"))?;
    print!("{}", render::profile(profile));
    Ok(())
}

fn handle_profile_set(ctx: &mut FacultyContext, args: ProfileArgs) -> Result<()> {
    if ctx.session.profile().is_none() {
        bail!("No faculty profile; sign in with --role faculty");
    }
    let update = ProfileUpdate {
        full_name: args.name,
        email: args.email,
        phone: args.phone,
        qualification: args.qualification,
        subject_expertise: args.subject,
        years_of_experience: args.experience,
        skills: args.skills,
        bio: args.bio,
        resume_url: args.resume_url,
    };
    ctx.session.update_profile(update);
    ctx.save_session()?;
    if let Some(profile) = ctx.session.profile() {
        print!("{}", render::profile(profile));
    }
    Ok(())
}

// --- Postings ---

fn handle_jobs_list(ctx: &FacultyContext, args: ListArgs) -> Result<()> {
    let filter = JobFilter {
        search: non_blank(args.search),
        subject: non_blank(args.subject),
        experience: non_blank(args.experience),
        location: non_blank(args.location),
        status: args.status,
    };
    let jobs = filter.apply(ctx.store.jobs());
    if args.json {
        return print_json(&jobs);
    }
    print!(
        "{}",
        render::job_list(jobs, markers_for(ctx), "No jobs match.")
    );
    Ok(())
}

fn handle_jobs_show(ctx: &FacultyContext, input: &str) -> Result<()> {
    let id = resolve_job(&ctx.store, input)?;
    let job = ctx
        .store
        .job(&id)
        .ok_or_else(|| anyhow!("Job not found: {}", input))?;
    print!("{}", render::job_detail(job, markers_for(ctx)(job)));
    Ok(())
}

fn handle_jobs_post(ctx: &mut FacultyContext, args: PostArgs) -> Result<()> {
    advise_role(ctx, true);
    let required = [
        ("title", &args.title),
        ("subject", &args.subject),
        ("institution", &args.institution),
        ("location", &args.location),
        ("experience", &args.experience),
        ("qualification", &args.qualification),
        ("description", &args.description),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        bail!("Missing required fields: {}", missing.join(", "));
    }

    let job = ctx.store.create_job(JobInput {
        title: args.title.trim().to_string(),
        subject: args.subject.trim().to_string(),
        institution: args.institution.trim().to_string(),
        location: args.location.trim().to_string(),
        experience_required: args.experience.trim().to_string(),
        qualification: args.qualification.trim().to_string(),
        description: args.description.trim().to_string(),
    });
    if args.json {
        return print_json(&job);
    }
    println!(
        "{} {}  {}",
        styles::success().apply_to("Posted"),
        styles::id().apply_to(job.id.as_str()),
        job.title
    );
    Ok(())
}

fn handle_jobs_update(ctx: &mut FacultyContext, input: &str, args: UpdateArgs) -> Result<()> {
    advise_role(ctx, true);
    let id = resolve_job(&ctx.store, input)?;
    let update = JobUpdate {
        title: non_blank(args.title),
        subject: non_blank(args.subject),
        institution: non_blank(args.institution),
        location: non_blank(args.location),
        experience_required: non_blank(args.experience),
        qualification: non_blank(args.qualification),
        description: non_blank(args.description),
        status: args.status,
    };
    if update.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }
    ctx.store.update_job(&id, &update);
    println!(
        "{} {}",
        styles::success().apply_to("Updated"),
        styles::id().apply_to(render::short_id(id.as_str()))
    );
    Ok(())
}

fn handle_jobs_close(ctx: &mut FacultyContext, input: &str) -> Result<()> {
    advise_role(ctx, true);
    let id = resolve_job(&ctx.store, input)?;
    ctx.store
        .update_job(&id, &JobUpdate::status(JobStatus::Closed));
    println!(
        "{} {}",
        styles::success().apply_to("Closed"),
        styles::id().apply_to(render::short_id(id.as_str()))
    );
    Ok(())
}

fn handle_jobs_remove(ctx: &mut FacultyContext, input: &str) -> Result<()> {
    advise_role(ctx, true);
    let id = resolve_job(&ctx.store, input)?;
    ctx.store.remove_job(&id);
    println!(
        "{} {}",
        styles::success().apply_to("Removed"),
        styles::id().apply_to(render::short_id(id.as_str()))
    );
    Ok(())
}

// --- Applications ---

fn handle_apply(ctx: &mut FacultyContext, input: &str) -> Result<()> {
    if !ctx.session.is_authenticated() {
        bail!("Sign in first: faculty login <email>");
    }
    advise_role(ctx, false);
    let profile = ctx
        .session
        .profile()
        .ok_or_else(|| anyhow!("No faculty profile; sign in with --role faculty"))?;
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        bail!(
            "Complete your profile before applying (missing: {})",
            missing.join(", ")
        );
    }

    let id = resolve_job(&ctx.store, input)?;
    let job = ctx
        .store
        .job(&id)
        .ok_or_else(|| anyhow!("Job not found: {}", input))?;
    if !job.is_active() {
        bail!("'{}' is closed to applications", job.title);
    }
    let title = job.title.clone();
    let institution = job.institution.clone();

    let applicant = ctx
        .session
        .applicant_data()
        .ok_or_else(|| anyhow!("No faculty profile; sign in with --role faculty"))?;
    let application = ctx.store.apply_to_job(&id, applicant);
    println!(
        "{} to {} at {} (application {})",
        styles::success().apply_to("Applied"),
        title,
        institution,
        styles::id().apply_to(application.id.as_str())
    );
    Ok(())
}

fn handle_applications(
    ctx: &FacultyContext,
    job: Option<&str>,
    status: Option<ApplicationStatus>,
    mine: bool,
    json: bool,
) -> Result<()> {
    if !mine {
        advise_role(ctx, true);
    }
    let job_id = job.map(|input| resolve_job(&ctx.store, input)).transpose()?;
    let applicant_email = if mine {
        let email = viewer_email(ctx).ok_or_else(|| anyhow!("Sign in first: faculty login <email>"))?;
        Some(email.to_string())
    } else {
        None
    };
    let filter = ApplicationFilter {
        job_id,
        status,
        applicant_email,
    };
    let applications = filter.apply(ctx.store.applications());
    if json {
        return print_json(&applications);
    }
    print!(
        "{}",
        render::application_list(&applications, ctx.store.jobs())
    );
    if mine && !applications.is_empty() {
        let counts = StatusCounts::from_applications(applications.iter().copied());
        print!("\n{}", render::status_counts(&counts));
    }
    Ok(())
}

fn handle_status(
    ctx: &mut FacultyContext,
    input: &str,
    status: ApplicationStatus,
) -> Result<()> {
    advise_role(ctx, true);
    let id = resolve_application(&ctx.store, input)?;
    ctx.store.update_application_status(&id, status);
    println!(
        "{} {} is now {}",
        styles::success().apply_to("Application"),
        styles::id().apply_to(render::short_id(id.as_str())),
        styles::application_status(status).apply_to(status)
    );
    Ok(())
}

// --- Markers ---

/// Markers may point at postings that no longer exist. An id matching no
/// posting is looked up among the existing markers, then toggled as given.
fn marker_target(ctx: &FacultyContext, input: &str, marked: &[JobId]) -> Result<JobId> {
    let input = input.trim();
    let known = ctx
        .store
        .jobs()
        .iter()
        .any(|job| job.id.as_str().starts_with(input));
    if known || input.is_empty() {
        return resolve_job(&ctx.store, input);
    }
    if let Some(exact) = marked.iter().find(|id| id.as_str() == input) {
        return Ok(exact.clone());
    }
    let matches: Vec<&JobId> = marked
        .iter()
        .filter(|id| id.as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Ok(JobId::new(input)),
        _ => Err(anyhow!(
            "Job id prefix '{}' is ambiguous ({} matches)",
            input,
            matches.len()
        )),
    }
}

fn handle_favorite(ctx: &mut FacultyContext, input: &str) -> Result<()> {
    let id = marker_target(ctx, input, ctx.store.favorite_jobs())?;
    ctx.store.toggle_favorite(&id);
    let state = if ctx.store.is_favorite(&id) {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    println!(
        "{} {}",
        styles::success().apply_to(state),
        styles::id().apply_to(render::short_id(id.as_str()))
    );
    Ok(())
}

fn handle_pin(ctx: &mut FacultyContext, input: &str) -> Result<()> {
    let id = marker_target(ctx, input, ctx.store.pinned_jobs())?;
    ctx.store.toggle_pinned(&id);
    let state = if ctx.store.is_pinned(&id) {
        "Pinned"
    } else {
        "Unpinned"
    };
    println!(
        "{} {}",
        styles::success().apply_to(state),
        styles::id().apply_to(render::short_id(id.as_str()))
    );
    Ok(())
}

enum Marked {
    Favorites,
    Pinned,
}

fn handle_marked(ctx: &FacultyContext, which: Marked) -> Result<()> {
    let (jobs, empty) = match which {
        Marked::Favorites => (query::favorite_jobs(&ctx.store), "No favorite jobs."),
        Marked::Pinned => (query::pinned_jobs(&ctx.store), "No pinned jobs."),
    };
    print!("{}", render::job_list(jobs, markers_for(ctx), empty));
    Ok(())
}

fn handle_applied(ctx: &FacultyContext) -> Result<()> {
    let email =
        viewer_email(ctx).ok_or_else(|| anyhow!("Sign in first: faculty login <email>"))?;
    let filter = ApplicationFilter {
        applicant_email: Some(email.to_string()),
        ..Default::default()
    };
    let applications = filter.apply(ctx.store.applications());
    let jobs = query::jobs_for_applications(&ctx.store, &applications);
    print!(
        "{}",
        render::job_list(jobs, markers_for(ctx), "No applications yet.")
    );
    let counts = StatusCounts::from_applications(applications.iter().copied());
    if counts.total() > 0 {
        print!("\n{}", render::status_counts(&counts));
    }
    Ok(())
}

// --- Board ---

fn handle_summary(ctx: &FacultyContext) -> Result<()> {
    let summary = BoardSummary::from_store(&ctx.store);
    print!("{}", render::board_summary(&summary));
    Ok(())
}

fn handle_seed(ctx: &mut FacultyContext) -> Result<()> {
    let (jobs, applications) = sample_board();
    let count = jobs.len();
    if ctx.store.seed(jobs, applications) {
        println!(
            "{} {} sample postings",
            styles::success().apply_to("Seeded"),
            count
        );
    } else {
        println!("Board already has postings; nothing seeded.");
    }
    Ok(())
}
