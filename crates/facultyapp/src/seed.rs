//! Sample postings and applications for a fresh board.

use crate::model::{
    Application, ApplicationId, ApplicationStatus, JobId, JobPosting, JobStatus,
};
use chrono::{DateTime, TimeZone, Utc};

struct SampleJob {
    title: &'static str,
    subject: &'static str,
    institution: &'static str,
    location: &'static str,
    experience: &'static str,
    qualification: &'static str,
    description: &'static str,
    posted: (u32, u32),
}

struct SampleApplication {
    job: usize,
    name: &'static str,
    email: &'static str,
    qualification: &'static str,
    experience: &'static str,
    status: ApplicationStatus,
    applied: (u32, u32),
}

const JOBS: &[SampleJob] = &[
    SampleJob {
        title: "Assistant Professor - Computer Science",
        subject: "Computer Science",
        institution: "MIT University",
        location: "Cambridge, MA",
        experience: "3-5 years",
        qualification: "Ph.D. in Computer Science",
        description: "Looking for a dynamic educator to teach undergraduate and graduate courses in computer science.",
        posted: (1, 15),
    },
    SampleJob {
        title: "Associate Professor - Mathematics",
        subject: "Mathematics",
        institution: "Stanford University",
        location: "Stanford, CA",
        experience: "5-8 years",
        qualification: "Ph.D. in Mathematics",
        description: "Seeking an experienced mathematician to lead research initiatives and teach advanced courses.",
        posted: (1, 12),
    },
    SampleJob {
        title: "Professor - Physics",
        subject: "Physics",
        institution: "Harvard University",
        location: "Cambridge, MA",
        experience: "8+ years",
        qualification: "Ph.D. in Physics",
        description: "Senior faculty position for leading groundbreaking research in quantum mechanics.",
        posted: (1, 10),
    },
    SampleJob {
        title: "Lecturer - English Literature",
        subject: "English",
        institution: "Yale University",
        location: "New Haven, CT",
        experience: "2-4 years",
        qualification: "M.A. or Ph.D. in English",
        description: "Teaching position focused on undergraduate English literature courses.",
        posted: (1, 8),
    },
    SampleJob {
        title: "Assistant Professor - Chemistry",
        subject: "Chemistry",
        institution: "Princeton University",
        location: "Princeton, NJ",
        experience: "3-5 years",
        qualification: "Ph.D. in Chemistry",
        description: "Research-focused position with teaching responsibilities in organic chemistry.",
        posted: (1, 5),
    },
];

const APPLICATIONS: &[SampleApplication] = &[
    SampleApplication {
        job: 0,
        name: "Dr. Sarah Johnson",
        email: "sarah.j@email.com",
        qualification: "Ph.D. Computer Science",
        experience: "4 years",
        status: ApplicationStatus::Shortlisted,
        applied: (1, 16),
    },
    SampleApplication {
        job: 0,
        name: "Dr. Michael Chen",
        email: "michael.c@email.com",
        qualification: "Ph.D. Computer Science",
        experience: "5 years",
        status: ApplicationStatus::Interview,
        applied: (1, 17),
    },
    SampleApplication {
        job: 1,
        name: "Dr. Emily Watson",
        email: "emily.w@email.com",
        qualification: "Ph.D. Mathematics",
        experience: "6 years",
        status: ApplicationStatus::Applied,
        applied: (1, 14),
    },
    SampleApplication {
        job: 2,
        name: "Dr. James Miller",
        email: "james.m@email.com",
        qualification: "Ph.D. Physics",
        experience: "10 years",
        status: ApplicationStatus::Rejected,
        applied: (1, 11),
    },
    SampleApplication {
        job: 3,
        name: "Prof. Lisa Brown",
        email: "lisa.b@email.com",
        qualification: "Ph.D. English Literature",
        experience: "3 years",
        status: ApplicationStatus::Shortlisted,
        applied: (1, 9),
    },
];

fn day_of_2024((month, day): (u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Sample postings (most recent first) and their applications.
/// Each posting's counter matches the applications seeded against it.
pub fn sample_board() -> (Vec<JobPosting>, Vec<Application>) {
    let mut jobs: Vec<JobPosting> = JOBS
        .iter()
        .map(|sample| JobPosting {
            id: JobId::generate(),
            title: sample.title.to_string(),
            subject: sample.subject.to_string(),
            institution: sample.institution.to_string(),
            location: sample.location.to_string(),
            experience_required: sample.experience.to_string(),
            qualification: sample.qualification.to_string(),
            description: sample.description.to_string(),
            posted_at: day_of_2024(sample.posted),
            status: JobStatus::Active,
            applications_count: 0,
        })
        .collect();

    let applications = APPLICATIONS
        .iter()
        .map(|sample| {
            let job = &mut jobs[sample.job];
            job.applications_count += 1;
            Application {
                id: ApplicationId::generate(),
                job_id: job.id.clone(),
                applicant_name: sample.name.to_string(),
                applicant_email: sample.email.to_string(),
                qualification: sample.qualification.to_string(),
                experience: sample.experience.to_string(),
                applied_at: day_of_2024(sample.applied),
                status: sample.status,
            }
        })
        .collect();

    (jobs, applications)
}
