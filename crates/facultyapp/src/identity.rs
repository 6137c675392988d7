//! # Identity Provider
//!
//! A simulated sign-in: there are no passwords and no accounts. [`Session::login`]
//! and [`Session::register`] fabricate a [`User`] from what they are given, and a
//! faculty user also gets a [`FacultyProfile`] to fill in.
//!
//! Roles are advisory. They tell the presentation layer which screens to offer;
//! nothing in the library enforces them.
//!
//! ## Applying
//!
//! The job store copies applicant details verbatim and validates nothing. Callers
//! must check [`Session::is_profile_complete`] before building an application from
//! [`Session::applicant_data`].
//!
//! ## Persistence
//!
//! The session is stored under the `{ns}-session` key of the same backend the job
//! store uses. A malformed entry loads as a signed-out session.

use crate::error::{FacultyError, Result};
use crate::model::ApplicantData;
use crate::store::{read_json, write_json, Keyspace, StorageBackend, StorageKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Faculty,
    Organization,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Faculty => "faculty",
            UserRole::Organization => "organization",
            UserRole::Admin => "admin",
        }
    }

    /// Name given to a fabricated user at login.
    fn default_name(&self) -> &'static str {
        match self {
            UserRole::Faculty => "John Doe",
            UserRole::Organization => "MIT University",
            UserRole::Admin => "Admin User",
        }
    }

    /// Whether the role manages postings and reviews applications.
    pub fn can_manage_jobs(&self) -> bool {
        matches!(self, UserRole::Organization | UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = FacultyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "faculty" => Ok(UserRole::Faculty),
            "organization" | "org" => Ok(UserRole::Organization),
            "admin" => Ok(UserRole::Admin),
            other => Err(FacultyError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub qualification: String,
    pub subject_expertise: String,
    pub years_of_experience: String,
    pub skills: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

impl FacultyProfile {
    fn for_user(user: &User, phone: String) -> Self {
        Self {
            full_name: user.name.clone(),
            email: user.email.clone(),
            phone,
            ..Default::default()
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("qualification", &self.qualification),
            ("subject expertise", &self.subject_expertise),
            ("years of experience", &self.years_of_experience),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Partial profile update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub qualification: Option<String>,
    pub subject_expertise: Option<String>,
    pub years_of_experience: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
}

impl ProfileUpdate {
    fn apply_to(self, profile: &mut FacultyProfile) {
        let fields = [
            (self.full_name, &mut profile.full_name),
            (self.email, &mut profile.email),
            (self.phone, &mut profile.phone),
            (self.qualification, &mut profile.qualification),
            (self.subject_expertise, &mut profile.subject_expertise),
            (self.years_of_experience, &mut profile.years_of_experience),
            (self.skills, &mut profile.skills),
            (self.bio, &mut profile.bio),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.resume_url.is_some() {
            profile.resume_url = self.resume_url;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterData {
    pub role: UserRole,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub institution_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: Option<User>,
    faculty_profile: Option<FacultyProfile>,
}

impl Session {
    pub fn login(&mut self, email: &str, role: UserRole) -> &User {
        let user = User {
            id: "1".to_string(),
            email: email.to_string(),
            role,
            name: role.default_name().to_string(),
        };
        self.start(user, String::new())
    }

    pub fn register(&mut self, data: RegisterData) -> &User {
        let name = non_blank(data.name)
            .or_else(|| non_blank(data.institution_name))
            .unwrap_or_else(|| "New User".to_string());
        let user = User {
            id: "1".to_string(),
            email: data.email,
            role: data.role,
            name,
        };
        self.start(user, data.phone.unwrap_or_default())
    }

    fn start(&mut self, user: User, phone: String) -> &User {
        self.faculty_profile = match user.role {
            UserRole::Faculty => Some(FacultyProfile::for_user(&user, phone)),
            _ => None,
        };
        self.user.insert(user)
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.faculty_profile = None;
    }

    /// Merge into the current profile. Without a profile this does nothing.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        if let Some(profile) = self.faculty_profile.as_mut() {
            update.apply_to(profile);
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&FacultyProfile> {
        self.faculty_profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_profile_complete(&self) -> bool {
        self.faculty_profile
            .as_ref()
            .is_some_and(|profile| profile.missing_fields().is_empty())
    }

    /// Application details pre-filled from the profile.
    pub fn applicant_data(&self) -> Option<ApplicantData> {
        self.faculty_profile.as_ref().map(|profile| ApplicantData {
            name: profile.full_name.clone(),
            email: profile.email.clone(),
            qualification: profile.qualification.clone(),
            experience: profile.years_of_experience.clone(),
        })
    }

    pub fn load<B: StorageBackend + ?Sized>(backend: &B, keys: &Keyspace) -> Self {
        let key = keys.key(StorageKey::Session);
        match read_json(backend, &key) {
            Ok(Some(session)) => session,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring unreadable session");
                Self::default()
            }
        }
    }

    /// A signed-out session removes its entry instead of writing an empty one.
    pub fn save<B: StorageBackend + ?Sized>(&self, backend: &B, keys: &Keyspace) -> Result<()> {
        let key = keys.key(StorageKey::Session);
        if self.is_authenticated() {
            write_json(backend, &key, self)
        } else {
            backend.remove(&key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn complete_profile() -> ProfileUpdate {
        ProfileUpdate {
            phone: Some("555-0100".into()),
            qualification: Some("Ph.D.".into()),
            subject_expertise: Some("Mathematics".into()),
            years_of_experience: Some("4 years".into()),
            ..Default::default()
        }
    }

    #[test]
    fn login_fabricates_user_by_role() {
        let mut session = Session::default();
        assert_eq!(
            session.login("hr@mit.edu", UserRole::Organization).name,
            "MIT University"
        );
        assert!(session.profile().is_none());

        assert_eq!(session.login("root@x.com", UserRole::Admin).name, "Admin User");

        let user = session.login("jd@x.com", UserRole::Faculty).clone();
        assert_eq!(user.name, "John Doe");
        let profile = session.profile().unwrap();
        assert_eq!(profile.full_name, "John Doe");
        assert_eq!(profile.email, "jd@x.com");
        assert!(session.is_authenticated());
    }

    #[test]
    fn register_names_user_from_data() {
        let mut session = Session::default();
        let user = session.register(RegisterData {
            role: UserRole::Organization,
            email: "hr@yale.edu".into(),
            name: None,
            phone: None,
            institution_name: Some("Yale University".into()),
        });
        assert_eq!(user.name, "Yale University");

        let user = session.register(RegisterData {
            role: UserRole::Faculty,
            email: "new@x.com".into(),
            name: None,
            phone: Some("555-0101".into()),
            institution_name: None,
        });
        assert_eq!(user.name, "New User");
        assert_eq!(session.profile().unwrap().phone, "555-0101");
    }

    #[test]
    fn register_skips_blank_names() {
        let mut session = Session::default();
        let user = session.register(RegisterData {
            role: UserRole::Organization,
            email: "hr@yale.edu".into(),
            name: Some("".into()),
            phone: None,
            institution_name: Some("Yale".into()),
        });
        assert_eq!(user.name, "Yale");

        let user = session.register(RegisterData {
            role: UserRole::Faculty,
            email: "new@x.com".into(),
            name: Some("  ".into()),
            phone: None,
            institution_name: Some("".into()),
        });
        assert_eq!(user.name, "New User");
    }

    #[test]
    fn fresh_faculty_profile_is_incomplete() {
        let mut session = Session::default();
        assert!(!session.is_profile_complete());

        session.login("jd@x.com", UserRole::Faculty);
        assert!(!session.is_profile_complete());
        assert_eq!(
            session.profile().unwrap().missing_fields(),
            vec![
                "phone",
                "qualification",
                "subject expertise",
                "years of experience"
            ]
        );

        session.update_profile(complete_profile());
        assert!(session.is_profile_complete());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut session = Session::default();
        session.login("jd@x.com", UserRole::Faculty);
        session.update_profile(ProfileUpdate {
            phone: Some("   ".into()),
            ..complete_profile()
        });
        assert!(!session.is_profile_complete());
    }

    #[test]
    fn update_without_profile_is_noop() {
        let mut session = Session::default();
        session.login("hr@mit.edu", UserRole::Organization);
        session.update_profile(complete_profile());
        assert!(session.profile().is_none());
    }

    #[test]
    fn applicant_data_comes_from_profile() {
        let mut session = Session::default();
        assert!(session.applicant_data().is_none());

        session.login("jd@x.com", UserRole::Faculty);
        session.update_profile(complete_profile());

        let data = session.applicant_data().unwrap();
        assert_eq!(data.name, "John Doe");
        assert_eq!(data.email, "jd@x.com");
        assert_eq!(data.qualification, "Ph.D.");
        assert_eq!(data.experience, "4 years");
    }

    #[test]
    fn logout_clears_everything() {
        let mut session = Session::default();
        session.login("jd@x.com", UserRole::Faculty);
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.profile().is_none());
    }

    #[test]
    fn session_persists_through_backend() {
        let backend = MemBackend::new();
        let keys = Keyspace::default();
        let mut session = Session::default();
        session.login("jd@x.com", UserRole::Faculty);
        session.update_profile(complete_profile());
        session.save(&backend, &keys).unwrap();

        let loaded = Session::load(&backend, &keys);
        assert_eq!(loaded, session);
    }

    #[test]
    fn saving_signed_out_session_removes_entry() {
        let backend = MemBackend::new();
        let keys = Keyspace::default();
        let mut session = Session::default();
        session.login("jd@x.com", UserRole::Faculty);
        session.save(&backend, &keys).unwrap();
        assert!(backend.raw(&keys.key(StorageKey::Session)).is_some());

        session.logout();
        session.save(&backend, &keys).unwrap();
        assert!(backend.raw(&keys.key(StorageKey::Session)).is_none());
        assert!(!Session::load(&backend, &keys).is_authenticated());
    }

    #[test]
    fn malformed_session_loads_signed_out() {
        let backend = MemBackend::new();
        let keys = Keyspace::default();
        backend.set_raw(&keys.key(StorageKey::Session), "nonsense");
        assert!(!Session::load(&backend, &keys).is_authenticated());
    }

    #[test]
    fn roles_parse() {
        assert_eq!("Org".parse::<UserRole>().unwrap(), UserRole::Organization);
        assert!("student".parse::<UserRole>().is_err());
        assert!(UserRole::Admin.can_manage_jobs());
        assert!(!UserRole::Faculty.can_manage_jobs());
    }
}
