use serde::{Deserialize, Serialize};

/// Account role. The store migrated from a job-board schema whose role
/// strings survive in old databases; serde aliases map them onto the
/// current enumeration on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Teacher/office staff — submits found-item reports.
    #[serde(alias = "employer")]
    Finder,

    /// Student — searches the catalog and files claims.
    #[serde(alias = "employee")]
    Claimant,

    /// Moderator — approves/rejects reports and sets item status.
    Admin,
}

impl Role {
    /// Translate an external role name into the enumeration.
    ///
    /// Accepts the current names plus every legacy spelling the old signup
    /// forms produced. The core never branches on the raw string again.
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "finder" | "employer" | "teacher" | "office" | "teacher/office" => Some(Role::Finder),
            "claimant" | "employee" | "student" => Some(Role::Claimant),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A stored account. Never mutated after creation; there is no password
/// change flow. Passwords are compared in plaintext by design of the
/// source system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique key, compared case-insensitively. Stored casing is preserved.
    pub username: String,

    pub password: String,

    pub role: Role,
}

/// The single active session, persisted under the `currentUser` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Username with the stored casing, not the casing typed at login.
    pub username: String,

    pub role: Role,
}
