use lostfound_core::ServiceError;

use crate::model::{Role, Session, User};
use crate::service::{LostFoundService, WorkflowError, keys, norm_user};

/// Fixed seed credentials for the singleton Admin account, inserted on
/// first run. Override the password after first login is not supported —
/// accounts are immutable — so deployments should edit these before
/// go-live.
pub const SEED_ADMIN_USERNAME: &str = "admin";
pub const SEED_ADMIN_PASSWORD: &str = "lostfound-dev-admin";

fn trimmed(s: &str) -> String {
    s.trim().to_string()
}

impl LostFoundService {
    /// Register a new account. Does not log the user in.
    ///
    /// Only Finder and Claimant accounts can self-register; Admin cannot.
    /// Usernames are unique case-insensitively but keep their typed casing.
    pub fn sign_up(&self, username: &str, password: &str, role: Role) -> Result<User, WorkflowError> {
        let username = trimmed(username);
        let password = trimmed(password);

        if username.is_empty() || password.is_empty() {
            return Err(WorkflowError::Validation(
                "username and password are required".into(),
            ));
        }
        if role == Role::Admin {
            return Err(WorkflowError::Validation(
                "the admin account cannot be created from sign-up".into(),
            ));
        }

        let mut users: Vec<User> = self.load_or(keys::USERS, Vec::new());
        let folded = norm_user(&username);
        if users.iter().any(|u| norm_user(&u.username) == folded) {
            return Err(WorkflowError::Validation(format!(
                "username '{}' already exists",
                username
            )));
        }

        let user = User { username, password, role };
        users.push(user.clone());
        self.save(keys::USERS, &users)?;

        tracing::info!(username = %user.username, role = ?user.role, "account created");
        Ok(user)
    }

    /// Authenticate and open the single active session.
    ///
    /// The username matches case-insensitively; the password must match
    /// exactly. The persisted session carries the STORED casing of the
    /// username, not whatever the user typed.
    pub fn log_in(&self, username: &str, password: &str) -> Result<Session, WorkflowError> {
        let username = trimmed(username);
        let password = trimmed(password);

        let users: Vec<User> = self.load_or(keys::USERS, Vec::new());
        let folded = norm_user(&username);
        let user = users
            .iter()
            .find(|u| norm_user(&u.username) == folded && u.password == password)
            .ok_or_else(|| WorkflowError::Auth("invalid username or password".into()))?;

        let session = Session {
            username: user.username.clone(),
            role: user.role,
        };
        self.save(keys::CURRENT_USER, &session)?;

        tracing::info!(username = %session.username, "logged in");
        Ok(session)
    }

    /// Clear the active session. Idempotent — succeeds with no session open.
    pub fn log_out(&self) -> Result<(), WorkflowError> {
        self.delete_key(keys::CURRENT_USER)
    }

    /// The active session, if any. Pure read.
    pub fn current_session(&self) -> Option<Session> {
        self.load_or(keys::CURRENT_USER, None)
    }

    /// Insert the singleton Admin account if absent. Run once at startup;
    /// idempotent, so calling it on every startup is safe.
    pub fn ensure_admin_seed(&self) -> Result<(), ServiceError> {
        let mut users: Vec<User> = self.load_or(keys::USERS, Vec::new());
        if users
            .iter()
            .any(|u| norm_user(&u.username) == SEED_ADMIN_USERNAME)
        {
            return Ok(());
        }
        users.push(User {
            username: SEED_ADMIN_USERNAME.to_string(),
            password: SEED_ADMIN_PASSWORD.to_string(),
            role: Role::Admin,
        });
        self.save(keys::USERS, &users).map_err(ServiceError::from)?;
        tracing::info!(username = SEED_ADMIN_USERNAME, "seeded admin account");
        Ok(())
    }
}
