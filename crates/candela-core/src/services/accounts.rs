//! Account service: registration, login, session verification, user CRUD.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::{generate_token, session_ttl, PasswordHasher};
use crate::error::{ServiceError, ServiceResult};
use crate::model::{PublicUser, RegisterInput, Role, Session, User, UserPatch};
use crate::store::{Collection, StorageEngine};

pub struct AccountService {
    users: Collection<User>,
    sessions: Collection<Session>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(engine: Arc<dyn StorageEngine>, hasher: PasswordHasher) -> Self {
        Self {
            users: Collection::new(Arc::clone(&engine)),
            sessions: Collection::new(engine),
            hasher,
        }
    }

    /// Hash and store a new account; the returned record is sanitized.
    /// Email uniqueness is enforced here (case-insensitive).
    pub async fn register(&self, input: RegisterInput) -> ServiceResult<PublicUser> {
        input.validate()?;
        if self.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::conflict("An account with this email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash: self.hasher.hash(&input.password)?,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;
        info!(user_id = %user.id, "registered account");
        Ok(PublicUser::from(&user))
    }

    /// Verify credentials and issue a session token. The failure is the same
    /// generic error whether the email is unknown or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<(PublicUser, String)> {
        let user = self.find_by_email(email).await?.ok_or(ServiceError::LoginFailed)?;
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(ServiceError::LoginFailed);
        }

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            token: generate_token(),
            user_id: user.id,
            created_at: now,
            expires_at: now + session_ttl(),
        };
        self.sessions.insert(&session).await?;
        Ok((PublicUser::from(&user), session.token))
    }

    /// Resolve a bearer token to its user, rejecting unknown and expired
    /// sessions alike. An expired session is deleted on the spot.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let now = Utc::now();
        let sessions = self.sessions.find_where(|s| s.token == token).await?;
        let session = sessions.first().ok_or(ServiceError::Unauthorized)?;
        if session.is_expired(now) {
            self.sessions.delete(session.id).await?;
            return Err(ServiceError::Unauthorized);
        }
        self.users.find_by_id(session.user_id).await?.ok_or(ServiceError::Unauthorized)
    }

    pub async fn list(&self) -> ServiceResult<Vec<PublicUser>> {
        let users = self.users.find_all().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<PublicUser> {
        let user =
            self.users.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("User"))?;
        Ok(PublicUser::from(&user))
    }

    /// Patch an account. Role changes go through here as well; there is no
    /// transition table on roles.
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> ServiceResult<PublicUser> {
        let mut user =
            self.users.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("User"))?;

        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            if email.is_empty() || !email.contains('@') {
                return Err(ServiceError::validation("A valid email is required"));
            }
            if !user.email.eq_ignore_ascii_case(&email)
                && self.find_by_email(&email).await?.is_some()
            {
                return Err(ServiceError::conflict("An account with this email already exists"));
            }
            user.email = email;
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("Name is required"));
            }
            user.name = name;
        }
        if let Some(password) = patch.password {
            if password.is_empty() {
                return Err(ServiceError::validation("Password is required"));
            }
            user.password_hash = self.hasher.hash(&password)?;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        self.users.replace(&user).await?;
        Ok(PublicUser::from(&user))
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.users.delete(id).await? {
            return Err(ServiceError::not_found("User"));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let email = email.trim();
        let mut matches =
            self.users.find_where(|u| u.email.eq_ignore_ascii_case(email)).await?;
        Ok(matches.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEngine;
    use chrono::Duration;

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryEngine::new()), PasswordHasher::development())
    }

    fn register_input(email: &str, password: &str, role: Role) -> RegisterInput {
        RegisterInput {
            name: "A".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let accounts = service();
        let registered =
            accounts.register(register_input("a@x.com", "secret123", Role::User)).await.unwrap();

        let (logged_in, token) = accounts.login("a@x.com", "secret123").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_fail_identically() {
        let accounts = service();
        accounts.register(register_input("a@x.com", "secret123", Role::User)).await.unwrap();

        let wrong_password = accounts.login("a@x.com", "wrong").await.unwrap_err();
        let unknown_email = accounts.login("nobody@x.com", "secret123").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, ServiceError::LoginFailed));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let accounts = service();
        accounts.register(register_input("a@x.com", "secret123", Role::User)).await.unwrap();

        let err = accounts
            .register(register_input("A@X.COM", "other-pass", Role::User))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_resolves_a_live_session() {
        let accounts = service();
        accounts.register(register_input("a@x.com", "secret123", Role::Admin)).await.unwrap();
        let (user, token) = accounts.login("a@x.com", "secret123").await.unwrap();

        let resolved = accounts.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.role, Role::Admin);

        let err = accounts.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let accounts = service();
        accounts.register(register_input("a@x.com", "secret123", Role::User)).await.unwrap();
        let (user, token) = accounts.login("a@x.com", "secret123").await.unwrap();

        // Backdate the session past its expiry.
        let mut sessions = accounts.sessions.find_where(|s| s.token == token).await.unwrap();
        let mut session = sessions.pop().unwrap();
        session.expires_at = Utc::now() - Duration::seconds(1);
        accounts.sessions.replace(&session).await.unwrap();

        let err = accounts.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
        assert_eq!(accounts.get(user.id).await.unwrap().id, user.id);

        // The dead session is removed, not just rejected.
        let leftovers = accounts.sessions.find_where(|s| s.token == token).await.unwrap();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_role_change_via_update() {
        let accounts = service();
        let user =
            accounts.register(register_input("a@x.com", "secret123", Role::User)).await.unwrap();

        let patch = UserPatch { role: Some(Role::Admin), ..UserPatch::default() };
        let updated = accounts.update(user.id, patch).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let err = service().delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
