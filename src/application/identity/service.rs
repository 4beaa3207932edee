//! User management service — application-layer orchestration

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, NewUser, RepositoryProvider, User, UserChanges, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// The verified identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Fields a user may change on their own account.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service — orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password_with_cost(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Persistence(format!("Failed to hash password: {}", e)))
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Persistence(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new standard user. Email must be unused.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        self.create_with_role(name, email, password, UserRole::User)
            .await
    }

    async fn create_with_role(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        if self.repos.users().find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let user = self
            .repos
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: self.hash(password)?,
                role,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "New user registered");
        Ok(user)
    }

    /// Seed an admin account when no user exists yet. Returns `true` if one was created.
    pub async fn ensure_default_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<bool> {
        if self.repos.users().count().await? > 0 {
            return Ok(false);
        }

        self.create_with_role(name, email, password, UserRole::Admin)
            .await?;
        warn!(email, "Default admin created, change its password");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update the caller's own profile; any other target is refused.
    pub async fn update_user(
        &self,
        caller: &Caller,
        id: i32,
        update: ProfileUpdate,
    ) -> DomainResult<User> {
        let target = self.get_user(id).await?;

        if target.id != caller.user_id {
            return Err(DomainError::InvalidArgument("Not the same user".into()));
        }

        let password_hash = match update.password.as_deref() {
            Some(password) => Some(self.hash(password)?),
            None => None,
        };

        let changes = UserChanges {
            name: update.name,
            email: update.email,
            password_hash,
        };

        let updated = self
            .repos
            .users()
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = id, "User profile updated");
        Ok(updated)
    }

    /// Delete a user. Only the user themself or an admin may do this,
    /// and users that still own orders are kept.
    pub async fn delete_user(&self, caller: &Caller, id: i32) -> DomainResult<()> {
        let target = self.get_user(id).await?;

        if target.id != caller.user_id && !caller.is_admin() {
            return Err(DomainError::Forbidden(
                "Only the account owner or an admin can delete a user".into(),
            ));
        }

        if self.repos.orders().count_by_user(id).await? > 0 {
            return Err(DomainError::Conflict("User still has orders".into()));
        }

        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
