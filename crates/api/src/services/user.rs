//! Login, the caller's own profile, and admin user management.

use std::sync::Arc;

use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::user::{
    CreateUser, LoginRequest, NewUser, UpdateUser, User, UserChanges, UserResponse,
};
use assetdesk_db::store::{Page, UserStore};
use serde::Serialize;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Exchange email + password for an access token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, input: LoginRequest) -> AppResult<LoginResponse> {
        input.validate()?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !password_valid {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(CoreError::InvalidCredentials.into());
        }

        let token = generate_access_token(user.id, user.role, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: self.jwt.expires_in_secs(),
            user: user.into(),
        })
    }

    /// Profile of the authenticated caller.
    pub async fn profile(&self, user_id: DbId) -> AppResult<UserResponse> {
        Ok(self.get(user_id).await?)
    }

    pub async fn create(&self, input: CreateUser) -> AppResult<UserResponse> {
        input.validate()?;
        self.ensure_email_free(&input.email, None).await?;

        let new_user = NewUser {
            name: input.name,
            email: input.email,
            password_hash: hash(&input.password)?,
            role: input.role,
        };
        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user.into())
    }

    pub async fn get(&self, id: DbId) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        Ok(user.into())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Page<UserResponse>> {
        let (users, total) = self.users.list(limit, offset).await?;
        Ok((users.into_iter().map(UserResponse::from).collect(), total))
    }

    pub async fn update(&self, id: DbId, input: UpdateUser) -> AppResult<UserResponse> {
        input.validate()?;
        if let Some(email) = &input.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password_hash: input.password.as_deref().map(hash).transpose()?,
            role: input.role,
        };
        let user = self
            .users
            .update(id, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(user.into())
    }

    /// Delete a user. Fails with `Conflict` (from the foreign key) while
    /// the user is still the reporter of any ticket.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn find(&self, id: DbId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    async fn ensure_email_free(&self, email: &str, except: Option<DbId>) -> AppResult<()> {
        match self.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != except => Err(CoreError::Conflict(format!(
                "User with email '{email}' already exists"
            ))
            .into()),
            _ => Ok(()),
        }
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "User", id }
}
