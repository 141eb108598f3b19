//! Registration, login, and token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use glojourn_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use glojourn_auth::password::PasswordHasher;
use glojourn_core::config::auth::AuthConfig;
use glojourn_core::error::AppError;
use glojourn_core::result::AppResult;
use glojourn_database::repositories::user::UserRepository;
use glojourn_entity::user::model::CreateUser;
use glojourn_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// A successful login or registration: the user plus a token pair.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Fresh access + refresh tokens.
    pub tokens: TokenPair,
}

/// Handles signup, login, and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder.
    decoder: Arc<JwtDecoder>,
    /// Auth configuration (password policy).
    config: AuthConfig,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
            config,
        }
    }

    /// Register a new client account.
    ///
    /// Public registration always creates a `client`; staff accounts are
    /// created by an admin through the user service.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<LoginResult> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.trim().to_string(),
                email: email.to_lowercase(),
                password_hash,
                role: UserRole::Client,
                manager_id: None,
            })
            .await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.name)?;

        info!(user_id = %user.id, "User registered");
        Ok(LoginResult { user, tokens })
    }

    /// Authenticate with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }
        if !user.can_login() {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        self.user_repo.update_last_login(user.id).await?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.name)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, tokens })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The user must still exist and be active; the role is re-read so a
    /// stale refresh token cannot resurrect revoked access.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(String, DateTime<Utc>)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !user.can_login() {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        self.encoder
            .generate_access_token(user.id, user.role, &user.name)
    }

    /// Fetch the current user's full profile.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
