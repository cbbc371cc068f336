use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use super::errors::UserError;
use super::models::AccessToken;
use super::models::DisplayName;
use super::models::LoginCommand;
use super::models::PhoneNumber;
use super::models::Profile;
use super::models::RawPassword;
use super::models::RegisterCommand;
use super::models::User;
use super::models::UserId;
use super::ports::IdentityServicePort;
use super::ports::UserStore;

/// Domain service implementation for identity operations.
///
/// Stateless between calls. Argon2 work runs on the blocking thread pool and
/// no lock is held while it does.
pub struct IdentityService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> IdentityService<S>
where
    S: UserStore,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing, built once at startup
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    async fn hash_password(&self, password: RawPassword) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::Hashing(e.to_string()))?
            .map_err(|e| UserError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl<S> IdentityServicePort for IdentityService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let phone_number = PhoneNumber::new(command.phone_number)?;

        if !self.store.is_phone_number_unique(&phone_number).await? {
            return Err(UserError::PhoneNumberTaken);
        }

        let name = DisplayName::new(command.name)?;
        command.password.ensure_policy()?;

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::UNASSIGNED,
            name,
            phone_number,
            password_hash,
        };

        // The store's unique constraint catches a concurrent registration
        // that slipped past the lookup above.
        let created_user = self.store.insert(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let user = self
            .store
            .find_by_phone_number(&command.phone_number)
            .await?
            .ok_or(UserError::UserNotFound)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash;
        let user_id = user.id;
        let now = Utc::now();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, user_id, now)
        })
        .await
        .map_err(|e| UserError::Hashing(e.to_string()))?;

        match result {
            Ok(authenticated) => {
                tracing::info!(user_id = %user_id, "User logged in");
                Ok(AccessToken {
                    token: authenticated.access_token,
                    expires_at: authenticated.expires_at,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user_id, "Login rejected: password mismatch");
                Err(UserError::WrongPassword)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::Hashing(e.to_string())),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Signing(e.to_string())),
        }
    }

    async fn profile(&self, id: &UserId) -> Result<Profile, UserError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|user| Profile { name: user.name })
            .ok_or_else(|| UserError::ProfileNotFound(id.to_string()))
    }
}
