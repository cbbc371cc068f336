use async_trait::async_trait;

use super::errors::StoreError;
use super::errors::UserError;
use super::models::AccessToken;
use super::models::LoginCommand;
use super::models::PhoneNumber;
use super::models::Profile;
use super::models::RegisterCommand;
use super::models::User;
use super::models::UserId;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Checks run in order: phone number format, phone number uniqueness,
    /// display name, password policy. Then the password is hashed and the
    /// user persisted.
    ///
    /// # Returns
    /// The persisted user with its store-assigned id
    ///
    /// # Errors
    /// * `InvalidPhoneNumber` / `InvalidDisplayName` / `InvalidPassword` - Validation failed
    /// * `PhoneNumberTaken` - Phone number already registered
    /// * `Hashing` / `Store` - Infrastructure failure
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this phone number
    /// * `WrongPassword` - Password does not match the stored hash
    /// * `Hashing` / `Signing` / `Store` - Infrastructure failure
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, UserError>;

    /// Return the profile of an already authenticated user.
    ///
    /// The id is trusted; authorization happened before this call.
    ///
    /// # Errors
    /// * `ProfileNotFound` - The id does not exist
    /// * `Store` - Database operation failed
    async fn profile(&self, id: &UserId) -> Result<Profile, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Implementations must enforce phone number uniqueness atomically on insert,
/// independently of `is_phone_number_unique`.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Whether no user is registered with this phone number.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn is_phone_number_unique(&self, phone_number: &PhoneNumber)
        -> Result<bool, StoreError>;

    /// Persist a new user and assign its id.
    ///
    /// # Arguments
    /// * `user` - User with `UserId::UNASSIGNED`
    ///
    /// # Returns
    /// The same user carrying the assigned id
    ///
    /// # Errors
    /// * `PhoneNumberTaken` - Uniqueness constraint violated
    /// * `Database` - Storage operation failed
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Retrieve user by phone number.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, StoreError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}
