use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Invalid phone number format: expected 11 digits starting with 09")]
    InvalidFormat,
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Display name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Display name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },
}

/// Error reported by a `UserStore` implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The storage layer's uniqueness constraint rejected the phone number.
    #[error("Phone number is already in use")]
    PhoneNumberTaken,

    #[error("Database error: {0}")]
    Database(String),
}

/// The four failure kinds callers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Auth,
    Internal,
}

/// Top-level error for all identity operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(#[from] PhoneNumberError),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Phone number is already in use")]
    PhoneNumberTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    WrongPassword,

    #[error("Profile not found for user {0}")]
    ProfileNotFound(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidPhoneNumber(_)
            | UserError::InvalidDisplayName(_)
            | UserError::InvalidPassword(_) => ErrorKind::Validation,
            UserError::PhoneNumberTaken => ErrorKind::Conflict,
            UserError::UserNotFound | UserError::WrongPassword => ErrorKind::Auth,
            UserError::ProfileNotFound(_)
            | UserError::Hashing(_)
            | UserError::Signing(_)
            | UserError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PhoneNumberTaken => UserError::PhoneNumberTaken,
            StoreError::Database(msg) => UserError::Store(msg),
        }
    }
}
