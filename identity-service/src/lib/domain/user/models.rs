use std::fmt;

use super::errors::DisplayNameError;
use super::errors::PasswordPolicyError;
use super::errors::PhoneNumberError;
use super::errors::UserIdError;
use super::validation;

/// User aggregate entity.
///
/// Represents a registered user. `password_hash` is an Argon2 PHC string and
/// never leaves the service in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub phone_number: PhoneNumber,
    pub password_hash: String,
}

/// User unique identifier type, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Placeholder carried by a user that has not been persisted yet.
    pub const UNASSIGNED: UserId = UserId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 > 0
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            Ok(id) => Err(UserIdError::InvalidFormat(format!(
                "expected a positive id, got {}",
                id
            ))),
            Err(e) => Err(UserIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Ensures the number is `09` followed by nine digits. Unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new valid phone number.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not exactly `09` followed by nine digits
    pub fn new(phone_number: String) -> Result<Self, PhoneNumberError> {
        if validation::is_valid_phone_number(&phone_number) {
            Ok(Self(phone_number))
        } else {
            Err(PhoneNumberError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display name value type
///
/// Ensures the name is 3-50 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 3 characters
    /// * `TooLong` - More than 50 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if validation::is_valid_display_name(&name) {
            return Ok(Self(name));
        }

        let actual = name.chars().count();
        if actual < validation::DISPLAY_NAME_MIN_LENGTH {
            Err(DisplayNameError::TooShort {
                min: validation::DISPLAY_NAME_MIN_LENGTH,
                actual,
            })
        } else {
            Err(DisplayNameError::TooLong {
                max: validation::DISPLAY_NAME_MAX_LENGTH,
                actual,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as received from a client.
///
/// Only lives for the duration of a register or login call. `Debug` is
/// redacted so it cannot end up in logs.
#[derive(Clone)]
pub struct RawPassword(String);

impl RawPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Check the registration password policy.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    pub fn ensure_policy(&self) -> Result<(), PasswordPolicyError> {
        if validation::is_valid_password(&self.0) {
            Ok(())
        } else {
            Err(PasswordPolicyError::TooShort {
                min: validation::PASSWORD_MIN_LENGTH,
            })
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(***)")
    }
}

/// Command to register a new user.
///
/// Fields are raw input: the service validates them in a fixed order so the
/// phone number is checked before its uniqueness lookup.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: String,
    pub phone_number: String,
    pub password: RawPassword,
}

impl RegisterCommand {
    pub fn new(name: String, phone_number: String, password: RawPassword) -> Self {
        Self {
            name,
            phone_number,
            password,
        }
    }
}

/// Command to log in with a phone number and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub phone_number: String,
    pub password: RawPassword,
}

impl LoginCommand {
    pub fn new(phone_number: String, password: RawPassword) -> Self {
        Self {
            phone_number,
            password,
        }
    }
}

/// Access token handed out on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// What a user may see about themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: DisplayName,
}
