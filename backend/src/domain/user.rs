//! User data model.
//!
//! A user is nothing more than a unique username plus a creation timestamp.
//! Users are created on first login and never mutated afterwards.

use std::fmt;

use chrono::NaiveDateTime;

/// Maximum username length, counted in characters.
pub const USERNAME_MAX: usize = 80;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username is required"),
            Self::UsernameTooLong { .. } => write!(f, "Username too long"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Login name, trimmed of surrounding whitespace.
///
/// ## Invariants
/// - non-empty after trimming;
/// - at most [`USERNAME_MAX`] characters.
///
/// # Examples
/// ```
/// use calculator_backend::domain::Username;
///
/// let name = Username::new("  ada  ").expect("valid username");
/// assert_eq!(name.as_ref(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier issued by a repository.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    created_at: NaiveDateTime,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Creation time in UTC.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
