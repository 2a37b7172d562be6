//! Calculation history records.
//!
//! A calculation is an immutable (expression, result) pair owned by a user,
//! tagged with a free-form kind and an optional label.

use std::fmt;

use chrono::NaiveDateTime;

use super::UserId;

/// Maximum stored expression length, in characters.
pub const EXPRESSION_MAX: usize = 500;
/// Maximum stored result length, in characters.
pub const RESULT_MAX: usize = 100;
/// Maximum calculation kind length, in characters.
pub const KIND_MAX: usize = 20;
/// Maximum custom label length, in characters.
pub const CUSTOM_NAME_MAX: usize = 100;

/// Kind recorded when the client does not provide one.
pub const DEFAULT_KIND: &str = "basic";

/// Validation errors raised while assembling a [`NewCalculation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationValidationError {
    MissingRequiredFields,
    ExpressionTooLong { max: usize },
    ResultTooLong { max: usize },
    KindTooLong { max: usize },
    CustomNameTooLong { max: usize },
}

impl fmt::Display for CalculationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields => write!(f, "Missing required fields"),
            Self::ExpressionTooLong { max } => {
                write!(f, "Expression must be at most {max} characters")
            }
            Self::ResultTooLong { max } => write!(f, "Result must be at most {max} characters"),
            Self::KindTooLong { max } => {
                write!(f, "Calculation type must be at most {max} characters")
            }
            Self::CustomNameTooLong { max } => {
                write!(f, "Custom name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CalculationValidationError {}

/// Store-assigned calculation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalculationId(i32);

impl CalculationId {
    /// Wrap a raw identifier issued by a repository.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form calculation kind such as `basic` or `scientific`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationKind(String);

impl CalculationKind {
    /// Validate a caller-supplied kind, falling back to [`DEFAULT_KIND`].
    pub fn new(raw: Option<String>) -> Result<Self, CalculationValidationError> {
        let kind = raw.unwrap_or_else(|| DEFAULT_KIND.to_owned());
        if kind.chars().count() > KIND_MAX {
            return Err(CalculationValidationError::KindTooLong { max: KIND_MAX });
        }
        Ok(Self(kind))
    }

    /// Rehydrate a kind that was already persisted.
    pub fn from_stored(kind: String) -> Self {
        Self(kind)
    }
}

impl Default for CalculationKind {
    fn default() -> Self {
        Self(DEFAULT_KIND.to_owned())
    }
}

impl AsRef<str> for CalculationKind {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Save request handed to the calculation history use-case.
///
/// Inbound adapters are responsible for turning wire values into strings;
/// empty strings count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCalculationRequest {
    pub username: String,
    pub expression: String,
    pub result: String,
    pub calculation_type: Option<String>,
    pub custom_name: Option<String>,
}

/// Validated calculation awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalculation {
    user_id: UserId,
    expression: String,
    result: String,
    kind: CalculationKind,
    custom_name: Option<String>,
}

impl NewCalculation {
    /// Validate the record fields for the given owner.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::{NewCalculation, UserId};
    ///
    /// let record = NewCalculation::try_new(UserId::new(1), "2+2", "4", None, None)
    ///     .expect("valid calculation");
    /// assert_eq!(record.kind().as_ref(), "basic");
    /// ```
    pub fn try_new(
        user_id: UserId,
        expression: impl Into<String>,
        result: impl Into<String>,
        kind: Option<String>,
        custom_name: Option<String>,
    ) -> Result<Self, CalculationValidationError> {
        let expression = expression.into();
        let result = result.into();
        if expression.is_empty() || result.is_empty() {
            return Err(CalculationValidationError::MissingRequiredFields);
        }
        if expression.chars().count() > EXPRESSION_MAX {
            return Err(CalculationValidationError::ExpressionTooLong {
                max: EXPRESSION_MAX,
            });
        }
        if result.chars().count() > RESULT_MAX {
            return Err(CalculationValidationError::ResultTooLong { max: RESULT_MAX });
        }
        if custom_name
            .as_deref()
            .is_some_and(|name| name.chars().count() > CUSTOM_NAME_MAX)
        {
            return Err(CalculationValidationError::CustomNameTooLong {
                max: CUSTOM_NAME_MAX,
            });
        }
        Ok(Self {
            user_id,
            expression,
            result,
            kind: CalculationKind::new(kind)?,
            custom_name,
        })
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Expression exactly as submitted.
    pub fn expression(&self) -> &str {
        self.expression.as_str()
    }

    /// Result text.
    pub fn result(&self) -> &str {
        self.result.as_str()
    }

    /// Calculation kind.
    pub fn kind(&self) -> &CalculationKind {
        &self.kind
    }

    /// Optional label.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Attach store-assigned identity, producing the persisted record.
    pub fn into_calculation(self, id: CalculationId, created_at: NaiveDateTime) -> Calculation {
        Calculation {
            id,
            user_id: self.user_id,
            expression: self.expression,
            result: self.result,
            kind: self.kind,
            custom_name: self.custom_name,
            created_at,
        }
    }
}

/// Persisted calculation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub id: CalculationId,
    pub user_id: UserId,
    pub expression: String,
    pub result: String,
    pub kind: CalculationKind,
    pub custom_name: Option<String>,
    pub created_at: NaiveDateTime,
}
