//! Error handling for etfcalc
//!
//! Defines the typed validation failures returned by the fee calculator and
//! establishes a unified Result type using anyhow for context chaining in the
//! application layer.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::fees::Field;

/// Validation failures for a single calculation attempt.
///
/// Every variant is terminal for the attempt: no partial breakdown is
/// produced and the caller is expected to re-prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("{0} is missing")]
    MissingField(Field),

    #[error("{field} is not a valid number: '{value}'")]
    NotANumber { field: Field, value: String },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: Field, value: Decimal },

    #[error("trade value {amount} exceeds the supported maximum")]
    TradeTooLarge { amount: Decimal },
}

/// Machine-readable tag for a [`CalcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcErrorKind {
    MissingField,
    NotANumber,
    NonPositive,
    TradeTooLarge,
}

impl CalcError {
    pub fn kind(&self) -> CalcErrorKind {
        match self {
            CalcError::MissingField(_) => CalcErrorKind::MissingField,
            CalcError::NotANumber { .. } => CalcErrorKind::NotANumber,
            CalcError::NonPositive { .. } => CalcErrorKind::NonPositive,
            CalcError::TradeTooLarge { .. } => CalcErrorKind::TradeTooLarge,
        }
    }

    /// The field that failed validation, if the failure is tied to one.
    pub fn field(&self) -> Option<Field> {
        match self {
            CalcError::MissingField(field)
            | CalcError::NotANumber { field, .. }
            | CalcError::NonPositive { field, .. } => Some(*field),
            CalcError::TradeTooLarge { .. } => None,
        }
    }

    /// Short message meant to be shown to the person filling in the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            CalcError::MissingField(_) => "Please fill in all fields",
            CalcError::NotANumber { .. } => "Please enter valid numbers",
            CalcError::NonPositive { .. } => "Please enter positive numbers",
            CalcError::TradeTooLarge { .. } => "Trade value is too large",
        }
    }
}

/// Failures of an interactive session action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("select a regime first (intraday or delivery)")]
    NoRegimeSelected,

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Failures while loading the optional configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;
