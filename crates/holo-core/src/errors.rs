//! Structured error types shared across the holo crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HoloError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (site names, shapes, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the holo models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HoloError {
    /// A model strategy method was invoked without an implementation.
    #[error("not implemented: {0}")]
    NotImplemented(ErrorInfo),
    /// Model evaluation errors (missing parameters, duplicate sites, shapes).
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Invalid distribution parameters.
    #[error("distribution error: {0}")]
    Distribution(ErrorInfo),
    /// Errors reported by a scattering calculator.
    #[error("scattering error: {0}")]
    Scattering(ErrorInfo),
    /// Configuration parsing and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and IO errors for persisted artefacts.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HoloError {
    /// Builds the error raised when a strategy method has no implementation.
    pub fn not_implemented(operation: &str) -> Self {
        HoloError::NotImplemented(
            ErrorInfo::new(
                format!("{operation}-unimplemented"),
                format!("`{operation}` must be provided by a concrete model"),
            )
            .with_context("operation", operation)
            .with_hint("implement the method on the model or supply a forward strategy"),
        )
    }

    /// Builds the error raised when a sampled parameter is not present.
    pub fn missing_parameter(name: &str) -> Self {
        HoloError::Model(
            ErrorInfo::new("missing-parameter", "parameter was not sampled")
                .with_context("name", name),
        )
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HoloError::NotImplemented(info)
            | HoloError::Model(info)
            | HoloError::Distribution(info)
            | HoloError::Scattering(info)
            | HoloError::Config(info)
            | HoloError::Serde(info) => info,
        }
    }

    /// Returns true when the error signals a missing strategy implementation.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, HoloError::NotImplemented(_))
    }
}
