//! Structured error types shared across the REMC crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic payload attached to every [`RemcError`] family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (chain indices, shapes, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl ErrorInfo {
    /// Creates a new payload from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attaches a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the REMC sampler.
///
/// Construction failures (`Shape`, `InvalidInit`) are fatal and never
/// recovered; `Model` failures propagate uncaught out of a run, since the
/// sampler has no retry policy for a failing model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum RemcError {
    /// Dimension mismatches in constructor inputs.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Non-finite model evaluation at a chain's initial point.
    #[error("invalid init error: {0}")]
    InvalidInit(ErrorInfo),
    /// Failure raised by a caller-supplied model capability.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Serialization or filesystem failure at the persistence boundary.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl RemcError {
    /// Returns the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            RemcError::Shape(info)
            | RemcError::InvalidInit(info)
            | RemcError::Model(info)
            | RemcError::Serde(info) => info,
        }
    }
}
