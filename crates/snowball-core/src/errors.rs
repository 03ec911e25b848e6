//! Error surface of the snowball crates.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed fatal assertion, as handed back under the raising abort policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Assertion variant that failed, e.g. `require_false` or `error`.
    pub kind: String,
    /// Canned detail or the caller supplied message.
    pub message: String,
    /// Test case active when the assertion failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case: Option<String>,
    /// Message of the error the target raised, for throw assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raised: Option<String>,
}

impl AssertionFailure {
    /// Failure of assertion `kind` with `message` and no further detail.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            test_case: None,
            raised: None,
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() failure: {}", self.kind, self.message)?;
        if let Some(test_case) = &self.test_case {
            write!(f, " in [ {test_case} ]")?;
        }
        if let Some(raised) = &self.raised {
            write!(f, " (raised: {raised})")?;
        }
        Ok(())
    }
}

/// Canonical error type for the snowball engine.
///
/// Under the raising abort policy a failed fatal assertion surfaces as
/// [`SnowballError::Assertion`]; it is the only variant that ever crosses the
/// assertion surface. The other variants come from loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum SnowballError {
    /// A fatal assertion failed and the session raises instead of exiting.
    #[error("{0}")]
    Assertion(AssertionFailure),
    /// Configuration text could not be decoded.
    #[error("invalid session config: {reason}")]
    Config {
        /// Decoder message.
        reason: String,
    },
    /// A configuration file could not be read.
    #[error("cannot read {}: {reason}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Operating system message.
        reason: String,
    },
}

impl SnowballError {
    /// Returns the failed assertion, if that is what this error reports.
    pub fn assertion(&self) -> Option<&AssertionFailure> {
        match self {
            SnowballError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns whether the error reports a failed fatal assertion.
    pub fn is_assertion(&self) -> bool {
        self.assertion().is_some()
    }
}
